//! Dispatch configuration: id base, tie-break threshold and capacity bounds.

use bevy_ecs::prelude::Resource;

/// Distances closer than this are treated as equal and resolved by rating.
pub const DEFAULT_TIE_EPSILON: f64 = 1e-6;

/// Capacities of the fixed arrays in the original console program.
pub const LEGACY_MAX_DRIVERS: usize = 50;
pub const LEGACY_MAX_WAITING_RIDERS: usize = 50;
pub const LEGACY_MAX_RIDES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Resource)]
pub struct DispatchConfig {
    /// First id handed out for drivers, riders and rides.
    pub id_base: u64,
    pub tie_epsilon: f64,
    /// `None` = unbounded.
    pub max_drivers: Option<usize>,
    pub max_waiting_riders: Option<usize>,
    pub max_rides: Option<usize>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            id_base: 1,
            tie_epsilon: DEFAULT_TIE_EPSILON,
            max_drivers: None,
            max_waiting_riders: None,
            max_rides: None,
        }
    }
}

impl DispatchConfig {
    /// Bounds matching the original program's fixed tables.
    pub fn legacy_limits() -> Self {
        Self::default()
            .with_max_drivers(LEGACY_MAX_DRIVERS)
            .with_max_waiting_riders(LEGACY_MAX_WAITING_RIDERS)
            .with_max_rides(LEGACY_MAX_RIDES)
    }

    pub fn with_id_base(mut self, base: u64) -> Self {
        self.id_base = base;
        self
    }

    pub fn with_tie_epsilon(mut self, epsilon: f64) -> Self {
        self.tie_epsilon = epsilon;
        self
    }

    pub fn with_max_drivers(mut self, max: usize) -> Self {
        self.max_drivers = Some(max);
        self
    }

    pub fn with_max_waiting_riders(mut self, max: usize) -> Self {
        self.max_waiting_riders = Some(max);
        self
    }

    pub fn with_max_rides(mut self, max: usize) -> Self {
        self.max_rides = Some(max);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbounded_from_one() {
        let config = DispatchConfig::default();
        assert_eq!(config.id_base, 1);
        assert_eq!(config.tie_epsilon, DEFAULT_TIE_EPSILON);
        assert!(config.max_drivers.is_none());
        assert!(config.max_waiting_riders.is_none());
        assert!(config.max_rides.is_none());
    }

    #[test]
    fn legacy_limits_apply_fixed_tables() {
        let config = DispatchConfig::legacy_limits().with_id_base(100);
        assert_eq!(config.max_drivers, Some(50));
        assert_eq!(config.max_waiting_riders, Some(50));
        assert_eq!(config.max_rides, Some(100));
        assert_eq!(config.id_base, 100);
    }
}
