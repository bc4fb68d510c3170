//! Telemetry: outcome counters for dispatch and completion requests.

use bevy_ecs::prelude::Resource;
use serde::Serialize;

use crate::error::{CompletionError, DispatchError};
use crate::ids::{DriverId, RideId, RiderId};

/// One ride closed through completion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletedRideRecord {
    pub ride: RideId,
    pub rider: RiderId,
    pub driver: DriverId,
    pub pickup_distance: f64,
}

/// Collects dispatch outcomes. Inserted by the service; read via [`DispatchStats`].
#[derive(Debug, Default, Resource)]
pub struct DispatchTelemetry {
    pub dispatched: u64,
    pub no_riders_waiting: u64,
    pub no_drivers_available: u64,
    pub capacity_rejections: u64,
    pub completion_failures: u64,
    pub completed_rides: Vec<CompletedRideRecord>,
}

impl DispatchTelemetry {
    pub fn record_dispatch_failure(&mut self, error: &DispatchError) {
        match error {
            DispatchError::NoRidersWaiting => self.no_riders_waiting += 1,
            DispatchError::NoDriversAvailable => self.no_drivers_available += 1,
            DispatchError::CapacityExceeded(_) => self.capacity_rejections += 1,
        }
    }

    pub fn record_completion_failure(&mut self, _error: &CompletionError) {
        self.completion_failures += 1;
    }

    pub fn stats(&self) -> DispatchStats {
        let completed = self.completed_rides.len() as u64;
        let total_pickup_distance: f64 = self
            .completed_rides
            .iter()
            .map(|record| record.pickup_distance)
            .sum();
        DispatchStats {
            dispatched: self.dispatched,
            completed,
            no_riders_waiting: self.no_riders_waiting,
            no_drivers_available: self.no_drivers_available,
            capacity_rejections: self.capacity_rejections,
            completion_failures: self.completion_failures,
            mean_completed_pickup_distance: (completed > 0)
                .then(|| total_pickup_distance / completed as f64),
        }
    }
}

/// Summary of [`DispatchTelemetry`] for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchStats {
    pub dispatched: u64,
    pub completed: u64,
    pub no_riders_waiting: u64,
    pub no_drivers_available: u64,
    pub capacity_rejections: u64,
    pub completion_failures: u64,
    pub mean_completed_pickup_distance: Option<f64>,
}
