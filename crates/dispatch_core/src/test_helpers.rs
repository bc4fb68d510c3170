//! Test helpers for common test setup.

use bevy_ecs::prelude::World;

use crate::config::DispatchConfig;
use crate::geometry::Point;
use crate::ids::DriverId;
use crate::matching::NearestRatedMatching;
use crate::service::{build_dispatch_world, DispatchService};

/// World with default config and nearest-driver matching.
pub fn create_test_world() -> World {
    create_test_world_with(DispatchConfig::default())
}

pub fn create_test_world_with(config: DispatchConfig) -> World {
    let mut world = World::new();
    let algorithm = NearestRatedMatching::new(config.tie_epsilon);
    build_dispatch_world(&mut world, config, Box::new(algorithm));
    world
}

/// Register `(name, rating, x, y)` drivers in order and return their ids.
///
/// # Panics
///
/// Panics if the service's driver bound is smaller than `drivers`.
pub fn register_drivers(
    service: &mut DispatchService,
    drivers: &[(&str, f64, f64, f64)],
) -> Vec<DriverId> {
    drivers
        .iter()
        .map(|(name, rating, x, y)| {
            service
                .register_driver(*name, *rating, Point::new(*x, *y))
                .expect("driver registration within bound")
        })
        .collect()
}
