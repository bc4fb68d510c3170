//! The dispatch service: owns the world and exposes every operator operation.
//!
//! All state (drivers, queue, ledger, counters) lives in one [`World`] built by
//! [`build_dispatch_world`]. Operations take `&mut self`, so a dispatch's
//! scan-then-mutate sequence can never interleave with a completion.

use bevy_ecs::prelude::World;

use crate::config::DispatchConfig;
use crate::error::{CapacityExceeded, CompletionError, DispatchError};
use crate::geometry::Point;
use crate::ids::{DriverId, RideId, RiderId};
use crate::ledger::{Ride, RideLedger};
use crate::matching::{MatchingAlgorithm, MatchingAlgorithmResource, NearestRatedMatching};
use crate::queue::{self, queue_from_config, Rider, RiderQueue};
use crate::registry::{self, DriverRecord, DriverRegistry};
use crate::systems::dispatch::{dispatch_system, RideAssignment};
use crate::systems::ride_completed::ride_completed_system;
use crate::telemetry::{DispatchStats, DispatchTelemetry};

/// Insert every resource the dispatch systems read.
pub fn build_dispatch_world(
    world: &mut World,
    config: DispatchConfig,
    algorithm: Box<dyn MatchingAlgorithm>,
) {
    world.insert_resource(DriverRegistry::starting_at(config.id_base));
    world.insert_resource(queue_from_config(&config));
    world.insert_resource(RideLedger::new(config.id_base, config.max_rides));
    world.insert_resource(DispatchTelemetry::default());
    world.insert_resource(MatchingAlgorithmResource::new(algorithm));
    world.insert_resource(config);
}

pub struct DispatchService {
    world: World,
}

impl DispatchService {
    /// Service using nearest-driver matching with the configured tie threshold.
    pub fn new(config: DispatchConfig) -> Self {
        let algorithm = NearestRatedMatching::new(config.tie_epsilon);
        Self::with_algorithm(config, Box::new(algorithm))
    }

    pub fn with_algorithm(config: DispatchConfig, algorithm: Box<dyn MatchingAlgorithm>) -> Self {
        let mut world = World::new();
        build_dispatch_world(&mut world, config, algorithm);
        Self { world }
    }

    pub fn config(&self) -> &DispatchConfig {
        self.world.resource::<DispatchConfig>()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn register_driver(
        &mut self,
        name: impl Into<String>,
        rating: f64,
        location: Point,
    ) -> Result<DriverId, CapacityExceeded> {
        registry::register_driver(&mut self.world, name, rating, location)
    }

    pub fn request_ride(
        &mut self,
        name: impl Into<String>,
        pickup: Point,
        dropoff: Point,
    ) -> Result<RiderId, CapacityExceeded> {
        queue::request_ride(&mut self.world, name, pickup, dropoff)
    }

    pub fn dispatch(&mut self) -> Result<RideAssignment, DispatchError> {
        dispatch_system(&mut self.world)
    }

    pub fn complete_ride(&mut self, driver: DriverId) -> Result<RideId, CompletionError> {
        ride_completed_system(&mut self.world, driver)
    }

    /// Unknown ids are ignored.
    pub fn set_availability(&mut self, driver: DriverId, available: bool) {
        registry::set_availability(&mut self.world, driver, available);
    }

    pub fn driver(&self, id: DriverId) -> Option<DriverRecord> {
        registry::find_driver(&self.world, id)
    }

    pub fn drivers(&self) -> Vec<DriverRecord> {
        registry::list_drivers(&self.world)
    }

    /// The rider the next dispatch will serve.
    pub fn next_rider(&self) -> Option<&Rider> {
        self.world.resource::<RiderQueue>().peek_front()
    }

    pub fn waiting_riders(&self) -> Vec<Rider> {
        queue::waiting_riders(&self.world)
    }

    pub fn ride(&self, id: RideId) -> Option<Ride> {
        self.world.resource::<RideLedger>().get(id).cloned()
    }

    pub fn ongoing_ride_for(&self, driver: DriverId) -> Option<Ride> {
        self.world
            .resource::<RideLedger>()
            .ongoing_for(driver)
            .cloned()
    }

    pub fn rides(&self) -> Vec<Ride> {
        self.world
            .resource::<RideLedger>()
            .iter()
            .cloned()
            .collect()
    }

    pub fn stats(&self) -> DispatchStats {
        self.world.resource::<DispatchTelemetry>().stats()
    }
}

impl Default for DispatchService {
    fn default() -> Self {
        Self::new(DispatchConfig::default())
    }
}
