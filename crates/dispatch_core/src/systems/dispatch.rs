use bevy_ecs::prelude::World;
use serde::Serialize;
use tracing::info;

use crate::ecs::{Available, Driver, Position};
use crate::error::DispatchError;
use crate::ids::{DriverId, RideId};
use crate::ledger::RideLedger;
use crate::matching::{DriverCandidate, MatchingAlgorithmResource};
use crate::queue::{Rider, RiderQueue};
use crate::registry::{set_availability, DriverRegistry};
use crate::telemetry::DispatchTelemetry;

/// Outcome of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RideAssignment {
    pub ride: RideId,
    pub driver: DriverId,
    pub driver_name: String,
    pub rider: Rider,
    pub pickup_distance: f64,
}

/// Available drivers in registration order.
pub fn available_candidates(world: &World) -> Vec<DriverCandidate> {
    world
        .resource::<DriverRegistry>()
        .iter()
        .filter_map(|(id, entity)| {
            let entity_ref = world.get_entity(entity)?;
            if !entity_ref.contains::<Available>() {
                return None;
            }
            let driver = entity_ref.get::<Driver>()?;
            let position = entity_ref.get::<Position>()?;
            Some(DriverCandidate {
                driver: id,
                entity,
                location: position.0,
                rating: driver.rating,
            })
        })
        .collect()
}

/// Match the rider at the head of the queue with the best available driver.
///
/// The head rider is only removed once a driver has been chosen and the ride
/// recorded; every failure leaves the world untouched.
pub fn dispatch_system(world: &mut World) -> Result<RideAssignment, DispatchError> {
    let outcome = try_dispatch(world);
    if let Some(mut telemetry) = world.get_resource_mut::<DispatchTelemetry>() {
        match &outcome {
            Ok(_) => telemetry.dispatched += 1,
            Err(error) => telemetry.record_dispatch_failure(error),
        }
    }
    outcome
}

fn try_dispatch(world: &mut World) -> Result<RideAssignment, DispatchError> {
    let rider = world
        .resource::<RiderQueue>()
        .peek_front()
        .cloned()
        .ok_or(DispatchError::NoRidersWaiting)?;

    let candidates = available_candidates(world);
    if candidates.is_empty() {
        info!(rider = %rider.id, "no drivers available; rider stays at queue head");
        return Err(DispatchError::NoDriversAvailable);
    }

    world.resource::<RideLedger>().ensure_room()?;

    let choice = world
        .resource::<MatchingAlgorithmResource>()
        .find_match(&rider, &candidates)
        .ok_or(DispatchError::NoDriversAvailable)?;

    let ride = world.resource_mut::<RideLedger>().open(
        rider.id,
        choice.driver,
        choice.pickup_distance,
    )?;
    set_availability(world, choice.driver, false);
    let served = world.resource_mut::<RiderQueue>().dequeue_front();
    debug_assert_eq!(served.as_ref().map(|r| r.id), Some(rider.id));

    let driver_name = world
        .get::<Driver>(choice.entity)
        .map(|driver| driver.name.clone())
        .unwrap_or_default();

    info!(
        ride = %ride,
        driver = %choice.driver,
        rider = %rider.id,
        distance = choice.pickup_distance,
        "driver assigned"
    );

    Ok(RideAssignment {
        ride,
        driver: choice.driver,
        driver_name,
        rider,
        pickup_distance: choice.pickup_distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DispatchConfig;
    use crate::error::CapacityKind;
    use crate::geometry::Point;
    use crate::ledger::RideStatus;
    use crate::queue::request_ride;
    use crate::registry::{find_driver, register_driver};
    use crate::test_helpers::{create_test_world, create_test_world_with};

    #[test]
    fn dispatch_commits_ride_availability_and_queue_together() {
        let mut world = create_test_world();
        let near = register_driver(&mut world, "near", 3.0, Point::new(1.0, 0.0))
            .expect("near");
        let far = register_driver(&mut world, "far", 5.0, Point::new(9.0, 0.0))
            .expect("far");
        let rider = request_ride(&mut world, "r", Point::ORIGIN, Point::new(4.0, 4.0))
            .expect("r");

        let assignment = dispatch_system(&mut world).expect("assignment");

        assert_eq!(assignment.driver, near);
        assert_eq!(assignment.driver_name, "near");
        assert_eq!(assignment.rider.id, rider);
        assert!(!find_driver(&world, near).expect("near").available);
        assert!(find_driver(&world, far).expect("far").available);
        assert!(world.resource::<RiderQueue>().is_empty());

        let ride = world
            .resource::<RideLedger>()
            .get(assignment.ride)
            .cloned()
            .expect("ride");
        assert_eq!(ride.status, RideStatus::Ongoing);
        assert_eq!(ride.rider, rider);
        assert_eq!(world.resource::<DispatchTelemetry>().dispatched, 1);
    }

    #[test]
    fn available_candidates_skip_busy_drivers() {
        let mut world = create_test_world();
        let busy = register_driver(&mut world, "busy", 1.0, Point::ORIGIN)
            .expect("busy");
        let free = register_driver(&mut world, "free", 1.0, Point::ORIGIN)
            .expect("free");
        set_availability(&mut world, busy, false);

        let candidates = available_candidates(&world);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].driver, free);
    }

    #[test]
    fn empty_queue_fails_before_scanning() {
        let mut world = create_test_world();
        register_driver(&mut world, "idle", 1.0, Point::ORIGIN)
            .expect("driver");

        assert_eq!(
            dispatch_system(&mut world),
            Err(DispatchError::NoRidersWaiting)
        );
        assert_eq!(world.resource::<DispatchTelemetry>().no_riders_waiting, 1);
    }

    #[test]
    fn full_ledger_rejects_before_touching_queue_or_driver() {
        let mut world = create_test_world_with(DispatchConfig::default().with_max_rides(0));
        let driver = register_driver(&mut world, "d", 4.0, Point::ORIGIN)
            .expect("driver");
        request_ride(&mut world, "r", Point::ORIGIN, Point::ORIGIN)
            .expect("rider");

        let err = dispatch_system(&mut world).unwrap_err();

        assert!(matches!(
            err,
            DispatchError::CapacityExceeded(e) if e.kind == CapacityKind::Rides
        ));
        assert!(find_driver(&world, driver).expect("driver").available);
        assert_eq!(world.resource::<RiderQueue>().len(), 1);
    }
}
