use bevy_ecs::prelude::World;
use tracing::info;

use crate::error::CompletionError;
use crate::ids::{DriverId, RideId};
use crate::ledger::RideLedger;
use crate::registry::{set_availability, DriverRegistry};
use crate::telemetry::{CompletedRideRecord, DispatchTelemetry};

/// Close the ongoing ride of `driver` and return the driver to the pool.
pub fn ride_completed_system(
    world: &mut World,
    driver: DriverId,
) -> Result<RideId, CompletionError> {
    let outcome = try_complete(world, driver);
    if let Some(mut telemetry) = world.get_resource_mut::<DispatchTelemetry>() {
        match &outcome {
            Ok(record) => telemetry.completed_rides.push(record.clone()),
            Err(error) => telemetry.record_completion_failure(error),
        }
    }
    outcome.map(|record| record.ride)
}

fn try_complete(
    world: &mut World,
    driver: DriverId,
) -> Result<CompletedRideRecord, CompletionError> {
    if world.resource::<DriverRegistry>().entity(driver).is_none() {
        return Err(CompletionError::UnknownDriverId(driver));
    }

    let record = world
        .resource_mut::<RideLedger>()
        .complete_for(driver)
        .map(|ride| CompletedRideRecord {
            ride: ride.id,
            rider: ride.rider,
            driver: ride.driver,
            pickup_distance: ride.pickup_distance,
        })
        .ok_or(CompletionError::NoOngoingRideForDriver(driver))?;

    set_availability(world, driver, true);
    info!(ride = %record.ride, driver = %driver, "ride completed");
    Ok(record)
}
