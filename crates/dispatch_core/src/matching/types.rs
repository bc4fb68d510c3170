use bevy_ecs::prelude::Entity;

use crate::geometry::Point;
use crate::ids::DriverId;

/// An available driver offered to the matching algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverCandidate {
    pub driver: DriverId,
    pub entity: Entity,
    pub location: Point,
    pub rating: f64,
}

/// The driver picked for a rider, with the pickup distance that decided it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchCandidate {
    pub driver: DriverId,
    pub entity: Entity,
    pub pickup_distance: f64,
}

impl MatchCandidate {
    pub fn for_pickup(candidate: &DriverCandidate, pickup: Point) -> Self {
        Self {
            driver: candidate.driver,
            entity: candidate.entity,
            pickup_distance: candidate.location.distance_to(&pickup),
        }
    }
}
