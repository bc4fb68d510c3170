use bevy_ecs::prelude::Component;

use crate::geometry::Point;
use crate::ids::DriverId;

/// Static driver attributes set at registration.
#[derive(Debug, Clone, PartialEq, Component)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    pub rating: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct Position(pub Point);

/// Marker: the driver has no ongoing ride and may be matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Component)]
pub struct Available;
