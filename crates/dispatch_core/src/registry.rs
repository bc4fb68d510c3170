//! Driver registry: every registered driver, in registration order.
//!
//! Drivers live as entities carrying [`Driver`] and [`Position`] components.
//! Matchability is carried solely by the [`Available`] marker; the registry
//! resource only maps ids to entities and hands out new ids.

use bevy_ecs::prelude::{Entity, Resource, World};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::DispatchConfig;
use crate::ecs::{Available, Driver, Position};
use crate::error::{CapacityExceeded, CapacityKind};
use crate::geometry::Point;
use crate::ids::{DriverId, IdSequence};

#[derive(Debug, Default, Resource)]
pub struct DriverRegistry {
    ids: IdSequence,
    // Sorted by id because ids are handed out in increasing order.
    entries: Vec<(DriverId, Entity)>,
}

impl DriverRegistry {
    pub fn starting_at(id_base: u64) -> Self {
        Self {
            ids: IdSequence::starting_at(id_base),
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entity(&self, id: DriverId) -> Option<Entity> {
        self.entries
            .binary_search_by_key(&id, |(driver_id, _)| *driver_id)
            .ok()
            .map(|index| self.entries[index].1)
    }

    /// Registered drivers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (DriverId, Entity)> + '_ {
        self.entries.iter().copied()
    }

    fn allocate(&mut self) -> Result<DriverId, CapacityExceeded> {
        self.ids.advance().map(DriverId)
    }

    fn push(&mut self, id: DriverId, entity: Entity) {
        debug_assert!(
            self.entries.last().map_or(true, |(last, _)| *last < id),
            "driver ids must be registered in increasing order"
        );
        self.entries.push((id, entity));
    }
}

/// Read-only view of one driver, for listings and lookups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverRecord {
    pub id: DriverId,
    pub name: String,
    pub rating: f64,
    pub location: Point,
    pub available: bool,
}

/// Register a new driver as available. Any name, rating and location is accepted.
pub fn register_driver(
    world: &mut World,
    name: impl Into<String>,
    rating: f64,
    location: Point,
) -> Result<DriverId, CapacityExceeded> {
    let limit = world.resource::<DispatchConfig>().max_drivers;
    let registered = world.resource::<DriverRegistry>().len();
    if let Some(limit) = limit {
        if registered >= limit {
            warn!(limit, "driver registration rejected: registry full");
            return Err(CapacityExceeded {
                kind: CapacityKind::Drivers,
                limit,
            });
        }
    }

    let name = name.into();
    let id = world
        .resource_mut::<DriverRegistry>()
        .allocate()
        .inspect_err(|_| warn!("driver registration rejected: driver ids exhausted"))?;
    let entity = world
        .spawn((
            Driver {
                id,
                name: name.clone(),
                rating,
            },
            Position(location),
            Available,
        ))
        .id();
    world.resource_mut::<DriverRegistry>().push(id, entity);

    info!(driver = %id, %name, rating, x = location.x, y = location.y, "driver registered");
    Ok(id)
}

fn record_for(world: &World, entity: Entity) -> Option<DriverRecord> {
    let entity_ref = world.get_entity(entity)?;
    let driver = entity_ref.get::<Driver>()?;
    let position = entity_ref.get::<Position>()?;
    Some(DriverRecord {
        id: driver.id,
        name: driver.name.clone(),
        rating: driver.rating,
        location: position.0,
        available: entity_ref.contains::<Available>(),
    })
}

pub fn find_driver(world: &World, id: DriverId) -> Option<DriverRecord> {
    let entity = world.resource::<DriverRegistry>().entity(id)?;
    record_for(world, entity)
}

/// All drivers in registration order.
pub fn list_drivers(world: &World) -> Vec<DriverRecord> {
    world
        .resource::<DriverRegistry>()
        .iter()
        .filter_map(|(_, entity)| record_for(world, entity))
        .collect()
}

/// Flip a driver's availability. Unknown ids are ignored.
pub fn set_availability(world: &mut World, id: DriverId, available: bool) {
    let Some(entity) = world.resource::<DriverRegistry>().entity(id) else {
        return;
    };
    let Some(mut entity_mut) = world.get_entity_mut(entity) else {
        return;
    };
    if available {
        entity_mut.insert(Available);
    } else {
        entity_mut.remove::<Available>();
    }
}
