//! Ride ledger: append-only record of every ride created by dispatch.

use std::fmt;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::error::{CapacityExceeded, CapacityKind};
use crate::ids::{DriverId, IdSequence, RideId, RiderId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    Ongoing,
    Completed,
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RideStatus::Ongoing => f.write_str("ongoing"),
            RideStatus::Completed => f.write_str("completed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    pub id: RideId,
    pub rider: RiderId,
    pub driver: DriverId,
    /// Distance from the driver's location at assignment to the rider's pickup.
    pub pickup_distance: f64,
    pub status: RideStatus,
}

#[derive(Debug, Default, Resource)]
pub struct RideLedger {
    ids: IdSequence,
    rides: Vec<Ride>,
    capacity: Option<usize>,
}

impl RideLedger {
    pub fn new(id_base: u64, capacity: Option<usize>) -> Self {
        Self {
            ids: IdSequence::starting_at(id_base),
            rides: Vec::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.rides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rides.is_empty()
    }

    /// Fails when the ledger is at its bound or out of ride ids; nothing is
    /// recorded in that case.
    pub fn ensure_room(&self) -> Result<(), CapacityExceeded> {
        match self.capacity {
            Some(limit) if self.rides.len() >= limit => Err(CapacityExceeded {
                kind: CapacityKind::Rides,
                limit,
            }),
            _ => self.ids.ensure_available(),
        }
    }

    /// Append a new ongoing ride.
    pub fn open(
        &mut self,
        rider: RiderId,
        driver: DriverId,
        pickup_distance: f64,
    ) -> Result<RideId, CapacityExceeded> {
        self.ensure_room()?;
        let id = RideId(self.ids.advance()?);
        self.rides.push(Ride {
            id,
            rider,
            driver,
            pickup_distance,
            status: RideStatus::Ongoing,
        });
        Ok(id)
    }

    /// First ongoing ride for `driver` in ledger order.
    pub fn ongoing_for(&self, driver: DriverId) -> Option<&Ride> {
        self.rides
            .iter()
            .find(|ride| ride.driver == driver && ride.status == RideStatus::Ongoing)
    }

    /// Move the first ongoing ride of `driver` to completed and return it.
    pub fn complete_for(&mut self, driver: DriverId) -> Option<&Ride> {
        let ride = self
            .rides
            .iter_mut()
            .find(|ride| ride.driver == driver && ride.status == RideStatus::Ongoing)?;
        ride.status = RideStatus::Completed;
        Some(&*ride)
    }

    pub fn get(&self, id: RideId) -> Option<&Ride> {
        self.rides
            .binary_search_by_key(&id, |ride| ride.id)
            .ok()
            .map(|index| &self.rides[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ride> {
        self.rides.iter()
    }
}
