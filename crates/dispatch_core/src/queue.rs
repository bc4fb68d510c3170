//! Rider queue: pending ride requests served strictly in arrival order.

use std::collections::VecDeque;

use bevy_ecs::prelude::{Resource, World};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::DispatchConfig;
use crate::error::{CapacityExceeded, CapacityKind};
use crate::geometry::Point;
use crate::ids::{IdSequence, RiderId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rider {
    pub id: RiderId,
    pub name: String,
    pub pickup: Point,
    pub dropoff: Point,
}

#[derive(Debug, Default, Resource)]
pub struct RiderQueue {
    ids: IdSequence,
    waiting: VecDeque<Rider>,
    capacity: Option<usize>,
}

impl RiderQueue {
    pub fn new(id_base: u64, capacity: Option<usize>) -> Self {
        Self {
            ids: IdSequence::starting_at(id_base),
            waiting: VecDeque::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    /// Reserve the id for a rider about to be enqueued.
    pub(crate) fn next_id(&mut self) -> Result<RiderId, CapacityExceeded> {
        self.ids.advance().map(RiderId)
    }

    pub fn enqueue(&mut self, rider: Rider) -> Result<(), CapacityExceeded> {
        self.check_bound()?;
        self.waiting.push_back(rider);
        Ok(())
    }

    pub fn peek_front(&self) -> Option<&Rider> {
        self.waiting.front()
    }

    pub fn dequeue_front(&mut self) -> Option<Rider> {
        self.waiting.pop_front()
    }

    /// Waiting riders, head first.
    pub fn iter(&self) -> impl Iterator<Item = &Rider> {
        self.waiting.iter()
    }

    fn check_bound(&self) -> Result<(), CapacityExceeded> {
        match self.capacity {
            Some(limit) if self.waiting.len() >= limit => Err(CapacityExceeded {
                kind: CapacityKind::WaitingRiders,
                limit,
            }),
            _ => Ok(()),
        }
    }
}

/// Create a rider request and append it to the queue tail.
///
/// No id is consumed when the request is rejected.
pub fn request_ride(
    world: &mut World,
    name: impl Into<String>,
    pickup: Point,
    dropoff: Point,
) -> Result<RiderId, CapacityExceeded> {
    let mut queue = world.resource_mut::<RiderQueue>();
    let id = queue
        .check_bound()
        .and_then(|()| queue.next_id())
        .inspect_err(|err| warn!(%err, "ride request rejected"))?;
    let rider = Rider {
        id,
        name: name.into(),
        pickup,
        dropoff,
    };
    info!(rider = %id, name = %rider.name, "ride requested");
    queue.waiting.push_back(rider);
    Ok(id)
}

pub fn waiting_riders(world: &World) -> Vec<Rider> {
    world.resource::<RiderQueue>().iter().cloned().collect()
}

/// Queue sized from the configured id base and bound.
pub fn queue_from_config(config: &DispatchConfig) -> RiderQueue {
    RiderQueue::new(config.id_base, config.max_waiting_riders)
}
