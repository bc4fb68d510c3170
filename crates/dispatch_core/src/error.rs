//! Error types surfaced by dispatch operations. All of them are recoverable.

use std::fmt;

use thiserror::Error;

use crate::ids::DriverId;

/// Which bounded store rejected an insert. `Ids` means the id sequence ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityKind {
    Drivers,
    WaitingRiders,
    Rides,
    Ids,
}

impl fmt::Display for CapacityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CapacityKind::Drivers => "driver registry",
            CapacityKind::WaitingRiders => "rider queue",
            CapacityKind::Rides => "ride ledger",
            CapacityKind::Ids => "id sequence",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} is full (capacity {limit})")]
pub struct CapacityExceeded {
    pub kind: CapacityKind,
    pub limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("No riders waiting.")]
    NoRidersWaiting,
    #[error("No drivers available.")]
    NoDriversAvailable,
    #[error(transparent)]
    CapacityExceeded(#[from] CapacityExceeded),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CompletionError {
    #[error("Unknown driver id {0}.")]
    UnknownDriverId(DriverId),
    #[error("No ongoing ride for driver {0}.")]
    NoOngoingRideForDriver(DriverId),
}
