//! Ride dispatch engine: driver registry, rider queue, nearest-driver
//! matching and the ride ledger.

pub mod config;
pub mod ecs;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod ledger;
pub mod matching;
pub mod queue;
pub mod registry;
pub mod service;
pub mod systems;
pub mod telemetry;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use config::DispatchConfig;
pub use error::{CapacityExceeded, CapacityKind, CompletionError, DispatchError};
pub use geometry::Point;
pub use ids::{DriverId, RideId, RiderId};
pub use ledger::{Ride, RideStatus};
pub use queue::Rider;
pub use registry::DriverRecord;
pub use service::DispatchService;
pub use systems::dispatch::RideAssignment;
pub use telemetry::DispatchStats;
