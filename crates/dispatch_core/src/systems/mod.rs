//! Exclusive systems: each operation runs to completion against the world.

pub mod dispatch;
pub mod ride_completed;
