use crate::queue::Rider;

use super::types::{DriverCandidate, MatchCandidate};

/// Trait for policies that choose a driver for the rider at the queue head.
pub trait MatchingAlgorithm: Send + Sync {
    /// Pick a driver for `rider` among `available_drivers`.
    ///
    /// Candidates arrive in registration order and are all currently
    /// available. Returns `None` only when no candidate is acceptable.
    fn find_match(
        &self,
        rider: &Rider,
        available_drivers: &[DriverCandidate],
    ) -> Option<MatchCandidate>;
}
