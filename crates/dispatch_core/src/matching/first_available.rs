use crate::queue::Rider;

use super::algorithm::MatchingAlgorithm;
use super::types::{DriverCandidate, MatchCandidate};

/// Baseline policy: the earliest-registered available driver, ignoring distance and rating.
///
/// Useful as a comparison point for [`super::NearestRatedMatching`] and in
/// tests that need a predictable pick.
#[derive(Debug, Default)]
pub struct FirstAvailableMatching;

impl MatchingAlgorithm for FirstAvailableMatching {
    fn find_match(
        &self,
        rider: &Rider,
        available_drivers: &[DriverCandidate],
    ) -> Option<MatchCandidate> {
        available_drivers
            .first()
            .map(|candidate| MatchCandidate::for_pickup(candidate, rider.pickup))
    }
}
