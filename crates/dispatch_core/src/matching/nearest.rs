use tracing::debug;

use crate::config::DEFAULT_TIE_EPSILON;
use crate::queue::Rider;

use super::algorithm::MatchingAlgorithm;
use super::types::{DriverCandidate, MatchCandidate};

/// Nearest available driver to the rider's pickup, ties broken by rating.
///
/// # Algorithm Behavior
///
/// One pass over the candidates in registration order. A candidate replaces
/// the incumbent when it is closer by at least `epsilon`. When the two
/// distances differ by less than `epsilon` the candidate wins only with a
/// strictly higher rating. Otherwise the earlier candidate is kept, so equal
/// drivers resolve to the first registered.
///
/// Time complexity: O(n) in the number of available drivers.
#[derive(Debug, Clone, Copy)]
pub struct NearestRatedMatching {
    epsilon: f64,
}

impl NearestRatedMatching {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// NaN distances rank as infinitely far, so they never hold the lead.
    fn beats(&self, challenger: (f64, f64), incumbent: (f64, f64)) -> bool {
        let (distance, rating) = challenger;
        let (best_distance, best_rating) = incumbent;
        let (distance, best_distance) = (rank(distance), rank(best_distance));
        if (distance - best_distance).abs() < self.epsilon {
            rating > best_rating
        } else {
            distance < best_distance
        }
    }
}

fn rank(distance: f64) -> f64 {
    if distance.is_nan() {
        f64::INFINITY
    } else {
        distance
    }
}

impl Default for NearestRatedMatching {
    fn default() -> Self {
        Self::new(DEFAULT_TIE_EPSILON)
    }
}

impl MatchingAlgorithm for NearestRatedMatching {
    fn find_match(
        &self,
        rider: &Rider,
        available_drivers: &[DriverCandidate],
    ) -> Option<MatchCandidate> {
        let mut best: Option<(MatchCandidate, f64)> = None;
        for candidate in available_drivers {
            let scored = MatchCandidate::for_pickup(candidate, rider.pickup);
            debug!(
                rider = %rider.id,
                driver = %candidate.driver,
                distance = scored.pickup_distance,
                rating = candidate.rating,
                "scoring candidate"
            );
            let replace = match &best {
                None => true,
                Some((incumbent, incumbent_rating)) => self.beats(
                    (scored.pickup_distance, candidate.rating),
                    (incumbent.pickup_distance, *incumbent_rating),
                ),
            };
            if replace {
                best = Some((scored, candidate.rating));
            }
        }
        best.map(|(candidate, _)| candidate)
    }
}
