use bevy_ecs::prelude::Entity;

use super::algorithm::MatchingAlgorithm;
use super::types::DriverCandidate;
use crate::geo::Location;

/// Nearest-driver matching: the candidate with the smallest travel time to the
/// pickup wins.
///
/// Ties go to the candidate that joined the waitlist first. This is a
/// brute-force scan, O(n) in the number of waiting drivers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NearestDriver;

impl MatchingAlgorithm for NearestDriver {
    fn find_match(&self, pickup: Location, candidates: &[DriverCandidate]) -> Option<Entity> {
        let mut best: Option<(u64, Entity)> = None;
        for candidate in candidates {
            let time = candidate.travel_time(pickup);
            // Strict comparison keeps the earliest candidate on ties.
            if best.map_or(true, |(best_time, _)| time < best_time) {
                best = Some((time, candidate.entity));
            }
        }
        best.map(|(_, entity)| entity)
    }
}
