use bevy_ecs::prelude::Entity;

use super::algorithm::MatchingAlgorithm;
use super::types::DriverCandidate;
use crate::geo::Location;

/// First-come-first-served matching: the driver that has waited longest gets
/// the rider, regardless of distance.
///
/// Useful as a baseline against [`super::NearestDriver`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstAvailable;

impl MatchingAlgorithm for FirstAvailable {
    fn find_match(&self, _pickup: Location, candidates: &[DriverCandidate]) -> Option<Entity> {
        candidates.first().map(|candidate| candidate.entity)
    }
}
