use bevy_ecs::prelude::Entity;

use super::types::DriverCandidate;
use crate::geo::Location;

/// Picks which waiting driver serves a rider.
///
/// `candidates` is the driver waitlist in join order. Implementations must be
/// deterministic: the same inputs always yield the same driver.
pub trait MatchingAlgorithm: Send + Sync {
    /// Returns the chosen driver, or `None` when no candidate is acceptable.
    fn find_match(&self, pickup: Location, candidates: &[DriverCandidate]) -> Option<Entity>;
}
