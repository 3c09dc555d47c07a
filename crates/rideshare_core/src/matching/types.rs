use std::num::NonZeroU32;

use bevy_ecs::prelude::Entity;

use crate::ecs::Driver;
use crate::geo::{manhattan_distance, travel_time, Location};

/// A waiting driver as seen by the matcher: where it idles and how fast it drives.
///
/// Waiting drivers are idle with no destination, so this view stays valid for
/// as long as the driver sits on the waitlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverCandidate {
    pub entity: Entity,
    pub location: Location,
    pub speed: NonZeroU32,
}

impl DriverCandidate {
    pub fn new(entity: Entity, driver: &Driver) -> Self {
        Self {
            entity,
            location: driver.location,
            speed: driver.speed,
        }
    }

    /// Ticks for this driver to reach `pickup`.
    pub fn travel_time(&self, pickup: Location) -> u64 {
        travel_time(manhattan_distance(self.location, pickup), self.speed)
    }
}
