use std::num::NonZeroU32;

use bevy_ecs::prelude::Component;
use serde::Serialize;

use crate::geo::{manhattan_distance, travel_time, Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiderStatus {
    Waiting,
    Cancelled,
    Satisfied,
}

/// A rider requesting a trip from `origin` to `destination`.
///
/// `patience` is the number of ticks the rider waits for a pickup before the
/// request is cancelled automatically.
#[derive(Debug, Clone, PartialEq, Eq, Component)]
pub struct Rider {
    pub id: String,
    pub patience: u64,
    pub origin: Location,
    pub destination: Location,
    pub status: RiderStatus,
}

impl Rider {
    pub fn new(id: impl Into<String>, patience: u64, origin: Location, destination: Location) -> Self {
        Self {
            id: id.into(),
            patience,
            origin,
            destination,
            status: RiderStatus::Waiting,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.status == RiderStatus::Waiting
    }
}

/// A driver of the fleet.
///
/// `destination` is `Some` while the driver is en route, either to a pickup
/// or to a dropoff. Arrival moves the destination into `location`.
#[derive(Debug, Clone, PartialEq, Eq, Component)]
pub struct Driver {
    pub id: String,
    pub location: Location,
    pub destination: Option<Location>,
    pub is_idle: bool,
    pub speed: NonZeroU32,
}

impl Driver {
    pub fn new(id: impl Into<String>, location: Location, speed: NonZeroU32) -> Self {
        Self {
            id: id.into(),
            location,
            destination: None,
            is_idle: true,
            speed,
        }
    }

    /// Ticks needed to drive from the current location to `destination`.
    pub fn travel_time(&self, destination: Location) -> u64 {
        travel_time(manhattan_distance(self.location, destination), self.speed)
    }

    /// Start driving to `location` (usually a pickup). Returns the drive time.
    pub fn start_drive(&mut self, location: Location) -> u64 {
        self.is_idle = false;
        self.destination = Some(location);
        self.travel_time(location)
    }

    /// Arrive at the drive destination. No-op on the location if none is set.
    pub fn end_drive(&mut self) {
        self.is_idle = true;
        if let Some(destination) = self.destination.take() {
            self.location = destination;
        }
    }

    /// Pick up `rider` at its origin and head for its destination.
    /// Returns the ride time.
    pub fn start_ride(&mut self, rider: &Rider) -> u64 {
        self.is_idle = false;
        self.location = rider.origin;
        self.destination = Some(rider.destination);
        self.travel_time(rider.destination)
    }

    /// Arrive at the rider's destination. Only takes effect while a ride is
    /// in progress.
    pub fn end_ride(&mut self) {
        if self.is_idle {
            return;
        }
        if let Some(destination) = self.destination.take() {
            self.location = destination;
            self.is_idle = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver_at(row: i64, column: i64, speed: u32) -> Driver {
        Driver::new(
            "Amaranth",
            Location::new(row, column),
            NonZeroU32::new(speed).expect("speed"),
        )
    }

    #[test]
    fn new_rider_is_waiting() {
        let rider = Rider::new("Bain", 5, Location::new(1, 2), Location::new(3, 4));
        assert!(rider.is_waiting());
    }

    #[test]
    fn drive_then_arrive_moves_driver() {
        let mut driver = driver_at(0, 0, 1);
        let time = driver.start_drive(Location::new(0, 3));
        assert_eq!(time, 3);
        assert!(!driver.is_idle);
        assert_eq!(driver.destination, Some(Location::new(0, 3)));

        driver.end_drive();
        assert!(driver.is_idle);
        assert_eq!(driver.location, Location::new(0, 3));
        assert_eq!(driver.destination, None);
    }

    #[test]
    fn end_drive_without_destination_keeps_location() {
        let mut driver = driver_at(2, 2, 1);
        driver.end_drive();
        assert!(driver.is_idle);
        assert_eq!(driver.location, Location::new(2, 2));
    }

    #[test]
    fn ride_starts_at_rider_origin() {
        let mut driver = driver_at(9, 9, 2);
        let rider = Rider::new("Cerise", 10, Location::new(0, 3), Location::new(5, 3));
        let time = driver.start_ride(&rider);
        assert_eq!(time, 2);
        assert_eq!(driver.location, Location::new(0, 3));
        assert_eq!(driver.destination, Some(Location::new(5, 3)));

        driver.end_ride();
        assert!(driver.is_idle);
        assert_eq!(driver.location, Location::new(5, 3));
        assert_eq!(driver.destination, None);
    }

    #[test]
    fn end_ride_is_ignored_for_idle_driver() {
        let mut driver = driver_at(1, 1, 1);
        driver.destination = Some(Location::new(4, 4));
        driver.end_ride();
        assert_eq!(driver.location, Location::new(1, 1));
        assert_eq!(driver.destination, Some(Location::new(4, 4)));
    }
}
