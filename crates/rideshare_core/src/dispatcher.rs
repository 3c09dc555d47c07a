//! Dispatcher: waitlists for riders and drivers plus the matching policy.
//!
//! A matched rider or driver leaves its waitlist inside the same call that
//! matched it, so no entity can be handed out twice.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use bevy_ecs::prelude::{Entity, Resource};

use crate::ecs::{Driver, Rider, RiderStatus};
use crate::geo::Location;
use crate::matching::{DriverCandidate, MatchingAlgorithm, NearestDriver};

#[derive(Resource)]
pub struct Dispatcher {
    algorithm: Box<dyn MatchingAlgorithm>,
    driver_fleet: HashSet<Entity>,
    waiting_drivers: Vec<DriverCandidate>,
    waiting_riders: VecDeque<Entity>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Box::new(NearestDriver))
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("driver_fleet", &self.driver_fleet)
            .field("waiting_drivers", &self.waiting_drivers)
            .field("waiting_riders", &self.waiting_riders)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} drivers waiting, {} riders waiting and {} drivers registered",
            self.waiting_drivers.len(),
            self.waiting_riders.len(),
            self.driver_fleet.len()
        )
    }
}

impl Dispatcher {
    pub fn new(algorithm: Box<dyn MatchingAlgorithm>) -> Self {
        Self {
            algorithm,
            driver_fleet: HashSet::new(),
            waiting_drivers: Vec::new(),
            waiting_riders: VecDeque::new(),
        }
    }

    /// Find a driver for the rider at `pickup`.
    ///
    /// The matching algorithm picks among the waiting drivers and the chosen
    /// one leaves the driver waitlist. When no driver waits, or the algorithm
    /// accepts none of them, the rider joins the tail of the rider waitlist
    /// and `None` is returned.
    pub fn request_driver(&mut self, rider: Entity, pickup: Location) -> Option<Entity> {
        let index = self
            .algorithm
            .find_match(pickup, &self.waiting_drivers)
            .and_then(|chosen| {
                self.waiting_drivers
                    .iter()
                    .position(|candidate| candidate.entity == chosen)
            });
        let Some(index) = index else {
            if !self.waiting_riders.contains(&rider) {
                self.waiting_riders.push_back(rider);
            }
            return None;
        };
        let chosen = self.waiting_drivers.remove(index).entity;
        log::trace!("matched rider {rider:?} to waiting driver {chosen:?}");
        Some(chosen)
    }

    /// Find a rider for the driver.
    ///
    /// Registers the driver with the fleet on first contact. A busy driver
    /// gets nothing and does not wait. An idle driver takes the rider that has
    /// waited longest, or joins the driver waitlist when no rider waits.
    pub fn request_rider(&mut self, entity: Entity, driver: &Driver) -> Option<Entity> {
        self.driver_fleet.insert(entity);
        if !driver.is_idle {
            return None;
        }
        match self.waiting_riders.pop_front() {
            Some(rider) => {
                log::trace!("matched driver {entity:?} to waiting rider {rider:?}");
                Some(rider)
            }
            None => {
                if !self.is_driver_waiting(entity) {
                    self.waiting_drivers.push(DriverCandidate::new(entity, driver));
                }
                None
            }
        }
    }

    /// Cancel the rider's request. Safe to call more than once.
    pub fn cancel_ride(&mut self, entity: Entity, rider: &mut Rider) {
        rider.status = RiderStatus::Cancelled;
        self.waiting_riders.retain(|waiting| *waiting != entity);
    }

    pub fn is_registered(&self, driver: Entity) -> bool {
        self.driver_fleet.contains(&driver)
    }

    pub fn fleet_size(&self) -> usize {
        self.driver_fleet.len()
    }

    pub fn is_driver_waiting(&self, driver: Entity) -> bool {
        self.waiting_drivers
            .iter()
            .any(|candidate| candidate.entity == driver)
    }

    pub fn is_rider_waiting(&self, rider: Entity) -> bool {
        self.waiting_riders.contains(&rider)
    }

    /// Waiting drivers in join order.
    pub fn waiting_drivers(&self) -> impl Iterator<Item = Entity> + '_ {
        self.waiting_drivers.iter().map(|candidate| candidate.entity)
    }

    /// Waiting riders in join order.
    pub fn waiting_riders(&self) -> impl Iterator<Item = Entity> + '_ {
        self.waiting_riders.iter().copied()
    }
}
