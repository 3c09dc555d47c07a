#![allow(dead_code)]

use std::num::NonZeroU32;

use bevy_ecs::prelude::{Entity, World};
use rideshare_core::clock::{EventKind, EventSubject, SimulationClock};
use rideshare_core::dispatcher::Dispatcher;
use rideshare_core::ecs::{Driver, Rider};
use rideshare_core::geo::Location;
use rideshare_core::monitor::Monitor;
use rideshare_core::runner::SimulationEndTime;
use rideshare_core::scenario::{create_matching, MatchingAlgorithmType};

/// Builds a world with every resource the event systems need.
#[derive(Debug, Default)]
pub struct TestWorldBuilder {
    matching: MatchingAlgorithmType,
    end_time: Option<u64>,
}

impl TestWorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_matching(mut self, matching: MatchingAlgorithmType) -> Self {
        self.matching = matching;
        self
    }

    pub fn with_end_time(mut self, end_time: u64) -> Self {
        self.end_time = Some(end_time);
        self
    }

    pub fn build(self) -> World {
        let mut world = World::new();
        world.insert_resource(SimulationClock::default());
        world.insert_resource(Dispatcher::new(create_matching(self.matching)));
        world.insert_resource(Monitor::default());
        if let Some(end_time) = self.end_time {
            world.insert_resource(SimulationEndTime(end_time));
        }
        world
    }
}

pub fn loc(row: i64, column: i64) -> Location {
    Location::new(row, column)
}

/// Spawn a driver and schedule its first request at `at`.
pub fn driver_requests(
    world: &mut World,
    at: u64,
    id: &str,
    location: Location,
    speed: u32,
) -> Entity {
    let speed = NonZeroU32::new(speed).expect("non-zero speed");
    let entity = world.spawn(Driver::new(id, location, speed)).id();
    world.resource_mut::<SimulationClock>().schedule_at(
        at,
        EventKind::DriverRequest,
        EventSubject::Driver(entity),
    );
    entity
}

/// Spawn a rider and schedule its request at `at`.
pub fn rider_requests(
    world: &mut World,
    at: u64,
    id: &str,
    origin: Location,
    destination: Location,
    patience: u64,
) -> Entity {
    let entity = world.spawn(Rider::new(id, patience, origin, destination)).id();
    world.resource_mut::<SimulationClock>().schedule_at(
        at,
        EventKind::RiderRequest,
        EventSubject::Rider(entity),
    );
    entity
}

pub fn rider(world: &World, entity: Entity) -> Rider {
    world.get::<Rider>(entity).expect("rider").clone()
}

pub fn driver(world: &World, entity: Entity) -> Driver {
    world.get::<Driver>(entity).expect("driver").clone()
}
