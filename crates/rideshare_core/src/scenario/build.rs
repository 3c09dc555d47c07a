use std::collections::HashMap;

use bevy_ecs::prelude::{Entity, World};

use super::params::{MatchingAlgorithmType, SimulationConfig};
use super::parse::{Request, ScenarioEvent};
use crate::clock::{EventKind, EventSubject, SimulationClock};
use crate::dispatcher::Dispatcher;
use crate::ecs::{Driver, Rider};
use crate::matching::{FirstAvailable, MatchingAlgorithm, NearestDriver};
use crate::monitor::Monitor;
use crate::runner::SimulationEndTime;

pub fn create_matching(kind: MatchingAlgorithmType) -> Box<dyn MatchingAlgorithm> {
    match kind {
        MatchingAlgorithmType::Nearest => Box::new(NearestDriver),
        MatchingAlgorithmType::FirstAvailable => Box::new(FirstAvailable),
    }
}

/// Builds a world ready to run: resources inserted, one entity per driver id
/// and per rider request, and every request scheduled on the clock.
///
/// A driver id that appears on several lines maps to a single entity; the
/// later lines only schedule further requests for it.
pub fn build_world(events: &[ScenarioEvent], config: &SimulationConfig) -> World {
    let mut world = World::new();
    let mut clock = SimulationClock::default();
    let mut drivers: HashMap<&str, Entity> = HashMap::new();
    let mut riders = 0usize;

    for event in events {
        match &event.request {
            Request::Driver {
                id,
                location,
                speed,
            } => {
                let entity = *drivers
                    .entry(id.as_str())
                    .or_insert_with(|| world.spawn(Driver::new(id.as_str(), *location, *speed)).id());
                clock.schedule_at(
                    event.timestamp,
                    EventKind::DriverRequest,
                    EventSubject::Driver(entity),
                );
            }
            Request::Rider {
                id,
                origin,
                destination,
                patience,
            } => {
                let entity = world
                    .spawn(Rider::new(id.as_str(), *patience, *origin, *destination))
                    .id();
                riders += 1;
                clock.schedule_at(
                    event.timestamp,
                    EventKind::RiderRequest,
                    EventSubject::Rider(entity),
                );
            }
        }
    }

    log::info!(
        "scenario: {} drivers, {} riders, {} scheduled requests",
        drivers.len(),
        riders,
        clock.len()
    );

    world.insert_resource(clock);
    world.insert_resource(Dispatcher::new(create_matching(config.matching)));
    world.insert_resource(Monitor::default());
    if let Some(max_time) = config.max_time {
        world.insert_resource(SimulationEndTime(max_time));
    }
    world
}
