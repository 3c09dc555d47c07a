use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::dispatcher::Dispatcher;
use crate::ecs::{Driver, Rider};
use crate::monitor::{ActivityKind, ActorKind, Monitor};

/// A driver asks for a rider and drives to the pickup if one is waiting.
pub fn driver_request_system(
    event: Res<CurrentEvent>,
    mut clock: ResMut<SimulationClock>,
    mut dispatcher: ResMut<Dispatcher>,
    mut monitor: ResMut<Monitor>,
    riders: Query<&Rider>,
    mut drivers: Query<&mut Driver>,
) {
    if event.0.kind != EventKind::DriverRequest {
        return;
    }
    let EventSubject::Driver(driver_entity) = event.0.subject else {
        return;
    };
    let Ok(mut driver) = drivers.get_mut(driver_entity) else {
        return;
    };

    let now = event.0.timestamp;
    monitor.notify(now, ActorKind::Driver, ActivityKind::Request, &driver.id, driver.location);

    let Some(rider_entity) = dispatcher.request_rider(driver_entity, &driver) else {
        log::debug!("t={now} driver {} waiting for a rider", driver.id);
        return;
    };
    let Ok(rider) = riders.get(rider_entity) else {
        return;
    };

    let travel_time = driver.start_drive(rider.origin);
    log::debug!(
        "t={now} driver {} matched with rider {}, pickup in {travel_time}",
        driver.id,
        rider.id
    );
    clock.schedule_in(
        travel_time,
        EventKind::Pickup,
        EventSubject::Trip {
            rider: rider_entity,
            driver: driver_entity,
        },
    );
}
