use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::dispatcher::Dispatcher;
use crate::ecs::{Driver, Rider};
use crate::monitor::{ActivityKind, ActorKind, Monitor};

/// A rider asks for a driver. A matched driver sets off towards the pickup;
/// the rider's patience timer starts either way.
pub fn rider_request_system(
    event: Res<CurrentEvent>,
    mut clock: ResMut<SimulationClock>,
    mut dispatcher: ResMut<Dispatcher>,
    mut monitor: ResMut<Monitor>,
    riders: Query<&Rider>,
    mut drivers: Query<&mut Driver>,
) {
    if event.0.kind != EventKind::RiderRequest {
        return;
    }
    let EventSubject::Rider(rider_entity) = event.0.subject else {
        return;
    };
    let Ok(rider) = riders.get(rider_entity) else {
        return;
    };
    if !rider.is_waiting() {
        return;
    }

    let now = event.0.timestamp;
    monitor.notify(now, ActorKind::Rider, ActivityKind::Request, &rider.id, rider.origin);

    if let Some(driver_entity) = dispatcher.request_driver(rider_entity, rider.origin) {
        if let Ok(mut driver) = drivers.get_mut(driver_entity) {
            let travel_time = driver.start_drive(rider.origin);
            log::debug!(
                "t={now} rider {} matched with driver {}, pickup in {travel_time}",
                rider.id,
                driver.id
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
    } else {
        log::debug!("t={now} rider {} waiting for a driver", rider.id);
    }

    clock.schedule_in(
        rider.patience,
        EventKind::Cancellation,
        EventSubject::Rider(rider_entity),
    );
}
