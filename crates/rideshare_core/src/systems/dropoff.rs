use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::ecs::{Driver, Rider, RiderStatus};
use crate::monitor::{ActivityKind, ActorKind, Monitor};

/// The driver reaches the rider's destination and becomes available again.
pub fn dropoff_system(
    event: Res<CurrentEvent>,
    mut clock: ResMut<SimulationClock>,
    mut monitor: ResMut<Monitor>,
    mut riders: Query<&mut Rider>,
    mut drivers: Query<&mut Driver>,
) {
    if event.0.kind != EventKind::Dropoff {
        return;
    }
    let EventSubject::Trip {
        rider: rider_entity,
        driver: driver_entity,
    } = event.0.subject
    else {
        return;
    };
    let (Ok(mut rider), Ok(mut driver)) =
        (riders.get_mut(rider_entity), drivers.get_mut(driver_entity))
    else {
        return;
    };

    let now = event.0.timestamp;
    driver.end_ride();
    monitor.notify(now, ActorKind::Driver, ActivityKind::Dropoff, &driver.id, driver.location);
    monitor.notify(now, ActorKind::Rider, ActivityKind::Dropoff, &rider.id, rider.destination);
    rider.status = RiderStatus::Satisfied;
    log::debug!("t={now} driver {} dropped off rider {}", driver.id, rider.id);

    clock.schedule_at(now, EventKind::DriverRequest, EventSubject::Driver(driver_entity));
}
