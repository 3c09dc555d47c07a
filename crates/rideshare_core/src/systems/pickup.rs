use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::ecs::{Driver, Rider, RiderStatus};
use crate::monitor::{ActivityKind, ActorKind, Monitor};

/// The driver reaches the rider's origin.
///
/// If the rider cancelled while the driver was on the way, nobody is picked up
/// and the driver asks for a new rider right away.
pub fn pickup_system(
    event: Res<CurrentEvent>,
    mut clock: ResMut<SimulationClock>,
    mut monitor: ResMut<Monitor>,
    mut riders: Query<&mut Rider>,
    mut drivers: Query<&mut Driver>,
) {
    if event.0.kind != EventKind::Pickup {
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
    driver.end_drive();

    if rider.status == RiderStatus::Cancelled {
        log::debug!(
            "t={now} driver {} arrived for cancelled rider {}",
            driver.id,
            rider.id
        );
        clock.schedule_at(now, EventKind::DriverRequest, EventSubject::Driver(driver_entity));
        return;
    }

    monitor.notify(now, ActorKind::Driver, ActivityKind::Pickup, &driver.id, driver.location);
    monitor.notify(now, ActorKind::Rider, ActivityKind::Pickup, &rider.id, rider.origin);
    rider.status = RiderStatus::Satisfied;

    let ride_time = driver.start_ride(&rider);
    log::debug!(
        "t={now} driver {} picked up rider {}, dropoff in {ride_time}",
        driver.id,
        rider.id
    );
    clock.schedule_in(
        ride_time,
        EventKind::Dropoff,
        EventSubject::Trip {
            rider: rider_entity,
            driver: driver_entity,
        },
    );
}
