use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, EventSubject};
use crate::dispatcher::Dispatcher;
use crate::ecs::Rider;
use crate::monitor::{ActivityKind, ActorKind, Monitor};

/// The rider's patience ran out. Only riders still waiting for a pickup cancel.
pub fn cancellation_system(
    event: Res<CurrentEvent>,
    mut dispatcher: ResMut<Dispatcher>,
    mut monitor: ResMut<Monitor>,
    mut riders: Query<&mut Rider>,
) {
    if event.0.kind != EventKind::Cancellation {
        return;
    }
    let EventSubject::Rider(rider_entity) = event.0.subject else {
        return;
    };
    let Ok(mut rider) = riders.get_mut(rider_entity) else {
        return;
    };
    if !rider.is_waiting() {
        return;
    }

    let now = event.0.timestamp;
    dispatcher.cancel_ride(rider_entity, &mut rider);
    monitor.notify(now, ActorKind::Rider, ActivityKind::Cancel, &rider.id, rider.origin);
    log::debug!("t={now} rider {} cancelled", rider.id);
}
