//! Simulation runner: advances the clock and routes events into the ECS.
//!
//! Each step pops the next event from [SimulationClock], inserts it as
//! [CurrentEvent], then runs the schedule. Exactly one event system runs per
//! step, chosen by the event kind.

use bevy_ecs::prelude::{Res, Resource, Schedule, World};
use bevy_ecs::schedule::IntoSystemConfigs;

use crate::clock::{CurrentEvent, Event, EventKind, SimulationClock};
use crate::systems::{
    cancellation::cancellation_system, driver_request::driver_request_system,
    dropoff::dropoff_system, pickup::pickup_system, rider_request::rider_request_system,
};

/// Last simulated tick that may still execute. Events scheduled after it are
/// left on the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Resource)]
pub struct SimulationEndTime(pub u64);

/// Outcome of [run_simulation].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationSummary {
    pub steps: usize,
    pub final_time: u64,
    pub pending_events: usize,
}

fn current_event_is(kind: EventKind) -> impl FnMut(Option<Res<CurrentEvent>>) -> bool + Clone {
    move |event: Option<Res<CurrentEvent>>| event.map(|e| e.0.kind == kind).unwrap_or(false)
}

/// Builds the simulation schedule: one system per event kind, each gated on
/// the kind of the current event.
pub fn simulation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((
        rider_request_system.run_if(current_event_is(EventKind::RiderRequest)),
        driver_request_system.run_if(current_event_is(EventKind::DriverRequest)),
        cancellation_system.run_if(current_event_is(EventKind::Cancellation)),
        pickup_system.run_if(current_event_is(EventKind::Pickup)),
        dropoff_system.run_if(current_event_is(EventKind::Dropoff)),
    ));
    schedule
}

fn pop_within_end_time(world: &mut World) -> Option<Event> {
    let stop_after = world.get_resource::<SimulationEndTime>().map(|end| end.0);
    let mut clock = world.get_resource_mut::<SimulationClock>()?;
    let next = clock.next_event_time()?;
    if stop_after.is_some_and(|end| next > end) {
        return None;
    }
    clock.pop_next()
}

/// Runs one simulation step. Returns `false` without doing anything when the
/// clock is empty or the next event lies past [SimulationEndTime].
pub fn run_next_event(world: &mut World, schedule: &mut Schedule) -> bool {
    run_next_event_with_hook(world, schedule, |_, _| {})
}

/// Runs one simulation step and invokes `hook` after the schedule completes.
pub fn run_next_event_with_hook<F>(world: &mut World, schedule: &mut Schedule, mut hook: F) -> bool
where
    F: FnMut(&World, &Event),
{
    let Some(event) = pop_within_end_time(world) else {
        return false;
    };
    log::debug!("t={} executing {:?} for {:?}", event.timestamp, event.kind, event.subject);
    world.insert_resource(CurrentEvent(event));
    schedule.run(world);
    hook(world, &event);
    true
}

/// Runs simulation steps until the event queue is empty or `max_steps` is reached.
/// Returns the number of steps executed.
pub fn run_until_empty(world: &mut World, schedule: &mut Schedule, max_steps: usize) -> usize {
    let mut steps = 0;
    while steps < max_steps && run_next_event(world, schedule) {
        steps += 1;
    }
    steps
}

/// Drains the event queue (up to [SimulationEndTime], if set) with a fresh schedule.
pub fn run_simulation(world: &mut World) -> SimulationSummary {
    let mut schedule = simulation_schedule();
    let steps = run_until_empty(world, &mut schedule, usize::MAX);
    let clock = world.resource::<SimulationClock>();
    let summary = SimulationSummary {
        steps,
        final_time: clock.now(),
        pending_events: clock.len(),
    };
    log::info!(
        "simulation finished after {} events at t={} ({} pending)",
        summary.steps,
        summary.final_time,
        summary.pending_events
    );
    summary
}
