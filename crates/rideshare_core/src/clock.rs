use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::{Entity, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    RiderRequest,
    DriverRequest,
    Cancellation,
    Pickup,
    Dropoff,
}

/// Entities an event acts on. Events hold ids only; the world owns the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSubject {
    Rider(Entity),
    Driver(Entity),
    Trip { rider: Entity, driver: Entity },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub timestamp: u64,
    /// Scheduling order; breaks ties between events with equal timestamps.
    pub seq: u64,
    pub kind: EventKind,
    pub subject: EventSubject,
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by (timestamp, seq).
        other
            .timestamp
            .cmp(&self.timestamp)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The event being executed by the current schedule run.
#[derive(Debug, Clone, Copy, Resource)]
pub struct CurrentEvent(pub Event);

/// Pending events plus the simulated time of the last popped one.
#[derive(Debug, Default, Resource)]
pub struct SimulationClock {
    now: u64,
    next_seq: u64,
    events: BinaryHeap<Event>,
}

impl SimulationClock {
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn schedule_at(&mut self, timestamp: u64, kind: EventKind, subject: EventSubject) {
        debug_assert!(
            timestamp >= self.now,
            "event timestamp must be >= current time"
        );
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(Event {
            timestamp: timestamp.max(self.now),
            seq,
            kind,
            subject,
        });
    }

    pub fn schedule_in(&mut self, delay: u64, kind: EventKind, subject: EventSubject) {
        self.schedule_at(self.now.saturating_add(delay), kind, subject);
    }

    pub fn pop_next(&mut self) -> Option<Event> {
        let event = self.events.pop()?;
        self.now = event.timestamp;
        Some(event)
    }

    pub fn next_event_time(&self) -> Option<u64> {
        self.events.peek().map(|event| event.timestamp)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rider(index: u32) -> EventSubject {
        EventSubject::Rider(Entity::from_raw(index))
    }

    #[test]
    fn clock_pops_events_in_time_order() {
        let mut clock = SimulationClock::default();
        clock.schedule_at(10, EventKind::RiderRequest, rider(1));
        clock.schedule_at(5, EventKind::RiderRequest, rider(2));
        clock.schedule_at(20, EventKind::RiderRequest, rider(3));
        assert_eq!(clock.len(), 3);
        assert_eq!(clock.next_event_time(), Some(5));

        let first = clock.pop_next().expect("first event");
        assert_eq!(first.timestamp, 5);
        assert_eq!(clock.now(), 5);

        let second = clock.pop_next().expect("second event");
        assert_eq!(second.timestamp, 10);
        assert_eq!(clock.now(), 10);

        let third = clock.pop_next().expect("third event");
        assert_eq!(third.timestamp, 20);
        assert_eq!(clock.now(), 20);

        assert!(clock.pop_next().is_none());
        assert!(clock.is_empty());
    }

    #[test]
    fn equal_timestamps_pop_in_scheduling_order() {
        let mut clock = SimulationClock::default();
        clock.schedule_at(4, EventKind::Cancellation, rider(1));
        clock.schedule_at(4, EventKind::DriverRequest, EventSubject::Driver(Entity::from_raw(9)));
        clock.schedule_at(4, EventKind::RiderRequest, rider(2));

        let kinds: Vec<_> = std::iter::from_fn(|| clock.pop_next())
            .map(|event| event.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Cancellation,
                EventKind::DriverRequest,
                EventKind::RiderRequest
            ]
        );
    }

    #[test]
    fn schedule_in_is_relative_to_now() {
        let mut clock = SimulationClock::default();
        clock.schedule_at(7, EventKind::RiderRequest, rider(1));
        clock.pop_next();
        clock.schedule_in(3, EventKind::Cancellation, rider(1));
        assert_eq!(clock.next_event_time(), Some(10));
    }
}
