//! Monitor: append-only log of rider and driver activities, with the
//! aggregate statistics reported at the end of a run.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::io;

use bevy_ecs::prelude::Resource;
use serde::Serialize;

use crate::geo::{manhattan_distance, Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    Rider,
    Driver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Request,
    Cancel,
    Pickup,
    Dropoff,
}

/// One notification from the event systems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub time: u64,
    pub actor: ActorKind,
    pub kind: ActivityKind,
    pub id: String,
    pub location: Location,
}

#[derive(Serialize)]
struct ActivityRow<'a> {
    time: u64,
    actor: ActorKind,
    activity: ActivityKind,
    id: &'a str,
    row: i64,
    column: i64,
}

/// End-of-run statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimReport {
    /// Mean ticks between request and pickup, over riders that were picked up.
    pub rider_wait_time: f64,
    /// Mean blocks driven per driver.
    pub driver_total_distance: f64,
    /// Mean blocks driven with a rider on board, per driver.
    pub driver_ride_distance: f64,
    pub riders_requested: usize,
    pub riders_satisfied: usize,
    pub riders_cancelled: usize,
    pub drivers_seen: usize,
}

#[derive(Debug, Default, Resource)]
pub struct Monitor {
    activities: Vec<Activity>,
}

impl Monitor {
    pub fn notify(
        &mut self,
        time: u64,
        actor: ActorKind,
        kind: ActivityKind,
        id: &str,
        location: Location,
    ) {
        log::trace!("t={time} {actor:?} {id} {kind:?} at {location}");
        self.activities.push(Activity {
            time,
            actor,
            kind,
            id: id.to_string(),
            location,
        });
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Activities of one rider or driver, in notification order.
    pub fn activities_for<'a>(
        &'a self,
        actor: ActorKind,
        id: &'a str,
    ) -> impl Iterator<Item = &'a Activity> + 'a {
        self.activities
            .iter()
            .filter(move |activity| activity.actor == actor && activity.id == id)
    }

    fn by_actor(&self, actor: ActorKind) -> BTreeMap<&str, Vec<&Activity>> {
        let mut grouped: BTreeMap<&str, Vec<&Activity>> = BTreeMap::new();
        for activity in self.activities.iter().filter(|a| a.actor == actor) {
            grouped.entry(activity.id.as_str()).or_default().push(activity);
        }
        grouped
    }

    /// Aggregates the log. Every rider `Request` counts as one ride request;
    /// when several requests share a rider id, pickups and cancellations are
    /// paired with the oldest open request of that id.
    pub fn report(&self) -> SimReport {
        let drivers = self.by_actor(ActorKind::Driver);

        let mut open_requests: HashMap<&str, VecDeque<u64>> = HashMap::new();
        let mut requested = 0usize;
        let mut wait_total = 0u64;
        let mut satisfied = 0usize;
        let mut cancelled = 0usize;
        for activity in self.activities.iter().filter(|a| a.actor == ActorKind::Rider) {
            let pending = open_requests.entry(activity.id.as_str()).or_default();
            match activity.kind {
                ActivityKind::Request => {
                    requested += 1;
                    pending.push_back(activity.time);
                }
                ActivityKind::Pickup => {
                    if let Some(requested_at) = pending.pop_front() {
                        wait_total =
                            wait_total.saturating_add(activity.time.saturating_sub(requested_at));
                        satisfied += 1;
                    }
                }
                ActivityKind::Cancel => {
                    if pending.pop_front().is_some() {
                        cancelled += 1;
                    }
                }
                ActivityKind::Dropoff => {}
            }
        }

        let mut total_distance = 0u64;
        let mut ride_distance = 0u64;
        for history in drivers.values() {
            for pair in history.windows(2) {
                let distance = manhattan_distance(pair[0].location, pair[1].location);
                total_distance = total_distance.saturating_add(distance);
                if pair[0].kind == ActivityKind::Pickup {
                    ride_distance = ride_distance.saturating_add(distance);
                }
            }
        }

        SimReport {
            rider_wait_time: mean(wait_total, satisfied),
            driver_total_distance: mean(total_distance, drivers.len()),
            driver_ride_distance: mean(ride_distance, drivers.len()),
            riders_requested: requested,
            riders_satisfied: satisfied,
            riders_cancelled: cancelled,
            drivers_seen: drivers.len(),
        }
    }

    /// Write the activity log as CSV with a header row.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        for activity in &self.activities {
            wtr.serialize(ActivityRow {
                time: activity.time,
                actor: activity.actor,
                activity: activity.kind,
                id: &activity.id,
                row: activity.location.row,
                column: activity.location.column,
            })?;
        }
        wtr.flush()?;
        Ok(())
    }
}

fn mean(total: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}
