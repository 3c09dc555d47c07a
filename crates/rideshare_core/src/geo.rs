//! Grid geometry: locations on an integer street grid and the Manhattan metric.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An intersection on the street grid.
///
/// `row` counts blocks from the bottom edge of the grid, `column` counts
/// blocks from the left edge. Serialized in text form as `"row,column"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub row: i64,
    pub column: i64,
}

impl Location {
    pub const fn new(row: i64, column: i64) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationParseError {
    #[error("location `{0}` is not in `row,column` form")]
    Shape(String),
    #[error("location `{input}` has a non-integer coordinate `{part}`")]
    Coordinate { input: String, part: String },
}

impl FromStr for Location {
    type Err = LocationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, column) = s
            .split_once(',')
            .ok_or_else(|| LocationParseError::Shape(s.to_string()))?;
        let parse = |part: &str| {
            part.parse::<i64>()
                .map_err(|_| LocationParseError::Coordinate {
                    input: s.to_string(),
                    part: part.to_string(),
                })
        };
        Ok(Location::new(parse(row)?, parse(column)?))
    }
}

/// Number of blocks between two locations when travelling along the grid.
///
/// Saturates at `u64::MAX` for locations at opposite ends of the `i64` range.
pub fn manhattan_distance(origin: Location, destination: Location) -> u64 {
    origin
        .row
        .abs_diff(destination.row)
        .saturating_add(origin.column.abs_diff(destination.column))
}

/// Ticks needed to cover `distance` blocks at `speed` blocks per tick.
///
/// Rounds to the nearest integer with ties going to the even neighbour, so
/// `5 / 2` yields 2 and `3 / 2` yields 2.
pub fn travel_time(distance: u64, speed: NonZeroU32) -> u64 {
    let speed = u64::from(speed.get());
    let quotient = distance / speed;
    let remainder = distance % speed;
    match (2 * remainder).cmp(&speed) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => quotient + (quotient & 1),
    }
}
