use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::geo::{Location, LocationParseError};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("unable to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("line {line}: {kind} expects {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        kind: String,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: unknown event type `{kind}`")]
    UnknownEvent { line: usize, kind: String },
    #[error("line {line}: invalid {field} `{value}`")]
    Integer {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("line {line}: {source}")]
    Location {
        line: usize,
        source: LocationParseError,
    },
    #[error("line {line}: driver {id} has zero speed")]
    ZeroSpeed { line: usize, id: String },
}

/// A request read from an event file, not yet attached to the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Driver {
        id: String,
        location: Location,
        speed: NonZeroU32,
    },
    Rider {
        id: String,
        origin: Location,
        destination: Location,
        patience: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioEvent {
    pub timestamp: u64,
    pub request: Request,
}

fn number<T: FromStr>(line: usize, field: &'static str, value: &str) -> Result<T, ScenarioError> {
    value.parse().map_err(|_| ScenarioError::Integer {
        line,
        field,
        value: value.to_string(),
    })
}

fn location(line: usize, value: &str) -> Result<Location, ScenarioError> {
    value
        .parse()
        .map_err(|source| ScenarioError::Location { line, source })
}

fn expect_fields(line: usize, tokens: &[&str], expected: usize) -> Result<(), ScenarioError> {
    if tokens.len() == expected {
        Ok(())
    } else {
        Err(ScenarioError::FieldCount {
            line,
            kind: tokens[1].to_string(),
            expected,
            found: tokens.len(),
        })
    }
}

fn parse_line(line: usize, text: &str) -> Result<ScenarioEvent, ScenarioError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(ScenarioError::FieldCount {
            line,
            kind: "event".to_string(),
            expected: 2,
            found: tokens.len(),
        });
    }
    let timestamp = number(line, "timestamp", tokens[0])?;
    let request = match tokens[1] {
        "DriverRequest" => {
            expect_fields(line, &tokens, 5)?;
            let id = tokens[2].to_string();
            let speed: u32 = number(line, "speed", tokens[4])?;
            let speed = NonZeroU32::new(speed).ok_or_else(|| ScenarioError::ZeroSpeed {
                line,
                id: id.clone(),
            })?;
            Request::Driver {
                id,
                location: location(line, tokens[3])?,
                speed,
            }
        }
        "RiderRequest" => {
            expect_fields(line, &tokens, 6)?;
            Request::Rider {
                id: tokens[2].to_string(),
                origin: location(line, tokens[3])?,
                destination: location(line, tokens[4])?,
                patience: number(line, "patience", tokens[5])?,
            }
        }
        other => {
            return Err(ScenarioError::UnknownEvent {
                line,
                kind: other.to_string(),
            })
        }
    };
    Ok(ScenarioEvent { timestamp, request })
}

/// Parses an event file. Blank lines and lines starting with `#` are skipped.
pub fn parse_events(input: &str) -> Result<Vec<ScenarioEvent>, ScenarioError> {
    input
        .lines()
        .enumerate()
        .map(|(index, text)| (index + 1, text.trim()))
        .filter(|(_, text)| !text.is_empty() && !text.starts_with('#'))
        .map(|(line, text)| parse_line(line, text))
        .collect()
}

pub fn load_events(path: impl AsRef<Path>) -> Result<Vec<ScenarioEvent>, ScenarioError> {
    let path = path.as_ref();
    let input = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let events = parse_events(&input)?;
    log::info!("loaded {} events from {}", events.len(), path.display());
    Ok(events)
}
