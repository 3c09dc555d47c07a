//! Scenario setup: read the initial requests, configure the run and build
//! the world they execute in.

mod build;
mod params;
mod parse;

pub use build::{build_world, create_matching};
pub use params::{MatchingAlgorithmType, SimulationConfig};
pub use parse::{load_events, parse_events, Request, ScenarioError, ScenarioEvent};
