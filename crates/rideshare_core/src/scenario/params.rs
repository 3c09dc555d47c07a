use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::parse::ScenarioError;

/// Type of matching algorithm the dispatcher uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingAlgorithmType {
    #[default]
    Nearest,
    FirstAvailable,
}

/// Run configuration, usually read from a JSON file. Missing fields take
/// their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Last tick that may execute; `None` runs until no events remain.
    pub max_time: Option<u64>,
    pub matching: MatchingAlgorithmType,
}

impl SimulationConfig {
    pub fn with_max_time(mut self, max_time: u64) -> Self {
        self.max_time = Some(max_time);
        self
    }

    pub fn with_matching(mut self, matching: MatchingAlgorithmType) -> Self {
        self.matching = matching;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config = SimulationConfig::from_json_str("{}").expect("config");
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.matching, MatchingAlgorithmType::Nearest);
        assert_eq!(config.max_time, None);
    }

    #[test]
    fn reads_all_fields() {
        let config =
            SimulationConfig::from_json_str(r#"{"max_time": 120, "matching": "first_available"}"#)
                .expect("config");
        assert_eq!(
            config,
            SimulationConfig::default()
                .with_max_time(120)
                .with_matching(MatchingAlgorithmType::FirstAvailable)
        );
    }

    #[test]
    fn rejects_unknown_matching() {
        let err = SimulationConfig::from_json_str(r#"{"matching": "hungarian"}"#)
            .expect_err("unknown algorithm");
        assert!(matches!(err, ScenarioError::Config(_)));
    }
}
