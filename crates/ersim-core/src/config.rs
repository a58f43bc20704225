//! Session configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.
//! Unknown keys are rejected to catch typos.

use std::path::{Path, PathBuf};

use ersim_logic::catalog::{Item, ItemKind};
use ersim_logic::constants::deterioration::DEFAULT_THRESHOLD_SECS;
use ersim_logic::constants::ecg;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What happens to the score when the next patient arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorePolicy {
    /// Score goes back to `initial_score` for every patient.
    #[default]
    Reset,
    /// Score carries over from the previous case.
    Carry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Seconds without intervention before vitals drift.
    pub deterioration_threshold_secs: f64,
    pub initial_score: i32,
    pub score_policy: ScorePolicy,
    /// Remove medications from the inventory when given.
    pub consume_medications: bool,
    /// Remove supplies from the inventory when used.
    pub consume_supplies: bool,
    /// Treatment log lines shown at once.
    pub log_display_limit: usize,
    pub ecg_seconds: f32,
    pub ecg_sample_rate: u32,
    /// Fixed RNG seed; a random one is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            deterioration_threshold_secs: DEFAULT_THRESHOLD_SECS,
            initial_score: 0,
            score_policy: ScorePolicy::Reset,
            consume_medications: true,
            consume_supplies: false,
            log_display_limit: 8,
            ecg_seconds: 3.0,
            ecg_sample_rate: 250,
            seed: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.deterioration_threshold_secs.is_finite() && self.deterioration_threshold_secs > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "deterioration_threshold_secs must be positive, got {}",
                self.deterioration_threshold_secs
            )));
        }
        if self.log_display_limit == 0 {
            return Err(ConfigError::Invalid(
                "log_display_limit must be at least 1".into(),
            ));
        }
        if !(self.ecg_seconds.is_finite()
            && self.ecg_seconds > 0.0
            && self.ecg_seconds <= ecg::MAX_SECONDS)
        {
            return Err(ConfigError::Invalid(format!(
                "ecg_seconds must be in (0, {}], got {}",
                ecg::MAX_SECONDS,
                self.ecg_seconds
            )));
        }
        if self.ecg_sample_rate == 0 || self.ecg_sample_rate > ecg::MAX_SAMPLE_RATE {
            return Err(ConfigError::Invalid(format!(
                "ecg_sample_rate must be in 1..={}, got {}",
                ecg::MAX_SAMPLE_RATE,
                self.ecg_sample_rate
            )));
        }
        Ok(())
    }

    /// Whether using `item` removes it from the inventory.
    pub fn consumes(&self, item: Item) -> bool {
        match item.kind() {
            ItemKind::Medication => self.consume_medications,
            ItemKind::Supply => self.consume_supplies,
        }
    }
}
