//! Experiment configuration, loadable from TOML

use serde::{Deserialize, Serialize};
use snake_core::{DEFAULT_STARTING_ANIMAL, DEFAULT_SYSTEM_PROMPT, MAX_REPLY_CHARS};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::experiment::ErrorPolicy;
use crate::game_runner::GameConfig;

pub const DEFAULT_MODEL_A: &str = "llama3:8b-instruct-q8_0";
pub const DEFAULT_MODEL_B: &str = "gemma2:9b-instruct-q8_0";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything needed to run one experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    /// Agent spec for player A (`ollama:<model>`, `scripted:<replies>` or a model name)
    pub model_a: String,
    /// Agent spec for player B
    pub model_b: String,
    pub num_experiments: u32,
    pub max_turns: u32,
    pub starting_animal: String,
    pub system_prompt: String,
    pub max_reply_chars: usize,
    pub ollama_host: String,
    /// Per-request timeout for model calls (None = no limit)
    pub request_timeout_secs: Option<u64>,
    /// Results go to `<data_dir>/<run stamp>/game_results.csv`
    pub data_dir: PathBuf,
    /// Per-game logs go to `<log_dir>/<run stamp>/`
    pub log_dir: PathBuf,
    pub on_error: ErrorPolicy,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            model_a: DEFAULT_MODEL_A.to_string(),
            model_b: DEFAULT_MODEL_B.to_string(),
            num_experiments: 100,
            max_turns: 200,
            starting_animal: DEFAULT_STARTING_ANIMAL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_reply_chars: MAX_REPLY_CHARS,
            ollama_host: ollama_agent::DEFAULT_HOST.to_string(),
            request_timeout_secs: None,
            data_dir: PathBuf::from("data"),
            log_dir: PathBuf::from("logs"),
            on_error: ErrorPolicy::Continue,
        }
    }
}

impl ExperimentConfig {
    /// Load config from a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_experiments == 0 {
            return Err(ConfigError::Invalid(
                "num_experiments must be at least 1".to_string(),
            ));
        }
        if self.model_a.trim().is_empty() || self.model_b.trim().is_empty() {
            return Err(ConfigError::Invalid("model specs must not be empty".to_string()));
        }
        if self.starting_animal.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "starting_animal must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            max_turns: self.max_turns,
            starting_animal: self.starting_animal.clone(),
            system_prompt: self.system_prompt.clone(),
            max_reply_chars: self.max_reply_chars,
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Results file for a run started at `stamp`.
    pub fn results_path(&self, stamp: &str) -> PathBuf {
        self.data_dir.join(stamp).join("game_results.csv")
    }

    /// Log directory matching the results file at `csv_path`.
    ///
    /// Named after the directory holding the results file, so a run's logs
    /// and results share the same stamp.
    pub fn log_dir_for(&self, csv_path: &Path) -> PathBuf {
        match csv_path
            .parent()
            .and_then(Path::file_name)
            .filter(|name| !name.is_empty())
        {
            Some(name) => self.log_dir.join(name),
            None => self.log_dir.clone(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
