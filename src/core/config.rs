use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{MonitorError, Result};

pub const DEFAULT_TICK_PERIOD_MS: u64 = 1000;
pub const DEFAULT_MIN_SAMPLE_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_TOP_K: usize = 50;
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;
pub const DEFAULT_GRACEFUL_TIMEOUT_MS: u64 = 3000;
pub const DEFAULT_EXIT_POLL_INTERVAL_MS: u64 = 100;

/// Engine configuration. Immutable once handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Period of the scheduler tick
    pub tick_period_ms: u64,
    /// Minimum wall-clock time between two accepted samples
    pub min_sample_interval_ms: u64,
    /// Number of processes kept in the ranked list
    pub top_k: usize,
    /// Capacity of the CPU and memory history buffers
    pub history_capacity: usize,
    /// How long a gracefully signalled process gets to exit
    pub graceful_timeout_ms: u64,
    /// Liveness poll period while waiting for a graceful exit
    pub exit_poll_interval_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            min_sample_interval_ms: DEFAULT_MIN_SAMPLE_INTERVAL_MS,
            top_k: DEFAULT_TOP_K,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            graceful_timeout_ms: DEFAULT_GRACEFUL_TIMEOUT_MS,
            exit_poll_interval_ms: DEFAULT_EXIT_POLL_INTERVAL_MS,
        }
    }
}

impl MonitorConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    pub fn min_sample_interval(&self) -> Duration {
        Duration::from_millis(self.min_sample_interval_ms)
    }

    pub fn graceful_timeout(&self) -> Duration {
        Duration::from_millis(self.graceful_timeout_ms)
    }

    pub fn exit_poll_interval(&self) -> Duration {
        Duration::from_millis(self.exit_poll_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_period_ms == 0 {
            return Err(MonitorError::config("tick_period_ms must be greater than zero"));
        }
        if self.top_k == 0 {
            return Err(MonitorError::config("top_k must be greater than zero"));
        }
        if self.history_capacity == 0 {
            return Err(MonitorError::config(
                "history_capacity must be greater than zero",
            ));
        }
        if self.graceful_timeout_ms == 0 {
            return Err(MonitorError::config(
                "graceful_timeout_ms must be greater than zero",
            ));
        }
        if self.exit_poll_interval_ms == 0 {
            return Err(MonitorError::config(
                "exit_poll_interval_ms must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Load from the default location, falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;

        // An empty file is treated as "no overrides"
        if data.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: MonitorConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("procwatch").join("config.json"))
    }
}
