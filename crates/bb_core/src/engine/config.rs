//! Game configuration.
//!
//! ```rust
//! use bb_core::engine::config::GameConfig;
//!
//! let config = GameConfig::default();
//! let short = GameConfig::seven_inning();
//! assert_eq!(short.num_innings, 7);
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Regulation length; extra innings follow while tied.
    pub num_innings: u32,
    /// Seed for the pitch stream; weather derives its own seed from it.
    pub seed: u64,
    /// First pitch, on the simulated clock.
    pub start_time: DateTime<Utc>,
    /// Simulated seconds consumed by each pitch.
    pub seconds_per_pitch: u32,
    /// Simulated seconds between half-innings.
    pub seconds_between_half_innings: u32,
    /// Where the event store writes on close. `None` keeps events in memory.
    pub event_store_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_innings: 9,
            seed: 0,
            start_time: default_start_time(),
            seconds_per_pitch: 22,
            seconds_between_half_innings: 120,
            event_store_path: None,
        }
    }
}

fn default_start_time() -> DateTime<Utc> {
    // 2024-07-01 23:05 UTC, a 7:05pm Eastern first pitch.
    Utc.with_ymd_and_hms(2024, 7, 1, 23, 5, 0).single().unwrap_or_default()
}

impl GameConfig {
    /// Nine innings (default).
    pub fn regulation() -> Self {
        Self::default()
    }

    /// Seven innings, as in doubleheaders and many amateur leagues.
    pub fn seven_inning() -> Self {
        Self { num_innings: 7, ..Self::default() }
    }

    /// Regulation game with a fixed seed.
    pub fn deterministic(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_innings == 0 {
            return Err(SimError::InvalidConfig("num_innings must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: GameConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.num_innings, 9);
        assert!(cfg.event_store_path.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_yaml_overrides_keep_defaults() {
        let cfg = GameConfig::from_yaml_str("num_innings: 7\nseed: 42\n").unwrap();
        assert_eq!(cfg.num_innings, 7);
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.seconds_per_pitch, 22);
    }

    #[test]
    fn test_zero_innings_rejected() {
        let err = GameConfig::from_yaml_str("num_innings: 0\n").unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
    }
}
