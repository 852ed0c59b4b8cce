use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const MAX_TARGET_LIMIT: usize = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("catalog has no items")]
    EmptyCatalog,
    #[error("duplicate catalog item {0}")]
    DuplicateItem(String),
    #[error("no option slots configured")]
    NoSlots,
    #[error("max target count {0} outside 1..=5")]
    MaxTargetOutOfRange(usize),
    #[error("no decoys differ from {target} but {needed} decoy slots need filling")]
    DecoysExhausted { target: String, needed: usize },
}

/// Padding added on top of a narration cue before the follow-up transition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransitionTiming {
    #[serde(default = "default_intro_pad_ms")]
    pub intro_pad_ms: u64,
    #[serde(default = "default_success_pad_ms")]
    pub success_pad_ms: u64,
    #[serde(default = "default_retry_pad_ms")]
    pub retry_pad_ms: u64,
}

fn default_intro_pad_ms() -> u64 {
    500
}

fn default_success_pad_ms() -> u64 {
    500
}

fn default_retry_pad_ms() -> u64 {
    200
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            intro_pad_ms: default_intro_pad_ms(),
            success_pad_ms: default_success_pad_ms(),
            retry_pad_ms: default_retry_pad_ms(),
        }
    }
}

impl TransitionTiming {
    pub fn intro_pad(&self) -> Duration {
        Duration::from_millis(self.intro_pad_ms)
    }

    pub fn success_pad(&self) -> Duration {
        Duration::from_millis(self.success_pad_ms)
    }

    pub fn retry_pad(&self) -> Duration {
        Duration::from_millis(self.retry_pad_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundConfig {
    pub slot_count: usize,
    pub max_target_count: usize,
    #[serde(default)]
    pub timing: TransitionTiming,
}

impl RoundConfig {
    pub fn new(slot_count: usize, max_target_count: usize) -> Self {
        Self {
            slot_count,
            max_target_count,
            timing: TransitionTiming::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slot_count == 0 {
            return Err(ConfigError::NoSlots);
        }
        if !(1..=MAX_TARGET_LIMIT).contains(&self.max_target_count) {
            return Err(ConfigError::MaxTargetOutOfRange(self.max_target_count));
        }
        Ok(())
    }

    /// Upper bound of the required-count draw.
    pub fn target_cap(&self) -> usize {
        self.max_target_count.min(self.slot_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_bounds() {
        assert_eq!(RoundConfig::new(4, 3).validate(), Ok(()));
        assert_eq!(RoundConfig::new(0, 3).validate(), Err(ConfigError::NoSlots));
        assert_eq!(
            RoundConfig::new(4, 0).validate(),
            Err(ConfigError::MaxTargetOutOfRange(0))
        );
        assert_eq!(
            RoundConfig::new(4, 6).validate(),
            Err(ConfigError::MaxTargetOutOfRange(6))
        );
    }

    #[test]
    fn target_cap_clamps_to_slots() {
        assert_eq!(RoundConfig::new(2, 5).target_cap(), 2);
        assert_eq!(RoundConfig::new(6, 3).target_cap(), 3);
    }

    #[test]
    fn timing_defaults_when_missing() {
        let config: RoundConfig =
            serde_json::from_str(r#"{"slot_count":6,"max_target_count":3}"#).expect("parse");
        assert_eq!(config.timing, TransitionTiming::default());
        assert_eq!(config.timing.intro_pad(), Duration::from_millis(500));
        assert_eq!(config.timing.retry_pad(), Duration::from_millis(200));

        let partial: TransitionTiming =
            serde_json::from_str(r#"{"retry_pad_ms":50}"#).expect("parse");
        assert_eq!(partial.retry_pad_ms, 50);
        assert_eq!(partial.success_pad_ms, 500);
    }
}
