//! Engine configuration
//!
//! Defaults come from the shared constants; every field can be overridden
//! from the environment:
//!
//! - `BLOCKFALL_BASE_DELAY_MS`: gravity delay at level 0 (default: 800)
//! - `BLOCKFALL_DELAY_STEP_MS`: delay reduction per level (default: 50)
//! - `BLOCKFALL_HORIZONTAL_REPEAT_MS`: held left/right repeat interval (default: 100)
//! - `BLOCKFALL_DOWN_REPEAT_MS`: held down repeat interval (default: 50)
//! - `BLOCKFALL_MAX_PENDING`: control messages queued before new ones are dropped (default: 16)
//! - `BLOCKFALL_SEED`: figure sequence seed (default: derived from the clock)

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::types::{
    BASE_DELAY_MS, DELAY_STEP_MS, DOWN_REPEAT_MS, HORIZONTAL_REPEAT_MS, MIN_DELAY_MS,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub base_delay_ms: u64,
    pub delay_step_ms: u64,
    pub horizontal_repeat_ms: u64,
    pub down_repeat_ms: u64,
    pub max_pending_controls: usize,
    pub seed: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: BASE_DELAY_MS,
            delay_step_ms: DELAY_STEP_MS,
            horizontal_repeat_ms: HORIZONTAL_REPEAT_MS,
            down_repeat_ms: DOWN_REPEAT_MS,
            max_pending_controls: 16,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables, keeping defaults for anything
    /// missing or unparsable
    pub fn from_env() -> Self {
        use std::env;

        fn var<T: std::str::FromStr>(name: &str) -> Option<T> {
            env::var(name).ok().and_then(|s| s.trim().parse().ok())
        }

        let defaults = Self::default();
        Self {
            base_delay_ms: var("BLOCKFALL_BASE_DELAY_MS").unwrap_or(defaults.base_delay_ms),
            delay_step_ms: var("BLOCKFALL_DELAY_STEP_MS").unwrap_or(defaults.delay_step_ms),
            horizontal_repeat_ms: var("BLOCKFALL_HORIZONTAL_REPEAT_MS")
                .unwrap_or(defaults.horizontal_repeat_ms),
            down_repeat_ms: var("BLOCKFALL_DOWN_REPEAT_MS").unwrap_or(defaults.down_repeat_ms),
            max_pending_controls: var("BLOCKFALL_MAX_PENDING")
                .unwrap_or(defaults.max_pending_controls),
            seed: var("BLOCKFALL_SEED"),
        }
    }

    /// Gravity delay for `level`
    pub fn delay_for_level(&self, level: u32) -> Duration {
        Duration::from_millis(delay_ms(self.base_delay_ms, self.delay_step_ms, level))
    }

    pub fn horizontal_repeat(&self) -> Duration {
        Duration::from_millis(self.horizontal_repeat_ms.max(1))
    }

    pub fn down_repeat(&self) -> Duration {
        Duration::from_millis(self.down_repeat_ms.max(1))
    }

    /// The configured seed, or one taken from the clock
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

/// `max(MIN_DELAY_MS, base - level * step)`, never zero
pub fn delay_ms(base: u64, step: u64, level: u32) -> u64 {
    base.saturating_sub(step.saturating_mul(u64::from(level)))
        .max(MIN_DELAY_MS)
}
