//! Duel configuration.
//!
//! Settings are layered: built-in defaults, then an optional RON file, then
//! environment variables. The binary applies its command-line flags last.

use crate::animation::DEFAULT_TRAIL_COUNT;
use crate::battle::rng::DEFAULT_SEED;
use crate::battle::state::DEFAULT_LOG_CAPACITY;
use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Delays between the commit of an action and its deferred transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Commit to HP change.
    pub hit_delay_ms: u64,
    /// Commit to the attack animation being cleared.
    pub clear_animation_ms: u64,
    /// Commit to the win check and turn hand-over.
    pub conclude_delay_ms: u64,
    /// Hand-over to the opponent's action.
    pub opponent_delay_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            hit_delay_ms: 360,
            clear_animation_ms: 560,
            conclude_delay_ms: 620,
            opponent_delay_ms: 800,
        }
    }
}

impl Timings {
    /// All transitions fire as soon as the clock is advanced at all.
    pub fn instant() -> Self {
        Self {
            hit_delay_ms: 0,
            clear_animation_ms: 0,
            conclude_delay_ms: 0,
            opponent_delay_ms: 0,
        }
    }

    /// Every delay multiplied by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        let scale = |ms: u64| (ms as f64 * factor).round().max(0.0) as u64;
        Self {
            hit_delay_ms: scale(self.hit_delay_ms),
            clear_animation_ms: scale(self.clear_animation_ms),
            conclude_delay_ms: scale(self.conclude_delay_ms),
            opponent_delay_ms: scale(self.opponent_delay_ms),
        }
    }

    pub fn hit_delay(&self) -> Duration {
        Duration::from_millis(self.hit_delay_ms)
    }

    pub fn clear_animation(&self) -> Duration {
        Duration::from_millis(self.clear_animation_ms)
    }

    pub fn conclude_delay(&self) -> Duration {
        Duration::from_millis(self.conclude_delay_ms)
    }

    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(self.opponent_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelConfig {
    pub seed: u32,
    pub timings: Timings,
    pub log_capacity: usize,
    pub trail_count: usize,
    /// RON roster file; the built-in roster is used when unset.
    pub roster_path: Option<PathBuf>,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            timings: Timings::default(),
            log_capacity: DEFAULT_LOG_CAPACITY,
            trail_count: DEFAULT_TRAIL_COUNT,
            roster_path: None,
        }
    }
}

impl DuelConfig {
    /// Reads a RON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: DuelConfig = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides from the process environment.
    ///
    /// Environment variables:
    /// - `DUEL_SEED` - generator seed, decimal or `0x` hex
    /// - `DUEL_ROSTER` - path to a RON roster file
    /// - `DUEL_LOG_CAPACITY` - narration lines kept (at least 1)
    /// - `DUEL_TRAIL_COUNT` - animation trails per attack
    /// - `DUEL_SPEED` - multiplier applied to every delay
    pub fn apply_env(self) -> ConfigResult<Self> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Same as [`DuelConfig::apply_env`] with an explicit variable lookup.
    pub fn apply_env_with<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("DUEL_SEED") {
            self.seed = parse_seed(&value).ok_or_else(|| invalid_env("DUEL_SEED", &value))?;
        }
        if let Some(value) = lookup("DUEL_ROSTER") {
            self.roster_path = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup("DUEL_LOG_CAPACITY") {
            self.log_capacity = value
                .trim()
                .parse()
                .map_err(|_| invalid_env("DUEL_LOG_CAPACITY", &value))?;
        }
        if let Some(value) = lookup("DUEL_TRAIL_COUNT") {
            self.trail_count = value
                .trim()
                .parse()
                .map_err(|_| invalid_env("DUEL_TRAIL_COUNT", &value))?;
        }
        if let Some(value) = lookup("DUEL_SPEED") {
            let factor: f64 = value
                .trim()
                .parse()
                .ok()
                .filter(|f: &f64| f.is_finite() && *f >= 0.0)
                .ok_or_else(|| invalid_env("DUEL_SPEED", &value))?;
            self.timings = self.timings.scaled(factor);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.log_capacity == 0 {
            return Err(ConfigError::Invalid(
                "log_capacity must be at least 1".to_string(),
            ));
        }
        let timings = &self.timings;
        if timings.hit_delay_ms > timings.conclude_delay_ms {
            return Err(ConfigError::Invalid(format!(
                "hit_delay_ms ({}) must not exceed conclude_delay_ms ({})",
                timings.hit_delay_ms, timings.conclude_delay_ms
            )));
        }
        if timings.clear_animation_ms > timings.conclude_delay_ms {
            return Err(ConfigError::Invalid(format!(
                "clear_animation_ms ({}) must not exceed conclude_delay_ms ({})",
                timings.clear_animation_ms, timings.conclude_delay_ms
            )));
        }
        Ok(())
    }
}

/// Parses a seed written in decimal or as `0x`-prefixed hex.
pub fn parse_seed(text: &str) -> Option<u32> {
    let text = text.trim();
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(&hex.replace('_', ""), 16).ok(),
        None => text.replace('_', "").parse().ok(),
    }
}

fn invalid_env(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidEnv {
        key: key.to_string(),
        value: value.to_string(),
    }
}
