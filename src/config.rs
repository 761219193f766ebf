//! Data-driven gameplay tuning
//!
//! Everything a balance pass would reasonably retune lives here; fixed
//! engine constants stay in [`crate::consts`]. Configs round-trip
//! through JSON so tuning does not require a rebuild.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or validating a tuning file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Gameplay tuning knobs. Defaults are the shipped balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Base scroll speed in world units per tick
    pub base_scroll_speed: f32,
    /// Scroll speed gain per Running tick (unbounded ramp)
    pub scroll_speed_step: f32,
    /// Decoration drift in units per tick, slower than the world scroll
    pub decor_drift: f32,
    /// Spawn accumulator gain factor, applied to delta-ms times speed
    pub spawn_rate: f32,
    /// Spawn accumulator threshold that triggers an obstacle
    pub spawn_threshold: f32,
    /// Obstacle gap range beyond the right viewport edge
    pub spawn_gap_min: f32,
    pub spawn_gap_max: f32,
    /// Downward gravity in units per second squared
    pub gravity: f32,
    /// Jump impulse in units per second (negative is up)
    pub jump_velocity: f32,
    /// Forward velocity during the intro run, units per second
    pub intro_run_velocity: f32,
    /// Ground growth per intro tick
    pub ground_growth_per_tick: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_scroll_speed: 10.0,
            scroll_speed_step: 0.0002,
            decor_drift: 1.5,
            spawn_rate: 0.1,
            spawn_threshold: 1500.0,
            spawn_gap_min: 600.0,
            spawn_gap_max: 900.0,
            gravity: 5000.0,
            jump_velocity: -1600.0,
            intro_run_velocity: 60.0,
            ground_growth_per_tick: 34.0,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a tuning file
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Check invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_scroll_speed <= 0.0 {
            return Err(ConfigError::Invalid("base_scroll_speed must be positive".into()));
        }
        if self.scroll_speed_step < 0.0 {
            return Err(ConfigError::Invalid("scroll_speed_step must not be negative".into()));
        }
        if self.spawn_rate <= 0.0 || self.spawn_threshold <= 0.0 {
            return Err(ConfigError::Invalid("spawn pacing must be positive".into()));
        }
        if self.spawn_gap_min <= 0.0 || self.spawn_gap_min > self.spawn_gap_max {
            return Err(ConfigError::Invalid(format!(
                "spawn gap range {}..{} is not ordered and positive",
                self.spawn_gap_min, self.spawn_gap_max
            )));
        }
        if self.gravity <= 0.0 {
            return Err(ConfigError::Invalid("gravity must be positive".into()));
        }
        if self.jump_velocity >= 0.0 {
            return Err(ConfigError::Invalid("jump_velocity must point upward (negative)".into()));
        }
        if self.intro_run_velocity <= 0.0 || self.ground_growth_per_tick <= 0.0 {
            return Err(ConfigError::Invalid("intro pacing must be positive".into()));
        }
        Ok(())
    }
}
