//! Dino Dash - a side-scrolling endless runner game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state machine, player, spawning, scoring)
//! - `config`: Data-driven gameplay tuning
//! - `highscores`: Session leaderboard
//!
//! The crate is an embedded simulation with no rendering, audio or input
//! plumbing of its own. A host presentation layer calls [`sim::tick`] once
//! per fixed timestep, feeds it abstracted input signals via
//! [`sim::TickInput`], drains the emitted [`sim::GameEvent`]s for
//! edge-triggered feedback (cues, poses, overlays), and reads continuous
//! quantities (obstacle positions, ground width, scroll offset) straight
//! off the [`sim::GameState`].

pub mod config;
pub mod highscores;
pub mod sim;

pub use config::GameConfig;
pub use highscores::HighScores;

/// Fixed simulation constants. Gameplay tuning lives in [`config::GameConfig`].
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Score clock cadence: one score tick every 6 sim ticks (10 Hz)
    pub const SCORE_INTERVAL_TICKS: u64 = 6;
    /// Score display width (zero-padded digits)
    pub const SCORE_DIGITS: usize = 5;
    /// A feedback pulse fires at every multiple of this score
    pub const SCORE_MILESTONE: u32 = 100;

    /// Viewport dimensions in world units. The ground line sits at
    /// `VIEW_HEIGHT`; y grows downward.
    pub const VIEW_WIDTH: f32 = 1000.0;
    pub const VIEW_HEIGHT: f32 = 340.0;

    /// Ground tile width; the background scroll offset wraps modulo this
    pub const GROUND_TILE_WIDTH: f32 = 88.0;
    /// Ground strip length at rest, before the intro stretches it
    pub const GROUND_START_WIDTH: f32 = 88.0;

    /// Player body and collision-box presets
    pub const PLAYER_WIDTH: f32 = 44.0;
    pub const PLAYER_STAND_HEIGHT: f32 = 92.0;
    pub const PLAYER_DUCK_HEIGHT: f32 = 58.0;
    pub const PLAYER_DUCK_OFFSET_Y: f32 = 34.0;

    /// Start trigger rests just past the origin while armed
    pub const START_TRIGGER_ARMED_Y: f32 = 10.0;
    pub const START_TRIGGER_SIZE: f32 = 32.0;

    /// Flying obstacles hover at one of these heights above the ground
    pub const FLYER_ALTITUDES: [f32; 2] = [20.0, 50.0];
    /// Flyer hitbox is sprite height divided by this (duck-under fairness)
    pub const FLYER_BOX_SHRINK: f32 = 1.5;
    /// Ground obstacles sink their hitbox by this baseline correction
    pub const GROUND_OBSTACLE_SINK: f32 = 10.0;
    /// Number of ground obstacle variants
    pub const GROUND_VARIANTS: u8 = 6;

    /// Decoration (cloud) geometry
    pub const DECOR_WIDTH: f32 = 92.0;
    /// Re-entry offset when a decoration wraps back to the right edge
    pub const DECOR_WRAP_MARGIN: f32 = 30.0;
}
