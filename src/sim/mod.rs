//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod player;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{AabbOverlap, CollisionSource, Rect};
pub use player::{Player, PlayerMode};
pub use score::format_score;
pub use state::{
    Cue, Decoration, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, PlayerPose,
    ScoreState, StartTrigger,
};
pub use tick::{TickInput, tick};
