//! Game state and core simulation types
//!
//! All state that must be persisted for determinism lives here. World
//! coordinates follow the screen convention: x grows rightward, y grows
//! downward, and the ground line sits at `VIEW_HEIGHT`. Horizontal world
//! motion is expressed in units per tick; vertical physics in units per
//! second.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{AabbOverlap, Rect};
use super::player::Player;
use super::tick::{TickInput, tick};
use crate::config::GameConfig;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start trigger; the character idles at the origin
    Idle,
    /// Ground-extension intro sequence running
    Starting,
    /// Full gameplay
    Running,
    /// Collision occurred; simulation paused until restart
    GameOver,
}

/// Audio cue identifiers forwarded to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    Jump,
    Hit,
    Milestone,
}

/// Character pose. Always derived from physical state, never set
/// independently, so visuals and collision geometry cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerPose {
    /// Pre-game stance
    Idle,
    /// Run cycle
    Running,
    /// Duck-run cycle
    Ducking,
    /// Neutral airborne frame
    Airborne,
    /// Post-collision frame
    Hurt,
}

/// Edge-triggered presentation commands, drained by the host each tick.
///
/// Continuous quantities (obstacle positions, ground width, background
/// offset) are read directly off [`GameState`] instead of being queued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Start trigger fired; the intro sequence began
    IntroStarted,
    /// Intro finished: score display and background decorations fade in
    HudRevealed,
    PoseChanged(PlayerPose),
    CuePlayed(Cue),
    ScoreChanged(u32),
    /// Milestone feedback blink on the score display
    ScorePulsed,
    HighScoreChanged(u32),
    /// Game-over overlay shown or hidden
    OverlayVisible(bool),
    ObstacleSpawned { id: u32, kind: ObstacleKind },
    ObstacleDespawned(u32),
}

/// Obstacle flavor: one of six ground variants or a flyer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Ground-level obstacle, variant 1..=6
    Ground(u8),
    /// Flying obstacle at one of the fixed altitude bands
    Flyer,
}

impl ObstacleKind {
    /// Sprite dimensions in world units
    pub fn sprite_size(&self) -> Vec2 {
        match self {
            ObstacleKind::Ground(1) => Vec2::new(17.0, 36.0),
            ObstacleKind::Ground(2) => Vec2::new(34.0, 36.0),
            ObstacleKind::Ground(3) => Vec2::new(51.0, 36.0),
            ObstacleKind::Ground(4) => Vec2::new(25.0, 50.0),
            ObstacleKind::Ground(5) => Vec2::new(50.0, 50.0),
            ObstacleKind::Ground(_) => Vec2::new(75.0, 50.0),
            ObstacleKind::Flyer => Vec2::new(42.0, 30.0),
        }
    }
}

/// A spawned obstacle. Bottom-left anchored; moves left each Running tick
/// and is culled exactly once its right edge exits at x = 0. Never
/// recycled, never re-enters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
}

impl Obstacle {
    pub fn right_edge(&self) -> f32 {
        self.pos.x + self.kind.sprite_size().x
    }

    /// Collision box. Flyers use a reduced box so duck-under timing stays
    /// fair; ground obstacles sink theirs by a small baseline correction.
    pub fn collision_box(&self) -> Rect {
        let size = self.kind.sprite_size();
        let top = self.pos.y - size.y;
        match self.kind {
            ObstacleKind::Flyer => Rect::new(self.pos.x, top, size.x, size.y / FLYER_BOX_SHRINK),
            ObstacleKind::Ground(_) => {
                Rect::new(self.pos.x, top + GROUND_OBSTACLE_SINK, size.x, size.y)
            }
        }
    }
}

/// Background decoration (cloud). Drifts left at a fixed rate, slower
/// than the world, and wraps back to the right edge after exiting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decoration {
    pub pos: Vec2,
}

/// Near-invisible region just past the origin that arms the game start.
/// First touch happens mid-jump at the armed offset and only relocates
/// the trigger to the ground line; the next overlap fires the intro.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartTrigger {
    /// Bottom-left anchor
    pub pos: Vec2,
    pub enabled: bool,
}

impl StartTrigger {
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.pos.x,
            self.pos.y - START_TRIGGER_SIZE,
            START_TRIGGER_SIZE,
            START_TRIGGER_SIZE,
        )
    }

    pub fn at_armed_offset(&self) -> bool {
        (self.pos.y - START_TRIGGER_ARMED_Y).abs() < f32::EPSILON
    }
}

/// Score counter and session best
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u32,
    pub best: u32,
    /// Free-running score clock in sim ticks; a no-op outside Running
    pub clock: u64,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Owned RNG; all obstacle draws come from here
    pub rng: Pcg32,
    /// Gameplay tuning
    pub config: GameConfig,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter (frozen while GameOver)
    pub time_ticks: u64,
    /// Visible ground length; grows during the intro
    pub ground_width: f32,
    /// Background tile scroll offset, wraps modulo the tile width
    pub bg_offset: f32,
    /// World scroll speed in units per tick
    pub scroll_speed: f32,
    /// Obstacle spawn accumulator
    pub spawn_accum: f32,
    pub player: Player,
    /// Active obstacles (sorted by id; ids are never reused)
    pub obstacles: Vec<Obstacle>,
    pub decorations: Vec<Decoration>,
    pub start_trigger: StartTrigger,
    pub score: ScoreState,
    /// Presentation command queue, drained by the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh game in `Idle` with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, GameConfig::default())
    }

    /// Create a fresh game with explicit tuning
    pub fn with_config(seed: u64, config: GameConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid game config");
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            time_ticks: 0,
            ground_width: GROUND_START_WIDTH,
            bg_offset: 0.0,
            scroll_speed: config.base_scroll_speed,
            spawn_accum: 0.0,
            player: Player::new(),
            obstacles: Vec::new(),
            decorations: vec![
                Decoration { pos: Vec2::new(VIEW_WIDTH / 2.0, 170.0) },
                Decoration { pos: Vec2::new(VIEW_WIDTH - 88.0, 80.0) },
                Decoration { pos: Vec2::new(VIEW_WIDTH / 1.3, 180.0) },
            ],
            start_trigger: StartTrigger {
                pos: Vec2::new(0.0, START_TRIGGER_ARMED_Y),
                enabled: true,
            },
            score: ScoreState::default(),
            events: Vec::new(),
            next_id: 1,
            config,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Queue a presentation command for the host
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain queued presentation commands (host side, once per tick)
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance one tick with the built-in AABB overlap source
    pub fn step(&mut self, input: &TickInput, dt: f32) {
        tick(self, input, &AabbOverlap, dt);
    }
}
