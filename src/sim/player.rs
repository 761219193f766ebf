//! Player state controller
//!
//! Owns vertical motion and the collision-box presets. Input requests
//! are validated against physical state before taking effect; invalid
//! requests are no-ops, not faults.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::PlayerPose;
use crate::consts::*;

/// Vertical motion mode, derived from physical state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMode {
    Grounded,
    Airborne,
    Ducking,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Bottom-left anchor; the ground line is at `VIEW_HEIGHT`
    pub pos: Vec2,
    /// Velocity in units per second; vx is only nonzero during the intro
    pub vel: Vec2,
    /// Active collision-box preset height
    pub box_height: f32,
    /// Box top offset from the sprite top
    pub box_offset_y: f32,
    pub pose: PlayerPose,
    /// y at the end of the previous tick, for displacement-based pose
    prev_y: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(0.0, VIEW_HEIGHT),
            vel: Vec2::ZERO,
            box_height: PLAYER_STAND_HEIGHT,
            box_offset_y: 0.0,
            pose: PlayerPose::Idle,
            prev_y: VIEW_HEIGHT,
        }
    }

    pub fn on_ground(&self) -> bool {
        self.pos.y >= VIEW_HEIGHT
    }

    /// Vertical motion mode, derived from position and box preset
    pub fn mode(&self) -> PlayerMode {
        if !self.on_ground() {
            PlayerMode::Airborne
        } else if self.box_height <= PLAYER_DUCK_HEIGHT {
            PlayerMode::Ducking
        } else {
            PlayerMode::Grounded
        }
    }

    /// Collision box for the active preset
    pub fn collision_box(&self) -> Rect {
        Rect::new(
            self.pos.x,
            self.pos.y - PLAYER_STAND_HEIGHT + self.box_offset_y,
            PLAYER_WIDTH,
            self.box_height,
        )
    }

    /// Restore the standing box preset. Idempotent; safe in any state.
    pub fn stand(&mut self) {
        self.box_height = PLAYER_STAND_HEIGHT;
        self.box_offset_y = 0.0;
    }

    /// Jump request. Only takes effect when grounded, and never while the
    /// intro still carries forward velocity. Returns whether it applied.
    pub fn try_jump(&mut self, jump_velocity: f32) -> bool {
        if !self.on_ground() || self.vel.x > 0.0 {
            return false;
        }
        self.stand();
        self.vel.y = jump_velocity;
        true
    }

    /// Duck request. Only takes effect when grounded during full
    /// gameplay. Returns whether it applied.
    pub fn try_duck(&mut self, running: bool) -> bool {
        if !self.on_ground() || !running {
            return false;
        }
        self.box_height = PLAYER_DUCK_HEIGHT;
        self.box_offset_y = PLAYER_DUCK_OFFSET_Y;
        true
    }

    /// Integrate one timestep of motion and clamp to the ground line
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        self.prev_y = self.pos.y;
        self.vel.y += gravity * dt;
        self.pos += self.vel * dt;
        if self.pos.y >= VIEW_HEIGHT {
            self.pos.y = VIEW_HEIGHT;
            self.vel.y = 0.0;
        }
    }

    /// Vertical displacement magnitude over the last tick
    pub fn vertical_displacement(&self) -> f32 {
        (self.pos.y - self.prev_y).abs()
    }

    /// Pose implied by the current physical state: moving vertically is
    /// airborne, a shrunk box is duck-running, anything else is running.
    pub fn resolved_pose(&self) -> PlayerPose {
        if self.vertical_displacement() > 0.0 {
            PlayerPose::Airborne
        } else if self.box_height <= PLAYER_DUCK_HEIGHT {
            PlayerPose::Ducking
        } else {
            PlayerPose::Running
        }
    }
}
