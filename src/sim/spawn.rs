//! Obstacle spawner
//!
//! Draws come from the game's owned seeded RNG: a 1..=7 roll where 7 is
//! a flyer and 1..=6 pick a ground variant, so roughly one spawn in
//! seven flies. The gap to the previous obstacle is uniform within a
//! bounded range, keeping spacing randomized but always survivable.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState, Obstacle, ObstacleKind};
use crate::consts::*;

/// Draw and place the next obstacle just past the right viewport edge
pub fn spawn_obstacle(state: &mut GameState) {
    let gap = state
        .rng
        .random_range(state.config.spawn_gap_min..=state.config.spawn_gap_max);
    // Draw ranges are fixed constants; anything else is a programming error
    debug_assert!(
        gap >= state.config.spawn_gap_min && gap <= state.config.spawn_gap_max,
        "obstacle gap {gap} outside configured range"
    );
    let x = VIEW_WIDTH + gap;

    let roll: u8 = state.rng.random_range(1..=GROUND_VARIANTS + 1);
    let (kind, y) = if roll > GROUND_VARIANTS {
        let altitude = FLYER_ALTITUDES[state.rng.random_range(0..FLYER_ALTITUDES.len())];
        (ObstacleKind::Flyer, VIEW_HEIGHT - altitude)
    } else {
        (ObstacleKind::Ground(roll), VIEW_HEIGHT)
    };

    let id = state.next_entity_id();
    state.obstacles.push(Obstacle { id, kind, pos: Vec2::new(x, y) });
    state.emit(GameEvent::ObstacleSpawned { id, kind });
    log::debug!("spawned {kind:?} #{id} at x={x:.0}");
}
