//! Score tracker
//!
//! The score clock runs at 10 Hz, decoupled from the 60 Hz simulation
//! tick. It stays armed across phase changes and simply does nothing
//! outside `Running`, so restarts need no rearming ceremony.

use super::state::{Cue, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Format a score for display: fixed-width, zero-padded
pub fn format_score(score: u32) -> String {
    format!("{score:0width$}", width = SCORE_DIGITS)
}

/// Advance the score clock by one sim tick
pub(crate) fn advance(state: &mut GameState) {
    state.score.clock += 1;
    if !state.score.clock.is_multiple_of(SCORE_INTERVAL_TICKS) {
        return;
    }
    if state.phase != GamePhase::Running {
        return;
    }

    state.score.score += 1;
    state.emit(GameEvent::ScoreChanged(state.score.score));

    // The counter steps by 1, so the equality test fires only at the
    // crossing and cannot re-trigger while the score sits on a multiple
    if state.score.score.is_multiple_of(SCORE_MILESTONE) {
        state.emit(GameEvent::CuePlayed(Cue::Milestone));
        state.emit(GameEvent::ScorePulsed);
    }
}

/// Fold the finished run into the session best and reset the counter
pub(crate) fn record_run_end(state: &mut GameState) {
    state.score.best = state.score.best.max(state.score.score);
    state.emit(GameEvent::HighScoreChanged(state.score.best));
    state.score.score = 0;
}
