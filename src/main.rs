//! Dino Dash entry point
//!
//! Headless demo driver: runs seeded sessions with a small reactive
//! auto-player and prints the outcome. A real host swaps this loop for
//! its renderer and input plumbing.

use dino_dash::consts::*;
use dino_dash::highscores::HighScores;
use dino_dash::sim::{Cue, GameEvent, GamePhase, GameState, ObstacleKind, TickInput, format_score};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|v| v.parse().ok()).unwrap_or(42);
    let runs: usize = args.next().and_then(|v| v.parse().ok()).unwrap_or(3);

    log::info!("running {runs} demo run(s) with seed {seed}");

    let mut state = GameState::new(seed);
    let mut scores = HighScores::new();
    let mut last_score = 0;
    let mut finished = 0;

    // Bound the session so a lucky bot cannot run forever
    let max_ticks: u64 = 60 * 60 * 10;

    while finished < runs && state.time_ticks < max_ticks {
        let input = auto_input(&state);
        state.step(&input, SIM_DT);

        for event in state.take_events() {
            match event {
                GameEvent::ScoreChanged(score) => last_score = score,
                GameEvent::CuePlayed(Cue::Milestone) => {
                    log::info!("milestone at {}", format_score(last_score));
                }
                GameEvent::HighScoreChanged(best) => {
                    finished += 1;
                    let rank = scores.add_score(last_score, state.time_ticks);
                    println!(
                        "run {finished}: score {} (session best {}, rank {rank:?})",
                        format_score(last_score),
                        format_score(best),
                    );
                }
                _ => {}
            }
        }
    }

    if let Some(top) = scores.top_score() {
        println!("top score this session: {}", format_score(top));
    }
}

/// Minimal reactive player: hop to arm the start trigger, jump over
/// ground obstacles, duck under high flyers, restart after a wipeout.
fn auto_input(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    match state.phase {
        GamePhase::Idle => input.jump = state.player.on_ground(),
        GamePhase::Starting => {}
        GamePhase::GameOver => input.restart = true,
        GamePhase::Running => {
            let player_x = state.player.pos.x;
            let threat = state
                .obstacles
                .iter()
                .filter(|o| o.right_edge() > player_x)
                .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

            // React about half a second out at the current speed
            let horizon = state.scroll_speed * 30.0;
            let mut duck_wanted = false;
            if let Some(threat) = threat {
                if threat.pos.x - player_x < horizon {
                    match threat.kind {
                        ObstacleKind::Ground(_) => input.jump = true,
                        // High flyers are ducked under; low ones must be jumped
                        ObstacleKind::Flyer => {
                            if VIEW_HEIGHT - threat.pos.y >= 50.0 {
                                duck_wanted = true;
                            } else {
                                input.jump = true;
                            }
                        }
                    }
                }
            }
            input.duck_press = duck_wanted;
            input.duck_release = !duck_wanted && state.player.box_height < PLAYER_STAND_HEIGHT;
        }
    }
    input
}
