//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.
//! Order within a playing tick: physics, scroll + cull, spawn, collision,
//! score. A new obstacle therefore does not move on the tick it spawns.

use super::collision::{first_collision, player_rect};
use super::obstacles::{maybe_spawn, scroll_and_cull};
use super::physics::integrate;
use super::score::{accumulate, dt_to_us};
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Invert gravity (also starts the round from the intro screen)
    pub flip: bool,
    /// Start a new round after game over
    pub restart: bool,
}

impl TickInput {
    /// Map the single game button onto the command it means in `phase`
    pub fn from_press(pressed: bool, phase: GamePhase) -> Self {
        match phase {
            GamePhase::Intro | GamePhase::Playing => Self {
                flip: pressed,
                restart: false,
            },
            GamePhase::GameOver => Self {
                flip: false,
                restart: pressed,
            },
        }
    }
}

/// Advance the game state by one fixed timestep.
///
/// `dt` is the wall time this tick represents; it only drives scoring.
/// Returns the events the tick produced, in order.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        GamePhase::Intro => {
            if !(input.flip || input.restart) {
                return events;
            }
            start_round(state, &mut events);
        }
        GamePhase::GameOver => {
            // Idle until restarted; the restart tick itself does not simulate
            if input.restart {
                start_round(state, &mut events);
            }
            return events;
        }
        GamePhase::Playing => {}
    }

    if let Some(flip) = integrate(&mut state.player, input.flip, &state.config) {
        events.push(flip);
    }

    scroll_and_cull(&mut state.obstacles, &state.config);
    maybe_spawn(state);
    state.time_ticks += 1;

    let player = player_rect(state.config.player_x, state.player.y, state.config.player_size);
    if let Some(hit) = first_collision(&player, &state.obstacles) {
        log::debug!("Hit obstacle {} at x={:.1}", hit.id, hit.x);
        end_round(state, &mut events);
        return events;
    }

    accumulate(
        &mut state.round,
        dt_to_us(dt),
        state.config.score_interval_us(),
        &mut events,
    );

    events
}

fn start_round(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.reset_round();
    log::info!("Round {} started (best {})", state.round_index, state.round.best_score);
    events.push(GameEvent::RoundStarted);
}

/// Transition to game over; the best-score check happens only here
fn end_round(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let score = state.round.score;
    state.phase = GamePhase::GameOver;
    events.push(GameEvent::Collided { score });

    let previous = state.round.best_score;
    if score > previous {
        state.round.best_score = score;
        events.push(GameEvent::BestScoreBeaten { score, previous });
        log::info!(
            "Game over after {} ticks: score {} (new best, was {})",
            state.time_ticks,
            score,
            previous
        );
    } else {
        log::info!(
            "Game over after {} ticks: score {} (best {})",
            state.time_ticks,
            score,
            previous
        );
    }
}
