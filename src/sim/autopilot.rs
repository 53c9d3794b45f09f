//! Idle/demo mode - a simple bot that plays the game
//!
//! Steers toward the centre of the next gap by flipping whenever the
//! player drifts past a small dead zone in the current gravity direction.

use super::state::{GamePhase, GameState, Gravity};

/// Half-height of the band around the target where no flip happens
const DEAD_ZONE: f32 = 6.0;

/// Vertical target for the player's centre: middle of the next gap ahead,
/// or the middle of the field when no obstacle is ahead
pub fn target_y(state: &GameState) -> f32 {
    state
        .obstacles
        .iter()
        .find(|o| o.right() > state.config.player_x)
        .map(|o| o.gap_start + o.gap_height / 2.0)
        .unwrap_or(state.config.field_height / 2.0)
}

/// Whether the bot would press the button this tick
pub fn autopilot_press(state: &GameState) -> bool {
    match state.phase {
        GamePhase::Intro | GamePhase::GameOver => true,
        GamePhase::Playing => {
            let center = state.player.y + state.config.player_size / 2.0;
            let target = target_y(state);
            match state.player.gravity {
                Gravity::Down => center > target + DEAD_ZONE,
                Gravity::Up => center < target - DEAD_ZONE,
            }
        }
    }
}
