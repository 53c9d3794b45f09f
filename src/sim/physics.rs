//! Flip/gravity integrator
//!
//! One vertical degree of freedom: the player only moves along y.

use super::state::{GameEvent, PlayerState};
use crate::config::GameConfig;

/// Advance the player by one tick.
///
/// A flip inverts gravity and *resets* velocity to the flip impulse in the
/// new direction, then gravity applies as on any other tick. Hitting a rail
/// zeroes velocity. Returns the flip event if one happened.
pub fn integrate(player: &mut PlayerState, flip: bool, config: &GameConfig) -> Option<GameEvent> {
    let event = if flip {
        player.gravity = player.gravity.flipped();
        player.vel = config.flip_impulse * player.gravity.sign();
        Some(GameEvent::Flipped {
            direction: player.gravity,
        })
    } else {
        None
    };

    player.vel += player.gravity.sign() * config.gravity;
    player.vel = player
        .vel
        .clamp(-config.terminal_velocity, config.terminal_velocity);

    let max_y = config.player_max_y();
    let y = player.y + player.vel;
    if y <= 0.0 {
        player.y = 0.0;
        player.vel = 0.0;
    } else if y >= max_y {
        player.y = max_y;
        player.vel = 0.0;
    } else {
        player.y = y;
    }

    event
}
