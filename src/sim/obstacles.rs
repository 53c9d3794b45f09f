//! Obstacle lifecycle: spawn, scroll, cull
//!
//! The obstacle list is always ordered by spawn time, which is also
//! left-to-right order because every obstacle scrolls at the same speed.

use rand::Rng;

use super::state::{GameState, GapPlacement, Obstacle};
use crate::config::GameConfig;

/// Gap height for an obstacle spawned at `score`.
///
/// Shrinks linearly with score and never goes below `min_gap`.
pub fn gap_height_for_score(score: u64, config: &GameConfig) -> f32 {
    (config.base_gap - config.gap_decay * score as f32).max(config.min_gap)
}

/// Top of a gap anchored against one rail, pushed `jitter` pixels away from it
pub fn gap_start(placement: GapPlacement, gap_height: f32, jitter: f32, config: &GameConfig) -> f32 {
    match placement {
        GapPlacement::Top => config.gap_margin + jitter,
        GapPlacement::Bottom => config.field_height - config.gap_margin - jitter - gap_height,
    }
}

/// Move every obstacle left and drop those fully past the left boundary
pub fn scroll_and_cull(obstacles: &mut Vec<Obstacle>, config: &GameConfig) {
    for obstacle in obstacles.iter_mut() {
        obstacle.x -= config.scroll_speed;
    }
    obstacles.retain(|o| o.right() > 0.0);
}

/// Spawn one obstacle at the right edge if the spawn timer has elapsed.
///
/// Returns the new obstacle's id when one was created.
pub fn maybe_spawn(state: &mut GameState) -> Option<u32> {
    if state.spawn_timer < state.config.spawn_interval_ticks {
        state.spawn_timer += 1;
        return None;
    }
    state.spawn_timer = 1;

    let gap_height = gap_height_for_score(state.round.score, &state.config);
    let jitter = if state.config.gap_jitter > 0.0 {
        let mut rng = state.rng_state.to_rng();
        let roll: f32 = rng.random();
        state.rng_state.draws += 1;
        roll * state.config.gap_jitter
    } else {
        0.0
    };

    let placement = state.next_placement;
    state.next_placement = placement.other();

    let id = state.next_entity_id();
    let obstacle = Obstacle {
        id,
        x: state.config.field_width,
        width: state.config.obstacle_width,
        gap_start: gap_start(placement, gap_height, jitter, &state.config),
        gap_height,
        placement,
    };
    log::debug!(
        "Spawned obstacle {} ({:?} gap {:.1}..{:.1}) at score {}",
        id,
        placement,
        obstacle.gap_start,
        obstacle.gap_end(),
        state.round.score
    );
    state.obstacles.push(obstacle);
    Some(id)
}
