//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod obstacles;
pub mod physics;
pub mod score;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_press;
pub use collision::{Rect, first_collision, hits_obstacle, player_rect};
pub use obstacles::gap_height_for_score;
pub use state::{
    GameEvent, GamePhase, GameState, GapPlacement, Gravity, Obstacle, PlayerState,
    RenderSnapshot, RoundState,
};
pub use tick::{TickInput, tick};
