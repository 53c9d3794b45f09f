//! Gravity Flip - A single-button gravity flipping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, scoring)
//! - `config`: Tuning constants with startup validation
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction (input)
//! - `persistence`: Best score storage
//! - `audio`: Procedural sound effects
//! - `settings`: Player preferences

pub mod audio;
pub mod config;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one step per display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player square
    pub const PLAYER_X: f32 = 160.0;
    pub const PLAYER_SIZE: f32 = 30.0;

    /// Gravity acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.45;
    /// Velocity set on flip, scaled by the new gravity sign (pixels/tick)
    pub const FLIP_IMPULSE: f32 = 4.0;
    /// Maximum vertical speed in either direction (pixels/tick)
    pub const TERMINAL_VELOCITY: f32 = 9.0;

    /// Obstacle defaults
    pub const SPAWN_INTERVAL_TICKS: u32 = 180;
    pub const SCROLL_SPEED: f32 = 3.0;
    pub const OBSTACLE_WIDTH: f32 = 40.0;

    /// Gap sizing: max(BASE_GAP - GAP_DECAY * score, MIN_GAP)
    pub const BASE_GAP: f32 = 150.0;
    pub const GAP_DECAY: f32 = 0.075;
    pub const MIN_GAP: f32 = 75.0;
    /// Distance between an anchored gap and its rail
    pub const GAP_MARGIN: f32 = 40.0;
    /// Extra random offset away from the rail
    pub const GAP_JITTER: f32 = 60.0;

    /// One point per this many milliseconds alive
    pub const SCORE_INTERVAL_MS: u32 = 100;
}
