//! Game state and core simulation types
//!
//! Everything the step function mutates lives in [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first press (intro overlay)
    Intro,
    /// Active gameplay
    Playing,
    /// Round ended, waiting for restart
    GameOver,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        self == GamePhase::GameOver
    }
}

/// Gravity direction: +1 pulls toward the bottom rail, -1 toward the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gravity {
    Down,
    Up,
}

impl Gravity {
    pub fn sign(self) -> f32 {
        match self {
            Gravity::Down => 1.0,
            Gravity::Up => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Gravity::Down => Gravity::Up,
            Gravity::Up => Gravity::Down,
        }
    }
}

/// Events emitted by a simulation tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The first press of a round moved Intro/GameOver into Playing
    RoundStarted,
    /// Gravity inverted; carries the new direction
    Flipped { direction: Gravity },
    /// Score went up by one
    ScoreIncremented { score: u64 },
    /// Player hit an obstacle bar; the round is over
    Collided { score: u64 },
    /// Final score beat the stored best
    BestScoreBeaten { score: u64, previous: u64 },
}

/// The player's square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Top edge of the square (0 = top rail)
    pub y: f32,
    /// Vertical velocity, positive is downward (pixels/tick)
    pub vel: f32,
    pub gravity: Gravity,
}

impl PlayerState {
    /// Starting position: vertically centred, at rest, falling downward
    pub fn new(config: &GameConfig) -> Self {
        Self {
            y: (config.field_height - config.player_size) / 2.0,
            vel: 0.0,
            gravity: Gravity::Down,
        }
    }
}

/// Which rail an obstacle's gap hugs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapPlacement {
    Top,
    Bottom,
}

impl GapPlacement {
    pub fn other(self) -> Self {
        match self {
            GapPlacement::Top => GapPlacement::Bottom,
            GapPlacement::Bottom => GapPlacement::Top,
        }
    }
}

/// A scrolling wall with one passable gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Top of the gap
    pub gap_start: f32,
    pub gap_height: f32,
    pub placement: GapPlacement,
}

impl Obstacle {
    /// Right (trailing) edge
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn gap_end(&self) -> f32 {
        self.gap_start + self.gap_height
    }
}

/// Score bookkeeping for one round plus the persisted best
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub score: u64,
    /// Simulated time since the last score increment (microseconds)
    pub score_timer_us: u64,
    pub best_score: u64,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    /// Draws taken so far, so the generator can be rebuilt after a load
    pub draws: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, draws: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        rng.advance(self.draws);
        rng
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    /// Rounds started so far (reseeds the RNG per round)
    pub round_index: u32,
    pub phase: GamePhase,
    pub player: PlayerState,
    /// Left-to-right (= spawn order)
    pub obstacles: Vec<Obstacle>,
    pub round: RoundState,
    /// Ticks since the last spawn
    pub spawn_timer: u32,
    /// Placement for the next spawned obstacle
    pub next_placement: GapPlacement,
    /// Playing ticks elapsed this round
    pub time_ticks: u64,
    next_id: u32,
}

impl GameState {
    /// Create a new game in the intro phase.
    ///
    /// `config` must already have passed [`GameConfig::validate`].
    pub fn new(config: GameConfig, seed: u64, best_score: u64) -> Self {
        Self {
            player: PlayerState::new(&config),
            config,
            seed,
            rng_state: RngState::new(seed),
            round_index: 0,
            phase: GamePhase::Intro,
            obstacles: Vec::new(),
            round: RoundState {
                best_score,
                ..Default::default()
            },
            spawn_timer: 0,
            next_placement: GapPlacement::Top,
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reinitialize everything except the best score and start playing
    pub fn reset_round(&mut self) {
        self.round_index += 1;
        self.player = PlayerState::new(&self.config);
        self.obstacles.clear();
        self.round.score = 0;
        self.round.score_timer_us = 0;
        // Timer starts elapsed so the first obstacle appears immediately
        self.spawn_timer = self.config.spawn_interval_ticks;
        self.next_placement = GapPlacement::Top;
        self.time_ticks = 0;
        self.rng_state = RngState::new(self.seed.wrapping_add(u64::from(self.round_index)));
        self.phase = GamePhase::Playing;
    }

    /// Read-only view for the renderer and HUD
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            player_x: self.config.player_x,
            player_y: self.player.y,
            player_size: self.config.player_size,
            player_rotation: player_rotation(self.player.vel, self.config.terminal_velocity),
            gravity: self.player.gravity,
            field: Vec2::new(self.config.field_width, self.config.field_height),
            obstacles: self.obstacles.clone(),
            score: self.round.score,
            best_score: self.round.best_score,
            phase: self.phase,
        }
    }
}

/// Tilt of the player square, up to ±45° at terminal velocity
pub fn player_rotation(vel: f32, terminal_velocity: f32) -> f32 {
    let t = (vel / terminal_velocity).clamp(-1.0, 1.0);
    t * std::f32::consts::FRAC_PI_4
}

/// What the renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub player_x: f32,
    pub player_y: f32,
    pub player_size: f32,
    /// Radians, positive tilts nose-down
    pub player_rotation: f32,
    pub gravity: Gravity,
    /// Playfield width and height
    pub field: Vec2,
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub best_score: u64,
    pub phase: GamePhase,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_intro() {
        let state = GameState::new(GameConfig::default(), 7, 42);
        assert_eq!(state.phase, GamePhase::Intro);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.round.best_score, 42);
        assert_eq!(state.player.y, (600.0 - 30.0) / 2.0);
    }

    #[test]
    fn test_rng_state_rebuild_matches_live_rng() {
        use rand::Rng;

        let mut live = RngState::new(99).to_rng();
        let _: f32 = live.random();
        let _: f32 = live.random();
        let expected: f32 = live.random();

        let mut rebuilt = RngState { seed: 99, draws: 2 }.to_rng();
        let got: f32 = rebuilt.random();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_rotation_is_bounded() {
        assert_eq!(player_rotation(0.0, 9.0), 0.0);
        assert_eq!(player_rotation(100.0, 9.0), std::f32::consts::FRAC_PI_4);
        assert_eq!(player_rotation(-100.0, 9.0), -std::f32::consts::FRAC_PI_4);
    }
}
