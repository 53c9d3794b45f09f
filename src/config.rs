//! Data-driven game tuning
//!
//! Every simulation constant lives in [`GameConfig`]. Defaults come from
//! [`crate::consts`]; a JSON document may override any subset of fields.
//! A config must pass [`GameConfig::validate`] before a game is built from it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a tuning set is rejected at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be zero or more (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("min_gap ({min_gap}) must be larger than player_size ({player_size})")]
    GapTooSmall { min_gap: f32, player_size: f32 },

    #[error("min_gap ({0}) must not exceed base_gap ({1})")]
    GapRange(f32, f32),

    #[error("base gap plus margin and jitter ({needed}) does not fit the field height ({height})")]
    GapDoesNotFit { needed: f32, height: f32 },

    #[error("player_x ({player_x}) puts the player outside the field width ({width})")]
    PlayerOutOfField { player_x: f32, width: f32 },

    #[error("{0} must be at least 1")]
    ZeroInterval(&'static str),
}

/// Simulation tuning (all distances in field pixels, speeds per tick)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_width: f32,
    pub field_height: f32,
    pub player_x: f32,
    pub player_size: f32,

    pub gravity: f32,
    pub flip_impulse: f32,
    pub terminal_velocity: f32,

    pub spawn_interval_ticks: u32,
    pub scroll_speed: f32,
    pub obstacle_width: f32,

    pub base_gap: f32,
    pub gap_decay: f32,
    pub min_gap: f32,
    pub gap_margin: f32,
    pub gap_jitter: f32,

    pub score_interval_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            player_x: PLAYER_X,
            player_size: PLAYER_SIZE,
            gravity: GRAVITY,
            flip_impulse: FLIP_IMPULSE,
            terminal_velocity: TERMINAL_VELOCITY,
            spawn_interval_ticks: SPAWN_INTERVAL_TICKS,
            scroll_speed: SCROLL_SPEED,
            obstacle_width: OBSTACLE_WIDTH,
            base_gap: BASE_GAP,
            gap_decay: GAP_DECAY,
            min_gap: MIN_GAP,
            gap_margin: GAP_MARGIN,
            gap_jitter: GAP_JITTER,
            score_interval_ms: SCORE_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override and validate the result
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Lowest reachable y for the player's top edge
    pub fn player_max_y(&self) -> f32 {
        self.field_height - self.player_size
    }

    /// Score interval in microseconds (accumulator unit)
    pub fn score_interval_us(&self) -> u64 {
        u64::from(self.score_interval_ms) * 1_000
    }

    /// Check the invariants the simulation relies on.
    ///
    /// The gap floor must stay above the player size, otherwise a narrow
    /// enough gap becomes impassable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("player_size", self.player_size),
            ("gravity", self.gravity),
            ("flip_impulse", self.flip_impulse),
            ("terminal_velocity", self.terminal_velocity),
            ("scroll_speed", self.scroll_speed),
            ("obstacle_width", self.obstacle_width),
            ("base_gap", self.base_gap),
            ("min_gap", self.min_gap),
        ];
        for (field, value) in positive {
            // NaN fails this check too
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        let non_negative = [
            ("player_x", self.player_x),
            ("gap_decay", self.gap_decay),
            ("gap_margin", self.gap_margin),
            ("gap_jitter", self.gap_jitter),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if self.spawn_interval_ticks == 0 {
            return Err(ConfigError::ZeroInterval("spawn_interval_ticks"));
        }
        if self.score_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("score_interval_ms"));
        }
        if self.min_gap <= self.player_size {
            return Err(ConfigError::GapTooSmall {
                min_gap: self.min_gap,
                player_size: self.player_size,
            });
        }
        if self.min_gap > self.base_gap {
            return Err(ConfigError::GapRange(self.min_gap, self.base_gap));
        }
        // A gap may use all of the height its margin and jitter leave over
        let needed = self.base_gap + self.gap_margin + self.gap_jitter;
        if needed > self.field_height {
            return Err(ConfigError::GapDoesNotFit {
                needed,
                height: self.field_height,
            });
        }
        if self.player_x + self.player_size > self.field_width {
            return Err(ConfigError::PlayerOutOfField {
                player_x: self.player_x,
                width: self.field_width,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        GameConfig::default().validate().unwrap();
    }

    #[test]
    fn test_min_gap_must_exceed_player() {
        let config = GameConfig {
            min_gap: 30.0,
            player_size: 30.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GapTooSmall { .. })
        ));
    }

    #[test]
    fn test_partial_json_override() {
        let config = GameConfig::from_json(r#"{ "scroll_speed": 4.5, "gap_jitter": 0 }"#).unwrap();
        assert_eq!(config.scroll_speed, 4.5);
        assert_eq!(config.gap_jitter, 0.0);
        assert_eq!(config.base_gap, BASE_GAP);
    }

    #[test]
    fn test_json_rejects_bad_values() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "spawn_interval_ticks": 0 }"#),
            Err(ConfigError::ZeroInterval(_))
        ));
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "base_gap": 501 }"#),
            Err(ConfigError::GapDoesNotFit { .. })
        ));
    }

    #[test]
    fn test_gap_may_fill_remaining_height() {
        // 500 + 40 margin + 60 jitter is exactly the 600 px field
        let config = GameConfig::from_json(r#"{ "base_gap": 500 }"#).unwrap();
        assert_eq!(config.base_gap, 500.0);
    }

    #[test]
    fn test_rejects_non_finite_and_negative() {
        let nan_margin = GameConfig {
            gap_margin: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            nan_margin.validate(),
            Err(ConfigError::Negative { field: "gap_margin", .. })
        ));

        let negative_margin = GameConfig {
            gap_margin: -10.0,
            ..Default::default()
        };
        assert!(matches!(
            negative_margin.validate(),
            Err(ConfigError::Negative { field: "gap_margin", .. })
        ));

        let nan_player = GameConfig {
            player_x: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            nan_player.validate(),
            Err(ConfigError::Negative { field: "player_x", .. })
        ));

        let infinite_height = GameConfig {
            field_height: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            infinite_height.validate(),
            Err(ConfigError::NotPositive { field: "field_height", .. })
        ));
    }
}
