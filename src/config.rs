//! Game tuning and session configuration
//!
//! Fixed at session construction. Serializable so a frontend can ship
//! alternative tunings as JSON.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("pattern {index} has {width} lanes, expected {lane_count}")]
    PatternWidth {
        index: usize,
        width: usize,
        lane_count: usize,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Speeds and steps must move things: finite and above zero
fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} must be finite and > 0")))
    }
}

fn require_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} is not finite")))
    }
}

/// Complete tuning for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Spawner RNG seed
    pub seed: u64,

    // === Viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Lanes ===
    pub lane_count: usize,
    pub lane_margin: f32,
    /// One entry per lane; `true` spawns an obstacle there
    pub patterns: Vec<Vec<bool>>,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub obstacle_speed: f32,
    pub obstacle_spawn_offset: f32,

    // === Coins ===
    pub coin_size: f32,
    pub coin_speed: f32,
    pub coin_spin: f32,
    pub coin_value: u32,
    pub coin_spawn_offset: f32,
    /// Chance per wave of dropping one coin
    pub coin_drop_chance: f64,

    // === Car ===
    pub car_start: Vec2,
    pub car_start_rotation: f32,
    pub car_linear_step: f32,
    pub car_rotation_step: f32,
    pub car_turn_smoothing: f32,

    // === Spawning ===
    pub spawn_interval_ticks: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed,

            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            lane_count: LANE_COUNT,
            lane_margin: LANE_MARGIN,
            patterns: OBSTACLE_PATTERNS
                .iter()
                .map(|row| row.iter().map(|&lane| lane == 1).collect())
                .collect(),

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            obstacle_speed: OBSTACLE_SPEED,
            obstacle_spawn_offset: OBSTACLE_SPAWN_OFFSET,

            coin_size: COIN_SIZE,
            coin_speed: COIN_SPEED,
            coin_spin: COIN_SPIN,
            coin_value: COIN_VALUE,
            coin_spawn_offset: COIN_SPAWN_OFFSET,
            coin_drop_chance: COIN_DROP_CHANCE,

            car_start: Vec2::new(VIEWPORT_WIDTH / 2.0, CAR_START_Y),
            car_start_rotation: CAR_START_ROTATION,
            car_linear_step: CAR_LINEAR_STEP,
            car_rotation_step: CAR_ROTATION_STEP,
            car_turn_smoothing: CAR_TURN_SMOOTHING,

            spawn_interval_ticks: SPAWN_INTERVAL_TICKS,
        }
    }
}

impl GameConfig {
    /// Check invariants that would otherwise break play
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.viewport_width > 0.0 && self.viewport_height > 0.0) {
            return Err(ConfigError::invalid(
                "viewport",
                format!("{}x{} is not a positive size", self.viewport_width, self.viewport_height),
            ));
        }
        if self.lane_count == 0 {
            return Err(ConfigError::invalid("lane_count", "need at least one lane"));
        }
        if self.patterns.is_empty() {
            return Err(ConfigError::invalid("patterns", "catalog is empty"));
        }
        for (index, pattern) in self.patterns.iter().enumerate() {
            if pattern.len() != self.lane_count {
                return Err(ConfigError::PatternWidth {
                    index,
                    width: pattern.len(),
                    lane_count: self.lane_count,
                });
            }
        }
        require_finite("lane_margin", self.lane_margin)?;
        if self.lane_margin < 0.0 || self.usable_width() <= 0.0 {
            return Err(ConfigError::invalid(
                "lane_margin",
                format!("margin {} leaves no road", self.lane_margin),
            ));
        }
        if self.obstacle_width <= 0.0 || self.obstacle_height <= 0.0 {
            return Err(ConfigError::invalid("obstacle_size", "must be positive"));
        }
        if self.obstacle_width > self.lane_width() {
            return Err(ConfigError::invalid(
                "obstacle_width",
                format!("{} does not fit a {} wide lane", self.obstacle_width, self.lane_width()),
            ));
        }
        if self.coin_size <= 0.0 {
            return Err(ConfigError::invalid("coin_size", "must be positive"));
        }

        // A zero or backwards scroll speed never clears the road
        require_positive("obstacle_speed", self.obstacle_speed)?;
        require_positive("coin_speed", self.coin_speed)?;
        require_positive("car_linear_step", self.car_linear_step)?;
        require_finite("obstacle_spawn_offset", self.obstacle_spawn_offset)?;
        require_finite("coin_spawn_offset", self.coin_spawn_offset)?;
        require_finite("coin_spin", self.coin_spin)?;
        require_finite("car_rotation_step", self.car_rotation_step)?;
        require_finite("car_start_rotation", self.car_start_rotation)?;
        if !self.car_start.is_finite() {
            return Err(ConfigError::invalid(
                "car_start",
                format!("{} is not a finite position", self.car_start),
            ));
        }

        if !(0.0..=1.0).contains(&self.coin_drop_chance) {
            return Err(ConfigError::invalid(
                "coin_drop_chance",
                format!("{} is not a probability", self.coin_drop_chance),
            ));
        }
        if !(0.0..1.0).contains(&self.car_turn_smoothing) {
            return Err(ConfigError::invalid(
                "car_turn_smoothing",
                "must be in [0, 1) or the car never turns",
            ));
        }
        Ok(())
    }

    /// Road width between the two margins
    #[inline]
    pub fn usable_width(&self) -> f32 {
        self.viewport_width - 2.0 * self.lane_margin
    }

    #[inline]
    pub fn lane_width(&self) -> f32 {
        self.usable_width() / self.lane_count as f32
    }

    /// Left x of an obstacle centered in `lane`
    pub fn obstacle_x(&self, lane: usize) -> f32 {
        let lane_width = self.lane_width();
        self.lane_margin + lane as f32 * lane_width + (lane_width - self.obstacle_width) / 2.0
    }

    /// Horizontal center of `lane`
    pub fn lane_center_x(&self, lane: usize) -> f32 {
        let lane_width = self.lane_width();
        self.lane_margin + lane as f32 * lane_width + lane_width / 2.0
    }

    /// Parse a JSON tuning file; absent fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
