//! Racer - A top-down lane dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collisions, spawning, session)
//! - `renderer`: Draw-surface boundary and the frame painter
//! - `config`: Data-driven game tuning

pub mod config;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use sim::{Action, GameEvent, Session};

use glam::Vec2;

/// Reference tuning constants
pub mod consts {
    /// Viewport dimensions (pixels)
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Lanes across the road
    pub const LANE_COUNT: usize = 5;
    pub const LANE_MARGIN: f32 = 20.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;
    /// Pixels per tick toward the top edge
    pub const OBSTACLE_SPEED: f32 = 4.0;
    /// Obstacles appear this far below the bottom edge
    pub const OBSTACLE_SPAWN_OFFSET: f32 = 10.0;

    /// Coin defaults
    pub const COIN_SIZE: f32 = 18.0;
    pub const COIN_SPEED: f32 = 3.0;
    /// Degrees per tick
    pub const COIN_SPIN: f32 = 4.0;
    pub const COIN_VALUE: u32 = 10;
    pub const COIN_SPAWN_OFFSET: f32 = 20.0;
    pub const COIN_DROP_CHANCE: f64 = 0.45;

    /// Car defaults
    pub const CAR_LENGTH: f32 = 50.0;
    pub const CAR_WIDTH: f32 = 40.0;
    /// Pixels per tick along the heading while thrusting
    pub const CAR_LINEAR_STEP: f32 = 2.4;
    /// Target turn rate (degrees per tick)
    pub const CAR_ROTATION_STEP: f32 = 2.5;
    /// Weight kept from the previous turn velocity each tick
    pub const CAR_TURN_SMOOTHING: f32 = 0.8;
    /// Start facing down the screen, toward oncoming traffic
    pub const CAR_START_ROTATION: f32 = 90.0;
    pub const CAR_START_Y: f32 = 120.0;

    /// Ticks between spawn waves
    pub const SPAWN_INTERVAL_TICKS: u32 = 25;
    /// Anything lower turns into a wall of obstacles
    pub const MIN_SPAWN_INTERVAL_TICKS: u32 = 5;

    /// Lane occupancy patterns (1 = obstacle in that lane)
    pub const OBSTACLE_PATTERNS: [[u8; LANE_COUNT]; 8] = [
        [1, 0, 0, 0, 1],
        [0, 1, 0, 1, 0],
        [1, 0, 1, 0, 1],
        [0, 0, 1, 0, 0],
        [0, 1, 1, 1, 0],
        [1, 1, 0, 1, 1],
        [1, 0, 0, 1, 0],
        [0, 1, 0, 0, 1],
    ];

    /// Length of the heading indicator drawn in front of the car
    pub const HEADING_LINE_LENGTH: f32 = 20.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit vector pointing along a heading given in degrees
#[inline]
pub fn heading(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Rotate a local-space point about the origin by `degrees`
#[inline]
pub fn rotate_degrees(point: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(point.x * cos - point.y * sin, point.x * sin + point.y * cos)
}
