//! Simulation entities
//!
//! Each entity owns a `Polygon` and applies its own per-tick movement rule.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Collidable;
use super::polygon::{Polygon, arrow_shape, diamond_shape, rect_shape};
use crate::config::GameConfig;
use crate::consts::{CAR_LENGTH, CAR_WIDTH};
use crate::heading;

/// Per-tick movement
pub trait Movable {
    fn advance(&mut self);
}

/// Latest pressed state of the car's controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub turn_left: bool,
    pub turn_right: bool,
    pub forward: bool,
}

impl Controls {
    /// +1 turning right, -1 turning left, 0 when neither or both are held
    pub fn turn_input(&self) -> f32 {
        match (self.turn_left, self.turn_right) {
            (false, true) => 1.0,
            (true, false) => -1.0,
            _ => 0.0,
        }
    }
}

/// Car handling constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarTuning {
    /// Pixels per tick along the heading
    pub linear_step: f32,
    /// Target turn rate, degrees per tick
    pub rotation_step: f32,
    /// Fraction of the previous turn velocity kept each tick
    pub smoothing: f32,
}

/// The player's car: rotate-and-thrust steering with eased turning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub body: Polygon,
    pub controls: Controls,
    /// Smoothed degrees per tick
    pub turn_velocity: f32,
    pub tuning: CarTuning,
}

impl Car {
    pub fn new(position: Vec2, rotation: f32, tuning: CarTuning) -> Self {
        Self {
            body: Polygon::from_shape(arrow_shape(CAR_LENGTH, CAR_WIDTH), position, rotation),
            controls: Controls::default(),
            turn_velocity: 0.0,
            tuning,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.car_start,
            config.car_start_rotation,
            CarTuning {
                linear_step: config.car_linear_step,
                rotation_step: config.car_rotation_step,
                smoothing: config.car_turn_smoothing,
            },
        )
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.body.rotation()
    }

    /// Put the car back at a pose with no turn in progress. Held keys stay held.
    pub fn place(&mut self, position: Vec2, rotation: f32) {
        self.body.position = position;
        self.body.set_rotation(rotation);
        self.turn_velocity = 0.0;
    }

    /// Margin past the viewport edge before the car wraps around
    pub fn wrap_margin(&self) -> f32 {
        self.body.radius()
    }

    /// Torus wrap: once fully past an edge, reappear past the opposite one
    pub fn wrap(&mut self, width: f32, height: f32) {
        let margin = self.wrap_margin();
        let pos = &mut self.body.position;
        if pos.x < -margin {
            pos.x = width + margin;
        } else if pos.x > width + margin {
            pos.x = -margin;
        }
        if pos.y < -margin {
            pos.y = height + margin;
        } else if pos.y > height + margin {
            pos.y = -margin;
        }
    }
}

impl Movable for Car {
    fn advance(&mut self) {
        let target = self.controls.turn_input() * self.tuning.rotation_step;
        let keep = self.tuning.smoothing;
        self.turn_velocity = keep * self.turn_velocity + (1.0 - keep) * target;
        self.body.rotate_by(self.turn_velocity);

        if self.controls.forward {
            self.body.position += heading(self.body.rotation()) * self.tuning.linear_step;
        }
    }
}

impl Collidable for Car {
    fn polygon(&self) -> &Polygon {
        &self.body
    }
}

/// A hazard scrolling toward the top edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub body: Polygon,
    /// Pixels per tick toward the top
    pub speed: f32,
}

impl Obstacle {
    /// Rectangle with its top-left corner at `position`
    pub fn new(position: Vec2, width: f32, height: f32, speed: f32) -> Self {
        Self {
            body: Polygon::from_shape(rect_shape(width, height), position, 0.0),
            speed,
        }
    }

    /// Entirely above the top edge. Height is unused; the top is always y = 0.
    pub fn is_offscreen(&self, _viewport_height: f32) -> bool {
        self.body
            .transformed_points()
            .iter()
            .map(|p| p.y)
            .fold(f32::NEG_INFINITY, f32::max)
            < 0.0
    }
}

impl Movable for Obstacle {
    fn advance(&mut self) {
        self.body.position.y -= self.speed;
    }
}

impl Collidable for Obstacle {
    fn polygon(&self) -> &Polygon {
        &self.body
    }
}

/// A spinning collectible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub body: Polygon,
    pub speed: f32,
    /// Degrees per tick
    pub spin: f32,
    pub value: u32,
    collected: bool,
}

impl Coin {
    /// Diamond centered on `position`
    pub fn new(position: Vec2, size: f32, speed: f32, spin: f32, value: u32) -> Self {
        Self {
            body: Polygon::from_shape(diamond_shape(size, size), position, 0.0),
            speed,
            spin,
            value,
            collected: false,
        }
    }

    /// Coin with the config's size, motion and value
    pub fn from_config(position: Vec2, config: &GameConfig) -> Self {
        Self::new(
            position,
            config.coin_size,
            config.coin_speed,
            config.coin_spin,
            config.coin_value,
        )
    }

    #[inline]
    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Mark as picked up. Idempotent, and never undone.
    pub fn collect(&mut self) {
        self.collected = true;
    }

    /// Scrolled entirely above the top edge
    pub fn is_offscreen(&self) -> bool {
        self.body.bounds().1.y < 0.0
    }
}

impl Movable for Coin {
    fn advance(&mut self) {
        if self.collected {
            return;
        }
        self.body.position.y -= self.speed;
        self.body.rotate_by(self.spin);
    }
}

impl Collidable for Coin {
    fn polygon(&self) -> &Polygon {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car() -> Car {
        Car::from_config(&GameConfig::default())
    }

    #[test]
    fn test_turn_input() {
        let mut c = Controls::default();
        assert_eq!(c.turn_input(), 0.0);
        c.turn_right = true;
        assert_eq!(c.turn_input(), 1.0);
        c.turn_left = true;
        assert_eq!(c.turn_input(), 0.0);
        c.turn_right = false;
        assert_eq!(c.turn_input(), -1.0);
    }

    #[test]
    fn test_car_idle_does_not_move() {
        let mut car = car();
        let start = car.position();
        let rot = car.rotation();
        for _ in 0..30 {
            car.advance();
        }
        assert_eq!(car.position(), start);
        assert_eq!(car.rotation(), rot);
    }

    #[test]
    fn test_car_turn_eases_in() {
        let mut car = car();
        car.controls.turn_right = true;
        car.advance();
        // 0.8 * 0 + 0.2 * 2.5
        assert!((car.turn_velocity - 0.5).abs() < 1e-6);
        assert!((car.rotation() - 90.5).abs() < 1e-4);
        car.advance();
        // 0.8 * 0.5 + 0.2 * 2.5
        assert!((car.turn_velocity - 0.9).abs() < 1e-6);
        for _ in 0..200 {
            car.advance();
        }
        assert!((car.turn_velocity - 2.5).abs() < 1e-3);
    }

    #[test]
    fn test_car_turn_eases_out() {
        let mut car = car();
        car.controls.turn_left = true;
        for _ in 0..100 {
            car.advance();
        }
        car.controls.turn_left = false;
        let before = car.turn_velocity;
        car.advance();
        assert!(car.turn_velocity < 0.0);
        assert!((car.turn_velocity - before * 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_car_rotation_wraps_below_zero() {
        let mut car = car();
        car.body.set_rotation(0.5);
        car.controls.turn_left = true;
        car.advance();
        assert!((car.rotation() - 0.0).abs() < 1e-4);
        car.advance();
        assert!(car.rotation() > 359.0 && car.rotation() < 360.0);
    }

    #[test]
    fn test_car_forward_follows_heading() {
        let mut car = car();
        let start = car.position();
        car.controls.forward = true;
        car.advance();
        // Facing 90°: straight down the screen
        let delta = car.position() - start;
        assert!(delta.x.abs() < 1e-4);
        assert!((delta.y - 2.4).abs() < 1e-4);
    }

    #[test]
    fn test_car_wrap() {
        let mut car = car();
        let margin = car.wrap_margin();
        car.body.position = Vec2::new(-margin - 1.0, 100.0);
        car.wrap(800.0, 600.0);
        assert_eq!(car.position().x, 800.0 + margin);

        car.body.position = Vec2::new(400.0, 600.0 + margin + 0.5);
        car.wrap(800.0, 600.0);
        assert_eq!(car.position().y, -margin);

        // Inside the margin band nothing happens
        car.body.position = Vec2::new(-margin + 1.0, 10.0);
        car.wrap(800.0, 600.0);
        assert_eq!(car.position(), Vec2::new(-margin + 1.0, 10.0));
    }

    #[test]
    fn test_obstacle_scrolls_up_and_culls() {
        let mut obstacle = Obstacle::new(Vec2::new(10.0, 0.0), 40.0, 40.0, 4.0);
        obstacle.advance();
        assert_eq!(obstacle.body.position.y, -4.0);
        assert!(!obstacle.is_offscreen(600.0));

        obstacle.body.position.y = -40.0;
        // Bottom edge exactly on y = 0 is still visible
        assert!(!obstacle.is_offscreen(600.0));
        obstacle.advance();
        assert!(obstacle.is_offscreen(600.0));
    }

    #[test]
    fn test_coin_moves_and_spins() {
        let mut coin = Coin::new(Vec2::new(50.0, 50.0), 18.0, 3.0, 4.0, 10);
        coin.body.set_rotation(358.0);
        coin.advance();
        assert_eq!(coin.body.position.y, 47.0);
        assert!((coin.body.rotation() - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_coin_collect_is_sticky() {
        let mut coin = Coin::new(Vec2::new(50.0, 50.0), 18.0, 3.0, 4.0, 10);
        assert!(!coin.is_collected());
        coin.collect();
        coin.collect();
        assert!(coin.is_collected());

        let pose = (coin.body.position, coin.body.rotation());
        coin.advance();
        assert!(coin.is_collected());
        assert_eq!((coin.body.position, coin.body.rotation()), pose);
    }
}
