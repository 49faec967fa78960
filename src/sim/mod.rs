//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entities;
pub mod polygon;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Collidable, collides, outlines_collide};
pub use entities::{Car, CarTuning, Coin, Controls, Movable, Obstacle};
pub use polygon::{GeometryError, Polygon, contains, transformed_points};
pub use spawner::{SpawnWave, Spawner};
pub use state::{Action, GameEvent, Session};
pub use tick::tick;
