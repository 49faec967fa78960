//! Session state and player controls
//!
//! Everything one run of the game mutates lives in `Session`. Only `tick`,
//! `reset`, the pause toggle and the input setters touch it.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::entities::{Car, Coin, Obstacle};
use super::spawner::Spawner;
use crate::config::{ConfigError, GameConfig};

/// Undrained events kept before the oldest are dropped
pub const MAX_QUEUED_EVENTS: usize = 64;

/// Logical inputs the frontend maps keys onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    TurnLeft,
    TurnRight,
    Forward,
    /// Press-only
    Pause,
    /// Press-only
    Reset,
}

/// Things the frontend may want to react to (sound, HUD flashes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    WaveSpawned {
        pattern: usize,
        obstacles: usize,
        coin: bool,
    },
    CoinCollected {
        value: u32,
    },
    Crashed,
    Paused,
    Resumed,
    Reset,
}

/// One run of the game
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) config: GameConfig,
    pub(crate) car: Car,
    /// Spawn order
    pub(crate) obstacles: Vec<Obstacle>,
    /// Spawn order, collected coins included until pruned
    pub(crate) coins: Vec<Coin>,
    pub(crate) score: u64,
    pub(crate) paused: bool,
    pub(crate) game_over: bool,
    pub(crate) spawner: Spawner,
    pub(crate) time_ticks: u64,
    /// Most recent events, oldest first, capped at `MAX_QUEUED_EVENTS`
    pub(crate) events: VecDeque<GameEvent>,
}

impl Session {
    /// Validate `config` and build a fresh session
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let car = Car::from_config(&config);
        let spawner = Spawner::new(&config);
        log::info!(
            "Session started: {}x{} viewport, {} lanes, seed {}",
            config.viewport_width,
            config.viewport_height,
            config.lane_count,
            config.seed
        );
        Ok(Self {
            config,
            car,
            obstacles: Vec::new(),
            coins: Vec::new(),
            score: 0,
            paused: false,
            game_over: false,
            spawner,
            time_ticks: 0,
            events: VecDeque::with_capacity(MAX_QUEUED_EVENTS),
        })
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn car(&self) -> &Car {
        &self.car
    }

    #[inline]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    #[inline]
    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    /// Coins still in play
    pub fn live_coins(&self) -> impl Iterator<Item = &Coin> {
        self.coins.iter().filter(|c| !c.is_collected())
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Ticks simulated since the last reset
    #[inline]
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    #[inline]
    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    /// Insert an obstacle directly (scripted setups, tests)
    pub fn push_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Insert a coin directly (scripted setups, tests)
    pub fn push_coin(&mut self, coin: Coin) {
        self.coins.push(coin);
    }

    /// Mutable access to the car for scripted setups
    pub fn car_mut(&mut self) -> &mut Car {
        &mut self.car
    }

    pub fn on_turn_left(&mut self, pressed: bool) {
        self.car.controls.turn_left = pressed;
    }

    pub fn on_turn_right(&mut self, pressed: bool) {
        self.car.controls.turn_right = pressed;
    }

    pub fn on_forward(&mut self, pressed: bool) {
        self.car.controls.forward = pressed;
    }

    /// Route a logical input. Pause and reset act on press only.
    pub fn apply(&mut self, action: Action, pressed: bool) {
        match action {
            Action::TurnLeft => self.on_turn_left(pressed),
            Action::TurnRight => self.on_turn_right(pressed),
            Action::Forward => self.on_forward(pressed),
            Action::Pause if pressed => self.toggle_pause(),
            Action::Reset if pressed => self.reset(),
            Action::Pause | Action::Reset => {}
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
        self.push_event(if self.paused {
            GameEvent::Paused
        } else {
            GameEvent::Resumed
        });
    }

    /// Back to the starting line: empty road, zero score, spawner re-armed
    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.coins.clear();
        self.score = 0;
        self.game_over = false;
        self.paused = false;
        self.time_ticks = 0;
        self.car
            .place(self.config.car_start, self.config.car_start_rotation);
        self.spawner.rearm();
        self.events.clear();
        self.push_event(GameEvent::Reset);
        log::info!("Session reset");
    }

    /// Queue an event for the frontend. Frontends that never drain only
    /// ever see the latest `MAX_QUEUED_EVENTS`.
    pub(crate) fn push_event(&mut self, event: GameEvent) {
        if self.events.len() == MAX_QUEUED_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Events still queued, oldest first
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Take the events accumulated since the last call (or since the last
    /// reset, which starts a fresh queue)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    /// Advance one frame
    pub fn tick(&mut self) {
        super::tick::tick(self);
    }
}
