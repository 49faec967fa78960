//! Timed spawn waves
//!
//! A countdown fires every `interval_ticks`; each firing picks a lane pattern
//! (never the same one twice in a row), places one obstacle per occupied
//! lane just below the bottom edge, and sometimes drops a coin.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entities::{Coin, Obstacle};
use crate::config::GameConfig;
use crate::consts::MIN_SPAWN_INTERVAL_TICKS;

/// Everything produced by one firing
#[derive(Debug, Clone)]
pub struct SpawnWave {
    pub pattern_index: usize,
    pub obstacles: Vec<Obstacle>,
    pub coin: Option<Coin>,
}

/// Spawn schedule plus everything a wave is built from, captured from the
/// session's config at construction
#[derive(Debug, Clone)]
pub struct Spawner {
    interval_ticks: u32,
    ticks_until_spawn: u32,
    last_pattern: Option<usize>,
    seed: u64,
    rng: Pcg32,
    patterns: Vec<Vec<bool>>,
    /// Left x of an obstacle in each lane
    obstacle_xs: Vec<f32>,
    /// Center x of each lane, for coins
    lane_centers: Vec<f32>,
    obstacle_y: f32,
    coin_y: f32,
    coin_drop_chance: f64,
    /// Cloned and moved into place for every spawn
    obstacle_template: Obstacle,
    coin_template: Coin,
}

impl Spawner {
    pub fn new(config: &GameConfig) -> Self {
        let interval_ticks = config.spawn_interval_ticks.max(MIN_SPAWN_INTERVAL_TICKS);
        if interval_ticks != config.spawn_interval_ticks {
            log::warn!(
                "Spawn interval {} below minimum, clamped to {}",
                config.spawn_interval_ticks,
                interval_ticks
            );
        }
        Self {
            interval_ticks,
            ticks_until_spawn: interval_ticks,
            last_pattern: None,
            seed: config.seed,
            rng: Pcg32::seed_from_u64(config.seed),
            patterns: config.patterns.clone(),
            obstacle_xs: (0..config.lane_count).map(|l| config.obstacle_x(l)).collect(),
            lane_centers: (0..config.lane_count)
                .map(|l| config.lane_center_x(l))
                .collect(),
            obstacle_y: config.viewport_height + config.obstacle_spawn_offset,
            coin_y: config.viewport_height + config.coin_spawn_offset,
            coin_drop_chance: config.coin_drop_chance,
            obstacle_template: Obstacle::new(
                Vec2::ZERO,
                config.obstacle_width,
                config.obstacle_height,
                config.obstacle_speed,
            ),
            coin_template: Coin::from_config(Vec2::ZERO, config),
        }
    }

    #[inline]
    pub fn interval_ticks(&self) -> u32 {
        self.interval_ticks
    }

    #[inline]
    pub fn ticks_until_spawn(&self) -> u32 {
        self.ticks_until_spawn
    }

    /// Pattern used by the most recent wave
    #[inline]
    pub fn last_pattern(&self) -> Option<usize> {
        self.last_pattern
    }

    /// Full interval on the clock, history and RNG back to the seed
    pub fn rearm(&mut self) {
        self.ticks_until_spawn = self.interval_ticks;
        self.last_pattern = None;
        self.rng = Pcg32::seed_from_u64(self.seed);
    }

    /// Count down one tick; returns a wave when the timer expires.
    /// Callers skip this entirely while paused or after game over.
    pub fn tick(&mut self) -> Option<SpawnWave> {
        self.ticks_until_spawn = self.ticks_until_spawn.saturating_sub(1);
        if self.ticks_until_spawn > 0 {
            return None;
        }
        self.ticks_until_spawn = self.interval_ticks;

        let pattern_index = self.pick_pattern(self.patterns.len());
        self.last_pattern = Some(pattern_index);

        let obstacles = self.patterns[pattern_index]
            .iter()
            .zip(&self.obstacle_xs)
            .filter(|&(&occupied, _)| occupied)
            .map(|(_, &x)| {
                let mut obstacle = self.obstacle_template.clone();
                obstacle.body.position = Vec2::new(x, self.obstacle_y);
                obstacle
            })
            .collect::<Vec<_>>();

        let coin = if self.rng.random_bool(self.coin_drop_chance) {
            let lane = self.rng.random_range(0..self.lane_centers.len());
            let mut coin = self.coin_template.clone();
            coin.body.position = Vec2::new(self.lane_centers[lane], self.coin_y);
            Some(coin)
        } else {
            None
        };

        log::debug!(
            "Wave: pattern {} -> {} obstacles{}",
            pattern_index,
            obstacles.len(),
            if coin.is_some() { " + coin" } else { "" }
        );

        Some(SpawnWave {
            pattern_index,
            obstacles,
            coin,
        })
    }

    /// Uniform over every index except the previous one
    fn pick_pattern(&mut self, count: usize) -> usize {
        match self.last_pattern {
            Some(last) if count > 1 => {
                let idx = self.rng.random_range(0..count - 1);
                if idx >= last { idx + 1 } else { idx }
            }
            _ => self.rng.random_range(0..count),
        }
    }
}
