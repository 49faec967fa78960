//! Per-frame simulation step
//!
//! Order matters and is fixed:
//! 1. nothing happens while paused or after game over
//! 2. spawner countdown (may add a wave)
//! 3. car, then coins, then obstacles move; off-screen obstacles are culled
//! 4. coin pickups, then the first obstacle hit ends the run
//! 5. the car wraps around the screen edges

use super::collision::collides;
use super::entities::Movable;
use super::state::{GameEvent, Session};

/// Advance the session by one frame
pub fn tick(session: &mut Session) {
    if session.paused || session.game_over {
        return;
    }

    session.time_ticks += 1;

    if let Some(wave) = session.spawner.tick() {
        session.push_event(GameEvent::WaveSpawned {
            pattern: wave.pattern_index,
            obstacles: wave.obstacles.len(),
            coin: wave.coin.is_some(),
        });
        session.obstacles.extend(wave.obstacles);
        session.coins.extend(wave.coin);
    }

    session.car.advance();

    for coin in &mut session.coins {
        coin.advance();
    }
    // Coins picked up last frame are dropped now
    session
        .coins
        .retain(|coin| !coin.is_collected() && !coin.is_offscreen());

    for obstacle in &mut session.obstacles {
        obstacle.advance();
    }
    let height = session.config.viewport_height;
    session
        .obstacles
        .retain(|obstacle| !obstacle.is_offscreen(height));

    resolve_collisions(session);

    session
        .car
        .wrap(session.config.viewport_width, session.config.viewport_height);
}

fn resolve_collisions(session: &mut Session) {
    let car = &session.car;
    let mut picked_up = Vec::new();

    for coin in session.coins.iter_mut().filter(|c| !c.is_collected()) {
        if collides(car, &*coin) {
            coin.collect();
            session.score += u64::from(coin.value);
            picked_up.push(coin.value);
            log::debug!("Coin +{} (score {})", coin.value, session.score);
        }
    }
    for value in picked_up {
        session.push_event(GameEvent::CoinCollected { value });
    }

    if session
        .obstacles
        .iter()
        .any(|obstacle| collides(&session.car, obstacle))
    {
        session.game_over = true;
        session.push_event(GameEvent::Crashed);
        log::info!(
            "Crashed after {} ticks, final score {}",
            session.time_ticks,
            session.score
        );
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::config::GameConfig;
    use crate::sim::entities::{Coin, Obstacle};

    fn session() -> Session {
        Session::new(GameConfig::default()).unwrap()
    }

    #[test]
    fn test_paused_session_is_frozen() {
        let mut s = session();
        s.on_forward(true);
        s.toggle_pause();
        let before = s.car().position();
        let countdown = s.spawner().ticks_until_spawn();
        for _ in 0..100 {
            s.tick();
        }
        assert_eq!(s.car().position(), before);
        assert_eq!(s.spawner().ticks_until_spawn(), countdown);
        assert_eq!(s.time_ticks(), 0);

        s.toggle_pause();
        s.tick();
        assert_ne!(s.car().position(), before);
        assert_eq!(s.spawner().ticks_until_spawn(), countdown - 1);
    }

    #[test]
    fn test_wave_lands_in_session() {
        let mut s = session();
        for _ in 0..s.spawner().interval_ticks() {
            s.tick();
        }
        let pattern = s.spawner().last_pattern().unwrap();
        let expected = s.config().patterns[pattern].iter().filter(|&&on| on).count();
        assert_eq!(s.obstacles().len(), expected);
        assert!(s.drain_events().iter().any(|e| matches!(
            e,
            GameEvent::WaveSpawned { obstacles, .. } if *obstacles == expected
        )));
    }

    #[test]
    fn test_coin_scored_once() {
        let mut s = session();
        let at = s.car().position();
        s.push_coin(Coin::from_config(at, s.config()));
        s.tick();
        assert_eq!(s.score(), 10);
        assert_eq!(s.live_coins().count(), 0);

        // Still overlapping the car next frame, but already spent
        s.tick();
        assert_eq!(s.score(), 10);
        assert!(s.coins().is_empty());
    }

    #[test]
    fn test_first_obstacle_hit_ends_run_once() {
        let mut s = session();
        // Car's nose pokes into the block
        let at = s.car().position() - Vec2::new(20.0, 0.0);
        s.push_obstacle(Obstacle::new(at, 40.0, 40.0, 4.0));
        s.push_obstacle(Obstacle::new(at, 40.0, 40.0, 4.0));
        s.tick();
        assert!(s.is_game_over());
        let crashes = s
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::Crashed)
            .count();
        assert_eq!(crashes, 1);

        s.tick();
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_coins_resolve_before_crash() {
        let mut s = session();
        let at = s.car().position();
        s.push_coin(Coin::from_config(at, s.config()));
        s.push_obstacle(Obstacle::new(at - Vec2::new(20.0, 0.0), 40.0, 40.0, 4.0));
        s.tick();
        assert!(s.is_game_over());
        assert_eq!(s.score(), 10);
    }

    #[test]
    fn test_offscreen_coin_culled() {
        let mut s = session();
        s.push_coin(Coin::from_config(Vec2::new(100.0, -30.0), s.config()));
        s.tick();
        assert!(s.coins().is_empty());
    }

    #[test]
    fn test_car_wraps_after_moving() {
        let config = GameConfig {
            car_start: Vec2::new(400.0, 300.0),
            car_start_rotation: 0.0,
            ..Default::default()
        };
        let mut s = Session::new(config).unwrap();
        let margin = s.car().wrap_margin();
        s.car_mut().body.position.x = 800.0 + margin;
        s.on_forward(true);
        s.tick();
        assert_eq!(s.car().position().x, -margin);
    }

    #[test]
    fn test_determinism() {
        let mut a = session();
        let mut b = session();
        for i in 0..400 {
            let steer = (i / 40) % 2 == 0;
            for s in [&mut a, &mut b] {
                s.on_turn_left(steer);
                s.on_turn_right(!steer);
                s.on_forward(i % 3 != 0);
                s.tick();
            }
        }
        assert_eq!(a.time_ticks(), b.time_ticks());
        assert_eq!(a.score(), b.score());
        assert_eq!(a.is_game_over(), b.is_game_over());
        assert_eq!(a.obstacles().len(), b.obstacles().len());
        assert_eq!(a.car().position(), b.car().position());
    }
}
