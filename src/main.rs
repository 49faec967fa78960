//! Racer entry point
//!
//! Native builds run the simulation headlessly: a scripted driver weaves the
//! car across the road until it crashes or the tick budget runs out.
//!
//! Usage: `racer [seed] [max_ticks]`

use racer::renderer::{DrawList, render};
use racer::{Action, GameConfig, GameEvent, Session};

/// Default frame budget (about 30 seconds at 60 Hz)
const DEFAULT_MAX_TICKS: u64 = 1800;

fn main() {
    env_logger::init();
    log::info!("Racer (native headless) starting...");

    let mut args = std::env::args().skip(1);
    let defaults = GameConfig::default();
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(defaults.seed);
    let max_ticks = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_MAX_TICKS);

    let config = GameConfig { seed, ..defaults };
    let mut session = match Session::new(config) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Bad config: {}", e);
            std::process::exit(1);
        }
    };

    let mut frame = DrawList::default();
    let mut coins = 0u32;

    while session.time_ticks() < max_ticks && !session.is_game_over() {
        // Sweep left and right in 2 second phases, thrusting most of the time
        let phase = (session.time_ticks() / 120) % 2 == 0;
        session.apply(Action::TurnLeft, phase);
        session.apply(Action::TurnRight, !phase);
        session.apply(Action::Forward, session.time_ticks() % 4 != 0);

        session.tick();

        for event in session.drain_events() {
            if let GameEvent::CoinCollected { .. } = event {
                coins += 1;
            }
        }

        frame.clear();
        render(&session, &mut frame);
    }

    println!(
        "seed {}: {} after {} ticks, score {} ({} coins), {} draw calls in last frame",
        seed,
        if session.is_game_over() { "crashed" } else { "survived" },
        session.time_ticks(),
        session.score(),
        coins,
        frame.commands.len()
    );
}
