//! Headless bot-vs-bot match runner
//!
//! Exercises the full engine with no rendering: two bots, one ball, fixed
//! speed. Useful for soak-testing the resolver and for reproducing a match
//! from a seed. Run with `RUST_LOG=debug` for the per-bounce trace.

use plane_pong::sim::{GameEvent, Model, PlayerSlot};
use plane_pong::Settings;

const MAX_TICKS: u64 = 1_000_000;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC0FFEE);

    let settings = Settings::default();
    let mut model = Model::new(&settings, &[PlayerSlot::Bot, PlayerSlot::Bot], seed);
    println!("match seed: {seed}");

    while model.is_running() {
        if model.tick_count() >= MAX_TICKS {
            eprintln!("tick limit reached at score {:?}", model.score());
            break;
        }
        let events = match model.update(1.0) {
            Ok(events) => events,
            Err(err) => {
                eprintln!("simulation aborted after {} ticks: {err}", model.tick_count());
                std::process::exit(1);
            }
        };
        for event in events {
            match event {
                GameEvent::Goal { net_id, .. } => {
                    println!(
                        "tick {:>7}: goal on net {} -> score {:?}",
                        model.tick_count(),
                        net_id,
                        model.score()
                    );
                }
                GameEvent::GameOver { winner } => {
                    println!(
                        "tick {:>7}: player {} wins {:?}",
                        model.tick_count(),
                        winner + 1,
                        model.score()
                    );
                }
                GameEvent::Kickoff { .. } | GameEvent::Bounce { .. } => {}
            }
        }
    }
}
