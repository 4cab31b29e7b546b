//! Vampire Chase entry point
//!
//! Headless native runner: loads settings, lets the autopilot (or nobody)
//! play at a fixed frame rate, logs frames and prints the final frame as JSON.
//!
//! Usage: `vampire-chase [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use vampire_chase::sim::GameEvent;
    use vampire_chase::{Game, LogSink, Settings, Snapshot};

    env_logger::init();
    log::info!("Vampire Chase (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };

    let mut game = Game::new(&settings);
    let mut sink = LogSink::default();
    let dt = 1.0 / settings.frame_rate as f32;
    let max_frames = settings.max_run_secs as u64 * settings.frame_rate as u64;

    log::info!(
        "Running up to {}s at {} fps (autopilot: {})",
        settings.max_run_secs,
        settings.frame_rate,
        game.autopilot
    );

    for _ in 0..max_frames {
        game.update(dt);
        for event in game.drain_events() {
            match event {
                GameEvent::LevelCleared { difficulty } => {
                    log::info!("Level cleared! Now at difficulty {}", difficulty)
                }
                GameEvent::TakeoutCollected { .. } => log::info!("Takeout! +5s"),
                other => log::debug!("{:?}", other),
            }
        }
        game.present(&mut sink);
        if game.state.game_over {
            break;
        }
    }

    if !game.state.game_over {
        log::info!("Run length reached with score {}", game.state.score);
    }

    match serde_json::to_string_pretty(&Snapshot::capture(&game.state)) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize final frame: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front-end in this crate
}
