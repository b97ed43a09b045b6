//! Asteroids: runs a scripted headless session and logs what happened

use actor_engine::foundation::logging;
use actor_engine::prelude::Config;
use asteroids::config::GameConfig;
use asteroids::game::{Game, Script};
use std::process::ExitCode;

const CONFIG_PATH: &str = "asteroids.toml";
const TICK_RATE: f32 = 60.0;
const SESSION_SECONDS: f32 = 10.0;

fn main() -> ExitCode {
    logging::init();

    let config = match GameConfig::load_or_default(CONFIG_PATH) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Failed to load {CONFIG_PATH}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut game = match Game::new(&config) {
        Ok(game) => game,
        Err(err) => {
            log::error!("Failed to set up the game: {err}");
            return ExitCode::FAILURE;
        }
    };

    let summary = game.run_script(&Script::demo(), TICK_RATE, SESSION_SECONDS);
    log::info!("Session over: {summary}");
    ExitCode::SUCCESS
}
