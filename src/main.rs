//! Drift Rocks entry point
//!
//! No OS window backend is linked: the native build runs the game loop
//! against a scripted headless surface at real-time pace and logs the result.
//!
//! Usage: `drift-rocks [config.json]`

use std::path::Path;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use drift_rocks::platform::{HeadlessWindow, Key, ScriptAction};
use drift_rocks::{ConfigError, Game, GameConfig};

/// Seconds of play in the headless demo
const DEMO_SECONDS: f32 = 20.0;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Drift Rocks (native) starting...");

    let config = match load_config(std::env::args().nth(1).as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    log::info!("Game initialized with seed: {seed}");

    let mut window = autopilot(&config);
    let mut game = Game::new(config, seed).with_pacing(true);
    let frames = game.run(&mut window);

    let state = game.state();
    log::info!(
        "Finished {frames} frames: score {}, wave {}, lives {}",
        state.score,
        state.wave_index + 1,
        state.lives
    );
    log::debug!(
        "Last frame: {} drawables, {} line vertices",
        window.last_frame().len(),
        window.last_vertices().len()
    );
    ExitCode::SUCCESS
}

/// Defaults without a path; a path that does not exist falls back to
/// defaults, anything unreadable or invalid is fatal.
fn load_config(path: Option<&str>) -> Result<GameConfig, ConfigError> {
    let Some(path) = path else {
        log::info!("No config file given, using defaults");
        return Ok(GameConfig::default());
    };
    if !Path::new(path).exists() {
        log::warn!("Config file {path} not found, using defaults");
        return Ok(GameConfig::default());
    }
    GameConfig::load(path)
}

/// Scripted input: spin, thrust, keep the trigger down, and pause once
fn autopilot(config: &GameConfig) -> HeadlessWindow {
    let rate = config.tick_rate;
    let frame = |seconds: f32| (seconds * rate) as u64;
    let size = (config.arena.width as u32, config.arena.height as u32);

    HeadlessWindow::new(size)
        .hold(Key::Space, 0, frame(DEMO_SECONDS))
        .hold(Key::Right, frame(0.5), frame(1.5))
        .hold(Key::Up, frame(1.0), frame(2.5))
        .hold(Key::Left, frame(4.0), frame(4.5))
        .hold(Key::Down, frame(5.0), frame(5.5))
        .at(frame(8.0), ScriptAction::Press(Key::P))
        .at(frame(8.1), ScriptAction::Release(Key::P))
        .at(frame(9.0), ScriptAction::Press(Key::P))
        .at(frame(9.1), ScriptAction::Release(Key::P))
        .hold(Key::Up, frame(12.0), frame(13.0))
        .at(frame(DEMO_SECONDS), ScriptAction::Close)
}
