//! Brickbreak entry point
//!
//! Runs a scripted headless session: confirm from the menu, launch the ball,
//! keep the paddle under it. Sound cues go to the log and the last frame is
//! printed as JSON.
//!
//! Usage: `brickbreak [config.json]`

use std::path::{Path, PathBuf};

use anyhow::Context;

use brickbreak::audio::{AudioManager, LogSink};
use brickbreak::input::{InputState, Key};
use brickbreak::render::FrameSnapshot;
use brickbreak::sim::{GameMode, GameState, tick};
use brickbreak::{Config, Level};

const SIM_DT: f32 = 1.0 / 60.0;

/// Paddle stops steering when the ball is this close to its center
const TRACK_DEADZONE: f32 = 8.0;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let (config, base_dir) = match &config_path {
        Some(path) => (
            Config::load(path),
            path.parent().map(Path::to_path_buf).unwrap_or_default(),
        ),
        None => (Config::default(), PathBuf::new()),
    };

    let levels = load_levels(&config, &base_dir)?;
    log::info!(
        "Brickbreak starting: {} levels, seed {:#x}",
        levels.len(),
        config.seed
    );

    let mut audio = AudioManager::new(LogSink);
    audio.set_master_volume(config.master_volume);
    audio.set_sfx_volume(config.sfx_volume);
    audio.set_muted(config.muted);

    let mut state = GameState::new(&config, levels).context("starting session")?;
    let mut input = InputState::new();

    for _ in 0..config.frames {
        script_input(&state, &mut input);
        tick(&mut state, &mut input, SIM_DT);
        audio.dispatch(&state.drain_events());
    }

    let snapshot = FrameSnapshot::capture(&state);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn load_levels(config: &Config, base_dir: &Path) -> anyhow::Result<Vec<Level>> {
    let mut levels = Vec::with_capacity(config.levels.len());
    for path in &config.levels {
        let path = base_dir.join(path);
        let level = Level::load(&path, config.width, config.level_height())
            .with_context(|| format!("loading level {}", path.display()))?;
        levels.push(level);
    }
    Ok(levels)
}

/// One-shot keys are toggled every other frame so each press registers
fn script_input(state: &GameState, input: &mut InputState) {
    let field = &state.field;

    let wants_confirm = state.mode != GameMode::Active;
    input.set(Key::Confirm, wants_confirm && !input.is_held(Key::Confirm));

    let wants_launch = state.mode == GameMode::Active && field.ball.stuck;
    input.set(Key::Launch, wants_launch && !input.is_held(Key::Launch));

    let paddle_center = field.paddle.pos.x + field.paddle.size.x / 2.0;
    let offset = field.ball.center().x - paddle_center;
    input.set(Key::Left, !field.ball.stuck && offset < -TRACK_DEADZONE);
    input.set(Key::Right, !field.ball.stuck && offset > TRACK_DEADZONE);
}
