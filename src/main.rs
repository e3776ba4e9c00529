//! Rally Chase headless runner
//!
//! Loads a level (the bundled one, or a JSON path given as the first
//! argument), starts a match from the title menu and lets the autopilot
//! drive at the fixed timestep until the match is over.

use std::path::PathBuf;
use std::process::ExitCode;

use rally_chase::consts::SIM_DT;
use rally_chase::scene::{
    GameOverScene, InputEvent, OptionsScene, PauseScene, PlayScene, SceneContext, SceneId,
    SceneMachine, TitleScene, TransitionPayload,
};
use rally_chase::sim::LevelDescriptor;
use rally_chase::ui::MenuInput;
use rally_chase::{DifficultyTable, JsonScoreStore, Settings};

const BUNDLED_LEVEL: &str = include_str!("../levels/level_01.json");

/// Ten minutes of simulated time
const MAX_TICKS: u32 = 60 * 60 * 10;

fn data_dir() -> PathBuf {
    std::env::var_os("RALLY_CHASE_DATA")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"))
}

fn load_level() -> Result<LevelDescriptor, String> {
    let Some(path) = std::env::args().nth(1) else {
        return LevelDescriptor::from_json(BUNDLED_LEVEL).map_err(|e| e.to_string());
    };
    let json = std::fs::read_to_string(&path).map_err(|e| format!("{path}: {e}"))?;
    LevelDescriptor::from_json(&json).map_err(|e| format!("{path}: {e}"))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Rally Chase (headless) starting...");

    let level = match load_level() {
        Ok(level) => level,
        Err(err) => {
            log::error!("Failed to load level: {err}");
            return ExitCode::FAILURE;
        }
    };

    let data = data_dir();
    let settings_path = data.join("config.json");
    let settings = Settings::load_from(&settings_path);
    let store = JsonScoreStore::new(data.join("highscore.json"));
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut ctx = SceneContext::new(settings, DifficultyTable::default(), level)
        .with_settings_path(settings_path);
    ctx.idle_mode = true;

    let mut machine = SceneMachine::new(ctx);
    machine
        .register(SceneId::Title, Box::new(TitleScene::new()))
        .register(SceneId::Options, Box::new(OptionsScene::new()))
        .register(SceneId::Playing, Box::new(PlayScene::new(Box::new(store), seed)))
        .register(SceneId::Paused, Box::new(PauseScene::new()))
        .register(SceneId::GameOver, Box::new(GameOverScene::new()));

    if let Err(err) = machine.request(SceneId::Title, TransitionPayload::None) {
        log::error!("{err}");
        return ExitCode::FAILURE;
    }
    machine.tick(SIM_DT);

    // "Start game"
    machine.handle_input(InputEvent::Menu(MenuInput::Select));

    let mut ticks = 0;
    while ticks < MAX_TICKS && !machine.quit_requested() {
        machine.tick(SIM_DT);
        for cue in machine.context_mut().audio.drain() {
            log::trace!("audio: {cue:?}");
        }
        if machine.current() == Some(SceneId::GameOver) {
            break;
        }
        if machine.current() == Some(SceneId::Title) && ticks > 0 {
            log::error!("Match could not be started");
            return ExitCode::FAILURE;
        }
        ticks += 1;
    }

    match machine.context().last_summary {
        Some(summary) => {
            println!(
                "{} after {:.1}s: score {} (best {}{}), flags {}/{}",
                if summary.victory { "Victory" } else { "Game over" },
                ticks as f32 * SIM_DT,
                summary.score,
                summary.best_score,
                if summary.new_best { ", new" } else { "" },
                summary.markers_collected,
                summary.markers_total
            );
            ExitCode::SUCCESS
        }
        None => {
            log::warn!("Match still running after {MAX_TICKS} ticks");
            ExitCode::SUCCESS
        }
    }
}
