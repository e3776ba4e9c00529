//! Scene state machine
//!
//! Scenes are registered under a `SceneId` and driven through the `Scene`
//! trait. A transition is only ever recorded as pending; the swap
//! (exit old, enter new with its payload) happens at the start of the next
//! `tick`, never inside input handling.

mod game_over;
mod options;
mod pause;
mod play;
mod title;

use std::collections::HashMap;
use std::path::PathBuf;

use glam::Vec2;
use thiserror::Error;

use crate::audio::AudioQueue;
use crate::settings::Settings;
use crate::sim::{LevelDescriptor, MatchSummary};
use crate::tuning::{DifficultySettings, DifficultyTable};
use crate::ui::MenuInput;

pub use game_over::GameOverScene;
pub use options::OptionsScene;
pub use pause::PauseScene;
pub use play::PlayScene;
pub use title::TitleScene;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    Title,
    Options,
    Playing,
    Paused,
    GameOver,
}

/// Data handed to a scene as it is entered
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TransitionPayload {
    #[default]
    None,
    /// Start a fresh match
    NewMatch,
    /// Continue the match that was paused
    Resume,
    /// Where Back should return to
    Options { from_title: bool },
    GameOver(MatchSummary),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SceneCommand {
    #[default]
    None,
    SwitchTo(SceneId, TransitionPayload),
    Quit,
}

/// Decoded input, already translated from device events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Menu(MenuInput),
    /// Escape / back out
    Back,
    Pause,
    /// Held steering, -1/0/1 per axis
    Steer(Vec2),
    Smoke,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("no scene registered for {0:?}")]
    Unregistered(SceneId),
}

/// Services shared by every scene
#[derive(Debug)]
pub struct SceneContext {
    pub settings: Settings,
    /// Where settings are saved; `None` keeps them in memory only
    pub settings_path: Option<PathBuf>,
    pub difficulty: DifficultyTable,
    pub level: LevelDescriptor,
    pub audio: AudioQueue,
    /// Let the autopilot drive matches
    pub idle_mode: bool,
    /// Outcome of the most recently finished match
    pub last_summary: Option<MatchSummary>,
}

impl SceneContext {
    pub fn new(settings: Settings, difficulty: DifficultyTable, level: LevelDescriptor) -> Self {
        let mut audio = AudioQueue::new();
        audio.apply_settings(&settings);
        Self {
            settings,
            settings_path: None,
            difficulty,
            level,
            audio,
            idle_mode: false,
            last_summary: None,
        }
    }

    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    /// Tier values for the currently selected difficulty
    pub fn difficulty_settings(&self) -> DifficultySettings {
        *self.difficulty.get(self.settings.difficulty)
    }

    /// Persist settings; failures are logged, never fatal
    pub fn save_settings(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(err) = self.settings.save_to(path) {
            log::error!("Failed to save settings: {err}");
        }
    }
}

pub trait Scene {
    fn on_enter(&mut self, payload: TransitionPayload, ctx: &mut SceneContext);
    fn on_exit(&mut self, _ctx: &mut SceneContext) {}
    fn tick(&mut self, _dt: f32, _ctx: &mut SceneContext) -> SceneCommand {
        SceneCommand::None
    }
    fn handle_input(&mut self, event: InputEvent, ctx: &mut SceneContext) -> SceneCommand;
}

pub struct SceneMachine {
    scenes: HashMap<SceneId, Box<dyn Scene>>,
    current: Option<SceneId>,
    pending: Option<(SceneId, TransitionPayload)>,
    quit: bool,
    ctx: SceneContext,
}

impl SceneMachine {
    pub fn new(ctx: SceneContext) -> Self {
        Self {
            scenes: HashMap::new(),
            current: None,
            pending: None,
            quit: false,
            ctx,
        }
    }

    /// Register (or replace) the scene for an id
    pub fn register(&mut self, id: SceneId, scene: Box<dyn Scene>) -> &mut Self {
        self.scenes.insert(id, scene);
        self
    }

    /// Queue a transition for the next tick
    ///
    /// An unregistered id is rejected and the current scene stays active.
    pub fn request(&mut self, id: SceneId, payload: TransitionPayload) -> Result<(), SceneError> {
        if !self.scenes.contains_key(&id) {
            log::warn!("Ignoring transition to unregistered scene {id:?}");
            return Err(SceneError::Unregistered(id));
        }
        self.pending = Some((id, payload));
        Ok(())
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        let Some(id) = self.current else {
            return;
        };
        let Some(scene) = self.scenes.get_mut(&id) else {
            return;
        };
        let command = scene.handle_input(event, &mut self.ctx);
        self.apply(command);
    }

    /// Apply a pending swap, then tick the current scene
    pub fn tick(&mut self, dt: f32) {
        if let Some((next, payload)) = self.pending.take() {
            self.swap(next, payload);
        }

        let Some(id) = self.current else {
            return;
        };
        let Some(scene) = self.scenes.get_mut(&id) else {
            return;
        };
        let command = scene.tick(dt, &mut self.ctx);
        self.apply(command);
    }

    fn swap(&mut self, next: SceneId, payload: TransitionPayload) {
        if let Some(old) = self.current.and_then(|id| self.scenes.get_mut(&id)) {
            old.on_exit(&mut self.ctx);
        }
        log::info!("Scene {:?} -> {next:?}", self.current);
        self.current = Some(next);
        if let Some(scene) = self.scenes.get_mut(&next) {
            scene.on_enter(payload, &mut self.ctx);
        }
    }

    fn apply(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::None => {}
            SceneCommand::SwitchTo(id, payload) => {
                if let Err(err) = self.request(id, payload) {
                    log::debug!("Staying on {:?}: {err}", self.current);
                }
            }
            SceneCommand::Quit => {
                log::info!("Quit requested");
                self.quit = true;
            }
        }
    }

    pub fn current(&self) -> Option<SceneId> {
        self.current
    }

    pub fn pending(&self) -> Option<SceneId> {
        self.pending.map(|(id, _)| id)
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn context(&self) -> &SceneContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut SceneContext {
        &mut self.ctx
    }
}
