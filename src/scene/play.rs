//! In-match scene wrapping the round driver

use glam::Vec2;

use super::{InputEvent, Scene, SceneCommand, SceneContext, SceneId, TransitionPayload};
use crate::audio::SoundEffect;
use crate::consts::INITIAL_LIVES;
use crate::highscores::ScoreStore;
use crate::sim::{GameEvent, MatchWorld, Round, Session, TickInput, tick};

/// The match itself
///
/// The round lives in the scene, so pausing and resuming keeps it intact.
pub struct PlayScene {
    round: Round,
    steer: Vec2,
    smoke: bool,
    /// The level could not be loaded; bail out to the title
    failed: bool,
}

impl PlayScene {
    pub fn new(store: Box<dyn ScoreStore>, seed: u64) -> Self {
        let session = Session::new(INITIAL_LIVES, store);
        Self {
            round: Round::new(MatchWorld::new(seed), session),
            steer: Vec2::ZERO,
            smoke: false,
            failed: false,
        }
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    fn start_match(&mut self, ctx: &mut SceneContext) {
        self.steer = Vec2::ZERO;
        self.smoke = false;
        let difficulty = ctx.difficulty_settings();
        match self.round.restart(&ctx.level, &difficulty) {
            Ok(()) => {
                self.failed = false;
                log::info!("Match started on {}", ctx.settings.difficulty.as_str());
                ctx.audio.play_loop(SoundEffect::Music);
                ctx.audio.play_loop(SoundEffect::Engine);
            }
            Err(err) => {
                log::error!("Cannot start match: {err}");
                self.failed = true;
            }
        }
    }
}

/// -1/0/1
fn axis(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

impl Scene for PlayScene {
    fn on_enter(&mut self, payload: TransitionPayload, ctx: &mut SceneContext) {
        match payload {
            TransitionPayload::Resume if !self.round.is_finished() => {
                self.steer = Vec2::ZERO;
                self.smoke = false;
                ctx.audio.play_loop(SoundEffect::Engine);
            }
            _ => self.start_match(ctx),
        }
    }

    fn on_exit(&mut self, ctx: &mut SceneContext) {
        ctx.audio.stop(SoundEffect::Engine);
    }

    fn tick(&mut self, dt: f32, ctx: &mut SceneContext) -> SceneCommand {
        if self.failed {
            return SceneCommand::SwitchTo(SceneId::Title, TransitionPayload::None);
        }

        let input = TickInput {
            intent: self.steer,
            smoke: std::mem::take(&mut self.smoke),
            idle_mode: ctx.idle_mode,
        };
        let events = tick(&mut self.round, &input, dt);
        for event in &events {
            log::debug!("{event:?}");
        }
        if events.contains(&GameEvent::Victory) {
            ctx.audio.stop(SoundEffect::Engine);
        }
        ctx.audio.play_events(&events);

        if self.round.is_finished() {
            let summary = self.round.summary();
            ctx.last_summary = Some(summary);
            return SceneCommand::SwitchTo(SceneId::GameOver, TransitionPayload::GameOver(summary));
        }
        SceneCommand::None
    }

    fn handle_input(&mut self, event: InputEvent, ctx: &mut SceneContext) -> SceneCommand {
        match event {
            InputEvent::Steer(dir) => {
                self.steer = Vec2::new(axis(dir.x), axis(dir.y));
                SceneCommand::None
            }
            InputEvent::Smoke => {
                self.smoke = true;
                SceneCommand::None
            }
            InputEvent::Pause | InputEvent::Back => {
                ctx.audio.pause_music();
                SceneCommand::SwitchTo(SceneId::Paused, TransitionPayload::None)
            }
            InputEvent::Menu(_) => SceneCommand::None,
        }
    }
}
