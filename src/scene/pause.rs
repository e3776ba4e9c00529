//! Pause overlay

use super::{InputEvent, Scene, SceneCommand, SceneContext, SceneId, TransitionPayload};
use crate::audio::SoundEffect;
use crate::ui::{Menu, MenuOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PauseAction {
    Continue,
    Options,
    QuitToTitle,
}

/// Overlay menu while a match is suspended
pub struct PauseScene {
    menu: Menu<PauseAction>,
}

impl Default for PauseScene {
    fn default() -> Self {
        Self::new()
    }
}

impl PauseScene {
    pub fn new() -> Self {
        let mut menu = Menu::new();
        menu.add_button("Continue", PauseAction::Continue)
            .add_button("Options", PauseAction::Options)
            .add_button("Quit to title", PauseAction::QuitToTitle);
        Self { menu }
    }

    fn resume(ctx: &mut SceneContext) -> SceneCommand {
        ctx.audio.resume_music();
        SceneCommand::SwitchTo(SceneId::Playing, TransitionPayload::Resume)
    }
}

impl Scene for PauseScene {
    fn on_enter(&mut self, _payload: TransitionPayload, _ctx: &mut SceneContext) {
        self.menu.reset();
    }

    fn handle_input(&mut self, event: InputEvent, ctx: &mut SceneContext) -> SceneCommand {
        let input = match event {
            InputEvent::Back | InputEvent::Pause => return Self::resume(ctx),
            InputEvent::Menu(input) => input,
            _ => return SceneCommand::None,
        };
        match self.menu.handle(input, &mut ctx.audio) {
            Some(MenuOutcome::Activated(PauseAction::Continue)) => Self::resume(ctx),
            Some(MenuOutcome::Activated(PauseAction::Options)) => SceneCommand::SwitchTo(
                SceneId::Options,
                TransitionPayload::Options { from_title: false },
            ),
            Some(MenuOutcome::Activated(PauseAction::QuitToTitle)) => {
                ctx.audio.stop(SoundEffect::Music);
                SceneCommand::SwitchTo(SceneId::Title, TransitionPayload::None)
            }
            _ => SceneCommand::None,
        }
    }
}
