//! Title screen: start a match, open options or quit

use super::{InputEvent, Scene, SceneCommand, SceneContext, SceneId, TransitionPayload};
use crate::audio::SoundEffect;
use crate::ui::{Menu, MenuOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TitleAction {
    Start,
    Options,
    Quit,
}

/// Start / Options / Quit
pub struct TitleScene {
    menu: Menu<TitleAction>,
}

impl Default for TitleScene {
    fn default() -> Self {
        Self::new()
    }
}

impl TitleScene {
    pub fn new() -> Self {
        let mut menu = Menu::new();
        menu.add_button("Start game", TitleAction::Start)
            .add_button("Options", TitleAction::Options)
            .add_button("Quit", TitleAction::Quit);
        Self { menu }
    }
}

impl Scene for TitleScene {
    fn on_enter(&mut self, _payload: TransitionPayload, ctx: &mut SceneContext) {
        ctx.audio.play_loop(SoundEffect::Music);
        self.menu.reset();
    }

    fn handle_input(&mut self, event: InputEvent, ctx: &mut SceneContext) -> SceneCommand {
        let InputEvent::Menu(input) = event else {
            return SceneCommand::None;
        };
        match self.menu.handle(input, &mut ctx.audio) {
            Some(MenuOutcome::Activated(TitleAction::Start)) => {
                SceneCommand::SwitchTo(SceneId::Playing, TransitionPayload::NewMatch)
            }
            Some(MenuOutcome::Activated(TitleAction::Options)) => SceneCommand::SwitchTo(
                SceneId::Options,
                TransitionPayload::Options { from_title: true },
            ),
            Some(MenuOutcome::Activated(TitleAction::Quit)) => SceneCommand::Quit,
            _ => SceneCommand::None,
        }
    }
}
