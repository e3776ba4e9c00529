//! Result screen shown when a round finishes

use super::{InputEvent, Scene, SceneCommand, SceneContext, SceneId, TransitionPayload};
use crate::sim::MatchSummary;
use crate::ui::{Menu, MenuOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameOverAction {
    PlayAgain,
    Title,
}

/// Final score screen
pub struct GameOverScene {
    menu: Menu<GameOverAction>,
    summary: Option<MatchSummary>,
}

impl Default for GameOverScene {
    fn default() -> Self {
        Self::new()
    }
}

impl GameOverScene {
    pub fn new() -> Self {
        let mut menu = Menu::new();
        menu.add_button("Play again", GameOverAction::PlayAgain)
            .add_button("Back to title", GameOverAction::Title);
        Self {
            menu,
            summary: None,
        }
    }

    pub fn summary(&self) -> Option<&MatchSummary> {
        self.summary.as_ref()
    }

    /// Headline for the screen
    pub fn title(&self) -> &'static str {
        match self.summary {
            Some(summary) if summary.victory => "VICTORY!",
            _ => "GAME OVER",
        }
    }
}

impl Scene for GameOverScene {
    fn on_enter(&mut self, payload: TransitionPayload, _ctx: &mut SceneContext) {
        self.summary = match payload {
            TransitionPayload::GameOver(summary) => Some(summary),
            _ => None,
        };
        if let Some(s) = self.summary {
            log::info!(
                "{}: score {:06} best {:06}{}",
                self.title(),
                s.score,
                s.best_score,
                if s.new_best { " (new best)" } else { "" }
            );
        }
        self.menu.reset();
    }

    fn handle_input(&mut self, event: InputEvent, ctx: &mut SceneContext) -> SceneCommand {
        let InputEvent::Menu(input) = event else {
            return SceneCommand::None;
        };
        match self.menu.handle(input, &mut ctx.audio) {
            Some(MenuOutcome::Activated(GameOverAction::PlayAgain)) => {
                SceneCommand::SwitchTo(SceneId::Playing, TransitionPayload::NewMatch)
            }
            Some(MenuOutcome::Activated(GameOverAction::Title)) => {
                SceneCommand::SwitchTo(SceneId::Title, TransitionPayload::None)
            }
            _ => SceneCommand::None,
        }
    }
}
