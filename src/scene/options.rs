//! Options screen
//!
//! Edits difficulty, volumes and display flags in place and saves after every
//! change. Back returns to whichever screen opened it.

use super::{InputEvent, Scene, SceneCommand, SceneContext, SceneId, TransitionPayload};
use crate::tuning::Difficulty;
use crate::ui::{Menu, MenuOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionsItem {
    Difficulty,
    Music,
    Sfx,
    Fullscreen,
    Vsync,
    Back,
}

/// Settings editor; every change is saved right away
pub struct OptionsScene {
    menu: Menu<OptionsItem>,
    from_title: bool,
}

impl Default for OptionsScene {
    fn default() -> Self {
        Self::new()
    }
}

fn difficulty_label(tier: Difficulty) -> String {
    format!("Difficulty: < {} >", tier.as_str())
}

impl OptionsScene {
    pub fn new() -> Self {
        let mut menu = Menu::new();
        menu.add_button(difficulty_label(Difficulty::Normal), OptionsItem::Difficulty)
            .add_slider("Music", OptionsItem::Music, 0.0, 1.0, 0.7)
            .add_slider("Effects", OptionsItem::Sfx, 0.0, 1.0, 0.8)
            .add_toggle("Fullscreen", OptionsItem::Fullscreen, false)
            .add_toggle("VSync", OptionsItem::Vsync, true)
            .add_button("Back", OptionsItem::Back);
        Self {
            menu,
            from_title: true,
        }
    }

    fn back(&self) -> SceneCommand {
        if self.from_title {
            SceneCommand::SwitchTo(SceneId::Title, TransitionPayload::None)
        } else {
            SceneCommand::SwitchTo(SceneId::Paused, TransitionPayload::None)
        }
    }
}

impl Scene for OptionsScene {
    fn on_enter(&mut self, payload: TransitionPayload, ctx: &mut SceneContext) {
        self.from_title = match payload {
            TransitionPayload::Options { from_title } => from_title,
            _ => true,
        };
        self.menu.reset();

        // Mirror whatever is current
        let s = &ctx.settings;
        self.menu
            .set_label(OptionsItem::Difficulty, difficulty_label(s.difficulty));
        self.menu.set_slider(OptionsItem::Music, s.music_volume);
        self.menu.set_slider(OptionsItem::Sfx, s.sfx_volume);
        self.menu.set_toggle(OptionsItem::Fullscreen, s.fullscreen);
        self.menu.set_toggle(OptionsItem::Vsync, s.vsync);
    }

    fn handle_input(&mut self, event: InputEvent, ctx: &mut SceneContext) -> SceneCommand {
        let input = match event {
            InputEvent::Back => return self.back(),
            InputEvent::Menu(input) => input,
            _ => return SceneCommand::None,
        };

        let Some(outcome) = self.menu.handle(input, &mut ctx.audio) else {
            return SceneCommand::None;
        };
        match outcome {
            MenuOutcome::Activated(OptionsItem::Back) => return self.back(),
            MenuOutcome::Activated(OptionsItem::Difficulty) => {
                ctx.settings.difficulty = ctx.settings.difficulty.cycle();
                self.menu.set_label(
                    OptionsItem::Difficulty,
                    difficulty_label(ctx.settings.difficulty),
                );
            }
            MenuOutcome::SliderChanged {
                id: OptionsItem::Music,
                value,
            } => ctx.settings.music_volume = value,
            MenuOutcome::SliderChanged {
                id: OptionsItem::Sfx,
                value,
            } => ctx.settings.sfx_volume = value,
            MenuOutcome::ToggleChanged {
                id: OptionsItem::Fullscreen,
                value,
            } => ctx.settings.fullscreen = value,
            MenuOutcome::ToggleChanged {
                id: OptionsItem::Vsync,
                value,
            } => ctx.settings.vsync = value,
            _ => return SceneCommand::None,
        }

        let settings = ctx.settings.clone();
        ctx.audio.apply_settings(&settings);
        ctx.save_settings();
        SceneCommand::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::LevelDescriptor;
    use crate::tuning::DifficultyTable;
    use crate::ui::MenuInput;

    fn ctx(path: &std::path::Path) -> SceneContext {
        let level = LevelDescriptor {
            grid: vec![vec![0]],
            player_spawn: [0, 0],
            pursuer_spawns: Vec::new(),
            markers: Vec::new(),
            time_limit: 1.0,
        };
        SceneContext::new(Settings::default(), DifficultyTable::default(), level)
            .with_settings_path(path)
    }

    fn press(scene: &mut OptionsScene, ctx: &mut SceneContext, input: MenuInput) -> SceneCommand {
        scene.handle_input(InputEvent::Menu(input), ctx)
    }

    #[test]
    fn test_changes_are_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut ctx = ctx(&path);
        let mut scene = OptionsScene::new();
        scene.on_enter(TransitionPayload::Options { from_title: true }, &mut ctx);

        press(&mut scene, &mut ctx, MenuInput::Select);
        assert_eq!(ctx.settings.difficulty, Difficulty::Hard);

        press(&mut scene, &mut ctx, MenuInput::Down);
        press(&mut scene, &mut ctx, MenuInput::Left);
        assert!((ctx.settings.music_volume - 0.6).abs() < 1e-5);

        press(&mut scene, &mut ctx, MenuInput::Down);
        press(&mut scene, &mut ctx, MenuInput::Down);
        press(&mut scene, &mut ctx, MenuInput::Select);
        assert!(ctx.settings.fullscreen);

        let saved = Settings::load_from(&path);
        assert_eq!(saved, ctx.settings);
    }

    #[test]
    fn test_back_routes_by_origin() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ctx(&dir.path().join("config.json"));
        let mut scene = OptionsScene::new();

        scene.on_enter(TransitionPayload::Options { from_title: false }, &mut ctx);
        assert_eq!(
            scene.handle_input(InputEvent::Back, &mut ctx),
            SceneCommand::SwitchTo(SceneId::Paused, TransitionPayload::None)
        );

        scene.on_enter(TransitionPayload::Options { from_title: true }, &mut ctx);
        press(&mut scene, &mut ctx, MenuInput::Up);
        assert_eq!(
            press(&mut scene, &mut ctx, MenuInput::Select),
            SceneCommand::SwitchTo(SceneId::Title, TransitionPayload::None)
        );
    }

    #[test]
    fn test_enter_mirrors_settings() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ctx(&dir.path().join("config.json"));
        ctx.settings.vsync = false;
        ctx.settings.difficulty = Difficulty::Easy;
        let mut scene = OptionsScene::new();
        scene.on_enter(TransitionPayload::None, &mut ctx);

        // Vsync is the fifth item; selecting flips the mirrored value back on
        for _ in 0..4 {
            press(&mut scene, &mut ctx, MenuInput::Down);
        }
        press(&mut scene, &mut ctx, MenuInput::Select);
        assert!(ctx.settings.vsync);

        // Nothing about difficulty was touched
        assert_eq!(ctx.settings.difficulty, Difficulty::Easy);
    }
}
