//! Keyboard-navigable menu
//!
//! The widget set is closed (button, slider, toggle). Instead of callbacks a
//! menu hands back a `MenuOutcome` tagged with the caller's own action type.

use crate::audio::{AudioQueue, SoundEffect};

/// Fraction of a slider's range moved per adjust step
pub const SLIDER_STEP: f32 = 0.1;

/// Decoded menu input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    Up,
    Down,
    Left,
    Right,
    Select,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Widget<A> {
    Button {
        label: String,
        action: A,
    },
    Slider {
        label: String,
        value: f32,
        min: f32,
        max: f32,
        id: A,
    },
    Toggle {
        label: String,
        value: bool,
        id: A,
    },
}

impl<A> Widget<A> {
    pub fn label(&self) -> &str {
        match self {
            Widget::Button { label, .. }
            | Widget::Slider { label, .. }
            | Widget::Toggle { label, .. } => label,
        }
    }
}

/// What a menu interaction produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuOutcome<A> {
    Activated(A),
    SliderChanged { id: A, value: f32 },
    ToggleChanged { id: A, value: bool },
}

#[derive(Debug, Clone)]
pub struct Menu<A> {
    items: Vec<Widget<A>>,
    selected: usize,
}

impl<A> Default for Menu<A> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
        }
    }
}

impl<A: Copy + PartialEq> Menu<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_button(&mut self, label: impl Into<String>, action: A) -> &mut Self {
        self.items.push(Widget::Button {
            label: label.into(),
            action,
        });
        self
    }

    pub fn add_slider(
        &mut self,
        label: impl Into<String>,
        id: A,
        min: f32,
        max: f32,
        value: f32,
    ) -> &mut Self {
        self.items.push(Widget::Slider {
            label: label.into(),
            value: value.clamp(min, max),
            min,
            max,
            id,
        });
        self
    }

    pub fn add_toggle(&mut self, label: impl Into<String>, id: A, value: bool) -> &mut Self {
        self.items.push(Widget::Toggle {
            label: label.into(),
            value,
            id,
        });
        self
    }

    pub fn items(&self) -> &[Widget<A>] {
        &self.items
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&Widget<A>> {
        self.items.get(self.selected)
    }

    /// Move the selection, wrapping at both ends
    pub fn navigate(&mut self, direction: i32, audio: &mut AudioQueue) {
        if self.items.is_empty() {
            return;
        }
        let len = self.items.len() as i32;
        self.selected = (self.selected as i32 + direction).rem_euclid(len) as usize;
        audio.play(SoundEffect::UiMove);
    }

    /// Left/right on the selected item: sliders step, toggles flip
    pub fn adjust(&mut self, direction: i32, audio: &mut AudioQueue) -> Option<MenuOutcome<A>> {
        match self.items.get_mut(self.selected)? {
            Widget::Slider {
                value, min, max, id, ..
            } => {
                let step = (*max - *min) * SLIDER_STEP * direction as f32;
                *value = (*value + step).clamp(*min, *max);
                audio.play(SoundEffect::UiMove);
                Some(MenuOutcome::SliderChanged {
                    id: *id,
                    value: *value,
                })
            }
            Widget::Toggle { value, id, .. } => {
                *value = !*value;
                audio.play(SoundEffect::UiSelect);
                Some(MenuOutcome::ToggleChanged {
                    id: *id,
                    value: *value,
                })
            }
            Widget::Button { .. } => None,
        }
    }

    /// Confirm on the selected item: buttons activate, toggles flip
    pub fn select(&mut self, audio: &mut AudioQueue) -> Option<MenuOutcome<A>> {
        match self.items.get_mut(self.selected)? {
            Widget::Button { action, .. } => {
                audio.play(SoundEffect::UiSelect);
                Some(MenuOutcome::Activated(*action))
            }
            Widget::Toggle { value, id, .. } => {
                *value = !*value;
                audio.play(SoundEffect::UiSelect);
                Some(MenuOutcome::ToggleChanged {
                    id: *id,
                    value: *value,
                })
            }
            Widget::Slider { .. } => None,
        }
    }

    pub fn handle(&mut self, input: MenuInput, audio: &mut AudioQueue) -> Option<MenuOutcome<A>> {
        match input {
            MenuInput::Up => {
                self.navigate(-1, audio);
                None
            }
            MenuInput::Down => {
                self.navigate(1, audio);
                None
            }
            MenuInput::Left => self.adjust(-1, audio),
            MenuInput::Right => self.adjust(1, audio),
            MenuInput::Select => self.select(audio),
        }
    }

    /// Back to the first item
    pub fn reset(&mut self) {
        self.selected = 0;
    }

    /// Overwrite a slider's value without emitting an outcome
    pub fn set_slider(&mut self, target: A, new_value: f32) {
        for item in &mut self.items {
            if let Widget::Slider {
                value, min, max, id, ..
            } = item
            {
                if *id == target {
                    *value = new_value.clamp(*min, *max);
                }
            }
        }
    }

    /// Overwrite a toggle's value without emitting an outcome
    pub fn set_toggle(&mut self, target: A, new_value: bool) {
        for item in &mut self.items {
            if let Widget::Toggle { value, id, .. } = item {
                if *id == target {
                    *value = new_value;
                }
            }
        }
    }

    /// Relabel a button (e.g. a cycling choice)
    pub fn set_label(&mut self, target: A, new_label: impl Into<String>) {
        let new_label = new_label.into();
        for item in &mut self.items {
            if let Widget::Button { label, action } = item {
                if *action == target {
                    *label = new_label.clone();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Item {
        Go,
        Volume,
        Flag,
    }

    fn menu() -> Menu<Item> {
        let mut menu = Menu::new();
        menu.add_button("Go", Item::Go)
            .add_slider("Volume", Item::Volume, 0.0, 1.0, 0.95)
            .add_toggle("Flag", Item::Flag, false);
        menu
    }

    #[test]
    fn test_navigation_wraps() {
        let mut audio = AudioQueue::new();
        let mut m = menu();
        m.navigate(-1, &mut audio);
        assert_eq!(m.selected_index(), 2);
        m.navigate(1, &mut audio);
        assert_eq!(m.selected_index(), 0);
        assert_eq!(audio.drain().len(), 2);
    }

    #[test]
    fn test_slider_clamps() {
        let mut audio = AudioQueue::new();
        let mut m = menu();
        m.handle(MenuInput::Down, &mut audio);
        let out = m.handle(MenuInput::Right, &mut audio);
        assert_eq!(
            out,
            Some(MenuOutcome::SliderChanged {
                id: Item::Volume,
                value: 1.0
            })
        );
        for _ in 0..15 {
            m.handle(MenuInput::Left, &mut audio);
        }
        assert!(matches!(m.selected(), Some(Widget::Slider { value, .. }) if *value == 0.0));
        // Select does nothing on a slider
        assert_eq!(m.handle(MenuInput::Select, &mut audio), None);
    }

    #[test]
    fn test_toggle_and_button() {
        let mut audio = AudioQueue::new();
        let mut m = menu();
        assert_eq!(
            m.handle(MenuInput::Select, &mut audio),
            Some(MenuOutcome::Activated(Item::Go))
        );
        assert_eq!(m.handle(MenuInput::Left, &mut audio), None);

        m.navigate(2, &mut audio);
        assert_eq!(
            m.handle(MenuInput::Select, &mut audio),
            Some(MenuOutcome::ToggleChanged {
                id: Item::Flag,
                value: true
            })
        );
        assert_eq!(
            m.handle(MenuInput::Right, &mut audio),
            Some(MenuOutcome::ToggleChanged {
                id: Item::Flag,
                value: false
            })
        );

        m.reset();
        assert_eq!(m.selected().map(Widget::label), Some("Go"));
    }

    #[test]
    fn test_empty_menu_is_inert() {
        let mut audio = AudioQueue::new();
        let mut m: Menu<Item> = Menu::new();
        assert_eq!(m.handle(MenuInput::Down, &mut audio), None);
        assert_eq!(m.handle(MenuInput::Select, &mut audio), None);
        assert!(audio.pending().is_empty());
    }

    #[test]
    fn test_setters() {
        let mut m = menu();
        m.set_slider(Item::Volume, 7.0);
        m.set_toggle(Item::Flag, true);
        m.set_label(Item::Go, "Start");
        assert_eq!(m.items()[0].label(), "Start");
        assert!(matches!(m.items()[1], Widget::Slider { value, .. } if value == 1.0));
        assert!(matches!(m.items()[2], Widget::Toggle { value: true, .. }));
    }
}
