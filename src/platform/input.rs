//! Keyboard and pointer translation
//!
//! Browser key names come in, logical actions and one-shot commands come
//! out. Several physical keys may share an action.

use std::collections::HashSet;

use crate::sim::TickInput;

/// Held movement actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Jump,
}

impl Action {
    /// Logical action bound to a browser `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Action::Left),
            "ArrowRight" | "d" | "D" => Some(Action::Right),
            " " | "w" | "W" | "ArrowUp" => Some(Action::Jump),
            _ => None,
        }
    }
}

/// One-shot commands triggered on key down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Hotbar slot 1-4
    Select(u32),
    Save,
    Load,
    /// Flip and persist the mute preference
    ToggleMute,
}

/// Pointer buttons the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Break
    Primary,
    /// Place
    Secondary,
}

impl PointerButton {
    /// From `MouseEvent.button`
    pub fn from_button(button: i16) -> Option<Self> {
        match button {
            0 => Some(PointerButton::Primary),
            2 => Some(PointerButton::Secondary),
            _ => None,
        }
    }
}

/// Currently held keys
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press. `modifier` is Ctrl or Meta.
    ///
    /// Modifier chords are commands only and never start movement.
    pub fn key_down(&mut self, key: &str, modifier: bool) -> Option<Command> {
        if modifier {
            return match key {
                "s" | "S" => Some(Command::Save),
                "l" | "L" => Some(Command::Load),
                _ => None,
            };
        }
        if Action::from_key(key).is_some() {
            self.held.insert(key.to_string());
        }
        match key {
            "1" => Some(Command::Select(1)),
            "2" => Some(Command::Select(2)),
            "3" => Some(Command::Select(3)),
            "4" => Some(Command::Select(4)),
            "m" | "M" => Some(Command::ToggleMute),
            _ => None,
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(key);
    }

    /// Drop every held key (window blur)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Whether any key bound to `action` is down
    pub fn is_held(&self, action: Action) -> bool {
        self.held
            .iter()
            .any(|key| Action::from_key(key) == Some(action))
    }

    /// Movement intents for the next tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.is_held(Action::Left),
            right: self.is_held(Action::Right),
            jump: self.is_held(Action::Jump),
        }
    }
}
