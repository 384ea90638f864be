//! Input state tracking with both edge-triggered and level-triggered queries,
//! plus the key bindings that turn presses into game commands.
//!
//! - **Level-triggered (held):** `is_held(key)` returns true every frame the key
//!   is physically down.
//!
//! - **Edge-triggered (just_pressed / just_released):** These are true only during
//!   the frame the transition happened. They are cleared by `end_frame()`, which
//!   the driver calls only after at least one fixed simulation step has consumed
//!   them, so a press is never lost on a frame with zero simulation steps.
//!
//! Every game command fires on the press edge; holding a key does not repeat it.

use crate::session::GameAction;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Escape,
    Space,
    Enter,
    R,
    S,
    L,
}

impl Key {
    pub const ALL: &'static [Key] = &[
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Escape,
        Key::Space,
        Key::Enter,
        Key::R,
        Key::S,
        Key::L,
    ];

    /// Lowercase name used in replay files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Escape => "escape",
            Self::Space => "space",
            Self::Enter => "enter",
            Self::R => "r",
            Self::S => "s",
            Self::L => "l",
        }
    }

    pub fn from_name(name: &str) -> Option<Key> {
        let lowered = name.trim().to_ascii_lowercase();
        Self::ALL.iter().copied().find(|key| key.name() == lowered)
    }
}

/// What a key press asks for. Save/load/quit touch the outside world, so the
/// driver handles them; everything else is a pure `GameAction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Action(GameAction),
    Save,
    Load,
    Quit,
}

pub const BINDINGS: &[(Key, Command)] = &[
    (Key::Escape, Command::Quit),
    (Key::Enter, Command::Action(GameAction::Start)),
    (Key::R, Command::Action(GameAction::Restart)),
    (Key::Space, Command::Action(GameAction::Flip)),
    (Key::Left, Command::Action(GameAction::NudgeLeft)),
    (Key::Right, Command::Action(GameAction::NudgeRight)),
    (Key::Up, Command::Action(GameAction::PowerUp)),
    (Key::S, Command::Save),
    (Key::L, Command::Load),
];

pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    just_released: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.held.remove(&key) {
            self.just_released.insert(key);
        }
    }

    /// Make exactly `keys` held: press the new ones, release the rest.
    pub fn set_held(&mut self, keys: &[Key]) {
        for &key in Key::ALL {
            if keys.contains(&key) {
                self.key_down(key);
            } else {
                self.key_up(key);
            }
        }
    }

    #[cfg(test)]
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    #[cfg(test)]
    pub fn is_just_released(&self, key: Key) -> bool {
        self.just_released.contains(&key)
    }

    /// Commands for keys pressed this frame, in binding-table order.
    pub fn commands(&self) -> Vec<Command> {
        BINDINGS
            .iter()
            .filter(|(key, _)| self.is_just_pressed(*key))
            .map(|(_, command)| *command)
            .collect()
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
