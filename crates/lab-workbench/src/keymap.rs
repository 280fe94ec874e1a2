//! Keyboard bindings.
//!
//! | scope     | chord                    | command        |
//! |-----------|--------------------------|----------------|
//! | editor    | Ctrl-Enter / Cmd-Enter   | run preview    |
//! | editor    | Ctrl-S / Cmd-S           | save           |
//! | tab strip | ArrowLeft / ArrowRight   | previous / next pane |

use crate::command::Command;

/// Where the key event happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyScope {
    Editor,
    TabStrip,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    /// Command on macOS.
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        meta: false,
        shift: false,
        alt: false,
    };
    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };
    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };

    /// Ctrl or Cmd alone.
    const fn is_primary(self) -> bool {
        (self.ctrl || self.meta) && !self.shift && !self.alt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    ArrowLeft,
    ArrowRight,
    Char(char),
}

/// Command bound to `key` with `modifiers` in `scope`.
#[must_use]
pub fn resolve(scope: KeyScope, key: Key, modifiers: Modifiers) -> Option<Command> {
    match (scope, key) {
        (KeyScope::Editor, Key::Enter) if modifiers.is_primary() => Some(Command::RunPreview),
        (KeyScope::Editor, Key::Char('s' | 'S')) if modifiers.is_primary() => Some(Command::Save),
        (KeyScope::TabStrip, Key::ArrowLeft) if modifiers == Modifiers::NONE => {
            Some(Command::PreviousPane)
        }
        (KeyScope::TabStrip, Key::ArrowRight) if modifiers == Modifiers::NONE => {
            Some(Command::NextPane)
        }
        _ => None,
    }
}
