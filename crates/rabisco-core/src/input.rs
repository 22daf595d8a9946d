//! Input events delivered by the host (mouse/touch/keyboard).

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` index.
    pub fn from_dom_index(index: i16) -> Option<Self> {
        match index {
            0 => Some(MouseButton::Left),
            1 => Some(MouseButton::Middle),
            2 => Some(MouseButton::Right),
            _ => None,
        }
    }
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub fn ctrl_shift() -> Self {
        Self {
            ctrl: true,
            shift: true,
            ..Self::NONE
        }
    }
}

/// Pointer event in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    DoubleClick {
        position: Point,
    },
    /// The pointer left the window or the window lost focus mid-gesture.
    Cancel,
}

/// Keys the whiteboard reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A printable character, lowercased.
    Char(char),
    Delete,
    Backspace,
    Escape,
    Enter,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Build a character key; letters are folded to lowercase.
    pub fn char(c: char) -> Self {
        Key::Char(c.to_ascii_lowercase())
    }
}

/// Keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A key pressed without modifiers.
    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }
}
