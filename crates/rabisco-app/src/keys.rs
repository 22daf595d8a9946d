//! Mapping from DOM keyboard event values to core key events.

use rabisco_core::input::{Key, KeyPress, Modifiers};

/// Map a `KeyboardEvent.key` value.
pub fn key_from_dom(key: &str) -> Key {
    match key {
        "Delete" => Key::Delete,
        "Backspace" => Key::Backspace,
        "Escape" | "Esc" => Key::Escape,
        "Enter" => Key::Enter,
        "ArrowUp" => Key::ArrowUp,
        "ArrowDown" => Key::ArrowDown,
        "ArrowLeft" => Key::ArrowLeft,
        "ArrowRight" => Key::ArrowRight,
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::char(c),
                _ => Key::Other,
            }
        }
    }
}

/// Build a key press from a DOM key value and modifier flags.
pub fn key_press_from_dom(key: &str, shift: bool, ctrl: bool, alt: bool, meta: bool) -> KeyPress {
    KeyPress::new(
        key_from_dom(key),
        Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        },
    )
}
