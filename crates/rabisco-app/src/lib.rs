//! Rabisco Application
//!
//! Browser shell that wires DOM input, file dialogs and SVG output to the
//! core canvas.

mod keys;
mod prompts;
mod shortcuts;

pub use keys::{key_from_dom, key_press_from_dom};
pub use prompts::{CLEAR_PROMPT, REPLACE_PROMPT, open_prompt};
pub use shortcuts::{Shortcut, ShortcutRegistry};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{Whiteboard, run_wasm};
