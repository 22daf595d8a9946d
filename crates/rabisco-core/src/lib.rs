//! Rabisco Core Library
//!
//! Platform-agnostic data model and interaction logic for the Rabisco whiteboard.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod hit_test;
pub mod history;
pub mod input;
pub mod interaction;
pub mod shapes;
pub mod storage;
pub mod tools;

pub use camera::Camera;
pub use canvas::{Canvas, CanvasState, ElementStore};
pub use config::{CanvasConfig, ConfigError};
pub use history::History;
pub use input::{Key, KeyPress, Modifiers, MouseButton, PointerEvent};
pub use interaction::{Command, Gesture, InteractionController};
pub use shapes::{DrawingElement, ElementId, ElementPatch, Shape};
pub use storage::{FileError, FileResult};
pub use tools::{ToolKind, ToolManager};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
