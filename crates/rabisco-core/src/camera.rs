//! Camera module for the pan transform.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Camera holds the pan offset of the infinite canvas.
///
/// Canvas space is screen space shifted by the offset; there is no zoom, the
/// persisted zoom factor is always 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan).
    pub offset: Vec2,
}

impl Camera {
    /// Create a camera with no pan.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(offset: Vec2) -> Self {
        Self { offset }
    }

    /// Convert a screen point to canvas coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        screen_point - self.offset
    }

    /// Convert a canvas point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        world_point + self.offset
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }
}
