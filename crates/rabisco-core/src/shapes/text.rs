//! Text shape.

use super::{ShapeTrait, TEXT_CHAR_WIDTH, TEXT_HEIGHT, rect_contains_inclusive};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A single line of text anchored at its baseline origin.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Text {
    /// Left edge of the baseline.
    #[serde(default)]
    pub x: f64,
    /// Baseline height; glyphs extend upward from here.
    #[serde(default)]
    pub y: f64,
    /// Content. May be empty while being edited.
    #[serde(default)]
    pub text: String,
}

impl Text {
    pub fn new(position: Point, text: impl Into<String>) -> Self {
        Self {
            x: position.x,
            y: position.y,
            text: text.into(),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Estimated rendered width: a fixed advance per character.
    pub fn approx_width(&self) -> f64 {
        self.text.chars().count() as f64 * TEXT_CHAR_WIDTH
    }
}

impl ShapeTrait for Text {
    /// The box sits above the baseline, from `y - TEXT_HEIGHT` to `y`.
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y - TEXT_HEIGHT, self.x + self.approx_width(), self.y)
    }

    fn hit_test(&self, point: Point, _tolerance: f64) -> bool {
        rect_contains_inclusive(self.bounds(), point)
    }

    fn origin(&self) -> Point {
        self.position()
    }

    fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_sit_above_baseline() {
        let text = Text::new(Point::new(10.0, 100.0), "Texto");
        let bounds = text.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 50.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 80.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test() {
        let text = Text::new(Point::new(0.0, 20.0), "abc");
        assert!(text.hit_test(Point::new(12.0, 10.0), 0.0));
        assert!(text.hit_test(Point::new(24.0, 20.0), 0.0));
        // Below the baseline.
        assert!(!text.hit_test(Point::new(12.0, 25.0), 0.0));
        // Past the last character.
        assert!(!text.hit_test(Point::new(25.0, 10.0), 0.0));
    }

    #[test]
    fn test_width_counts_characters_not_bytes() {
        let text = Text::new(Point::ZERO, "ação");
        assert!((text.approx_width() - 32.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_text_is_a_zero_width_box() {
        let text = Text::new(Point::new(5.0, 20.0), "");
        assert!(text.hit_test(Point::new(5.0, 10.0), 0.0));
        assert!(!text.hit_test(Point::new(6.0, 10.0), 0.0));
    }
}
