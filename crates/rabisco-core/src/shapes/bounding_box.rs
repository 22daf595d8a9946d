//! Axis-aligned box geometry shared by rectangles and circles.

use super::{ShapeTrait, rect_contains_inclusive};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A box given by its top-left corner and a non-negative size.
///
/// Circles are drawn as the ellipse inscribed in this box but are hit-tested
/// against the whole box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxShape {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl BoxShape {
    /// Create a box; a negative size is folded into the origin.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        let mut b = Self {
            x,
            y,
            width,
            height,
        };
        b.normalize();
        b
    }

    /// Create a box spanning two opposite corners.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        Self {
            x: p1.x.min(p2.x),
            y: p1.y.min(p2.y),
            width: (p2.x - p1.x).abs(),
            height: (p2.y - p1.y).abs(),
        }
    }

    /// Move any negative width/height into the origin so the size stays non-negative.
    pub fn normalize(&mut self) {
        if self.width < 0.0 {
            self.x += self.width;
            self.width = -self.width;
        }
        if self.height < 0.0 {
            self.y += self.height;
            self.height = -self.height;
        }
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

impl ShapeTrait for BoxShape {
    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point, _tolerance: f64) -> bool {
        rect_contains_inclusive(self.as_rect(), point)
    }

    fn origin(&self) -> Point {
        Point::new(self.x, self.y)
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
    fn test_from_corners_normalizes() {
        let b = BoxShape::from_corners(Point::new(50.0, 50.0), Point::new(10.0, 20.0));
        assert_eq!(b, BoxShape::new(10.0, 20.0, 40.0, 30.0));
    }

    #[test]
    fn test_new_folds_negative_size() {
        let b = BoxShape::new(100.0, 100.0, -30.0, 20.0);
        assert!((b.x - 70.0).abs() < f64::EPSILON);
        assert!((b.width - 30.0).abs() < f64::EPSILON);
        assert!((b.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_includes_edges() {
        let b = BoxShape::new(0.0, 0.0, 100.0, 50.0);
        assert!(b.hit_test(Point::new(50.0, 25.0), 0.0));
        assert!(b.hit_test(Point::new(100.0, 50.0), 0.0));
        assert!(b.hit_test(Point::new(0.0, 0.0), 0.0));
        assert!(!b.hit_test(Point::new(100.1, 25.0), 0.0));
        // Tolerance does not widen boxes.
        assert!(!b.hit_test(Point::new(103.0, 25.0), 10.0));
    }

    #[test]
    fn test_circle_corner_counts_as_hit() {
        // The box corner lies outside the inscribed ellipse but still hits.
        let b = BoxShape::new(0.0, 0.0, 10.0, 10.0);
        assert!(b.hit_test(Point::new(0.5, 0.5), 0.0));
    }

    #[test]
    fn test_center() {
        let b = BoxShape::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(b.center(), Point::new(60.0, 45.0));
    }
}
