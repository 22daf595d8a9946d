//! Freehand drawing shape.

use super::ShapeTrait;
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A freehand stroke (series of sampled points).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Freehand {
    /// Points in the order they were sampled.
    #[serde(default)]
    pub points: Vec<Point>,
}

impl Freehand {
    /// Create a new empty freehand shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Polyline through the samples, for rendering.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut points = self.points.iter();
        if let Some(first) = points.next() {
            path.move_to(*first);
            for point in points {
                path.line_to(*point);
            }
        }
        path
    }
}

impl ShapeTrait for Freehand {
    fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::ZERO;
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for point in &self.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        Rect::new(min_x, min_y, max_x, max_y)
    }

    /// Only the samples are tested, not the segments between them, so a
    /// point in a wide gap of a fast stroke misses.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.points.iter().any(|p| p.distance(point) <= tolerance)
    }

    fn origin(&self) -> Point {
        self.points.first().copied().unwrap_or(Point::ZERO)
    }

    fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }
}
