//! Straight segment geometry shared by lines and arrows.

use super::{ShapeTrait, point_to_segment_dist};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Length of each arrowhead barb.
pub const ARROW_HEAD_LENGTH: f64 = 15.0;
/// Angle between the shaft and each barb.
pub const ARROW_HEAD_ANGLE: f64 = std::f64::consts::PI / 6.0;

/// A segment from `start` to `end`; arrows point at `end`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "startPoint", default)]
    pub start: Point,
    #[serde(rename = "endPoint", default)]
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Angle of the segment direction in radians.
    pub fn angle(&self) -> f64 {
        (self.end.y - self.start.y).atan2(self.end.x - self.start.x)
    }

    /// The two outer corners of the arrowhead triangle whose tip is `end`.
    pub fn arrow_head(&self) -> [Point; 2] {
        let angle = self.angle();
        let barb = |offset: f64| {
            Point::new(
                self.end.x - ARROW_HEAD_LENGTH * (angle + offset).cos(),
                self.end.y - ARROW_HEAD_LENGTH * (angle + offset).sin(),
            )
        };
        [barb(-ARROW_HEAD_ANGLE), barb(ARROW_HEAD_ANGLE)]
    }
}

impl ShapeTrait for Segment {
    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_segment_dist(point, self.start, self.end) <= tolerance
    }

    fn origin(&self) -> Point {
        self.start
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }
}
