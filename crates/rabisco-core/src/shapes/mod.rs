//! Drawing element definitions for the whiteboard.

mod bounding_box;
mod freehand;
mod segment;
mod text;

pub use bounding_box::BoxShape;
pub use freehand::Freehand;
pub use segment::Segment;
pub use text::Text;

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Distance beyond the stroke width at which strokes and segments still register a hit.
pub const HIT_PADDING: f64 = 5.0;
/// Approximate advance of one character of canvas text.
pub const TEXT_CHAR_WIDTH: f64 = 8.0;
/// Height of the text hit box, measured up from the baseline.
pub const TEXT_HEIGHT: f64 = 20.0;

/// Stroke color used when none is given.
pub const DEFAULT_COLOR: &str = "#FFFFFF";
/// Stroke width used when none is given.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;
/// Smallest stroke width an element may carry.
pub const MIN_STROKE_WIDTH: f64 = 1.0;
/// Largest stroke width the toolbar offers by default.
pub const MAX_STROKE_WIDTH: f64 = 10.0;

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_stroke_width() -> f64 {
    DEFAULT_STROKE_WIDTH
}

/// Clamp a stroke width into the valid range (NaN and negatives become the minimum).
pub fn clamp_stroke_width(width: f64) -> f64 {
    if width.is_finite() && width >= MIN_STROKE_WIDTH {
        width
    } else {
        MIN_STROKE_WIDTH
    }
}

/// Opaque, unique identifier for elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Containment test that includes every edge of the rectangle.
///
/// `kurbo::Rect::contains` excludes the right and bottom edges.
pub(crate) fn rect_contains_inclusive(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Common geometry for all shapes.
pub trait ShapeTrait {
    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in canvas coordinates) hits this shape.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Reference point that dragging keeps at a fixed offset from the cursor.
    fn origin(&self) -> Point;

    /// Move the shape rigidly.
    fn translate(&mut self, delta: Vec2);
}

/// Geometry of an element, tagged by `type` in the file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Freehand(Freehand),
    Rectangle(BoxShape),
    Circle(BoxShape),
    Line(Segment),
    Arrow(Segment),
    Text(Text),
}

impl Shape {
    /// Name of the shape type as written in files.
    pub fn type_name(&self) -> &'static str {
        match self {
            Shape::Freehand(_) => "freehand",
            Shape::Rectangle(_) => "rectangle",
            Shape::Circle(_) => "circle",
            Shape::Line(_) => "line",
            Shape::Arrow(_) => "arrow",
            Shape::Text(_) => "text",
        }
    }

    fn geometry(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Freehand(s) => s as &dyn ShapeTrait,
            Shape::Rectangle(s) | Shape::Circle(s) => s,
            Shape::Line(s) | Shape::Arrow(s) => s,
            Shape::Text(s) => s,
        }
    }

    fn geometry_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Freehand(s) => s as &mut dyn ShapeTrait,
            Shape::Rectangle(s) | Shape::Circle(s) => s,
            Shape::Line(s) | Shape::Arrow(s) => s,
            Shape::Text(s) => s,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.geometry().bounds()
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.geometry().hit_test(point, tolerance)
    }

    pub fn origin(&self) -> Point {
        self.geometry().origin()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.geometry_mut().translate(delta);
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Shape::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// One drawable object on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingElement {
    /// Files without an id get a fresh one.
    #[serde(default)]
    pub id: ElementId,
    #[serde(flatten)]
    pub shape: Shape,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default)]
    pub selected: bool,
}

impl DrawingElement {
    /// Create an unselected element with a fresh id.
    pub fn new(shape: Shape, color: impl Into<String>, stroke_width: f64) -> Self {
        Self {
            id: ElementId::new(),
            shape,
            color: color.into(),
            stroke_width: clamp_stroke_width(stroke_width),
            fill: None,
            selected: false,
        }
    }

    /// Replace the generated id (used when ids come from elsewhere).
    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    /// Hit test with the element's own tolerance (stroke width plus padding).
    pub fn hit_test(&self, point: Point) -> bool {
        self.shape.hit_test(point, self.stroke_width + HIT_PADDING)
    }

    pub fn origin(&self) -> Point {
        self.shape.origin()
    }

    pub fn bounds(&self) -> Rect {
        self.shape.bounds()
    }

    /// Merge the fields of `patch` that apply to this element's type.
    pub fn apply(&mut self, patch: &ElementPatch) {
        match &mut self.shape {
            Shape::Freehand(f) => {
                if let Some(points) = &patch.points {
                    f.points = points.clone();
                }
                if let Some(point) = patch.append_point {
                    f.add_point(point);
                }
            }
            Shape::Rectangle(b) | Shape::Circle(b) => {
                if let Some(x) = patch.x {
                    b.x = x;
                }
                if let Some(y) = patch.y {
                    b.y = y;
                }
                if let Some(width) = patch.width {
                    b.width = width;
                }
                if let Some(height) = patch.height {
                    b.height = height;
                }
                b.normalize();
            }
            Shape::Line(s) | Shape::Arrow(s) => {
                if let Some(start) = patch.start_point {
                    s.start = start;
                }
                if let Some(end) = patch.end_point {
                    s.end = end;
                }
            }
            Shape::Text(t) => {
                if let Some(x) = patch.x {
                    t.x = x;
                }
                if let Some(y) = patch.y {
                    t.y = y;
                }
                if let Some(text) = &patch.text {
                    t.text = text.clone();
                }
            }
        }
        if let Some(color) = &patch.color {
            self.color = color.clone();
        }
        if let Some(width) = patch.stroke_width {
            self.stroke_width = clamp_stroke_width(width);
        }
        if let Some(fill) = &patch.fill {
            self.fill = fill.clone();
        }
    }

    /// Restore field invariants on data that did not come through `apply`.
    pub fn normalize(&mut self) {
        self.stroke_width = clamp_stroke_width(self.stroke_width);
        if let Shape::Rectangle(b) | Shape::Circle(b) = &mut self.shape {
            b.normalize();
        }
    }
}

/// Partial update merged into an element by id.
///
/// Fields that do not belong to the target element's type are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub points: Option<Vec<Point>>,
    /// Append one sample to a freehand path.
    pub append_point: Option<Point>,
    pub start_point: Option<Point>,
    pub end_point: Option<Point>,
    pub text: Option<String>,
    pub color: Option<String>,
    pub stroke_width: Option<f64>,
    pub fill: Option<Option<String>>,
}

impl ElementPatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn frame(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn append_point(point: Point) -> Self {
        Self {
            append_point: Some(point),
            ..Self::default()
        }
    }

    pub fn end_point(point: Point) -> Self {
        Self {
            end_point: Some(point),
            ..Self::default()
        }
    }

    pub fn endpoints(start: Point, end: Point) -> Self {
        Self {
            start_point: Some(start),
            end_point: Some(end),
            ..Self::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Patch that moves `shape` rigidly by `delta`.
    pub fn translate(shape: &Shape, delta: Vec2) -> Self {
        match shape {
            Shape::Freehand(f) => Self {
                points: Some(f.points.iter().map(|p| *p + delta).collect()),
                ..Self::default()
            },
            Shape::Rectangle(b) | Shape::Circle(b) => Self::position(b.x + delta.x, b.y + delta.y),
            Shape::Line(s) | Shape::Arrow(s) => Self::endpoints(s.start + delta, s.end + delta),
            Shape::Text(t) => Self::position(t.x + delta.x, t.y + delta.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> DrawingElement {
        DrawingElement::new(Shape::Rectangle(BoxShape::new(x, y, w, h)), "#FFFFFF", 2.0)
    }

    #[test]
    fn test_point_to_segment_clamps_to_endpoints() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((point_to_segment_dist(Point::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-9);
        // Beyond the end the distance is to the endpoint, not the infinite line.
        assert!((point_to_segment_dist(Point::new(13.0, 4.0), a, b) - 5.0).abs() < 1e-9);
        assert!((point_to_segment_dist(Point::new(-3.0, 4.0), a, b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_to_degenerate_segment() {
        let a = Point::new(1.0, 1.0);
        assert!((point_to_segment_dist(Point::new(4.0, 5.0), a, a) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_patch_normalizes_box() {
        let mut el = rect(50.0, 50.0, 0.0, 0.0);
        el.apply(&ElementPatch::frame(50.0, 50.0, -40.0, -30.0));
        assert_eq!(el.shape, Shape::Rectangle(BoxShape::new(10.0, 20.0, 40.0, 30.0)));
    }

    #[test]
    fn test_patch_ignores_foreign_fields() {
        let mut el = DrawingElement::new(
            Shape::Line(Segment::new(Point::ZERO, Point::new(10.0, 0.0))),
            "#FFFFFF",
            2.0,
        );
        let before = el.clone();
        el.apply(&ElementPatch::frame(1.0, 2.0, 3.0, 4.0));
        assert_eq!(el, before);
    }

    #[test]
    fn test_stroke_width_clamped() {
        let mut el = rect(0.0, 0.0, 10.0, 10.0);
        el.apply(&ElementPatch {
            stroke_width: Some(-3.0),
            ..ElementPatch::default()
        });
        assert_eq!(el.stroke_width, MIN_STROKE_WIDTH);
        assert_eq!(clamp_stroke_width(f64::NAN), MIN_STROKE_WIDTH);
        assert_eq!(clamp_stroke_width(4.0), 4.0);
    }

    #[test]
    fn test_translate_patch_moves_segment_rigidly() {
        let mut el = DrawingElement::new(
            Shape::Arrow(Segment::new(Point::ZERO, Point::new(10.0, 0.0))),
            "#FFFFFF",
            2.0,
        );
        let patch = ElementPatch::translate(&el.shape, Vec2::new(5.0, 5.0));
        el.apply(&patch);
        assert_eq!(
            el.shape,
            Shape::Arrow(Segment::new(Point::new(5.0, 5.0), Point::new(15.0, 5.0)))
        );
    }

    #[test]
    fn test_element_json_shape() {
        let el = rect(1.0, 2.0, 3.0, 4.0).with_id("abc").with_fill("#DC2626");
        let value = serde_json::to_value(&el).unwrap();
        assert_eq!(value["type"], "rectangle");
        assert_eq!(value["id"], "abc");
        assert_eq!(value["strokeWidth"], 2.0);
        assert_eq!(value["fill"], "#DC2626");
        assert_eq!(value["width"], 3.0);
        assert_eq!(value["selected"], false);
    }

    #[test]
    fn test_element_json_defaults() {
        let el: DrawingElement =
            serde_json::from_str(r#"{"id":"a1","type":"line","endPoint":{"x":3,"y":4}}"#).unwrap();
        assert_eq!(el.color, DEFAULT_COLOR);
        assert_eq!(el.stroke_width, DEFAULT_STROKE_WIDTH);
        assert!(!el.selected);
        assert_eq!(
            el.shape,
            Shape::Line(Segment::new(Point::ZERO, Point::new(3.0, 4.0)))
        );
    }
}
