//! Point queries over the element list.
//!
//! Elements are stored back to front, so the topmost hit is the last match.
//! Circles and text are tested against their boxes and freehand strokes
//! against their samples only.

use crate::shapes::DrawingElement;
use kurbo::Point;

/// Topmost element under `point`, if any.
pub fn find_element_at(elements: &[DrawingElement], point: Point) -> Option<&DrawingElement> {
    elements.iter().rev().find(|el| el.hit_test(point))
}

/// Every element under `point`, topmost first.
pub fn elements_at(elements: &[DrawingElement], point: Point) -> Vec<&DrawingElement> {
    elements.iter().rev().filter(|el| el.hit_test(point)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{BoxShape, Freehand, Segment, Shape, Text};

    fn element(shape: Shape, id: &str) -> DrawingElement {
        DrawingElement::new(shape, "#FFFFFF", 2.0).with_id(id)
    }

    fn rect(id: &str, x: f64, y: f64, w: f64, h: f64) -> DrawingElement {
        element(Shape::Rectangle(BoxShape::new(x, y, w, h)), id)
    }

    #[test]
    fn test_overlap_resolves_to_topmost() {
        let elements = vec![rect("a", 0.0, 0.0, 100.0, 100.0), rect("b", 50.0, 50.0, 100.0, 100.0)];

        let hit = find_element_at(&elements, Point::new(75.0, 75.0)).unwrap();
        assert_eq!(hit.id.as_str(), "b");

        let hit = find_element_at(&elements, Point::new(25.0, 25.0)).unwrap();
        assert_eq!(hit.id.as_str(), "a");

        let all: Vec<&str> = elements_at(&elements, Point::new(75.0, 75.0))
            .iter()
            .map(|el| el.id.as_str())
            .collect();
        assert_eq!(all, vec!["b", "a"]);
    }

    #[test]
    fn test_miss_returns_none() {
        let elements = vec![rect("a", 0.0, 0.0, 10.0, 10.0)];
        assert!(find_element_at(&elements, Point::new(50.0, 50.0)).is_none());
        assert!(find_element_at(&[], Point::ZERO).is_none());
    }

    #[test]
    fn test_box_edges_are_inclusive() {
        let elements = vec![rect("a", 10.0, 10.0, 20.0, 20.0)];
        assert!(find_element_at(&elements, Point::new(30.0, 30.0)).is_some());
        assert!(find_element_at(&elements, Point::new(10.0, 10.0)).is_some());
        // Box shapes get no stroke padding.
        assert!(find_element_at(&elements, Point::new(31.0, 20.0)).is_none());
    }

    #[test]
    fn test_circle_uses_bounding_box() {
        let elements = vec![element(Shape::Circle(BoxShape::new(0.0, 0.0, 100.0, 100.0)), "c")];
        // Corner of the box lies outside the inscribed ellipse but still hits.
        assert!(find_element_at(&elements, Point::new(2.0, 2.0)).is_some());
    }

    #[test]
    fn test_segment_tolerance_includes_stroke_width() {
        let line = element(
            Shape::Line(Segment::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0))),
            "l",
        );
        let elements = vec![line];
        // stroke 2 + padding 5
        assert!(find_element_at(&elements, Point::new(50.0, 7.0)).is_some());
        assert!(find_element_at(&elements, Point::new(50.0, 7.1)).is_none());
        assert!(find_element_at(&elements, Point::new(110.0, 0.0)).is_none());
    }

    #[test]
    fn test_freehand_samples() {
        let stroke = element(
            Shape::Freehand(Freehand::from_points(vec![
                Point::new(0.0, 0.0),
                Point::new(40.0, 0.0),
            ])),
            "f",
        );
        let elements = vec![stroke];
        assert!(find_element_at(&elements, Point::new(39.0, 6.0)).is_some());
        assert!(find_element_at(&elements, Point::new(20.0, 0.0)).is_none());
    }

    #[test]
    fn test_text_box_above_baseline() {
        let elements = vec![element(Shape::Text(Text::new(Point::new(0.0, 100.0), "hello")), "t")];
        assert!(find_element_at(&elements, Point::new(20.0, 90.0)).is_some());
        assert!(find_element_at(&elements, Point::new(20.0, 110.0)).is_none());
        assert!(find_element_at(&elements, Point::new(41.0, 90.0)).is_none());
    }
}
