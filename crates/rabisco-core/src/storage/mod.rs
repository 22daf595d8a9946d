//! JSON file format for saving and opening canvases.

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::canvas::CanvasState;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

/// File errors. `Display` is the message shown to the user; the payload
/// carries the technical detail for logs.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("Failed to save the file.")]
    SerializationFailure(String),
    #[error("Error: the selected file is not a valid Rabisco file.")]
    InvalidFormat(String),
    #[error("Failed to read the file.")]
    ReadFailure(String),
}

impl FileError {
    /// Technical detail behind the user-facing message.
    pub fn detail(&self) -> &str {
        match self {
            FileError::SerializationFailure(detail)
            | FileError::InvalidFormat(detail)
            | FileError::ReadFailure(detail) => detail,
        }
    }
}

/// Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

/// Serialize a canvas state as pretty-printed JSON.
pub fn export_json(state: &CanvasState) -> FileResult<String> {
    serde_json::to_string_pretty(state).map_err(|e| {
        log::error!("Export failed: {e}");
        FileError::SerializationFailure(e.to_string())
    })
}

/// Parse file contents into a canvas state.
///
/// Requires an `elements` array; anything that does not decode is
/// `InvalidFormat`. Missing fields take their defaults, box shapes are
/// normalized and duplicate ids are rejected.
pub fn import_json(json: &str) -> FileResult<CanvasState> {
    let invalid = |detail: String| {
        log::error!("Import failed: {detail}");
        FileError::InvalidFormat(detail)
    };

    let value: Value = serde_json::from_str(json).map_err(|e| invalid(e.to_string()))?;
    if !matches!(value.get("elements"), Some(Value::Array(_))) {
        return Err(invalid("`elements` is missing or not an array".to_string()));
    }

    let mut state: CanvasState =
        serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?;

    let mut seen = HashSet::new();
    for element in &mut state.elements {
        if !seen.insert(element.id.clone()) {
            return Err(invalid(format!("duplicate element id {}", element.id)));
        }
        element.normalize();
    }
    Ok(state)
}

/// File name for an export made at `now`, e.g. `Rabisco_2024-03-09_141502.json`.
pub fn export_filename(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{prefix}_{}.json", now.format("%Y-%m-%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{
        BoxShape, DEFAULT_COLOR, DEFAULT_STROKE_WIDTH, DrawingElement, Freehand, Segment, Shape,
        Text,
    };
    use chrono::TimeZone;
    use kurbo::{Point, Vec2};

    fn sample_state() -> CanvasState {
        let mut line = DrawingElement::new(
            Shape::Arrow(Segment::new(Point::new(0.1, 0.2), Point::new(10.0, -3.3))),
            "#DC2626",
            3.0,
        );
        line.selected = true;
        CanvasState {
            elements: vec![
                DrawingElement::new(
                    Shape::Freehand(Freehand::from_points(vec![
                        Point::new(1.0, 1.0),
                        Point::new(2.5, 1.0 / 3.0),
                    ])),
                    "#FFFFFF",
                    2.0,
                ),
                DrawingElement::new(Shape::Circle(BoxShape::new(5.0, 6.0, 7.0, 8.0)), "#F59E0B", 4.0)
                    .with_fill("#FFFFFF"),
                line,
                DrawingElement::new(Shape::Text(Text::new(Point::new(3.0, 4.0), "olá")), "#FFFFFF", 1.0),
            ],
            zoom: 1.0,
            pan: Vec2::new(-12.5, 40.0),
        }
    }

    #[test]
    fn test_roundtrip_preserves_state() {
        let state = sample_state();
        let json = export_json(&state).unwrap();
        let back = import_json(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_export_layout() {
        let json = export_json(&sample_state()).unwrap();
        assert!(json.starts_with("{\n  \"elements\": ["));
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["zoom"], 1.0);
        assert_eq!(value["pan"]["x"], -12.5);
        assert_eq!(value["elements"][0]["type"], "freehand");
        assert_eq!(value["elements"][2]["startPoint"]["y"], 0.2);
        assert!(value["elements"][0].get("fill").is_none());
    }

    #[test]
    fn test_elements_not_array_is_invalid() {
        let result = import_json(r#"{"elements": "not-an-array"}"#);
        assert!(matches!(result, Err(FileError::InvalidFormat(_))));
    }

    #[test]
    fn test_missing_elements_is_invalid() {
        assert!(matches!(import_json(r#"{"pan": {"x": 0, "y": 0}}"#), Err(FileError::InvalidFormat(_))));
        assert!(matches!(import_json("[]"), Err(FileError::InvalidFormat(_))));
        assert!(matches!(import_json("{not json"), Err(FileError::InvalidFormat(_))));
    }

    #[test]
    fn test_unknown_type_is_invalid() {
        let json = r#"{"elements": [{"id": "a", "type": "hexagon"}]}"#;
        assert!(matches!(import_json(json), Err(FileError::InvalidFormat(_))));
    }

    #[test]
    fn test_duplicate_ids_are_invalid() {
        let json = r#"{"elements": [
            {"id": "a", "type": "rectangle"},
            {"id": "a", "type": "circle"}
        ]}"#;
        assert!(matches!(import_json(json), Err(FileError::InvalidFormat(_))));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let json = r#"{"elements": [{"id": "r", "type": "rectangle", "width": 5}]}"#;
        let state = import_json(json).unwrap();
        assert_eq!(state.zoom, 1.0);
        assert_eq!(state.pan, Vec2::ZERO);
        let el = &state.elements[0];
        assert_eq!(el.shape, Shape::Rectangle(BoxShape::new(0.0, 0.0, 5.0, 0.0)));
        assert_eq!(el.color, DEFAULT_COLOR);
        assert_eq!(el.stroke_width, DEFAULT_STROKE_WIDTH);
    }

    #[test]
    fn test_missing_id_is_generated() {
        let json = r#"{"elements": [{"type": "line"}, {"type": "line"}]}"#;
        let state = import_json(json).unwrap();
        assert_ne!(state.elements[0].id, state.elements[1].id);
    }

    #[test]
    fn test_import_normalizes_boxes() {
        let json = r#"{"elements": [
            {"id": "r", "type": "rectangle", "x": 50, "y": 50, "width": -40, "height": -30, "strokeWidth": 0}
        ]}"#;
        let state = import_json(json).unwrap();
        let el = &state.elements[0];
        assert_eq!(el.shape, Shape::Rectangle(BoxShape::new(10.0, 20.0, 40.0, 30.0)));
        assert_eq!(el.stroke_width, 1.0);
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            FileError::SerializationFailure("x".into()).to_string(),
            "Failed to save the file."
        );
        assert_eq!(
            FileError::InvalidFormat("x".into()).to_string(),
            "Error: the selected file is not a valid Rabisco file."
        );
        assert_eq!(FileError::ReadFailure("x".into()).to_string(), "Failed to read the file.");
        assert_eq!(FileError::ReadFailure("disk gone".into()).detail(), "disk gone");
    }

    #[test]
    fn test_export_filename() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 14, 15, 2).unwrap();
        assert_eq!(export_filename("Rabisco", now), "Rabisco_2024-03-09_141502.json");
    }
}
