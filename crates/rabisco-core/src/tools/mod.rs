//! Tool system for the whiteboard.

use crate::config::CanvasConfig;
use crate::shapes::{
    BoxShape, DrawingElement, Freehand, Segment, Shape, Text, clamp_stroke_width,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Freehand,
    Rectangle,
    Circle,
    Line,
    Arrow,
    Text,
    Eraser,
}

impl ToolKind {
    pub const ALL: [ToolKind; 8] = [
        ToolKind::Select,
        ToolKind::Freehand,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Line,
        ToolKind::Arrow,
        ToolKind::Text,
        ToolKind::Eraser,
    ];

    /// Tool bound to a plain (unmodified) letter key.
    ///
    /// The eraser has no plain hotkey; it lives on Ctrl/Cmd+E.
    pub fn from_hotkey(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'v' => Some(ToolKind::Select),
            'p' => Some(ToolKind::Freehand),
            'r' => Some(ToolKind::Rectangle),
            'c' => Some(ToolKind::Circle),
            'l' => Some(ToolKind::Line),
            'a' => Some(ToolKind::Arrow),
            't' => Some(ToolKind::Text),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Freehand => "freehand",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Circle => "circle",
            ToolKind::Line => "line",
            ToolKind::Arrow => "arrow",
            ToolKind::Text => "text",
            ToolKind::Eraser => "eraser",
        }
    }

    /// Parse a tool from its lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }
}

/// Current tool plus the toolbar style applied to new elements.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Stroke color for new elements.
    pub color: String,
    /// Stroke width for new drawn elements.
    pub stroke_width: f64,
    max_stroke_width: f64,
    text_placeholder: String,
    text_stroke_width: f64,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::from_config(&CanvasConfig::default())
    }
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &CanvasConfig) -> Self {
        let max_stroke_width = clamp_stroke_width(config.max_stroke_width);
        Self {
            current_tool: ToolKind::default(),
            color: config.default_color.clone(),
            stroke_width: clamp_stroke_width(config.default_stroke_width).min(max_stroke_width),
            max_stroke_width,
            text_placeholder: config.text_placeholder.clone(),
            text_stroke_width: clamp_stroke_width(config.text_stroke_width),
        }
    }

    /// Set the current tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    /// Set the stroke width for new elements, clamped to the toolbar range.
    pub fn set_stroke_width(&mut self, width: f64) {
        self.stroke_width = clamp_stroke_width(width).min(self.max_stroke_width);
    }

    pub fn max_stroke_width(&self) -> f64 {
        self.max_stroke_width
    }

    /// Element the current tool places at `point`: zero-sized for drawing
    /// tools, a placeholder text for the text tool, nothing otherwise.
    pub fn create_element(&self, point: Point) -> Option<DrawingElement> {
        let shape = match self.current_tool {
            ToolKind::Freehand => Shape::Freehand(Freehand::from_points(vec![point])),
            ToolKind::Rectangle => Shape::Rectangle(BoxShape::new(point.x, point.y, 0.0, 0.0)),
            ToolKind::Circle => Shape::Circle(BoxShape::new(point.x, point.y, 0.0, 0.0)),
            ToolKind::Line => Shape::Line(Segment::new(point, point)),
            ToolKind::Arrow => Shape::Arrow(Segment::new(point, point)),
            ToolKind::Text => {
                return Some(DrawingElement::new(
                    Shape::Text(Text::new(point, self.text_placeholder.clone())),
                    self.color.clone(),
                    self.text_stroke_width,
                ));
            }
            ToolKind::Select | ToolKind::Eraser => return None,
        };
        Some(DrawingElement::new(shape, self.color.clone(), self.stroke_width))
    }
}
