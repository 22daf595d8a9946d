//! Renderer trait and per-frame settings.

use kurbo::Size;
use rabisco_core::canvas::CanvasState;
use rabisco_core::shapes::ElementId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

impl From<std::fmt::Error> for RendererError {
    fn from(e: std::fmt::Error) -> Self {
        RendererError::RenderFailed(e.to_string())
    }
}

pub type RenderResult<T> = Result<T, RendererError>;

/// Spacing of the background grid in canvas units.
pub const GRID_SIZE: f64 = 20.0;

/// Background pattern drawn behind the elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    Hidden,
    #[default]
    Lines,
    /// A small `+` at every intersection.
    Crosses,
    Dots,
}

impl GridStyle {
    pub const ALL: [GridStyle; 4] = [
        GridStyle::Hidden,
        GridStyle::Lines,
        GridStyle::Crosses,
        GridStyle::Dots,
    ];

    /// The style after this one, wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            GridStyle::Hidden => "hidden",
            GridStyle::Lines => "lines",
            GridStyle::Crosses => "crosses",
            GridStyle::Dots => "dots",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

/// Inputs for drawing one frame.
pub struct RenderContext<'a> {
    /// The canvas state to render.
    pub state: &'a CanvasState,
    /// Viewport size in CSS pixels.
    pub viewport_size: Size,
    /// Background color (CSS).
    pub background_color: String,
    /// Grid display style.
    pub grid_style: GridStyle,
    /// Grid line color (CSS).
    pub grid_color: String,
    /// Selection highlight color (CSS).
    pub selection_color: String,
    /// Element under inline text editing; the host draws its input instead.
    pub editing_element: Option<&'a ElementId>,
}

impl<'a> RenderContext<'a> {
    pub fn new(state: &'a CanvasState, viewport_size: Size) -> Self {
        Self {
            state,
            viewport_size,
            background_color: "#1E1E1E".to_string(),
            grid_style: GridStyle::default(),
            grid_color: "rgba(255, 255, 255, 0.08)".to_string(),
            selection_color: "#3B82F6".to_string(),
            editing_element: None,
        }
    }

    pub fn with_grid(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }

    /// Set the element being edited (skipped when drawing).
    pub fn with_editing_element(mut self, id: Option<&'a ElementId>) -> Self {
        self.editing_element = id;
        self
    }
}

/// A backend that turns a [`RenderContext`] into output.
pub trait Renderer: Send + Sync {
    /// Build the output for a frame.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Background color used to clear the frame.
    fn background_color<'c>(&self, ctx: &'c RenderContext) -> &'c str {
        &ctx.background_color
    }
}
