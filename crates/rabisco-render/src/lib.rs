//! Rabisco Render Library
//!
//! Renderer abstraction plus an SVG implementation that the browser shell
//! paints into the page.

mod renderer;
mod svg;

pub use renderer::{GRID_SIZE, GridStyle, RenderContext, RenderResult, Renderer, RendererError};
pub use svg::{FONT_SIZE, RECT_CORNER_RADIUS, SvgRenderer, escape_xml};
