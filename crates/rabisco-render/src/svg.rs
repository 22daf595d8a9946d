//! SVG renderer. The browser host swaps the produced markup into the page.

use crate::renderer::{GRID_SIZE, GridStyle, RenderContext, RenderResult, Renderer};
use kurbo::Rect;
use rabisco_core::shapes::{DrawingElement, Freehand, Segment, Shape, Text};
use std::fmt::Write;

/// Corner radius of rectangles.
pub const RECT_CORNER_RADIUS: f64 = 4.0;
/// Font size of canvas text.
pub const FONT_SIZE: f64 = 16.0;
/// Gap between an element and its selection outline.
const SELECTION_PADDING: f64 = 4.0;

/// Escape text for use in XML content and attribute values.
pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders a canvas state as a standalone SVG document.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    output: String,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the markup produced by the last `build_scene`.
    pub fn take_svg(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    fn render_grid(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        let pattern = match ctx.grid_style {
            GridStyle::Hidden => return Ok(()),
            GridStyle::Lines => format!(
                r#"<path d="M {s} 0 L 0 0 0 {s}" fill="none" stroke="{c}" stroke-width="0.5"/>"#,
                s = GRID_SIZE,
                c = escape_xml(&ctx.grid_color)
            ),
            GridStyle::Crosses => format!(
                r#"<path d="M -3 0 L 3 0 M 0 -3 L 0 3" fill="none" stroke="{c}" stroke-width="1"/>"#,
                c = escape_xml(&ctx.grid_color)
            ),
            GridStyle::Dots => format!(
                r#"<circle cx="0" cy="0" r="1.5" fill="{c}"/>"#,
                c = escape_xml(&ctx.grid_color)
            ),
        };
        let pan = ctx.state.pan;
        write!(
            self.output,
            r#"<defs><pattern id="grid" width="{s}" height="{s}" patternUnits="userSpaceOnUse" patternTransform="translate({x} {y})">{pattern}</pattern></defs>"#,
            s = GRID_SIZE,
            x = pan.x,
            y = pan.y,
        )?;
        self.output
            .push_str(r#"<rect width="100%" height="100%" fill="url(#grid)"/>"#);
        Ok(())
    }

    fn stroke_attrs(element: &DrawingElement) -> String {
        format!(
            r#"stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round""#,
            escape_xml(&element.color),
            element.stroke_width
        )
    }

    fn fill_attr(element: &DrawingElement) -> String {
        match &element.fill {
            Some(fill) => escape_xml(fill),
            None => "none".to_string(),
        }
    }

    fn render_element(&mut self, element: &DrawingElement) -> RenderResult<()> {
        match &element.shape {
            Shape::Freehand(stroke) => self.render_freehand(stroke, element),
            Shape::Rectangle(b) => {
                write!(
                    self.output,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{r}" ry="{r}" fill="{}" {}/>"#,
                    b.x,
                    b.y,
                    b.width,
                    b.height,
                    Self::fill_attr(element),
                    Self::stroke_attrs(element),
                    r = RECT_CORNER_RADIUS,
                )?;
                Ok(())
            }
            Shape::Circle(b) => {
                let center = b.center();
                write!(
                    self.output,
                    r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" fill="{}" {}/>"#,
                    center.x,
                    center.y,
                    b.width / 2.0,
                    b.height / 2.0,
                    Self::fill_attr(element),
                    Self::stroke_attrs(element),
                )?;
                Ok(())
            }
            Shape::Line(segment) => self.render_segment(segment, element),
            Shape::Arrow(segment) => {
                self.render_segment(segment, element)?;
                let [a, b] = segment.arrow_head();
                let tip = segment.end;
                write!(
                    self.output,
                    r#"<path d="M {} {} L {} {} L {} {} Z" fill="{c}" stroke="{c}" stroke-width="{}" stroke-linejoin="round"/>"#,
                    tip.x,
                    tip.y,
                    a.x,
                    a.y,
                    b.x,
                    b.y,
                    element.stroke_width,
                    c = escape_xml(&element.color),
                )?;
                Ok(())
            }
            Shape::Text(text) => self.render_text(text, element),
        }
    }

    /// Strokes with fewer than two samples are not drawn.
    fn render_freehand(&mut self, stroke: &Freehand, element: &DrawingElement) -> RenderResult<()> {
        if stroke.len() < 2 {
            return Ok(());
        }
        write!(
            self.output,
            r#"<path d="{}" fill="none" {}/>"#,
            stroke.to_path().to_svg(),
            Self::stroke_attrs(element)
        )?;
        Ok(())
    }

    fn render_segment(&mut self, segment: &Segment, element: &DrawingElement) -> RenderResult<()> {
        write!(
            self.output,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
            segment.start.x,
            segment.start.y,
            segment.end.x,
            segment.end.y,
            Self::stroke_attrs(element)
        )?;
        Ok(())
    }

    fn render_text(&mut self, text: &Text, element: &DrawingElement) -> RenderResult<()> {
        write!(
            self.output,
            r#"<text x="{}" y="{}" font-size="{}" font-family="sans-serif" fill="{}" xml:space="preserve">{}</text>"#,
            text.x,
            text.y,
            FONT_SIZE,
            escape_xml(&element.color),
            escape_xml(&text.text)
        )?;
        Ok(())
    }

    fn render_selection(&mut self, bounds: Rect, color: &str) -> RenderResult<()> {
        let rect = bounds.inflate(SELECTION_PADDING, SELECTION_PADDING);
        write!(
            self.output,
            r#"<rect class="selection" x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="1" stroke-dasharray="4 4"/>"#,
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height(),
            escape_xml(color)
        )?;
        Ok(())
    }
}

impl Renderer for SvgRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        self.output.clear();
        let size = ctx.viewport_size;
        write!(
            self.output,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = size.width,
            h = size.height
        )?;
        let background = escape_xml(self.background_color(ctx));
        write!(
            self.output,
            r#"<rect width="100%" height="100%" fill="{background}"/>"#
        )?;
        self.render_grid(ctx)?;

        let pan = ctx.state.pan;
        write!(self.output, r#"<g transform="translate({} {})">"#, pan.x, pan.y)?;
        for element in &ctx.state.elements {
            if ctx.editing_element == Some(&element.id) {
                continue;
            }
            self.render_element(element)?;
            if element.selected {
                self.render_selection(element.bounds(), &ctx.selection_color)?;
            }
        }
        self.output.push_str("</g></svg>");
        Ok(())
    }
}
