//! Questions the shell asks before replacing or wiping the canvas.

use rabisco_core::Canvas;

/// Asked before every clear.
pub const CLEAR_PROMPT: &str = "This will clear the whole canvas. Do you want to continue?";
pub const REPLACE_PROMPT: &str =
    "This will replace the current canvas content. Do you want to continue?";

/// Confirmation to ask for before opening a file; an empty canvas has
/// nothing to lose.
pub fn open_prompt(canvas: &Canvas) -> Option<&'static str> {
    (!canvas.store.is_empty()).then_some(REPLACE_PROMPT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use rabisco_core::ToolKind;

    fn canvas_with_element() -> Canvas {
        let mut canvas = Canvas::new();
        canvas.set_tool(ToolKind::Rectangle);
        let element = canvas.tools.create_element(Point::new(1.0, 1.0)).unwrap();
        canvas.store.add(element);
        canvas
    }

    #[test]
    fn test_open_asks_only_over_content() {
        assert_eq!(open_prompt(&Canvas::new()), None);
        assert_eq!(open_prompt(&canvas_with_element()), Some(REPLACE_PROMPT));
    }
}
