//! Keyboard shortcut registry and documentation.

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }
}

/// Registry of all keyboard shortcuts. Ctrl also means Cmd on macOS.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("V", false, false, "Select tool"),
            Shortcut::new("P", false, false, "Pen tool"),
            Shortcut::new("R", false, false, "Rectangle tool"),
            Shortcut::new("C", false, false, "Circle tool"),
            Shortcut::new("L", false, false, "Line tool"),
            Shortcut::new("A", false, false, "Arrow tool"),
            Shortcut::new("T", false, false, "Text tool"),
            Shortcut::new("E", true, false, "Eraser tool"),
            Shortcut::new("S", true, false, "Save to file"),
            Shortcut::new("O", true, false, "Open file..."),
            Shortcut::new("Z", true, false, "Undo"),
            Shortcut::new("Z", true, true, "Redo"),
            Shortcut::new("Y", true, false, "Redo"),
            Shortcut::new("Delete", false, false, "Delete selected element"),
            Shortcut::new("Backspace", false, false, "Delete selected element"),
            Shortcut::new("Escape", false, false, "Cancel text editing and deselect"),
            Shortcut::new("Arrows", false, false, "Pan the canvas"),
            Shortcut::new("Ctrl+Drag", false, false, "Pan the canvas"),
            Shortcut::new("Middle-Drag", false, false, "Pan the canvas"),
            Shortcut::new("Double-Click", false, false, "Edit text"),
        ]
    }

    /// All shortcuts as aligned text, one per line.
    pub fn help_text() -> String {
        Self::all()
            .iter()
            .map(|shortcut| format!("{:20} {}", shortcut.format(), shortcut.description))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Write all shortcuts to the log.
    pub fn log_all() {
        log::info!("Keyboard shortcuts:\n{}", Self::help_text());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(Shortcut::new("Z", true, true, "Redo").format(), "Ctrl+Shift+Z");
        assert_eq!(Shortcut::new("Delete", false, false, "Delete").format(), "Delete");
    }

    #[test]
    fn test_registry_lists_tools_and_commands() {
        let all = ShortcutRegistry::all();
        for key in ["V", "P", "R", "C", "L", "A", "T"] {
            assert!(all.iter().any(|s| s.key == key && !s.ctrl), "missing tool key {key}");
        }
        assert!(all.iter().any(|s| s.key == "S" && s.ctrl));
        assert!(all.iter().any(|s| s.key == "Z" && s.ctrl && s.shift));
    }

    #[test]
    fn test_help_text_has_one_line_per_shortcut() {
        let text = ShortcutRegistry::help_text();
        assert_eq!(text.lines().count(), ShortcutRegistry::all().len());
        assert!(text.lines().any(|line| line.starts_with("Ctrl+S") && line.ends_with("Save to file")));
    }
}
