//! Pointer and keyboard handling.
//!
//! The controller owns only the transient gesture; every mutation goes to the
//! [`Canvas`] passed in by the host. Each completed gesture is one undo step.

use crate::canvas::Canvas;
use crate::input::{Key, KeyPress, MouseButton, Modifiers, PointerEvent};
use crate::shapes::{BoxShape, ElementId, ElementPatch, Shape};
use crate::tools::ToolKind;
use kurbo::{Point, Vec2};

/// Gesture in progress between pointer down and pointer up.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// A new element grows from `anchor` (canvas space).
    Drawing { id: ElementId, anchor: Point },
    /// The selected element follows the cursor at a fixed `offset` from its
    /// origin; `start` is the origin at press time.
    Dragging {
        id: ElementId,
        offset: Vec2,
        start: Point,
    },
    /// The view follows the cursor; `last` is in screen space.
    Panning { last: Point },
    /// Eraser held down; `erased` counts deletions made while moving.
    Erasing { erased: usize },
    /// Inline text field open over element `id`.
    EditingText { id: ElementId, buffer: String },
}

/// Actions the host has to carry out itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Save,
    Open,
}

/// Translates input events into canvas mutations.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    gesture: Gesture,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }

    /// Element and buffer of the open text field, if any.
    pub fn editing_text(&self) -> Option<(&ElementId, &str)> {
        match &self.gesture {
            Gesture::EditingText { id, buffer } => Some((id, buffer.as_str())),
            _ => None,
        }
    }

    /// Handle a pointer event.
    pub fn handle_pointer(&mut self, canvas: &mut Canvas, event: PointerEvent) {
        match event {
            PointerEvent::Down {
                position,
                button,
                modifiers,
            } => self.pointer_down(canvas, position, button, modifiers),
            PointerEvent::Move { position } => self.pointer_move(canvas, position),
            PointerEvent::Up { .. } | PointerEvent::Cancel => self.finish_gesture(canvas),
            PointerEvent::DoubleClick { position } => self.double_click(canvas, position),
        }
    }

    fn pointer_down(
        &mut self,
        canvas: &mut Canvas,
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    ) {
        if matches!(self.gesture, Gesture::EditingText { .. }) {
            self.commit_text(canvas);
        }
        self.finish_gesture(canvas);

        if button == MouseButton::Middle || (button == MouseButton::Left && modifiers.command()) {
            self.gesture = Gesture::Panning { last: position };
            return;
        }
        if button != MouseButton::Left {
            return;
        }

        let point = canvas.camera.screen_to_world(position);
        match canvas.tools.current_tool {
            ToolKind::Select => {
                let hit = canvas
                    .store
                    .find_element_at(point)
                    .map(|el| (el.id.clone(), el.origin()));
                match hit {
                    Some((id, origin)) => {
                        canvas.store.select(Some(&id));
                        log::debug!("Dragging {id}");
                        self.gesture = Gesture::Dragging {
                            id,
                            offset: point - origin,
                            start: origin,
                        };
                    }
                    None => canvas.store.select(None),
                }
            }
            ToolKind::Eraser => {
                if let Some(id) = canvas.store.find_element_at(point).map(|el| el.id.clone()) {
                    canvas.store.delete(&id);
                    canvas.snapshot();
                }
                self.gesture = Gesture::Erasing { erased: 0 };
            }
            ToolKind::Text => {
                if let Some(element) = canvas.tools.create_element(point) {
                    let id = element.id.clone();
                    let buffer = element
                        .shape
                        .as_text()
                        .map(|t| t.text.clone())
                        .unwrap_or_default();
                    if canvas.store.add(element) {
                        canvas.snapshot();
                        self.gesture = Gesture::EditingText { id, buffer };
                    }
                }
            }
            ToolKind::Freehand
            | ToolKind::Rectangle
            | ToolKind::Circle
            | ToolKind::Line
            | ToolKind::Arrow => {
                if let Some(element) = canvas.tools.create_element(point) {
                    let id = element.id.clone();
                    let kind = element.shape.type_name();
                    if canvas.store.add(element) {
                        log::debug!("Drawing {kind} {id}");
                        self.gesture = Gesture::Drawing { id, anchor: point };
                    }
                }
            }
        }
    }

    fn pointer_move(&mut self, canvas: &mut Canvas, position: Point) {
        let point = canvas.camera.screen_to_world(position);
        match &mut self.gesture {
            Gesture::Idle | Gesture::EditingText { .. } => {}
            Gesture::Panning { last } => {
                canvas.pan_by(position - *last);
                *last = position;
            }
            Gesture::Dragging { id, offset, .. } => {
                let Some(element) = canvas.store.get(id) else {
                    return;
                };
                let delta = (point - *offset) - element.origin();
                let patch = ElementPatch::translate(&element.shape, delta);
                canvas.store.update(id, &patch);
            }
            Gesture::Erasing { erased } => {
                if let Some(id) = canvas.store.find_element_at(point).map(|el| el.id.clone()) {
                    canvas.store.delete(&id);
                    *erased += 1;
                }
            }
            Gesture::Drawing { id, anchor } => {
                let Some(element) = canvas.store.get(id) else {
                    return;
                };
                let patch = match element.shape {
                    Shape::Freehand(_) => ElementPatch::append_point(point),
                    Shape::Rectangle(_) | Shape::Circle(_) => {
                        let b = BoxShape::from_corners(*anchor, point);
                        ElementPatch::frame(b.x, b.y, b.width, b.height)
                    }
                    Shape::Line(_) | Shape::Arrow(_) => ElementPatch::end_point(point),
                    Shape::Text(_) => return,
                };
                canvas.store.update(id, &patch);
            }
        }
    }

    /// End the active pointer gesture. Drawing, a drag that moved its element
    /// and a paint-erase that deleted something each become one undo step.
    fn finish_gesture(&mut self, canvas: &mut Canvas) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle | Gesture::Panning { .. } => {}
            Gesture::Drawing { .. } => canvas.snapshot(),
            Gesture::Dragging { id, start, .. } => {
                let moved = canvas.store.get(&id).is_some_and(|el| el.origin() != start);
                if moved {
                    canvas.snapshot();
                }
            }
            Gesture::Erasing { erased } => {
                if erased > 0 {
                    canvas.snapshot();
                }
            }
            editing @ Gesture::EditingText { .. } => self.gesture = editing,
        }
    }

    fn double_click(&mut self, canvas: &mut Canvas, position: Point) {
        if !matches!(self.gesture, Gesture::Idle) {
            return;
        }
        let point = canvas.camera.screen_to_world(position);
        let hit = canvas
            .store
            .find_element_at(point)
            .and_then(|el| el.shape.as_text().map(|t| (el.id.clone(), t.text.clone())));
        if let Some((id, text)) = hit {
            canvas.store.select(Some(&id));
            self.gesture = Gesture::EditingText { id, buffer: text };
        }
    }

    /// Replace the content of the open text field.
    pub fn set_edit_buffer(&mut self, text: impl Into<String>) {
        if let Gesture::EditingText { buffer, .. } = &mut self.gesture {
            *buffer = text.into();
        }
    }

    /// Write the trimmed buffer into the edited element as one undo step.
    pub fn commit_text(&mut self, canvas: &mut Canvas) -> bool {
        if !matches!(self.gesture, Gesture::EditingText { .. }) {
            return false;
        }
        let Gesture::EditingText { id, buffer } = std::mem::take(&mut self.gesture) else {
            return false;
        };
        if canvas.store.update(&id, &ElementPatch::text(buffer.trim())) {
            canvas.snapshot();
            true
        } else {
            false
        }
    }

    /// Close the text field without touching the element.
    pub fn cancel_text(&mut self) {
        if matches!(self.gesture, Gesture::EditingText { .. }) {
            self.gesture = Gesture::Idle;
        }
    }

    /// Undo; abandons any gesture in progress.
    pub fn undo(&mut self, canvas: &mut Canvas) -> bool {
        self.gesture = Gesture::Idle;
        canvas.undo()
    }

    /// Redo; abandons any gesture in progress.
    pub fn redo(&mut self, canvas: &mut Canvas) -> bool {
        self.gesture = Gesture::Idle;
        canvas.redo()
    }

    /// Handle a key press. Save and open are returned for the host to perform.
    pub fn handle_key(&mut self, canvas: &mut Canvas, press: KeyPress) -> Option<Command> {
        if matches!(self.gesture, Gesture::EditingText { .. }) {
            match press.key {
                Key::Enter => {
                    self.commit_text(canvas);
                }
                Key::Escape => {
                    self.cancel_text();
                    canvas.store.select(None);
                }
                _ => {}
            }
            return None;
        }

        let modifiers = press.modifiers;
        if modifiers.command() {
            match press.key {
                Key::Char('z') if modifiers.shift => {
                    self.redo(canvas);
                }
                Key::Char('z') => {
                    self.undo(canvas);
                }
                Key::Char('y') => {
                    self.redo(canvas);
                }
                Key::Char('s') => return Some(Command::Save),
                Key::Char('o') => return Some(Command::Open),
                Key::Char('e') => canvas.set_tool(ToolKind::Eraser),
                _ => {}
            }
            return None;
        }

        let step = canvas.config().pan_step;
        match press.key {
            Key::Char(c) => {
                if let Some(tool) = ToolKind::from_hotkey(c) {
                    canvas.set_tool(tool);
                }
            }
            Key::Delete | Key::Backspace => {
                canvas.delete_selected();
            }
            Key::Escape => canvas.store.select(None),
            Key::ArrowUp => canvas.pan_by(Vec2::new(0.0, step)),
            Key::ArrowDown => canvas.pan_by(Vec2::new(0.0, -step)),
            Key::ArrowLeft => canvas.pan_by(Vec2::new(step, 0.0)),
            Key::ArrowRight => canvas.pan_by(Vec2::new(-step, 0.0)),
            Key::Enter | Key::Other => {}
        }
        None
    }
}
