//! Element store, canvas state and the runtime canvas.

use crate::camera::Camera;
use crate::config::CanvasConfig;
use crate::hit_test;
use crate::history::History;
use crate::shapes::{DrawingElement, ElementId, ElementPatch};
use crate::storage::{self, FileError};
use crate::tools::{ToolKind, ToolManager};
use chrono::{DateTime, Utc};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

fn default_zoom() -> f64 {
    1.0
}

/// Everything that is snapshotted for undo and written to files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasState {
    /// Elements back to front.
    pub elements: Vec<DrawingElement>,
    /// Persisted for compatibility; the canvas does not zoom.
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default)]
    pub pan: Vec2,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

/// Ordered list of elements with exclusive selection.
///
/// Ids are unique and at most one element is selected at a time. Misuse
/// (duplicate ids, unknown ids) is logged and ignored.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    elements: Vec<DrawingElement>,
    selected: Option<ElementId>,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append on top of the z-order. Returns false if the id is taken.
    pub fn add(&mut self, element: DrawingElement) -> bool {
        if self.contains(&element.id) {
            log::warn!("Ignoring element with duplicate id {}", element.id);
            return false;
        }
        let id = element.id.clone();
        let selected = element.selected;
        self.elements.push(element);
        if selected {
            self.select(Some(&id));
        }
        true
    }

    /// Merge `patch` into the element with `id`. Returns false if absent.
    pub fn update(&mut self, id: &ElementId, patch: &ElementPatch) -> bool {
        match self.elements.iter_mut().find(|el| &el.id == id) {
            Some(element) => {
                element.apply(patch);
                true
            }
            None => false,
        }
    }

    /// Remove the element with `id`, clearing the selection if it was selected.
    pub fn delete(&mut self, id: &ElementId) -> Option<DrawingElement> {
        let index = self.elements.iter().position(|el| &el.id == id)?;
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        Some(self.elements.remove(index))
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.selected = None;
    }

    /// Select exactly the element with `id`, or nothing for `None` or an
    /// unknown id.
    pub fn select(&mut self, id: Option<&ElementId>) {
        self.selected = None;
        for element in &mut self.elements {
            element.selected = id == Some(&element.id);
            if element.selected {
                self.selected = Some(element.id.clone());
            }
        }
    }

    pub fn selected_id(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    pub fn selected(&self) -> Option<&DrawingElement> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    pub fn get(&self, id: &ElementId) -> Option<&DrawingElement> {
        self.elements.iter().find(|el| &el.id == id)
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Elements back to front.
    pub fn elements(&self) -> &[DrawingElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Replace the whole contents, e.g. from a snapshot.
    ///
    /// Duplicate ids are dropped and only the topmost `selected` flag is kept.
    pub fn replace_all(&mut self, elements: Vec<DrawingElement>) {
        self.clear();
        let mut selected = None;
        for element in elements {
            if element.selected {
                selected = Some(element.id.clone());
            }
            self.add(DrawingElement {
                selected: false,
                ..element
            });
        }
        self.select(selected.as_ref());
    }

    /// Topmost element under `point`.
    pub fn find_element_at(&self, point: Point) -> Option<&DrawingElement> {
        hit_test::find_element_at(&self.elements, point)
    }

    /// All elements under `point`, topmost first.
    pub fn elements_at(&self, point: Point) -> Vec<&DrawingElement> {
        hit_test::elements_at(&self.elements, point)
    }
}

/// Live canvas: elements, pan, history and toolbar state.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub store: ElementStore,
    pub camera: Camera,
    pub tools: ToolManager,
    history: History,
    config: CanvasConfig,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create an empty canvas with the default configuration.
    pub fn new() -> Self {
        Self::with_config(CanvasConfig::default())
    }

    /// Create an empty canvas; its state becomes the history baseline.
    pub fn with_config(config: CanvasConfig) -> Self {
        Self {
            store: ElementStore::new(),
            camera: Camera::new(),
            tools: ToolManager::from_config(&config),
            history: History::with_baseline(CanvasState::default()).with_limit(config.history_limit),
            config,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Copy of the current elements and pan.
    pub fn state(&self) -> CanvasState {
        CanvasState {
            elements: self.store.elements().to_vec(),
            zoom: 1.0,
            pan: self.camera.offset,
        }
    }

    /// Record the current state as one undo step.
    pub fn snapshot(&mut self) {
        let state = self.state();
        self.history.snapshot(state);
        log::debug!(
            "History snapshot {} of {}",
            self.history.index().map_or(0, |i| i + 1),
            self.history.len()
        );
    }

    fn restore(&mut self, state: CanvasState) {
        self.store.replace_all(state.elements);
        self.camera.offset = state.pan;
    }

    /// Step back one snapshot. Returns false at the baseline.
    pub fn undo(&mut self) -> bool {
        match self.history.undo().cloned() {
            Some(state) => {
                self.restore(state);
                log::info!("Undo");
                true
            }
            None => false,
        }
    }

    /// Step forward one snapshot. Returns false at the newest entry.
    pub fn redo(&mut self) -> bool {
        match self.history.redo().cloned() {
            Some(state) => {
                self.restore(state);
                log::info!("Redo");
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Replace elements and pan, clear the selection and record the result.
    pub fn load_state(&mut self, state: CanvasState) {
        self.restore(state);
        self.store.select(None);
        self.snapshot();
    }

    /// Remove every element as one undo step.
    pub fn clear_canvas(&mut self) {
        self.store.clear();
        self.snapshot();
    }

    /// Delete the selected element as one undo step.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.store.selected_id().cloned() else {
            return false;
        };
        self.store.delete(&id);
        self.snapshot();
        true
    }

    /// Move the view; not an undo step on its own.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.camera.pan(delta);
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool);
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.tools.set_color(color);
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.tools.set_stroke_width(width);
    }

    pub fn palette(&self) -> &[String] {
        &self.config.palette
    }

    /// Serialize the current state in the file format.
    pub fn export_json(&self) -> Result<String, FileError> {
        storage::export_json(&self.state())
    }

    /// Name for an export made at `now`.
    pub fn export_filename(&self, now: DateTime<Utc>) -> String {
        storage::export_filename(&self.config.export_prefix, now)
    }

    /// Load a file's contents. On error the canvas is left untouched.
    pub fn import_json(&mut self, json: &str) -> Result<(), FileError> {
        let state = storage::import_json(json)?;
        log::info!("Imported {} elements", state.elements.len());
        self.load_state(state);
        Ok(())
    }
}
