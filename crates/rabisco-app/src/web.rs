//! WebAssembly entry point and browser bindings.
//!
//! The page forwards DOM events to [`Whiteboard`] and swaps the SVG returned
//! by `render` into the document. File download and upload go through the
//! usual Blob / hidden `<input type=file>` dance.

use crate::keys::key_press_from_dom;
use crate::prompts::{CLEAR_PROMPT, open_prompt};
use crate::shortcuts::ShortcutRegistry;
use kurbo::{Point, Size};
use rabisco_core::input::{Modifiers, MouseButton, PointerEvent};
use rabisco_core::interaction::{Command, InteractionController};
use rabisco_core::storage::FileError;
use rabisco_core::tools::ToolKind;
use rabisco_core::{Canvas, CanvasConfig};
use rabisco_render::{GridStyle, RenderContext, Renderer, SvgRenderer};
use std::cell::RefCell;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

thread_local! {
    /// Contents of a file picked by the user, waiting for `poll_pending_import`.
    static PENDING_IMPORT: RefCell<Option<Result<String, FileError>>> = const { RefCell::new(None) };
}

fn set_pending_import(result: Result<String, FileError>) {
    PENDING_IMPORT.with(|cell| {
        *cell.borrow_mut() = Some(result);
    });
}

fn take_pending_import() -> Option<Result<String, FileError>> {
    PENDING_IMPORT.with(|cell| cell.borrow_mut().take())
}

/// Show a blocking message box.
fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        window.alert_with_message(message).ok();
    }
}

/// Ask a yes/no question; a missing window counts as "no".
fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

fn report(error: &FileError) {
    log::error!("{} ({})", error, error.detail());
    alert(&error.to_string());
}

fn download_file(filename: &str, content: &str, mime_type: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    let blob_parts = js_sys::Array::new();
    blob_parts.push(&JsValue::from_str(content));

    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime_type);

    let blob = web_sys::Blob::new_with_str_sequence_and_options(&blob_parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let a = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()?;
    a.set_href(&url);
    a.set_download(filename);
    a.click();

    web_sys::Url::revoke_object_url(&url).ok();
    Ok(())
}

/// Open the browser file picker; the file's text lands in `PENDING_IMPORT`.
fn trigger_file_input() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    let input = document
        .create_element("input")?
        .dyn_into::<web_sys::HtmlInputElement>()?;
    input.set_type("file");
    input.set_accept(".json,application/json");
    input.style().set_property("display", "none").ok();

    let input_clone = input.clone();
    let onchange = Closure::once(Box::new(move |_event: web_sys::Event| {
        if let Some(file) = input_clone.files().and_then(|files| files.get(0)) {
            if let Err(e) = read_file(&file) {
                log::error!("Failed to start reading {}: {:?}", file.name(), e);
                set_pending_import(Err(FileError::ReadFailure(format!("{e:?}"))));
            }
        }
        input_clone.remove();
    }) as Box<dyn FnOnce(_)>);

    input.set_onchange(Some(onchange.as_ref().unchecked_ref()));
    onchange.forget();

    document.body().ok_or("No body")?.append_child(&input)?;
    input.click();
    Ok(())
}

fn read_file(file: &web_sys::File) -> Result<(), JsValue> {
    let reader = web_sys::FileReader::new()?;

    let reader_clone = reader.clone();
    let onload = Closure::once(Box::new(move |_event: web_sys::Event| {
        let text = reader_clone.result().ok().and_then(|value| value.as_string());
        match text {
            Some(text) => set_pending_import(Ok(text)),
            None => set_pending_import(Err(FileError::ReadFailure(
                "file contents are not text".to_string(),
            ))),
        }
    }) as Box<dyn FnOnce(_)>);

    let onerror = Closure::once(Box::new(move |_event: web_sys::Event| {
        set_pending_import(Err(FileError::ReadFailure("FileReader error".to_string())));
    }) as Box<dyn FnOnce(_)>);

    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onload.forget();
    onerror.forget();

    reader.read_as_text(file)
}

fn modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers {
        shift,
        ctrl,
        alt,
        meta,
    }
}

/// The whiteboard as seen from JavaScript.
#[wasm_bindgen]
pub struct Whiteboard {
    canvas: Canvas,
    controller: InteractionController,
    renderer: SvgRenderer,
    grid: GridStyle,
}

#[wasm_bindgen]
impl Whiteboard {
    /// Create a whiteboard, optionally from a JSON configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<Whiteboard, JsValue> {
        let config = match config_json {
            Some(json) => {
                CanvasConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => CanvasConfig::default(),
        };
        Ok(Self {
            canvas: Canvas::with_config(config),
            controller: InteractionController::new(),
            renderer: SvgRenderer::new(),
            grid: GridStyle::default(),
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn pointer_down(&mut self, x: f64, y: f64, button: i16, shift: bool, ctrl: bool, alt: bool, meta: bool) {
        let Some(button) = MouseButton::from_dom_index(button) else {
            return;
        };
        let event = PointerEvent::Down {
            position: Point::new(x, y),
            button,
            modifiers: modifiers(shift, ctrl, alt, meta),
        };
        self.controller.handle_pointer(&mut self.canvas, event);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let event = PointerEvent::Move {
            position: Point::new(x, y),
        };
        self.controller.handle_pointer(&mut self.canvas, event);
    }

    pub fn pointer_up(&mut self, x: f64, y: f64, button: i16) {
        let button = MouseButton::from_dom_index(button).unwrap_or(MouseButton::Left);
        let event = PointerEvent::Up {
            position: Point::new(x, y),
            button,
        };
        self.controller.handle_pointer(&mut self.canvas, event);
    }

    /// Pointer left the window or the window lost focus.
    pub fn pointer_cancel(&mut self) {
        self.controller.handle_pointer(&mut self.canvas, PointerEvent::Cancel);
    }

    pub fn double_click(&mut self, x: f64, y: f64) {
        let event = PointerEvent::DoubleClick {
            position: Point::new(x, y),
        };
        self.controller.handle_pointer(&mut self.canvas, event);
    }

    /// Handle a `keydown`. Returns true when the browser default should be
    /// prevented (save/open shortcuts).
    pub fn key_down(&mut self, key: &str, shift: bool, ctrl: bool, alt: bool, meta: bool) -> bool {
        let press = key_press_from_dom(key, shift, ctrl, alt, meta);
        match self.controller.handle_key(&mut self.canvas, press) {
            Some(Command::Save) => {
                self.save();
                true
            }
            Some(Command::Open) => {
                self.open();
                true
            }
            None => false,
        }
    }

    /// Select a tool by name; returns false for unknown names.
    pub fn set_tool(&mut self, name: &str) -> bool {
        match ToolKind::from_name(name) {
            Some(tool) => {
                self.canvas.set_tool(tool);
                true
            }
            None => false,
        }
    }

    pub fn tool(&self) -> String {
        self.canvas.tools.current_tool.name().to_string()
    }

    pub fn set_color(&mut self, color: &str) {
        self.canvas.set_color(color);
    }

    pub fn color(&self) -> String {
        self.canvas.tools.color.clone()
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.canvas.set_stroke_width(width);
    }

    pub fn stroke_width(&self) -> f64 {
        self.canvas.tools.stroke_width
    }

    /// Upper bound for the stroke width slider.
    pub fn max_stroke_width(&self) -> f64 {
        self.canvas.tools.max_stroke_width()
    }

    pub fn palette(&self) -> js_sys::Array {
        self.canvas
            .palette()
            .iter()
            .map(|color| JsValue::from_str(color))
            .collect()
    }

    pub fn cycle_grid(&mut self) -> String {
        self.grid = self.grid.next();
        self.grid.name().to_string()
    }

    pub fn undo(&mut self) -> bool {
        self.controller.undo(&mut self.canvas)
    }

    pub fn redo(&mut self) -> bool {
        self.controller.redo(&mut self.canvas)
    }

    pub fn can_undo(&self) -> bool {
        self.canvas.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.canvas.can_redo()
    }

    /// Clear the canvas after the user confirms. Returns false if they declined.
    pub fn clear(&mut self) -> bool {
        if !confirm(CLEAR_PROMPT) {
            return false;
        }
        self.canvas.clear_canvas();
        true
    }

    pub fn delete_selected(&mut self) -> bool {
        self.canvas.delete_selected()
    }

    /// Text of the open inline editor, if any.
    pub fn editing_text(&self) -> Option<String> {
        self.controller
            .editing_text()
            .map(|(_, buffer)| buffer.to_string())
    }

    /// Screen position `[x, y]` of the baseline of the text being edited.
    pub fn editing_position(&self) -> Option<Box<[f64]>> {
        let (id, _) = self.controller.editing_text()?;
        let text = self.canvas.store.get(id)?.shape.as_text()?;
        let screen = self.canvas.camera.world_to_screen(text.position());
        Some(vec![screen.x, screen.y].into_boxed_slice())
    }

    pub fn set_edit_buffer(&mut self, text: &str) {
        self.controller.set_edit_buffer(text);
    }

    /// Enter or focus loss in the inline editor.
    pub fn commit_text(&mut self) -> bool {
        self.controller.commit_text(&mut self.canvas)
    }

    pub fn cancel_text(&mut self) {
        self.controller.cancel_text();
    }

    /// Render the canvas as SVG markup.
    pub fn render(&mut self, width: f64, height: f64) -> Result<String, JsValue> {
        let state = self.canvas.state();
        let editing = self.controller.editing_text().map(|(id, _)| id);
        let ctx = RenderContext::new(&state, Size::new(width, height))
            .with_grid(self.grid)
            .with_editing_element(editing);
        self.renderer
            .build_scene(&ctx)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(self.renderer.take_svg())
    }

    pub fn export_json(&self) -> Result<String, JsValue> {
        self.canvas
            .export_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Download the canvas as a timestamped JSON file.
    pub fn save(&self) {
        let filename = self.canvas.export_filename(chrono::Utc::now());
        let result = self.canvas.export_json().and_then(|json| {
            download_file(&filename, &json, "application/json")
                .map_err(|e| FileError::SerializationFailure(format!("{e:?}")))
        });
        match result {
            Ok(()) => log::info!("Exported {filename}"),
            Err(e) => report(&e),
        }
    }

    /// Ask the user for a file; call `poll_pending_import` until it returns true.
    pub fn open(&self) {
        if open_prompt(&self.canvas).is_some_and(|prompt| !confirm(prompt)) {
            return;
        }
        if let Err(e) = trigger_file_input() {
            report(&FileError::ReadFailure(format!("{e:?}")));
        }
    }

    /// Apply a picked file, if one has finished loading. Returns true when a
    /// file was handled (successfully or not).
    pub fn poll_pending_import(&mut self) -> bool {
        let Some(result) = take_pending_import() else {
            return false;
        };
        self.controller.cancel_text();
        if let Err(e) = result.and_then(|json| self.canvas.import_json(&json)) {
            report(&e);
        }
        true
    }

    /// Human-readable list of keyboard shortcuts.
    pub fn shortcuts() -> String {
        ShortcutRegistry::help_text()
    }
}

/// Initialize logging when the module loads.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    console_error_panic_hook::set_once();

    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&JsValue::from_str("Logger already initialized"));
    }

    log::info!("Starting Rabisco (WASM)");
    ShortcutRegistry::log_all();
}
