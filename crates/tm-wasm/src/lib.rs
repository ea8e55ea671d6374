//! WASM bridge for the tile map editor.
//!
//! Compiled via `wasm-pack build --target web`. The page script owns the
//! `<canvas>` and DOM controls; it forwards raw input here and calls
//! `render` whenever a handler reports a change.

mod render2d;

use serde::Serialize;
use tm_core::config::EditorConfig;
use tm_core::error::ValidationError;
use tm_core::grid::GridSize;
use tm_core::id::TileId;
use tm_core::palette::Palette;
use tm_editor::input::{InputEvent, Modifiers};
use tm_editor::shortcuts::ShortcutMap;
use tm_editor::state::EditorState;
use tm_editor::tools::{Shape, ToolKind};
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The main WASM-facing editor controller.
///
/// Wraps `EditorState` plus the canvas size and theme. All interaction
/// from the page goes through this struct.
#[wasm_bindgen]
pub struct TileMapCanvas {
    editor: EditorState,
    width: f64,
    height: f64,
    dark_mode: bool,
}

#[wasm_bindgen]
impl TileMapCanvas {
    /// Create an editor with the default 25×19 map, sized to the canvas.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_editor(EditorState::default(), width, height)
    }

    /// Create an editor from a JSON config object. Unknown or invalid
    /// fields fall back to their defaults.
    pub fn with_config(config_json: &str, width: f64, height: f64) -> Self {
        let config = EditorConfig::from_json(config_json).unwrap_or_else(|e| {
            log::warn!("config: {e}, using defaults");
            EditorConfig::default()
        });
        Self::with_editor(EditorState::new(config), width, height)
    }

    /// Render the map to a Canvas2D context.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        let theme = if self.dark_mode {
            render2d::CanvasTheme::dark()
        } else {
            render2d::CanvasTheme::light()
        };
        render2d::render_map(ctx, &self.editor, self.width, self.height, &theme);
    }

    pub fn set_theme(&mut self, is_dark: bool) {
        self.dark_mode = is_dark;
    }

    /// The canvas element was resized.
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.editor.set_viewport(width, height);
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    /// `button` is `MouseEvent.button`. Returns true if a redraw is needed.
    pub fn handle_pointer_down(&mut self, x: f64, y: f64, button: i16) -> bool {
        self.editor
            .handle(&InputEvent::from_pointer_down(x, y, button))
    }

    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.editor.handle(&InputEvent::from_pointer_move(x, y))
    }

    pub fn handle_pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.editor.handle(&InputEvent::from_pointer_up(x, y))
    }

    pub fn handle_pointer_leave(&mut self) -> bool {
        self.editor.handle(&InputEvent::PointerLeave)
    }

    pub fn handle_wheel(&mut self, x: f64, y: f64, delta_y: f64) -> bool {
        self.editor.handle(&InputEvent::Wheel { x, y, delta_y })
    }

    /// True while a pan gesture is in progress (for the cursor style).
    pub fn is_panning(&self) -> bool {
        self.editor.is_panning()
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Handle a key press. Returns a JSON string:
    /// `{"changed":bool,"action":"<name>","tool":"<name>","shape":"<name>"}`
    ///
    /// `action` is `"none"` for unbound keys so the page can let the
    /// browser default through.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        let action = ShortcutMap::resolve(key, ctrl, shift, alt, meta);
        let changed = self.editor.handle(&InputEvent::KeyDown {
            key: key.to_string(),
            modifiers: Modifiers {
                shift,
                ctrl,
                alt,
                meta,
            },
        });
        to_json(&KeyResult {
            changed,
            action: action.map_or("none", |a| a.name()),
            tool: self.editor.tools.kind().name(),
            shape: self.editor.tools.shape().name(),
        })
    }

    pub fn handle_key_up(&mut self, key: &str) -> bool {
        self.editor.handle(&InputEvent::KeyUp {
            key: key.to_string(),
        })
    }

    // ─── Tools ───────────────────────────────────────────────────────────

    /// Set the active tool by name: `draw`, `fill`, `erase` or `polygon`.
    /// Returns false for unknown names.
    pub fn set_tool(&mut self, name: &str) -> bool {
        match ToolKind::from_name(name, self.editor.tools.shape()) {
            Some(kind) => {
                self.editor.select_tool(kind);
                true
            }
            None => false,
        }
    }

    pub fn get_tool_name(&self) -> String {
        self.editor.tools.kind().name().to_string()
    }

    /// Set the polygon shape (`rectangle` or `circle`) and switch to it.
    pub fn set_shape(&mut self, name: &str) -> bool {
        match Shape::from_name(name) {
            Some(shape) => {
                self.editor.select_shape(shape);
                true
            }
            None => false,
        }
    }

    pub fn get_shape_name(&self) -> String {
        self.editor.tools.shape().name().to_string()
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.editor.can_redo()
    }

    // ─── Map ─────────────────────────────────────────────────────────────

    /// Resize from the form fields. Returns `{"ok":true}` or
    /// `{"ok":false,"error":"..."}`.
    pub fn resize_map(&mut self, rows: f64, cols: f64) -> String {
        status(self.editor.resize_from_input(rows, cols).map(|_| ()))
    }

    /// `{"rows":n,"cols":n}`
    pub fn get_map_size(&self) -> String {
        let GridSize { rows, cols } = self.editor.grid.size();
        to_json(&MapSize { rows, cols })
    }

    pub fn clear_map(&mut self) -> bool {
        self.editor.clear_map()
    }

    /// The map as a JSON array of row strings.
    pub fn export_rows_json(&self) -> String {
        self.editor.export_rows_json()
    }

    /// The map as newline-terminated text rows, for a `.txt` download.
    pub fn export_rows_text(&self) -> String {
        tm_core::export_rows_text(&self.editor.grid, &self.editor.palette)
    }

    /// The map as a JS array of row strings.
    pub fn export_rows(&self) -> js_sys::Array {
        self.editor
            .grid
            .export_rows(&self.editor.palette)
            .map(|row| JsValue::from_str(&row))
            .collect()
    }

    // ─── View ────────────────────────────────────────────────────────────

    pub fn reset_view(&mut self) -> bool {
        self.editor.view.reset();
        true
    }

    /// `{"scale":f,"offsetX":f,"offsetY":f}`
    pub fn get_view_json(&self) -> String {
        let view = &self.editor.view;
        to_json(&ViewState {
            scale: view.scale,
            offset_x: view.offset_x,
            offset_y: view.offset_y,
        })
    }

    // ─── Palette ─────────────────────────────────────────────────────────

    /// Add a tile from the form. Returns `{"ok":true,"id":"tile_n"}` or
    /// `{"ok":false,"error":"..."}`.
    pub fn create_tile(&mut self, name: &str, glyph: &str, color: &str) -> String {
        match self.editor.create_tile(name, glyph, color) {
            Ok(id) => to_json(&Created {
                ok: true,
                id: id.as_str(),
            }),
            Err(e) => status(Err(e)),
        }
    }

    pub fn edit_tile(&mut self, id: &str, name: &str, glyph: &str, color: &str) -> String {
        let result = match self.lookup(id) {
            Some(tile) => self.editor.edit_tile(tile, name, glyph, color),
            None => Err(ValidationError::UnknownTile(id.to_string())),
        };
        status(result)
    }

    /// Delete a tile and clear every cell that uses it.
    pub fn delete_tile(&mut self, id: &str) -> bool {
        match self.lookup(id) {
            Some(tile) => self.editor.delete_tile(tile),
            None => false,
        }
    }

    /// Select a tile by id. An empty id clears the selection.
    pub fn select_tile(&mut self, id: &str) -> bool {
        if id.is_empty() {
            return self.editor.select_tile(None);
        }
        match self.lookup(id) {
            Some(tile) => self.editor.select_tile(Some(tile)),
            None => false,
        }
    }

    /// Palette entries for the swatch list:
    /// `[{"id","name","char","color","selected"}]`
    pub fn get_palette_json(&self) -> String {
        let selected = self.editor.palette.selected();
        let entries: Vec<PaletteEntry<'_>> = self
            .editor
            .palette
            .tiles()
            .map(|tile| PaletteEntry {
                id: tile.id.as_str(),
                name: &tile.name,
                glyph: &tile.glyph,
                color: tile.color.to_css(),
                selected: selected == Some(tile.id),
            })
            .collect();
        to_json(&entries)
    }

    /// Replace the palette from a loaded JSON file. Returns
    /// `{"ok":true,"count":n}` or `{"ok":false,"error":"..."}`.
    pub fn import_palette(&mut self, json: &str) -> String {
        match self.editor.import_palette(json) {
            Ok(count) => to_json(&Imported { ok: true, count }),
            Err(e) => status(Err(e)),
        }
    }

    /// The palette in the import file format.
    pub fn export_palette(&self) -> String {
        self.editor.export_palette()
    }
}

impl TileMapCanvas {
    fn with_editor(mut editor: EditorState, width: f64, height: f64) -> Self {
        console_error_panic_hook_setup();
        editor.set_viewport(width, height);
        Self {
            editor,
            width,
            height,
            dark_mode: false,
        }
    }

    /// Resolve a listed tile by its id string.
    fn lookup(&self, id: &str) -> Option<TileId> {
        self.editor
            .palette
            .tiles()
            .map(|t| t.id)
            .find(|t| t.as_str() == id)
    }
}

// ─── JSON replies ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct KeyResult {
    changed: bool,
    action: &'static str,
    tool: &'static str,
    shape: &'static str,
}

#[derive(Serialize)]
struct Status {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct Created<'a> {
    ok: bool,
    id: &'a str,
}

#[derive(Serialize)]
struct Imported {
    ok: bool,
    count: usize,
}

#[derive(Serialize)]
struct MapSize {
    rows: usize,
    cols: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewState {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

#[derive(Serialize)]
struct PaletteEntry<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(rename = "char")]
    glyph: &'a str,
    color: String,
    selected: bool,
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("serialize reply: {e}");
        r#"{"ok":false}"#.to_string()
    })
}

fn status(result: Result<(), ValidationError>) -> String {
    to_json(&match result {
        Ok(()) => Status {
            ok: true,
            error: None,
        },
        Err(e) => Status {
            ok: false,
            error: Some(e.to_string()),
        },
    })
}

/// Install a panic hook that forwards panics to the browser console.
fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("tile map panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

/// Validate a palette file without loading it.
/// Returns `{"ok":true}` or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_palette(json: &str) -> String {
    status(Palette::new().import_json(json).map(|_| ()))
}
