//! Editor controller.
//!
//! `EditorState` owns the grid, palette, view transform, tool state and
//! history, and is the single entry point for input. Every handler runs to
//! completion and returns whether the canvas needs a redraw.
//!
//! History granularity: fills, stamps, resizes, clears and palette deletes
//! that touched the grid each take one snapshot immediately. Freehand
//! draw/erase cells are applied live and committed as one snapshot when the
//! stroke ends (release, leave, tool switch, undo).

use crate::history::History;
use crate::input::{InputEvent, Modifiers, PointerButton};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::tools::{GridMutation, Shape, ShapePreview, ToolEvent, ToolKind, ToolState};
use tm_core::config::EditorConfig;
use tm_core::error::ValidationError;
use tm_core::export::export_rows_json;
use tm_core::grid::{Cell, Grid, GridSize};
use tm_core::id::TileId;
use tm_core::palette::Palette;
use tm_core::raster::{flood_fill, stamp_circle, stamp_rect};
use tm_core::view::{ViewTransform, ZoomDirection};

pub struct EditorState {
    pub config: EditorConfig,
    pub grid: Grid,
    pub palette: Palette,
    pub view: ViewTransform,
    pub tools: ToolState,
    history: History,
    /// Freehand cells changed since the last snapshot.
    stroke_dirty: bool,
    /// Last pointer position while a pan gesture is active.
    pan_anchor: Option<(f64, f64)>,
    /// Pan key (Space) held: the primary button pans too.
    pan_key_held: bool,
    /// Canvas size in screen pixels, for keyboard zoom.
    viewport: (f64, f64),
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorState {
    pub fn new(config: EditorConfig) -> Self {
        let size = GridSize::from_pixels(config.map_width, config.map_height, config.tile_size)
            .unwrap_or(GridSize { rows: 1, cols: 1 });
        let grid = Grid::new(size);
        let mut history = History::new(config.history_depth);
        history.reset(&grid);
        log::debug!("editor: {}x{} grid", size.rows, size.cols);

        Self {
            view: ViewTransform::from_config(&config),
            viewport: (f64::from(config.map_width), f64::from(config.map_height)),
            grid,
            palette: Palette::new(),
            tools: ToolState::new(),
            history,
            stroke_dirty: false,
            pan_anchor: None,
            pan_key_held: false,
            config,
        }
    }

    pub fn tile_size(&self) -> u32 {
        self.config.tile_size
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = (width, height);
    }

    pub fn is_panning(&self) -> bool {
        self.pan_anchor.is_some()
    }

    /// Pending polygon overlay, in map pixels.
    pub fn preview(&self) -> Option<ShapePreview> {
        self.tools.preview(self.config.tile_size)
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Handle one input event. Returns `true` if the canvas needs a redraw.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        log::trace!("input {event:?}");
        match event {
            InputEvent::PointerDown { x, y, button } => self.pointer_down(*x, *y, *button),
            InputEvent::PointerMove { x, y } => self.pointer_move(*x, *y),
            InputEvent::PointerUp { x, y } => self.pointer_up(*x, *y),
            InputEvent::PointerLeave => self.pointer_leave(),
            InputEvent::Wheel { x, y, delta_y } => match ZoomDirection::from_wheel(*delta_y) {
                Some(direction) => self.view.zoom_at(*x, *y, direction),
                None => false,
            },
            InputEvent::KeyDown { key, modifiers } => self.key_down(key, *modifiers),
            InputEvent::KeyUp { key } => {
                if key == " " {
                    self.pan_key_held = false;
                }
                false
            }
        }
    }

    fn pointer_down(&mut self, x: f64, y: f64, button: PointerButton) -> bool {
        if button.pans() || self.pan_key_held {
            self.pan_anchor = Some((x, y));
            return false;
        }
        // A press without a matching release still closes the last stroke.
        self.finish_stroke();
        let cell = self.cell_at(x, y);
        self.run_tool(ToolEvent::Press(cell))
    }

    fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        if let Some((last_x, last_y)) = self.pan_anchor {
            self.view.pan_by(x - last_x, y - last_y);
            self.pan_anchor = Some((x, y));
            return true;
        }
        if !self.tools.is_active() {
            return false;
        }
        let cell = self.cell_at(x, y);
        let changed = self.run_tool(ToolEvent::Move(cell));
        changed || self.preview().is_some()
    }

    fn pointer_up(&mut self, x: f64, y: f64) -> bool {
        if self.pan_anchor.take().is_some() {
            return false;
        }
        let had_preview = self.preview().is_some();
        let cell = self.cell_at(x, y);
        let changed = self.run_tool(ToolEvent::Release(cell));
        self.finish_stroke();
        changed || had_preview
    }

    fn pointer_leave(&mut self) -> bool {
        self.pan_anchor = None;
        let had_preview = self.preview().is_some();
        let changed = self.run_tool(ToolEvent::Leave);
        self.finish_stroke();
        changed || had_preview
    }

    fn key_down(&mut self, key: &str, m: Modifiers) -> bool {
        match ShortcutMap::resolve(key, m.ctrl, m.shift, m.alt, m.meta) {
            Some(action) => self.apply_shortcut(action),
            None => false,
        }
    }

    /// Run a shortcut action. Returns `true` if the canvas needs a redraw.
    pub fn apply_shortcut(&mut self, action: ShortcutAction) -> bool {
        let (cx, cy) = (self.viewport.0 / 2.0, self.viewport.1 / 2.0);
        match action {
            ShortcutAction::ToolDraw => self.select_tool(ToolKind::Draw),
            ShortcutAction::ToolFill => self.select_tool(ToolKind::Fill),
            ShortcutAction::ToolErase => self.select_tool(ToolKind::Erase),
            ShortcutAction::ToolPolygon => {
                let shape = self.tools.shape();
                self.select_tool(ToolKind::Polygon(shape))
            }
            ShortcutAction::ShapeRectangle => self.select_shape(Shape::Rectangle),
            ShortcutAction::ShapeCircle => self.select_shape(Shape::Circle),
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Redo => self.redo(),
            ShortcutAction::ClearMap => self.clear_map(),
            ShortcutAction::Cancel => self.cancel_stroke(),
            ShortcutAction::ZoomIn => self.view.zoom_at(cx, cy, ZoomDirection::In),
            ShortcutAction::ZoomOut => self.view.zoom_at(cx, cy, ZoomDirection::Out),
            ShortcutAction::ResetView => {
                self.view.reset();
                true
            }
            ShortcutAction::PanStart => {
                self.pan_key_held = true;
                false
            }
        }
    }

    fn cell_at(&self, x: f64, y: f64) -> Cell {
        self.view.screen_to_cell(x, y, self.config.tile_size)
    }

    fn run_tool(&mut self, event: ToolEvent) -> bool {
        let mutations = self.tools.handle(event, self.palette.selected());
        self.apply_mutations(mutations)
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Apply tool output to the grid. Returns `true` if any cell changed.
    pub fn apply_mutations(&mut self, mutations: Vec<GridMutation>) -> bool {
        let mut changed = false;
        for mutation in mutations {
            match mutation {
                GridMutation::Paint { cells, tile } => {
                    for cell in cells {
                        if self.grid.set(cell.col, cell.row, tile) {
                            self.stroke_dirty = true;
                            changed = true;
                        }
                    }
                }
                GridMutation::Fill { at, tile } => {
                    let n = flood_fill(&mut self.grid, at, Some(tile));
                    changed |= self.commit_if(n > 0);
                }
                GridMutation::Stamp {
                    shape,
                    anchor,
                    target,
                    tile,
                } => {
                    let n = match shape {
                        Shape::Rectangle => stamp_rect(&mut self.grid, anchor, target, Some(tile)),
                        Shape::Circle => stamp_circle(&mut self.grid, anchor, target, Some(tile)),
                    };
                    changed |= self.commit_if(n > 0);
                }
            }
        }
        changed
    }

    /// Snapshot after a discrete mutation if it changed anything.
    fn commit_if(&mut self, changed: bool) -> bool {
        if changed {
            self.finish_stroke();
            self.history.snapshot(&self.grid);
        }
        changed
    }

    /// Commit pending freehand cells as one history step.
    fn finish_stroke(&mut self) {
        if self.stroke_dirty {
            self.stroke_dirty = false;
            self.history.snapshot(&self.grid);
        }
    }

    /// Abandon the in-progress session. Freehand cells already painted stay
    /// and are committed.
    pub fn cancel_stroke(&mut self) -> bool {
        let had_preview = self.preview().is_some();
        let was_active = self.tools.cancel();
        self.finish_stroke();
        was_active && had_preview
    }

    // ─── Tools ───────────────────────────────────────────────────────────

    /// Switch tools. Returns `true` if the tool changed or a preview was
    /// dropped.
    pub fn select_tool(&mut self, kind: ToolKind) -> bool {
        let had_preview = self.preview().is_some();
        let changed = self.tools.select(kind);
        self.finish_stroke();
        if changed {
            log::debug!("tool: {}", kind.name());
        }
        changed || had_preview
    }

    pub fn select_shape(&mut self, shape: Shape) -> bool {
        self.select_tool(ToolKind::Polygon(shape))
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.tools.cancel();
        self.finish_stroke();
        match self.history.undo() {
            Some(grid) => {
                self.grid = grid;
                log::debug!("undo -> {}", self.history.pointer());
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        self.tools.cancel();
        self.finish_stroke();
        match self.history.redo() {
            Some(grid) => {
                self.grid = grid;
                log::debug!("redo -> {}", self.history.pointer());
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo() || self.stroke_dirty
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    // ─── Map ─────────────────────────────────────────────────────────────

    /// Resize the map, keeping the overlapping region.
    pub fn resize(&mut self, size: GridSize) -> bool {
        self.tools.cancel();
        self.finish_stroke();
        if size == self.grid.size() {
            return false;
        }
        self.grid.resize(size);
        self.history.snapshot(&self.grid);
        true
    }

    /// Resize from raw form values. On error nothing changes.
    pub fn resize_from_input(&mut self, rows: f64, cols: f64) -> Result<bool, ValidationError> {
        let size = GridSize::from_f64(rows, cols).inspect_err(|e| log::warn!("resize: {e}"))?;
        Ok(self.resize(size))
    }

    /// Empty every cell.
    pub fn clear_map(&mut self) -> bool {
        self.tools.cancel();
        self.finish_stroke();
        let changed = self.grid.clear();
        self.commit_if(changed)
    }

    /// JSON array of row strings.
    pub fn export_rows_json(&self) -> String {
        export_rows_json(&self.grid, &self.palette)
    }

    // ─── Palette ─────────────────────────────────────────────────────────

    pub fn create_tile(
        &mut self,
        name: &str,
        glyph: &str,
        color: &str,
    ) -> Result<TileId, ValidationError> {
        self.palette
            .create_tile(name, glyph, color)
            .inspect_err(|e| log::warn!("create tile: {e}"))
    }

    /// Edit a tile in place. The grid keeps its handles, so only a redraw
    /// is needed.
    pub fn edit_tile(
        &mut self,
        id: TileId,
        name: &str,
        glyph: &str,
        color: &str,
    ) -> Result<(), ValidationError> {
        self.palette.edit_tile(id, name, glyph, color)
    }

    pub fn select_tile(&mut self, id: Option<TileId>) -> bool {
        self.palette.select(id)
    }

    /// Remove a tile from the palette and every cell that uses it.
    pub fn delete_tile(&mut self, id: TileId) -> bool {
        if !self.palette.delete_tile(id) {
            return false;
        }
        self.finish_stroke();
        let removed = self.grid.remove_references(id);
        log::debug!("palette: deleted {id}, cleared {removed} cells");
        self.commit_if(removed > 0);
        true
    }

    /// Replace the palette from a JSON file. On error nothing changes.
    pub fn import_palette(&mut self, json: &str) -> Result<usize, ValidationError> {
        self.palette
            .import_json(json)
            .inspect_err(|e| log::warn!("palette import: {e}"))
    }

    pub fn export_palette(&self) -> String {
        self.palette.export_json()
    }
}
