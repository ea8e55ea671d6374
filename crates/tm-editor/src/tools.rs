//! Tool state machine.
//!
//! Translates pointer events (already resolved to grid cells) into
//! `GridMutation`s that `EditorState` applies to the grid. Tools never touch
//! the grid themselves.
//!
//! | Tool | Press | Move | Release | Leave |
//! |------|-------|------|---------|-------|
//! | Draw | paint cell | paint line to cell | end stroke | end stroke |
//! | Erase | clear cell | clear line to cell | end stroke | end stroke |
//! | Fill | flood fill | — | — | — |
//! | Polygon | record anchor | update preview | stamp shape | discard |

use tm_core::grid::Cell;
use tm_core::id::TileId;
use tm_core::raster::line_cells;

/// Sub-shape for the polygon tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    #[default]
    Rectangle,
    Circle,
}

/// The active tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Draw,
    Fill,
    Erase,
    Polygon(Shape),
}

impl ToolKind {
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Draw => "draw",
            ToolKind::Fill => "fill",
            ToolKind::Erase => "erase",
            ToolKind::Polygon(_) => "polygon",
        }
    }

    /// Parse a tool name; `polygon` uses `shape` for its sub-selection.
    pub fn from_name(name: &str, shape: Shape) -> Option<Self> {
        match name {
            "draw" => Some(ToolKind::Draw),
            "fill" => Some(ToolKind::Fill),
            "erase" => Some(ToolKind::Erase),
            "polygon" => Some(ToolKind::Polygon(shape)),
            _ => None,
        }
    }
}

impl Shape {
    pub fn name(self) -> &'static str {
        match self {
            Shape::Rectangle => "rectangle",
            Shape::Circle => "circle",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rectangle" => Some(Shape::Rectangle),
            "circle" => Some(Shape::Circle),
            _ => None,
        }
    }
}

/// A pointer event resolved to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolEvent {
    Press(Cell),
    Move(Cell),
    Release(Cell),
    Leave,
}

/// A grid edit produced by a tool.
#[derive(Debug, Clone, PartialEq)]
pub enum GridMutation {
    /// Freehand draw or erase: write `tile` into each cell. Part of a stroke.
    Paint { cells: Vec<Cell>, tile: Option<TileId> },
    /// Bucket fill from `at`.
    Fill { at: Cell, tile: TileId },
    /// Shape stamp from `anchor` to `target`.
    Stamp {
        shape: Shape,
        anchor: Cell,
        target: Cell,
        tile: TileId,
    },
}

/// Dashed overlay for a pending polygon, in map pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapePreview {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle { cx: f64, cy: f64, radius: f64 },
}

/// State for one press-to-release interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StrokeSession {
    /// Cell under the pointer at press time.
    anchor: Cell,
    /// Most recent cell seen during the drag.
    last: Cell,
}

/// The active tool plus any in-progress stroke.
#[derive(Debug, Clone)]
pub struct ToolState {
    kind: ToolKind,
    /// Shape remembered across leaving and re-entering polygon mode.
    shape: Shape,
    session: Option<StrokeSession>,
}

impl Default for ToolState {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolState {
    pub fn new() -> Self {
        Self {
            kind: ToolKind::Draw,
            shape: Shape::Rectangle,
            session: None,
        }
    }

    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    /// The remembered polygon shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Whether a stroke session is in progress.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Switch tools, cancelling any session. Entering polygon mode without
    /// an explicit shape keeps the remembered one.
    pub fn select(&mut self, kind: ToolKind) -> bool {
        if let ToolKind::Polygon(shape) = kind {
            self.shape = shape;
        }
        self.cancel();
        let changed = kind != self.kind;
        self.kind = kind;
        changed
    }

    /// Enter polygon mode with the remembered shape.
    pub fn select_polygon(&mut self) -> bool {
        self.select(ToolKind::Polygon(self.shape))
    }

    /// Change the polygon sub-shape. Also switches to the polygon tool.
    pub fn select_shape(&mut self, shape: Shape) -> bool {
        self.select(ToolKind::Polygon(shape))
    }

    /// Drop the in-progress session without producing mutations.
    /// Returns `true` if a session was active.
    pub fn cancel(&mut self) -> bool {
        self.session.take().is_some()
    }

    /// Feed one event through the active tool.
    pub fn handle(&mut self, event: ToolEvent, selected: Option<TileId>) -> Vec<GridMutation> {
        match self.kind {
            ToolKind::Draw => match selected {
                Some(tile) => self.handle_freehand(event, Some(tile)),
                None => {
                    self.session = None;
                    vec![]
                }
            },
            ToolKind::Erase => self.handle_freehand(event, None),
            ToolKind::Fill => match (event, selected) {
                (ToolEvent::Press(at), Some(tile)) => vec![GridMutation::Fill { at, tile }],
                _ => vec![],
            },
            ToolKind::Polygon(shape) => self.handle_polygon(event, shape, selected),
        }
    }

    fn handle_freehand(&mut self, event: ToolEvent, tile: Option<TileId>) -> Vec<GridMutation> {
        match event {
            ToolEvent::Press(cell) => {
                self.session = Some(StrokeSession {
                    anchor: cell,
                    last: cell,
                });
                vec![GridMutation::Paint {
                    cells: vec![cell],
                    tile,
                }]
            }
            ToolEvent::Move(cell) => {
                let Some(session) = self.session.as_mut() else {
                    return vec![];
                };
                if session.last == cell {
                    return vec![];
                }
                let mut cells = line_cells(session.last, cell);
                cells.remove(0);
                session.last = cell;
                vec![GridMutation::Paint { cells, tile }]
            }
            ToolEvent::Release(_) | ToolEvent::Leave => {
                self.session = None;
                vec![]
            }
        }
    }

    fn handle_polygon(
        &mut self,
        event: ToolEvent,
        shape: Shape,
        selected: Option<TileId>,
    ) -> Vec<GridMutation> {
        match event {
            ToolEvent::Press(cell) => {
                if selected.is_some() {
                    self.session = Some(StrokeSession {
                        anchor: cell,
                        last: cell,
                    });
                }
                vec![]
            }
            ToolEvent::Move(cell) => {
                if let Some(session) = self.session.as_mut() {
                    session.last = cell;
                }
                vec![]
            }
            ToolEvent::Release(target) => {
                let Some(session) = self.session.take() else {
                    return vec![];
                };
                let Some(tile) = selected else {
                    return vec![];
                };
                vec![GridMutation::Stamp {
                    shape,
                    anchor: session.anchor,
                    target,
                    tile,
                }]
            }
            ToolEvent::Leave => {
                self.session = None;
                vec![]
            }
        }
    }

    /// Overlay for the pending polygon, in map pixels.
    pub fn preview(&self, tile_size: u32) -> Option<ShapePreview> {
        let ToolKind::Polygon(shape) = self.kind else {
            return None;
        };
        let session = self.session?;
        let ts = f64::from(tile_size);
        let (a, b) = (session.anchor, session.last);
        Some(match shape {
            Shape::Rectangle => {
                let (min_col, max_col) = (a.col.min(b.col), a.col.max(b.col));
                let (min_row, max_row) = (a.row.min(b.row), a.row.max(b.row));
                ShapePreview::Rect {
                    x: f64::from(min_col) * ts,
                    y: f64::from(min_row) * ts,
                    width: f64::from(max_col - min_col + 1) * ts,
                    height: f64::from(max_row - min_row + 1) * ts,
                }
            }
            Shape::Circle => {
                let center = |c: Cell| ((f64::from(c.col) + 0.5) * ts, (f64::from(c.row) + 0.5) * ts);
                let (cx, cy) = center(a);
                let (hx, hy) = center(b);
                ShapePreview::Circle {
                    cx,
                    cy,
                    radius: (hx - cx).hypot(hy - cy),
                }
            }
        })
    }
}
