//! Shape rasterizers that write tiles into a `Grid`.
//!
//! Every function mutates the grid in place and returns how many cells
//! actually changed, so callers can skip a history snapshot when the
//! operation was a no-op.

use crate::grid::{Cell, Grid};
use crate::id::TileId;
use smallvec::SmallVec;
use std::collections::{BTreeMap, VecDeque};

// ─── Flood fill ──────────────────────────────────────────────────────────

/// 4-connected bucket fill starting at `start`.
///
/// Every cell orthogonally connected to `start` that holds the same value
/// as `start` (including empty) is set to `tile`. A no-op when `start` is
/// out of bounds or already holds `tile`.
pub fn flood_fill(grid: &mut Grid, start: Cell, tile: Option<TileId>) -> usize {
    if !grid.contains(start.col, start.row) {
        return 0;
    }
    let target = grid.get(start.col, start.row);
    if target == tile {
        return 0;
    }

    let cols = grid.cols();
    let key = |c: Cell| c.row as usize * cols + c.col as usize;
    let mut visited = vec![false; grid.rows() * cols];
    let mut queue = VecDeque::from([start]);
    visited[key(start)] = true;
    let mut changed = 0;

    while let Some(cell) = queue.pop_front() {
        if grid.get(cell.col, cell.row) != target {
            continue;
        }
        grid.set(cell.col, cell.row, tile);
        changed += 1;

        let neighbors: SmallVec<[Cell; 4]> = SmallVec::from_buf([
            Cell::new(cell.col, cell.row + 1),
            Cell::new(cell.col, cell.row - 1),
            Cell::new(cell.col + 1, cell.row),
            Cell::new(cell.col - 1, cell.row),
        ]);
        for next in neighbors {
            if grid.contains(next.col, next.row) && !visited[key(next)] {
                visited[key(next)] = true;
                queue.push_back(next);
            }
        }
    }

    log::trace!("flood fill at {start:?} changed {changed} cells");
    changed
}

// ─── Rectangle ───────────────────────────────────────────────────────────

/// Fill the inclusive box spanning two corners, in either order.
pub fn stamp_rect(grid: &mut Grid, anchor: Cell, target: Cell, tile: Option<TileId>) -> usize {
    let min_col = anchor.col.min(target.col);
    let max_col = anchor.col.max(target.col);
    let min_row = anchor.row.min(target.row);
    let max_row = anchor.row.max(target.row);

    let mut changed = 0;
    for row in min_row..=max_row {
        for col in min_col..=max_col {
            if grid.set(col, row, tile) {
                changed += 1;
            }
        }
    }
    changed
}

// ─── Circle ──────────────────────────────────────────────────────────────

/// Radius in whole cells for a circle centered on `anchor` reaching `target`.
pub fn circle_radius(anchor: Cell, target: Cell) -> i32 {
    let dx = (target.col - anchor.col) as f64;
    let dy = (target.row - anchor.row) as f64;
    dx.hypot(dy).round() as i32
}

/// Column span `[min, max]` covered on each row of a filled disk.
///
/// The outline comes from the midpoint circle algorithm; each of the eight
/// symmetric points widens its row's span, and filling each span yields a
/// gap-free disk.
pub fn disk_spans(center: Cell, radius: i32) -> BTreeMap<i32, (i32, i32)> {
    let mut spans: BTreeMap<i32, (i32, i32)> = BTreeMap::new();
    if radius <= 0 {
        return spans;
    }

    let mut widen = |col: i32, row: i32| {
        spans
            .entry(row)
            .and_modify(|(lo, hi)| {
                *lo = (*lo).min(col);
                *hi = (*hi).max(col);
            })
            .or_insert((col, col));
    };

    let (cx, cy) = (center.col, center.row);
    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;
    while x >= y {
        for (px, py) in [(x, y), (y, x)] {
            widen(cx + px, cy + py);
            widen(cx - px, cy + py);
            widen(cx + px, cy - py);
            widen(cx - px, cy - py);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
    spans
}

/// Stamp a filled disk centered on `anchor` whose radius is the rounded
/// distance to `target`. Zero radius is a no-op.
pub fn stamp_circle(grid: &mut Grid, anchor: Cell, target: Cell, tile: Option<TileId>) -> usize {
    let radius = circle_radius(anchor, target);
    let mut changed = 0;
    for (row, (lo, hi)) in disk_spans(anchor, radius) {
        for col in lo..=hi {
            if grid.set(col, row, tile) {
                changed += 1;
            }
        }
    }
    changed
}

// ─── Lines ───────────────────────────────────────────────────────────────

/// Cells on the Bresenham line from `from` to `to`, both ends included.
pub fn line_cells(from: Cell, to: Cell) -> Vec<Cell> {
    let dx = (to.col - from.col).abs();
    let dy = -(to.row - from.row).abs();
    let sx = if from.col < to.col { 1 } else { -1 };
    let sy = if from.row < to.row { 1 } else { -1 };
    let mut err = dx + dy;

    let mut cells = Vec::with_capacity((dx.max(-dy) + 1) as usize);
    let (mut col, mut row) = (from.col, from.row);
    loop {
        cells.push(Cell::new(col, row));
        if col == to.col && row == to.row {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            col += sx;
        }
        if e2 <= dx {
            err += dx;
            row += sy;
        }
    }
    cells
}
