//! The tile grid.
//!
//! A dense `rows × cols` array of optional tile handles. Coordinates are
//! signed so pointer positions left of or above the map can be passed
//! straight through; every access is bounds-checked and out-of-range
//! positions are silently ignored.

use crate::error::ValidationError;
use crate::id::TileId;
use crate::palette::Palette;

/// A `(col, row)` grid address. May lie outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

/// Largest accepted row or column count.
pub const MAX_DIMENSION: usize = 512;

/// Validated grid dimensions. Both fields are in `1..=MAX_DIMENSION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

impl GridSize {
    /// Validate raw dimensions.
    pub fn new(rows: usize, cols: usize) -> Result<Self, ValidationError> {
        let valid = 1..=MAX_DIMENSION;
        if !valid.contains(&rows) || !valid.contains(&cols) {
            return Err(ValidationError::InvalidDimensions {
                rows: rows.to_string(),
                cols: cols.to_string(),
            });
        }
        Ok(Self { rows, cols })
    }

    /// Derive dimensions from a map size in pixels (`800×608` at 32px → 19×25).
    pub fn from_pixels(width: u32, height: u32, tile_size: u32) -> Result<Self, ValidationError> {
        let tile_size = tile_size.max(1);
        Self::new((height / tile_size) as usize, (width / tile_size) as usize)
    }

    /// Validate numeric input from a form field: whole and positive.
    pub fn from_f64(rows: f64, cols: f64) -> Result<Self, ValidationError> {
        let whole = |v: f64| v.fract() == 0.0 && (1.0..=u32::MAX as f64).contains(&v);
        if !whole(rows) || !whole(cols) {
            return Err(ValidationError::InvalidDimensions {
                rows: rows.to_string(),
                cols: cols.to_string(),
            });
        }
        Self::new(rows as usize, cols as usize)
    }

    /// Validate text input from a form field.
    pub fn parse(rows: &str, cols: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidDimensions {
            rows: rows.to_string(),
            cols: cols.to_string(),
        };
        let r: usize = rows.trim().parse().map_err(|_| invalid())?;
        let c: usize = cols.trim().parse().map_err(|_| invalid())?;
        Self::new(r, c).map_err(|_| invalid())
    }
}

/// The map: `rows × cols` cells, each empty or holding a tile handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Row-major cell storage, `rows * cols` long.
    cells: Vec<Option<TileId>>,
}

impl Grid {
    /// Create an all-empty grid.
    pub fn new(size: GridSize) -> Self {
        Self {
            rows: size.rows,
            cols: size.cols,
            cells: vec![None; size.rows * size.cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn size(&self) -> GridSize {
        GridSize {
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Whether `(col, row)` lies inside the grid.
    pub fn contains(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && (col as usize) < self.cols && (row as usize) < self.rows
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        self.contains(col, row)
            .then(|| row as usize * self.cols + col as usize)
    }

    /// The tile at `(col, row)`, or `None` when empty or out of bounds.
    pub fn get(&self, col: i32, row: i32) -> Option<TileId> {
        self.index(col, row).and_then(|i| self.cells[i])
    }

    /// Write a cell. Returns `true` if the cell existed and its value changed.
    pub fn set(&mut self, col: i32, row: i32, tile: Option<TileId>) -> bool {
        match self.index(col, row) {
            Some(i) if self.cells[i] != tile => {
                self.cells[i] = tile;
                true
            }
            _ => false,
        }
    }

    /// Replace the grid with one of `size`, keeping the overlapping
    /// top-left region.
    pub fn resize(&mut self, size: GridSize) {
        if size == self.size() {
            return;
        }
        let mut next = Grid::new(size);
        let keep_rows = self.rows.min(size.rows);
        let keep_cols = self.cols.min(size.cols);
        for row in 0..keep_rows {
            let src = row * self.cols;
            let dst = row * size.cols;
            next.cells[dst..dst + keep_cols].copy_from_slice(&self.cells[src..src + keep_cols]);
        }
        log::debug!(
            "grid resized {}x{} -> {}x{}",
            self.rows,
            self.cols,
            size.rows,
            size.cols
        );
        *self = next;
    }

    /// Empty every cell. Returns `true` if anything was cleared.
    pub fn clear(&mut self) -> bool {
        let changed = self.cells.iter().any(Option::is_some);
        self.cells.fill(None);
        changed
    }

    /// Empty every cell holding `tile`. Returns the number of cells cleared.
    pub fn remove_references(&mut self, tile: TileId) -> usize {
        let mut removed = 0;
        for cell in self.cells.iter_mut().filter(|c| **c == Some(tile)) {
            *cell = None;
            removed += 1;
        }
        removed
    }

    /// Number of cells holding `tile`.
    pub fn count(&self, tile: TileId) -> usize {
        self.cells.iter().filter(|c| **c == Some(tile)).count()
    }

    /// One row of cells, or `None` past the last row.
    pub fn row(&self, row: usize) -> Option<&[Option<TileId>]> {
        (row < self.rows).then(|| &self.cells[row * self.cols..(row + 1) * self.cols])
    }

    /// Iterate occupied cells as `(cell, tile)`.
    pub fn occupied(&self) -> impl Iterator<Item = (Cell, TileId)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, c)| {
            c.map(|tile| {
                let cell = Cell::new((i % self.cols) as i32, (i / self.cols) as i32);
                (cell, tile)
            })
        })
    }

    /// Row strings for plain-text export: the tile glyph per cell, `.` for
    /// empty. The iterator is lazy and `Clone`, so it can be restarted.
    pub fn export_rows<'a>(&'a self, palette: &'a Palette) -> ExportRows<'a> {
        ExportRows {
            grid: self,
            palette,
            next: 0,
        }
    }
}

/// Lazy iterator over exported row strings. See [`Grid::export_rows`].
#[derive(Clone)]
pub struct ExportRows<'a> {
    grid: &'a Grid,
    palette: &'a Palette,
    next: usize,
}

impl Iterator for ExportRows<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let cells = self.grid.row(self.next)?;
        self.next += 1;
        let mut line = String::with_capacity(cells.len());
        for cell in cells {
            match cell.and_then(|id| self.palette.get(id)) {
                Some(tile) => line.push_str(&tile.glyph),
                None => line.push('.'),
            }
        }
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.grid.rows - self.next.min(self.grid.rows);
        (left, Some(left))
    }
}

impl ExactSizeIterator for ExportRows<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid(rows: usize, cols: usize) -> Grid {
        Grid::new(GridSize::new(rows, cols).unwrap())
    }

    #[test]
    fn default_map_size() {
        let size = GridSize::from_pixels(800, 608, 32).unwrap();
        assert_eq!(size, GridSize { rows: 19, cols: 25 });
    }

    #[test]
    fn size_validation() {
        assert!(GridSize::new(0, 4).is_err());
        assert!(GridSize::from_f64(3.5, 4.0).is_err());
        assert!(GridSize::from_f64(-2.0, 4.0).is_err());
        assert!(GridSize::from_f64(f64::NAN, 4.0).is_err());
        assert_eq!(
            GridSize::from_f64(3.0, 4.0).unwrap(),
            GridSize { rows: 3, cols: 4 }
        );
        assert!(GridSize::parse("abc", "4").is_err());
        assert!(GridSize::parse("99999999999999999999", "4").is_err());
        assert!(GridSize::parse("0", "4").is_err());
        assert_eq!(
            GridSize::parse(" 10 ", "12").unwrap(),
            GridSize { rows: 10, cols: 12 }
        );
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        assert!(GridSize::new(MAX_DIMENSION, MAX_DIMENSION).is_ok());
        assert!(GridSize::new(MAX_DIMENSION + 1, 1).is_err());
        assert!(GridSize::new(1, usize::MAX).is_err());
        assert!(GridSize::from_f64(4294967295.0, 4294967295.0).is_err());
        assert!(GridSize::from_f64(f64::INFINITY, 4.0).is_err());
        assert!(GridSize::from_pixels(u32::MAX, u32::MAX, 1).is_err());
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut g = grid(2, 3);
        let t = TileId::generate();
        assert!(!g.set(-1, 0, Some(t)));
        assert!(!g.set(3, 0, Some(t)));
        assert!(!g.set(0, 2, Some(t)));
        assert_eq!(g.get(-1, -1), None);
        assert_eq!(g.get(100, 100), None);
        assert!(g.set(2, 1, Some(t)));
        assert_eq!(g.get(2, 1), Some(t));
        // Same value again is not a change.
        assert!(!g.set(2, 1, Some(t)));
    }

    #[test]
    fn resize_keeps_overlap() {
        let mut g = grid(3, 3);
        let t = TileId::generate();
        g.set(0, 0, Some(t));
        g.set(2, 2, Some(t));
        g.set(1, 2, Some(t));

        g.resize(GridSize::new(2, 5).unwrap());
        assert_eq!((g.rows(), g.cols()), (2, 5));
        assert_eq!(g.get(0, 0), Some(t));
        assert_eq!(g.get(4, 1), None);
        assert_eq!(g.count(t), 1);

        // Growing back does not resurrect discarded cells.
        g.resize(GridSize::new(3, 3).unwrap());
        assert_eq!(g.get(0, 0), Some(t));
        assert_eq!(g.get(2, 2), None);
    }

    #[test]
    fn resize_roundtrip_preserves_unreduced_overlap() {
        let mut g = grid(4, 4);
        let t = TileId::generate();
        for row in 0..4 {
            for col in 0..4 {
                if (row + col) % 2 == 0 {
                    g.set(col, row, Some(t));
                }
            }
        }
        let before = g.clone();
        g.resize(GridSize::new(6, 7).unwrap());
        g.resize(GridSize::new(4, 4).unwrap());
        assert_eq!(g, before);
    }

    #[test]
    fn clear_and_remove_references() {
        let mut g = grid(2, 2);
        let a = TileId::generate();
        let b = TileId::generate();
        g.set(0, 0, Some(a));
        g.set(1, 0, Some(b));
        g.set(1, 1, Some(a));

        assert_eq!(g.remove_references(a), 2);
        assert_eq!(g.get(0, 0), None);
        assert_eq!(g.get(1, 0), Some(b));

        assert!(g.clear());
        assert!(!g.clear());
        assert_eq!(g.occupied().count(), 0);
        assert_eq!((g.rows(), g.cols()), (2, 2));
    }

    #[test]
    fn export_rows_is_restartable() {
        let mut palette = Palette::new();
        let grass = palette.create_tile("Grass", "G", "#00ff00").unwrap();
        let mut g = grid(2, 3);
        g.set(0, 0, Some(grass));
        g.set(2, 1, Some(grass));

        let rows = g.export_rows(&palette);
        assert_eq!(rows.len(), 2);
        let again = rows.clone();
        assert_eq!(rows.collect::<Vec<_>>(), vec!["G..", "..G"]);
        assert_eq!(again.collect::<Vec<_>>(), vec!["G..", "..G"]);
    }
}
