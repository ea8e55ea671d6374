//! Undo/Redo history.
//!
//! A linear list of full grid snapshots with a pointer at the current one.
//! Undo and redo move the pointer and hand back a copy of the snapshot it
//! lands on; taking a new snapshot drops everything after the pointer.

use tm_core::grid::Grid;

pub struct History {
    entries: Vec<Grid>,
    /// Index of the snapshot matching the live grid.
    pointer: usize,
    /// Maximum number of snapshots kept.
    max_depth: usize,
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            entries: Vec::with_capacity(max_depth.min(64)),
            pointer: 0,
            max_depth: max_depth.max(1),
        }
    }

    /// Start over with `grid` as the only snapshot.
    pub fn reset(&mut self, grid: &Grid) {
        self.entries.clear();
        self.entries.push(grid.clone());
        self.pointer = 0;
    }

    /// Record `grid` as the newest state.
    pub fn snapshot(&mut self, grid: &Grid) {
        if !self.is_empty() {
            self.entries.truncate(self.pointer + 1);
        }
        self.entries.push(grid.clone());
        self.pointer = self.entries.len() - 1;

        if self.entries.len() > self.max_depth {
            self.entries.remove(0);
            self.pointer -= 1;
        }
        log::trace!(
            "history: {} entries, pointer {}",
            self.entries.len(),
            self.pointer
        );
    }

    /// Step back. `None` at the oldest snapshot.
    pub fn undo(&mut self) -> Option<Grid> {
        if !self.can_undo() {
            return None;
        }
        self.pointer -= 1;
        self.entries.get(self.pointer).cloned()
    }

    /// Step forward. `None` at the newest snapshot.
    pub fn redo(&mut self) -> Option<Grid> {
        if !self.can_redo() {
            return None;
        }
        self.pointer += 1;
        self.entries.get(self.pointer).cloned()
    }

    pub fn can_undo(&self) -> bool {
        self.pointer > 0
    }

    pub fn can_redo(&self) -> bool {
        self.pointer + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tm_core::grid::GridSize;
    use tm_core::id::TileId;

    fn blank() -> Grid {
        Grid::new(GridSize::new(2, 2).unwrap())
    }

    #[test]
    fn undo_redo_walks_snapshots() {
        let mut history = History::new(50);
        let mut grid = blank();
        history.snapshot(&grid);

        let t = TileId::generate();
        grid.set(0, 0, Some(t));
        history.snapshot(&grid);

        assert_eq!(history.undo(), Some(blank()));
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), Some(grid.clone()));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn new_snapshot_clears_redo() {
        let mut history = History::new(50);
        let mut grid = blank();
        history.snapshot(&grid);
        grid.set(0, 0, Some(TileId::generate()));
        history.snapshot(&grid);

        history.undo();
        assert!(history.can_redo());
        grid.set(1, 1, Some(TileId::generate()));
        history.snapshot(&grid);
        assert!(!history.can_redo());
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn max_depth_evicts_oldest() {
        let mut history = History::new(3);
        let mut grid = blank();
        history.snapshot(&grid);
        for col in 0..2 {
            for row in 0..2 {
                grid.set(col, row, Some(TileId::generate()));
                history.snapshot(&grid);
            }
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.pointer(), 2);

        let mut steps = 0;
        while history.undo().is_some() {
            steps += 1;
        }
        assert_eq!(steps, 2);
    }

    #[test]
    fn empty_history_is_inert() {
        let mut history = History::new(10);
        assert!(history.is_empty());
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
    }
}
