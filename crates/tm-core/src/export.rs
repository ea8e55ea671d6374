//! Plain-text map export.
//!
//! Write-only: nothing in the editor reads these formats back.

use crate::grid::Grid;
use crate::palette::Palette;

/// JSON array of row strings, e.g. `["G..","..G"]`.
pub fn export_rows_json(grid: &Grid, palette: &Palette) -> String {
    let rows: Vec<String> = grid.export_rows(palette).collect();
    serde_json::to_string(&rows).unwrap_or_else(|_| "[]".to_string())
}

/// Row strings joined by newlines.
pub fn export_rows_text(grid: &Grid, palette: &Palette) -> String {
    let mut text = String::with_capacity(grid.rows() * (grid.cols() + 1));
    for row in grid.export_rows(palette) {
        text.push_str(&row);
        text.push('\n');
    }
    text
}
