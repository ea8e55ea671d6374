//! Pan/zoom view transform.
//!
//! Maps screen pixels to map pixels as `(screen - offset) / scale`, and map
//! pixels to cells by floor division with the tile size.

use crate::config::EditorConfig;
use crate::grid::Cell;

/// Direction of one zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Wheel convention: scrolling up (negative `deltaY`) zooms in.
    pub fn from_wheel(delta_y: f64) -> Option<Self> {
        if delta_y < 0.0 {
            Some(Self::In)
        } else if delta_y > 0.0 {
            Some(Self::Out)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    zoom_step: f64,
    min_scale: f64,
    max_scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl ViewTransform {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            zoom_step: config.zoom_step,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
        }
    }

    /// Back to scale 1 with no pan.
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.offset_x = 0.0;
        self.offset_y = 0.0;
    }

    /// Translate by raw screen-pixel deltas.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Zoom one step around a screen point, keeping the map point under it
    /// fixed. Returns `false` when already at the clamp limit.
    pub fn zoom_at(&mut self, screen_x: f64, screen_y: f64, direction: ZoomDirection) -> bool {
        let (map_x, map_y) = self.screen_to_grid(screen_x, screen_y);
        let next = match direction {
            ZoomDirection::In => self.scale * self.zoom_step,
            ZoomDirection::Out => self.scale / self.zoom_step,
        }
        .clamp(self.min_scale, self.max_scale);
        if next == self.scale {
            return false;
        }
        self.scale = next;
        self.offset_x = screen_x - map_x * next;
        self.offset_y = screen_y - map_y * next;
        true
    }

    /// Screen pixel → map pixel.
    pub fn screen_to_grid(&self, screen_x: f64, screen_y: f64) -> (f64, f64) {
        (
            (screen_x - self.offset_x) / self.scale,
            (screen_y - self.offset_y) / self.scale,
        )
    }

    /// Map pixel → screen pixel.
    pub fn grid_to_screen(&self, map_x: f64, map_y: f64) -> (f64, f64) {
        (
            map_x * self.scale + self.offset_x,
            map_y * self.scale + self.offset_y,
        )
    }

    /// Screen pixel → cell address (may be outside the grid).
    pub fn screen_to_cell(&self, screen_x: f64, screen_y: f64, tile_size: u32) -> Cell {
        let (x, y) = self.screen_to_grid(screen_x, screen_y);
        let size = f64::from(tile_size.max(1));
        Cell::new((x / size).floor() as i32, (y / size).floor() as i32)
    }
}
