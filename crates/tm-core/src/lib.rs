pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod id;
pub mod model;
pub mod palette;
pub mod raster;
pub mod view;

pub use config::EditorConfig;
pub use error::ValidationError;
pub use export::{export_rows_json, export_rows_text};
pub use grid::{Cell, Grid, GridSize};
pub use id::TileId;
pub use model::*;
pub use palette::Palette;
pub use raster::{flood_fill, line_cells, stamp_circle, stamp_rect};
pub use view::{ViewTransform, ZoomDirection};
