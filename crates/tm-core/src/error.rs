//! User-facing validation errors.
//!
//! Every variant aborts the operation that produced it with no partial state
//! change; the `Display` text is shown to the user as-is.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Map dimensions must be whole numbers greater than zero (got {rows} × {cols})")]
    InvalidDimensions { rows: String, cols: String },

    #[error("Please fill in the tile {0}")]
    MissingField(&'static str),

    #[error("Tile character must be a single character (got {0:?})")]
    InvalidGlyph(String),

    #[error("Unrecognized tile color {0:?}")]
    InvalidColor(String),

    #[error("Error parsing JSON file: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Palette entry {index}: {source}")]
    InvalidEntry {
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },

    #[error("No tile named {0} in the palette")]
    UnknownTile(String),
}
