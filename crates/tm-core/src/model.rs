//! Tile data model.
//!
//! A `Tile` is a palette entry: a name, a single display glyph, and a color.
//! Tiles are owned by the `Palette`; the grid only holds `TileId` handles.

use crate::error::ValidationError;
use crate::id::TileId;
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        let bytes = hex.as_bytes();
        let short = |i: usize| hex_val(bytes[i]).map(|v| (v * 17) as f32 / 255.0);
        let long = |i: usize| {
            let hi = hex_val(bytes[i])?;
            let lo = hex_val(bytes[i + 1])?;
            Some((hi << 4 | lo) as f32 / 255.0)
        };

        match bytes.len() {
            3 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, 1.0)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, 1.0)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a),
        );
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

/// A tile color as the user wrote it: a parsed hex value, or any other CSS
/// color string (`red`, `rgb(0, 255, 0)`, `hsl(120 100% 50%)`, ...) handed
/// to the canvas as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum TileColor {
    Rgb(Color),
    Css(String),
}

impl TileColor {
    /// Parse a color field. `#`-prefixed values must be valid hex; anything
    /// else non-empty without control characters is kept verbatim.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.starts_with('#') {
            return Color::from_hex(trimmed)
                .map(TileColor::Rgb)
                .ok_or_else(|| ValidationError::InvalidColor(input.to_string()));
        }
        if trimmed.is_empty() || trimmed.chars().any(char::is_control) {
            return Err(ValidationError::InvalidColor(input.to_string()));
        }
        Ok(TileColor::Css(trimmed.to_string()))
    }

    /// CSS string suitable for a canvas `fillStyle`.
    pub fn to_css(&self) -> String {
        match self {
            TileColor::Rgb(c) => c.to_hex(),
            TileColor::Css(css) => css.clone(),
        }
    }
}

impl Default for TileColor {
    fn default() -> Self {
        TileColor::Rgb(Color::rgba(1.0, 1.0, 1.0, 1.0))
    }
}

impl fmt::Display for TileColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

// ─── Tiles ───────────────────────────────────────────────────────────────

/// A palette entry paintable onto grid cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub id: TileId,
    pub name: String,
    /// One grapheme cluster, e.g. `G`, `é` or `❤️`.
    pub glyph: String,
    pub color: TileColor,
}

impl Tile {
    /// Build a tile with a freshly generated handle from raw user input.
    ///
    /// # Errors
    /// Missing name or glyph, a glyph of more than one grapheme, or an
    /// unrecognized color.
    pub fn new(name: &str, glyph: &str, color: &str) -> Result<Self, ValidationError> {
        TileSpec {
            name: name.to_string(),
            glyph: glyph.to_string(),
            color: color.to_string(),
        }
        .into_tile()
    }

    /// The serializable form of this tile.
    pub fn to_spec(&self) -> TileSpec {
        TileSpec {
            name: self.name.clone(),
            glyph: self.glyph.clone(),
            color: self.color.to_css(),
        }
    }
}

/// The on-disk shape of a palette entry: `{ "name", "char", "color" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileSpec {
    pub name: String,
    #[serde(rename = "char")]
    pub glyph: String,
    #[serde(default)]
    pub color: String,
}

impl TileSpec {
    /// Validate the raw fields and assign a fresh `TileId`.
    pub fn into_tile(self) -> Result<Tile, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.glyph.is_empty() {
            return Err(ValidationError::MissingField("character"));
        }
        let graphemes = self.glyph.graphemes(true).take(2).count();
        if graphemes != 1 || self.glyph.trim().is_empty() {
            return Err(ValidationError::InvalidGlyph(self.glyph));
        }
        let color = if self.color.trim().is_empty() {
            TileColor::default()
        } else {
            TileColor::parse(&self.color)?
        };
        Ok(Tile {
            id: TileId::generate(),
            name: self.name,
            glyph: self.glyph,
            color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_forms_parse() {
        let green = Color::from_hex("#00ff00").unwrap();
        assert_eq!(green, Color::rgba(0.0, 1.0, 0.0, 1.0));
        assert_eq!(Color::from_hex("#0f0"), Some(green));
        assert_eq!(Color::from_hex("#00ff0080").unwrap().to_hex(), "#00ff0080");
        assert_eq!(Color::from_hex("00ff00"), None);
        assert_eq!(Color::from_hex("#00gg00"), None);
    }

    #[test]
    fn tile_color_accepts_any_css_color() {
        assert_eq!(
            TileColor::parse(" ForestGreen ").unwrap(),
            TileColor::Css("ForestGreen".into())
        );
        for css in ["rgb(0, 255, 0)", "rgba(0,0,0,0.5)", "hsl(120 100% 50%)", "transparent"] {
            assert_eq!(TileColor::parse(css).unwrap().to_css(), css);
        }
        assert!(TileColor::parse("#12").is_err());
        assert!(TileColor::parse("red\nblue").is_err());
    }

    #[test]
    fn glyph_is_one_grapheme() {
        for glyph in ["G", "e\u{301}", "\u{2764}\u{fe0f}", "\u{1f1eb}\u{1f1f7}"] {
            assert_eq!(Tile::new("T", glyph, "red").unwrap().glyph, glyph);
        }
        assert!(matches!(
            Tile::new("T", "\u{2764}\u{fe0f}\u{2764}\u{fe0f}", "red"),
            Err(ValidationError::InvalidGlyph(_))
        ));
        assert!(matches!(
            Tile::new("T", " ", "red"),
            Err(ValidationError::InvalidGlyph(_))
        ));
    }

    #[test]
    fn tile_requires_name_and_glyph() {
        assert!(matches!(
            Tile::new("", "G", "#fff"),
            Err(ValidationError::MissingField("name"))
        ));
        assert!(matches!(
            Tile::new("Grass", "", "#fff"),
            Err(ValidationError::MissingField("character"))
        ));
        assert!(matches!(
            Tile::new("Grass", "GG", "#fff"),
            Err(ValidationError::InvalidGlyph(_))
        ));
    }

    #[test]
    fn identical_tiles_get_distinct_ids() {
        let a = Tile::new("Water", "~", "blue").unwrap();
        let b = Tile::new("Water", "~", "blue").unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.to_spec(), b.to_spec());
    }

    #[test]
    fn spec_serializes_char_key() {
        let tile = Tile::new("Grass", "G", "#00FF00").unwrap();
        let json = serde_json::to_string(&tile.to_spec()).unwrap();
        assert_eq!(json, r##"{"name":"Grass","char":"G","color":"#00ff00"}"##);
    }
}
