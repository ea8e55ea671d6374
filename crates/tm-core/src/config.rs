use serde::Deserialize;

// ─── Config ───────────────────────────────────────────────────────────────

/// Editor configuration.
///
/// Every field has a default, so a partial JSON object (or `{}`) is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Edge length of one tile in map pixels. Default: **32**.
    pub tile_size: u32,

    /// Initial map width in pixels. Default: **800** (25 columns).
    pub map_width: u32,

    /// Initial map height in pixels. Default: **608** (19 rows).
    pub map_height: u32,

    /// Maximum number of history snapshots kept. Default: **50**.
    pub history_depth: usize,

    /// Scale factor applied per zoom step. Default: **1.1**.
    pub zoom_step: f64,

    /// Lower zoom clamp. Default: **0.1**.
    pub min_scale: f64,

    /// Upper zoom clamp. Default: **10.0**.
    pub max_scale: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tile_size: 32,
            map_width: 800,
            map_height: 608,
            history_depth: 50,
            zoom_step: 1.1,
            min_scale: 0.1,
            max_scale: 10.0,
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config object, falling back to defaults for absent keys.
    pub fn from_json(json: &str) -> Result<Self, crate::ValidationError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Replace nonsensical values with their defaults.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.tile_size == 0 {
            self.tile_size = defaults.tile_size;
        }
        if self.map_width < self.tile_size || self.map_height < self.tile_size {
            log::warn!(
                "map {}x{} smaller than one tile, using defaults",
                self.map_width,
                self.map_height
            );
            self.map_width = defaults.map_width;
            self.map_height = defaults.map_height;
        }
        if self.history_depth == 0 {
            self.history_depth = defaults.history_depth;
        }
        if self.zoom_step.is_nan() || self.zoom_step <= 1.0 {
            self.zoom_step = defaults.zoom_step;
        }
        let scales_ok = self.min_scale > 0.0 && self.min_scale <= self.max_scale;
        if !scales_ok {
            self.min_scale = defaults.min_scale;
            self.max_scale = defaults.max_scale;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn partial_object_overrides_fields() {
        let config = EditorConfig::from_json(r#"{"tileSize":16,"historyDepth":10}"#).unwrap();
        assert_eq!(config.tile_size, 16);
        assert_eq!(config.history_depth, 10);
        assert_eq!(config.map_width, 800);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config =
            EditorConfig::from_json(r#"{"tileSize":0,"zoomStep":0.5,"minScale":-1}"#).unwrap();
        assert_eq!(config.tile_size, 32);
        assert_eq!(config.zoom_step, 1.1);
        assert_eq!(config.min_scale, 0.1);
    }
}
