//! Tile palette.
//!
//! Holds the ordered list of tiles shown to the user plus the current
//! selection. Tile definitions are never forgotten during a session: a
//! deleted or replaced tile leaves the visible list but stays resolvable by
//! id, so history snapshots that still reference it render and export
//! correctly after an undo.

use crate::error::ValidationError;
use crate::id::TileId;
use crate::model::{Tile, TileSpec};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Palette {
    /// Visible tiles, in display order.
    order: Vec<TileId>,
    /// Every tile defined this session, visible or not.
    defs: HashMap<TileId, Tile>,
    selected: Option<TileId>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible tiles in display order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.order.iter().filter_map(|id| self.defs.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Resolve a handle, including tiles no longer listed.
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.defs.get(&id)
    }

    /// Whether `id` is currently listed.
    pub fn contains(&self, id: TileId) -> bool {
        self.order.contains(&id)
    }

    pub fn selected(&self) -> Option<TileId> {
        self.selected
    }

    /// Append a tile and return its handle.
    pub fn add_tile(&mut self, tile: Tile) -> TileId {
        let id = tile.id;
        self.defs.insert(id, tile);
        if !self.order.contains(&id) {
            self.order.push(id);
        }
        id
    }

    /// Validate raw form input and append the new tile.
    pub fn create_tile(
        &mut self,
        name: &str,
        glyph: &str,
        color: &str,
    ) -> Result<TileId, ValidationError> {
        let tile = Tile::new(name, glyph, color)?;
        log::debug!("palette: created {} ({:?})", tile.name, tile.id);
        Ok(self.add_tile(tile))
    }

    /// Change an existing tile's fields in place. Grid cells keep pointing
    /// at the same handle, so they pick up the new look.
    pub fn edit_tile(
        &mut self,
        id: TileId,
        name: &str,
        glyph: &str,
        color: &str,
    ) -> Result<(), ValidationError> {
        if !self.contains(id) {
            return Err(ValidationError::UnknownTile(id.to_string()));
        }
        let edited = Tile::new(name, glyph, color)?;
        if let Some(tile) = self.defs.get_mut(&id) {
            tile.name = edited.name;
            tile.glyph = edited.glyph;
            tile.color = edited.color;
        }
        Ok(())
    }

    /// Select a listed tile, or clear the selection with `None`.
    /// Returns `false` if `id` is not listed.
    pub fn select(&mut self, id: Option<TileId>) -> bool {
        match id {
            Some(id) if !self.contains(id) => false,
            _ => {
                self.selected = id;
                true
            }
        }
    }

    /// Unlist a tile. Callers must also clear grid references to it.
    pub fn delete_tile(&mut self, id: TileId) -> bool {
        let Some(pos) = self.order.iter().position(|t| *t == id) else {
            return false;
        };
        self.order.remove(pos);
        if self.selected == Some(id) {
            self.selected = None;
        }
        true
    }

    /// Unlist every tile and clear the selection.
    pub fn clear(&mut self) {
        self.order.clear();
        self.selected = None;
    }

    /// Parse a JSON array of `{ name, char, color }` and replace the palette.
    ///
    /// Validation happens up front: on any error the palette is untouched.
    pub fn import_json(&mut self, json: &str) -> Result<usize, ValidationError> {
        let specs: Vec<TileSpec> = serde_json::from_str(json)?;
        let tiles = specs
            .into_iter()
            .enumerate()
            .map(|(index, spec)| {
                spec.into_tile().map_err(|e| ValidationError::InvalidEntry {
                    index,
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.clear();
        let count = tiles.len();
        for tile in tiles {
            self.add_tile(tile);
        }
        log::debug!("palette: imported {count} tiles");
        Ok(count)
    }

    /// Serialize the visible tiles in the import format.
    pub fn export_json(&self) -> String {
        let specs: Vec<TileSpec> = self.tiles().map(Tile::to_spec).collect();
        serde_json::to_string_pretty(&specs).unwrap_or_else(|_| "[]".to_string())
    }
}
