use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for tile handles.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// A lightweight handle identifying one palette tile.
///
/// Grid cells store `TileId`s, never tile contents, so two tiles with the
/// same name, glyph and color are still distinct map entries.
/// Internally a 4-byte `Spur` index, so comparison and hashing are O(1).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(Spur);

impl TileId {
    /// Intern a string as a TileId, or return the existing handle.
    pub fn intern(s: &str) -> Self {
        TileId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Generate a fresh handle (`tile_0`, `tile_1`, ...).
    pub fn generate() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("tile_{n}"))
    }
}

impl fmt::Debug for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TileId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TileId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(TileId::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = TileId::generate();
        let b = TileId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("tile_"));
    }

    #[test]
    fn interning_roundtrip() {
        let a = TileId::intern("tile_grass");
        let b = TileId::intern("tile_grass");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "tile_grass");
    }
}
