//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. The map lives
//! in Rust so the page script only forwards `KeyboardEvent.key`.

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Tool switching ──
    ToolDraw,
    ToolFill,
    ToolErase,
    ToolPolygon,
    ShapeRectangle,
    ShapeCircle,

    // ── Edit ──
    Undo,
    Redo,
    ClearMap,
    /// Abandon the in-progress stroke.
    Cancel,

    // ── View ──
    ZoomIn,
    ZoomOut,
    ResetView,
    /// Hold to pan with the primary button.
    PanStart,
}

impl ShortcutAction {
    pub fn name(self) -> &'static str {
        match self {
            ShortcutAction::ToolDraw => "toolDraw",
            ShortcutAction::ToolFill => "toolFill",
            ShortcutAction::ToolErase => "toolErase",
            ShortcutAction::ToolPolygon => "toolPolygon",
            ShortcutAction::ShapeRectangle => "shapeRectangle",
            ShortcutAction::ShapeCircle => "shapeCircle",
            ShortcutAction::Undo => "undo",
            ShortcutAction::Redo => "redo",
            ShortcutAction::ClearMap => "clearMap",
            ShortcutAction::Cancel => "cancel",
            ShortcutAction::ZoomIn => "zoomIn",
            ShortcutAction::ZoomOut => "zoomOut",
            ShortcutAction::ResetView => "resetView",
            ShortcutAction::PanStart => "panStart",
        }
    }
}

/// Resolves key events into shortcut actions.
///
/// On macOS `meta` is ⌘; elsewhere `ctrl` plays the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action. `None` if unbound.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        _alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        if cmd && shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                "=" | "+" => Some(ShortcutAction::ZoomIn),
                "-" => Some(ShortcutAction::ZoomOut),
                "0" => Some(ShortcutAction::ResetView),
                "Delete" | "Backspace" => Some(ShortcutAction::ClearMap),
                _ => None,
            };
        }

        match key {
            "b" | "B" => Some(ShortcutAction::ToolDraw),
            "g" | "G" => Some(ShortcutAction::ToolFill),
            "e" | "E" => Some(ShortcutAction::ToolErase),
            "p" | "P" => Some(ShortcutAction::ToolPolygon),
            "r" | "R" => Some(ShortcutAction::ShapeRectangle),
            "c" | "C" => Some(ShortcutAction::ShapeCircle),
            "=" | "+" => Some(ShortcutAction::ZoomIn),
            "-" => Some(ShortcutAction::ZoomOut),
            "0" => Some(ShortcutAction::ResetView),
            "Escape" => Some(ShortcutAction::Cancel),
            " " => Some(ShortcutAction::PanStart),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_tool_shortcuts() {
        assert_eq!(
            ShortcutMap::resolve("b", false, false, false, false),
            Some(ShortcutAction::ToolDraw)
        );
        assert_eq!(
            ShortcutMap::resolve("G", false, false, false, false),
            Some(ShortcutAction::ToolFill)
        );
        assert_eq!(
            ShortcutMap::resolve("c", false, false, false, false),
            Some(ShortcutAction::ShapeCircle)
        );
    }

    #[test]
    fn resolve_undo_redo() {
        assert_eq!(
            ShortcutMap::resolve("z", true, false, false, false),
            Some(ShortcutAction::Undo)
        );
        assert_eq!(
            ShortcutMap::resolve("z", false, false, false, true),
            Some(ShortcutAction::Undo)
        );
        assert_eq!(
            ShortcutMap::resolve("Z", true, true, false, false),
            Some(ShortcutAction::Redo)
        );
        assert_eq!(
            ShortcutMap::resolve("y", true, false, false, false),
            Some(ShortcutAction::Redo)
        );
    }

    #[test]
    fn modifier_combos_do_not_fall_through() {
        // Cmd+B is not the draw tool.
        assert_eq!(ShortcutMap::resolve("b", true, false, false, false), None);
        assert_eq!(ShortcutMap::resolve("q", false, false, false, false), None);
    }
}
