//! Input abstraction layer.
//!
//! Normalizes browser mouse, wheel, and keyboard events into a unified
//! `InputEvent` enum consumed by `EditorState`. Coordinates are canvas-relative
//! screen pixels.

/// Which pointer button started a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

impl PointerButton {
    /// Map `MouseEvent.button` (0 = left, 1 = middle, 2 = right).
    pub fn from_web(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }

    /// Buttons that always pan instead of drawing.
    pub fn pans(self) -> bool {
        matches!(self, Self::Middle | Self::Secondary)
    }
}

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed.
    PointerDown { x: f64, y: f64, button: PointerButton },

    /// Pointer moved, pressed or not.
    PointerMove { x: f64, y: f64 },

    /// Pointer released.
    PointerUp { x: f64, y: f64 },

    /// Pointer left the drawable surface.
    PointerLeave,

    /// Mouse wheel. Negative `delta_y` zooms in.
    Wheel { x: f64, y: f64, delta_y: f64 },

    /// Key pressed.
    KeyDown { key: String, modifiers: Modifiers },

    /// Key released.
    KeyUp { key: String },
}

impl InputEvent {
    pub fn from_pointer_down(x: f64, y: f64, button: i16) -> Self {
        Self::PointerDown {
            x,
            y,
            button: PointerButton::from_web(button),
        }
    }

    pub fn from_pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn from_pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp { x, y }
    }
}
