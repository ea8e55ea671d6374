pub mod history;
pub mod input;
pub mod shortcuts;
pub mod state;
pub mod tools;

pub use history::History;
pub use input::{InputEvent, Modifiers, PointerButton};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use state::EditorState;
pub use tools::{GridMutation, Shape, ShapePreview, ToolEvent, ToolKind, ToolState};
