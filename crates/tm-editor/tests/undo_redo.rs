//! Integration tests: history (tm-editor).
//!
//! Drives `EditorState` through pointer and keyboard input and checks that
//! undo/redo restore exact grid snapshots across crate boundaries.

use pretty_assertions::assert_eq;
use tm_core::grid::Grid;
use tm_core::id::TileId;
use tm_editor::{EditorState, InputEvent, Modifiers, Shape, ToolKind};

const TS: f64 = 32.0;

fn make_editor() -> (EditorState, TileId, TileId) {
    let mut editor = EditorState::default();
    editor
        .import_palette(include_str!("fixtures/palette.json"))
        .unwrap();
    let ids: Vec<TileId> = editor.palette.tiles().map(|t| t.id).collect();
    editor.select_tile(Some(ids[0]));
    (editor, ids[0], ids[1])
}

/// Click the centre of a cell.
fn click(editor: &mut EditorState, col: i32, row: i32) {
    let (x, y) = center(col, row);
    editor.handle(&InputEvent::from_pointer_down(x, y, 0));
    editor.handle(&InputEvent::from_pointer_up(x, y));
}

fn drag(editor: &mut EditorState, from: (i32, i32), to: (i32, i32)) {
    let (x0, y0) = center(from.0, from.1);
    let (x1, y1) = center(to.0, to.1);
    editor.handle(&InputEvent::from_pointer_down(x0, y0, 0));
    editor.handle(&InputEvent::from_pointer_move(x1, y1));
    editor.handle(&InputEvent::from_pointer_up(x1, y1));
}

fn center(col: i32, row: i32) -> (f64, f64) {
    ((f64::from(col) + 0.5) * TS, (f64::from(row) + 0.5) * TS)
}

fn key(editor: &mut EditorState, key: &str, ctrl: bool, shift: bool) -> bool {
    editor.handle(&InputEvent::KeyDown {
        key: key.to_string(),
        modifiers: Modifiers {
            ctrl,
            shift,
            ..Modifiers::NONE
        },
    })
}

// ─── Exact restore ──────────────────────────────────────────────────────

#[test]
fn undo_then_redo_restores_identical_grids() {
    let (mut editor, grass, water) = make_editor();
    let blank = editor.grid.clone();

    drag(&mut editor, (0, 0), (4, 0));
    let after_stroke = editor.grid.clone();

    editor.select_tool(ToolKind::Fill);
    editor.select_tile(Some(water));
    click(&mut editor, 10, 10);
    let after_fill = editor.grid.clone();
    assert_eq!(after_fill.count(grass), 5);
    assert_eq!(after_fill.count(water), 25 * 19 - 5);

    assert!(editor.undo());
    assert_eq!(editor.grid, after_stroke);
    assert!(editor.undo());
    assert_eq!(editor.grid, blank);
    assert!(!editor.undo());

    assert!(editor.redo());
    assert_eq!(editor.grid, after_stroke);
    assert!(editor.redo());
    assert_eq!(editor.grid, after_fill);
    assert!(!editor.redo());
}

#[test]
fn new_mutation_discards_redo() {
    let (mut editor, grass, _) = make_editor();
    click(&mut editor, 1, 1);
    click(&mut editor, 2, 2);
    assert!(editor.undo());
    assert!(editor.can_redo());

    click(&mut editor, 3, 3);
    assert!(!editor.can_redo());
    assert!(!editor.redo());
    assert_eq!(editor.grid.get(2, 2), None);
    assert_eq!(editor.grid.get(3, 3), Some(grass));
}

#[test]
fn keyboard_undo_redo() {
    let (mut editor, grass, _) = make_editor();
    click(&mut editor, 0, 0);

    assert!(key(&mut editor, "z", true, false));
    assert_eq!(editor.grid.count(grass), 0);
    assert!(key(&mut editor, "Z", true, true));
    assert_eq!(editor.grid.count(grass), 1);
    assert!(key(&mut editor, "z", true, false));
    assert!(key(&mut editor, "y", true, false));
    assert_eq!(editor.grid.count(grass), 1);
}

// ─── Cap ────────────────────────────────────────────────────────────────

#[test]
fn history_is_capped_at_fifty() {
    let (mut editor, grass, _) = make_editor();
    for i in 0..60 {
        click(&mut editor, i % 25, i / 25);
    }
    assert_eq!(editor.history_len(), 50);

    let mut steps = 0;
    while editor.undo() {
        steps += 1;
    }
    assert_eq!(steps, 49);
    // The oldest reachable state still holds the first eleven clicks.
    assert_eq!(editor.grid.count(grass), 11);
}

// ─── No-op edits ────────────────────────────────────────────────────────

#[test]
fn no_op_edits_add_no_history() {
    let (mut editor, _, _) = make_editor();
    editor.select_tool(ToolKind::Fill);
    click(&mut editor, 0, 0);
    assert_eq!(editor.history_len(), 2);

    // Same tile over its own region.
    click(&mut editor, 5, 5);
    assert_eq!(editor.history_len(), 2);

    // Clearing twice records once.
    assert!(editor.clear_map());
    assert!(!editor.clear_map());
    assert_eq!(editor.history_len(), 3);

    // Erasing empty cells.
    editor.select_tool(ToolKind::Erase);
    drag(&mut editor, (0, 0), (3, 3));
    assert_eq!(editor.history_len(), 3);
}

#[test]
fn shape_stamp_is_one_step() {
    let (mut editor, grass, _) = make_editor();
    editor.select_shape(Shape::Rectangle);
    drag(&mut editor, (2, 2), (0, 0));
    assert_eq!(editor.grid.count(grass), 9);
    assert_eq!(editor.history_len(), 2);

    assert!(editor.undo());
    assert_eq!(editor.grid, Grid::new(editor.grid.size()));
}

#[test]
fn resize_round_trips_through_history() {
    let (mut editor, grass, _) = make_editor();
    click(&mut editor, 24, 18);
    click(&mut editor, 1, 1);
    let before = editor.grid.clone();

    assert!(editor.resize_from_input(5.0, 5.0).unwrap());
    assert_eq!(editor.grid.count(grass), 1);

    assert!(editor.undo());
    assert_eq!(editor.grid, before);
    assert_eq!(editor.grid.get(24, 18), Some(grass));
}

#[test]
fn press_without_release_starts_a_new_step() {
    let (mut editor, grass, _) = make_editor();
    let (x0, y0) = center(0, 0);
    let (x1, y1) = center(3, 0);
    editor.handle(&InputEvent::from_pointer_down(x0, y0, 0));
    editor.handle(&InputEvent::from_pointer_move(x1, y1));
    // The release for the first stroke never arrives.
    click(&mut editor, 0, 5);
    assert_eq!(editor.history_len(), 3);
    assert_eq!(editor.grid.count(grass), 5);

    assert!(editor.undo());
    assert_eq!(editor.grid.count(grass), 4);
    assert_eq!(editor.grid.get(0, 5), None);
    assert!(editor.undo());
    assert_eq!(editor.grid.count(grass), 0);
}
