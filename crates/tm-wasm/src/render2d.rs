//! Canvas2D renderer.
//!
//! Draws the map under the current pan/zoom transform: background, painted
//! tiles with their glyphs, grid lines, then the pending polygon preview.

use tm_core::grid::Grid;
use tm_core::palette::Palette;
use tm_editor::state::EditorState;
use tm_editor::tools::ShapePreview;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

/// Theme-dependent colors for the canvas renderer.
pub struct CanvasTheme {
    pub bg: &'static str,
    pub map_bg: &'static str,
    pub grid: &'static str,
    pub glyph: &'static str,
    pub preview: &'static str,
}

impl CanvasTheme {
    pub fn light() -> Self {
        Self {
            bg: "#F5F5F7",
            map_bg: "#FFFFFF",
            grid: "rgba(0, 0, 0, 0.15)",
            glyph: "rgba(0, 0, 0, 0.7)",
            preview: "#000000",
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: "#1C1C1E",
            map_bg: "#2C2C2E",
            grid: "rgba(255, 255, 255, 0.12)",
            glyph: "rgba(0, 0, 0, 0.7)",
            preview: "#FFFFFF",
        }
    }
}

/// Render the whole editor view.
pub fn render_map(
    ctx: &CanvasRenderingContext2d,
    editor: &EditorState,
    canvas_width: f64,
    canvas_height: f64,
    theme: &CanvasTheme,
) {
    ctx.set_fill_style_str(theme.bg);
    ctx.fill_rect(0.0, 0.0, canvas_width, canvas_height);

    let view = &editor.view;
    let ts = f64::from(editor.tile_size());

    ctx.save();
    let _ = ctx.translate(view.offset_x, view.offset_y);
    let _ = ctx.scale(view.scale, view.scale);

    let map_w = editor.grid.cols() as f64 * ts;
    let map_h = editor.grid.rows() as f64 * ts;
    ctx.set_fill_style_str(theme.map_bg);
    ctx.fill_rect(0.0, 0.0, map_w, map_h);

    draw_tiles(ctx, &editor.grid, &editor.palette, ts, theme);
    draw_grid(ctx, map_w, map_h, ts, view.scale, theme);

    if let Some(preview) = editor.preview() {
        draw_preview(ctx, preview, view.scale, theme);
    }

    ctx.restore();
}

fn draw_tiles(
    ctx: &CanvasRenderingContext2d,
    grid: &Grid,
    palette: &Palette,
    ts: f64,
    theme: &CanvasTheme,
) {
    ctx.set_font(&format!("{}px monospace", (ts * 0.6).round()));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    for (cell, id) in grid.occupied() {
        let Some(tile) = palette.get(id) else {
            continue;
        };
        let x = f64::from(cell.col) * ts;
        let y = f64::from(cell.row) * ts;
        ctx.set_fill_style_str(&tile.color.to_css());
        ctx.fill_rect(x, y, ts, ts);

        ctx.set_fill_style_str(theme.glyph);
        let _ = ctx.fill_text(&tile.glyph, x + ts / 2.0, y + ts / 2.0);
    }
}

/// Grid lines stay one screen pixel wide at any zoom.
fn draw_grid(
    ctx: &CanvasRenderingContext2d,
    map_w: f64,
    map_h: f64,
    ts: f64,
    scale: f64,
    theme: &CanvasTheme,
) {
    ctx.set_stroke_style_str(theme.grid);
    ctx.set_line_width(1.0 / scale);
    ctx.begin_path();

    let mut x = 0.0;
    while x <= map_w {
        ctx.move_to(x, 0.0);
        ctx.line_to(x, map_h);
        x += ts;
    }
    let mut y = 0.0;
    while y <= map_h {
        ctx.move_to(0.0, y);
        ctx.line_to(map_w, y);
        y += ts;
    }
    ctx.stroke();
}

/// Dashed outline of the shape that release would stamp.
fn draw_preview(
    ctx: &CanvasRenderingContext2d,
    preview: ShapePreview,
    scale: f64,
    theme: &CanvasTheme,
) {
    ctx.save();
    ctx.set_stroke_style_str(theme.preview);
    ctx.set_line_width(1.0 / scale);
    let dash = 5.0 / scale;
    let _ = ctx.set_line_dash(&js_sys::Array::of2(
        &JsValue::from_f64(dash),
        &JsValue::from_f64(dash),
    ));

    match preview {
        ShapePreview::Rect {
            x,
            y,
            width,
            height,
        } => ctx.stroke_rect(x, y, width, height),
        ShapePreview::Circle { cx, cy, radius } => {
            ctx.begin_path();
            let _ = ctx.arc(cx, cy, radius, 0.0, std::f64::consts::TAU);
            ctx.stroke();
        }
    }

    ctx.restore();
}
