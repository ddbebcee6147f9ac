//! SVG preview of a wall.
//!
//! Draws the canvas and every frame in stacking order, with filled frames,
//! empty frames, selection, and an in-progress drag styled differently.
//!
//! # Example
//!
//! ```
//! use zenwall::{Action, Editor, ImageDims, ImageRef, MeasureTarget, svg::render_wall_svg};
//!
//! let mut editor = Editor::default();
//! editor.dispatch(Action::ImageMeasured {
//!     target: MeasureTarget::NewFrame(None),
//!     image: ImageRef::new("beach.jpg"),
//!     dims: ImageDims::new(4000, 3000),
//! });
//!
//! let svg = render_wall_svg(editor.state());
//! assert!(svg.contains("30x20cm"));
//! ```

#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::editor::{AppState, ExportSnapshot};
use crate::frame::Frame;
use crate::geometry::{CanvasSize, Rect, Size, fit_aspect, percent_to_px, round2};
use crate::library::Assignments;

/// Maximum pixel width of the wall panel.
const MAX_PANEL_W: f64 = 600.0;
/// Maximum pixel height of the wall panel.
const MAX_PANEL_H: f64 = 450.0;
/// Horizontal margin.
const MARGIN_X: f64 = 30.0;
/// Top margin.
const MARGIN_TOP: f64 = 20.0;
/// Height of label text area above the panel.
const LABEL_H: f64 = 22.0;

/// How a frame is drawn.
#[derive(Copy, Clone, PartialEq, Eq)]
enum Style {
    Empty,
    Filled,
}

/// One frame ready to draw, in panel pixels.
struct Tile {
    rect: Rect,
    label: &'static str,
    style: Style,
    selected: bool,
    dragging: bool,
}

/// Render the editor state, following any active drag.
pub fn render_wall_svg(state: &AppState) -> String {
    let panel = panel_size(state.canvas());
    let z = state.z_order();
    let mut frames: Vec<&Frame> = state.frames().iter().collect();
    frames.sort_by_key(|f| z.get(&f.id).copied().unwrap_or(0));

    let tiles = frames
        .into_iter()
        .map(|f| Tile {
            rect: percent_to_px(state.display_rect(f), panel),
            label: f.size.label(),
            style: style_of(f, state.assignments()),
            selected: state.selection().contains(&f.id),
            dragging: state.live().position(&f.id).is_some(),
        })
        .collect::<Vec<_>>();
    render(state.canvas(), panel, &tiles)
}

/// Render an export snapshot: canonical positions, no selection.
pub fn render_snapshot_svg(snapshot: &ExportSnapshot) -> String {
    let panel = panel_size(&snapshot.canvas);
    let tiles = snapshot
        .frames
        .iter()
        .map(|f| Tile {
            rect: percent_to_px(f.rect, panel),
            label: f.size.label(),
            style: style_of(f, &snapshot.assignments),
            selected: false,
            dragging: false,
        })
        .collect::<Vec<_>>();
    render(&snapshot.canvas, panel, &tiles)
}

fn style_of(frame: &Frame, assignments: &Assignments) -> Style {
    if assignments.is_filled(&frame.key()) {
        Style::Filled
    } else {
        Style::Empty
    }
}

fn panel_size(canvas: &CanvasSize) -> Size {
    fit_aspect(canvas.aspect_ratio(), Size::new(MAX_PANEL_W, MAX_PANEL_H))
}

fn render(canvas: &CanvasSize, panel: Size, tiles: &[Tile]) -> String {
    let total_w = panel.width + 2.0 * MARGIN_X;
    let total_h = MARGIN_TOP + LABEL_H + panel.height + MARGIN_TOP;
    let (px, py) = (MARGIN_X, MARGIN_TOP + LABEL_H);

    let mut svg = String::with_capacity(1024 + tiles.len() * 256);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    svg.push_str(r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .size { font-size: 10px; fill: #444; }
  .wall { fill: #f4f1ea; stroke: #999; stroke-width: 1; }
  .empty { fill: #ffffff; stroke: #888; stroke-width: 1; stroke-dasharray: 4,2; }
  .filled { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1.5; }
  .selected { stroke: #e0663a; stroke-width: 3; }
  .dragging { opacity: 0.85; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .size { fill: #ccc; }
    .wall { fill: #2d2d2d; stroke: #555; }
    .empty { fill: #3a3a3a; stroke: #777; }
    .filled { fill: #3a72a4; stroke: #5a9fd4; }
  }
</style>
"##);

    svg.push_str(&format!(
        r#"<text x="{}" y="{}" class="label" text-anchor="middle">{}</text>"#,
        total_w / 2.0,
        MARGIN_TOP + 14.0,
        escape_xml(&format!(
            "Wall  {}×{} cm",
            round2(canvas.width_cm()),
            round2(canvas.height_cm())
        ))
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="wall"/>"#,
        px, py, panel.width, panel.height
    ));
    svg.push('\n');

    for tile in tiles {
        let mut class = String::from(match tile.style {
            Style::Empty => "empty",
            Style::Filled => "filled",
        });
        if tile.selected {
            class.push_str(" selected");
        }
        if tile.dragging {
            class.push_str(" dragging");
        }
        let r = tile.rect;
        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="{}" rx="1"/>"#,
            px + r.x,
            py + r.y,
            r.width,
            r.height,
            class
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" class="size" text-anchor="middle">{}</text>"#,
            px + r.x + r.width / 2.0,
            py + r.y + r.height / 2.0 + 4.0,
            escape_xml(tile.label)
        ));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
