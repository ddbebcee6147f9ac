//! Auto-arrange into centered rows, and multi-frame alignment.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::config::ConfigError;
use crate::frame::Frame;
use crate::geometry::{CanvasSize, Point, Rect, row_major_order};
use crate::logging::debug;
use crate::selection::Selection;

/// Packing parameters, all in centimeters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArrangeTuning {
    /// Space between neighboring frames and between rows.
    pub gap_cm: f64,
    /// Minimum distance from the top of the wall to the first row.
    pub padding_cm: f64,
    /// Frames whose vertical centers differ by less than this share a row.
    pub row_tolerance_cm: f64,
}

impl Default for ArrangeTuning {
    fn default() -> Self {
        Self {
            gap_cm: 2.0,
            padding_cm: 5.0,
            row_tolerance_cm: 15.0,
        }
    }
}

impl ArrangeTuning {
    pub fn validate(self) -> Result<(), ConfigError> {
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;
        if !non_negative(self.gap_cm)
            || !non_negative(self.padding_cm)
            || !(self.row_tolerance_cm.is_finite() && self.row_tolerance_cm > 0.0)
        {
            return Err(ConfigError::InvalidArrangeTuning {
                gap_cm: self.gap_cm,
                padding_cm: self.padding_cm,
                row_tolerance_cm: self.row_tolerance_cm,
            });
        }
        Ok(())
    }
}

/// A frame measured in centimeters.
struct Item {
    index: usize,
    width: f64,
    height: f64,
    center: Point,
}

struct Row {
    items: Vec<Item>,
    width: f64,
    height: f64,
}

/// Reflow frames into horizontally centered rows.
///
/// Frames are read row-major by center point, chained into rows while each
/// frame's vertical center stays within the row tolerance of the previous
/// one, and laid out left to right with a fixed gap. The row block is
/// vertically centered but never starts above the padding. Shorter frames
/// are vertically centered within their row.
///
/// The result has the input order; only rectangles change.
pub fn pack(frames: &[Frame], canvas: &CanvasSize, tuning: &ArrangeTuning) -> Vec<Frame> {
    if frames.is_empty() {
        return Vec::new();
    }
    let gap = tuning.gap_cm;
    let tol = tuning.row_tolerance_cm;

    let items: Vec<Item> = frames
        .iter()
        .enumerate()
        .map(|(index, f)| {
            let cm = canvas.to_cm(f.rect);
            Item {
                index,
                width: cm.width,
                height: cm.height,
                center: cm.center(),
            }
        })
        .collect();
    let centers: Vec<Point> = items.iter().map(|i| i.center).collect();
    let order = row_major_order(&centers, tol);

    let mut slots: Vec<Option<Item>> = items.into_iter().map(Some).collect();
    let mut rows: Vec<Row> = Vec::new();
    let mut prev_cy: Option<f64> = None;
    for i in order {
        let Some(item) = slots[i].take() else { continue };
        let cy = item.center.y;
        let same_row = prev_cy.is_some_and(|p| (cy - p).abs() < tol);
        prev_cy = Some(cy);
        if same_row && let Some(row) = rows.last_mut() {
            row.width += gap + item.width;
            row.height = row.height.max(item.height);
            row.items.push(item);
        } else {
            rows.push(Row {
                width: item.width,
                height: item.height,
                items: alloc::vec![item],
            });
        }
    }

    let content_height =
        rows.iter().map(|r| r.height).sum::<f64>() + gap * (rows.len() - 1) as f64;
    let mut y = tuning.padding_cm.max((canvas.height_cm() - content_height) / 2.0);

    let mut out = frames.to_vec();
    for row in &rows {
        let mut x = (canvas.width_cm() - row.width) / 2.0;
        for item in &row.items {
            let offset = (row.height - item.height) / 2.0;
            let cm = Rect::new(x, y + offset, item.width, item.height);
            out[item.index].rect = canvas.to_percent(cm);
            x += item.width + gap;
        }
        y += row.height + gap;
    }
    debug!(frames = out.len(), rows = rows.len(), "auto-arrange");
    out
}

/// Edge or center to line selected frames up on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Alignment {
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
}

/// Align the selected frames against their common bounding box.
///
/// Returns `None` when fewer than two selected frames exist.
pub fn align(frames: &[Frame], selection: &Selection, alignment: Alignment) -> Option<Vec<Frame>> {
    let mut selected = selection.resolve(frames).map(|f| f.rect);
    let first = selected.next()?;
    let mut count = 1;
    let bounds = selected.fold(first, |b, r| {
        count += 1;
        Rect::from_corners(
            Point::new(b.x.min(r.x), b.y.min(r.y)),
            Point::new(b.right().max(r.right()), b.bottom().max(r.bottom())),
        )
    });
    if count < 2 {
        debug!(selected = count, "align needs two frames");
        return None;
    }

    let center = bounds.center();
    let aligned = frames
        .iter()
        .map(|f| {
            let mut f = f.clone();
            if selection.contains(&f.id) {
                let r = &mut f.rect;
                match alignment {
                    Alignment::Left => r.x = bounds.x,
                    Alignment::Center => r.x = center.x - r.width / 2.0,
                    Alignment::Right => r.x = bounds.right() - r.width,
                    Alignment::Top => r.y = bounds.y,
                    Alignment::Middle => r.y = center.y - r.height / 2.0,
                    Alignment::Bottom => r.y = bounds.bottom() - r.height,
                }
            }
            f
        })
        .collect();
    Some(aligned)
}
