//! Snap engine: gap preference first, edge alignment second.
//!
//! Both axes are solved independently. Tolerance and gap are configured in
//! screen pixels and converted to percent of the live container on every
//! call, so the feel of snapping does not change with zoom.

use crate::config::ConfigError;
use crate::geometry::{Axis, Point, Rect, Size, Span, px_to_percent};

/// Canvas-relative alignment targets in percent.
const CANVAS_TARGETS: [f64; 3] = [0.0, 50.0, 100.0];

/// Pixel-space snapping parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SnapTuning {
    /// Offsets strictly below this distance snap.
    pub threshold_px: f64,
    /// Preferred spacing between neighboring frames.
    pub gap_px: f64,
}

impl Default for SnapTuning {
    fn default() -> Self {
        Self {
            threshold_px: 12.0,
            gap_px: 16.0,
        }
    }
}

impl SnapTuning {
    pub fn new(threshold_px: f64, gap_px: f64) -> Result<Self, ConfigError> {
        let tuning = Self {
            threshold_px,
            gap_px,
        };
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(self) -> Result<(), ConfigError> {
        let ok = |v: f64| v.is_finite() && v >= 0.0;
        if !ok(self.threshold_px) || !ok(self.gap_px) {
            return Err(ConfigError::InvalidSnapTuning {
                threshold_px: self.threshold_px,
                gap_px: self.gap_px,
            });
        }
        Ok(())
    }
}

/// Which rule decided an axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SnapKind {
    /// Placed one gap away from a neighbor.
    Gap,
    /// Aligned an edge or midpoint to a canvas or neighbor target.
    Align,
    /// Proposed coordinate kept.
    Free,
}

/// Corrected top-left position plus the rule applied per axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SnapOutcome {
    pub position: Point,
    pub kind_x: SnapKind,
    pub kind_y: SnapKind,
}

/// Stateless snapper over percent-space rectangles.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SnapEngine {
    tuning: SnapTuning,
}

impl SnapEngine {
    pub fn new(tuning: SnapTuning) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> SnapTuning {
        self.tuning
    }

    /// Snap a rectangle of `size` (percent) proposed at `proposed` against
    /// stationary `neighbors`.
    ///
    /// `container` is the on-screen canvas in pixels. An axis whose container
    /// extent is not strictly positive is left unsnapped.
    pub fn snap(
        &self,
        size: Size,
        proposed: Point,
        neighbors: &[Rect],
        container: Size,
    ) -> SnapOutcome {
        let moving = Rect::new(proposed.x, proposed.y, size.width, size.height);
        let (x, kind_x) = self.snap_axis(&moving, neighbors, Axis::Horizontal, container.width);
        let (y, kind_y) = self.snap_axis(&moving, neighbors, Axis::Vertical, container.height);
        SnapOutcome {
            position: Point::new(x, y),
            kind_x,
            kind_y,
        }
    }

    fn snap_axis(
        &self,
        moving: &Rect,
        neighbors: &[Rect],
        axis: Axis,
        container_px: f64,
    ) -> (f64, SnapKind) {
        let span = moving.span(axis);
        let (Some(tol), Some(gap)) = (
            px_to_percent(self.tuning.threshold_px, container_px),
            px_to_percent(self.tuning.gap_px, container_px),
        ) else {
            return (span.start, SnapKind::Free);
        };

        if let Some(d) = gap_offset(span, neighbors, axis, gap, tol) {
            return (span.start + d, SnapKind::Gap);
        }
        if let Some(d) = align_offset(span, neighbors, axis, tol) {
            return (span.start + d, SnapKind::Align);
        }
        (span.start, SnapKind::Free)
    }
}

/// Smallest-magnitude candidate strictly within `tol`; the first one found
/// wins ties.
fn pick(best: &mut Option<f64>, candidate: f64, tol: f64) {
    let within = candidate.abs() < tol;
    let closer = best.is_none_or(|b| candidate.abs() < b.abs());
    if within && closer {
        *best = Some(candidate);
    }
}

fn gap_offset(moving: Span, neighbors: &[Rect], axis: Axis, gap: f64, tol: f64) -> Option<f64> {
    let mut best = None;
    for n in neighbors.iter().map(|r| r.span(axis)) {
        // Leading edge one gap after the neighbor.
        pick(&mut best, n.end() + gap - moving.start, tol);
        // Trailing edge one gap before the neighbor.
        pick(&mut best, n.start - gap - moving.end(), tol);
    }
    best
}

fn align_offset(moving: Span, neighbors: &[Rect], axis: Axis, tol: f64) -> Option<f64> {
    let mut targets = CANVAS_TARGETS.to_vec();
    for n in neighbors.iter().map(|r| r.span(axis)) {
        targets.extend([n.start, n.end(), n.mid()]);
    }

    let mut best = None;
    for edge in [moving.start, moving.end(), moving.mid()] {
        for &target in &targets {
            pick(&mut best, target - edge, tol);
        }
    }
    best
}
