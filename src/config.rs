//! Editor configuration and its validation errors.
//!
//! Every tuning struct defaults to the stock editor behavior and
//! deserializes with missing fields filled from that default, so a partial
//! JSON override such as `{"snap": {"gap_px": 20}}` is enough.

use crate::arrange::ArrangeTuning;
use crate::geometry::{CanvasSize, Size, fit_aspect};
use crate::orientation::OrientationTuning;
use crate::snap::SnapTuning;

/// Zoom and on-screen sizing of the wall.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewTuning {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
    /// Share of the viewport the wall may cover at zoom 1.
    pub fill: f64,
    /// Each viewport axis counts as at least this many pixels.
    pub min_viewport_px: f64,
}

impl Default for ViewTuning {
    fn default() -> Self {
        Self {
            min_zoom: 0.2,
            max_zoom: 2.5,
            zoom_step: 0.1,
            fill: 0.95,
            min_viewport_px: 100.0,
        }
    }
}

impl ViewTuning {
    pub fn validate(self) -> Result<(), ConfigError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let ok = positive(self.min_zoom)
            && positive(self.max_zoom)
            && self.min_zoom <= self.max_zoom
            && positive(self.zoom_step)
            && positive(self.fill)
            && self.fill <= 1.0
            && positive(self.min_viewport_px);
        if !ok {
            return Err(ConfigError::InvalidViewTuning {
                min_zoom: self.min_zoom,
                max_zoom: self.max_zoom,
            });
        }
        Ok(())
    }

    pub fn zoom_in(&self, zoom: f64) -> f64 {
        (zoom + self.zoom_step).min(self.max_zoom)
    }

    pub fn zoom_out(&self, zoom: f64) -> f64 {
        (zoom - self.zoom_step).max(self.min_zoom)
    }

    /// On-screen wall size: the canvas aspect fitted into the filled share
    /// of `viewport`, scaled by `zoom`.
    pub fn display_size(&self, canvas: &CanvasSize, viewport: Size, zoom: f64) -> Size {
        let available = Size::new(
            viewport.width.max(self.min_viewport_px) * self.fill,
            viewport.height.max(self.min_viewport_px) * self.fill,
        );
        let fitted = fit_aspect(canvas.aspect_ratio(), available);
        Size::new(fitted.width * zoom, fitted.height * zoom)
    }
}

/// All editor tuning in one place.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EditorConfig {
    pub snap: SnapTuning,
    pub arrange: ArrangeTuning,
    pub orientation: OrientationTuning,
    pub view: ViewTuning,
}

impl EditorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.snap.validate()?;
        self.arrange.validate()?;
        self.orientation.validate()?;
        self.view.validate()
    }
}

/// Rejected configuration value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Snap threshold or gap is negative or not finite.
    InvalidSnapTuning { threshold_px: f64, gap_px: f64 },
    /// Arrange gap or padding is negative, or row tolerance is not positive.
    InvalidArrangeTuning {
        gap_cm: f64,
        padding_cm: f64,
        row_tolerance_cm: f64,
    },
    /// Orientation thresholds are not an increasing positive band.
    InvalidOrientationTuning {
        portrait_below: f64,
        landscape_above: f64,
    },
    /// Zoom range, step, fill or minimum viewport is out of range.
    InvalidViewTuning { min_zoom: f64, max_zoom: f64 },
    /// Preset area is zero, negative, or not finite.
    InvalidPreset {
        total_width_cm: f64,
        total_height_cm: f64,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidSnapTuning {
                threshold_px,
                gap_px,
            } => write!(
                f,
                "invalid snap tuning: threshold {threshold_px}px, gap {gap_px}px"
            ),
            Self::InvalidArrangeTuning {
                gap_cm,
                padding_cm,
                row_tolerance_cm,
            } => write!(
                f,
                "invalid arrange tuning: gap {gap_cm}cm, padding {padding_cm}cm, row tolerance {row_tolerance_cm}cm"
            ),
            Self::InvalidOrientationTuning {
                portrait_below,
                landscape_above,
            } => write!(
                f,
                "invalid orientation tuning: portrait below {portrait_below}, landscape above {landscape_above}"
            ),
            Self::InvalidViewTuning { min_zoom, max_zoom } => {
                write!(f, "invalid view tuning: zoom {min_zoom}..{max_zoom}")
            }
            Self::InvalidPreset {
                total_width_cm,
                total_height_cm,
            } => write!(
                f,
                "preset area must be positive, got {total_width_cm}×{total_height_cm} cm"
            ),
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(EditorConfig::default().validate().is_ok());
    }

    #[test]
    fn zoom_clamps() {
        let v = ViewTuning::default();
        assert_eq!(v.zoom_in(2.45), 2.5);
        assert_eq!(v.zoom_out(0.25), 0.2);
    }

    #[test]
    fn display_size_fits_and_zooms() {
        let v = ViewTuning::default();
        let canvas = CanvasSize::new(200.0, 100.0).unwrap();
        // 1000×1000 viewport → 950×950 available, 2:1 fits as 950×475.
        assert_eq!(
            v.display_size(&canvas, Size::new(1000.0, 1000.0), 1.0),
            Size::new(950.0, 475.0)
        );
        let half = v.display_size(&canvas, Size::new(1000.0, 1000.0), 0.5);
        assert_eq!(half, Size::new(475.0, 237.5));
    }

    #[test]
    fn tiny_viewport_is_floored() {
        let v = ViewTuning::default();
        let canvas = CanvasSize::new(100.0, 100.0).unwrap();
        assert_eq!(
            v.display_size(&canvas, Size::new(0.0, 0.0), 1.0),
            Size::new(95.0, 95.0)
        );
    }

    #[test]
    fn invalid_view_rejected() {
        let v = ViewTuning {
            min_zoom: 3.0,
            ..ViewTuning::default()
        };
        let err = v.validate().unwrap_err();
        assert!(err.to_string().contains("zoom"));
    }
}
