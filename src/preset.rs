//! Layout presets: static frame arrangements placed onto the wall.

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

use crate::config::ConfigError;
use crate::frame::{Frame, FrameId, FrameSize, Origin};
use crate::geometry::{CanvasSize, Rect};

/// Top offset, in percent, of a freshly placed preset.
const TOP_OFFSET: f64 = 5.0;

/// One frame of a preset, in percent of the preset's own area.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PresetFrame {
    pub id: FrameId,
    pub size: FrameSize,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub rect: Rect,
}

/// A named arrangement covering `total_width_cm × total_height_cm`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutPreset {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub total_width_cm: f64,
    pub total_height_cm: f64,
    pub frames: Vec<PresetFrame>,
}

impl LayoutPreset {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !ok(self.total_width_cm) || !ok(self.total_height_cm) {
            return Err(ConfigError::InvalidPreset {
                total_width_cm: self.total_width_cm,
                total_height_cm: self.total_height_cm,
            });
        }
        Ok(())
    }

    /// Where `frame` lands on `canvas`: scaled by preset area over canvas,
    /// centered horizontally and offset from the top.
    pub fn place(&self, frame: &PresetFrame, canvas: &CanvasSize) -> Rect {
        let sx = self.total_width_cm / canvas.width_cm();
        let sy = self.total_height_cm / canvas.height_cm();
        let offset_x = (100.0 - 100.0 * sx) / 2.0;
        let r = frame.rect;
        Rect::new(
            r.x * sx + offset_x,
            r.y * sy + TOP_OFFSET,
            r.width * sx,
            r.height * sy,
        )
    }

    /// Fresh frames for this preset on `canvas`.
    pub fn instantiate(&self, canvas: &CanvasSize) -> Vec<Frame> {
        self.frames
            .iter()
            .map(|pf| {
                Frame::preset(pf.id.clone(), self.id.clone(), pf.size, self.place(pf, canvas))
            })
            .collect()
    }

    /// Restore preset geometry, size and content settings for every frame
    /// that belongs to this preset. Group membership is dropped. Other
    /// frames are left alone.
    pub fn reset(&self, frames: &[Frame], canvas: &CanvasSize) -> Vec<Frame> {
        frames
            .iter()
            .map(|f| {
                let ours = matches!(&f.origin, Origin::Preset { layout } if *layout == self.id);
                match self.frames.iter().find(|pf| ours && pf.id == f.id) {
                    Some(pf) => Frame::preset(
                        f.id.clone(),
                        self.id.clone(),
                        pf.size,
                        self.place(pf, canvas),
                    ),
                    None => f.clone(),
                }
            })
            .collect()
    }
}
