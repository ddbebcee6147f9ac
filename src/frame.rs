//! Frames: the movable units on the wall.

#[cfg(not(feature = "std"))]
use alloc::{format, string::String, string::ToString};

use crate::geometry::{CanvasSize, Point, Rect};

/// Stable frame identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FrameId(String);

impl FrameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FrameId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl core::fmt::Display for FrameId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier shared by frames that move and select together.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Key of a frame in the image assignment map.
///
/// Preset frame ids repeat across presets (`"lira-1"` may exist in several
/// sessions of the same preset), so preset keys are namespaced by the preset
/// id. Custom frame ids are globally unique and used as-is.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FrameKey(String);

impl FrameKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for FrameKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a frame came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Origin {
    /// Created from the layout preset with this id. Survives "remove"
    /// (only its image is cleared).
    Preset { layout: String },
    /// Added by the user. Freely deletable.
    Custom,
}

/// Physical frame size category, width × height in centimeters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameSize {
    /// 20 × 20 cm square.
    #[cfg_attr(feature = "serde", serde(rename = "20x20cm"))]
    S20x20,
    /// 20 × 30 cm portrait.
    #[cfg_attr(feature = "serde", serde(rename = "20x30cm"))]
    S20x30,
    /// 30 × 20 cm landscape.
    #[cfg_attr(feature = "serde", serde(rename = "30x20cm"))]
    S30x20,
}

impl FrameSize {
    /// Nominal `(width, height)` in centimeters.
    pub const fn dimensions_cm(self) -> (f64, f64) {
        match self {
            Self::S20x20 => (20.0, 20.0),
            Self::S20x30 => (20.0, 30.0),
            Self::S30x20 => (30.0, 20.0),
        }
    }

    pub const fn is_square(self) -> bool {
        matches!(self, Self::S20x20)
    }

    /// Portrait ↔ landscape. Squares are unchanged.
    pub const fn flipped(self) -> Self {
        match self {
            Self::S20x20 => Self::S20x20,
            Self::S20x30 => Self::S30x20,
            Self::S30x20 => Self::S20x30,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::S20x20 => "20x20cm",
            Self::S20x30 => "20x30cm",
            Self::S30x20 => "30x20cm",
        }
    }
}

/// How image content fills the frame rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FitMode {
    /// Fill the frame, cropping overflow.
    #[default]
    Cover,
    /// Fit inside the frame, letterboxing.
    Contain,
    /// Explicit content rectangle in percent of the frame.
    Custom(Rect),
}

/// A photo frame on the wall.
///
/// Geometry is in percent of the canvas. `0 ≤ x` and `x + width ≤ 100` are
/// targets that snapping and arranging aim for, not invariants; a frame
/// dragged past the edge stays there.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub id: FrameId,
    pub origin: Origin,
    pub size: FrameSize,
    pub rect: Rect,
    /// Content rotation in degrees.
    pub rotation: f64,
    pub fit: FitMode,
    pub group: Option<GroupId>,
}

impl Frame {
    /// A custom frame with default content settings.
    pub fn custom(id: FrameId, size: FrameSize, rect: Rect) -> Self {
        Self {
            id,
            origin: Origin::Custom,
            size,
            rect,
            rotation: 0.0,
            fit: FitMode::Cover,
            group: None,
        }
    }

    /// A frame bound to the preset `layout`.
    pub fn preset(id: FrameId, layout: impl Into<String>, size: FrameSize, rect: Rect) -> Self {
        Self {
            origin: Origin::Preset {
                layout: layout.into(),
            },
            ..Self::custom(id, size, rect)
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self.origin, Origin::Custom)
    }

    /// Key under which this frame's image is stored.
    pub fn key(&self) -> FrameKey {
        match &self.origin {
            Origin::Custom => FrameKey(self.id.0.clone()),
            Origin::Preset { layout } => FrameKey(format!("{layout}-{}", self.id)),
        }
    }

    pub fn position(&self) -> Point {
        self.rect.origin()
    }

    pub fn center(&self) -> Point {
        self.rect.center()
    }

    /// Physical `(width, height)` in centimeters on `canvas`.
    pub fn size_cm(&self, canvas: &CanvasSize) -> (f64, f64) {
        let cm = canvas.to_cm(self.rect);
        (cm.width, cm.height)
    }

    /// Width / height in physical units.
    pub fn aspect_ratio(&self, canvas: &CanvasSize) -> f64 {
        let (w, h) = self.size_cm(canvas);
        w / h
    }

    /// Clear per-image content settings, done whenever a new image is bound.
    pub fn reset_content(&mut self) {
        self.rotation = 0.0;
        self.fit = FitMode::Cover;
    }
}
