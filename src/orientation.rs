//! Frame orientation: auto-flip on image bind, manual flip, and size choice
//! for new frames.

use crate::config::ConfigError;
use crate::frame::{Frame, FrameSize};
use crate::geometry::{CanvasSize, GeometryError, Rect};
use crate::logging::debug;

/// Natural pixel dimensions of a loaded image.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageDims {
    pub width: u32,
    pub height: u32,
}

impl ImageDims {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width / height. Errors on a zero dimension.
    pub fn aspect_ratio(self) -> Result<f64, GeometryError> {
        if self.width == 0 || self.height == 0 {
            return Err(GeometryError::ZeroImageDimension);
        }
        Ok(f64::from(self.width) / f64::from(self.height))
    }
}

/// Ratio thresholds for orientation decisions.
///
/// Ratios between `portrait_below` and `landscape_above` count as neither
/// orientation, so near-square images never flip a frame back and forth.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OrientationTuning {
    pub landscape_above: f64,
    pub portrait_below: f64,
    /// New custom frames from images wider than this are landscape.
    pub new_landscape_above: f64,
    /// New custom frames from images narrower than this are portrait.
    pub new_portrait_below: f64,
}

impl Default for OrientationTuning {
    fn default() -> Self {
        Self {
            landscape_above: 1.1,
            portrait_below: 0.9,
            new_landscape_above: 1.2,
            new_portrait_below: 0.8,
        }
    }
}

impl OrientationTuning {
    pub fn validate(self) -> Result<(), ConfigError> {
        let band = |lo: f64, hi: f64| lo.is_finite() && hi.is_finite() && 0.0 < lo && lo <= hi;
        if !band(self.portrait_below, self.landscape_above)
            || !band(self.new_portrait_below, self.new_landscape_above)
        {
            return Err(ConfigError::InvalidOrientationTuning {
                portrait_below: self.portrait_below,
                landscape_above: self.landscape_above,
            });
        }
        Ok(())
    }

    fn is_landscape(&self, ratio: f64) -> bool {
        ratio > self.landscape_above
    }

    fn is_portrait(&self, ratio: f64) -> bool {
        ratio < self.portrait_below
    }
}

/// Flip `frame` to match the orientation of a newly bound image.
///
/// Returns `None` when the frame should stay as it is: square frames, images
/// with a zero dimension, and ratios that agree or fall in the dead zone.
/// A flip swaps the physical width and height, toggles the size tag, and
/// keeps the frame centered where it was.
pub fn reconcile(
    frame: &Frame,
    image: ImageDims,
    canvas: &CanvasSize,
    tuning: &OrientationTuning,
) -> Option<Frame> {
    if frame.size.is_square() {
        return None;
    }
    let image_ratio = image.aspect_ratio().ok()?;
    let frame_ratio = frame.aspect_ratio(canvas);
    let disagree = (tuning.is_landscape(image_ratio) && tuning.is_portrait(frame_ratio))
        || (tuning.is_portrait(image_ratio) && tuning.is_landscape(frame_ratio));
    if !disagree {
        return None;
    }

    let mut flipped = frame.clone();
    flipped.rect = swap_physical(frame.rect, canvas).centered_on(frame.center());
    flipped.size = frame.size.flipped();
    debug!(frame = %frame.id, image_ratio, frame_ratio, "orientation flip");
    Some(flipped)
}

/// Manual portrait ↔ landscape flip keeping the top-left corner.
///
/// Square frames are returned unchanged.
pub fn flip(frame: &Frame, canvas: &CanvasSize) -> Frame {
    let mut flipped = frame.clone();
    if !frame.size.is_square() {
        flipped.rect = swap_physical(frame.rect, canvas);
        flipped.size = frame.size.flipped();
    }
    flipped
}

/// Size tag for a new custom frame built around `image`.
///
/// An explicit request wins. Otherwise wide images get landscape, tall
/// images portrait, and everything else square.
pub fn size_for_image(
    requested: Option<FrameSize>,
    image: ImageDims,
    tuning: &OrientationTuning,
) -> FrameSize {
    if let Some(size) = requested {
        return size;
    }
    match image.aspect_ratio() {
        Ok(r) if r > tuning.new_landscape_above => FrameSize::S30x20,
        Ok(r) if r < tuning.new_portrait_below => FrameSize::S20x30,
        _ => FrameSize::S20x20,
    }
}

/// Swap width and height in centimeters, expressed back in percent.
fn swap_physical(rect: Rect, canvas: &CanvasSize) -> Rect {
    let cm = canvas.to_cm(rect);
    let swapped = canvas.to_percent(Rect::new(cm.x, cm.y, cm.height, cm.width));
    Rect::new(rect.x, rect.y, swapped.width, swapped.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> CanvasSize {
        CanvasSize::new(200.0, 150.0).unwrap()
    }

    /// 20×30 cm portrait frame centered at (30, 40) percent.
    fn portrait() -> Frame {
        Frame::custom("p".into(), FrameSize::S20x30, Rect::new(25.0, 30.0, 10.0, 20.0))
    }

    #[test]
    fn landscape_image_flips_portrait_frame() {
        let f = portrait();
        let out = reconcile(
            &f,
            ImageDims::new(4000, 3000),
            &canvas(),
            &OrientationTuning::default(),
        )
        .unwrap();
        assert_eq!(out.size, FrameSize::S30x20);
        let (w, h) = out.size_cm(&canvas());
        assert!((w - 30.0).abs() < 1e-9 && (h - 20.0).abs() < 1e-9);
        let (c0, c1) = (f.center(), out.center());
        assert!((c0.x - c1.x).abs() < 1e-9 && (c0.y - c1.y).abs() < 1e-9);
    }

    #[test]
    fn portrait_image_keeps_portrait_frame() {
        let out = reconcile(
            &portrait(),
            ImageDims::new(3000, 4000),
            &canvas(),
            &OrientationTuning::default(),
        );
        assert!(out.is_none());
    }

    #[test]
    fn dead_zone_never_flips() {
        // 1.05 is inside the 0.9..1.1 band.
        let out = reconcile(
            &portrait(),
            ImageDims::new(2100, 2000),
            &canvas(),
            &OrientationTuning::default(),
        );
        assert!(out.is_none());
    }

    #[test]
    fn squares_and_zero_dims_unchanged() {
        let mut sq = portrait();
        sq.size = FrameSize::S20x20;
        let t = OrientationTuning::default();
        assert!(reconcile(&sq, ImageDims::new(4000, 1000), &canvas(), &t).is_none());
        assert!(reconcile(&portrait(), ImageDims::new(0, 1000), &canvas(), &t).is_none());
    }

    #[test]
    fn manual_flip_keeps_corner() {
        let f = portrait();
        let out = flip(&f, &canvas());
        assert_eq!(out.size, FrameSize::S30x20);
        assert_eq!(out.position(), f.position());
        assert!((out.rect.width - 15.0).abs() < 1e-9);
    }

    #[test]
    fn new_frame_size_from_image() {
        let t = OrientationTuning::default();
        assert_eq!(size_for_image(None, ImageDims::new(1300, 1000), &t), FrameSize::S30x20);
        assert_eq!(size_for_image(None, ImageDims::new(700, 1000), &t), FrameSize::S20x30);
        assert_eq!(size_for_image(None, ImageDims::new(1150, 1000), &t), FrameSize::S20x20);
        assert_eq!(
            size_for_image(Some(FrameSize::S20x30), ImageDims::new(4000, 1000), &t),
            FrameSize::S20x30
        );
    }
}
