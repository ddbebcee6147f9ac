//! Gallery wall layout geometry: snapping, group dragging, marquee selection,
//! auto-arrange, and orientation reconciliation.
//!
//! Pure geometry and state transitions. No rendering, no I/O; the host
//! measures images and captures exports when asked via [`Effect`]s.
//! `no_std` compatible with `alloc`.
//!
//! # Modules
//!
//! - [`geometry`]: points, rectangles, and percent/cm/pixel conversions
//! - [`frame`]: frames, sizes, identifiers, and keys
//! - [`snap`]: gap and alignment snapping of a dragged frame
//! - [`drag`]: multi-frame drag sessions and the live layer
//! - [`selection`]: click, group, and marquee selection
//! - [`arrange`]: auto-arrange into rows and alignment
//! - [`orientation`]: portrait/landscape reconciliation against images
//! - [`preset`]: layout presets
//! - [`library`]: image library and assignments
//! - [`config`]: tuning and validation
//! - [`editor`]: the action/effect store tying it all together

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod logging;

pub mod arrange;
pub mod config;
pub mod drag;
pub mod editor;
pub mod frame;
pub mod geometry;
pub mod library;
pub mod orientation;
pub mod preset;
pub mod selection;
pub mod snap;

#[cfg(feature = "svg")]
pub mod svg;

pub use arrange::{Alignment, ArrangeTuning, align, pack};
pub use config::{ConfigError, EditorConfig, ViewTuning};
pub use drag::{DragSession, LiveLayer, resting_z_order};
pub use editor::{
    Action, AppState, CropSession, Editor, Effect, ExportSnapshot, MeasureTarget, Notification,
};
pub use frame::{FitMode, Frame, FrameId, FrameKey, FrameSize, GroupId, Origin};
pub use geometry::{
    CanvasSize, GeometryError, Point, Rect, Size, fit_aspect, percent_to_px, px_to_percent, round2,
};
pub use library::{Assignments, ImageLibrary, ImageRef};
pub use orientation::{ImageDims, OrientationTuning, flip, reconcile, size_for_image};
pub use preset::{LayoutPreset, PresetFrame};
pub use selection::{MarqueeDrag, Selection, drag_cohort, group, ungroup};
pub use snap::{SnapEngine, SnapKind, SnapOutcome, SnapTuning};
