//! Editor store: application state, actions, and effects.
//!
//! The host feeds user input and async completions in as [`Action`]s and
//! executes the returned [`Effect`]s (image measurement, export capture),
//! answering them later with more actions. State is only ever changed by
//! [`Editor::dispatch`], and frame, library and assignment collections are
//! replaced copy-on-write.
//!
//! Nothing here fails loudly. Invalid input, missing frames, and
//! too-small selections are ignored and logged at `debug` level.
//!
//! ```
//! use zenwall::{Action, Editor, ImageRef};
//!
//! let mut editor = Editor::default();
//! let effects = editor.dispatch(Action::AddPhoto {
//!     image: ImageRef::new("beach.jpg"),
//!     size: None,
//! });
//! // The host measures the image and reports back.
//! assert_eq!(effects.len(), 1);
//! ```

use alloc::sync::Arc;
#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};

use crate::arrange::{Alignment, align, pack};
use crate::config::{ConfigError, EditorConfig};
use crate::drag::{DragSession, LiveLayer, resting_z_order};
use crate::frame::{Frame, FrameId, FrameKey, FrameSize, GroupId};
use crate::geometry::{CanvasSize, Point, Rect, Size};
use crate::library::{Assignments, ImageLibrary, ImageRef};
use crate::logging::debug;
use crate::orientation::{ImageDims, flip, reconcile, size_for_image};
use crate::preset::LayoutPreset;
use crate::selection::{MarqueeDrag, Selection, group, ungroup};
use crate::snap::SnapEngine;

/// Largest offset, in percent, for staggering new custom frames.
const NEW_FRAME_STAGGER: u64 = 60;
/// Smallest top-left coordinate, in percent, of a new custom frame.
const NEW_FRAME_MARGIN: f64 = 5.0;

/// User input and async completions.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Replace all frames with a preset's frames.
    ChoosePreset(LayoutPreset),
    /// Change the physical wall size, keeping frames' physical geometry.
    ResizeCanvas { width_cm: f64, height_cm: f64 },
    /// The space available for the wall on screen changed.
    ResizeViewport(Size),
    ZoomIn,
    ZoomOut,
    /// Lock or unlock frame dragging.
    SetLocked(bool),
    /// Click on a frame.
    Select { id: FrameId, additive: bool },
    ClearSelection,
    /// Press on empty canvas, in container pixels.
    BeginMarquee(Point),
    UpdateMarquee(Point),
    /// Release a marquee over a container of the given pixel size.
    EndMarquee { container: Size },
    Group,
    Ungroup,
    /// Press on a frame, pointer in screen pixels.
    BeginDrag { id: FrameId, pointer: Point },
    /// Pointer moved; `container` is the live on-screen canvas size.
    MoveDrag { pointer: Point, container: Size },
    EndDrag,
    AutoArrange,
    Align(Alignment),
    /// Portrait ↔ landscape, then auto-arrange.
    Flip(FrameId),
    /// Restore the active preset's geometry.
    ResetLayout,
    /// Upload an image into one frame.
    AssignImage { id: FrameId, image: ImageRef },
    /// Gallery pick: fill every selected frame, or add a frame if none.
    AssignToSelection(ImageRef),
    /// Fill empty frames in order; leftovers become new frames.
    BulkAssign(Vec<ImageRef>),
    /// Add a custom frame around an image.
    AddPhoto {
        image: ImageRef,
        size: Option<FrameSize>,
    },
    /// Answer to [`Effect::MeasureImage`].
    ImageMeasured {
        target: MeasureTarget,
        image: ImageRef,
        dims: ImageDims,
    },
    /// Delete a custom frame, or empty a preset frame.
    RemoveFrame(FrameId),
    /// Empty every frame and delete every custom frame.
    ClearAll,
    SwapImages { source: FrameId, target: FrameId },
    BeginCrop(FrameId),
    /// The cropper produced a new image for the open crop session.
    SaveCrop(ImageRef),
    CancelCrop,
    /// The image of a frame was rotated into a new image.
    ImageRotated { key: FrameKey, image: ImageRef },
    SetWallImage(Option<ImageRef>),
    BeginExport,
    /// Answer to [`Effect::CaptureExport`].
    FinishExport { success: bool },
    DismissNotification,
    ClearLibrary,
}

/// Work the host must do and report back.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Load `image` and answer with [`Action::ImageMeasured`].
    MeasureImage {
        target: MeasureTarget,
        image: ImageRef,
    },
    /// Render the snapshot and answer with [`Action::FinishExport`].
    CaptureExport(ExportSnapshot),
}

/// What a measured image is for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MeasureTarget {
    /// An image bound to an existing frame, possibly to be reoriented.
    Frame(FrameKey),
    /// A custom frame still to be created; `None` sizes it from the image.
    NewFrame(Option<FrameSize>),
}

/// Everything needed to render the wall.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportSnapshot {
    pub frames: Arc<Vec<Frame>>,
    pub assignments: Assignments,
    pub canvas: CanvasSize,
    /// On-screen wall size at zoom 1.
    pub pixel_size: Size,
    pub wall_image: Option<ImageRef>,
}

/// User-facing message.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    ExportFailed,
}

impl core::fmt::Display for Notification {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ExportFailed => f.write_str("failed to export the wall image"),
        }
    }
}

/// An open crop dialog.
#[derive(Clone, Debug, PartialEq)]
pub struct CropSession {
    pub key: FrameKey,
    pub image: ImageRef,
    /// Physical width / height of the frame being cropped for.
    pub aspect_ratio: f64,
}

/// View state put aside while an export is captured.
#[derive(Clone, Debug, PartialEq)]
struct SavedView {
    zoom: f64,
    selection: Selection,
    locked: bool,
}

/// Complete editor state.
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    canvas: CanvasSize,
    preset: Option<Arc<LayoutPreset>>,
    frames: Arc<Vec<Frame>>,
    selection: Selection,
    library: ImageLibrary,
    assignments: Assignments,
    drag: Option<DragSession>,
    live: LiveLayer,
    marquee: Option<MarqueeDrag>,
    zoom: f64,
    locked: bool,
    viewport: Size,
    wall_image: Option<ImageRef>,
    crop: Option<CropSession>,
    export: Option<SavedView>,
    notifications: Vec<Notification>,
    next_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::DEFAULT,
            preset: None,
            frames: Arc::default(),
            selection: Selection::new(),
            library: ImageLibrary::default(),
            assignments: Assignments::default(),
            drag: None,
            live: LiveLayer::default(),
            marquee: None,
            zoom: 1.0,
            locked: true,
            viewport: Size::default(),
            wall_image: None,
            crop: None,
            export: None,
            notifications: Vec::new(),
            next_id: 1,
        }
    }
}

impl AppState {
    pub fn canvas(&self) -> &CanvasSize {
        &self.canvas
    }

    pub fn preset(&self) -> Option<&LayoutPreset> {
        self.preset.as_deref()
    }

    /// Canonical frames. Positions during a drag live in [`Self::live`].
    pub fn frames(&self) -> &Arc<Vec<Frame>> {
        &self.frames
    }

    pub fn frame(&self, id: &FrameId) -> Option<&Frame> {
        self.frames.iter().find(|f| &f.id == id)
    }

    pub fn frame_by_key(&self, key: &FrameKey) -> Option<&Frame> {
        self.frames.iter().find(|f| &f.key() == key)
    }

    /// Image shown in the frame `id`, if any.
    pub fn image_of(&self, id: &FrameId) -> Option<&ImageRef> {
        self.frame(id).and_then(|f| self.assignments.get(&f.key()))
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn library(&self) -> &ImageLibrary {
        &self.library
    }

    pub fn assignments(&self) -> &Assignments {
        &self.assignments
    }

    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn live(&self) -> &LiveLayer {
        &self.live
    }

    pub fn marquee(&self) -> Option<&MarqueeDrag> {
        self.marquee.as_ref()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn wall_image(&self) -> Option<&ImageRef> {
        self.wall_image.as_ref()
    }

    pub fn crop(&self) -> Option<&CropSession> {
        self.crop.as_ref()
    }

    pub fn is_exporting(&self) -> bool {
        self.export.is_some()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Rectangle to draw for `frame`, following an active drag.
    pub fn display_rect(&self, frame: &Frame) -> Rect {
        self.live.display_rect(frame)
    }

    /// Stacking order: dragged frames on top, then selected, then the rest
    /// row-major.
    pub fn z_order(&self) -> alloc::collections::BTreeMap<FrameId, u32> {
        let mut z = resting_z_order(&self.frames, &self.selection);
        for (id, value) in z.iter_mut() {
            if let Some(boost) = self.live.z(id) {
                *value = boost;
            }
        }
        z
    }

    fn fresh_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn set_frames(&mut self, frames: Vec<Frame>) {
        self.frames = Arc::new(frames);
    }

    fn position(&self, id: &FrameId) -> Option<usize> {
        self.frames.iter().position(|f| &f.id == id)
    }

    fn position_by_key(&self, key: &FrameKey) -> Option<usize> {
        self.frames.iter().position(|f| &f.key() == key)
    }

    fn update_frame(&mut self, index: usize, edit: impl FnOnce(&mut Frame)) {
        if let Some(frame) = Arc::make_mut(&mut self.frames).get_mut(index) {
            edit(frame);
        }
    }
}

/// The editor: configuration plus state, driven by [`Action`]s.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Editor {
    config: EditorConfig,
    engine: SnapEngine,
    state: AppState,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            engine: SnapEngine::new(config.snap),
            state: AppState::default(),
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// On-screen wall size for the current viewport and zoom.
    pub fn display_size(&self) -> Size {
        self.config
            .view
            .display_size(&self.state.canvas, self.state.viewport, self.state.zoom)
    }

    /// Apply one action and return the effects the host must run.
    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        let mut effects = Vec::new();
        match action {
            Action::ChoosePreset(preset) => self.choose_preset(preset),
            Action::ResizeCanvas {
                width_cm,
                height_cm,
            } => self.resize_canvas(width_cm, height_cm),
            Action::ResizeViewport(size) => self.state.viewport = size,
            Action::ZoomIn => self.state.zoom = self.config.view.zoom_in(self.state.zoom),
            Action::ZoomOut => self.state.zoom = self.config.view.zoom_out(self.state.zoom),
            Action::SetLocked(locked) => self.state.locked = locked,
            Action::Select { id, additive } => self.select(&id, additive),
            Action::ClearSelection => self.state.selection.clear(),
            Action::BeginMarquee(at) => {
                self.state.selection.clear();
                self.state.marquee = Some(MarqueeDrag::new(at));
            }
            Action::UpdateMarquee(at) => {
                if let Some(m) = self.state.marquee.as_mut() {
                    m.current = at;
                }
            }
            Action::EndMarquee { container } => self.end_marquee(container),
            Action::Group => self.group(),
            Action::Ungroup => {
                if let Some(frames) = ungroup(&self.state.frames, &self.state.selection) {
                    self.state.set_frames(frames);
                }
            }
            Action::BeginDrag { id, pointer } => self.begin_drag(&id, pointer),
            Action::MoveDrag { pointer, container } => self.move_drag(pointer, container),
            Action::EndDrag => self.end_drag(),
            Action::AutoArrange => self.auto_arrange(),
            Action::Align(alignment) => {
                if let Some(frames) = align(&self.state.frames, &self.state.selection, alignment) {
                    self.state.set_frames(frames);
                }
            }
            Action::Flip(id) => self.flip(&id),
            Action::ResetLayout => self.reset_layout(),
            Action::AssignImage { id, image } => self.assign_image(&id, image, &mut effects),
            Action::AssignToSelection(image) => self.assign_to_selection(image, &mut effects),
            Action::BulkAssign(images) => self.bulk_assign(images, &mut effects),
            Action::AddPhoto { image, size } => {
                self.state.library.add(&image);
                effects.push(Effect::MeasureImage {
                    target: MeasureTarget::NewFrame(size),
                    image,
                });
            }
            Action::ImageMeasured {
                target,
                image,
                dims,
            } => self.image_measured(target, image, dims),
            Action::RemoveFrame(id) => self.remove_frame(&id),
            Action::ClearAll => self.clear_all(),
            Action::SwapImages { source, target } => self.swap_images(&source, &target),
            Action::BeginCrop(id) => self.begin_crop(&id),
            Action::SaveCrop(image) => self.save_crop(image),
            Action::CancelCrop => self.state.crop = None,
            Action::ImageRotated { key, image } => self.image_rotated(&key, image),
            Action::SetWallImage(image) => self.state.wall_image = image,
            Action::BeginExport => self.begin_export(&mut effects),
            Action::FinishExport { success } => self.finish_export(success),
            Action::DismissNotification => {
                if !self.state.notifications.is_empty() {
                    self.state.notifications.remove(0);
                }
            }
            Action::ClearLibrary => self.state.library.clear(),
        }
        effects
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn choose_preset(&mut self, preset: LayoutPreset) {
        if let Err(err) = preset.validate() {
            debug!(preset = %preset.id, %err, "preset rejected");
            return;
        }
        let s = &mut self.state;
        s.set_frames(preset.instantiate(&s.canvas));
        s.preset = Some(Arc::new(preset));
        s.selection.clear();
        s.drag = None;
        s.live.clear();
        s.marquee = None;
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn resize_canvas(&mut self, width_cm: f64, height_cm: f64) {
        let target = match CanvasSize::new(width_cm, height_cm) {
            Ok(target) => target,
            Err(err) => {
                debug!(%err, "canvas resize rejected");
                return;
            }
        };
        let s = &mut self.state;
        let old = s.canvas;
        let frames = s
            .frames
            .iter()
            .map(|f| {
                let mut f = f.clone();
                f.rect = old.rescale_to(&target, f.rect);
                f
            })
            .collect();
        s.set_frames(frames);
        s.canvas = target;
    }

    fn select(&mut self, id: &FrameId, additive: bool) {
        if self.state.frame(id).is_none() {
            debug!(frame = %id, "select on missing frame");
            return;
        }
        self.state.selection.toggle(&self.state.frames, id, additive);
    }

    fn end_marquee(&mut self, container: Size) {
        let Some(m) = self.state.marquee.take() else {
            return;
        };
        self.state
            .selection
            .marquee(&self.state.frames, m.rect(), container);
    }

    fn group(&mut self) {
        if self.state.selection.len() < 2 {
            debug!("group needs two frames");
            return;
        }
        let n = self.state.fresh_id();
        let id = GroupId::new(format!("group-{n}"));
        if let Some(frames) = group(&self.state.frames, &self.state.selection, id) {
            self.state.set_frames(frames);
        }
    }

    fn begin_drag(&mut self, id: &FrameId, pointer: Point) {
        let s = &mut self.state;
        if s.locked {
            debug!(frame = %id, "drag ignored: layout locked");
            return;
        }
        if s.drag.is_some() {
            debug!(frame = %id, "drag ignored: session active");
            return;
        }
        s.drag = DragSession::start(&s.frames, &s.selection, id, pointer);
    }

    fn move_drag(&mut self, pointer: Point, container: Size) {
        let s = &mut self.state;
        if let Some(session) = s.drag.as_mut() {
            session.update(pointer, container, &s.frames, &self.engine, &mut s.live);
        }
    }

    fn end_drag(&mut self) {
        let s = &mut self.state;
        let Some(session) = s.drag.take() else {
            return;
        };
        if let Some(frames) = session.finish(&s.frames, &mut s.live) {
            s.set_frames(frames);
        }
    }

    fn auto_arrange(&mut self) {
        let s = &mut self.state;
        let frames = pack(&s.frames, &s.canvas, &self.config.arrange);
        s.set_frames(frames);
    }

    fn flip(&mut self, id: &FrameId) {
        let s = &mut self.state;
        let Some(index) = s.position(id) else {
            debug!(frame = %id, "flip on missing frame");
            return;
        };
        if s.frames[index].size.is_square() {
            return;
        }
        let canvas = s.canvas;
        s.update_frame(index, |f| *f = flip(f, &canvas));
        debug!(frame = %id, "manual flip");
        self.auto_arrange();
    }

    fn reset_layout(&mut self) {
        let s = &mut self.state;
        let Some(preset) = s.preset.clone() else {
            return;
        };
        let frames = preset.reset(&s.frames, &s.canvas);
        s.set_frames(frames);
    }

    /// Bind `image` to the frame at `index` and request its measurement.
    fn bind(&mut self, index: usize, image: ImageRef, effects: &mut Vec<Effect>) {
        let s = &mut self.state;
        let key = s.frames[index].key();
        s.library.add(&image);
        s.assignments.assign(key.clone(), image.clone());
        s.update_frame(index, Frame::reset_content);
        effects.push(Effect::MeasureImage {
            target: MeasureTarget::Frame(key),
            image,
        });
    }

    fn assign_image(&mut self, id: &FrameId, image: ImageRef, effects: &mut Vec<Effect>) {
        match self.state.position(id) {
            Some(index) => self.bind(index, image, effects),
            None => debug!(frame = %id, "assign to missing frame"),
        }
    }

    fn assign_to_selection(&mut self, image: ImageRef, effects: &mut Vec<Effect>) {
        let targets: Vec<usize> = self
            .state
            .frames
            .iter()
            .enumerate()
            .filter(|(_, f)| self.state.selection.contains(&f.id))
            .map(|(i, _)| i)
            .collect();
        if targets.is_empty() {
            self.state.library.add(&image);
            effects.push(Effect::MeasureImage {
                target: MeasureTarget::NewFrame(None),
                image,
            });
            return;
        }
        for index in targets {
            self.bind(index, image.clone(), effects);
        }
    }

    fn bulk_assign(&mut self, images: Vec<ImageRef>, effects: &mut Vec<Effect>) {
        let empty: Vec<usize> = self
            .state
            .frames
            .iter()
            .enumerate()
            .filter(|(_, f)| !self.state.assignments.is_filled(&f.key()))
            .map(|(i, _)| i)
            .collect();
        debug!(images = images.len(), empty = empty.len(), "bulk assign");
        let mut slots = empty.into_iter();
        for image in images {
            match slots.next() {
                Some(index) => self.bind(index, image, effects),
                None => {
                    self.state.library.add(&image);
                    effects.push(Effect::MeasureImage {
                        target: MeasureTarget::NewFrame(None),
                        image,
                    });
                }
            }
        }
    }

    fn image_measured(&mut self, target: MeasureTarget, image: ImageRef, dims: ImageDims) {
        match target {
            MeasureTarget::Frame(key) => self.reconcile_frame(&key, &image, dims),
            MeasureTarget::NewFrame(size) => self.create_custom_frame(size, image, dims),
        }
    }

    fn reconcile_frame(&mut self, key: &FrameKey, image: &ImageRef, dims: ImageDims) {
        let s = &mut self.state;
        let Some(index) = s.position_by_key(key) else {
            debug!(%key, "measured image for missing frame");
            return;
        };
        if s.assignments.get(key) != Some(image) {
            debug!(%key, "measured image no longer bound");
            return;
        }
        let flipped = reconcile(&s.frames[index], dims, &s.canvas, &self.config.orientation);
        if let Some(flipped) = flipped {
            s.update_frame(index, |f| *f = flipped);
        }
    }

    fn create_custom_frame(&mut self, size: Option<FrameSize>, image: ImageRef, dims: ImageDims) {
        let size = size_for_image(size, dims, &self.config.orientation);
        let n = self.state.fresh_id();
        let s = &mut self.state;
        let count = s.frames.len() as u64;
        let offset = ((count * 2) % NEW_FRAME_STAGGER) as f64 + NEW_FRAME_MARGIN;
        let (w, h) = size.dimensions_cm();
        let rect = Rect::new(
            offset,
            offset,
            w * 100.0 / s.canvas.width_cm(),
            h * 100.0 / s.canvas.height_cm(),
        );
        let frame = Frame::custom(FrameId::new(format!("custom-frame-{n}")), size, rect);
        debug!(frame = %frame.id, size = size.label(), "custom frame added");
        s.assignments.assign(frame.key(), image);
        Arc::make_mut(&mut s.frames).push(frame);
    }

    fn remove_frame(&mut self, id: &FrameId) {
        let s = &mut self.state;
        let Some(index) = s.position(id) else {
            debug!(frame = %id, "remove on missing frame");
            return;
        };
        let frame = &s.frames[index];
        s.assignments.remove(&frame.key());
        if frame.is_custom() {
            Arc::make_mut(&mut s.frames).remove(index);
            s.selection = s.selection.iter().filter(|sel| *sel != id).cloned().collect();
        }
    }

    fn clear_all(&mut self) {
        let s = &mut self.state;
        s.assignments.clear();
        let frames = s.frames.iter().filter(|f| !f.is_custom()).cloned().collect();
        s.set_frames(frames);
        s.selection.clear();
    }

    fn swap_images(&mut self, source: &FrameId, target: &FrameId) {
        let s = &mut self.state;
        let (Some(si), Some(ti)) = (s.position(source), s.position(target)) else {
            debug!(%source, %target, "swap with missing frame");
            return;
        };
        let (sk, tk) = (s.frames[si].key(), s.frames[ti].key());
        s.assignments.swap(&sk, &tk);
        s.update_frame(si, Frame::reset_content);
        s.update_frame(ti, Frame::reset_content);
        if s.selection.contains(source) {
            s.selection = [target.clone()].into_iter().collect();
        }
    }

    fn begin_crop(&mut self, id: &FrameId) {
        let s = &mut self.state;
        let Some(frame) = s.frame(id) else {
            return;
        };
        let key = frame.key();
        let Some(image) = s.assignments.get(&key).cloned() else {
            debug!(frame = %id, "crop on empty frame");
            return;
        };
        let aspect_ratio = frame.aspect_ratio(&s.canvas);
        s.crop = Some(CropSession {
            key,
            image,
            aspect_ratio,
        });
    }

    fn save_crop(&mut self, image: ImageRef) {
        let s = &mut self.state;
        let Some(session) = s.crop.take() else {
            return;
        };
        s.library.add(&image);
        s.assignments.assign(session.key.clone(), image);
        if let Some(index) = s.position_by_key(&session.key) {
            s.update_frame(index, |f| f.rotation = 0.0);
        }
    }

    fn image_rotated(&mut self, key: &FrameKey, image: ImageRef) {
        let s = &mut self.state;
        let Some(index) = s.position_by_key(key) else {
            debug!(%key, "rotated image for missing frame");
            return;
        };
        s.library.add(&image);
        s.assignments.assign(key.clone(), image);
        s.update_frame(index, |f| f.rotation = 0.0);
    }

    fn begin_export(&mut self, effects: &mut Vec<Effect>) {
        if self.state.export.is_some() {
            debug!("export already running");
            return;
        }
        let pixel_size = self
            .config
            .view
            .display_size(&self.state.canvas, self.state.viewport, 1.0);
        let s = &mut self.state;
        s.export = Some(SavedView {
            zoom: s.zoom,
            selection: core::mem::take(&mut s.selection),
            locked: s.locked,
        });
        s.zoom = 1.0;
        s.locked = true;
        debug!(width = pixel_size.width, height = pixel_size.height, "export begin");
        effects.push(Effect::CaptureExport(ExportSnapshot {
            frames: Arc::clone(&s.frames),
            assignments: s.assignments.clone(),
            canvas: s.canvas,
            pixel_size,
            wall_image: s.wall_image.clone(),
        }));
    }

    fn finish_export(&mut self, success: bool) {
        let s = &mut self.state;
        let Some(saved) = s.export.take() else {
            return;
        };
        s.zoom = saved.zoom;
        s.selection = saved.selection;
        s.locked = saved.locked;
        if !success {
            s.notifications.push(Notification::ExportFailed);
        }
        debug!(success, "export finish");
    }
}
