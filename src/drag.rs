//! Drag sessions: press, move, release.
//!
//! A session owns the start position of every frame in the drag cohort.
//! Pointer moves snap the lead frame and write the result to a [`LiveLayer`]
//! without touching the canonical frame list. Release produces the committed
//! frame list in one step.

use alloc::collections::BTreeMap;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::frame::{Frame, FrameId};
use crate::geometry::{Point, Rect, Size, px_to_percent, row_major_order};
use crate::logging::{debug, trace};
use crate::selection::{Selection, drag_cohort};
use crate::snap::{SnapEngine, SnapOutcome};

/// Z-order base for frames being dragged.
pub const DRAG_Z_BASE: u32 = 3000;
/// Z-order base for frames at rest.
pub const REST_Z_BASE: u32 = 10;
/// Extra z-order for selected frames at rest.
pub const SELECTED_Z_BOOST: u32 = 500;
/// Row tolerance, in percent, when stacking frames row-major.
pub const STACK_ROW_TOLERANCE: f64 = 0.1;

/// Ephemeral render state written during a drag.
///
/// Anything present here overrides the canonical frame position for display.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LiveLayer {
    positions: BTreeMap<FrameId, Point>,
    z_order: BTreeMap<FrameId, u32>,
}

impl LiveLayer {
    pub fn position(&self, id: &FrameId) -> Option<Point> {
        self.positions.get(id).copied()
    }

    pub fn z(&self, id: &FrameId) -> Option<u32> {
        self.z_order.get(id).copied()
    }

    /// Rectangle to draw for `frame`: live position if any, else canonical.
    pub fn display_rect(&self, frame: &Frame) -> Rect {
        match self.position(&frame.id) {
            Some(p) => frame.rect.with_origin(p),
            None => frame.rect,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.z_order.is_empty()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.z_order.clear();
    }
}

/// An active drag. Exists only between press and release.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    lead: FrameId,
    lead_start: Point,
    lead_size: Size,
    pointer_origin: Point,
    starts: BTreeMap<FrameId, Point>,
    last_lead: Option<Point>,
}

impl DragSession {
    /// Start dragging `pressed` with the pointer at `pointer` (screen px).
    ///
    /// The cohort is the pressed frame with its group and, if it is
    /// selected, the whole selection with theirs. Returns `None` when
    /// `pressed` has no frame.
    pub fn start(
        frames: &[Frame],
        selection: &Selection,
        pressed: &FrameId,
        pointer: Point,
    ) -> Option<Self> {
        let Some(lead) = frames.iter().find(|f| &f.id == pressed) else {
            debug!(frame = %pressed, "drag start on missing frame");
            return None;
        };
        let cohort = drag_cohort(frames, selection, pressed);
        let starts: BTreeMap<FrameId, Point> = frames
            .iter()
            .filter(|f| cohort.contains(&f.id))
            .map(|f| (f.id.clone(), f.position()))
            .collect();
        debug!(lead = %pressed, cohort = starts.len(), "drag start");
        Some(Self {
            lead: pressed.clone(),
            lead_start: lead.position(),
            lead_size: lead.rect.size(),
            pointer_origin: pointer,
            starts,
            last_lead: None,
        })
    }

    /// Start a session with an explicit cohort.
    ///
    /// `starts` need not contain `lead`; such a session commits the lead
    /// frame alone.
    pub fn with_starts(lead: &Frame, pointer: Point, starts: BTreeMap<FrameId, Point>) -> Self {
        Self {
            lead: lead.id.clone(),
            lead_start: lead.position(),
            lead_size: lead.rect.size(),
            pointer_origin: pointer,
            starts,
            last_lead: None,
        }
    }

    pub fn lead(&self) -> &FrameId {
        &self.lead
    }

    pub fn cohort(&self) -> impl Iterator<Item = &FrameId> {
        self.starts.keys()
    }

    pub fn contains(&self, id: &FrameId) -> bool {
        &self.lead == id || self.starts.contains_key(id)
    }

    /// Last snapped position of the lead, if the pointer has moved.
    pub fn last_lead(&self) -> Option<Point> {
        self.last_lead
    }

    /// Apply a pointer move.
    ///
    /// The pixel delta since the press is converted to percent of
    /// `container`; the lead's proposed position is snapped against every
    /// frame outside the cohort and the effective delta is applied to all
    /// members in `live`. Moves over a container with a non-positive axis
    /// are ignored.
    pub fn update(
        &mut self,
        pointer: Point,
        container: Size,
        frames: &[Frame],
        engine: &SnapEngine,
        live: &mut LiveLayer,
    ) -> Option<SnapOutcome> {
        let (dx_px, dy_px) = pointer.delta_from(self.pointer_origin);
        let dx = px_to_percent(dx_px, container.width)?;
        let dy = px_to_percent(dy_px, container.height)?;

        let neighbors: Vec<Rect> = frames
            .iter()
            .filter(|f| !self.contains(&f.id))
            .map(|f| f.rect)
            .collect();
        let proposed = self.lead_start.offset(dx, dy);
        let outcome = engine.snap(self.lead_size, proposed, &neighbors, container);
        let (ex, ey) = outcome.position.delta_from(self.lead_start);

        live.positions.clear();
        live.positions.insert(self.lead.clone(), outcome.position);
        for (id, start) in &self.starts {
            if id != &self.lead {
                live.positions.insert(id.clone(), start.offset(ex, ey));
            }
        }
        self.boost(live);

        trace!(x = outcome.position.x, y = outcome.position.y, "drag move");
        self.last_lead = Some(outcome.position);
        Some(outcome)
    }

    /// Raise the cohort above resting frames, stacked row-major by
    /// projected position.
    fn boost(&self, live: &mut LiveLayer) {
        let (ids, points): (Vec<&FrameId>, Vec<Point>) = live.positions.iter().unzip();
        live.z_order.clear();
        for (rank, i) in row_major_order(&points, STACK_ROW_TOLERANCE).into_iter().enumerate() {
            live.z_order.insert(ids[i].clone(), DRAG_Z_BASE + rank as u32);
        }
    }

    /// End the session and produce the committed frame list.
    ///
    /// Every cohort member lands at `start + final_delta`. Returns `None`
    /// when the pointer never moved. `live` is cleared either way.
    pub fn finish(self, frames: &[Frame], live: &mut LiveLayer) -> Option<Vec<Frame>> {
        live.clear();
        let Some(last) = self.last_lead else {
            debug!(lead = %self.lead, "drag ended without movement");
            return None;
        };

        let Some(lead_start) = self.starts.get(&self.lead) else {
            debug!(lead = %self.lead, "drag lead has no start; committing lead only");
            return Some(
                frames
                    .iter()
                    .map(|f| {
                        let mut f = f.clone();
                        if f.id == self.lead {
                            f.rect = f.rect.with_origin(last);
                        }
                        f
                    })
                    .collect(),
            );
        };

        let (dx, dy) = last.delta_from(*lead_start);
        debug!(lead = %self.lead, dx, dy, members = self.starts.len(), "drag commit");
        Some(
            frames
                .iter()
                .map(|f| {
                    let mut f = f.clone();
                    if let Some(start) = self.starts.get(&f.id) {
                        f.rect = f.rect.with_origin(start.offset(dx, dy));
                    }
                    f
                })
                .collect(),
        )
    }
}

/// Stacking order for frames at rest.
///
/// Row-major rank plus [`REST_Z_BASE`], with [`SELECTED_Z_BOOST`] on top for
/// selected frames.
pub fn resting_z_order(frames: &[Frame], selection: &Selection) -> BTreeMap<FrameId, u32> {
    let points: Vec<Point> = frames.iter().map(Frame::position).collect();
    row_major_order(&points, STACK_ROW_TOLERANCE)
        .into_iter()
        .enumerate()
        .map(|(rank, i)| {
            let f = &frames[i];
            let boost = if selection.contains(&f.id) {
                SELECTED_Z_BOOST
            } else {
                0
            };
            (f.id.clone(), REST_Z_BASE + rank as u32 + boost)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FrameSize, GroupId};
    use crate::snap::SnapKind;

    const SCREEN: Size = Size::new(1000.0, 1000.0);

    fn frame(id: &str, x: f64, y: f64) -> Frame {
        Frame::custom(id.into(), FrameSize::S20x20, Rect::new(x, y, 10.0, 10.0))
    }

    fn find<'a>(frames: &'a [Frame], id: &str) -> &'a Frame {
        frames.iter().find(|f| f.id.as_str() == id).unwrap()
    }

    #[test]
    fn group_follows_lead_exactly() {
        let mut frames = vec![
            frame("a", 20.0, 20.0),
            frame("b", 35.0, 20.0),
            frame("c", 70.0, 70.0),
        ];
        frames[0].group = Some(GroupId::new("g"));
        frames[1].group = Some(GroupId::new("g"));

        let mut live = LiveLayer::default();
        let mut s = DragSession::start(&frames, &Selection::new(), &"a".into(), Point::default())
            .unwrap();
        // +3.33 % x, +23.33 % y; nothing nearby to snap to.
        s.update(Point::new(33.3, 233.3), SCREEN, &frames, &SnapEngine::default(), &mut live)
            .unwrap();
        let a = live.position(&"a".into()).unwrap();
        let b = live.position(&"b".into()).unwrap();
        assert!((b.x - a.x - 15.0).abs() < 1e-9);
        assert_eq!(a.y, b.y);
        assert!(live.position(&"c".into()).is_none());

        let committed = s.finish(&frames, &mut live).unwrap();
        assert!(live.is_empty());
        assert_eq!(find(&committed, "a").position(), a);
        assert_eq!(find(&committed, "b").position(), b);
        assert_eq!(find(&committed, "c").rect, frames[2].rect);
    }

    #[test]
    fn cohort_excluded_from_neighbors() {
        // "b" sits one gap right of "a"; without exclusion it would pull the lead.
        let mut frames = vec![frame("a", 20.0, 20.0), frame("b", 31.6, 20.0)];
        frames[0].group = Some(GroupId::new("g"));
        frames[1].group = Some(GroupId::new("g"));
        let mut live = LiveLayer::default();
        let mut s = DragSession::start(&frames, &Selection::new(), &"a".into(), Point::default())
            .unwrap();
        // Proposed x 43.0 is 0.2 from a gap after "b".
        let out = s
            .update(Point::new(230.0, 153.0), SCREEN, &frames, &SnapEngine::default(), &mut live)
            .unwrap();
        assert_eq!(out.kind_x, SnapKind::Free);
        assert_eq!(out.position.x, 43.0);
    }

    #[test]
    fn no_move_commits_nothing() {
        let frames = vec![frame("a", 20.0, 20.0)];
        let mut live = LiveLayer::default();
        let s = DragSession::start(&frames, &Selection::new(), &"a".into(), Point::default())
            .unwrap();
        assert!(s.finish(&frames, &mut live).is_none());
    }

    #[test]
    fn missing_lead_start_commits_lead_alone() {
        let frames = vec![frame("a", 20.0, 20.0), frame("b", 40.0, 20.0)];
        let starts = [(FrameId::from("b"), Point::new(40.0, 20.0))].into_iter().collect();
        let mut s = DragSession::with_starts(&frames[0], Point::default(), starts);
        let mut live = LiveLayer::default();
        s.update(Point::new(0.0, 333.0), SCREEN, &frames, &SnapEngine::default(), &mut live)
            .unwrap();
        let last = s.last_lead().unwrap();
        let committed = s.finish(&frames, &mut live).unwrap();
        assert_eq!(find(&committed, "a").position(), last);
        assert_eq!(find(&committed, "b").position(), Point::new(40.0, 20.0));
    }

    #[test]
    fn zero_container_ignores_move() {
        let frames = vec![frame("a", 20.0, 20.0)];
        let mut live = LiveLayer::default();
        let mut s = DragSession::start(&frames, &Selection::new(), &"a".into(), Point::default())
            .unwrap();
        let out = s.update(
            Point::new(10.0, 10.0),
            Size::new(0.0, 0.0),
            &frames,
            &SnapEngine::default(),
            &mut live,
        );
        assert!(out.is_none());
        assert!(live.is_empty());
        assert!(s.last_lead().is_none());
    }

    #[test]
    fn drag_z_order_is_row_major() {
        let frames = vec![
            frame("right", 40.0, 20.0),
            frame("left", 20.0, 20.05),
            frame("below", 5.0, 40.0),
        ];
        let sel: Selection = frames.iter().map(|f| f.id.clone()).collect();
        let mut live = LiveLayer::default();
        let mut s = DragSession::start(&frames, &sel, &"right".into(), Point::default()).unwrap();
        s.update(Point::new(0.0, 0.0), SCREEN, &frames, &SnapEngine::default(), &mut live)
            .unwrap();
        assert_eq!(live.z(&"left".into()), Some(3000));
        assert_eq!(live.z(&"right".into()), Some(3001));
        assert_eq!(live.z(&"below".into()), Some(3002));
    }

    #[test]
    fn resting_order_boosts_selection() {
        let frames = vec![frame("b", 50.0, 0.0), frame("a", 0.0, 0.0), frame("c", 0.0, 50.0)];
        let sel: Selection = [FrameId::from("c")].into_iter().collect();
        let z = resting_z_order(&frames, &sel);
        assert_eq!(z[&FrameId::from("a")], 10);
        assert_eq!(z[&FrameId::from("b")], 11);
        assert_eq!(z[&FrameId::from("c")], 512);
    }
}
