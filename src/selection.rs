//! Selection set with group expansion, marquee selection and grouping.

use alloc::collections::BTreeSet;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::frame::{Frame, FrameId, GroupId};
use crate::geometry::{Point, Rect, Size, percent_to_px};
use crate::logging::debug;

/// The set of selected frame ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Selection(BTreeSet<FrameId>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &FrameId) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrameId> {
        self.0.iter()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Click selection.
    ///
    /// The target is the clicked frame's whole group, or the frame alone.
    /// Without `additive` the selection becomes exactly the target. With it,
    /// every target member moves in the direction of the clicked frame: all
    /// removed if it was selected, all added otherwise.
    ///
    /// An id with no frame selects just that id, mirroring an ungrouped click.
    pub fn toggle(&mut self, frames: &[Frame], id: &FrameId, additive: bool) {
        let target = group_of(frames, id);
        if !additive {
            self.0 = target.into_iter().collect();
            return;
        }
        if self.0.contains(id) {
            for member in &target {
                self.0.remove(member);
            }
        } else {
            self.0.extend(target);
        }
    }

    /// Replace the selection with every frame whose on-screen box strictly
    /// overlaps `marquee`.
    ///
    /// `marquee` is in pixels relative to the container's top-left corner.
    /// An empty hit set leaves the selection empty.
    pub fn marquee(&mut self, frames: &[Frame], marquee: Rect, container: Size) {
        self.0 = frames
            .iter()
            .filter(|f| percent_to_px(f.rect, container).intersects(&marquee))
            .map(|f| f.id.clone())
            .collect();
        debug!(hits = self.0.len(), "marquee selection");
    }

    /// Ids in the selection that also have a frame.
    pub fn resolve<'a>(&'a self, frames: &'a [Frame]) -> impl Iterator<Item = &'a Frame> + 'a {
        frames.iter().filter(|f| self.0.contains(&f.id))
    }
}

impl FromIterator<FrameId> for Selection {
    fn from_iter<I: IntoIterator<Item = FrameId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The clicked frame plus every frame sharing its group.
fn group_of(frames: &[Frame], id: &FrameId) -> Vec<FrameId> {
    let group = frames
        .iter()
        .find(|f| &f.id == id)
        .and_then(|f| f.group.as_ref());
    match group {
        Some(g) => frames
            .iter()
            .filter(|f| f.group.as_ref() == Some(g))
            .map(|f| f.id.clone())
            .collect(),
        None => alloc::vec![id.clone()],
    }
}

/// Frames that move together when `pressed` is dragged.
///
/// The pressed frame and its group, plus, when the pressed frame is
/// selected, every selected frame and all members of their groups.
pub fn drag_cohort(
    frames: &[Frame],
    selection: &Selection,
    pressed: &FrameId,
) -> BTreeSet<FrameId> {
    let mut cohort: BTreeSet<FrameId> = group_of(frames, pressed).into_iter().collect();
    if selection.contains(pressed) {
        cohort.extend(selection.iter().cloned());
        let groups: BTreeSet<&GroupId> = selection
            .resolve(frames)
            .filter_map(|f| f.group.as_ref())
            .collect();
        cohort.extend(
            frames
                .iter()
                .filter(|f| f.group.as_ref().is_some_and(|g| groups.contains(g)))
                .map(|f| f.id.clone()),
        );
    }
    cohort
}

/// Put every selected frame into `group`, replacing earlier membership.
///
/// Returns `None` when fewer than two frames are selected.
pub fn group(frames: &[Frame], selection: &Selection, group: GroupId) -> Option<Vec<Frame>> {
    if selection.len() < 2 {
        debug!(selected = selection.len(), "group needs two frames");
        return None;
    }
    Some(
        frames
            .iter()
            .map(|f| {
                let mut f = f.clone();
                if selection.contains(&f.id) {
                    f.group = Some(group.clone());
                }
                f
            })
            .collect(),
    )
}

/// Clear group membership of every selected frame.
///
/// Returns `None` when nothing is selected.
pub fn ungroup(frames: &[Frame], selection: &Selection) -> Option<Vec<Frame>> {
    if selection.is_empty() {
        return None;
    }
    Some(
        frames
            .iter()
            .map(|f| {
                let mut f = f.clone();
                if selection.contains(&f.id) {
                    f.group = None;
                }
                f
            })
            .collect(),
    )
}

/// Rubber-band rectangle of an in-progress marquee gesture, in container
/// pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarqueeDrag {
    pub start: Point,
    pub current: Point,
}

impl MarqueeDrag {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            current: start,
        }
    }

    /// Normalized rectangle, whichever way the pointer went.
    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.start, self.current)
    }
}
