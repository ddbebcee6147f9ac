//! Image library and frame-to-image assignments.
//!
//! Both collections are shared snapshots: cloning is cheap and every write
//! goes through [`Arc::make_mut`], so a reader holding an older clone never
//! sees a partial update.

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

use crate::frame::FrameKey;

/// Opaque reference to an image, typically a URL.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageRef {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

/// Ordered, deduplicated list of every image seen this session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageLibrary {
    images: Arc<Vec<ImageRef>>,
}

impl ImageLibrary {
    /// Append `image` unless already present. Returns whether it was added.
    pub fn add(&mut self, image: &ImageRef) -> bool {
        if self.images.contains(image) {
            return false;
        }
        Arc::make_mut(&mut self.images).push(image.clone());
        true
    }

    pub fn clear(&mut self) {
        self.images = Arc::default();
    }

    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Which image fills which frame. A frame without an entry is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignments {
    map: Arc<BTreeMap<FrameKey, ImageRef>>,
}

impl Assignments {
    pub fn get(&self, key: &FrameKey) -> Option<&ImageRef> {
        self.map.get(key)
    }

    pub fn is_filled(&self, key: &FrameKey) -> bool {
        self.map.contains_key(key)
    }

    pub fn assign(&mut self, key: FrameKey, image: ImageRef) {
        Arc::make_mut(&mut self.map).insert(key, image);
    }

    pub fn remove(&mut self, key: &FrameKey) -> Option<ImageRef> {
        if !self.map.contains_key(key) {
            return None;
        }
        Arc::make_mut(&mut self.map).remove(key)
    }

    /// Exchange the images of two frames. An empty side empties the other.
    pub fn swap(&mut self, a: &FrameKey, b: &FrameKey) {
        if a == b {
            return;
        }
        let map = Arc::make_mut(&mut self.map);
        let image_a = map.remove(a);
        let image_b = map.remove(b);
        if let Some(image) = image_a {
            map.insert(b.clone(), image);
        }
        if let Some(image) = image_b {
            map.insert(a.clone(), image);
        }
    }

    pub fn clear(&mut self) {
        self.map = Arc::default();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FrameKey, &ImageRef)> {
        self.map.iter()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Frame, FrameSize};
    use crate::geometry::Rect;

    fn key(id: &str) -> FrameKey {
        Frame::custom(id.into(), FrameSize::S20x20, Rect::default()).key()
    }

    #[test]
    fn library_dedups_in_order() {
        let mut lib = ImageLibrary::default();
        assert!(lib.add(&"a.jpg".into()));
        assert!(lib.add(&"b.jpg".into()));
        assert!(!lib.add(&"a.jpg".into()));
        let urls: Vec<&str> = lib.images().iter().map(ImageRef::as_str).collect();
        assert_eq!(urls, ["a.jpg", "b.jpg"]);
        lib.clear();
        assert!(lib.is_empty());
    }

    #[test]
    fn snapshots_are_isolated() {
        let mut a = Assignments::default();
        a.assign(key("f1"), "x.jpg".into());
        let before = a.clone();
        a.assign(key("f2"), "y.jpg".into());
        assert_eq!(before.len(), 1);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn swap_moves_empty_side() {
        let mut a = Assignments::default();
        a.assign(key("f1"), "x.jpg".into());
        a.swap(&key("f1"), &key("f2"));
        assert!(!a.is_filled(&key("f1")));
        assert_eq!(a.get(&key("f2")).map(ImageRef::as_str), Some("x.jpg"));
    }

    #[test]
    fn remove_missing_is_none() {
        let mut a = Assignments::default();
        assert!(a.remove(&key("nope")).is_none());
    }
}
