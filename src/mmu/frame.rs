//! Frame - a physical slot of simulated memory.
//!
//! A [`Frame`] holds the metadata the simulator needs for one slot:
//! - Which page is resident (if any)
//! - Dirty flag for write-back tracking
//! - Reference bit for second-chance (clock) replacement
//!
//! [`FrameStore`] owns the fixed array of frames plus the list of frames
//! that have never been filled.

use crate::common::{FrameId, PageId};

/// A frame of simulated physical memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Which page currently occupies the frame, or None if free.
    page_id: Option<PageId>,

    /// Whether the page has been written since it was loaded.
    is_dirty: bool,

    /// Second-chance bit: set on load and on every hit.
    referenced: bool,
}

impl Frame {
    /// Create a new free frame.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Occupant
    // ========================================================================

    /// Get the page id of the resident page.
    #[inline]
    pub fn page_id(&self) -> Option<PageId> {
        self.page_id
    }

    /// Check if the frame is free (no page loaded).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.page_id.is_none()
    }

    /// Install `page_id`, replacing any previous occupant.
    ///
    /// The reference bit is set: a freshly loaded page counts as referenced.
    pub fn load(&mut self, page_id: PageId, dirty: bool) {
        self.page_id = Some(page_id);
        self.is_dirty = dirty;
        self.referenced = true;
    }

    /// Remove the occupant, returning it with the dirty flag it had.
    pub fn evict(&mut self) -> Option<(PageId, bool)> {
        let page_id = self.page_id.take()?;
        let dirty = std::mem::take(&mut self.is_dirty);
        self.referenced = false;
        Some((page_id, dirty))
    }

    // ========================================================================
    // Dirty flag
    // ========================================================================

    /// Mark the frame as dirty (modified).
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.is_dirty = true;
    }

    /// Check if the frame is dirty.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    // ========================================================================
    // Reference bit
    // ========================================================================

    #[inline]
    pub fn is_referenced(&self) -> bool {
        self.referenced
    }

    #[inline]
    pub fn set_referenced(&mut self, referenced: bool) {
        self.referenced = referenced;
    }
}

/// Fixed-capacity array of frames.
///
/// Frames are handed out from the free list in ascending index order and
/// never returned to it: once the store fills up, every later load reuses a
/// frame chosen by the replacement policy.
#[derive(Debug, Clone)]
pub struct FrameStore {
    frames: Vec<Frame>,

    /// Frames never filled, highest index first so `pop` yields the lowest.
    free_list: Vec<FrameId>,
}

impl FrameStore {
    /// Create a store of `capacity` free frames.
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: vec![Frame::new(); capacity],
            free_list: (0..capacity).rev().map(FrameId::new).collect(),
        }
    }

    /// Total number of frames.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.frames.len()
    }

    /// Number of frames holding a page.
    #[inline]
    pub fn occupied(&self) -> usize {
        self.frames.len() - self.free_list.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.free_list.is_empty()
    }

    /// Take the lowest-indexed free frame, if any remain.
    pub fn take_free(&mut self) -> Option<FrameId> {
        self.free_list.pop()
    }

    #[inline]
    pub fn get(&self, frame_id: FrameId) -> &Frame {
        &self.frames[frame_id.0]
    }

    #[inline]
    pub fn get_mut(&mut self, frame_id: FrameId) -> &mut Frame {
        &mut self.frames[frame_id.0]
    }

    /// Iterate over all frames in index order.
    pub fn iter(&self) -> impl Iterator<Item = (FrameId, &Frame)> {
        self.frames
            .iter()
            .enumerate()
            .map(|(i, frame)| (FrameId::new(i), frame))
    }
}
