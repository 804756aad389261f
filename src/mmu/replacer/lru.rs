//! LRU (Least Recently Used) replacement policy.

use crate::common::FrameId;
use crate::mmu::frame::FrameStore;
use crate::mmu::replacer::Replacer;

/// Link slots of one frame in the recency list.
#[derive(Debug, Clone, Copy, Default)]
struct Node {
    prev: Option<usize>,
    next: Option<usize>,
    linked: bool,
}

/// Evicts the frame touched least recently.
///
/// Recency is kept as a doubly-linked list threaded through a `Vec` indexed
/// by frame id, so touch, append and pop are all O(1) and a frame can never
/// appear twice.
///
/// ```text
///   head (LRU)                                   tail (MRU)
///   [Frame 2] <-> [Frame 0] <-> [Frame 3] <-> [Frame 1]
/// ```
///
/// Since each resident page occupies exactly one frame, ordering frames is
/// the same as ordering resident pages.
#[derive(Debug)]
pub struct LruReplacer {
    nodes: Vec<Node>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl LruReplacer {
    /// Create a replacer for `capacity` frames.
    pub fn new(capacity: usize) -> Self {
        Self {
            nodes: vec![Node::default(); capacity],
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of frames in the recency order.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Frames from least to most recently used.
    pub fn order(&self) -> Vec<FrameId> {
        let mut order = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            order.push(FrameId::new(idx));
            cursor = self.nodes[idx].next;
        }
        order
    }

    fn unlink(&mut self, idx: usize) {
        let node = self.nodes[idx];
        if !node.linked {
            return;
        }

        match node.prev {
            Some(prev) => self.nodes[prev].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.nodes[next].prev = node.prev,
            None => self.tail = node.prev,
        }

        self.nodes[idx] = Node::default();
        self.len -= 1;
    }

    fn push_back(&mut self, idx: usize) {
        self.nodes[idx] = Node {
            prev: self.tail,
            next: None,
            linked: true,
        };
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.len += 1;
    }
}

impl Replacer for LruReplacer {
    /// Append at the MRU end.
    fn record_load(&mut self, frame_id: FrameId) {
        self.unlink(frame_id.0);
        self.push_back(frame_id.0);
    }

    /// Move to the MRU end.
    fn record_access(&mut self, frame_id: FrameId) {
        self.unlink(frame_id.0);
        self.push_back(frame_id.0);
    }

    fn victim(&mut self, frames: &mut FrameStore) -> FrameId {
        debug_assert_eq!(self.len, frames.occupied());
        // A full store always has a head; frame 0 is only reachable if the
        // caller broke the "called when full" contract.
        let idx = self.head.unwrap_or(0);
        self.unlink(idx);
        FrameId::new(idx)
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.nodes.len())
    }

    fn name(&self) -> &'static str {
        "lru"
    }
}
