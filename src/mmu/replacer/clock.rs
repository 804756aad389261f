//! CLOCK (second chance) replacement policy.

use crate::common::FrameId;
use crate::mmu::frame::FrameStore;
use crate::mmu::replacer::Replacer;

/// Evicts with a hand that circles the frames, sparing referenced ones once.
///
/// Reference bits live on the frames themselves: the access path sets them
/// on every load and hit, and the hand clears them as it sweeps. The hand
/// only moves during victim selection.
#[derive(Debug)]
pub struct ClockReplacer {
    hand: usize,
    capacity: usize,
    /// Total hand movements since construction.
    advances: u64,
}

impl ClockReplacer {
    /// Create a replacer for `capacity` frames with the hand at frame 0.
    pub fn new(capacity: usize) -> Self {
        Self {
            hand: 0,
            capacity,
            advances: 0,
        }
    }

    /// The frame the hand will inspect next.
    pub fn hand(&self) -> FrameId {
        FrameId::new(self.hand)
    }

    /// How many times the hand has moved.
    pub fn advances(&self) -> u64 {
        self.advances
    }

    fn advance(&mut self) {
        self.hand = (self.hand + 1) % self.capacity;
        self.advances += 1;
    }
}

impl Replacer for ClockReplacer {
    fn victim(&mut self, frames: &mut FrameStore) -> FrameId {
        // Nothing sets a bit mid-sweep, so this ends within two revolutions.
        loop {
            let frame = frames.get_mut(FrameId::new(self.hand));
            if frame.is_referenced() {
                frame.set_referenced(false);
                self.advance();
            } else {
                let victim = FrameId::new(self.hand);
                self.advance();
                return victim;
            }
        }
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.capacity)
    }

    fn name(&self) -> &'static str {
        "clock"
    }
}
