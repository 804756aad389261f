//! Random replacement policy.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::FrameId;
use crate::mmu::frame::FrameStore;
use crate::mmu::replacer::Replacer;

/// Evicts a frame chosen uniformly at random.
///
/// Keeps no ordering state: once the store is full every frame is occupied,
/// so a uniform pick over all frame indices is a uniform pick over resident
/// pages.
#[derive(Debug)]
pub struct RandomReplacer {
    rng: StdRng,
}

impl RandomReplacer {
    /// Create a replacer seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a replacer with a fixed seed for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomReplacer {
    fn default() -> Self {
        Self::new()
    }
}

impl Replacer for RandomReplacer {
    fn victim(&mut self, frames: &mut FrameStore) -> FrameId {
        FrameId::new(self.rng.gen_range(0..frames.capacity()))
    }

    fn name(&self) -> &'static str {
        "rand"
    }
}
