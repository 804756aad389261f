//! Page replacement policy implementations (replacers).
//!
//! Every policy plugs into the shared access path in [`Mmu`](crate::mmu::Mmu)
//! through the [`Replacer`] trait. Only victim selection is mandatory; the
//! notification hooks default to no-ops for policies that keep no ordering.
//!
//! Currently implements:
//! - [`RandomReplacer`] - uniform random victim
//! - [`LruReplacer`] - least recently used
//! - [`ClockReplacer`] - second chance with a circulating hand
//!
//! [`Policy`] closes the set so an engine can be chosen at runtime from an
//! [`Algorithm`].

mod clock;
mod lru;
mod random;

use std::fmt;
use std::str::FromStr;

use crate::common::{Error, FrameId};
use crate::mmu::frame::FrameStore;

pub use clock::ClockReplacer;
pub use lru::LruReplacer;
pub use random::RandomReplacer;

/// A page replacement policy.
pub trait Replacer {
    /// A page was loaded into `frame_id`.
    fn record_load(&mut self, _frame_id: FrameId) {}

    /// The page resident in `frame_id` was hit.
    fn record_access(&mut self, _frame_id: FrameId) {}

    /// Choose the frame whose occupant will be evicted.
    ///
    /// Only called when every frame in `frames` is occupied. The policy may
    /// update per-frame metadata (e.g. clear reference bits) but must not
    /// change occupants.
    fn victim(&mut self, frames: &mut FrameStore) -> FrameId;

    /// Number of frames the policy was sized for, or None if it works over
    /// any store.
    fn capacity(&self) -> Option<usize> {
        None
    }

    /// Short policy name for logs and reports.
    fn name(&self) -> &'static str;
}

/// Names a replacement algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Random,
    Lru,
    Clock,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Random, Algorithm::Lru, Algorithm::Clock];

    /// The name used on the command line and in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Random => "rand",
            Algorithm::Lru => "lru",
            Algorithm::Clock => "clock",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rand" | "random" => Ok(Algorithm::Random),
            "lru" => Ok(Algorithm::Lru),
            "clock" => Ok(Algorithm::Clock),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// The closed set of policies, dispatched statically.
#[derive(Debug)]
pub enum Policy {
    Random(RandomReplacer),
    Lru(LruReplacer),
    Clock(ClockReplacer),
}

impl Policy {
    /// Build the policy for `algorithm` over `capacity` frames.
    ///
    /// `seed` only affects [`Algorithm::Random`]; `None` seeds from entropy.
    pub fn new(algorithm: Algorithm, capacity: usize, seed: Option<u64>) -> Self {
        match algorithm {
            Algorithm::Random => Policy::Random(match seed {
                Some(seed) => RandomReplacer::with_seed(seed),
                None => RandomReplacer::new(),
            }),
            Algorithm::Lru => Policy::Lru(LruReplacer::new(capacity)),
            Algorithm::Clock => Policy::Clock(ClockReplacer::new(capacity)),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Policy::Random(_) => Algorithm::Random,
            Policy::Lru(_) => Algorithm::Lru,
            Policy::Clock(_) => Algorithm::Clock,
        }
    }
}

impl Replacer for Policy {
    fn record_load(&mut self, frame_id: FrameId) {
        match self {
            Policy::Random(r) => r.record_load(frame_id),
            Policy::Lru(r) => r.record_load(frame_id),
            Policy::Clock(r) => r.record_load(frame_id),
        }
    }

    fn record_access(&mut self, frame_id: FrameId) {
        match self {
            Policy::Random(r) => r.record_access(frame_id),
            Policy::Lru(r) => r.record_access(frame_id),
            Policy::Clock(r) => r.record_access(frame_id),
        }
    }

    fn victim(&mut self, frames: &mut FrameStore) -> FrameId {
        match self {
            Policy::Random(r) => r.victim(frames),
            Policy::Lru(r) => r.victim(frames),
            Policy::Clock(r) => r.victim(frames),
        }
    }

    fn capacity(&self) -> Option<usize> {
        match self {
            Policy::Random(r) => r.capacity(),
            Policy::Lru(r) => r.capacity(),
            Policy::Clock(r) => r.capacity(),
        }
    }

    fn name(&self) -> &'static str {
        self.algorithm().as_str()
    }
}
