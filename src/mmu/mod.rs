//! Simulated memory management.
//!
//! The MMU sits between a stream of page references and a fixed pool of
//! physical frames. It classifies each access as a hit or a fault and, when
//! the frames are full, asks a replacement policy for a victim.
//!
//! # Components
//! - [`Mmu`] - The shared access path and counters
//! - [`Frame`] / [`FrameStore`] - Physical slots and their metadata
//! - [`MmuStats`] / [`StatsSnapshot`] - Counters
//! - [`AccessObserver`] - Debug trace sink
//! - [`replacer`] - Eviction policy implementations

mod frame;
mod manager;
mod observer;
pub mod replacer;
mod stats;

pub use frame::{Frame, FrameStore};
pub use manager::Mmu;
pub use observer::{AccessEvent, AccessObserver, LogObserver, NoopObserver, RecordingObserver};
pub use replacer::{Algorithm, Policy, Replacer};
pub use stats::{MmuStats, StatsSnapshot};
