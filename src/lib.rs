//! vmsim - A trace-driven virtual memory simulator with swappable page
//! replacement policies.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                             vmsim                               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Driver (sim/, bin/memsim)                   │   │
//! │  │        single run report  |  trace × frames × alg sweep  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Trace Layer (trace/)                        │   │
//! │  │          "<hex address> <R|W>" lines → Access            │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              MMU (mmu/)  [Runtime Swappable]            │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │     Replacement Policies: RAND | LRU | CLOCK    │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  │         Mmu + FrameStore + Statistics + Observer         │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, FrameId, Access, Error, config)
//! - [`mmu`] - Frames, the access path and replacement policies
//! - [`trace`] - Trace file parsing
//! - [`sim`] - Running traces and sweeps, reporting results
//!
//! # Quick Start
//! ```
//! use vmsim::{Algorithm, Mmu, PageId};
//!
//! let mut mmu = Mmu::with_algorithm(Algorithm::Clock, 3).unwrap();
//! for page in [1, 2, 3, 1, 4] {
//!     mmu.read_memory(PageId::new(page));
//! }
//! assert_eq!(mmu.get_total_page_faults(), 4);
//! ```

pub mod common;
pub mod mmu;
pub mod sim;
pub mod trace;

// Re-export commonly used items at crate root for convenience
pub use common::config::PAGE_SIZE;
pub use common::{Access, AccessKind, Error, FrameId, PageId, Result};

pub use mmu::{Algorithm, Mmu, Policy, Replacer, StatsSnapshot};
pub use sim::{SimulationReport, Sweep, SweepRow};
pub use trace::TraceReader;
