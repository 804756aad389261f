//! The simulated memory management unit.
//!
//! [`Mmu`] owns the frame store, the resident page table, the counters and
//! one replacement policy. Hit/fault classification, dirty tracking and
//! write-back accounting are written once here; policies only pick victims.

use std::collections::HashMap;

use crate::common::{Access, AccessKind, Error, FrameId, PageId, Result};
use crate::mmu::frame::FrameStore;
use crate::mmu::observer::{AccessEvent, AccessObserver, NoopObserver};
use crate::mmu::replacer::{Algorithm, Policy, Replacer};
use crate::mmu::stats::{MmuStats, StatsSnapshot};

/// A fixed number of physical frames managed by replacement policy `R`.
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────────────────────┐
/// │                          Mmu<R>                              │
/// │  ┌──────────────┐  ┌────────────────────────────────────┐   │
/// │  │ page_table   │  │     frames: FrameStore             │   │
/// │  │PageId → Fid  │─▶│  [Frame0] [Frame1] [Frame2] ...    │   │
/// │  └──────────────┘  └────────────────────────────────────┘   │
/// │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐       │
/// │  │   replacer   │  │    stats     │  │   observer   │       │
/// │  │      R       │  │   MmuStats   │  │ (debug only) │       │
/// │  └──────────────┘  └──────────────┘  └──────────────┘       │
/// └──────────────────────────────────────────────────────────────┘
/// ```
///
/// # Usage
/// ```
/// use vmsim::{Algorithm, Mmu, PageId};
///
/// let mut mmu = Mmu::with_algorithm(Algorithm::Lru, 2)?;
/// mmu.write_memory(PageId::new(1));
/// mmu.read_memory(PageId::new(2));
/// mmu.read_memory(PageId::new(3)); // evicts dirty page 1
///
/// assert_eq!(mmu.get_total_page_faults(), 3);
/// assert_eq!(mmu.get_total_disk_writes(), 1);
/// # Ok::<(), vmsim::Error>(())
/// ```
pub struct Mmu<R: Replacer = Policy> {
    frames: FrameStore,

    /// Resident pages and the frame holding each.
    page_table: HashMap<PageId, FrameId>,

    replacer: R,

    stats: MmuStats,

    /// Trace points are delivered to `observer` only while set.
    debug: bool,

    observer: Box<dyn AccessObserver>,
}

impl Mmu<Policy> {
    /// Create an engine running `algorithm` over `frames` frames.
    ///
    /// # Errors
    /// - `Error::ZeroFrames` if `frames` is 0
    pub fn with_algorithm(algorithm: Algorithm, frames: usize) -> Result<Self> {
        Self::new(frames, Policy::new(algorithm, frames, None))
    }

    /// Like [`with_algorithm`](Self::with_algorithm), with a fixed seed for
    /// the random policy.
    pub fn with_seed(algorithm: Algorithm, frames: usize, seed: u64) -> Result<Self> {
        Self::new(frames, Policy::new(algorithm, frames, Some(seed)))
    }

    pub fn algorithm(&self) -> Algorithm {
        self.replacer.algorithm()
    }
}

impl<R: Replacer> Mmu<R> {
    /// Create an engine with `frames` free frames and the given policy.
    ///
    /// # Errors
    /// - `Error::ZeroFrames` if `frames` is 0
    /// - `Error::CapacityMismatch` if `replacer` was sized for another count
    pub fn new(frames: usize, replacer: R) -> Result<Self> {
        if frames == 0 {
            return Err(Error::ZeroFrames);
        }
        if let Some(sized_for) = replacer.capacity() {
            if sized_for != frames {
                return Err(Error::CapacityMismatch {
                    frames,
                    replacer: sized_for,
                });
            }
        }

        Ok(Self {
            frames: FrameStore::new(frames),
            page_table: HashMap::with_capacity(frames),
            replacer,
            stats: MmuStats::new(),
            debug: false,
            observer: Box::new(NoopObserver),
        })
    }

    /// Replace the trace sink.
    pub fn with_observer(mut self, observer: Box<dyn AccessObserver>) -> Self {
        self.observer = observer;
        self
    }

    // ========================================================================
    // Public API: Accesses
    // ========================================================================

    /// Read from `page`.
    pub fn read_memory(&mut self, page: PageId) {
        self.access(Access::read(page));
    }

    /// Write to `page`, leaving it dirty.
    pub fn write_memory(&mut self, page: PageId) {
        self.access(Access::write(page));
    }

    /// Apply one access.
    pub fn access(&mut self, access: Access) {
        let Access { kind, page } = access;

        match self.page_table.get(&page) {
            Some(&frame_id) => self.handle_hit(kind, page, frame_id),
            None => self.handle_fault(kind, page),
        }
    }

    // ========================================================================
    // Public API: Counters
    // ========================================================================

    pub fn get_total_disk_reads(&self) -> u64 {
        self.stats.disk_reads()
    }

    pub fn get_total_disk_writes(&self) -> u64 {
        self.stats.disk_writes()
    }

    pub fn get_total_page_faults(&self) -> u64 {
        self.stats.page_faults()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    // ========================================================================
    // Public API: Debug toggle
    // ========================================================================

    /// Start reporting trace points to the observer.
    pub fn set_debug(&mut self) {
        self.debug = true;
    }

    /// Stop reporting trace points.
    pub fn reset_debug(&mut self) {
        self.debug = false;
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    // ========================================================================
    // Public API: Inspection
    // ========================================================================

    /// Number of frames.
    pub fn capacity(&self) -> usize {
        self.frames.capacity()
    }

    /// Number of resident pages.
    pub fn resident_count(&self) -> usize {
        self.page_table.len()
    }

    pub fn is_resident(&self, page: PageId) -> bool {
        self.page_table.contains_key(&page)
    }

    /// The frame holding `page`, if resident.
    pub fn frame_of(&self, page: PageId) -> Option<FrameId> {
        self.page_table.get(&page).copied()
    }

    /// Dirty flag of `page`, or None if not resident.
    pub fn is_dirty(&self, page: PageId) -> Option<bool> {
        self.frame_of(page)
            .map(|frame_id| self.frames.get(frame_id).is_dirty())
    }

    /// Resident pages in frame order.
    pub fn resident_pages(&self) -> Vec<PageId> {
        self.frames.iter().filter_map(|(_, f)| f.page_id()).collect()
    }

    pub fn frames(&self) -> &FrameStore {
        &self.frames
    }

    pub fn replacer(&self) -> &R {
        &self.replacer
    }

    // ========================================================================
    // Internal: Hit and fault handling
    // ========================================================================

    fn handle_hit(&mut self, kind: AccessKind, page: PageId, frame_id: FrameId) {
        let frame = self.frames.get_mut(frame_id);
        frame.set_referenced(true);
        if kind.dirties() {
            frame.mark_dirty();
        }

        self.replacer.record_access(frame_id);
        self.stats.record_hit();

        self.emit(AccessEvent::Hit {
            kind,
            page,
            frame: frame_id,
        });
    }

    fn handle_fault(&mut self, kind: AccessKind, page: PageId) {
        self.stats.record_fault();
        self.emit(AccessEvent::Fault { kind, page });

        let frame_id = match self.frames.take_free() {
            Some(frame_id) => frame_id,
            None => self.evict(),
        };

        let dirty = kind.dirties();
        self.frames.get_mut(frame_id).load(page, dirty);
        self.page_table.insert(page, frame_id);
        self.replacer.record_load(frame_id);

        self.emit(AccessEvent::Load {
            page,
            frame: frame_id,
            dirty,
        });
    }

    /// Evict the policy's victim and return its now-empty frame.
    fn evict(&mut self) -> FrameId {
        let frame_id = self.replacer.victim(&mut self.frames);

        if let Some((old_page, dirty)) = self.frames.get_mut(frame_id).evict() {
            self.page_table.remove(&old_page);
            self.stats.record_eviction(dirty);

            self.emit(AccessEvent::Evict {
                page: old_page,
                frame: frame_id,
                dirty,
            });
            if dirty {
                self.emit(AccessEvent::WriteBack {
                    page: old_page,
                    frame: frame_id,
                });
            }
        }

        frame_id
    }

    #[inline]
    fn emit(&mut self, event: AccessEvent) {
        if self.debug {
            self.observer.observe(&event);
        }
    }
}
