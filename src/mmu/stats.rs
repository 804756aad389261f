//! Simulated memory statistics tracking.

use std::fmt;

/// Counters accumulated by an [`Mmu`](crate::mmu::Mmu).
///
/// The counters only ever grow. They start at zero when the engine is
/// constructed and there is deliberately no way to reset them.
///
/// # Example
/// ```
/// use vmsim::{Algorithm, Mmu, PageId};
///
/// let mut mmu = Mmu::with_algorithm(Algorithm::Lru, 4).unwrap();
/// mmu.read_memory(PageId::new(1));
/// mmu.read_memory(PageId::new(1));
///
/// let stats = mmu.stats();
/// assert_eq!(stats.page_faults, 1);
/// assert_eq!(stats.hits, 1);
/// ```
#[derive(Debug, Default)]
pub struct MmuStats {
    accesses: u64,
    hits: u64,
    page_faults: u64,
    evictions: u64,
    disk_reads: u64,
    disk_writes: u64,
}

impl MmuStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record_hit(&mut self) {
        self.accesses += 1;
        self.hits += 1;
    }

    /// A fault always reads the missing page in from disk.
    #[inline]
    pub(crate) fn record_fault(&mut self) {
        self.accesses += 1;
        self.page_faults += 1;
        self.disk_reads += 1;
    }

    #[inline]
    pub(crate) fn record_eviction(&mut self, dirty: bool) {
        self.evictions += 1;
        if dirty {
            self.disk_writes += 1;
        }
    }

    pub fn disk_reads(&self) -> u64 {
        self.disk_reads
    }

    pub fn disk_writes(&self) -> u64 {
        self.disk_writes
    }

    pub fn page_faults(&self) -> u64 {
        self.page_faults
    }

    /// Get a snapshot of current statistics.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            accesses: self.accesses,
            hits: self.hits,
            page_faults: self.page_faults,
            evictions: self.evictions,
            disk_reads: self.disk_reads,
            disk_writes: self.disk_writes,
        }
    }
}

/// A point-in-time copy of the simulator counters.
///
/// Mutating a snapshot never affects the engine it was taken from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub accesses: u64,
    pub hits: u64,
    pub page_faults: u64,
    pub evictions: u64,
    pub disk_reads: u64,
    pub disk_writes: u64,
}

impl StatsSnapshot {
    /// Page faults per access (0.0 to 1.0).
    pub fn fault_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.page_faults as f64 / self.accesses as f64
        }
    }

    /// Hits per access (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.accesses as f64
        }
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ faults: {}, reads: {}, writes: {}, evictions: {}, fault_rate: {:.2}% }}",
            self.page_faults,
            self.disk_reads,
            self.disk_writes,
            self.evictions,
            self.fault_rate() * 100.0
        )
    }
}
