//! Configuration constants for vmsim.

/// Size of a simulated page in bytes (4KB).
///
/// Trace addresses are mapped to pages by dropping the low
/// [`PAGE_OFFSET_BITS`] bits.
pub const PAGE_SIZE: usize = 4096;

/// Number of address bits that select a byte within a page.
pub const PAGE_OFFSET_BITS: u32 = PAGE_SIZE.trailing_zeros();

/// Frame counts exercised by a sweep when none are given.
pub const DEFAULT_SWEEP_FRAMES: [usize; 7] = [2, 4, 8, 16, 32, 64, 128];

/// Where a sweep writes its CSV results by default.
pub const DEFAULT_CSV_PATH: &str = "vm_results.csv";
