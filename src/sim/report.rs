//! Single-run simulation and its summary.

use std::fmt;

use crate::common::{Access, Result};
use crate::mmu::{Mmu, Replacer};

/// Counters gathered after replaying a trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationReport {
    pub frames: usize,
    /// Accesses fed to the engine.
    pub events: u64,
    pub disk_reads: u64,
    pub disk_writes: u64,
    pub page_faults: u64,
}

impl SimulationReport {
    /// Read the counters out of an engine that has seen `events` accesses.
    pub fn from_mmu<R: Replacer>(mmu: &Mmu<R>, events: u64) -> Self {
        Self {
            frames: mmu.capacity(),
            events,
            disk_reads: mmu.get_total_disk_reads(),
            disk_writes: mmu.get_total_disk_writes(),
            page_faults: mmu.get_total_page_faults(),
        }
    }

    /// Page faults per trace event; 0.0 for an empty trace.
    pub fn fault_rate(&self) -> f64 {
        if self.events == 0 {
            0.0
        } else {
            self.page_faults as f64 / self.events as f64
        }
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "total memory frames:  {}", self.frames)?;
        writeln!(f, "events in trace:      {}", self.events)?;
        writeln!(f, "total disk reads:     {}", self.disk_reads)?;
        writeln!(f, "total disk writes:    {}", self.disk_writes)?;
        write!(f, "page fault rate:      {:.4}", self.fault_rate())
    }
}

/// Feed every access to `mmu` in order.
///
/// The first parse error stops the run before the bad access is applied;
/// accesses already applied stay applied.
pub fn simulate<R, I>(mmu: &mut Mmu<R>, accesses: I) -> Result<SimulationReport>
where
    R: Replacer,
    I: IntoIterator<Item = Result<Access>>,
{
    let mut events = 0u64;
    for access in accesses {
        mmu.access(access?);
        events += 1;
    }

    Ok(SimulationReport::from_mmu(mmu, events))
}
