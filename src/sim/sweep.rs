//! Comparing policies across traces and memory sizes.

use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

use log::info;

use crate::common::config::DEFAULT_SWEEP_FRAMES;
use crate::common::{Access, Result};
use crate::mmu::{Algorithm, Mmu, Policy};
use crate::sim::report::{simulate, SimulationReport};
use crate::trace::load_trace;

/// A parsed trace, replayed once per sweep combination.
#[derive(Debug, Clone)]
pub struct TraceInput {
    /// Label used in results (the file name for traces loaded from disk).
    pub name: String,
    pub accesses: Vec<Access>,
}

impl TraceInput {
    pub fn new(name: impl Into<String>, accesses: Vec<Access>) -> Self {
        Self {
            name: name.into(),
            accesses,
        }
    }

    /// Load a trace file, naming it after the file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(name, load_trace(path)?))
    }
}

/// One (trace, algorithm, frames) result.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRow {
    pub trace: String,
    pub algorithm: Algorithm,
    pub report: SimulationReport,
}

/// The set of combinations to run.
///
/// # Example
/// ```
/// use vmsim::sim::{Sweep, TraceInput};
/// use vmsim::{Access, Algorithm, PageId};
///
/// let trace = TraceInput::new("tiny", vec![Access::read(PageId::new(1)); 3]);
/// let rows = Sweep::new()
///     .frames(vec![1, 2])
///     .algorithms(vec![Algorithm::Lru])
///     .run(&[trace])
///     .unwrap();
///
/// assert_eq!(rows.len(), 2);
/// assert!(rows.iter().all(|r| r.report.page_faults == 1));
/// ```
#[derive(Debug, Clone)]
pub struct Sweep {
    frames: Vec<usize>,
    algorithms: Vec<Algorithm>,
    seed: Option<u64>,
}

impl Sweep {
    /// All algorithms over [`DEFAULT_SWEEP_FRAMES`].
    pub fn new() -> Self {
        Self {
            frames: DEFAULT_SWEEP_FRAMES.to_vec(),
            algorithms: Algorithm::ALL.to_vec(),
            seed: None,
        }
    }

    pub fn frames(mut self, frames: Vec<usize>) -> Self {
        self.frames = frames;
        self
    }

    pub fn algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.algorithms = algorithms;
        self
    }

    /// Seed for the random policy; every random run reuses it.
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Run every combination, trace-major then algorithm then frames.
    ///
    /// # Errors
    /// - `Error::ZeroFrames` if any frame count is 0
    pub fn run(&self, traces: &[TraceInput]) -> Result<Vec<SweepRow>> {
        let mut rows = Vec::with_capacity(traces.len() * self.algorithms.len() * self.frames.len());

        for trace in traces {
            for &algorithm in &self.algorithms {
                for &frames in &self.frames {
                    let mut mmu = Mmu::new(frames, Policy::new(algorithm, frames, self.seed))?;
                    let report = simulate(&mut mmu, trace.accesses.iter().copied().map(Ok))?;

                    info!(
                        "{} {} frames={}: faults={} reads={} writes={}",
                        trace.name,
                        algorithm,
                        frames,
                        report.page_faults,
                        report.disk_reads,
                        report.disk_writes
                    );

                    rows.push(SweepRow {
                        trace: trace.name.clone(),
                        algorithm,
                        report,
                    });
                }
            }
        }

        Ok(rows)
    }
}

impl Default for Sweep {
    fn default() -> Self {
        Self::new()
    }
}

/// Write rows as CSV, header first.
pub fn write_csv<W: Write>(mut out: W, rows: &[SweepRow]) -> Result<()> {
    writeln!(
        out,
        "trace,algorithm,frames,events,page_fault_rate,page_faults,disk_reads,disk_writes"
    )?;
    for row in rows {
        let r = &row.report;
        writeln!(
            out,
            "{},{},{},{},{:.6},{},{},{}",
            csv_field(&row.trace),
            row.algorithm,
            r.frames,
            r.events,
            r.fault_rate(),
            r.page_faults,
            r.disk_reads,
            r.disk_writes
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Quote a field if it holds a delimiter, quote or line break (RFC 4180).
fn csv_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Write rows as an aligned text table.
pub fn write_table<W: Write>(mut out: W, rows: &[SweepRow]) -> Result<()> {
    writeln!(
        out,
        "{:<16} {:<6} {:>7} {:>10} {:>10} {:>10} {:>10}",
        "trace", "alg", "frames", "events", "fault_rate", "reads", "writes"
    )?;
    for row in rows {
        let r = &row.report;
        writeln!(
            out,
            "{:<16} {:<6} {:>7} {:>10} {:>10.6} {:>10} {:>10}",
            row.trace,
            row.algorithm.as_str(),
            r.frames,
            r.events,
            r.fault_rate(),
            r.disk_reads,
            r.disk_writes
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Error, PageId};

    fn looping_trace(pages: u64, rounds: usize) -> TraceInput {
        let accesses = (0..rounds)
            .flat_map(|_| (0..pages).map(|p| Access::write(PageId::new(p))))
            .collect();
        TraceInput::new("loop", accesses)
    }

    #[test]
    fn test_sweep_runs_every_combination_in_order() {
        let rows = Sweep::new()
            .frames(vec![2, 4])
            .seed(Some(3))
            .run(&[looping_trace(3, 4)])
            .unwrap();

        assert_eq!(rows.len(), 6);
        let combos: Vec<_> = rows
            .iter()
            .map(|r| (r.algorithm, r.report.frames))
            .collect();
        assert_eq!(
            combos,
            vec![
                (Algorithm::Random, 2),
                (Algorithm::Random, 4),
                (Algorithm::Lru, 2),
                (Algorithm::Lru, 4),
                (Algorithm::Clock, 2),
                (Algorithm::Clock, 4),
            ]
        );
    }

    #[test]
    fn test_sweep_uses_fresh_engines() {
        let rows = Sweep::new()
            .frames(vec![4])
            .algorithms(vec![Algorithm::Lru, Algorithm::Clock])
            .run(&[looping_trace(3, 4), looping_trace(3, 4)])
            .unwrap();

        // Everything fits: only compulsory faults, in every run.
        for row in &rows {
            assert_eq!(row.report.events, 12);
            assert_eq!(row.report.page_faults, 3);
            assert_eq!(row.report.disk_writes, 0);
        }
    }

    #[test]
    fn test_sweep_lru_thrashes_on_loop() {
        let rows = Sweep::new()
            .frames(vec![2])
            .algorithms(vec![Algorithm::Lru])
            .run(&[looping_trace(3, 4)])
            .unwrap();

        let r = &rows[0].report;
        assert_eq!(r.page_faults, 12);
        assert_eq!(r.disk_writes, 10);
    }

    #[test]
    fn test_sweep_rejects_zero_frames() {
        let result = Sweep::new().frames(vec![0]).run(&[looping_trace(1, 1)]);
        assert!(matches!(result, Err(Error::ZeroFrames)));
    }

    #[test]
    fn test_write_csv() {
        let rows = Sweep::new()
            .frames(vec![2])
            .algorithms(vec![Algorithm::Clock])
            .run(&[looping_trace(2, 2)])
            .unwrap();

        let mut buf = Vec::new();
        write_csv(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "trace,algorithm,frames,events,page_fault_rate,page_faults,disk_reads,disk_writes"
        );
        assert_eq!(lines[1], "loop,clock,2,4,0.500000,2,2,0");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("gcc.trace"), "gcc.trace");
        assert_eq!(csv_field("a,b.trace"), "\"a,b.trace\"");
        assert_eq!(csv_field("say \"hi\".trace"), "\"say \"\"hi\"\".trace\"");
    }

    #[test]
    fn test_write_csv_quotes_trace_name() {
        let trace = TraceInput::new("odd,\"name\".trace", vec![Access::read(PageId::new(1))]);
        let rows = Sweep::new()
            .frames(vec![1])
            .algorithms(vec![Algorithm::Lru])
            .run(&[trace])
            .unwrap();

        let mut buf = Vec::new();
        write_csv(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            text.lines().nth(1).unwrap(),
            "\"odd,\"\"name\"\".trace\",lru,1,1,1.000000,1,1,0"
        );
    }

    #[test]
    fn test_write_table_has_row_per_result() {
        let rows = Sweep::new()
            .frames(vec![1, 2])
            .algorithms(vec![Algorithm::Lru])
            .run(&[looping_trace(2, 1)])
            .unwrap();

        let mut buf = Vec::new();
        write_table(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().nth(1).unwrap().starts_with("loop"));
    }
}
