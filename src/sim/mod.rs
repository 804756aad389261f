//! Driving engines with traces and reporting the results.
//!
//! - [`simulate`] / [`SimulationReport`] - One trace through one engine
//! - [`Sweep`] / [`SweepRow`] - Every trace × algorithm × frame-count combination

mod report;
mod sweep;

pub use report::{simulate, SimulationReport};
pub use sweep::{write_csv, write_table, Sweep, SweepRow, TraceInput};
