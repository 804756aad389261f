//! Trace layer - turning trace text into accesses.
//!
//! This module handles the on-disk trace format:
//! - [`TraceReader`] - Line-by-line parser over any `BufRead`
//! - [`load_trace`] - Read a whole trace file into memory

mod reader;

pub use reader::{load_trace, parse_line, TraceReader};
