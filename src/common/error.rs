//! Error types for vmsim.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in vmsim.
///
/// The replacement engines themselves never fail once constructed; every
/// other variant comes from the trace-driving layer.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while reading a trace or writing results.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An engine was configured with no frames.
    #[error("frame count must be at least 1")]
    ZeroFrames,

    /// The replacement policy was sized for a different number of frames.
    #[error("replacer sized for {replacer} frames but memory has {frames}")]
    CapacityMismatch { frames: usize, replacer: usize },

    /// A trace line could not be parsed.
    #[error("malformed trace line {line}: {reason}")]
    MalformedTrace { line: usize, reason: String },

    /// A trace line named an operation other than read or write.
    #[error("unknown access kind {kind:?} on trace line {line}")]
    UnknownAccessKind { line: usize, kind: String },

    /// The requested replacement algorithm does not exist.
    #[error("unknown replacement algorithm {0:?} (expected rand, lru or clock)")]
    UnknownAlgorithm(String),
}
