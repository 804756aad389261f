//! Common types and utilities shared across vmsim.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants
//! - Error types
//! - Identifiers (PageId, FrameId)
//! - Memory accesses as they appear in a trace

mod access;
pub mod config;
pub mod error;
mod frame_id;
mod page_id;

pub use access::{Access, AccessKind};
pub use error::{Error, Result};
pub use frame_id::FrameId;
pub use page_id::PageId;
