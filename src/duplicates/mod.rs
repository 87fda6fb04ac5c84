//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - The first-seen fingerprint index ([`index`])
//! - The sequential run over all roots ([`finder`])

pub mod finder;
pub mod index;

pub use finder::{DuplicateFinder, FinderError, RunStats};
pub use index::{DuplicateIndex, FileRecord, Verdict};
