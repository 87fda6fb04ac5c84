//! File actions module.
//!
//! This module provides what happens to a duplicate once it has been found:
//! - Report only (default)
//! - Replace with a hard link to the canonical copy
//! - Replace with a hard link, keeping the duplicate as `<name>.dedup`
//!
//! ```no_run
//! use dupelink::actions::{apply, LinkMode};
//! use std::path::Path;
//!
//! let mode = LinkMode::from_flags(true, true);
//! let result = apply(mode, Path::new("b.txt"), Path::new("a.txt"));
//! ```

pub mod link;

// Re-export commonly used types
pub use link::{apply, backup_path, LinkError, LinkMode, LinkOutcome, BACKUP_SUFFIX};
