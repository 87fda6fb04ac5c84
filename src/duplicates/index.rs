//! First-seen index from content fingerprint to canonical file.
//!
//! # Overview
//!
//! The [`DuplicateIndex`] remembers, for every fingerprint observed during a
//! run, the first file that produced it. A later file is judged a duplicate
//! of that canonical file when both the fingerprint and the byte size agree.
//!
//! When the fingerprint matches but the size does not, the stored record is
//! replaced by the newcomer and the newcomer is not a duplicate. With a
//! prefix read limit this happens whenever two files share their first
//! bytes but differ in length.
//!
//! # Example
//!
//! ```
//! use dupelink::duplicates::{DuplicateIndex, FileRecord, Verdict};
//! use dupelink::scanner::Fingerprint;
//! use std::path::PathBuf;
//!
//! let key = Fingerprint::from_bytes([7; 32]);
//! let mut index = DuplicateIndex::new();
//!
//! let first = index.consider_duplicate(key, 5, PathBuf::from("a.txt"));
//! assert_eq!(first, Verdict::New);
//!
//! let second = index.consider_duplicate(key, 5, PathBuf::from("b.txt"));
//! assert_eq!(
//!     second,
//!     Verdict::Duplicate(FileRecord::new(PathBuf::from("a.txt"), 5))
//! );
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::scanner::Fingerprint;

/// The canonical occurrence of a fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path as produced by the walker
    pub name: PathBuf,
    /// Size in bytes at the time it was indexed
    pub size: u64,
}

impl FileRecord {
    /// Create a new file record.
    #[must_use]
    pub fn new(name: PathBuf, size: u64) -> Self {
        Self { name, size }
    }

    /// Path of the recorded file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.name
    }
}

/// Outcome of offering a candidate to the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// First file with this fingerprint; it is now canonical.
    New,
    /// Same fingerprint and size as the contained canonical record.
    Duplicate(FileRecord),
    /// Same fingerprint but a different size. The candidate took over the
    /// entry and the contained record was evicted.
    Replaced(FileRecord),
}

impl Verdict {
    /// Whether the candidate was judged a duplicate.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }

    /// The canonical record, if the candidate is a duplicate.
    #[must_use]
    pub fn canonical(&self) -> Option<&FileRecord> {
        match self {
            Self::Duplicate(record) => Some(record),
            _ => None,
        }
    }
}

/// Mapping from fingerprint to the first file observed with it.
///
/// Exclusively owned by one run; no interior locking.
#[derive(Debug, Default)]
pub struct DuplicateIndex {
    entries: HashMap<Fingerprint, FileRecord>,
}

impl DuplicateIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the record stored for `key`.
    #[must_use]
    pub fn lookup(&self, key: &Fingerprint) -> Option<&FileRecord> {
        self.entries.get(key)
    }

    /// Store `file` under `key`, replacing any previous record.
    ///
    /// Returns the record that was replaced.
    pub fn insert(&mut self, key: Fingerprint, file: FileRecord) -> Option<FileRecord> {
        self.entries.insert(key, file)
    }

    /// Judge `candidate` against the index, recording it when it is not a
    /// duplicate.
    ///
    /// A duplicate leaves the index untouched.
    pub fn consider_duplicate(&mut self, key: Fingerprint, size: u64, candidate: PathBuf) -> Verdict {
        match self.entries.get(&key) {
            Some(existing) if existing.size == size => Verdict::Duplicate(existing.clone()),
            Some(_) => {
                let evicted = self.insert(key, FileRecord::new(candidate, size));
                // get() just returned Some, so insert hands back that record
                evicted.map_or(Verdict::New, Verdict::Replaced)
            }
            None => {
                self.insert(key, FileRecord::new(candidate, size));
                Verdict::New
            }
        }
    }

    /// Number of distinct fingerprints recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
