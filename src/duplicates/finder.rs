//! Duplicate finder: the single-pass run over every root.
//!
//! # Overview
//!
//! [`DuplicateFinder::run`] walks each configured root in order and, for
//! every path the walker yields, applies the candidate filters in a fixed
//! order:
//! 1. the entry can be lstat'ed
//! 2. it is not a symlink
//! 3. it is a regular file
//! 4. its size is within the inclusive `[min, max]` range
//! 5. its base name matches the glob
//!
//! Survivors are fingerprinted and offered to the [`DuplicateIndex`]. The
//! listing is written to the caller's writer as files are judged, so output
//! order equals traversal order. Duplicates are then handed to the link
//! action selected by the configuration.
//!
//! Everything is sequential: one file is opened, read, hashed and indexed
//! before the next is looked at.
//!
//! # Example
//!
//! ```no_run
//! use dupelink::config::RunConfig;
//! use dupelink::duplicates::DuplicateFinder;
//! use std::path::PathBuf;
//!
//! let config = RunConfig::new(vec![PathBuf::from(".")]).with_stats(true);
//! let finder = DuplicateFinder::new(config);
//!
//! let stdout = std::io::stdout();
//! let stats = finder.run(&mut stdout.lock()).expect("stdout is writable");
//! println!("{} duplicates", stats.duplicates);
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bytesize::ByteSize;

use crate::actions::{self, LinkOutcome};
use crate::config::RunConfig;
use crate::scanner::{Fingerprinter, Walker};

use super::index::{DuplicateIndex, Verdict};

/// Counters collected over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Number of files judged duplicates
    pub duplicates: u64,
    /// Sum of the canonical file size, once per duplicate
    pub duplicate_bytes: u64,
    /// Files that were fingerprinted and offered to the index
    pub files_fingerprinted: usize,
    /// Files rejected by a filter or that could not be read
    pub files_skipped: usize,
    /// Roots that could not be walked at all
    pub roots_skipped: usize,
    /// Duplicates replaced by a hard link
    pub links_made: usize,
    /// Duplicates whose link action failed
    pub link_failures: usize,
}

impl RunStats {
    /// The aggregate line printed with `-stats`.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "found duplicates {} with total size {} bytes",
            self.duplicates, self.duplicate_bytes
        )
    }

    /// Format the duplicate size as a human-readable string.
    #[must_use]
    pub fn duplicate_size_display(&self) -> String {
        ByteSize::b(self.duplicate_bytes).to_string()
    }

    fn record_duplicate(&mut self, canonical_size: u64) {
        self.duplicates += 1;
        self.duplicate_bytes = self.duplicate_bytes.saturating_add(canonical_size);
    }
}

/// Errors that abort a run.
///
/// Per-file and per-root problems are logged and skipped; only a failure to
/// write the report stops the run.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// Writing the listing or stats line failed.
    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),
}

/// Sequential duplicate finder over the configured roots.
#[derive(Debug, Clone)]
pub struct DuplicateFinder {
    config: RunConfig,
    fingerprinter: Fingerprinter,
}

impl DuplicateFinder {
    /// Create a finder for the given configuration.
    #[must_use]
    pub fn new(config: RunConfig) -> Self {
        let fingerprinter = Fingerprinter::new(config.limit);
        Self {
            config,
            fingerprinter,
        }
    }

    /// Walk every root, report files to `out`, and act on duplicates.
    ///
    /// Each call starts from an empty index.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Output`] if writing to `out` fails. Unreadable
    /// roots and files never cause an error.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<RunStats, FinderError> {
        let mut index = DuplicateIndex::new();
        let mut stats = RunStats::default();

        for root in &self.config.roots {
            self.scan_root(root, &mut index, &mut stats, out)?;
        }

        if self.config.print_stats {
            writeln!(out, "{}", stats.summary_line())?;
        }
        out.flush()?;

        log::info!(
            "Run complete: {} files fingerprinted, {} skipped, {} duplicates ({}), {} links made",
            stats.files_fingerprinted,
            stats.files_skipped,
            stats.duplicates,
            stats.duplicate_size_display(),
            stats.links_made
        );
        if stats.roots_skipped > 0 || stats.link_failures > 0 {
            log::warn!(
                "{} roots skipped, {} link failures",
                stats.roots_skipped,
                stats.link_failures
            );
        }

        Ok(stats)
    }

    fn scan_root<W: Write>(
        &self,
        root: &Path,
        index: &mut DuplicateIndex,
        stats: &mut RunStats,
        out: &mut W,
    ) -> Result<(), FinderError> {
        let walker = Walker::new(root, self.config.max_depth);
        let paths = match walker.walk() {
            Ok(paths) => paths,
            Err(e) => {
                log::warn!("Skipping root {}: {}", root.display(), e);
                stats.roots_skipped += 1;
                return Ok(());
            }
        };

        log::info!("Scanning {}", root.display());
        for path in paths {
            self.process_file(path, index, stats, out)?;
        }
        Ok(())
    }

    fn process_file<W: Write>(
        &self,
        path: PathBuf,
        index: &mut DuplicateIndex,
        stats: &mut RunStats,
        out: &mut W,
    ) -> Result<(), FinderError> {
        let Some(size) = self.candidate_size(&path) else {
            stats.files_skipped += 1;
            return Ok(());
        };

        let key = match self.fingerprinter.fingerprint_file(&path) {
            Ok(key) => key,
            Err(e) => {
                log::debug!("Skipping unreadable file: {}", e);
                stats.files_skipped += 1;
                return Ok(());
            }
        };
        stats.files_fingerprinted += 1;

        match index.consider_duplicate(key, size, path.clone()) {
            Verdict::Duplicate(canonical) => {
                if !self.config.quiet {
                    writeln!(out, "{} == {}", path.display(), canonical.name.display())?;
                }
                stats.record_duplicate(canonical.size);
                self.act_on_duplicate(&path, &canonical.name, stats);
            }
            Verdict::Replaced(evicted) => {
                log::warn!(
                    "Fingerprint of {} ({} bytes) matches {} ({} bytes); sizes differ, keeping the newer file",
                    path.display(),
                    size,
                    evicted.name.display(),
                    evicted.size
                );
                if !self.config.quiet {
                    writeln!(out, "{}", path.display())?;
                }
            }
            Verdict::New => {
                if !self.config.quiet {
                    writeln!(out, "{}", path.display())?;
                }
            }
        }
        Ok(())
    }

    /// Apply the candidate filters, returning the file size if `path` passes.
    fn candidate_size(&self, path: &Path) -> Option<u64> {
        let metadata = match fs::symlink_metadata(path) {
            Ok(metadata) => metadata,
            Err(e) => {
                log::debug!("Cannot stat {}: {}", path.display(), e);
                return None;
            }
        };

        let file_type = metadata.file_type();
        if file_type.is_symlink() {
            log::trace!("Skipping symlink: {}", path.display());
            return None;
        }
        if !file_type.is_file() {
            log::trace!("Skipping non-regular file: {}", path.display());
            return None;
        }

        let size = metadata.len();
        if !self.config.size_in_range(size) {
            log::trace!("Skipping {} ({} bytes): size out of range", path.display(), size);
            return None;
        }
        if !self.config.matches_name(path) {
            log::trace!("Skipping {}: name does not match", path.display());
            return None;
        }

        Some(size)
    }

    fn act_on_duplicate(&self, duplicate: &Path, canonical: &Path, stats: &mut RunStats) {
        match actions::apply(self.config.link_mode, duplicate, canonical) {
            Ok(LinkOutcome::Linked) => stats.links_made += 1,
            Ok(LinkOutcome::LinkedWithBackup { backup }) => {
                log::debug!("Backed up {} to {}", duplicate.display(), backup.display());
                stats.links_made += 1;
            }
            Ok(LinkOutcome::AlreadyLinked | LinkOutcome::Reported) => {}
            Err(e) if e.duplicate_intact() => {
                log::warn!("Link failed, duplicate left in place: {}", e);
                stats.link_failures += 1;
            }
            Err(e) => {
                log::warn!("Link failed after moving the duplicate away: {}", e);
                stats.link_failures += 1;
            }
        }
    }
}
