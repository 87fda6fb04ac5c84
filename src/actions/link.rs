//! Replacing duplicates with hard links.
//!
//! # Overview
//!
//! Once a file is judged a duplicate, [`apply`] optionally collapses it onto
//! its canonical copy:
//! - [`LinkMode::ReportOnly`]: nothing on disk changes
//! - [`LinkMode::HardLink`]: the duplicate is removed, then the canonical file
//!   is hard-linked at the duplicate's path
//! - [`LinkMode::HardLinkWithBackup`]: the duplicate is renamed to
//!   `<name>.dedup` first, then the link is created
//!
//! # Safety
//!
//! The operation is best-effort and not transactional. If removal or the
//! backup rename fails, no link is attempted. If the link itself fails after
//! a removal, the duplicate is gone and only the canonical copy remains; with
//! a backup the renamed file is left in place.
//!
//! Paths that already name the same inode are left alone
//! ([`LinkOutcome::AlreadyLinked`]).
//!
//! # Example
//!
//! ```no_run
//! use dupelink::actions::link::{apply, LinkMode};
//! use std::path::Path;
//!
//! match apply(LinkMode::HardLink, Path::new("copy.iso"), Path::new("orig.iso")) {
//!     Ok(outcome) => println!("{:?}", outcome),
//!     Err(e) => eprintln!("Failed: {}", e),
//! }
//! ```

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::scanner::hardlink::same_file;

/// Suffix appended to the full file name of a backed-up duplicate.
pub const BACKUP_SUFFIX: &str = ".dedup";

/// What to do with a duplicate once it has been found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkMode {
    /// Only report; never touch the filesystem
    #[default]
    ReportOnly,
    /// Remove the duplicate and hard-link the canonical file in its place
    HardLink,
    /// Rename the duplicate to a backup, then hard-link the canonical file
    HardLinkWithBackup,
}

impl LinkMode {
    /// Derive the mode from the `-link` and `-bak` flags.
    ///
    /// `backup` has no effect without `link`.
    #[must_use]
    pub fn from_flags(link: bool, backup: bool) -> Self {
        match (link, backup) {
            (false, _) => Self::ReportOnly,
            (true, false) => Self::HardLink,
            (true, true) => Self::HardLinkWithBackup,
        }
    }

    /// Whether this mode mutates the filesystem.
    #[must_use]
    pub fn is_linking(self) -> bool {
        !matches!(self, Self::ReportOnly)
    }
}

/// Result of a successful [`apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Report-only mode; nothing was changed.
    Reported,
    /// The duplicate was replaced by a hard link.
    Linked,
    /// The duplicate was moved to `backup` and replaced by a hard link.
    LinkedWithBackup {
        /// Where the original duplicate now lives
        backup: PathBuf,
    },
    /// Both paths already refer to the same file.
    AlreadyLinked,
}

/// Error type for link operations.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Removing the duplicate failed; no link was attempted.
    #[error("failed to remove {path}: {source}")]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Renaming the duplicate to its backup name failed; no link was attempted.
    #[error("failed to back up {path} to {backup}: {source}")]
    BackupFailed {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Creating the hard link failed after the duplicate was moved away.
    #[error("failed to link {path} to {canonical}: {source}")]
    LinkFailed {
        canonical: PathBuf,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LinkError {
    /// The duplicate path the failed operation was acting on.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::RemoveFailed { path, .. }
            | Self::BackupFailed { path, .. }
            | Self::LinkFailed { path, .. } => path,
        }
    }

    /// Whether the duplicate's original path was left untouched.
    #[must_use]
    pub fn duplicate_intact(&self) -> bool {
        !matches!(self, Self::LinkFailed { .. })
    }
}

/// Backup location for `path`: the full file name with [`BACKUP_SUFFIX`]
/// appended (`b.txt` becomes `b.txt.dedup`).
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Apply `mode` to `duplicate`, whose canonical copy is `canonical`.
///
/// # Errors
///
/// Returns [`LinkError`] when removal, backup or linking fails. The caller
/// decides whether to continue; nothing is rolled back.
pub fn apply(mode: LinkMode, duplicate: &Path, canonical: &Path) -> Result<LinkOutcome, LinkError> {
    if !mode.is_linking() {
        return Ok(LinkOutcome::Reported);
    }

    if same_file(duplicate, canonical) {
        log::debug!(
            "{} and {} are already the same file",
            duplicate.display(),
            canonical.display()
        );
        return Ok(LinkOutcome::AlreadyLinked);
    }

    let backup = match mode {
        LinkMode::HardLinkWithBackup => {
            let backup = backup_path(duplicate);
            fs::rename(duplicate, &backup).map_err(|source| LinkError::BackupFailed {
                path: duplicate.to_path_buf(),
                backup: backup.clone(),
                source,
            })?;
            Some(backup)
        }
        _ => {
            fs::remove_file(duplicate).map_err(|source| LinkError::RemoveFailed {
                path: duplicate.to_path_buf(),
                source,
            })?;
            None
        }
    };

    fs::hard_link(canonical, duplicate).map_err(|source| LinkError::LinkFailed {
        canonical: canonical.to_path_buf(),
        path: duplicate.to_path_buf(),
        source,
    })?;

    log::debug!("Linked {} -> {}", duplicate.display(), canonical.display());

    Ok(match backup {
        Some(backup) => LinkOutcome::LinkedWithBackup { backup },
        None => LinkOutcome::Linked,
    })
}
