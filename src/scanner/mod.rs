//! Scanner module for directory traversal and content fingerprinting.
//!
//! This module provides functionality for:
//! - Depth-bounded, lexically ordered directory walking using walkdir
//! - Keyed content fingerprinting with HighwayHash
//! - Same-inode detection for hard links
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and candidate discovery
//! - [`hasher`]: Streaming fingerprints, whole-file or prefix-limited
//! - [`hardlink`]: Inode identity checks
//!
//! # Example
//!
//! ```no_run
//! use dupelink::scanner::{Fingerprinter, ReadLimit, Walker};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), 5);
//! let fingerprinter = Fingerprinter::new(ReadLimit::Whole);
//! for path in walker.walk().expect("root is readable") {
//!     match fingerprinter.fingerprint_file(&path) {
//!         Ok(fp) => println!("{fp}  {}", path.display()),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod hardlink;
pub mod hasher;
pub mod walker;

use std::io;
use std::path::{Path, PathBuf};

pub use hasher::{Fingerprint, Fingerprinter, ReadLimit, CHUNK_SIZE};
pub use walker::{path_length, Walker};

/// Errors that can occur while opening a root for traversal.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing the root.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified root was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while accessing the root.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Classify an I/O error raised for `path`.
    #[must_use]
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// Errors that can occur during fingerprinting.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl HashError {
    /// Classify an I/O error raised for `path`.
    #[must_use]
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}
