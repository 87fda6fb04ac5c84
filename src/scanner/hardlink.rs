//! Inode identity checks for hard links.
//!
//! # Overview
//!
//! Hard links are multiple directory entries pointing to the same inode on
//! disk. Two such paths are the same file, not a duplicate pair, and must not
//! be "deduplicated" onto each other: removing one and linking it to the
//! other would remove the only copy first.
//!
//! # Platform Support
//!
//! - **Unix**: Uses (device_id, inode) pairs from file metadata
//! - **Other**: Inode identity unavailable; only identical paths compare equal
//!
//! # Example
//!
//! ```no_run
//! use dupelink::scanner::hardlink::same_file;
//! use std::path::Path;
//!
//! if same_file(Path::new("a.txt"), Path::new("b.txt")) {
//!     println!("a.txt and b.txt are already one file");
//! }
//! ```

use std::fs::{self, Metadata};
use std::path::Path;

/// Platform-specific inode key.
///
/// On Unix, this is (device_id, inode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InodeKey {
    #[cfg(unix)]
    dev: u64,
    #[cfg(unix)]
    ino: u64,
    #[cfg(not(unix))]
    _phantom: (),
}

impl InodeKey {
    /// Create an inode key from file metadata.
    ///
    /// Returns `None` if the platform doesn't expose inode identity.
    #[cfg(unix)]
    #[must_use]
    pub fn from_metadata(metadata: &Metadata) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;
        Some(Self {
            dev: metadata.dev(),
            ino: metadata.ino(),
        })
    }

    #[cfg(not(unix))]
    #[must_use]
    pub fn from_metadata(_metadata: &Metadata) -> Option<Self> {
        // std does not expose a stable file index outside Unix
        None
    }
}

/// Check whether two paths name the same underlying file.
///
/// Symlinks are not followed, so a link and its target compare unequal.
/// Returns `false` when either path cannot be stat'ed.
#[must_use]
pub fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }

    let (Ok(meta_a), Ok(meta_b)) = (fs::symlink_metadata(a), fs::symlink_metadata(b)) else {
        return false;
    };

    match (
        InodeKey::from_metadata(&meta_a),
        InodeKey::from_metadata(&meta_b),
    ) {
        (Some(key_a), Some(key_b)) => key_a == key_b,
        _ => false,
    }
}
