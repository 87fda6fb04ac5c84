//! Depth-bounded directory walker.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a root and
//! yielding the paths of every non-directory entry within a depth bound.
//! It uses [`walkdir`] in single-threaded mode with entries sorted by file
//! name, so the visiting order is lexical and stable between runs. That order
//! decides which copy of a file is canonical.
//!
//! # Depth
//!
//! Depth is measured with [`path_length`]: the number of segments of the
//! lexically cleaned path. An entry is visited when
//! `path_length(entry) <= path_length(root) + max_depth`. Directories beyond
//! the bound are pruned, not descended into.
//!
//! # Example
//!
//! ```no_run
//! use dupelink::scanner::Walker;
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), 2);
//! match walker.walk() {
//!     Ok(paths) => paths.for_each(|p| println!("{}", p.display())),
//!     Err(e) => eprintln!("Warning: {}", e),
//! }
//! ```

use std::fs;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use super::ScanError;

/// Directory walker for candidate discovery.
#[derive(Debug, Clone)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Maximum number of segments below the root
    max_depth: usize,
}

impl Walker {
    /// Create a new walker for the given root.
    ///
    /// # Arguments
    ///
    /// * `root` - Directory (or single file) to walk
    /// * `max_depth` - Maximum number of path segments below `root`
    #[must_use]
    pub fn new(root: &Path, max_depth: usize) -> Self {
        Self {
            root: root.to_path_buf(),
            max_depth,
        }
    }

    /// Walk the tree, yielding paths of non-directory entries in lexical order.
    ///
    /// The returned iterator is lazy and single-use. Entries that cannot be
    /// read below the root are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] if the root cannot be stat'ed, or if it is a
    /// directory that cannot be opened. Nothing is yielded in that case.
    pub fn walk(&self) -> Result<impl Iterator<Item = PathBuf>, ScanError> {
        let metadata = fs::metadata(&self.root).map_err(|e| {
            log::debug!("Cannot stat root {}: {}", self.root.display(), e);
            ScanError::from_io(&self.root, e)
        })?;
        if metadata.is_dir() {
            fs::read_dir(&self.root).map_err(|e| ScanError::from_io(&self.root, e))?;
        }

        let limit = self.max_depth.saturating_add(path_length(&self.root));
        log::trace!(
            "Walking {} (depth {}, segment limit {})",
            self.root.display(),
            self.max_depth,
            limit
        );

        let entries = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| {
                let within = path_length(entry.path()) <= limit;
                if !within && entry.file_type().is_dir() {
                    log::trace!("Pruning directory beyond depth: {}", entry.path().display());
                }
                within
            });

        Ok(entries.filter_map(|result| match result {
            Ok(entry) if entry.file_type().is_dir() => None,
            Ok(entry) => Some(entry.into_path()),
            Err(e) => {
                let path = e.path().map(Path::display);
                match path {
                    Some(path) => log::warn!("Skipping unreadable entry {}: {}", path, e),
                    None => log::warn!("Skipping unreadable entry: {}", e),
                }
                None
            }
        }))
    }
}

/// Count the segments of `path` after lexical cleaning.
///
/// `.` segments are dropped, `..` cancels the preceding segment, and
/// repeated or trailing separators are ignored. A relative path that cleans
/// to nothing counts as one segment (`.`); a bare root counts as zero, as
/// does the empty path.
///
/// ```
/// use dupelink::scanner::path_length;
/// use std::path::Path;
///
/// assert_eq!(path_length(Path::new("/a/b/c")), 3);
/// assert_eq!(path_length(Path::new("a//b/./c/")), 3);
/// assert_eq!(path_length(Path::new("a/b/../c")), 2);
/// assert_eq!(path_length(Path::new(".")), 1);
/// assert_eq!(path_length(Path::new("/")), 0);
/// ```
#[must_use]
pub fn path_length(path: &Path) -> usize {
    if path.as_os_str().is_empty() {
        return 0;
    }

    let mut rooted = false;
    let mut segments: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => rooted = true,
            Component::CurDir => {}
            Component::ParentDir => match segments.last() {
                Some(Component::Normal(_)) => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(component),
            },
            Component::Normal(_) => segments.push(component),
        }
    }

    match (segments.len(), rooted) {
        (0, false) => 1,
        (n, _) => n,
    }
}
