//! Run configuration.
//!
//! A [`RunConfig`] is built once from the command line (or directly, in
//! tests and embedding code) and passed by value to the
//! [`DuplicateFinder`](crate::duplicates::DuplicateFinder). It does not change
//! during a run.

use std::path::{Path, PathBuf};

use crate::actions::LinkMode;
use crate::cli::Cli;
use crate::scanner::ReadLimit;

/// Default maximum depth below each root.
pub const DEFAULT_MAX_DEPTH: usize = 5;
/// Default minimum file size (1 KiB).
pub const DEFAULT_MIN_SIZE: u64 = 1024;
/// Default maximum file size (1 GiB).
pub const DEFAULT_MAX_SIZE: u64 = 1024 * 1024 * 1024;

/// Settings for one duplicate-finding run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Roots to walk, in order
    pub roots: Vec<PathBuf>,
    /// Maximum number of path segments below each root
    pub max_depth: usize,
    /// Smallest file size considered (inclusive)
    pub min_size: u64,
    /// Largest file size considered (inclusive)
    pub max_size: u64,
    /// How much of each file is fingerprinted
    pub limit: ReadLimit,
    /// Base-name filter; `None` accepts every name
    pub pattern: Option<glob::Pattern>,
    /// Suppress the per-file listing
    pub quiet: bool,
    /// Print the aggregate stats line at the end
    pub print_stats: bool,
    /// What to do with each duplicate
    pub link_mode: LinkMode,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            limit: ReadLimit::Whole,
            pattern: None,
            quiet: false,
            print_stats: false,
            link_mode: LinkMode::ReportOnly,
        }
    }
}

impl RunConfig {
    /// Create a configuration for the given roots with default settings.
    #[must_use]
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            ..Self::default()
        }
    }

    /// Set the maximum depth below each root.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the inclusive size range.
    #[must_use]
    pub fn with_size_range(mut self, min: u64, max: u64) -> Self {
        self.min_size = min;
        self.max_size = max;
        self
    }

    /// Set the read limit.
    #[must_use]
    pub fn with_limit(mut self, limit: ReadLimit) -> Self {
        self.limit = limit;
        self
    }

    /// Set the base-name glob.
    #[must_use]
    pub fn with_pattern(mut self, pattern: glob::Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Suppress or enable the per-file listing.
    #[must_use]
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Enable or disable the stats line.
    #[must_use]
    pub fn with_stats(mut self, enabled: bool) -> Self {
        self.print_stats = enabled;
        self
    }

    /// Set the link mode.
    #[must_use]
    pub fn with_link_mode(mut self, mode: LinkMode) -> Self {
        self.link_mode = mode;
        self
    }

    /// Check whether `size` lies within `[min_size, max_size]`.
    #[must_use]
    pub fn size_in_range(&self, size: u64) -> bool {
        (self.min_size..=self.max_size).contains(&size)
    }

    /// Check whether the base name of `path` matches the glob.
    ///
    /// Names that are not valid UTF-8 are matched in their lossy form, so
    /// `*` still accepts them. Paths without a base name only match when no
    /// pattern is set.
    #[must_use]
    pub fn matches_name(&self, path: &Path) -> bool {
        let Some(pattern) = &self.pattern else {
            return true;
        };
        path.file_name()
            .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
    }
}

impl From<&Cli> for RunConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            roots: cli.dirs.clone(),
            max_depth: cli.depth,
            min_size: cli.min,
            max_size: cli.max,
            limit: ReadLimit::from_bytes(cli.limit),
            pattern: Some(cli.pattern.clone()),
            quiet: cli.quiet,
            print_stats: cli.stats,
            link_mode: LinkMode::from_flags(cli.link, cli.backup),
        }
    }
}
