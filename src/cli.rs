//! Command-line interface definitions for dupelink.
//!
//! This module defines the CLI arguments using the clap derive API, plus the
//! value parsers that validate size strings and the name glob before any
//! scanning starts.
//!
//! # Example
//!
//! ```bash
//! # List files and their duplicates under two trees
//! dupelink ~/photos /mnt/backup/photos
//!
//! # Only hash the first megabyte of each file, print totals at the end
//! dupelink -limit 1mb -stats -quiet ~/Downloads
//!
//! # Replace duplicates with hard links, keeping a .dedup backup
//! dupelink -link -bak -pat '*.iso' /srv/images
//! ```
//!
//! Flags may be written Go-style with a single dash (`-min 2k`) or with two
//! dashes (`--min 2k`); [`normalize_args`] rewrites the former before clap
//! sees them.

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::OnceLock;

use clap::{ArgAction, Parser};
use regex::Regex;

/// Find duplicate files by content fingerprint and collapse them into hard links.
///
/// Roots are walked in the given order; the first file seen with a given
/// content becomes the canonical copy and later identical files are reported
/// as its duplicates.
#[derive(Debug, Parser)]
#[command(name = "dupelink")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directories to scan, in order
    #[arg(value_name = "DIR")]
    pub dirs: Vec<PathBuf>,

    /// File name pattern matched against the base name
    ///
    /// Supports `*`, `?`, `[abc]`, `[a-z]`, negated classes `[^a]` or `[!a]`,
    /// and `\` to escape a metacharacter.
    #[arg(long = "pat", value_name = "GLOB", default_value = "*", value_parser = parse_pattern)]
    pub pattern: glob::Pattern,

    /// Read only the first bytes of each file (0b reads the whole file)
    #[arg(long, value_name = "SIZE", default_value = "0b", value_parser = parse_size)]
    pub limit: u64,

    /// Minimal file size
    #[arg(long, value_name = "SIZE", default_value = "1Kb", value_parser = parse_size)]
    pub min: u64,

    /// Maximal file size
    #[arg(long, value_name = "SIZE", default_value = "1Gb", value_parser = parse_size)]
    pub max: u64,

    /// Maximal depth below each root
    #[arg(long, value_name = "N", default_value_t = 5)]
    pub depth: usize,

    /// Suppress the per-file listing
    #[arg(long)]
    pub quiet: bool,

    /// Print duplicate count and total duplicate size at the end
    #[arg(long)]
    pub stats: bool,

    /// Replace duplicates with hard links to the first-seen copy
    ///
    /// Warning: the duplicate file is removed before the link is created.
    #[arg(long)]
    pub link: bool,

    /// When linking, rename the duplicate to <name>.dedup instead of removing it
    #[arg(long = "bak")]
    pub backup: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Long flags that may be spelled with a single dash.
const LONG_FLAGS: &[&str] = &[
    "pat", "limit", "min", "max", "depth", "quiet", "stats", "link", "bak", "verbose", "help",
    "version",
];

/// Rewrite single-dash long flags (`-min`, `-depth=3`) to `--min`, `--depth=3`.
///
/// Everything after a literal `--` is left untouched, as are short flag
/// clusters such as `-vv` and arguments that are not valid UTF-8.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut past_separator = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if past_separator {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                past_separator = true;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split('=').next().unwrap_or(rest);
                    if LONG_FLAGS.contains(&name) {
                        OsString::from(format!("-{text}"))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}

/// Errors produced while parsing a size string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SizeError {
    /// The string is not a decimal number with an optional unit.
    #[error("malformed size '{0}': expected a number with an optional b/k/kb/m/mb/g/gb unit")]
    MalformedSize(String),
}

fn size_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9.]+)(kb|mb|gb|b|k|m|g)?$").expect("size pattern is a valid regex")
    })
}

/// Parse a human-readable size string into bytes.
///
/// Accepts a decimal number optionally followed by a unit. Units are
/// case-insensitive and binary: `b` = 1, `k`/`kb` = 1024, `m`/`mb` = 1024²,
/// `g`/`gb` = 1024³. The result is rounded to the nearest whole byte.
///
/// # Examples
///
/// ```
/// use dupelink::cli::parse_size;
///
/// assert_eq!(parse_size("1Kb").unwrap(), 1024);
/// assert_eq!(parse_size("2m").unwrap(), 2_097_152);
/// assert_eq!(parse_size("0b").unwrap(), 0);
/// assert_eq!(parse_size("1.5gb").unwrap(), 1_610_612_736);
/// assert_eq!(parse_size("4096").unwrap(), 4096);
/// ```
///
/// # Errors
///
/// Returns [`SizeError::MalformedSize`] if the string does not have the
/// number-plus-unit shape, or if the number is not a valid decimal.
pub fn parse_size(s: &str) -> Result<u64, SizeError> {
    let lowered = s.trim().to_lowercase();
    let malformed = || SizeError::MalformedSize(s.to_string());

    let captures = size_pattern().captures(&lowered).ok_or_else(malformed)?;
    let number: f64 = captures[1].parse().map_err(|_| malformed())?;

    let multiplier: u64 = match captures.get(2).map(|m| m.as_str()) {
        None | Some("b") => 1,
        Some("k" | "kb") => 1 << 10,
        Some("m" | "mb") => 1 << 20,
        Some("g" | "gb") => 1 << 30,
        Some(_) => return Err(malformed()),
    };

    let bytes = (number * multiplier as f64).round();
    if !bytes.is_finite() || bytes > u64::MAX as f64 {
        return Err(malformed());
    }
    Ok(bytes as u64)
}

/// Parse the `-pat` glob.
///
/// Classes negated with `^` and backslash escapes are rewritten into the
/// `glob` crate's `[!...]` and `[c]` forms first. Inside a class a backslash
/// simply makes the next character literal.
///
/// ```
/// use dupelink::cli::parse_pattern;
///
/// let pattern = parse_pattern("[^a]*.log").unwrap();
/// assert!(pattern.matches("b1.log"));
/// assert!(!pattern.matches("a1.log"));
///
/// let pattern = parse_pattern(r"what\?.txt").unwrap();
/// assert!(pattern.matches("what?.txt"));
/// assert!(!pattern.matches("whatX.txt"));
/// ```
///
/// # Errors
///
/// Returns the glob crate's error for patterns such as an unclosed `[`.
pub fn parse_pattern(s: &str) -> Result<glob::Pattern, glob::PatternError> {
    glob::Pattern::new(&translate_pattern(s))
}

fn translate_pattern(pattern: &str) -> String {
    let mut translated = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) if !in_class && matches!(escaped, '*' | '?' | '[' | ']') => {
                    translated.push('[');
                    translated.push(escaped);
                    translated.push(']');
                }
                Some(escaped) => translated.push(escaped),
                // A trailing backslash stands for itself
                None => translated.push('\\'),
            },
            '[' if !in_class => {
                in_class = true;
                translated.push('[');
                if chars.next_if_eq(&'^').is_some() {
                    translated.push('!');
                }
            }
            ']' if in_class => {
                in_class = false;
                translated.push(']');
            }
            _ => translated.push(c),
        }
    }
    translated
}
