//! HighwayHash content fingerprints with streaming support.
//!
//! # Overview
//!
//! This module provides the [`Fingerprinter`] for computing keyed 256-bit
//! HighwayHash digests of file contents. Files are read in fixed-size chunks,
//! either to end-of-file or up to a configured [`ReadLimit`].
//!
//! Every fingerprinter uses the same hard-coded key, so digests are comparable
//! within a run and across runs. The digest depends only on the bytes read,
//! never on how reads were chunked.
//!
//! # Example
//!
//! ```
//! use dupelink::scanner::{Fingerprinter, ReadLimit};
//!
//! let whole = Fingerprinter::new(ReadLimit::Whole);
//! let a = whole.fingerprint_reader(&b"hello world"[..]).unwrap();
//! let b = whole.fingerprint_reader(&b"hello there"[..]).unwrap();
//! assert_ne!(a, b);
//!
//! // With a 5-byte prefix only "hello" is hashed
//! let prefix = Fingerprinter::new(ReadLimit::Prefix(5));
//! let a = prefix.fingerprint_reader(&b"hello world"[..]).unwrap();
//! let b = prefix.fingerprint_reader(&b"hello there"[..]).unwrap();
//! assert_eq!(a, b);
//! ```

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use highway::{HighwayHash, HighwayHasher, Key};

use super::HashError;

/// Read chunk size (4KB).
pub const CHUNK_SIZE: usize = 4 * 1024;

/// Fixed key: bytes 00 01 .. 0F followed by F0 E0 .. 10 00, as little-endian words.
const FINGERPRINT_KEY: Key = Key([
    0x0706_0504_0302_0100,
    0x0f0e_0d0c_0b0a_0908,
    0x8090_a0b0_c0d0_e0f0,
    0x0010_2030_4050_6070,
]);

/// How much of each file is fed to the hasher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadLimit {
    /// Hash the entire file.
    #[default]
    Whole,
    /// Hash at most this many leading bytes.
    Prefix(u64),
}

impl ReadLimit {
    /// Build a limit from a byte count, where 0 means unlimited.
    #[must_use]
    pub fn from_bytes(bytes: u64) -> Self {
        if bytes == 0 {
            Self::Whole
        } else {
            Self::Prefix(bytes)
        }
    }

    /// The byte count this limit was built from (0 for [`ReadLimit::Whole`]).
    #[must_use]
    pub fn as_bytes(self) -> u64 {
        match self {
            Self::Whole => 0,
            Self::Prefix(bytes) => bytes,
        }
    }
}

/// A 256-bit content digest, used as an opaque binary index key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Wrap raw digest bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    fn from_words(words: [u64; 4]) -> Self {
        let mut bytes = [0u8; 32];
        for (chunk, word) in bytes.chunks_exact_mut(8).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        Self(bytes)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({self})")
    }
}

/// Streaming fingerprint calculator.
#[derive(Debug, Clone, Copy)]
pub struct Fingerprinter {
    limit: ReadLimit,
    chunk_size: usize,
}

impl Default for Fingerprinter {
    fn default() -> Self {
        Self::new(ReadLimit::Whole)
    }
}

impl Fingerprinter {
    /// Create a fingerprinter that reads according to `limit`.
    #[must_use]
    pub fn new(limit: ReadLimit) -> Self {
        Self {
            limit,
            chunk_size: CHUNK_SIZE,
        }
    }

    /// Override the read chunk size. The digest does not depend on it.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Fingerprint everything `reader` yields, up to the read limit.
    ///
    /// Interrupted reads are retried.
    ///
    /// # Errors
    ///
    /// Returns the first read error other than [`io::ErrorKind::Interrupted`].
    pub fn fingerprint_reader<R: Read>(&self, mut reader: R) -> io::Result<Fingerprint> {
        let mut hasher = HighwayHasher::new(FINGERPRINT_KEY);
        let mut buffer = vec![0u8; self.chunk_size];
        let mut remaining = match self.limit {
            ReadLimit::Whole => None,
            ReadLimit::Prefix(bytes) => Some(bytes),
        };

        loop {
            let want = match remaining {
                Some(0) => break,
                Some(left) => buffer
                    .len()
                    .min(usize::try_from(left).unwrap_or(usize::MAX)),
                None => buffer.len(),
            };

            let read = match reader.read(&mut buffer[..want]) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            hasher.append(&buffer[..read]);
            if let Some(left) = remaining.as_mut() {
                *left -= read as u64;
            }
        }

        Ok(Fingerprint::from_words(hasher.finalize256()))
    }

    /// Open `path` and fingerprint its contents.
    ///
    /// The file handle is released before this returns, on success or error.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read.
    pub fn fingerprint_file(&self, path: &Path) -> Result<Fingerprint, HashError> {
        let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        self.fingerprint_reader(file)
            .map_err(|e| HashError::from_io(path, e))
    }
}
