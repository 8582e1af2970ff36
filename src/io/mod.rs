//! File I/O and string slicing helpers.
//!
//! [`read_bytes`] returns an owned copy of a file. [`map_file`] lends the
//! bytes of a memory map for large files instead of copying them. The
//! slicing helpers count Unicode scalar values so truncation never lands
//! inside a multi-byte character.

use std::fs::File;
use std::ops::Deref;
use std::path::Path;

use memmap2::Mmap;

use crate::error::IoError;

/// Files at or above this size are memory-mapped instead of read.
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Reads a file's raw bytes.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the path does not exist and
/// [`IoError::ReadFailed`] for any other failure.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>, IoError> {
    ensure_exists(path)?;
    std::fs::read(path).map_err(|source| read_failed(path, source))
}

/// File contents borrowed from a memory map, or read into memory when
/// the file is small.
#[derive(Debug)]
pub enum FileBytes {
    /// Memory-mapped contents.
    Mapped(Mmap),
    /// Contents read into memory.
    Read(Vec<u8>),
}

impl Deref for FileBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Mapped(mmap) => &mmap[..],
            Self::Read(bytes) => bytes.as_slice(),
        }
    }
}

/// Opens a file for borrowing, memory-mapping it at or above 1 MiB.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the path does not exist and
/// [`IoError::ReadFailed`] for any other failure.
pub fn map_file(path: &Path) -> Result<FileBytes, IoError> {
    ensure_exists(path)?;
    let file = File::open(path).map_err(|source| read_failed(path, source))?;
    let len = file
        .metadata()
        .map_err(|source| read_failed(path, source))?
        .len();

    if len < MMAP_THRESHOLD {
        return read_bytes(path).map(FileBytes::Read);
    }

    // SAFETY: the map is only read. Truncation of the file by another
    // process while the map is alive is not guarded against.
    #[allow(unsafe_code)]
    let mmap = unsafe { Mmap::map(&file) }.map_err(|source| read_failed(path, source))?;
    Ok(FileBytes::Mapped(mmap))
}

fn ensure_exists(path: &Path) -> Result<(), IoError> {
    if path.exists() {
        Ok(())
    } else {
        Err(IoError::FileNotFound {
            path: path.display().to_string(),
        })
    }
}

fn read_failed(path: &Path, source: std::io::Error) -> IoError {
    IoError::ReadFailed {
        path: path.display().to_string(),
        source,
    }
}

/// Writes string content to a file, creating parent directories.
///
/// # Errors
///
/// Returns [`IoError::WriteFailed`] if the directory or file cannot be written.
pub fn write_file(path: &Path, content: &str) -> Result<(), IoError> {
    let write_failed = |source| IoError::WriteFailed {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(write_failed)?;
    }

    std::fs::write(path, content).map_err(write_failed)
}

/// Finds the largest char boundary at or below `index`.
#[must_use]
pub const fn find_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Returns the first `max_chars` characters of `s`.
#[must_use]
pub fn take_chars(s: &str, max_chars: usize) -> &str {
    s.char_indices()
        .nth(max_chars)
        .map_or(s, |(byte_idx, _)| &s[..byte_idx])
}

/// Returns the last `max_chars` characters of `s`.
#[must_use]
pub fn last_chars(s: &str, max_chars: usize) -> &str {
    if max_chars == 0 {
        return "";
    }
    s.char_indices()
        .rev()
        .nth(max_chars - 1)
        .map_or(s, |(byte_idx, _)| &s[byte_idx..])
}
