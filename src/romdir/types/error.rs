//! Custom error types for the romdir-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum RomdirError {
    /// An error originating from I/O operations (opening or mapping an image, writing extracted files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No `RESET` record was found on any 16-byte boundary of the image.
    #[error("ROMDIR table not found: no RESET record in {scanned} bytes")]
    TableNotFound { scanned: usize },

    /// The image ends in the middle of a directory record.
    #[error("Truncated ROMDIR record at offset {offset:#x}: only {remaining} of 16 bytes available")]
    TruncatedRecord { offset: usize, remaining: usize },

    /// Cumulative data or extinfo offsets no longer fit in the address space.
    #[error("Offset overflow while laying out record {index} ({name:?})")]
    OffsetOverflow { index: usize, name: String },

    /// A byte range derived from the directory lies outside the image (or outside EXTINFO).
    #[error("Range out of bounds: {len} bytes at {offset:#x}, but only {available} bytes available")]
    OutOfRange {
        offset: u64,
        len: u64,
        available: u64,
    },

    /// An entry name that cannot be used as a file name on the host.
    #[error("Entry name {0:?} is not a valid file name")]
    InvalidName(String),

    /// The requested file could not be found in the directory.
    #[error("File not found in ROMDIR: {0}")]
    FileNotFound(String),
}

/// A convenience `Result` type alias using the crate's `RomdirError` type.
pub type Result<T> = std::result::Result<T, RomdirError>;
