//! # romdir-reader
//!
//! A reader for ROMDIR tables, the flat file directory embedded in PlayStation 2
//! BIOS images and similar firmware.
//!
//! The table is located by scanning the image for the `RESET` record; each
//! following 16-byte record names a region of the image. Regions are looked up
//! by their ELF-style name hash and served as read-only byte ranges.
//!
//! ```no_run
//! use romdir_reader::Directory;
//!
//! let dir = Directory::open("SCPH-39001.bin")?;
//! if let Some(romver) = dir.find_by_name("ROMVER") {
//!     let bytes = dir.read_range(romver, 0, 16)?;
//!     println!("{}", String::from_utf8_lossy(bytes));
//! }
//! # Ok::<(), romdir_reader::RomdirError>(())
//! ```
pub mod romdir;

// Re-export the main types for convenience
pub use romdir::{
    align_up,
    format::extinfo::ExtInfoTable,
    hash::{name_hash, str_hash},
    iter::Contents,
    types::models::{
        DirectoryOptions, Entry, EntryStat, RawRecord, RecordKind, EXTINFO_NAME,
        PLACEHOLDER_MARKER, RECORD_SIZE, ROOT_INO, SENTINEL_NAME, WELL_KNOWN_HASHES,
    },
    Directory, ImageSource, Result, RomdirError,
};
