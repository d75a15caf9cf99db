//! Core data structures for ROMDIR components.
//!
//! This module defines the fundamental types used throughout the library:
//! - Raw on-disk directory records
//! - Resolved directory entries and their stat view
//! - Options controlling how a directory is built and queried

use crate::romdir::hash;

/// Size of one ROMDIR record in bytes.
pub const RECORD_SIZE: usize = 16;

/// Width of the NUL-padded name field at the start of each record.
pub const NAME_FIELD_LEN: usize = 10;

/// Alignment applied to each payload when computing the next data offset.
pub const DATA_ALIGNMENT: u64 = 16;

/// Name of the sentinel record that opens the table.
pub const SENTINEL_NAME: &str = "RESET";

/// Name of the entry whose payload holds every other entry's extended info.
pub const EXTINFO_NAME: &str = "EXTINFO";

/// First name byte of a reserved, all-zero placeholder slot.
pub const PLACEHOLDER_MARKER: u8 = b'-';

/// Well-known entry names with their precomputed name hashes.
///
/// Downstream tooling hardcodes these values, so they are part of the format contract.
pub const WELL_KNOWN_HASHES: &[(&str, u32)] = &[
    ("RESET", 0x0056_a7a4),
    ("ROMDIR", 0x0574_18e2),
    ("EXTINFO", 0x0ad8_e2ef),
    ("ROMVER", 0x0574_2aa2),
    ("OSDSYS", 0x0547_98e3),
];

/// One fixed 16-byte slot of the directory table, as stored in the image.
///
/// ```text
/// [10 bytes] name, ASCII, NUL-padded
/// [ 2 bytes] extinfo size (little-endian u16)
/// [ 4 bytes] data size    (little-endian u32)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord {
    pub name: [u8; NAME_FIELD_LEN],
    pub aux_size: u16,
    pub data_size: u32,
    /// Absolute byte offset of this record inside the image.
    pub position: usize,
}

/// How a record participates in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// First name byte is NUL: the table ends here.
    Terminator,
    /// First name byte is `-`: reserved slot, skipped but still laid out.
    Placeholder,
    /// A named region.
    File,
}

impl RawRecord {
    /// Name bytes up to (excluding) the first NUL.
    pub fn name_bytes(&self) -> &[u8] {
        let end = self
            .name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(NAME_FIELD_LEN);
        &self.name[..end]
    }

    /// Name as a string. Non-ASCII bytes are replaced, never rejected.
    pub fn name(&self) -> String {
        String::from_utf8_lossy(self.name_bytes()).into_owned()
    }

    pub fn kind(&self) -> RecordKind {
        match self.name[0] {
            0 => RecordKind::Terminator,
            PLACEHOLDER_MARKER => RecordKind::Placeholder,
            _ => RecordKind::File,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.name_bytes() == SENTINEL_NAME.as_bytes()
    }
}

/// A resolved directory entry.
///
/// An entry owns no image bytes: it describes a region of the source buffer
/// (`data_offset`, `data_size`) and a region of the EXTINFO payload
/// (`aux_offset`, `aux_size`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    /// Name hash; the only key used by hash lookups.
    pub hash: u32,
    /// Offset of the payload, relative to the start of the image.
    pub data_offset: u64,
    pub data_size: u32,
    /// Offset of this entry's block inside the EXTINFO payload.
    pub aux_offset: u64,
    /// Zero means the entry has no extended info.
    pub aux_size: u16,
}

impl Entry {
    pub(crate) fn new(record: &RawRecord, data_offset: u64) -> Self {
        Self {
            name: record.name(),
            hash: hash::name_hash(record.name_bytes()),
            data_offset,
            data_size: record.data_size,
            aux_offset: 0,
            aux_size: 0,
        }
    }

    pub fn has_aux(&self) -> bool {
        self.aux_size > 0
    }

    /// End of the payload (exclusive), relative to the start of the image.
    pub fn data_end(&self) -> u64 {
        self.data_offset + u64::from(self.data_size)
    }
}

/// Attributes of one entry, as reported to filesystem-style adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryStat {
    /// Position of the entry in table order.
    pub index: usize,
    /// Stable inode-like number. `1` is reserved for the directory itself.
    pub ino: u64,
    pub name: String,
    pub size: u64,
    pub aux_size: u16,
    pub data_offset: u64,
    pub hash: u32,
}

/// Inode number reserved for the directory that contains all entries.
pub const ROOT_INO: u64 = 1;

impl EntryStat {
    pub(crate) fn new(index: usize, entry: &Entry) -> Self {
        Self {
            index,
            ino: index as u64 + ROOT_INO + 1,
            name: entry.name.clone(),
            size: u64::from(entry.data_size),
            aux_size: entry.aux_size,
            data_offset: entry.data_offset,
            hash: entry.hash,
        }
    }
}

/// Options controlling how a [`Directory`](crate::Directory) is built and queried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectoryOptions {
    /// Compare literal names after a hash match.
    ///
    /// Off by default: the legacy lookup trusts the hash alone, and under a
    /// collision returns the first entry in table order.
    pub strict_names: bool,
    /// Publish the `RESET` sentinel record as an entry of its own.
    ///
    /// The sentinel is always laid out (its payload starts at offset 0); this
    /// only controls whether it shows up in lookups and listings.
    pub keep_sentinel: bool,
}

impl DirectoryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict_names(mut self, strict: bool) -> Self {
        self.strict_names = strict;
        self
    }

    pub fn keep_sentinel(mut self, keep: bool) -> Self {
        self.keep_sentinel = keep;
        self
    }
}
