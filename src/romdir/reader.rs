use std::collections::HashSet;
use std::path::Path;

use log::{info, warn};

use super::format::extinfo::ExtInfoTable;
use super::format::layout;
use super::hash;
use super::iter::Contents;
use super::source::ImageSource;
use super::types::error::{RomdirError, Result};
use super::types::models::{DirectoryOptions, Entry, EntryStat};
use super::utils;

/// An indexed ROMDIR table over one image.
///
/// Built once from a buffer, then only read. All methods take `&self`, so a
/// directory over a `Sync` buffer can be shared between threads as is.
/// Independent images get independent directories.
#[derive(Debug)]
pub struct Directory<B = ImageSource> {
    source: B,
    entries: Vec<Entry>,
    extinfo: Option<ExtInfoTable>,
    table_offset: usize,
    options: DirectoryOptions,
}

impl Directory<ImageSource> {
    /// Memory-maps the image at `path` and indexes it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_options(ImageSource::map(path)?, DirectoryOptions::default())
    }

    /// Reads the image at `path` into memory and indexes it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_options(ImageSource::read(path)?, DirectoryOptions::default())
    }
}

impl<B: AsRef<[u8]>> Directory<B> {
    /// Indexes `source` with default options.
    ///
    /// # Errors
    /// Returns an error if:
    /// - No `RESET` record exists on a 16-byte boundary (`TableNotFound`)
    /// - The image ends inside a record (`TruncatedRecord`)
    /// - Cumulative offsets overflow (`OffsetOverflow`)
    pub fn new(source: B) -> Result<Self> {
        Self::with_options(source, DirectoryOptions::default())
    }

    /// Indexes `source`. Nothing is returned unless the whole table parses.
    pub fn with_options(source: B, options: DirectoryOptions) -> Result<Self> {
        let buf = source.as_ref();
        let (table_offset, entries) = layout::build_entries(buf, &options)?;
        let extinfo = ExtInfoTable::resolve(&entries, options.strict_names);

        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.hash) {
                warn!(
                    "duplicate name hash {:#010x} ({:?}); lookups return the first entry",
                    entry.hash, entry.name
                );
            }
            if entry.data_end() > buf.len() as u64 {
                warn!(
                    "{:?} extends past the end of the image ({:#x} > {:#x})",
                    entry.name,
                    entry.data_end(),
                    buf.len()
                );
            }
        }

        info!(
            "ROMDIR at {:#x}: {} entries, extinfo {}",
            table_offset,
            entries.len(),
            if extinfo.is_some() { "present" } else { "absent" }
        );

        Ok(Self {
            source,
            entries,
            extinfo,
            table_offset,
            options,
        })
    }

    /// All entries, in table order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Byte offset of the `RESET` record inside the image.
    pub fn table_offset(&self) -> usize {
        self.table_offset
    }

    pub fn source_len(&self) -> usize {
        self.source.as_ref().len()
    }

    pub fn options(&self) -> &DirectoryOptions {
        &self.options
    }

    /// The resolved EXTINFO payload, if the image has one.
    pub fn extinfo(&self) -> Option<&ExtInfoTable> {
        self.extinfo.as_ref()
    }

    /// Gives back the underlying buffer.
    pub fn into_inner(self) -> B {
        self.source
    }

    /// Returns the first entry in table order whose name hash is `hash`.
    pub fn find_by_hash(&self, hash: u32) -> Option<&Entry> {
        self.entries.iter().find(|e| e.hash == hash)
    }

    /// Looks an entry up by name.
    ///
    /// Only the name hash is compared unless strict names are enabled, so two
    /// names with the same hash resolve to whichever comes first in the table.
    pub fn find_by_name(&self, name: &str) -> Option<&Entry> {
        self.position_of(name).map(|index| &self.entries[index])
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        let target = hash::str_hash(name);
        self.entries
            .iter()
            .position(|e| e.hash == target && (!self.options.strict_names || e.name == name))
    }

    /// Reads up to `len` bytes of `entry`'s payload starting at `offset`.
    ///
    /// The request is clamped to the payload: reading at or past its end
    /// yields an empty slice.
    ///
    /// # Errors
    /// `OutOfRange` if the clamped range is not inside the image.
    pub fn read_range(&self, entry: &Entry, offset: u64, len: u64) -> Result<&[u8]> {
        let n = utils::clamp_len(u64::from(entry.data_size), offset, len);
        if n == 0 {
            return Ok(&[]);
        }
        let start = entry.data_offset.saturating_add(offset);
        utils::checked_slice(self.source.as_ref(), start, n)
    }

    /// The whole payload of `entry`.
    pub fn data(&self, entry: &Entry) -> Result<&[u8]> {
        self.read_range(entry, 0, u64::from(entry.data_size))
    }

    /// Reads up to `len` bytes of `entry`'s extinfo block starting at `offset`.
    ///
    /// Same clamping as [`read_range`](Self::read_range). Entries without
    /// extinfo, and every entry of an image without EXTINFO, read as empty.
    pub fn read_aux(&self, entry: &Entry, offset: u64, len: u64) -> Result<&[u8]> {
        let Some(table) = &self.extinfo else {
            return Ok(&[]);
        };
        let Some((start, size)) = table.block_range(entry)? else {
            return Ok(&[]);
        };
        let n = utils::clamp_len(size, offset, len);
        if n == 0 {
            return Ok(&[]);
        }
        utils::checked_slice(self.source.as_ref(), start.saturating_add(offset), n)
    }

    /// The whole extinfo block of `entry`.
    pub fn aux_data(&self, entry: &Entry) -> Result<&[u8]> {
        self.read_aux(entry, 0, u64::from(entry.aux_size))
    }

    /// Attributes of the entry called `name`.
    pub fn stat(&self, name: &str) -> Result<EntryStat> {
        let index = self
            .position_of(name)
            .ok_or_else(|| RomdirError::FileNotFound(name.to_string()))?;
        Ok(EntryStat::new(index, &self.entries[index]))
    }

    /// Attributes of every entry, in table order.
    pub fn list(&self) -> impl Iterator<Item = EntryStat> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| EntryStat::new(index, entry))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.position_of(name).is_some()
    }

    /// Name-based [`read_range`](Self::read_range).
    pub fn read(&self, name: &str, offset: u64, len: u64) -> Result<&[u8]> {
        let entry = self
            .find_by_name(name)
            .ok_or_else(|| RomdirError::FileNotFound(name.to_string()))?;
        self.read_range(entry, offset, len)
    }

    /// Names of all entries, in table order.
    pub fn file_names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Copies the payload of `name` out of the image.
    pub fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        let entry = self
            .find_by_name(name)
            .ok_or_else(|| RomdirError::FileNotFound(name.to_string()))?;
        Ok(self.data(entry)?.to_vec())
    }

    /// Iterates over `(entry, payload)` pairs in table order.
    pub fn contents(&self) -> Contents<'_, B> {
        Contents::new(self)
    }
}
