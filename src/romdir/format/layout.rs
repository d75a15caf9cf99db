//! Offset assignment for directory records.
//!
//! Payloads are stored back to back from the start of the image, each padded
//! to 16 bytes. Extended info blocks are stored back to back inside the
//! EXTINFO payload with no padding. Neither position is recorded in the
//! table, so both are recovered by summing sizes over every record in order,
//! including the sentinel and placeholder slots that never become entries.

use log::trace;

use crate::romdir::types::error::{RomdirError, Result};
use crate::romdir::types::models::{DirectoryOptions, Entry, RawRecord, RecordKind};
use crate::romdir::utils;

use super::record::RecordScanner;

/// Running data and extinfo cursors for one pass over a table.
#[derive(Debug, Default)]
pub struct OffsetAssigner {
    data_cursor: u64,
    aux_cursor: u64,
    records_seen: usize,
}

impl OffsetAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out one record and advances both cursors.
    ///
    /// Returns the resolved entry when `keep` is set. Skipped records are laid
    /// out all the same.
    pub fn assign(&mut self, record: &RawRecord, keep: bool) -> Result<Option<Entry>> {
        let index = self.records_seen;
        self.records_seen += 1;

        let overflow = || RomdirError::OffsetOverflow {
            index,
            name: record.name(),
        };

        let entry = keep.then(|| {
            let mut entry = Entry::new(record, self.data_cursor);
            if record.aux_size > 0 {
                entry.aux_offset = self.aux_cursor;
                entry.aux_size = record.aux_size;
            }
            entry
        });

        if record.aux_size > 0 {
            self.aux_cursor = self
                .aux_cursor
                .checked_add(u64::from(record.aux_size))
                .ok_or_else(overflow)?;
        }

        let padded = utils::align_up(u64::from(record.data_size)).ok_or_else(overflow)?;
        self.data_cursor = self.data_cursor.checked_add(padded).ok_or_else(overflow)?;

        Ok(entry)
    }

    /// Offset at which the next record's payload would start.
    pub fn data_cursor(&self) -> u64 {
        self.data_cursor
    }

    /// Offset inside EXTINFO at which the next extinfo block would start.
    pub fn aux_cursor(&self) -> u64 {
        self.aux_cursor
    }

    pub fn records_seen(&self) -> usize {
        self.records_seen
    }
}

/// Scans the table in `buf` and resolves every kept record into an entry.
///
/// Returns the table offset together with the entries in table order.
pub fn build_entries(buf: &[u8], options: &DirectoryOptions) -> Result<(usize, Vec<Entry>)> {
    let scanner = RecordScanner::new(buf)?;
    let table_offset = scanner.position();

    let mut assigner = OffsetAssigner::new();
    let mut entries = Vec::new();
    let mut first = true;

    for record in scanner {
        let record = record?;
        let keep = match record.kind() {
            RecordKind::Placeholder => false,
            _ if first => options.keep_sentinel,
            _ => true,
        };
        first = false;

        if let Some(entry) = assigner.assign(&record, keep)? {
            entries.push(entry);
        } else {
            trace!("skipping record {:?} at {:#x}", record.name(), record.position);
        }
    }

    trace!(
        "laid out {} records: data end {:#x}, extinfo end {:#x}",
        assigner.records_seen(),
        assigner.data_cursor(),
        assigner.aux_cursor()
    );
    Ok((table_offset, entries))
}
