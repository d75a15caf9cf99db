//! Extended info resolution.
//!
//! Each record may declare an extinfo size. The blocks themselves live inside
//! the payload of the `EXTINFO` entry, in table order, and an entry's block is
//! addressed relative to the start of that payload.

use log::{debug, warn};

use crate::romdir::hash;
use crate::romdir::types::error::{RomdirError, Result};
use crate::romdir::types::models::{Entry, EXTINFO_NAME};

/// Location of the EXTINFO payload inside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtInfoTable {
    pub data_offset: u64,
    pub data_size: u32,
    hash: u32,
}

impl ExtInfoTable {
    /// Finds the EXTINFO entry and checks every extinfo block against it.
    ///
    /// Returns `None` when the directory has no EXTINFO entry. Blocks that
    /// overrun the EXTINFO payload are reported here and rejected on read.
    pub fn resolve(entries: &[Entry], strict_names: bool) -> Option<Self> {
        let target = hash::str_hash(EXTINFO_NAME);
        let entry = entries
            .iter()
            .find(|e| e.hash == target && (!strict_names || e.name == EXTINFO_NAME));

        let Some(entry) = entry else {
            debug!("no EXTINFO entry; extended info is unavailable");
            return None;
        };

        let table = Self {
            data_offset: entry.data_offset,
            data_size: entry.data_size,
            hash: entry.hash,
        };
        debug!(
            "EXTINFO payload at {:#x}, {} bytes",
            table.data_offset, table.data_size
        );

        for e in entries.iter().filter(|e| e.has_aux() && !table.is_table_entry(e)) {
            if let Err(err) = table.block_range(e) {
                warn!("extinfo block of {:?} is unusable: {}", e.name, err);
            }
        }

        Some(table)
    }

    fn is_table_entry(&self, entry: &Entry) -> bool {
        entry.hash == self.hash && entry.data_offset == self.data_offset
    }

    /// Absolute `(offset, len)` of `entry`'s extinfo block inside the image.
    ///
    /// `Ok(None)` when the entry has no extinfo, or is the EXTINFO entry itself.
    ///
    /// # Errors
    /// `OutOfRange` if the block does not lie inside the EXTINFO payload.
    pub fn block_range(&self, entry: &Entry) -> Result<Option<(u64, u64)>> {
        if !entry.has_aux() || self.is_table_entry(entry) {
            return Ok(None);
        }

        let len = u64::from(entry.aux_size);
        let available = u64::from(self.data_size);
        let fits = entry
            .aux_offset
            .checked_add(len)
            .is_some_and(|end| end <= available);
        if !fits {
            return Err(RomdirError::OutOfRange {
                offset: entry.aux_offset,
                len,
                available,
            });
        }

        Ok(Some((self.data_offset.saturating_add(entry.aux_offset), len)))
    }
}
