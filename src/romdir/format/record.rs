//! Raw record decoding and table scanning.
//!
//! The table has no header of its own. It is found by walking the image in
//! 16-byte strides until a record named `RESET` turns up, and it ends at the
//! first record whose name starts with NUL.

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, trace};

use crate::romdir::types::error::{RomdirError, Result};
use crate::romdir::types::models::{
    RawRecord, RecordKind, NAME_FIELD_LEN, RECORD_SIZE, SENTINEL_NAME,
};

/// Decodes the record starting at `position`.
///
/// # Errors
/// `TruncatedRecord` if fewer than 16 bytes remain at `position`.
pub fn decode(buf: &[u8], position: usize) -> Result<RawRecord> {
    let remaining = buf.len().saturating_sub(position);
    if remaining < RECORD_SIZE {
        return Err(RomdirError::TruncatedRecord {
            offset: position,
            remaining,
        });
    }
    let raw = &buf[position..position + RECORD_SIZE];

    let mut name = [0u8; NAME_FIELD_LEN];
    name.copy_from_slice(&raw[..NAME_FIELD_LEN]);

    Ok(RawRecord {
        name,
        aux_size: LittleEndian::read_u16(&raw[10..12]),
        data_size: LittleEndian::read_u32(&raw[12..16]),
        position,
    })
}

/// Finds the byte offset of the sentinel record.
///
/// Only full records on 16-byte boundaries are considered.
pub fn locate_table(buf: &[u8]) -> Result<usize> {
    let found = buf
        .chunks_exact(RECORD_SIZE)
        .position(|chunk| {
            let name = &chunk[..NAME_FIELD_LEN];
            let end = name.iter().position(|&b| b == 0).unwrap_or(NAME_FIELD_LEN);
            &name[..end] == SENTINEL_NAME.as_bytes()
        })
        .map(|index| index * RECORD_SIZE);

    match found {
        Some(offset) => {
            debug!("ROMDIR sentinel found at {:#x}", offset);
            Ok(offset)
        }
        None => Err(RomdirError::TableNotFound { scanned: buf.len() }),
    }
}

/// Iterator over the records of one table, sentinel first.
///
/// Stops before the terminator record, or when the buffer ends exactly on a
/// record boundary. A partial trailing record yields one `TruncatedRecord`
/// error and then ends the iteration.
pub struct RecordScanner<'a> {
    buf: &'a [u8],
    position: usize,
    done: bool,
}

impl<'a> RecordScanner<'a> {
    /// Creates a scanner positioned on the sentinel record.
    pub fn new(buf: &'a [u8]) -> Result<Self> {
        let position = locate_table(buf)?;
        Ok(Self::at(buf, position))
    }

    /// Creates a scanner starting at an already known table offset.
    pub fn at(buf: &'a [u8], position: usize) -> Self {
        Self {
            buf,
            position,
            done: false,
        }
    }

    /// Offset of the next record to be decoded.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl Iterator for RecordScanner<'_> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.position >= self.buf.len() {
            debug!("ROMDIR table runs to the end of the image at {:#x}", self.position);
            self.done = true;
            return None;
        }

        let record = match decode(self.buf, self.position) {
            Ok(record) => record,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        if record.kind() == RecordKind::Terminator {
            trace!("ROMDIR terminator at {:#x}", self.position);
            self.done = true;
            return None;
        }

        trace!(
            "record {:<10} ext={:#06x} size={:#010x} at {:#x}",
            record.name(),
            record.aux_size,
            record.data_size,
            record.position
        );
        self.position += RECORD_SIZE;
        Some(Ok(record))
    }
}
