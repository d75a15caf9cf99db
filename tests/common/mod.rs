//! Common test utilities: synthetic ROMDIR images.

#![allow(dead_code)]

pub mod builder;
pub use builder::{BuiltImage, ImageBuilder};

/// Encodes one 16-byte directory record.
pub fn record(name: &str, aux_size: u16, data_size: u32) -> [u8; 16] {
    let mut raw = [0u8; 16];
    let name = name.as_bytes();
    assert!(name.len() <= 10, "record name too long");
    raw[..name.len()].copy_from_slice(name);
    raw[10..12].copy_from_slice(&aux_size.to_le_bytes());
    raw[12..16].copy_from_slice(&data_size.to_le_bytes());
    raw
}

/// Concatenates records and appends an all-zero terminator record.
pub fn table(records: &[(&str, u16, u32)]) -> Vec<u8> {
    let mut out = Vec::with_capacity((records.len() + 1) * 16);
    for (name, aux, size) in records {
        out.extend_from_slice(&record(name, *aux, *size));
    }
    out.extend_from_slice(&[0u8; 16]);
    out
}

/// Deterministic, position-dependent filler so misplaced reads are visible.
pub fn pattern(seed: u8, len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| seed.wrapping_add((i as u8).wrapping_mul(7)))
        .collect()
}
