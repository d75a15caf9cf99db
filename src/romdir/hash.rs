//! Name hashing.
//!
//! Entries are keyed by the string hash from the ELF ABI (`elf_hash`), the
//! same function the legacy tools use, so hashes computed here can be compared
//! with values hardcoded elsewhere.

/// Hashes `name` up to (excluding) its first NUL byte.
///
/// The empty name hashes to 0.
pub fn name_hash(name: &[u8]) -> u32 {
    let mut h: u32 = 0;
    for &byte in name.iter().take_while(|&&b| b != 0) {
        h = (h << 4).wrapping_add(u32::from(byte));
        let g = h & 0xf000_0000;
        if g != 0 {
            h ^= g >> 24;
        }
        h &= !g;
    }
    h
}

/// Convenience wrapper over [`name_hash`] for string names.
pub fn str_hash(name: &str) -> u32 {
    name_hash(name.as_bytes())
}
