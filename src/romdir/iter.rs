//! Sequential access to entry payloads.
//!
//! # Example
//! ```no_run
//! # use romdir_reader::Directory;
//! # let dir = Directory::load("SCPH-39001.bin").unwrap();
//! for item in dir.contents() {
//!     let (entry, data) = item.unwrap();
//!     println!("{}: {} bytes", entry.name, data.len());
//! }
//! ```

use std::slice::Iter;

use super::reader::Directory;
use super::types::error::Result;
use super::types::models::Entry;

/// Iterator over `(entry, payload)` pairs, in table order.
///
/// Payloads are borrowed from the image. An entry whose payload lies outside
/// the image yields an error; iteration continues with the next entry.
///
/// Created by [`Directory::contents()`].
pub struct Contents<'a, B> {
    directory: &'a Directory<B>,
    entries: Iter<'a, Entry>,
}

impl<'a, B: AsRef<[u8]>> Contents<'a, B> {
    pub(super) fn new(directory: &'a Directory<B>) -> Self {
        Self {
            directory,
            entries: directory.entries().iter(),
        }
    }
}

impl<'a, B: AsRef<[u8]>> Iterator for Contents<'a, B> {
    type Item = Result<(&'a Entry, &'a [u8])>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.next()?;
        Some(self.directory.data(entry).map(|data| (entry, data)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<B: AsRef<[u8]>> ExactSizeIterator for Contents<'_, B> {}
