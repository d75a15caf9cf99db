//! Image buffers.
//!
//! A [`Directory`](crate::Directory) works over any `AsRef<[u8]>`. This module
//! provides the two ways the command-line tool obtains one: reading the whole
//! file, or mapping it.

use std::fs::File;
use std::path::Path;

use log::info;
use memmap2::Mmap;

use crate::romdir::types::error::Result;

/// Bytes of a BIOS image, either owned or memory-mapped.
#[derive(Debug)]
pub enum ImageSource {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl ImageSource {
    /// Reads the whole file into memory.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        info!("Read image {} ({} bytes)", path.display(), data.len());
        Ok(Self::Owned(data))
    }

    /// Maps the file read-only.
    ///
    /// The file must not be modified while the mapping is alive.
    pub fn map(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        info!("Mapped image {} ({} bytes)", path.display(), mmap.len());
        Ok(Self::Mapped(mmap))
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, Self::Mapped(_))
    }
}

impl AsRef<[u8]> for ImageSource {
    fn as_ref(&self) -> &[u8] {
        match self {
            Self::Owned(data) => data.as_slice(),
            Self::Mapped(mmap) => &mmap[..],
        }
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(data: Vec<u8>) -> Self {
        Self::Owned(data)
    }
}
