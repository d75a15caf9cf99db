//! Writing entry payloads out of the image.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::reader::Directory;
use super::types::error::{RomdirError, Result};
use super::types::models::Entry;

/// Checks that an entry name can be used as a single path component.
fn host_file_name(name: &str) -> Result<&str> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if invalid {
        return Err(RomdirError::InvalidName(name.to_string()));
    }
    Ok(name)
}

impl<B: AsRef<[u8]>> Directory<B> {
    /// Writes the whole payload of `entry` to `writer`.
    ///
    /// Returns the number of bytes written.
    pub fn extract_to<W: Write>(&self, entry: &Entry, writer: &mut W) -> Result<u64> {
        let data = self.data(entry)?;
        writer.write_all(data)?;
        Ok(data.len() as u64)
    }

    /// Extracts the entry called `name` into the file at `path`.
    pub fn extract_file(&self, name: &str, path: impl AsRef<Path>) -> Result<()> {
        let entry = self
            .find_by_name(name)
            .ok_or_else(|| RomdirError::FileNotFound(name.to_string()))?;
        self.extract_entry(entry, path.as_ref())
    }

    /// Extracts `entry` into the file at `path`, truncating any existing file.
    pub fn extract_entry(&self, entry: &Entry, path: &Path) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        let written = self.extract_to(entry, &mut out)?;
        out.flush()?;
        debug!("extracted {} ({} bytes) to {}", entry.name, written, path.display());
        Ok(())
    }

    /// Path that [`extract_all`](Self::extract_all) uses for `entry` under `dir`.
    pub fn output_path(&self, entry: &Entry, dir: impl AsRef<Path>) -> Result<PathBuf> {
        Ok(dir.as_ref().join(host_file_name(&entry.name)?))
    }

    /// Extracts every entry into `dir`, one file per entry named after it.
    ///
    /// `dir` is created if missing. Stops at the first failure and returns the
    /// number of files written otherwise.
    pub fn extract_all(&self, dir: impl AsRef<Path>) -> Result<usize> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let mut count = 0;
        for entry in self.entries() {
            let path = self.output_path(entry, dir)?;
            self.extract_entry(entry, &path)?;
            count += 1;
        }

        info!("extracted {} entries to {}", count, dir.display());
        Ok(count)
    }
}
