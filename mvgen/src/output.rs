// SPDX-License-Identifier: MIT

use std::path::{Path, PathBuf};

use anyhow::Context;
use mvio::prelude::*;
use tempfile::NamedTempFile;

/// Image being written next to its destination.
///
/// Nothing is visible at `dest` until [`AtomicImage::commit`]; dropping the
/// value without committing removes the temporary file.
pub struct AtomicImage {
    tmp: NamedTempFile,
    dest: PathBuf,
}

impl AtomicImage {
    /// Creates a sparse temporary file of `total_bytes` in the directory of `dest`.
    pub fn create(dest: &Path, total_bytes: u64) -> anyhow::Result<Self> {
        let dir = match dest.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("cannot create temporary file in {}", dir.display()))?;
        tmp.as_file()
            .set_len(total_bytes)
            .context("cannot size temporary image")?;
        crate::log_verbose!("staging image in {}", tmp.path().display());
        Ok(Self {
            tmp,
            dest: dest.to_path_buf(),
        })
    }

    pub fn as_io(&mut self) -> StdMvIO<'_, std::fs::File> {
        StdMvIO::new(self.tmp.as_file_mut())
    }

    /// Flushes to disk and renames over the destination.
    pub fn commit(self) -> anyhow::Result<()> {
        self.tmp
            .as_file()
            .sync_all()
            .context("cannot sync temporary image")?;
        let dest = self.dest;
        self.tmp
            .persist(&dest)
            .map_err(|e| e.error)
            .with_context(|| format!("cannot write {}", dest.display()))?;
        Ok(())
    }
}
