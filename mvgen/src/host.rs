// SPDX-License-Identifier: MIT

use std::io::Read;
use std::path::Path;

use anyhow::{Context, bail};
use mvfs::mvfs::{FsInjectorError, MVFS_BLOCK_SIZE, MVFS_MAX_FILE_SIZE, MVFS_MAX_TOTAL_BLOCKS};

/// Largest image the tools will load.
pub const MAX_IMAGE_BYTES: u64 = MVFS_MAX_TOTAL_BLOCKS * MVFS_BLOCK_SIZE as u64;

/// Reads at most `limit` bytes; a file that grew past it since `stat` is rejected.
fn read_bounded(path: &Path, limit: u64) -> anyhow::Result<Vec<u8>> {
    let file =
        std::fs::File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let mut content = Vec::new();
    file.take(limit + 1)
        .read_to_end(&mut content)
        .with_context(|| format!("cannot read {}", path.display()))?;
    if content.len() as u64 > limit {
        bail!("{} grew beyond {} bytes while reading", path.display(), limit);
    }
    Ok(content)
}

/// Regular host file to be added to an image.
#[derive(Debug)]
pub struct HostFile {
    /// Base name, used as the directory entry name.
    pub name: String,
    pub content: Vec<u8>,
}

impl HostFile {
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let md = std::fs::metadata(path)
            .with_context(|| format!("file not found: {}", path.display()))?;
        if !md.is_file() {
            bail!("not a regular file: {}", path.display());
        }

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("no usable file name in {}", path.display()))?
            .to_string();

        if md.len() > MVFS_MAX_FILE_SIZE {
            bail!(
                "{}: {} ({} bytes, limit {})",
                path.display(),
                FsInjectorError::FileTooLarge,
                md.len(),
                MVFS_MAX_FILE_SIZE
            );
        }

        let content = read_bounded(path, MVFS_MAX_FILE_SIZE)?;
        crate::log_verbose!(
            "read {} ({})",
            name,
            crate::utils::pretty_bytes(content.len() as u64)
        );

        Ok(Self { name, content })
    }
}

/// Reads a whole image file into memory.
pub fn read_image(path: &Path) -> anyhow::Result<Vec<u8>> {
    let md = std::fs::metadata(path)
        .with_context(|| format!("image not found: {}", path.display()))?;
    if !md.is_file() {
        bail!("not a regular file: {}", path.display());
    }
    if md.len() > MAX_IMAGE_BYTES {
        bail!(
            "{} is {} bytes, larger than any MVFS image ({})",
            path.display(),
            md.len(),
            MAX_IMAGE_BYTES
        );
    }
    read_bounded(path, MAX_IMAGE_BYTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.txt");
        std::fs::write(&path, b"hi").unwrap();

        let f = HostFile::read(&path).unwrap();
        assert_eq!(f.name, "hello.txt");
        assert_eq!(f.content, b"hi");
    }

    #[test]
    fn test_missing_and_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(HostFile::read(&dir.path().join("missing")).is_err());
        assert!(HostFile::read(dir.path()).is_err());
        assert!(read_image(dir.path()).is_err());
    }

    #[test]
    fn test_oversized_file_rejected_from_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.bin");
        let f = std::fs::File::create(&path).unwrap();
        f.set_len(8 << 30).unwrap();

        let err = HostFile::read(&path).unwrap_err();
        assert!(format!("{err:#}").contains("too large"));
        assert!(read_image(&path).is_err());
    }

    #[test]
    fn test_size_limits_are_inclusive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("max.bin");
        std::fs::File::create(&path)
            .unwrap()
            .set_len(MVFS_MAX_FILE_SIZE)
            .unwrap();
        assert_eq!(HostFile::read(&path).unwrap().content.len() as u64, MVFS_MAX_FILE_SIZE);

        std::fs::File::create(&path)
            .unwrap()
            .set_len(MVFS_MAX_FILE_SIZE + 1)
            .unwrap();
        assert!(HostFile::read(&path).is_err());
    }
}
