// SPDX-License-Identifier: MIT

use alloc::string::String;
use alloc::vec::Vec;

use mvio::MvIO;

pub use crate::core::resolver::*;

use crate::fs::mvfs::{attr::MvfsFileType, image::MvfsImage};

/// One live root directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MvfsListing {
    pub name: String,
    pub inode: u32,
    pub file_type: Option<MvfsFileType>,
    pub size: u64,
}

/// Read-only view of an image: root listing and file read-back.
#[derive(Debug, Clone)]
pub struct MvfsResolver {
    image: MvfsImage,
}

impl MvfsResolver {
    pub fn new(image: MvfsImage) -> Self {
        Self { image }
    }

    pub fn from_io<IO: MvIO + ?Sized>(io: &mut IO) -> FsResolverResult<Self> {
        Ok(Self::new(MvfsImage::load(io)?))
    }

    pub fn image(&self) -> &MvfsImage {
        &self.image
    }
}

impl From<MvfsImage> for MvfsResolver {
    fn from(image: MvfsImage) -> Self {
        Self::new(image)
    }
}

impl FsResolver for MvfsResolver {
    type Entry = MvfsListing;

    fn list_root(&self) -> FsResolverResult<Vec<MvfsListing>> {
        let dir = self.image.root_dir()?;
        Ok(dir
            .entries()
            .map(|entry| {
                let inode = entry.inode_no.get();
                MvfsListing {
                    name: String::from_utf8_lossy(entry.name_bytes()).into_owned(),
                    inode,
                    file_type: entry.kind(),
                    size: self
                        .image
                        .inode(inode)
                        .map_or(0, |i| i.size_bytes.get()),
                }
            })
            .collect())
    }

    fn read_file(&self, name: &str) -> FsResolverResult<Vec<u8>> {
        let dir = self.image.root_dir()?;
        let entry = dir.find(name).ok_or(FsResolverError::NotFound)?;
        let inode = self
            .image
            .inode(entry.inode_no.get())
            .ok_or(FsResolverError::Invalid("entry points outside the inode table"))?;
        if !inode.is_file() {
            return Err(FsResolverError::Invalid("not a regular file"));
        }

        let size = inode.size_bytes.get() as usize;
        let mut out = Vec::with_capacity(size);
        for block in inode.direct_blocks() {
            let data = self
                .image
                .data_block(block)
                .ok_or(FsResolverError::Invalid("file block outside the data region"))?;
            let take = (size - out.len()).min(data.len());
            out.extend_from_slice(&data[..take]);
        }
        if out.len() != size {
            return Err(FsResolverError::Invalid("file size exceeds its blocks"));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::{FsFormatter, FsInjector};
    use crate::fs::mvfs::{formatter::MvfsFormatter, injector::MvfsInjector, meta::MvfsMeta};
    use mvio::MemMvIO;

    fn resolver_with(files: &[(&str, &[u8])]) -> MvfsResolver {
        let meta = MvfsMeta::new(180, 128).unwrap();
        let mut buf = vec![0u8; meta.image_bytes()];
        let mut io = MemMvIO::new(&mut buf);
        MvfsFormatter::new(&mut io, &meta).format(true).unwrap();
        let mut image = MvfsImage::load(&mut io).unwrap();
        let mut injector = MvfsInjector::new(&mut image);
        for (name, content) in files {
            injector.write_file(name, content).unwrap();
        }
        image.into()
    }

    #[test]
    fn test_list_root() {
        let resolver = resolver_with(&[("one", b"1"), ("two", b"22")]);
        let listing: Vec<(String, u32, u64)> = resolver
            .list_root()
            .unwrap()
            .into_iter()
            .map(|l| (l.name, l.inode, l.size))
            .collect();
        let expected: Vec<(String, u32, u64)> = vec![
            (String::from("."), 1, 256),
            (String::from(".."), 1, 256),
            (String::from("one"), 2, 1),
            (String::from("two"), 3, 2),
        ];
        assert_eq!(listing, expected);
    }

    #[test]
    fn test_read_back() {
        let big: Vec<u8> = (0..12 * 4096u32).map(|i| (i * 7) as u8).collect();
        let resolver = resolver_with(&[("big", &big), ("empty", b"")]);
        assert_eq!(resolver.read_file("big").unwrap(), big);
        assert_eq!(resolver.read_file("empty").unwrap(), Vec::<u8>::new());
        assert_eq!(resolver.read_file("missing"), Err(FsResolverError::NotFound));
        assert!(matches!(resolver.read_file("."), Err(FsResolverError::Invalid(_))));
    }
}
