// SPDX-License-Identifier: MIT

use zerocopy::byteorder::{U16, U64};

pub use crate::core::injector::*;

use crate::core::{FsParsingError, time_utils::now_epoch, traits::FsAllocator};
use crate::fs::mvfs::{
    allocator::MvfsAllocator, attr::MvfsFileType, constant::*, image::MvfsImage, types::*,
};
use crate::{bail, ensure};

/// Adds files to the root directory of an in-memory [`MvfsImage`].
///
/// Every check (name, size, directory slot, free inode and blocks) runs
/// before the first mutation, so a failed call leaves the image untouched.
pub struct MvfsInjector<'a> {
    image: &'a mut MvfsImage,
    timestamp: u64,
}

impl<'a> MvfsInjector<'a> {
    pub fn new(image: &'a mut MvfsImage) -> Self {
        Self {
            image,
            timestamp: now_epoch(),
        }
    }

    /// Fixes every timestamp written by this injector.
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Name rules for root directory entries.
    pub fn validate_name(name: &str) -> FsInjectorResult {
        ensure!(!name.is_empty(), FsInjectorError::Invalid("empty file name"));
        ensure!(name.len() <= MVFS_NAME_MAX, FsInjectorError::NameTooLong);
        ensure!(
            !name.bytes().any(|b| b == b'/' || b == 0),
            FsInjectorError::Invalid("file name contains '/' or NUL")
        );
        ensure!(
            name != "." && name != "..",
            FsInjectorError::Invalid("reserved file name")
        );
        Ok(())
    }

    fn copy_content(&mut self, blocks: &[u32], content: &[u8]) -> FsInjectorResult {
        for (&block, chunk) in blocks.iter().zip(content.chunks(MVFS_BLOCK_SIZE)) {
            let Some(dst) = self.image.data_block_mut(block) else {
                bail!(FsInjectorError::Other("allocated block outside data region"));
            };
            dst[..chunk.len()].copy_from_slice(chunk);
            dst[chunk.len()..].fill(0);
        }
        Ok(())
    }
}

impl<'a> FsInjector for MvfsInjector<'a> {
    fn write_file(&mut self, name: &str, content: &[u8]) -> FsInjectorResult {
        Self::validate_name(name)?;

        let size = content.len() as u64;
        ensure!(size <= MVFS_MAX_FILE_SIZE, FsInjectorError::FileTooLarge);
        let blocks_needed = content.len().div_ceil(MVFS_BLOCK_SIZE);

        let mut root_dir = self.image.root_dir()?;
        ensure!(root_dir.find(name).is_none(), FsInjectorError::AlreadyExists);
        root_dir.next_slot()?;

        let entry_template = MvfsDirEntry::new(0, MvfsFileType::File, name)?;
        let root_block = self.image.root_inode()?.direct[0].get();

        // Nothing has been modified up to this point.
        let handle = {
            let image = &mut *self.image;
            let mut alloc =
                MvfsAllocator::new(&image.meta, &mut image.inode_bitmap, &mut image.data_bitmap);
            alloc.allocate_chain(blocks_needed)?
        };

        self.copy_content(&handle.blocks, content)?;

        let inode = MvfsInode::new_file(size, &handle.blocks, self.timestamp);
        *self
            .image
            .inode_mut(handle.inode)
            .ok_or(FsParsingError::Invalid("inode outside inode table"))? = inode;

        let mut entry = entry_template;
        entry.inode_no = handle.inode.into();
        entry.finalize_checksum();
        root_dir.insert(entry)?;

        let block = self
            .image
            .data_block_mut(root_block)
            .ok_or(FsParsingError::Invalid("root directory block outside data region"))?;
        root_dir.encode(block);

        let ts = self.timestamp;
        let root = self
            .image
            .inode_mut(MVFS_ROOT_INODE)
            .ok_or(FsParsingError::Invalid("root inode outside inode table"))?;
        root.links = U16::new(root.links.get().saturating_add(1));
        root.size_bytes = U64::new(root_dir.size_bytes());
        root.touch(ts);

        self.image.superblock.touch(ts);
        Ok(())
    }
}
