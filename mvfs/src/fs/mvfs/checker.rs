// SPDX-License-Identifier: MIT

use alloc::vec;

use mvio::{MvIO, MvIOExt, MvIOStructExt};

pub use crate::core::checker::*;

use crate::core::{BitmapOps, checksum_utils::crc32, traits::FsAllocator};
use crate::ensure;
use crate::fs::mvfs::{
    allocator::MvfsAllocator, attr::MvfsFileType, constant::*, image::MvfsImage, meta::MvfsMeta,
    types::*,
};

/// Counters gathered by a successful [`MvfsChecker::check_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MvfsCheckReport {
    /// Regular files in the root directory.
    pub files: usize,
    pub used_inodes: usize,
    pub used_blocks: usize,
    pub free_blocks: usize,
}

/// Structural verification of an MVFS image.
pub struct MvfsChecker<'a, IO: MvIO + ?Sized> {
    io: &'a mut IO,
}

impl<'a, IO: MvIO + ?Sized> MvfsChecker<'a, IO> {
    pub fn new(io: &'a mut IO) -> Self {
        Self { io }
    }

    /// Magic, geometry and checksum of block 0.
    ///
    /// The CRC is recomputed over the raw block, so stray bytes in the
    /// padding after the record are caught too.
    pub fn check_superblock(&mut self) -> FsCheckerResult<MvfsMeta> {
        let sb: MvfsSuperblock = self.io.read_struct(0)?;
        let meta = MvfsMeta::from_superblock(&sb)?;

        let mut block = [0u8; MVFS_BLOCK_SIZE];
        self.io
            .read_block(MVFS_SUPERBLOCK_BLOCK, MVFS_BLOCK_SIZE, &mut block)?;
        block[MVFS_SUPERBLOCK_CRC_OFFSET..MVFS_SUPERBLOCK_SIZE].fill(0);
        let stored = self.io.read_u32_at(MVFS_SUPERBLOCK_CRC_OFFSET as u64)?;
        ensure!(
            stored == crc32(&block[..MVFS_SUPERBLOCK_CRC_LEN]),
            FsCheckerError::ChecksumMismatch("superblock")
        );
        Ok(meta)
    }

    /// Reserved bit 0 must be set in both bitmaps.
    pub fn check_bitmaps(&self, image: &MvfsImage) -> FsCheckerResult {
        ensure!(
            image.inode_bitmap.get_bit(0),
            FsCheckerError::Invalid("root inode not marked in inode bitmap")
        );
        ensure!(
            image.data_bitmap.get_bit(0),
            FsCheckerError::Invalid("root directory block not marked in data bitmap")
        );
        Ok(())
    }

    /// Allocated inodes carry valid checksums; free slots are zeroed.
    pub fn check_inodes(&self, image: &MvfsImage) -> FsCheckerResult {
        let capacity = image.meta.inode_count as usize;
        for (index, inode) in image.inodes.iter().enumerate() {
            let allocated = index < capacity && image.inode_bitmap.get_bit(index);
            if !allocated {
                ensure!(
                    inode.is_unused(),
                    FsCheckerError::Invalid("unallocated inode is not zeroed")
                );
                continue;
            }
            ensure!(
                inode.verify_checksum(),
                FsCheckerError::ChecksumMismatch("inode")
            );
            ensure!(
                inode.is_dir() || inode.is_file(),
                FsCheckerError::Invalid("inode has an unknown mode")
            );
        }
        Ok(())
    }

    /// Root inode shape and every live directory entry. Returns the file count.
    pub fn check_root(&self, image: &MvfsImage) -> FsCheckerResult<usize> {
        let root = image.root_inode()?;
        ensure!(
            root.is_dir(),
            FsCheckerError::Invalid("root inode is not a directory")
        );
        ensure!(
            root.direct[0].get() as u64 == image.meta.root_dir_block(),
            FsCheckerError::Invalid("root directory is not in the first data block")
        );

        let dir = image.root_dir()?;
        let slots = dir.slots();
        ensure!(
            slots.len() >= 2
                && slots[0] == MvfsDirEntry::dot()
                && slots[1] == MvfsDirEntry::dotdot(),
            FsCheckerError::Invalid("root directory lacks \".\" and \"..\"")
        );

        let mut files = 0;
        for entry in dir.entries().skip(2) {
            ensure!(
                entry.verify_checksum(),
                FsCheckerError::ChecksumMismatch("directory entry")
            );
            ensure!(
                entry.kind() == Some(MvfsFileType::File),
                FsCheckerError::Invalid("directory entry has an unexpected type")
            );
            let ino = entry.inode_no.get();
            ensure!(
                (ino as u64) <= image.meta.inode_count
                    && image.inode_bitmap.get_bit(ino as usize - 1),
                FsCheckerError::Invalid("directory entry points to a free inode")
            );
            ensure!(
                image.inode(ino).is_some_and(|i| i.is_file()),
                FsCheckerError::Invalid("directory entry points to a non-file inode")
            );
            files += 1;
        }
        Ok(files)
    }

    /// Every data block is owned by at most one inode and marked allocated,
    /// every marked block has an owner.
    pub fn check_cross_reference(&self, image: &MvfsImage) -> FsCheckerResult {
        let meta = &image.meta;
        let mut owners = vec![0u32; meta.data_region_blocks as usize];
        owners[0] = MVFS_ROOT_INODE;

        for (index, inode) in image.inodes.iter().enumerate() {
            let ino = index as u32 + 1;
            if ino == MVFS_ROOT_INODE || inode.is_unused() || !inode.is_file() {
                continue;
            }
            ensure!(
                inode.size_bytes.get() <= MVFS_MAX_FILE_SIZE,
                FsCheckerError::Invalid("file larger than its direct pointers allow")
            );
            let used = inode.block_count();
            ensure!(
                inode.direct[used..].iter().all(|b| b.get() == 0),
                FsCheckerError::Invalid("pointer set past the end of a file")
            );
            for block in inode.direct_blocks() {
                ensure!(
                    (block as u64) > meta.root_dir_block()
                        && (block as u64) < meta.total_blocks,
                    FsCheckerError::Invalid("file block outside the data region")
                );
                let region = (block as u64 - meta.data_region_start) as usize;
                ensure!(
                    image.data_bitmap.get_bit(region),
                    FsCheckerError::Invalid("file block not marked in data bitmap")
                );
                ensure!(
                    owners[region] == 0,
                    FsCheckerError::Invalid("data block claimed by two inodes")
                );
                owners[region] = ino;
            }
        }

        let orphan = owners
            .iter()
            .enumerate()
            .any(|(region, &owner)| owner == 0 && image.data_bitmap.get_bit(region));
        ensure!(
            !orphan,
            FsCheckerError::Invalid("data bitmap marks a block no inode uses")
        );
        Ok(())
    }
}

impl<'a, IO: MvIO + ?Sized> FsChecker for MvfsChecker<'a, IO> {
    type Report = MvfsCheckReport;

    fn check_all(&mut self) -> FsCheckerResult<MvfsCheckReport> {
        self.check_superblock()?;
        let mut image = MvfsImage::load(&mut *self.io)?;

        self.check_bitmaps(&image)?;
        self.check_inodes(&image)?;
        let files = self.check_root(&image)?;
        self.check_cross_reference(&image)?;

        let meta = image.meta;
        let allocator =
            MvfsAllocator::new(&meta, &mut image.inode_bitmap, &mut image.data_bitmap);
        Ok(MvfsCheckReport {
            files,
            used_inodes: allocator.used_inodes(),
            used_blocks: allocator.used_units(),
            free_blocks: allocator.remaining_units(),
        })
    }
}
