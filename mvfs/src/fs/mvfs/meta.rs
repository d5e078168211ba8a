// SPDX-License-Identifier: MIT

use crate::core::{FsConfigError, FsConfigResult, FsParsingError, FsParsingResult, traits::FsMeta};
use crate::ensure;
use crate::fs::mvfs::{constant::*, types::MvfsSuperblock};

/// Region layout of an MVFS image, in blocks.
///
/// ```text
/// | sb | inode bitmap | data bitmap | inode table ... | data region ... |
///   0        1              2         3..3+itb          3+itb..total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MvfsMeta {
    pub total_blocks: u64,
    pub inode_count: u64,
    pub inode_bitmap_start: u64,
    pub inode_bitmap_blocks: u64,
    pub data_bitmap_start: u64,
    pub data_bitmap_blocks: u64,
    pub inode_table_start: u64,
    pub inode_table_blocks: u64,
    pub data_region_start: u64,
    pub data_region_blocks: u64,
}

impl MvfsMeta {
    /// Computes the layout for a `size_kib` image holding `inode_count` inodes.
    pub fn new(size_kib: u32, inode_count: u32) -> FsConfigResult<Self> {
        ensure!(
            (MVFS_MIN_SIZE_KIB..=MVFS_MAX_SIZE_KIB).contains(&size_kib),
            FsConfigError::SizeOutOfRange(size_kib)
        );
        ensure!(
            size_kib % MVFS_SIZE_ALIGN_KIB == 0,
            FsConfigError::SizeNotAligned(size_kib)
        );
        ensure!(
            (MVFS_MIN_INODES..=MVFS_MAX_INODES).contains(&inode_count),
            FsConfigError::InodesOutOfRange(inode_count)
        );

        let total_blocks = size_kib as u64 * 1024 / MVFS_BLOCK_SIZE as u64;
        let inode_count = inode_count as u64;
        let inode_table_blocks =
            (inode_count * MVFS_INODE_SIZE as u64).div_ceil(MVFS_BLOCK_SIZE as u64);
        let data_region_start = MVFS_INODE_TABLE_START + inode_table_blocks;

        ensure!(
            total_blocks > data_region_start,
            FsConfigError::LayoutTooSmall
        );

        Ok(Self {
            total_blocks,
            inode_count,
            inode_bitmap_start: MVFS_INODE_BITMAP_START,
            inode_bitmap_blocks: MVFS_BITMAP_BLOCKS,
            data_bitmap_start: MVFS_DATA_BITMAP_START,
            data_bitmap_blocks: MVFS_BITMAP_BLOCKS,
            inode_table_start: MVFS_INODE_TABLE_START,
            inode_table_blocks,
            data_region_start,
            data_region_blocks: total_blocks - data_region_start,
        })
    }

    /// Rebuilds the layout recorded in `sb`, rejecting inconsistent geometry.
    ///
    /// Size and inode bounds of [`MvfsMeta::new`] are not enforced here.
    pub fn from_superblock(sb: &MvfsSuperblock) -> FsParsingResult<Self> {
        let magic = sb.magic.get();
        ensure!(magic == MVFS_MAGIC, FsParsingError::BadMagic(magic));
        ensure!(
            sb.version.get() == MVFS_VERSION,
            FsParsingError::Invalid("unsupported version")
        );
        ensure!(
            sb.block_size.get() as usize == MVFS_BLOCK_SIZE,
            FsParsingError::Invalid("unsupported block size")
        );

        let meta = Self {
            total_blocks: sb.total_blocks.get(),
            inode_count: sb.inode_count.get(),
            inode_bitmap_start: sb.inode_bitmap_start.get(),
            inode_bitmap_blocks: sb.inode_bitmap_blocks.get(),
            data_bitmap_start: sb.data_bitmap_start.get(),
            data_bitmap_blocks: sb.data_bitmap_blocks.get(),
            inode_table_start: sb.inode_table_start.get(),
            inode_table_blocks: sb.inode_table_blocks.get(),
            data_region_start: sb.data_region_start.get(),
            data_region_blocks: sb.data_region_blocks.get(),
        };

        ensure!(
            meta.inode_bitmap_start == MVFS_INODE_BITMAP_START
                && meta.data_bitmap_start == MVFS_DATA_BITMAP_START
                && meta.inode_table_start == MVFS_INODE_TABLE_START
                && meta.inode_bitmap_blocks == MVFS_BITMAP_BLOCKS
                && meta.data_bitmap_blocks == MVFS_BITMAP_BLOCKS,
            FsParsingError::Invalid("unexpected region placement")
        );
        ensure!(
            meta.total_blocks <= MVFS_MAX_TOTAL_BLOCKS,
            FsParsingError::Invalid("image larger than the maximum size")
        );
        ensure!(
            meta.inode_table_blocks >= 1
                && meta.inode_table_blocks <= MVFS_MAX_INODE_TABLE_BLOCKS,
            FsParsingError::Invalid("inode table size out of range")
        );
        ensure!(
            meta.inode_count >= 1
                && meta.inode_count <= meta.inode_slots() as u64
                && meta.inode_count <= MVFS_BITMAP_BITS,
            FsParsingError::Invalid("inode count does not fit the inode table")
        );
        ensure!(
            meta.inode_table_start.checked_add(meta.inode_table_blocks)
                == Some(meta.data_region_start),
            FsParsingError::Invalid("data region does not follow the inode table")
        );
        ensure!(
            meta.data_region_blocks >= 1 && meta.data_region_blocks <= MVFS_BITMAP_BITS,
            FsParsingError::Invalid("data region size out of range")
        );
        ensure!(
            meta.data_region_start.checked_add(meta.data_region_blocks)
                == Some(meta.total_blocks),
            FsParsingError::Invalid("region sizes do not add up to total blocks")
        );
        ensure!(
            sb.root_inode.get() == MVFS_ROOT_INODE as u64,
            FsParsingError::Invalid("unexpected root inode")
        );

        Ok(meta)
    }

    /// Byte offset of absolute block `block`.
    #[inline]
    pub fn block_offset(&self, block: u64) -> u64 {
        block * MVFS_BLOCK_SIZE as u64
    }

    /// Inode slots in the inode table (may exceed `inode_count`).
    #[inline]
    pub fn inode_slots(&self) -> usize {
        self.inode_table_blocks as usize * MVFS_INODES_PER_BLOCK
    }

    /// Byte offset of inode number `ino` (1-based).
    pub fn inode_offset(&self, ino: u32) -> u64 {
        self.block_offset(self.inode_table_start)
            + (ino as u64).saturating_sub(1) * MVFS_INODE_SIZE as u64
    }

    /// Absolute block of data region index `index`.
    #[inline]
    pub fn data_block(&self, index: u64) -> u64 {
        self.data_region_start + index
    }

    /// Block holding the root directory entries.
    #[inline]
    pub fn root_dir_block(&self) -> u64 {
        self.data_region_start
    }

    #[inline]
    pub fn data_region_bytes(&self) -> usize {
        self.data_region_blocks as usize * MVFS_BLOCK_SIZE
    }

    #[inline]
    pub fn image_bytes(&self) -> usize {
        self.total_blocks as usize * MVFS_BLOCK_SIZE
    }
}

impl FsMeta<u64> for MvfsMeta {
    fn unit_size(&self) -> usize {
        MVFS_BLOCK_SIZE
    }

    fn unit_offset(&self, unit: u64) -> u64 {
        self.block_offset(unit)
    }

    fn root_unit(&self) -> u64 {
        self.root_dir_block()
    }

    fn first_data_unit(&self) -> u64 {
        self.data_region_start
    }

    fn last_data_unit(&self) -> u64 {
        self.total_blocks - 1
    }

    fn total_units(&self) -> usize {
        self.total_blocks as usize
    }

    fn size_bytes(&self) -> u64 {
        self.image_bytes() as u64
    }
}
