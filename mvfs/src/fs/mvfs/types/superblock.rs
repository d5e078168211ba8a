// SPDX-License-Identifier: MIT
//! MVFS superblock (block 0)

use zerocopy::byteorder::{LittleEndian, U32, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::core::{FsParsingError, FsParsingResult, checksum_utils::crc32_parts};
use crate::fs::mvfs::{constant::*, meta::MvfsMeta};

/// On-disk superblock, 116 bytes at the start of block 0.
///
/// The remainder of block 0 is zero padding and is covered by the checksum.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable)]
pub struct MvfsSuperblock {
    pub magic: U32<LittleEndian>,
    pub version: U32<LittleEndian>,
    pub block_size: U32<LittleEndian>,
    pub total_blocks: U64<LittleEndian>,
    pub inode_count: U64<LittleEndian>,
    pub inode_bitmap_start: U64<LittleEndian>,
    pub inode_bitmap_blocks: U64<LittleEndian>,
    pub data_bitmap_start: U64<LittleEndian>,
    pub data_bitmap_blocks: U64<LittleEndian>,
    pub inode_table_start: U64<LittleEndian>,
    pub inode_table_blocks: U64<LittleEndian>,
    pub data_region_start: U64<LittleEndian>,
    pub data_region_blocks: U64<LittleEndian>,
    pub root_inode: U64<LittleEndian>,
    pub mtime_epoch: U64<LittleEndian>,
    pub flags: U32<LittleEndian>,
    /// CRC-32 of block 0 (checksum zeroed), bytes `0..4092`.
    pub checksum: U32<LittleEndian>,
}

const _: () = assert!(core::mem::size_of::<MvfsSuperblock>() == MVFS_SUPERBLOCK_SIZE);

impl MvfsSuperblock {
    /// Builds an unfinalized superblock describing `meta`.
    pub fn from_meta(meta: &MvfsMeta, timestamp: u64) -> Self {
        Self {
            magic: U32::new(MVFS_MAGIC),
            version: U32::new(MVFS_VERSION),
            block_size: U32::new(MVFS_BLOCK_SIZE as u32),
            total_blocks: U64::new(meta.total_blocks),
            inode_count: U64::new(meta.inode_count),
            inode_bitmap_start: U64::new(meta.inode_bitmap_start),
            inode_bitmap_blocks: U64::new(meta.inode_bitmap_blocks),
            data_bitmap_start: U64::new(meta.data_bitmap_start),
            data_bitmap_blocks: U64::new(meta.data_bitmap_blocks),
            inode_table_start: U64::new(meta.inode_table_start),
            inode_table_blocks: U64::new(meta.inode_table_blocks),
            data_region_start: U64::new(meta.data_region_start),
            data_region_blocks: U64::new(meta.data_region_blocks),
            root_inode: U64::new(MVFS_ROOT_INODE as u64),
            mtime_epoch: U64::new(timestamp),
            flags: U32::ZERO,
            checksum: U32::ZERO,
        }
    }

    /// Decodes the superblock from the head of `block`.
    ///
    /// Only the length is checked here; see [`MvfsMeta::from_superblock`] for geometry.
    pub fn decode(block: &[u8]) -> FsParsingResult<Self> {
        let head = block
            .get(..MVFS_SUPERBLOCK_SIZE)
            .ok_or(FsParsingError::Invalid("superblock truncated"))?;
        Self::read_from_bytes(head).map_err(|_| FsParsingError::Corrupted)
    }

    /// Full zero-padded block 0 image of this superblock.
    pub fn to_block(&self) -> [u8; MVFS_BLOCK_SIZE] {
        let mut block = [0u8; MVFS_BLOCK_SIZE];
        block[..MVFS_SUPERBLOCK_SIZE].copy_from_slice(self.as_bytes());
        block
    }

    /// CRC of block 0 with the checksum field zeroed, minus the last 4 bytes.
    pub fn compute_checksum(&self) -> u32 {
        const PAD: [u8; MVFS_SUPERBLOCK_CRC_LEN - MVFS_SUPERBLOCK_CRC_OFFSET] =
            [0; MVFS_SUPERBLOCK_CRC_LEN - MVFS_SUPERBLOCK_CRC_OFFSET];
        crc32_parts(&[&self.as_bytes()[..MVFS_SUPERBLOCK_CRC_OFFSET], &PAD])
    }

    /// Must run after every other field has its final value.
    pub fn finalize_checksum(&mut self) {
        self.checksum = U32::new(self.compute_checksum());
    }

    pub fn verify_checksum(&self) -> bool {
        self.checksum.get() == self.compute_checksum()
    }

    /// Sets the modification time and refreshes the checksum.
    pub fn touch(&mut self, timestamp: u64) {
        self.mtime_epoch = U64::new(timestamp);
        self.finalize_checksum();
    }
}
