// SPDX-License-Identifier: MIT

// === Superblock ===

pub const MVFS_MAGIC: u32 = 0x4D56_5346;
pub const MVFS_VERSION: u32 = 1;

// Encoded superblock length; the rest of block 0 is zero padding
pub const MVFS_SUPERBLOCK_SIZE: usize = 116;
pub const MVFS_SUPERBLOCK_BLOCK: u64 = 0;

// CRC covers block 0 minus its trailing 4 bytes
pub const MVFS_SUPERBLOCK_CRC_LEN: usize = MVFS_BLOCK_SIZE - 4;
pub const MVFS_SUPERBLOCK_CRC_OFFSET: usize = 112;

// === Blocks ===

pub const MVFS_BLOCK_SIZE: usize = 4096;

// === Regions ===

pub const MVFS_INODE_BITMAP_START: u64 = 1;
pub const MVFS_DATA_BITMAP_START: u64 = 2;
pub const MVFS_INODE_TABLE_START: u64 = 3;
pub const MVFS_BITMAP_BLOCKS: u64 = 1;

// One bitmap block tracks this many units
pub const MVFS_BITMAP_BITS: u64 = (MVFS_BLOCK_SIZE * 8) as u64;

// === Inode ===

pub const MVFS_INODE_SIZE: usize = 128;
pub const MVFS_INODES_PER_BLOCK: usize = MVFS_BLOCK_SIZE / MVFS_INODE_SIZE;
pub const MVFS_INODE_CRC_LEN: usize = 120;
pub const MVFS_ROOT_INODE: u32 = 1;
pub const MVFS_DIRECT_MAX: usize = 12;
pub const MVFS_MAX_FILE_SIZE: u64 = (MVFS_DIRECT_MAX * MVFS_BLOCK_SIZE) as u64;

pub const MVFS_ROOT_DIR_LINKS: u16 = 2;
pub const MVFS_FILE_LINKS: u16 = 1;

// === Directory entries ===

pub const MVFS_DIRENT_SIZE: usize = 64;
pub const MVFS_DIRENTS_PER_BLOCK: usize = MVFS_BLOCK_SIZE / MVFS_DIRENT_SIZE;
pub const MVFS_NAME_FIELD_LEN: usize = 58;
// Name field keeps at least one NUL terminator
pub const MVFS_NAME_MAX: usize = MVFS_NAME_FIELD_LEN - 1;
pub const MVFS_DIRENT_CSUM_OFFSET: usize = 63;

// === Format parameters ===

pub const MVFS_MIN_SIZE_KIB: u32 = 180;
pub const MVFS_MAX_SIZE_KIB: u32 = 4096;
pub const MVFS_SIZE_ALIGN_KIB: u32 = 4;
pub const MVFS_MIN_INODES: u32 = 128;
pub const MVFS_MAX_INODES: u32 = 512;

// Upper bounds accepted when reading an existing image
pub const MVFS_MAX_TOTAL_BLOCKS: u64 = MVFS_MAX_SIZE_KIB as u64 * 1024 / MVFS_BLOCK_SIZE as u64;
pub const MVFS_MAX_INODE_TABLE_BLOCKS: u64 =
    (MVFS_MAX_INODES as u64 * MVFS_INODE_SIZE as u64).div_ceil(MVFS_BLOCK_SIZE as u64);
