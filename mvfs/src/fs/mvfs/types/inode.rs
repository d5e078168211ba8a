// SPDX-License-Identifier: MIT
//! MVFS inode record

use zerocopy::byteorder::{LittleEndian, U16, U32, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::core::{FsParsingError, FsParsingResult, checksum_utils::crc32};
use crate::fs::mvfs::{attr::MvfsMode, constant::*};

/// On-disk inode (128 bytes).
///
/// Inode `n` lives in slot `n - 1` of the inode table. Direct pointers are
/// absolute block indices in the image, 0 meaning unused.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable)]
pub struct MvfsInode {
    pub mode: U16<LittleEndian>,
    pub links: U16<LittleEndian>,
    pub uid: U32<LittleEndian>,
    pub gid: U32<LittleEndian>,
    pub size_bytes: U64<LittleEndian>,
    pub atime: U64<LittleEndian>,
    pub mtime: U64<LittleEndian>,
    pub ctime: U64<LittleEndian>,
    pub direct: [U32<LittleEndian>; MVFS_DIRECT_MAX],
    pub reserved_0: U32<LittleEndian>,
    pub reserved_1: U32<LittleEndian>,
    pub reserved_2: U32<LittleEndian>,
    pub proj_id: U32<LittleEndian>,
    pub uid16_gid16: U32<LittleEndian>,
    pub xattr_ptr: U64<LittleEndian>,
    /// Low 32 bits: CRC-32 of bytes `0..120`. High 32 bits: zero.
    pub inode_crc: U64<LittleEndian>,
}

const _: () = assert!(core::mem::size_of::<MvfsInode>() == MVFS_INODE_SIZE);

impl MvfsInode {
    /// Root directory inode holding "." and "..", data in `root_block`.
    pub fn new_root_dir(root_block: u32, timestamp: u64) -> Self {
        let mut inode = Self::with_mode(MvfsMode::DIR, MVFS_ROOT_DIR_LINKS, timestamp);
        inode.size_bytes = U64::new(2 * MVFS_DIRENT_SIZE as u64);
        inode.direct[0] = U32::new(root_block);
        inode.finalize_checksum();
        inode
    }

    /// Regular file inode of `size` bytes stored in `blocks` (absolute indices).
    ///
    /// At most [`MVFS_DIRECT_MAX`] blocks are recorded.
    pub fn new_file(size: u64, blocks: &[u32], timestamp: u64) -> Self {
        let mut inode = Self::with_mode(MvfsMode::REGULAR, MVFS_FILE_LINKS, timestamp);
        inode.size_bytes = U64::new(size);
        for (slot, &block) in inode.direct.iter_mut().zip(blocks) {
            *slot = U32::new(block);
        }
        inode.finalize_checksum();
        inode
    }

    fn with_mode(mode: MvfsMode, links: u16, timestamp: u64) -> Self {
        Self {
            mode: U16::new(mode.bits()),
            links: U16::new(links),
            atime: U64::new(timestamp),
            mtime: U64::new(timestamp),
            ctime: U64::new(timestamp),
            ..Default::default()
        }
    }

    /// Decodes one 128-byte inode slot.
    pub fn decode(bytes: &[u8]) -> FsParsingResult<Self> {
        Self::read_from_bytes(bytes).map_err(|_| FsParsingError::Invalid("inode slot size"))
    }

    pub fn compute_checksum(&self) -> u32 {
        crc32(&self.as_bytes()[..MVFS_INODE_CRC_LEN])
    }

    /// Must run after every other field has its final value.
    pub fn finalize_checksum(&mut self) {
        self.inode_crc = U64::new(self.compute_checksum() as u64);
    }

    pub fn verify_checksum(&self) -> bool {
        self.inode_crc.get() == self.compute_checksum() as u64
    }

    /// Updates mtime/ctime and refreshes the checksum.
    pub fn touch(&mut self, timestamp: u64) {
        self.mtime = U64::new(timestamp);
        self.ctime = U64::new(timestamp);
        self.finalize_checksum();
    }

    #[inline]
    pub fn mode(&self) -> MvfsMode {
        MvfsMode::from_bits_retain(self.mode.get())
    }

    pub fn is_dir(&self) -> bool {
        self.mode() == MvfsMode::DIR
    }

    pub fn is_file(&self) -> bool {
        self.mode() == MvfsMode::REGULAR
    }

    /// An unallocated slot is entirely zero.
    pub fn is_unused(&self) -> bool {
        self.as_bytes().iter().all(|&b| b == 0)
    }

    /// Blocks needed to hold `size_bytes`.
    pub fn block_count(&self) -> usize {
        self.size_bytes.get().div_ceil(MVFS_BLOCK_SIZE as u64) as usize
    }

    /// Direct pointers in use, in file order.
    pub fn direct_blocks(&self) -> impl Iterator<Item = u32> + '_ {
        self.direct
            .iter()
            .take(self.block_count().min(MVFS_DIRECT_MAX))
            .map(|b| b.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_dir_inode() {
        let root = MvfsInode::new_root_dir(7, 42);
        assert!(root.is_dir());
        assert_eq!(root.links.get(), 2);
        assert_eq!(root.size_bytes.get(), 128);
        assert_eq!(root.direct[0].get(), 7);
        assert_eq!(root.mtime.get(), 42);
        assert!(root.verify_checksum());
        assert_eq!(root.inode_crc.get() >> 32, 0);
    }

    #[test]
    fn test_file_inode_layout() {
        let inode = MvfsInode::new_file(5000, &[8, 9], 42);
        let bytes = inode.as_bytes();

        assert_eq!(&bytes[0..2], &0o100000u16.to_le_bytes());
        assert_eq!(&bytes[2..4], &1u16.to_le_bytes());
        assert_eq!(&bytes[12..20], &5000u64.to_le_bytes());
        assert_eq!(&bytes[44..48], &8u32.to_le_bytes());
        assert_eq!(&bytes[48..52], &9u32.to_le_bytes());
        assert_eq!(&bytes[120..124], &crc32(&bytes[..120]).to_le_bytes());
        assert_eq!(&bytes[124..128], &[0; 4]);

        assert!(inode.is_file());
        assert_eq!(inode.block_count(), 2);
        assert_eq!(inode.direct_blocks().collect::<Vec<_>>(), vec![8, 9]);
    }

    #[test]
    fn test_checksum_tracks_changes() {
        let mut inode = MvfsInode::new_file(10, &[20], 1);
        inode.links = U16::new(3);
        assert!(!inode.verify_checksum());

        inode.touch(2);
        assert!(inode.verify_checksum());
        assert_eq!(inode.ctime.get(), 2);
        assert_eq!(inode.atime.get(), 1);
    }

    #[test]
    fn test_empty_file_and_unused_slot() {
        let empty = MvfsInode::new_file(0, &[], 5);
        assert_eq!(empty.block_count(), 0);
        assert_eq!(empty.direct_blocks().count(), 0);
        assert!(!empty.is_unused());

        let slot = MvfsInode::decode(&[0u8; 128]).unwrap();
        assert!(slot.is_unused());
        assert!(MvfsInode::decode(&[0u8; 64]).is_err());
    }
}
