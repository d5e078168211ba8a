// SPDX-License-Identifier: MIT

use alloc::vec;
use alloc::vec::Vec;

use mvio::{MvIO, MvIOExt, MvIOResult};
use zerocopy::IntoBytes;

use crate::core::{FsParsingError, FsParsingResult};
use crate::fs::mvfs::{
    constant::*,
    directory::MvfsRootDir,
    meta::MvfsMeta,
    types::{MvfsInode, MvfsSuperblock},
};

/// Whole MVFS image decoded into owned values.
///
/// Loaded from and stored back to an [`MvIO`] in one pass; every mutation
/// happens in memory in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MvfsImage {
    pub meta: MvfsMeta,
    pub superblock: MvfsSuperblock,
    pub inode_bitmap: Vec<u8>,
    pub data_bitmap: Vec<u8>,
    /// Every slot of the inode table, index = inode number - 1.
    pub inodes: Vec<MvfsInode>,
    pub data_region: Vec<u8>,
}

impl MvfsImage {
    /// Reads and validates an image. The superblock checksum is not verified
    /// here; that is the checker's job.
    pub fn load<IO: MvIO + ?Sized>(io: &mut IO) -> FsParsingResult<Self> {
        let mut block = vec![0u8; MVFS_BLOCK_SIZE];
        io.read_block(MVFS_SUPERBLOCK_BLOCK, MVFS_BLOCK_SIZE, &mut block)?;
        let superblock = MvfsSuperblock::decode(&block)?;
        let meta = MvfsMeta::from_superblock(&superblock)?;

        let mut inode_bitmap = vec![0u8; MVFS_BLOCK_SIZE];
        io.read_block(meta.inode_bitmap_start, MVFS_BLOCK_SIZE, &mut inode_bitmap)?;

        let mut data_bitmap = vec![0u8; MVFS_BLOCK_SIZE];
        io.read_block(meta.data_bitmap_start, MVFS_BLOCK_SIZE, &mut data_bitmap)?;

        let mut table = vec![0u8; meta.inode_table_blocks as usize * MVFS_BLOCK_SIZE];
        io.read_block(meta.inode_table_start, MVFS_BLOCK_SIZE, &mut table)?;
        let inodes = table
            .chunks_exact(MVFS_INODE_SIZE)
            .map(MvfsInode::decode)
            .collect::<FsParsingResult<Vec<_>>>()?;

        let mut data_region = vec![0u8; meta.data_region_bytes()];
        io.read_block(meta.data_region_start, MVFS_BLOCK_SIZE, &mut data_region)?;

        Ok(Self {
            meta,
            superblock,
            inode_bitmap,
            data_bitmap,
            inodes,
            data_region,
        })
    }

    /// Writes superblock, bitmaps, inode table and data region, in that order.
    pub fn store<IO: MvIO + ?Sized>(&self, io: &mut IO) -> MvIOResult {
        io.write_block(
            MVFS_SUPERBLOCK_BLOCK,
            MVFS_BLOCK_SIZE,
            &self.superblock.to_block(),
        )?;
        io.write_block(self.meta.inode_bitmap_start, MVFS_BLOCK_SIZE, &self.inode_bitmap)?;
        io.write_block(self.meta.data_bitmap_start, MVFS_BLOCK_SIZE, &self.data_bitmap)?;
        io.write_block(
            self.meta.inode_table_start,
            MVFS_BLOCK_SIZE,
            self.inodes.as_slice().as_bytes(),
        )?;
        io.write_block(self.meta.data_region_start, MVFS_BLOCK_SIZE, &self.data_region)?;
        io.flush()
    }

    /// Serializes the image into a fresh buffer.
    pub fn to_bytes(&self) -> MvIOResult<Vec<u8>> {
        let mut buf = vec![0u8; self.meta.image_bytes()];
        self.store(&mut mvio::MemMvIO::new(&mut buf))?;
        Ok(buf)
    }

    /// Inode number `ino` (1-based).
    pub fn inode(&self, ino: u32) -> Option<&MvfsInode> {
        self.inodes.get((ino as usize).checked_sub(1)?)
    }

    pub fn inode_mut(&mut self, ino: u32) -> Option<&mut MvfsInode> {
        self.inodes.get_mut((ino as usize).checked_sub(1)?)
    }

    pub fn root_inode(&self) -> FsParsingResult<&MvfsInode> {
        self.inode(MVFS_ROOT_INODE)
            .ok_or(FsParsingError::Invalid("missing root inode"))
    }

    /// Contents of absolute block `block`, if it lies in the data region.
    pub fn data_block(&self, block: u32) -> Option<&[u8]> {
        let range = self.block_range(block)?;
        self.data_region.get(range)
    }

    pub fn data_block_mut(&mut self, block: u32) -> Option<&mut [u8]> {
        let range = self.block_range(block)?;
        self.data_region.get_mut(range)
    }

    fn block_range(&self, block: u32) -> Option<core::ops::Range<usize>> {
        let index = (block as u64).checked_sub(self.meta.data_region_start)?;
        if index >= self.meta.data_region_blocks {
            return None;
        }
        let start = index as usize * MVFS_BLOCK_SIZE;
        Some(start..start + MVFS_BLOCK_SIZE)
    }

    /// Decodes the root directory through the root inode's first pointer.
    pub fn root_dir(&self) -> FsParsingResult<MvfsRootDir> {
        let root = self.root_inode()?;
        let block = self
            .data_block(root.direct[0].get())
            .ok_or(FsParsingError::Invalid("root directory block outside data region"))?;
        MvfsRootDir::decode(block, root.size_bytes.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::FsFormatter;
    use crate::fs::mvfs::formatter::MvfsFormatter;
    use mvio::MemMvIO;

    fn formatted(size_kib: u32, inodes: u32) -> Vec<u8> {
        let meta = MvfsMeta::new(size_kib, inodes).unwrap();
        let mut buf = vec![0u8; meta.image_bytes()];
        let mut io = MemMvIO::new(&mut buf);
        MvfsFormatter::new(&mut io, &meta)
            .with_timestamp(1_000)
            .format(true)
            .unwrap();
        buf
    }

    #[test]
    fn test_load_store_is_byte_identical() {
        let mut buf = formatted(200, 300);
        let image = MvfsImage::load(&mut MemMvIO::new(&mut buf)).unwrap();
        assert_eq!(image.inodes.len(), image.meta.inode_slots());
        assert_eq!(image.to_bytes().unwrap(), buf);
    }

    #[test]
    fn test_accessors() {
        let mut buf = formatted(180, 128);
        let image = MvfsImage::load(&mut MemMvIO::new(&mut buf)).unwrap();

        assert!(image.root_inode().unwrap().is_dir());
        assert!(image.inode(0).is_none());
        assert!(image.inode(2).unwrap().is_unused());
        assert!(image.data_block(6).is_none());
        assert!(image.data_block(45).is_none());
        assert_eq!(image.data_block(7).map(|b| b.len()), Some(4096));

        let dir = image.root_dir().unwrap();
        assert_eq!(dir.size_bytes(), 128);
        assert_eq!(dir.entries().count(), 2);
    }

    #[test]
    fn test_load_rejects_foreign_data() {
        let mut buf = vec![0xAAu8; 180 * 1024];
        let err = MvfsImage::load(&mut MemMvIO::new(&mut buf)).unwrap_err();
        assert_eq!(err, FsParsingError::BadMagic(0xAAAA_AAAA));

        let mut short = formatted(180, 128);
        short.truncate(20 * 4096);
        let err = MvfsImage::load(&mut MemMvIO::new(&mut short)).unwrap_err();
        assert_eq!(err, FsParsingError::IO(mvio::MvIOError::OutOfBounds));
    }

    #[test]
    fn test_load_rejects_huge_inode_table_before_reading() {
        use zerocopy::byteorder::U64;

        let mut buf = formatted(180, 128);
        let mut sb = MvfsSuperblock::decode(&buf[..MVFS_BLOCK_SIZE]).unwrap();
        let blocks = 1u64 << 36;
        sb.inode_table_blocks = U64::new(blocks);
        sb.data_region_start = U64::new(MVFS_INODE_TABLE_START + blocks);
        sb.total_blocks = U64::new(MVFS_INODE_TABLE_START + blocks + 38);
        sb.finalize_checksum();
        buf[..MVFS_BLOCK_SIZE].copy_from_slice(&sb.to_block());

        let err = MvfsImage::load(&mut MemMvIO::new(&mut buf)).unwrap_err();
        assert!(matches!(err, FsParsingError::Invalid(_)));
    }
}
