// SPDX-License-Identifier: MIT

use mvio::{MvIO, MvIOExt, MvIOStructExt};

pub use crate::core::formatter::*;

use crate::core::time_utils::now_epoch;
use crate::fs::mvfs::{constant::*, directory::MvfsRootDir, meta::MvfsMeta, types::*};

/// MvfsFormatter:
/// - Writes a brand-new image: superblock, bitmaps, inode table with the
///   root inode, root directory block holding "." and "..".
/// - Output depends only on the layout and the timestamp.
/// - A quick format leaves the rest of the data region untouched.
pub struct MvfsFormatter<'a, IO: MvIO + ?Sized> {
    io: &'a mut IO,
    meta: &'a MvfsMeta,
    timestamp: u64,
}

impl<'a, IO: MvIO + ?Sized> MvfsFormatter<'a, IO> {
    pub fn new(io: &'a mut IO, meta: &'a MvfsMeta) -> Self {
        Self {
            io,
            meta,
            timestamp: now_epoch(),
        }
    }

    /// Fixes every timestamp written by this formatter.
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    fn write_superblock(&mut self) -> FsFormatterResult {
        let mut sb = MvfsSuperblock::from_meta(self.meta, self.timestamp);
        sb.finalize_checksum();
        self.io.zero_fill(0, MVFS_BLOCK_SIZE)?;
        self.io.write_struct(0, &sb)?;
        Ok(())
    }

    fn write_bitmaps(&mut self) -> FsFormatterResult {
        // Bit 0: root inode / root directory block
        for start in [self.meta.inode_bitmap_start, self.meta.data_bitmap_start] {
            let offset = self.meta.block_offset(start);
            self.io.zero_fill(offset, MVFS_BLOCK_SIZE)?;
            self.io.write_u8_at(offset, 0x01)?;
        }
        Ok(())
    }

    fn write_inode_table(&mut self) -> FsFormatterResult {
        let root = MvfsInode::new_root_dir(self.meta.root_dir_block() as u32, self.timestamp);

        let table = self.meta.inode_table_blocks as usize * MVFS_BLOCK_SIZE;
        self.io
            .zero_fill(self.meta.block_offset(self.meta.inode_table_start), table)?;
        self.io
            .write_struct(self.meta.inode_offset(MVFS_ROOT_INODE), &root)?;
        Ok(())
    }

    fn write_root_dir(&mut self) -> FsFormatterResult {
        let mut block = [0u8; MVFS_BLOCK_SIZE];
        MvfsRootDir::new().encode(&mut block);
        self.io
            .write_block(self.meta.root_dir_block(), MVFS_BLOCK_SIZE, &block)?;
        Ok(())
    }

    fn zero_data_region(&mut self) -> FsFormatterResult {
        let first = self.meta.root_dir_block() + 1;
        let len = (self.meta.data_region_blocks as usize - 1) * MVFS_BLOCK_SIZE;
        self.io.zero_fill(self.meta.block_offset(first), len)?;
        Ok(())
    }
}

impl<'a, IO: MvIO + ?Sized> FsFormatter for MvfsFormatter<'a, IO> {
    fn format(&mut self, full_format: bool) -> FsFormatterResult {
        self.write_superblock()?;
        self.write_bitmaps()?;
        self.write_inode_table()?;
        self.write_root_dir()?;
        if full_format {
            self.zero_data_region()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> FsFormatterResult {
        self.io.flush()?;
        Ok(())
    }
}
