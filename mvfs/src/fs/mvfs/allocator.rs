// SPDX-License-Identifier: MIT

use alloc::vec::Vec;

use crate::core::{
    BitmapOps,
    allocator::{FsAllocator, FsAllocatorError, FsAllocatorResult, FsHandle},
};
use crate::fs::mvfs::meta::MvfsMeta;

/// An inode number together with the absolute blocks reserved for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MvfsHandle {
    pub inode: u32,
    pub blocks: Vec<u32>,
}

impl FsHandle for MvfsHandle {}

/// First-fit allocator over the inode and data bitmaps.
///
/// Searches never mutate; [`FsAllocator::allocate_chain`] commits only once
/// every requested unit has been found.
#[derive(Debug)]
pub struct MvfsAllocator<'a> {
    meta: &'a MvfsMeta,
    inode_bitmap: &'a mut [u8],
    data_bitmap: &'a mut [u8],
}

impl<'a> MvfsAllocator<'a> {
    pub fn new(meta: &'a MvfsMeta, inode_bitmap: &'a mut [u8], data_bitmap: &'a mut [u8]) -> Self {
        Self {
            meta,
            inode_bitmap,
            data_bitmap,
        }
    }

    /// Lowest clear inode bit, skipping bit 0 (root). Returns the bit index.
    pub fn find_free_inode(&self) -> FsAllocatorResult<usize> {
        self.inode_bitmap
            .find_first_zero_in(1, self.meta.inode_count as usize)
            .ok_or(FsAllocatorError::OutOfInodes)
    }

    /// The `count` lowest clear data-region indices, ascending.
    pub fn find_free_data_blocks(&self, count: usize) -> FsAllocatorResult<Vec<usize>> {
        let found: Vec<usize> = self
            .data_bitmap
            .zeros_in(0, self.meta.data_region_blocks as usize)
            .take(count)
            .collect();
        if found.len() < count {
            return Err(FsAllocatorError::OutOfBlocks);
        }
        Ok(found)
    }

    pub fn used_inodes(&self) -> usize {
        self.inode_bitmap
            .count_ones_in_range(0, self.meta.inode_count as usize)
    }

    pub fn free_inodes(&self) -> usize {
        self.meta.inode_count as usize - self.used_inodes()
    }
}

impl<'a> FsAllocator<MvfsHandle> for MvfsAllocator<'a> {
    fn allocate_chain(&mut self, count: usize) -> FsAllocatorResult<MvfsHandle> {
        let inode_bit = self.find_free_inode()?;
        let indices = self.find_free_data_blocks(count)?;

        self.inode_bitmap.set_bit(inode_bit, true);
        for &index in &indices {
            self.data_bitmap.set_bit(index, true);
        }

        Ok(MvfsHandle {
            inode: inode_bit as u32 + 1,
            blocks: indices
                .into_iter()
                .map(|i| self.meta.data_block(i as u64) as u32)
                .collect(),
        })
    }

    fn used_units(&self) -> usize {
        self.data_bitmap
            .count_ones_in_range(0, self.meta.data_region_blocks as usize)
    }

    fn remaining_units(&self) -> usize {
        self.meta.data_region_blocks as usize - self.used_units()
    }
}
