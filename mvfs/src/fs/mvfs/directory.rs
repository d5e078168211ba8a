// SPDX-License-Identifier: MIT

use alloc::vec::Vec;

use crate::core::{FsAllocatorError, FsInjectorResult, FsParsingError, FsParsingResult};
use crate::fs::mvfs::{constant::*, types::MvfsDirEntry};
use crate::ensure;

/// Decoded root directory block.
///
/// The first `live` slots are in use by the directory (their count is
/// `root.size_bytes / 64`); a live slot whose inode number is 0 may be reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MvfsRootDir {
    slots: Vec<MvfsDirEntry>,
    live: usize,
}

impl MvfsRootDir {
    /// A fresh directory holding "." and "..".
    pub fn new() -> Self {
        let mut slots = alloc::vec![MvfsDirEntry::default(); MVFS_DIRENTS_PER_BLOCK];
        slots[0] = MvfsDirEntry::dot();
        slots[1] = MvfsDirEntry::dotdot();
        Self { slots, live: 2 }
    }

    /// Decodes `block` given the root inode's `size_bytes`.
    pub fn decode(block: &[u8], size_bytes: u64) -> FsParsingResult<Self> {
        ensure!(
            block.len() == MVFS_BLOCK_SIZE,
            FsParsingError::Invalid("directory block size")
        );
        ensure!(
            size_bytes % MVFS_DIRENT_SIZE as u64 == 0
                && size_bytes <= MVFS_BLOCK_SIZE as u64,
            FsParsingError::Corrupted
        );

        let slots = block
            .chunks_exact(MVFS_DIRENT_SIZE)
            .map(MvfsDirEntry::decode)
            .collect::<FsParsingResult<Vec<_>>>()?;

        Ok(Self {
            slots,
            live: (size_bytes / MVFS_DIRENT_SIZE as u64) as usize,
        })
    }

    /// Writes every slot into `block` (4096 bytes).
    pub fn encode(&self, block: &mut [u8]) {
        for (chunk, entry) in block.chunks_exact_mut(MVFS_DIRENT_SIZE).zip(&self.slots) {
            chunk.copy_from_slice(zerocopy::IntoBytes::as_bytes(entry));
        }
    }

    /// Directory size to record in the root inode.
    #[inline]
    pub fn size_bytes(&self) -> u64 {
        (self.live * MVFS_DIRENT_SIZE) as u64
    }

    /// Live slots, including "." and "..".
    pub fn slots(&self) -> &[MvfsDirEntry] {
        &self.slots[..self.live]
    }

    /// Occupied entries among the live slots.
    pub fn entries(&self) -> impl Iterator<Item = &MvfsDirEntry> + '_ {
        self.slots().iter().filter(|e| !e.is_free())
    }

    pub fn find(&self, name: &str) -> Option<&MvfsDirEntry> {
        self.entries().find(|e| e.name_bytes() == name.as_bytes())
    }

    /// Slot the next insertion will use: the first free live slot, else the
    /// slot right after the live ones.
    pub fn next_slot(&self) -> Result<usize, FsAllocatorError> {
        if let Some(i) = self.slots().iter().position(MvfsDirEntry::is_free) {
            return Ok(i);
        }
        if self.live < MVFS_DIRENTS_PER_BLOCK {
            return Ok(self.live);
        }
        Err(FsAllocatorError::DirectoryFull)
    }

    /// Stores `entry` at [`Self::next_slot`] and returns the slot index.
    pub fn insert(&mut self, entry: MvfsDirEntry) -> FsInjectorResult<usize> {
        let slot = self.next_slot()?;
        self.slots[slot] = entry;
        if slot == self.live {
            self.live += 1;
        }
        Ok(slot)
    }
}

impl Default for MvfsRootDir {
    fn default() -> Self {
        Self::new()
    }
}
