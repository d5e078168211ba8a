// SPDX-License-Identifier: MIT
//! MVFS directory entry

use zerocopy::byteorder::{LittleEndian, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::core::{FsInjectorError, FsInjectorResult, FsParsingError, FsParsingResult};
use crate::core::checksum_utils::xor8;
use crate::fs::mvfs::{attr::MvfsFileType, constant::*};

/// On-disk directory entry (64 bytes). `inode_no == 0` marks a free slot.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable)]
pub struct MvfsDirEntry {
    pub inode_no: U32<LittleEndian>,
    pub file_type: u8,
    /// NUL padded, at most 57 significant bytes.
    pub name: [u8; MVFS_NAME_FIELD_LEN],
    /// XOR of bytes `0..63`.
    pub checksum: u8,
}

const _: () = assert!(core::mem::size_of::<MvfsDirEntry>() == MVFS_DIRENT_SIZE);

impl Default for MvfsDirEntry {
    fn default() -> Self {
        Self {
            inode_no: U32::ZERO,
            file_type: 0,
            name: [0; MVFS_NAME_FIELD_LEN],
            checksum: 0,
        }
    }
}

impl MvfsDirEntry {
    /// Builds a finalized entry.
    pub fn new(inode_no: u32, file_type: MvfsFileType, name: &str) -> FsInjectorResult<Self> {
        let raw = name.as_bytes();
        if raw.len() > MVFS_NAME_MAX {
            return Err(FsInjectorError::NameTooLong);
        }

        let mut entry = Self {
            inode_no: U32::new(inode_no),
            file_type: file_type.as_raw(),
            ..Default::default()
        };
        entry.name[..raw.len()].copy_from_slice(raw);
        entry.finalize_checksum();
        Ok(entry)
    }

    pub fn dot() -> Self {
        Self::dir_link(b".")
    }

    pub fn dotdot() -> Self {
        Self::dir_link(b"..")
    }

    fn dir_link(name: &[u8]) -> Self {
        let mut entry = Self {
            inode_no: U32::new(MVFS_ROOT_INODE),
            file_type: MvfsFileType::Dir.as_raw(),
            ..Default::default()
        };
        entry.name[..name.len()].copy_from_slice(name);
        entry.finalize_checksum();
        entry
    }

    pub fn decode(bytes: &[u8]) -> FsParsingResult<Self> {
        Self::read_from_bytes(bytes).map_err(|_| FsParsingError::Invalid("dirent slot size"))
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.inode_no.get() == 0
    }

    pub fn kind(&self) -> Option<MvfsFileType> {
        MvfsFileType::from_raw(self.file_type)
    }

    /// Name bytes up to the first NUL.
    pub fn name_bytes(&self) -> &[u8] {
        let end = self
            .name
            .iter()
            .position(|&c| c == 0)
            .unwrap_or(self.name.len());
        &self.name[..end]
    }

    pub fn name_str(&self) -> Option<&str> {
        core::str::from_utf8(self.name_bytes()).ok()
    }

    pub fn compute_checksum(&self) -> u8 {
        xor8(&self.as_bytes()[..MVFS_DIRENT_CSUM_OFFSET])
    }

    /// Must run after every other field has its final value.
    pub fn finalize_checksum(&mut self) {
        self.checksum = self.compute_checksum();
    }

    pub fn verify_checksum(&self) -> bool {
        self.checksum == self.compute_checksum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_entries() {
        let dot = MvfsDirEntry::dot();
        let dotdot = MvfsDirEntry::dotdot();
        assert_eq!(dot.inode_no.get(), 1);
        assert_eq!(dot.kind(), Some(MvfsFileType::Dir));
        assert_eq!(dot.name_bytes(), b".");
        assert_eq!(dotdot.name_bytes(), b"..");
        assert!(dot.verify_checksum() && dotdot.verify_checksum());
    }

    #[test]
    fn test_entry_layout_and_checksum() {
        let entry = MvfsDirEntry::new(2, MvfsFileType::File, "hello.txt").unwrap();
        let bytes = entry.as_bytes();

        assert_eq!(&bytes[0..4], &2u32.to_le_bytes());
        assert_eq!(bytes[4], 1);
        assert_eq!(&bytes[5..14], b"hello.txt");
        assert!(bytes[14..63].iter().all(|&b| b == 0));
        assert_eq!(bytes[63], bytes[..63].iter().fold(0, |a, b| a ^ b));
        assert_eq!(entry.name_str(), Some("hello.txt"));
    }

    #[test]
    fn test_name_limits() {
        let longest = "n".repeat(57);
        let entry = MvfsDirEntry::new(3, MvfsFileType::File, &longest).unwrap();
        assert_eq!(entry.name_bytes().len(), 57);
        assert_eq!(entry.name[57], 0);

        let too_long = "n".repeat(58);
        assert_eq!(
            MvfsDirEntry::new(3, MvfsFileType::File, &too_long),
            Err(FsInjectorError::NameTooLong)
        );
    }

    #[test]
    fn test_corrupted_byte_detected() {
        let mut entry = MvfsDirEntry::new(4, MvfsFileType::File, "a").unwrap();
        entry.name[10] = 0x55;
        assert!(!entry.verify_checksum());
        assert!(MvfsDirEntry::default().is_free());
    }
}
