// SPDX-License-Identifier: MIT

bitflags::bitflags! {
    /// Inode mode bits. Only the file type is stored, never permissions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MvfsMode: u16 {
        const REGULAR = 0o100000;
        const DIR     = 0o040000;
    }
}

/// Directory entry type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MvfsFileType {
    File = 1,
    Dir = 2,
}

impl MvfsFileType {
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Self::File),
            2 => Some(Self::Dir),
            _ => None,
        }
    }

    #[inline]
    pub fn as_raw(self) -> u8 {
        self as u8
    }

    pub fn mode(self) -> MvfsMode {
        match self {
            Self::File => MvfsMode::REGULAR,
            Self::Dir => MvfsMode::DIR,
        }
    }
}
