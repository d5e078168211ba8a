// SPDX-License-Identifier: MIT

use core::fmt;

pub use mvio::errors::*;

/// Rejected image parameters (size, inode capacity, resulting layout).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsConfigError {
    SizeOutOfRange(u32),
    SizeNotAligned(u32),
    InodesOutOfRange(u32),
    LayoutTooSmall,
    Other(&'static str),
}

impl FsConfigError {
    pub fn msg(&self) -> &'static str {
        match self {
            FsConfigError::SizeOutOfRange(_) => "Image size out of range (180..=4096 KiB)",
            FsConfigError::SizeNotAligned(_) => "Image size must be a multiple of 4 KiB",
            FsConfigError::InodesOutOfRange(_) => "Inode count out of range (128..=512)",
            FsConfigError::LayoutTooSmall => "Image too small to hold any data block",
            FsConfigError::Other(msg) => msg,
        }
    }
}

impl fmt::Display for FsConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg())?;
        match self {
            FsConfigError::SizeOutOfRange(v) | FsConfigError::SizeNotAligned(v) => {
                write!(f, " (got {v} KiB)")
            }
            FsConfigError::InodesOutOfRange(v) => write!(f, " (got {v})"),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsAllocatorError {
    OutOfInodes,
    OutOfBlocks,
    DirectoryFull,
    Other(&'static str),
}

impl FsAllocatorError {
    pub fn msg(&self) -> &'static str {
        match self {
            FsAllocatorError::OutOfInodes => "Out of inodes",
            FsAllocatorError::OutOfBlocks => "Out of data blocks",
            FsAllocatorError::DirectoryFull => "Root directory is full",
            FsAllocatorError::Other(msg) => msg,
        }
    }
}

impl fmt::Display for FsAllocatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg())?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsParsingError {
    IO(MvIOError),
    BadMagic(u32),
    Corrupted,
    Invalid(&'static str),
    Other(&'static str),
}

impl FsParsingError {
    pub fn msg(&self) -> &'static str {
        match self {
            FsParsingError::IO(_) => "IO error",
            FsParsingError::BadMagic(_) => "Not an MVFS image (bad magic)",
            FsParsingError::Corrupted => "Corrupted record",
            FsParsingError::Invalid(msg) => msg,
            FsParsingError::Other(msg) => msg,
        }
    }

    pub fn source(&self) -> Option<FsError> {
        match self {
            FsParsingError::IO(e) => Some(FsError::IO(*e)),
            _ => None,
        }
    }
}

impl fmt::Display for FsParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg())?;
        if let FsParsingError::BadMagic(magic) = self {
            write!(f, " (found 0x{magic:08X})")?;
        }
        let mut current = self.source();
        while let Some(src) = current {
            write!(f, "\n  caused by: {}", src.msg())?;
            current = src.source();
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsResolverError {
    IO(MvIOError),
    Parsing(FsParsingError),
    NotFound,
    Invalid(&'static str),
    Other(&'static str),
}

impl FsResolverError {
    pub fn msg(&self) -> &'static str {
        match self {
            FsResolverError::IO(_) => "IO error",
            FsResolverError::Parsing(_) => "Parsing error",
            FsResolverError::NotFound => "File not found",
            FsResolverError::Invalid(msg) => msg,
            FsResolverError::Other(msg) => msg,
        }
    }

    pub fn source(&self) -> Option<FsError> {
        match self {
            FsResolverError::IO(e) => Some(FsError::IO(*e)),
            FsResolverError::Parsing(e) => Some(FsError::Parsing(*e)),
            _ => None,
        }
    }
}

impl fmt::Display for FsResolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg())?;
        let mut current = self.source();
        while let Some(src) = current {
            write!(f, "\n  caused by: {}", src.msg())?;
            current = src.source();
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsFormatterError {
    IO(MvIOError),
    Config(FsConfigError),
    Invalid(&'static str),
    Other(&'static str),
}

impl FsFormatterError {
    pub fn msg(&self) -> &'static str {
        match self {
            FsFormatterError::IO(_) => "IO error",
            FsFormatterError::Config(_) => "Configuration error",
            FsFormatterError::Invalid(msg) => msg,
            FsFormatterError::Other(msg) => msg,
        }
    }

    pub fn source(&self) -> Option<FsError> {
        match self {
            FsFormatterError::IO(e) => Some(FsError::IO(*e)),
            FsFormatterError::Config(e) => Some(FsError::Config(*e)),
            _ => None,
        }
    }
}

impl fmt::Display for FsFormatterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg())?;
        let mut current = self.source();
        while let Some(src) = current {
            write!(f, "\n  caused by: {}", src.msg())?;
            current = src.source();
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsInjectorError {
    IO(MvIOError),
    Allocator(FsAllocatorError),
    Parsing(FsParsingError),
    NameTooLong,
    FileTooLarge,
    AlreadyExists,
    Invalid(&'static str),
    Other(&'static str),
}

impl FsInjectorError {
    pub fn msg(&self) -> &'static str {
        match self {
            FsInjectorError::IO(_) => "IO error",
            FsInjectorError::Allocator(_) => "Allocator error",
            FsInjectorError::Parsing(_) => "Parsing error",
            FsInjectorError::NameTooLong => "File name too long (max 57 bytes)",
            FsInjectorError::FileTooLarge => "File too large (max 12 blocks / 48 KiB)",
            FsInjectorError::AlreadyExists => "A file with this name already exists",
            FsInjectorError::Invalid(msg) => msg,
            FsInjectorError::Other(msg) => msg,
        }
    }

    pub fn source(&self) -> Option<FsError> {
        match self {
            FsInjectorError::IO(e) => Some(FsError::IO(*e)),
            FsInjectorError::Allocator(e) => Some(FsError::Allocator(*e)),
            FsInjectorError::Parsing(e) => Some(FsError::Parsing(*e)),
            _ => None,
        }
    }
}

impl fmt::Display for FsInjectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg())?;
        let mut current = self.source();
        while let Some(src) = current {
            write!(f, "\n  caused by: {}", src.msg())?;
            current = src.source();
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsCheckerError {
    IO(MvIOError),
    Parsing(FsParsingError),
    /// The named record failed checksum verification.
    ChecksumMismatch(&'static str),
    Invalid(&'static str),
    Other(&'static str),
}

impl FsCheckerError {
    pub fn msg(&self) -> &'static str {
        match self {
            FsCheckerError::IO(_) => "IO error",
            FsCheckerError::Parsing(_) => "Parsing error",
            FsCheckerError::ChecksumMismatch(_) => "Checksum mismatch",
            FsCheckerError::Invalid(msg) => msg,
            FsCheckerError::Other(msg) => msg,
        }
    }

    pub fn source(&self) -> Option<FsError> {
        match self {
            FsCheckerError::IO(e) => Some(FsError::IO(*e)),
            FsCheckerError::Parsing(e) => Some(FsError::Parsing(*e)),
            _ => None,
        }
    }
}

impl fmt::Display for FsCheckerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg())?;
        if let FsCheckerError::ChecksumMismatch(what) = self {
            write!(f, " in {what}")?;
        }
        let mut current = self.source();
        while let Some(src) = current {
            write!(f, "\n  caused by: {}", src.msg())?;
            current = src.source();
        }
        Ok(())
    }
}

/// Top-level error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    IO(MvIOError),
    Config(FsConfigError),
    Allocator(FsAllocatorError),
    Parsing(FsParsingError),
    Resolver(FsResolverError),
    Formatter(FsFormatterError),
    Injector(FsInjectorError),
    Checker(FsCheckerError),
    Other(&'static str),
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg())?;
        let mut current = self.source();
        while let Some(src) = current {
            write!(f, "\n  caused by: {}", src.msg())?;
            current = src.source();
        }
        Ok(())
    }
}

impl FsError {
    pub fn msg(&self) -> &'static str {
        match self {
            FsError::IO(e) => e.msg(),
            FsError::Config(e) => e.msg(),
            FsError::Allocator(e) => e.msg(),
            FsError::Parsing(e) => e.msg(),
            FsError::Resolver(e) => e.msg(),
            FsError::Formatter(e) => e.msg(),
            FsError::Injector(e) => e.msg(),
            FsError::Checker(e) => e.msg(),
            FsError::Other(msg) => msg,
        }
    }

    pub fn source(&self) -> Option<FsError> {
        match self {
            FsError::Parsing(e) => e.source(),
            FsError::Resolver(e) => e.source(),
            FsError::Formatter(e) => e.source(),
            FsError::Injector(e) => e.source(),
            FsError::Checker(e) => e.source(),
            FsError::IO(_) => None,
            FsError::Config(_) => None,
            FsError::Allocator(_) => None,
            FsError::Other(_) => None,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FsError {}

// === type Fs*Result ===

pub type FsResult<T = ()> = Result<T, FsError>;
pub type FsConfigResult<T = ()> = Result<T, FsConfigError>;
pub type FsAllocatorResult<T = ()> = Result<T, FsAllocatorError>;
pub type FsParsingResult<T = ()> = Result<T, FsParsingError>;
pub type FsResolverResult<T = ()> = Result<T, FsResolverError>;
pub type FsFormatterResult<T = ()> = Result<T, FsFormatterError>;
pub type FsInjectorResult<T = ()> = Result<T, FsInjectorError>;
pub type FsCheckerResult<T = ()> = Result<T, FsCheckerError>;

crate::fs_error_wiring! {
    top => FsError {
        MvIOError        : IO,
        FsConfigError    : Config,
        FsAllocatorError : Allocator,
        FsParsingError   : Parsing,
        FsResolverError  : Resolver,
        FsFormatterError : Formatter,
        FsInjectorError  : Injector,
        FsCheckerError   : Checker,
    },
    str_into => [
        FsConfigError,
        FsAllocatorError,
        FsParsingError,
        FsResolverError,
        FsFormatterError,
        FsInjectorError,
        FsCheckerError,
    ],
    sub => {
        MvIOError        => [ FsParsingError::IO, FsResolverError::IO, FsFormatterError::IO, FsInjectorError::IO, FsCheckerError::IO ],
        FsConfigError    => [ FsFormatterError::Config ],
        FsAllocatorError => [ FsInjectorError::Allocator ],
        FsParsingError   => [ FsResolverError::Parsing, FsInjectorError::Parsing, FsCheckerError::Parsing ],
    },
}
