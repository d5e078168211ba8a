// SPDX-License-Identifier: MIT

use core::fmt;

/// Result type for MvIO operations.
pub type MvIOResult<T = ()> = core::result::Result<T, MvIOError>;

/// Error type for MvIO operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MvIOError {
    /// Access past the end of the backing storage.
    OutOfBounds,
    /// Backing storage ended before the requested length was transferred.
    UnexpectedEof,
    Unsupported,
    /// Host I/O failure, tagged with its kind.
    #[cfg(feature = "std")]
    Host(std::io::ErrorKind),
    Other(&'static str),
}

impl MvIOError {
    pub fn msg(&self) -> &'static str {
        match self {
            MvIOError::OutOfBounds => "Out of bounds",
            MvIOError::UnexpectedEof => "Unexpected end of image",
            MvIOError::Unsupported => "Unsupported operation",
            #[cfg(feature = "std")]
            MvIOError::Host(_) => "Host I/O error",
            MvIOError::Other(msg) => msg,
        }
    }
}

impl From<&'static str> for MvIOError {
    #[inline]
    fn from(msg: &'static str) -> Self {
        MvIOError::Other(msg)
    }
}

impl fmt::Display for MvIOError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg())?;
        #[cfg(feature = "std")]
        if let MvIOError::Host(kind) = self {
            write!(f, " ({kind})")?;
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for MvIOError {
    #[cold]
    #[inline(never)]
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => MvIOError::UnexpectedEof,
            kind => MvIOError::Host(kind),
        }
    }
}
