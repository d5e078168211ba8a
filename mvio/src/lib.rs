// SPDX-License-Identifier: MIT
#![cfg_attr(not(feature = "std"), no_std)]

// Core modules
pub mod errors;
mod macros;

// Backend modules
mod mem;

#[cfg(feature = "std")]
mod stdio;

// Prelude re-exports (central entrypoint)
pub mod prelude {
    pub use super::MvIO;
    pub use super::MvIOExt;
    pub use super::MvIOStructExt;
    pub use super::errors::*;
    pub use super::mem::MemMvIO;

    #[cfg(feature = "std")]
    pub use super::stdio::StdMvIO;
}

pub use errors::*;
pub use mem::MemMvIO;
#[cfg(feature = "std")]
pub use stdio::StdMvIO;

/// Size of the scratch buffer used by zero fills and struct reads.
/// Matches the MVFS block size.
pub const BLOCK_BUF_SIZE: usize = 4096;

/// Random-access byte storage.
///
/// Implementations may target RAM, host files or anything seekable.
pub trait MvIO {
    /// Writes `data` at `offset` (absolute).
    fn write_at(&mut self, offset: u64, data: &[u8]) -> MvIOResult;

    /// Reads `buf.len()` bytes into `buf` from `offset` (absolute).
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> MvIOResult;

    /// Flushes any buffered data (may be a no-op).
    fn flush(&mut self) -> MvIOResult;
}

/// Block-oriented and primitive helpers layered on top of [`MvIO`].
pub trait MvIOExt: MvIO {
    /// Reads block `index` of `block_size` bytes into `buf`.
    ///
    /// `buf` may span several consecutive blocks.
    #[inline]
    fn read_block(&mut self, index: u64, block_size: usize, buf: &mut [u8]) -> MvIOResult {
        if buf.len() % block_size != 0 {
            return Err(MvIOError::Other("read_block: buffer is not block aligned"));
        }
        self.read_at(index * block_size as u64, buf)
    }

    /// Writes `buf` starting at block `index` of `block_size` bytes.
    #[inline]
    fn write_block(&mut self, index: u64, block_size: usize, buf: &[u8]) -> MvIOResult {
        if buf.len() % block_size != 0 {
            return Err(MvIOError::Other("write_block: buffer is not block aligned"));
        }
        self.write_at(index * block_size as u64, buf)
    }

    /// Fills a region with zeroes.
    #[inline]
    fn zero_fill(&mut self, offset: u64, len: usize) -> MvIOResult {
        const ZERO_BUF: [u8; BLOCK_BUF_SIZE] = [0u8; BLOCK_BUF_SIZE];
        let mut remaining = len;
        let mut off = offset;
        while remaining > 0 {
            let chunk = remaining.min(ZERO_BUF.len());
            self.write_at(off, &ZERO_BUF[..chunk])?;
            off += chunk as u64;
            remaining -= chunk;
        }
        Ok(())
    }

    mvio_impl_primitive_rw!(u8, u32);
}

impl<T: MvIO + ?Sized> MvIOExt for T {}

/// Reads and writes on-disk records through zerocopy.
pub trait MvIOStructExt: MvIO {
    /// Reads a record of type `T` from the given offset.
    fn read_struct<T: zerocopy::FromBytes + zerocopy::KnownLayout + zerocopy::Immutable>(
        &mut self,
        offset: u64,
    ) -> MvIOResult<T> {
        let size = core::mem::size_of::<T>();
        if size > BLOCK_BUF_SIZE {
            return Err(MvIOError::Other("read_struct: type too large"));
        }
        let mut buf = [0u8; BLOCK_BUF_SIZE];
        self.read_at(offset, &mut buf[..size])?;
        T::read_from_bytes(&buf[..size]).map_err(|_| MvIOError::Other("read_struct failed"))
    }

    /// Writes a record of type `T` at the given offset.
    fn write_struct<T: zerocopy::IntoBytes + zerocopy::Immutable>(
        &mut self,
        offset: u64,
        val: &T,
    ) -> MvIOResult {
        self.write_at(offset, val.as_bytes())
    }
}

impl<T: MvIO + ?Sized> MvIOStructExt for T {}
