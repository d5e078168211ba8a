// SPDX-License-Identifier: MIT

use crate::{MvIO, MvIOError, MvIOResult};

/// In-memory implementation of `MvIO`.
///
/// Used for tests and for whole-image read-modify-write cycles.
#[derive(Debug)]
pub struct MemMvIO<'a> {
    buffer: &'a mut [u8],
}

impl<'a> MemMvIO<'a> {
    #[inline]
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    fn range(&self, offset: u64, len: usize) -> MvIOResult<core::ops::Range<usize>> {
        let start = usize::try_from(offset).map_err(|_| MvIOError::OutOfBounds)?;
        let end = start.checked_add(len).ok_or(MvIOError::OutOfBounds)?;
        if end > self.buffer.len() {
            return Err(MvIOError::OutOfBounds);
        }
        Ok(start..end)
    }
}

impl<'a> MvIO for MemMvIO<'a> {
    #[inline(always)]
    fn write_at(&mut self, offset: u64, data: &[u8]) -> MvIOResult {
        let range = self.range(offset, data.len())?;
        self.buffer[range].copy_from_slice(data);
        Ok(())
    }

    #[inline(always)]
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> MvIOResult {
        let range = self.range(offset, buf.len())?;
        buf.copy_from_slice(&self.buffer[range]);
        Ok(())
    }

    #[inline]
    fn flush(&mut self) -> MvIOResult {
        Ok(())
    }
}
