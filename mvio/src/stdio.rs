// SPDX-License-Identifier: MIT

use std::io::{Read, Seek, SeekFrom, Write};

use crate::{MvIO, MvIOResult};

/// `MvIO` over any seekable host handle (files, temp files, cursors).
#[derive(Debug)]
pub struct StdMvIO<'a, T: Read + Write + Seek> {
    io: &'a mut T,
}

impl<'a, T: Read + Write + Seek> StdMvIO<'a, T> {
    #[inline]
    pub fn new(io: &'a mut T) -> Self {
        Self { io }
    }
}

impl<'a, T: Read + Write + Seek> MvIO for StdMvIO<'a, T> {
    fn write_at(&mut self, offset: u64, data: &[u8]) -> MvIOResult {
        self.io.seek(SeekFrom::Start(offset))?;
        self.io.write_all(data)?;
        Ok(())
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> MvIOResult {
        self.io.seek(SeekFrom::Start(offset))?;
        self.io.read_exact(buf)?;
        Ok(())
    }

    fn flush(&mut self) -> MvIOResult {
        self.io.flush()?;
        Ok(())
    }
}
