// SPDX-License-Identifier: MIT

pub use crate::core::errors::{FsInjectorError, FsInjectorResult};

/// Inserts files into an existing filesystem.
///
/// A failing call must leave the filesystem exactly as it was before the call.
pub trait FsInjector {
    /// Create a file named `name` holding `content` in the root directory.
    fn write_file(&mut self, name: &str, content: &[u8]) -> FsInjectorResult;

    /// Flush pending state to the backing storage.
    fn flush(&mut self) -> FsInjectorResult {
        Ok(())
    }
}
