// SPDX-License-Identifier: MIT

use alloc::vec::Vec;

pub use crate::core::errors::{FsResolverError, FsResolverResult};

/// Read-only access to a filesystem's directory and file contents.
pub trait FsResolver {
    /// Directory listing record.
    type Entry;

    /// Lists the live entries of the root directory.
    fn list_root(&self) -> FsResolverResult<Vec<Self::Entry>>;

    /// Returns the full contents of the file called `name`.
    fn read_file(&self, name: &str) -> FsResolverResult<Vec<u8>>;
}
