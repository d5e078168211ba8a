// SPDX-License-Identifier: MIT

pub use crate::core::errors::{FsCheckerError, FsCheckerResult};

/// Trait for verifying the integrity of a filesystem.
///
/// Implemented per filesystem to perform internal consistency checks
/// (superblock, bitmaps, inodes, directory entries).
pub trait FsChecker {
    /// Summary produced by a successful run.
    type Report;

    /// Runs all available checks on the filesystem.
    ///
    /// Returns the report if all checks pass, or an error detailing the first failure encountered.
    fn check_all(&mut self) -> FsCheckerResult<Self::Report>;
}
