// SPDX-License-Identifier: MIT
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

// Core Modules
pub mod core;
pub mod fs;

// Reusable types and traits
pub use crate::core::traits::*;

/// MVFS image implementation.
///
/// See [`mvfs::MvfsFormatter`], [`mvfs::MvfsInjector`], [`mvfs::MvfsChecker`]
/// and [`mvfs::MvfsResolver`].
pub mod mvfs {
    pub use super::fs::mvfs::prelude::*;
}
