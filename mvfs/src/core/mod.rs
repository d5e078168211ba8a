// SPDX-License-Identifier: MIT

// === Sub-modules ===
pub mod allocator;
pub mod checker;
pub mod errors;
pub mod formatter;
pub mod injector;
pub mod macros;
pub mod meta;
pub mod resolver;
pub mod utils;

// === Core Traits ===
pub mod traits {
    pub use super::allocator::{FsAllocator, FsHandle};
    pub use super::checker::FsChecker;
    pub use super::formatter::FsFormatter;
    pub use super::injector::FsInjector;
    pub use super::meta::FsMeta;
    pub use super::resolver::FsResolver;
}

// === Error types ===
pub use errors::*;

// === Utilities ===
pub use utils::{bitmap::BitmapOps, checksum_utils, time_utils};
