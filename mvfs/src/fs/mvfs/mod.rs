// SPDX-License-Identifier: MIT
pub mod allocator;
pub mod attr;
pub mod checker;
pub mod constant;
pub mod directory;
pub mod formatter;
pub mod image;
pub mod injector;
pub mod meta;
pub mod resolver;
pub mod types;

// Public Interface
pub mod traits {
    pub use super::allocator::{MvfsAllocator, MvfsHandle};
    pub use super::checker::{MvfsCheckReport, MvfsChecker};
    pub use super::directory::MvfsRootDir;
    pub use super::formatter::MvfsFormatter;
    pub use super::image::MvfsImage;
    pub use super::injector::MvfsInjector;
    pub use super::meta::MvfsMeta;
    pub use super::resolver::{MvfsListing, MvfsResolver};
}

pub mod prelude {
    pub use super::attr::{MvfsFileType, MvfsMode};
    pub use super::constant::*;
    pub use super::traits::*;
    pub use super::types::*;
    pub use crate::core::errors::*;
    pub use crate::core::traits::*;
    pub use mvio::prelude::*;
}
