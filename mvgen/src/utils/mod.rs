// SPDX-License-Identifier: MIT

mod log;
mod string;

pub use log::*;
pub use string::*;
