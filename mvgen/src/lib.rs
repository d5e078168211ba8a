// SPDX-License-Identifier: MIT

//! Command-line glue for MVFS images: argument parsing, host file access,
//! atomic output and console logging around the `mvfs` library.

pub mod cli;
pub mod host;
pub mod ops;
pub mod output;
pub mod utils;
