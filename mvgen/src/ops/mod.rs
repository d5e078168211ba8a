// SPDX-License-Identifier: MIT

pub mod add;
pub mod check;
pub mod format;
