// SPDX-License-Identifier: MIT

pub mod mvfs;
