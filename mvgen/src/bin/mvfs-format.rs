// SPDX-License-Identifier: MIT

use std::process::ExitCode;

use mvgen::cli::{self, FormatArgs};

fn main() -> ExitCode {
    cli::run(|args: FormatArgs| {
        args.verbosity.apply();
        mvgen::ops::format::create(&args.image, args.size_kib, args.inodes)?;
        Ok(())
    })
}
