// SPDX-License-Identifier: MIT

use std::process::ExitCode;

use mvgen::cli::{self, AddArgs};

fn main() -> ExitCode {
    cli::run(|args: AddArgs| {
        args.verbosity.apply();
        let summary = mvgen::ops::add::add(&args.input, &args.output, &args.file)?;
        mvgen::log_verbose!("{} data block(s) left", summary.free_blocks);
        Ok(())
    })
}
