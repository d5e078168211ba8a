// SPDX-License-Identifier: MIT

use std::process::ExitCode;

use mvgen::cli::{self, CheckArgs};

fn main() -> ExitCode {
    cli::run(|args: CheckArgs| {
        args.verbosity.apply();
        mvgen::ops::check::check(&args.image, args.list)?;
        mvgen::log_success!("{} passed all checks", args.image.display());
        Ok(())
    })
}
