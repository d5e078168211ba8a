// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser};

use crate::utils::{LogLevel, set_log_level};

/// `-v` / `-q`, shared by every tool.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct Verbosity {
    /// Print every step
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Verbosity {
    pub fn level(&self) -> LogLevel {
        match (self.verbose, self.quiet) {
            (true, _) => LogLevel::Verbose,
            (_, true) => LogLevel::Quiet,
            _ => LogLevel::Normal,
        }
    }

    pub fn apply(&self) {
        set_log_level(self.level());
    }
}

#[derive(Parser, Debug)]
#[command(name = "mvfs-format", version, about = "Create an empty MVFS image", long_about = None)]
pub struct FormatArgs {
    /// Output image path
    #[arg(long)]
    pub image: PathBuf,
    /// Image size in KiB (180..=4096, multiple of 4)
    #[arg(long)]
    pub size_kib: u32,
    /// Number of inodes (128..=512)
    #[arg(long)]
    pub inodes: u32,
    #[command(flatten)]
    pub verbosity: Verbosity,
}

#[derive(Parser, Debug)]
#[command(name = "mvfs-add", version, about = "Add a host file to an MVFS image", long_about = None)]
pub struct AddArgs {
    /// Source image
    #[arg(long)]
    pub input: PathBuf,
    /// Destination image (may equal --input)
    #[arg(long)]
    pub output: PathBuf,
    /// Host file to add; its base name becomes the entry name
    #[arg(long)]
    pub file: PathBuf,
    #[command(flatten)]
    pub verbosity: Verbosity,
}

#[derive(Parser, Debug)]
#[command(name = "mvfs-check", version, about = "Verify an MVFS image", long_about = None)]
pub struct CheckArgs {
    /// Image to verify
    #[arg(long)]
    pub image: PathBuf,
    /// Also list the root directory
    #[arg(long)]
    pub list: bool,
    #[command(flatten)]
    pub verbosity: Verbosity,
}

/// Parses the command line and runs `f`, mapping the outcome to an exit code.
///
/// Help and version exit 0; argument errors and failures of `f` exit 1.
pub fn run<A, F>(f: F) -> ExitCode
where
    A: Parser,
    F: FnOnce(A) -> anyhow::Result<()>,
{
    let args = match A::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match f(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            crate::log_error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
