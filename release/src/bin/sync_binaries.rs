//! `sync-binaries` entrypoint.
//!
//! Copies each binary listed in goreleaser's `artifacts.json` into the
//! `bin/` directory of its npm platform package.

use clap::Parser;
use safedep_release::cli::SyncBinariesArgs;
use safedep_release::distribute::{DistributionReport, run_distribution};
use safedep_release::error::Result;
use safedep_release::logging;
use std::io::Write;

fn main() {
    let args = SyncBinariesArgs::parse();
    logging::init();

    let mut stderr = std::io::stderr();
    let exit_code = exit_code_for_run_result(run(&args), &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(args: &SyncBinariesArgs) -> Result<DistributionReport> {
    run_distribution(&args.to_config())
}

fn exit_code_for_run_result<T>(result: Result<T>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(_) => 0,
        Err(err) => {
            if writeln!(stderr, "error: {}", err.report()).is_err() {
                // Best-effort reporting; ignore write failures.
            }
            1
        }
    }
}
