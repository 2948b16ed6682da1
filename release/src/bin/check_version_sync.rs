//! `check-version-sync` entrypoint.
//!
//! Verifies that every non-private npm package shares one version and,
//! with `--require-tag`, that HEAD is tagged `v<version>`.

use clap::Parser;
use safedep_release::cli::CheckVersionSyncArgs;
use safedep_release::error::Result;
use safedep_release::git::SystemCommandExecutor;
use safedep_release::logging;
use safedep_release::verify::{VerificationOutcome, run_verification};
use std::io::Write;

fn main() {
    let args = CheckVersionSyncArgs::parse();
    logging::init();

    let mut stderr = std::io::stderr();
    let exit_code = exit_code_for_run_result(run(&args), &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(args: &CheckVersionSyncArgs) -> Result<VerificationOutcome> {
    run_verification(&args.to_config(), &SystemCommandExecutor)
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
