//! Source-control queries used by the version check.
//!
//! Commands run through [`CommandExecutor`] so tests can script the `git`
//! responses instead of depending on a real repository.

use crate::error::{ReleaseError, Result};
use std::process::{Command, Output};

/// Arguments that ask git for a tag pointing exactly at HEAD.
pub const EXACT_TAG_ARGS: &[&str] = &["describe", "--tags", "--exact-match", "HEAD"];

/// Abstraction for running external commands.
pub trait CommandExecutor {
    /// Runs a command with arguments and returns the captured output.
    ///
    /// # Errors
    ///
    /// Returns any I/O errors encountered while spawning or running the command.
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output>;
}

/// Executes commands on the host system in the current directory.
///
/// # Examples
///
/// ```no_run
/// use safedep_release::git::{CommandExecutor, SystemCommandExecutor};
///
/// let executor = SystemCommandExecutor;
/// let output = executor.run("git", &["--version"])?;
/// assert!(output.status.success());
/// # Ok::<(), safedep_release::error::ReleaseError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output> {
        Command::new(cmd)
            .args(args)
            .output()
            .map_err(ReleaseError::from)
    }
}

/// Result of asking for the exact tag on HEAD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagLookup {
    /// Exactly one tag points at HEAD.
    Exact(String),
    /// No tag points at HEAD, or git reported an error.
    Missing,
    /// The query produced more than one candidate.
    Ambiguous(String),
}

/// Query the tag that points exactly at HEAD.
///
/// A non-zero git exit status is reported as [`TagLookup::Missing`], since
/// that is how `git describe --exact-match` signals an untagged commit.
///
/// # Errors
///
/// Returns an error only if git cannot be run at all.
pub fn exact_tag_at_head(executor: &dyn CommandExecutor) -> Result<TagLookup> {
    let output = executor.run("git", EXACT_TAG_ARGS)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::debug!("git describe failed: {}", stderr.trim());
        return Ok(TagLookup::Missing);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(classify_tag_output(&stdout))
}

fn classify_tag_output(stdout: &str) -> TagLookup {
    let trimmed = stdout.trim();
    match trimmed.split_whitespace().count() {
        0 => TagLookup::Missing,
        1 => TagLookup::Exact(trimmed.to_owned()),
        _ => TagLookup::Ambiguous(trimmed.split_whitespace().collect::<Vec<_>>().join(", ")),
    }
}
