//! Release tooling for the safedep npm distribution.
//!
//! goreleaser builds one `safedep` binary per platform. This crate installs
//! each binary into the matching npm platform package and, before publish,
//! checks that every package declares the same version (optionally matching
//! the git tag on HEAD). It backs the `sync-binaries` and
//! `check-version-sync` binaries and can be driven programmatically.
//!
//! # Modules
//!
//! - [`artifact`] - goreleaser artifact manifest loading and validation
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Resolved pipeline settings
//! - [`distribute`] - Binary installation into platform packages
//! - [`error`] - Semantic error types with recovery hints
//! - [`git`] - Exact-tag lookup behind a command executor seam
//! - [`layout`] - Platform package naming and paths
//! - [`logging`] - Log subscriber setup for the binaries
//! - [`platform`] - Go to Node.js platform identifier mapping
//! - [`scanner`] - `package.json` discovery and parsing
//! - [`verify`] - Version consistency and tag checks

pub mod artifact;
pub mod cli;
pub mod config;
pub mod distribute;
pub mod error;
pub mod git;
pub mod layout;
pub mod logging;
pub mod platform;
pub mod scanner;
pub mod verify;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
