//! CLI argument definitions for the release binaries.
//!
//! The binaries stay small: they parse these arguments, convert them into
//! the library's configuration types, and report the outcome.

use crate::config::{
    DEFAULT_ARTIFACTS_PATH, DEFAULT_PACKAGES_PATH, DistributionConfig, FailurePolicy, VerifyConfig,
};
use camino::Utf8PathBuf;
use clap::{ArgAction, Parser};

/// Copy goreleaser binaries into their npm platform packages.
#[derive(Parser, Debug, Clone)]
#[command(name = "sync-binaries")]
#[command(version, about)]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Install every binary after `goreleaser build`:\n",
    "    $ sync-binaries\n\n",
    "  Tolerate platforms that have no package yet:\n",
    "    $ sync-binaries --strict=false\n",
))]
pub struct SyncBinariesArgs {
    /// Path to goreleaser's artifacts.json.
    #[arg(long, value_name = "FILE", default_value = DEFAULT_ARTIFACTS_PATH)]
    pub artifacts_path: Utf8PathBuf,

    /// Directory holding the npm platform packages.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_PACKAGES_PATH)]
    pub packages_path: Utf8PathBuf,

    /// Fail when a platform package directory does not exist.
    #[arg(
        long,
        value_name = "BOOL",
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub strict: bool,
}

impl SyncBinariesArgs {
    /// Convert the arguments into a distribution configuration.
    #[must_use]
    pub fn to_config(&self) -> DistributionConfig {
        DistributionConfig {
            artifacts_path: self.artifacts_path.clone(),
            packages_path: self.packages_path.clone(),
            policy: FailurePolicy::from_strict(self.strict),
        }
    }
}

/// Check that every non-private npm package shares one version.
#[derive(Parser, Debug, Clone)]
#[command(name = "check-version-sync")]
#[command(version, about)]
pub struct CheckVersionSyncArgs {
    /// Directory holding the npm packages.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_PACKAGES_PATH)]
    pub packages_path: Utf8PathBuf,

    /// Fail unless HEAD carries the exact tag v<version>.
    #[arg(long)]
    pub require_tag: bool,
}

impl CheckVersionSyncArgs {
    /// Convert the arguments into a verification configuration.
    #[must_use]
    pub fn to_config(&self) -> VerifyConfig {
        VerifyConfig {
            packages_path: self.packages_path.clone(),
            require_tag: self.require_tag,
        }
    }
}
