//! Resolved settings for the distribution and verification pipelines.
//!
//! The binaries build these from command-line flags; library callers can
//! start from [`Default`], which mirrors the flag defaults.

use crate::error::{ReleaseError, Result};
use camino::{Utf8Path, Utf8PathBuf};

/// Default location of the goreleaser artifact manifest.
pub const DEFAULT_ARTIFACTS_PATH: &str = "dist/artifacts.json";

/// Default location of the npm packages root.
pub const DEFAULT_PACKAGES_PATH: &str = "./packages";

/// How the distribution pipeline treats an artifact whose package directory
/// does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the run.
    #[default]
    Strict,
    /// Skip the artifact and continue.
    Lenient,
}

impl FailurePolicy {
    /// Select the policy from a `--strict` flag value.
    #[must_use]
    pub const fn from_strict(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Lenient }
    }

    /// Whether a missing package directory aborts the run.
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Settings for installing binaries into platform packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionConfig {
    /// Path to goreleaser's `artifacts.json`.
    pub artifacts_path: Utf8PathBuf,
    /// Root directory holding one subdirectory per platform package.
    pub packages_path: Utf8PathBuf,
    /// Handling of missing package directories.
    pub policy: FailurePolicy,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            artifacts_path: Utf8PathBuf::from(DEFAULT_ARTIFACTS_PATH),
            packages_path: Utf8PathBuf::from(DEFAULT_PACKAGES_PATH),
            policy: FailurePolicy::default(),
        }
    }
}

impl DistributionConfig {
    /// Reject empty path settings.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::MissingSetting`] naming the first empty path.
    pub fn validate(&self) -> Result<()> {
        require_path("artifacts-path", &self.artifacts_path)?;
        require_path("packages-path", &self.packages_path)
    }
}

/// Settings for the version consistency check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyConfig {
    /// Root directory holding one subdirectory per npm package.
    pub packages_path: Utf8PathBuf,
    /// Also require an exact `v{version}` tag on HEAD.
    pub require_tag: bool,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            packages_path: Utf8PathBuf::from(DEFAULT_PACKAGES_PATH),
            require_tag: false,
        }
    }
}

impl VerifyConfig {
    /// Reject an empty packages path.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::MissingSetting`] when the path is empty.
    pub fn validate(&self) -> Result<()> {
        require_path("packages-path", &self.packages_path)
    }
}

fn require_path(name: &'static str, path: &Utf8Path) -> Result<()> {
    if path.as_str().is_empty() {
        return Err(ReleaseError::MissingSetting { name });
    }
    Ok(())
}
