//! Version consistency verification across npm packages.
//!
//! All non-private packages must declare the same version string, compared
//! byte for byte. Optionally the commit being released must carry the
//! matching `v{version}` tag.

use crate::config::VerifyConfig;
use crate::error::{ReleaseError, Result};
use crate::git::{CommandExecutor, TagLookup, exact_tag_at_head};
use crate::scanner::{VersionSet, scan_packages};
use log::info;

/// Prefix stripped from a tag before comparing it with the package version.
const TAG_PREFIX: char = 'v';

/// Summary of a successful verification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcome {
    /// The version shared by every package.
    pub canonical: String,
    /// Number of non-private packages checked.
    pub package_count: usize,
    /// The matching tag on HEAD, when the tag check ran.
    pub tag: Option<String>,
}

/// Scan the packages root and verify that versions agree, checking the tag
/// on HEAD when `config.require_tag` is set.
///
/// # Errors
///
/// Returns the first scan, consistency or tag error encountered.
pub fn run_verification(
    config: &VerifyConfig,
    executor: &dyn CommandExecutor,
) -> Result<VerificationOutcome> {
    config.validate()?;
    let versions = scan_packages(&config.packages_path)?;
    let canonical = check_consistency(&versions)?;
    info!(
        "all {} packages are at version: {canonical}",
        versions.len()
    );

    let tag = if config.require_tag {
        let tag = check_tag(executor, canonical)?;
        info!("git tag {tag} matches npm version {canonical}");
        Some(tag)
    } else {
        None
    };

    info!("version sync check passed");
    Ok(VerificationOutcome {
        canonical: canonical.to_owned(),
        package_count: versions.len(),
        tag,
    })
}

/// Check every record against the canonical version and return it.
///
/// # Errors
///
/// Returns [`ReleaseError::VersionMismatch`] for the first record whose
/// version differs from the canonical one.
///
/// # Examples
///
/// ```
/// use safedep_release::scanner::{PackageManifestRecord, VersionSet};
/// use safedep_release::verify::check_consistency;
///
/// let record = |name: &str, version: &str| PackageManifestRecord {
///     name: name.to_owned(),
///     version: version.to_owned(),
///     private: false,
/// };
/// let set = VersionSet::from_records(vec![
///     record("@safedep/cli", "1.2.0"),
///     record("@safedep/cli-linux-x64", "1.2.0"),
/// ])
/// .expect("non-empty");
/// assert_eq!(check_consistency(&set).expect("consistent"), "1.2.0");
/// ```
pub fn check_consistency(versions: &VersionSet) -> Result<&str> {
    let first = versions.first();
    let canonical = versions.canonical();

    if let Some(other) = versions.rest().iter().find(|r| r.version != canonical) {
        return Err(ReleaseError::VersionMismatch {
            expected_package: first.name.clone(),
            expected: canonical.to_owned(),
            found_package: other.name.clone(),
            found: other.version.clone(),
        });
    }

    Ok(canonical)
}

/// Require an exact tag on HEAD naming `canonical`, and return that tag.
///
/// # Errors
///
/// Returns [`ReleaseError::NoExactTag`], [`ReleaseError::AmbiguousTag`] or
/// [`ReleaseError::TagMismatch`], or an error if git cannot be run.
pub fn check_tag(executor: &dyn CommandExecutor, canonical: &str) -> Result<String> {
    let tag = match exact_tag_at_head(executor)? {
        TagLookup::Exact(tag) => tag,
        TagLookup::Missing => {
            return Err(ReleaseError::NoExactTag {
                expected: canonical.to_owned(),
            });
        }
        TagLookup::Ambiguous(found) => {
            return Err(ReleaseError::AmbiguousTag {
                found,
                expected: canonical.to_owned(),
            });
        }
    };

    let tag_version = tag.strip_prefix(TAG_PREFIX).unwrap_or(&tag);
    if tag_version != canonical {
        return Err(ReleaseError::TagMismatch {
            tag,
            expected: canonical.to_owned(),
        });
    }

    Ok(tag)
}
