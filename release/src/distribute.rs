//! Installation of built binaries into their platform packages.
//!
//! Artifacts are processed one at a time in manifest order. A descriptor
//! that fails validation is skipped with a warning. A missing package
//! directory aborts the run under [`FailurePolicy::Strict`] and is skipped
//! under [`FailurePolicy::Lenient`]. Any I/O failure while installing is
//! fatal, so a run never reports success with a partially populated
//! release.

use crate::artifact::{ArtifactDescriptor, DescriptorError, load_artifacts};
use crate::config::{DistributionConfig, FailurePolicy};
use crate::error::{ReleaseError, Result};
use crate::layout::{PackageName, PackageTarget};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info, warn};
use std::fs;
use std::io;

/// Permission bits for the `bin/` directory and the installed executable.
#[cfg(unix)]
const EXECUTABLE_MODE: u32 = 0o755;

/// A binary that was installed into its platform package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledBinary {
    /// The receiving platform package.
    pub package: PackageName,
    /// Full path of the installed executable.
    pub destination: Utf8PathBuf,
}

/// Why an artifact was not installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The descriptor did not validate.
    Invalid(DescriptorError),
    /// Lenient policy: the package directory does not exist.
    PackageMissing(Utf8PathBuf),
}

/// An artifact that was passed over without being installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedArtifact {
    /// Zero-based position of the artifact in the manifest.
    pub index: usize,
    /// The artifact's source path as listed in the manifest.
    pub source: Utf8PathBuf,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Outcome of a distribution run, in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributionReport {
    /// Binaries that were installed.
    pub installed: Vec<InstalledBinary>,
    /// Artifacts that were skipped.
    pub skipped: Vec<SkippedArtifact>,
}

/// Load the artifact manifest and install every binary it lists.
///
/// # Errors
///
/// Returns an error if the configuration is incomplete, the manifest cannot
/// be loaded, or [`distribute`] fails.
pub fn run_distribution(config: &DistributionConfig) -> Result<DistributionReport> {
    config.validate()?;
    let artifacts = load_artifacts(&config.artifacts_path)?;
    info!(
        "loaded {} artifact(s) from {}",
        artifacts.len(),
        config.artifacts_path
    );

    let report = distribute(&artifacts, &config.packages_path, config.policy)?;
    info!(
        "installed {} binary(ies), skipped {} artifact(s)",
        report.installed.len(),
        report.skipped.len()
    );
    Ok(report)
}

/// Install each valid artifact into its platform package under
/// `packages_root`.
///
/// # Errors
///
/// Returns [`ReleaseError::PackageDirectoryMissing`] under the strict policy
/// when a package directory is absent, [`ReleaseError::PackageProbeFailed`]
/// when its existence cannot be determined, and an install error when a
/// binary cannot be copied. Artifacts after the failing one are not attempted.
pub fn distribute(
    artifacts: &[ArtifactDescriptor],
    packages_root: &Utf8Path,
    policy: FailurePolicy,
) -> Result<DistributionReport> {
    let mut report = DistributionReport::default();

    for (index, artifact) in artifacts.iter().enumerate() {
        if let Err(err) = artifact.validate() {
            warn!("skipping invalid artifact #{index} ({}): {err}", artifact.path);
            report.skipped.push(SkippedArtifact {
                index,
                source: artifact.path.clone(),
                reason: SkipReason::Invalid(err),
            });
            continue;
        }

        let target = PackageTarget::for_artifact(packages_root, artifact);
        if !package_dir_exists(target.package_dir())? {
            if policy.is_strict() {
                return Err(ReleaseError::PackageDirectoryMissing {
                    path: target.package_dir().to_owned(),
                });
            }
            warn!(
                "package directory {} does not exist, skipping",
                target.package_dir()
            );
            report.skipped.push(SkippedArtifact {
                index,
                source: artifact.path.clone(),
                reason: SkipReason::PackageMissing(target.package_dir().to_owned()),
            });
            continue;
        }

        info!(
            "package directory {} exists for {}",
            target.package_dir(),
            artifact.path
        );
        let destination = install_binary(&artifact.path, &target)?;
        report.installed.push(InstalledBinary {
            package: target.package_name().clone(),
            destination,
        });
    }

    Ok(report)
}

/// Copy `source` into the package's `bin/` directory and mark it
/// executable, creating `bin/` when needed. An existing binary is replaced.
///
/// # Errors
///
/// Returns [`ReleaseError::InstallFailed`] if the directory cannot be
/// created or the file cannot be copied, and
/// [`ReleaseError::InstallIncomplete`] if the binary is absent afterwards.
pub fn install_binary(source: &Utf8Path, target: &PackageTarget) -> Result<Utf8PathBuf> {
    let bin_dir = target.bin_dir();
    let destination = target.binary_path();
    let install_failed = |err: io::Error| ReleaseError::InstallFailed {
        source_path: source.to_owned(),
        destination: destination.clone(),
        source: err,
    };

    debug!("creating bin directory {bin_dir}");
    create_bin_dir(&bin_dir).map_err(install_failed)?;

    info!("copying {source} to {destination}");
    fs::copy(source, &destination).map_err(install_failed)?;
    mark_executable(&destination).map_err(install_failed)?;

    if !destination.is_file() {
        return Err(ReleaseError::InstallIncomplete { destination });
    }

    Ok(destination)
}

fn package_dir_exists(path: &Utf8Path) -> Result<bool> {
    path.as_std_path()
        .try_exists()
        .map_err(|source| ReleaseError::PackageProbeFailed {
            path: path.to_owned(),
            source,
        })
}

#[cfg(unix)]
fn create_bin_dir(path: &Utf8Path) -> io::Result<()> {
    use std::os::unix::fs::{DirBuilderExt, PermissionsExt};

    fs::DirBuilder::new()
        .recursive(true)
        .mode(EXECUTABLE_MODE)
        .create(path)?;
    // The builder mode is filtered by the umask.
    fs::set_permissions(path, fs::Permissions::from_mode(EXECUTABLE_MODE))
}

#[cfg(not(unix))]
fn create_bin_dir(path: &Utf8Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

#[cfg(unix)]
fn mark_executable(path: &Utf8Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(EXECUTABLE_MODE))
}

#[cfg(not(unix))]
fn mark_executable(_path: &Utf8Path) -> io::Result<()> {
    Ok(())
}
