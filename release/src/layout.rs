//! Platform package naming and on-disk layout.
//!
//! Each platform package lives at `{packages_root}/cli-{os}-{arch}` using
//! Node.js identifiers, and ships its executable under `bin/`.

use crate::artifact::ArtifactDescriptor;
use crate::platform::{NodePlatform, map_platform};
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;

/// Executable name inside a platform package.
pub const BINARY_NAME: &str = "safedep";

/// Executable name inside the Windows platform package.
pub const WINDOWS_BINARY_NAME: &str = "safedep.exe";

/// Prefix shared by every platform package directory.
const PACKAGE_PREFIX: &str = "cli";

/// Directory of a platform package that holds the executable.
const BIN_DIR: &str = "bin";

/// Directory name of a platform package, such as `cli-linux-x64`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName(String);

impl PackageName {
    /// Build the package name for a Node.js platform pair.
    #[must_use]
    pub fn for_platform(platform: NodePlatform<'_>) -> Self {
        Self(format!("{PACKAGE_PREFIX}-{platform}"))
    }

    /// Get the package name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an artifact is installed, derived from its platform pair.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use safedep_release::artifact::ArtifactDescriptor;
/// use safedep_release::layout::PackageTarget;
///
/// let artifact = ArtifactDescriptor {
///     path: "dist/safedep_windows_amd64_v1/safedep.exe".into(),
///     goos: "windows".to_owned(),
///     goarch: "amd64".to_owned(),
///     kind: "Binary".to_owned(),
/// };
/// let target = PackageTarget::for_artifact(Utf8Path::new("packages"), &artifact);
/// assert_eq!(target.package_name().as_str(), "cli-win32-x64");
/// assert_eq!(target.binary_path(), Utf8Path::new("packages/cli-win32-x64/bin/safedep.exe"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageTarget {
    package_name: PackageName,
    package_dir: Utf8PathBuf,
    binary_file_name: &'static str,
}

impl PackageTarget {
    /// Derive the install target for `artifact` under `packages_root`.
    #[must_use]
    pub fn for_artifact(packages_root: &Utf8Path, artifact: &ArtifactDescriptor) -> Self {
        let package_name =
            PackageName::for_platform(map_platform(&artifact.goos, &artifact.goarch));
        let package_dir = packages_root.join(package_name.as_str());
        let binary_file_name = if artifact.is_windows() {
            WINDOWS_BINARY_NAME
        } else {
            BINARY_NAME
        };

        Self {
            package_name,
            package_dir,
            binary_file_name,
        }
    }

    /// Name of the platform package.
    #[must_use]
    pub fn package_name(&self) -> &PackageName {
        &self.package_name
    }

    /// Root directory of the platform package.
    #[must_use]
    pub fn package_dir(&self) -> &Utf8Path {
        &self.package_dir
    }

    /// The package's `bin/` directory.
    #[must_use]
    pub fn bin_dir(&self) -> Utf8PathBuf {
        self.package_dir.join(BIN_DIR)
    }

    /// File name of the installed executable.
    #[must_use]
    pub fn binary_file_name(&self) -> &'static str {
        self.binary_file_name
    }

    /// Full path of the installed executable.
    #[must_use]
    pub fn binary_path(&self) -> Utf8PathBuf {
        self.bin_dir().join(self.binary_file_name)
    }
}
