//! Package metadata scanner for the npm packages root.
//!
//! Every immediate subdirectory of the packages root is expected to hold a
//! `package.json`. Subdirectories are visited in name order; private
//! packages are logged and left out of the resulting [`VersionSet`].

use crate::error::{ReleaseError, Result};
use camino::Utf8Path;
use log::info;
use serde::Deserialize;

/// Metadata file read from each package directory.
pub const PACKAGE_JSON: &str = "package.json";

/// The subset of `package.json` the version check needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PackageManifestRecord {
    /// npm package name.
    pub name: String,
    /// Declared package version.
    pub version: String,
    /// Whether the package is excluded from publishing.
    pub private: bool,
}

/// The non-private packages found in one scan, in directory order.
///
/// A set always holds at least one record; the first record's version is
/// the canonical version of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSet {
    first: PackageManifestRecord,
    rest: Vec<PackageManifestRecord>,
}

impl VersionSet {
    /// Build a set from scanned records, or `None` when there are none.
    #[must_use]
    pub fn from_records(records: Vec<PackageManifestRecord>) -> Option<Self> {
        let mut records = records.into_iter();
        let first = records.next()?;
        Some(Self {
            first,
            rest: records.collect(),
        })
    }

    /// The record whose version is canonical.
    #[must_use]
    pub fn first(&self) -> &PackageManifestRecord {
        &self.first
    }

    /// The canonical version string.
    #[must_use]
    pub fn canonical(&self) -> &str {
        &self.first.version
    }

    /// Records after the first, in scan order.
    #[must_use]
    pub fn rest(&self) -> &[PackageManifestRecord] {
        &self.rest
    }

    /// All records in scan order.
    pub fn iter(&self) -> impl Iterator<Item = &PackageManifestRecord> {
        std::iter::once(&self.first).chain(&self.rest)
    }

    /// Number of records in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    /// Always `false`; a set is never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Read and parse a single `package.json`.
///
/// # Errors
///
/// Returns [`ReleaseError::PackageJsonUnreadable`] or
/// [`ReleaseError::PackageJsonInvalid`].
pub fn read_package_json(path: &Utf8Path) -> Result<PackageManifestRecord> {
    let contents =
        std::fs::read_to_string(path).map_err(|source| ReleaseError::PackageJsonUnreadable {
            path: path.to_owned(),
            source,
        })?;

    serde_json::from_str(&contents).map_err(|source| ReleaseError::PackageJsonInvalid {
        path: path.to_owned(),
        source,
    })
}

/// Scan `packages_root` and collect the versions of its non-private
/// packages.
///
/// Only real subdirectories are considered: files and symlinks directly
/// under the root are ignored, whatever their names.
///
/// # Errors
///
/// Returns an error if the root cannot be listed, any package metadata is
/// missing or malformed, a non-private package has no version, or no
/// non-private package exists.
pub fn scan_packages(packages_root: &Utf8Path) -> Result<VersionSet> {
    let unreadable = |source: std::io::Error| ReleaseError::PackagesUnreadable {
        path: packages_root.to_owned(),
        source,
    };

    let mut directories = Vec::new();
    for entry in std::fs::read_dir(packages_root).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        // Symlinks are not followed.
        if !entry.file_type().map_err(unreadable)?.is_dir() {
            continue;
        }
        let name = entry
            .file_name()
            .into_string()
            .map_err(|_| ReleaseError::PackageDirectoryNotUtf8 { path: entry.path() })?;
        directories.push(name);
    }
    directories.sort();

    let mut records = Vec::new();
    for directory in directories {
        let path = packages_root.join(&directory).join(PACKAGE_JSON);
        let record = read_package_json(&path)?;

        if record.private {
            info!("skipping private package: {directory}");
            continue;
        }
        if record.version.is_empty() {
            return Err(ReleaseError::MissingVersion {
                package: directory,
                path,
            });
        }

        info!("{}: {}", record.name, record.version);
        records.push(record);
    }

    VersionSet::from_records(records).ok_or_else(|| ReleaseError::NoPackages {
        path: packages_root.to_owned(),
    })
}
