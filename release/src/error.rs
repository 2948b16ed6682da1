//! Error types for the release tooling.
//!
//! Every variant here is fatal: the binaries print the message and exit with
//! a non-zero status. Soft failures (an artifact descriptor that does not
//! validate, or a missing package directory under the lenient policy) are
//! not errors at this level; they are recorded in the distribution report.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Fatal errors raised by the distribution and verification pipelines.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// A required path setting was left empty.
    #[error("{name} is required")]
    MissingSetting {
        /// Flag name of the empty setting.
        name: &'static str,
    },

    /// The artifact manifest could not be read.
    #[error("failed to read {path}; did you run goreleaser build?")]
    ArtifactManifestUnreadable {
        /// Location of the manifest.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The artifact manifest is not a JSON array of artifact objects.
    #[error("failed to parse {path}")]
    ArtifactManifestInvalid {
        /// Location of the manifest.
        path: Utf8PathBuf,
        /// The underlying decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// Strict policy: the package directory for an artifact does not exist.
    #[error("package directory {path} does not exist")]
    PackageDirectoryMissing {
        /// The expected package directory.
        path: Utf8PathBuf,
    },

    /// Creating the `bin/` directory or copying the binary failed.
    #[error("failed to install {source_path} to {destination}")]
    InstallFailed {
        /// The artifact being installed.
        source_path: Utf8PathBuf,
        /// The intended destination file.
        destination: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The binary was copied but is not present at its destination.
    #[error("installed binary is missing at {destination}")]
    InstallIncomplete {
        /// The destination that failed the post-install check.
        destination: Utf8PathBuf,
    },

    /// The packages root could not be listed.
    #[error("failed to read packages directory {path}")]
    PackagesUnreadable {
        /// The packages root.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A package directory name is not valid UTF-8.
    #[error("package directory {} has a non-UTF-8 name", .path.display())]
    PackageDirectoryNotUtf8 {
        /// The offending directory.
        path: std::path::PathBuf,
    },

    /// The existence check for a package directory failed.
    #[error("failed to check package directory {path}")]
    PackageProbeFailed {
        /// The package directory being checked.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A package's `package.json` could not be read.
    #[error("failed to read {path}")]
    PackageJsonUnreadable {
        /// Location of the metadata file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A package's `package.json` is not valid package metadata.
    #[error("failed to parse {path}")]
    PackageJsonInvalid {
        /// Location of the metadata file.
        path: Utf8PathBuf,
        /// The underlying decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// A non-private package declares no version.
    #[error("package {package} has no version field in {path}")]
    MissingVersion {
        /// Directory name of the offending package.
        package: String,
        /// Location of the metadata file.
        path: Utf8PathBuf,
    },

    /// Every package under the root is private, or the root is empty.
    #[error("no non-private packages found in {path}")]
    NoPackages {
        /// The packages root.
        path: Utf8PathBuf,
    },

    /// Two packages declare different versions.
    #[error("version mismatch: {expected_package} is at {expected} but {found_package} is at {found}")]
    VersionMismatch {
        /// Package whose version was taken as canonical.
        expected_package: String,
        /// The canonical version.
        expected: String,
        /// Package whose version differs.
        found_package: String,
        /// The differing version.
        found: String,
    },

    /// HEAD carries no exact tag.
    #[error(
        "no exact git tag on HEAD; expected tag v{expected}\n\
         create it with: git tag v{expected} && git push origin v{expected}"
    )]
    NoExactTag {
        /// The canonical package version.
        expected: String,
    },

    /// The tag query returned more than one candidate.
    #[error("ambiguous git tags on HEAD ({found}); expected exactly v{expected}")]
    AmbiguousTag {
        /// The raw query output.
        found: String,
        /// The canonical package version.
        expected: String,
    },

    /// The exact tag at HEAD names a different version.
    #[error("git tag {tag} does not match npm version {expected}")]
    TagMismatch {
        /// The tag found on HEAD.
        tag: String,
        /// The canonical package version.
        expected: String,
    },

    /// An I/O operation failed.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// Test stub received an unexpected or mismatched command invocation.
    #[cfg(any(test, feature = "test-support"))]
    #[error("stub mismatch: {message}")]
    StubMismatch {
        /// Description of what was expected versus what was received.
        message: String,
    },
}

impl ReleaseError {
    /// Render the error and its chain of causes on one line.
    ///
    /// # Examples
    ///
    /// ```
    /// use safedep_release::error::ReleaseError;
    ///
    /// let err = ReleaseError::PackageJsonUnreadable {
    ///     path: "packages/cli/package.json".into(),
    ///     source: std::io::Error::other("permission denied"),
    /// };
    /// assert_eq!(
    ///     err.report(),
    ///     "failed to read packages/cli/package.json: permission denied"
    /// );
    /// ```
    #[must_use]
    pub fn report(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

/// Result type alias using [`ReleaseError`].
pub type Result<T> = std::result::Result<T, ReleaseError>;
