//! Artifact manifest loading and descriptor validation.
//!
//! goreleaser writes `dist/artifacts.json`, a JSON array describing every
//! file a build produced. Only entries of type `Binary` with a path and a
//! `GOOS`/`GOARCH` pair are installable. Decoding is lenient about absent
//! fields so that a single incomplete entry is reported by validation
//! instead of failing the whole manifest.

use crate::error::{ReleaseError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use thiserror::Error;

/// The `type` value that marks a compiled binary.
pub const BINARY_KIND: &str = "Binary";

/// One entry of the goreleaser artifact manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ArtifactDescriptor {
    /// Filesystem location of the produced file.
    pub path: Utf8PathBuf,
    /// Go operating system identifier.
    pub goos: String,
    /// Go architecture identifier.
    pub goarch: String,
    /// Artifact type as reported by goreleaser.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Reasons an artifact descriptor is not installable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// A required field is absent or empty.
    #[error("missing required field \"{field}\"")]
    MissingField {
        /// JSON name of the field.
        field: &'static str,
    },

    /// The artifact is not a binary.
    #[error("unsupported artifact type \"{kind}\"; expected \"Binary\"")]
    UnsupportedKind {
        /// The rejected type value.
        kind: String,
    },
}

impl ArtifactDescriptor {
    /// Check that the descriptor names an installable binary.
    ///
    /// Fields are checked in manifest order (`path`, `goos`, `goarch`,
    /// `type`) and the first failure is reported.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError`] when a field is empty or the type is not
    /// [`BINARY_KIND`].
    ///
    /// # Examples
    ///
    /// ```
    /// use safedep_release::artifact::{ArtifactDescriptor, DescriptorError};
    ///
    /// let descriptor = ArtifactDescriptor {
    ///     path: "dist/safedep_linux_amd64_v1/safedep".into(),
    ///     goos: "linux".to_owned(),
    ///     goarch: "amd64".to_owned(),
    ///     kind: "Archive".to_owned(),
    /// };
    /// assert!(matches!(
    ///     descriptor.validate(),
    ///     Err(DescriptorError::UnsupportedKind { .. })
    /// ));
    /// ```
    pub fn validate(&self) -> std::result::Result<(), DescriptorError> {
        let required = [
            ("path", self.path.as_str()),
            ("goos", self.goos.as_str()),
            ("goarch", self.goarch.as_str()),
            ("type", self.kind.as_str()),
        ];
        if let Some(&(field, _)) = required.iter().find(|(_, value)| value.is_empty()) {
            return Err(DescriptorError::MissingField { field });
        }

        if self.kind != BINARY_KIND {
            return Err(DescriptorError::UnsupportedKind {
                kind: self.kind.clone(),
            });
        }

        Ok(())
    }

    /// Whether the descriptor was built for Windows.
    #[must_use]
    pub fn is_windows(&self) -> bool {
        self.goos == crate::platform::WINDOWS_GOOS
    }
}

/// Parse the artifact manifest from a JSON string, preserving entry order.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] when the document is not an array of
/// objects or a field has the wrong JSON type.
pub fn parse_artifacts(json: &str) -> serde_json::Result<Vec<ArtifactDescriptor>> {
    serde_json::from_str(json)
}

/// Read and parse the artifact manifest at `path`.
///
/// # Errors
///
/// Returns [`ReleaseError::ArtifactManifestUnreadable`] if the file cannot
/// be read and [`ReleaseError::ArtifactManifestInvalid`] if it does not parse.
pub fn load_artifacts(path: &Utf8Path) -> Result<Vec<ArtifactDescriptor>> {
    let contents =
        std::fs::read_to_string(path).map_err(|source| ReleaseError::ArtifactManifestUnreadable {
            path: path.to_owned(),
            source,
        })?;

    parse_artifacts(&contents).map_err(|source| ReleaseError::ArtifactManifestInvalid {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn linux_binary() -> ArtifactDescriptor {
        ArtifactDescriptor {
            path: Utf8PathBuf::from("dist/safedep_linux_amd64_v1/safedep"),
            goos: "linux".to_owned(),
            goarch: "amd64".to_owned(),
            kind: BINARY_KIND.to_owned(),
        }
    }

    #[rstest]
    fn accepts_complete_binary(linux_binary: ArtifactDescriptor) {
        assert_eq!(linux_binary.validate(), Ok(()));
    }

    #[rstest]
    #[case::path("path")]
    #[case::goos("goos")]
    #[case::goarch("goarch")]
    #[case::kind("type")]
    fn rejects_empty_field(mut linux_binary: ArtifactDescriptor, #[case] field: &'static str) {
        match field {
            "path" => linux_binary.path = Utf8PathBuf::new(),
            "goos" => linux_binary.goos.clear(),
            "goarch" => linux_binary.goarch.clear(),
            _ => linux_binary.kind.clear(),
        }
        assert_eq!(
            linux_binary.validate(),
            Err(DescriptorError::MissingField { field })
        );
    }

    #[rstest]
    #[case::archive("Archive")]
    #[case::checksum("Checksum")]
    #[case::lower_case("binary")]
    fn rejects_non_binary_kind(mut linux_binary: ArtifactDescriptor, #[case] kind: &str) {
        linux_binary.kind = kind.to_owned();
        assert_eq!(
            linux_binary.validate(),
            Err(DescriptorError::UnsupportedKind {
                kind: kind.to_owned()
            })
        );
    }

    #[test]
    fn first_missing_field_is_reported() {
        let descriptor = ArtifactDescriptor::default();
        assert_eq!(
            descriptor.validate(),
            Err(DescriptorError::MissingField { field: "path" })
        );
    }

    #[test]
    fn parse_preserves_order_and_tolerates_absent_fields() {
        let json = r#"[
            {"name": "safedep", "path": "dist/a/safedep", "goos": "darwin", "goarch": "arm64", "type": "Binary"},
            {"name": "checksums.txt", "path": "dist/checksums.txt", "type": "Checksum"},
            {"path": "dist/b/safedep.exe", "goos": "windows", "goarch": "amd64", "type": "Binary", "extra": {"ID": "cli"}}
        ]"#;

        let artifacts = parse_artifacts(json).expect("manifest should parse");
        assert_eq!(artifacts.len(), 3);
        assert_eq!(artifacts[0].goos, "darwin");
        assert!(artifacts[1].goos.is_empty());
        assert!(artifacts[2].is_windows());
    }

    #[rstest]
    #[case::object(r#"{"path": "dist/safedep"}"#)]
    #[case::wrong_field_type(r#"[{"path": 7}]"#)]
    #[case::truncated(r#"[{"path": "dist/safedep""#)]
    fn parse_rejects_malformed_manifest(#[case] json: &str) {
        assert!(parse_artifacts(json).is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = Utf8PathBuf::try_from(dir.path().join("artifacts.json")).expect("utf-8 path");

        let err = load_artifacts(&path).expect_err("missing manifest should fail");
        assert!(matches!(
            err,
            ReleaseError::ArtifactManifestUnreadable { .. }
        ));
    }

    #[test]
    fn load_reports_unparsable_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = Utf8PathBuf::try_from(dir.path().join("artifacts.json")).expect("utf-8 path");
        std::fs::write(&path, "not json").expect("write manifest");

        let err = load_artifacts(&path).expect_err("invalid manifest should fail");
        assert!(matches!(err, ReleaseError::ArtifactManifestInvalid { .. }));
    }
}
