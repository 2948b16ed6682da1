//! End-to-end exit status checks for the release binaries.

use camino::{Utf8Path, Utf8PathBuf};
use rstest::{fixture, rstest};
use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

const SYNC_BINARIES: &str = env!("CARGO_BIN_EXE_sync-binaries");
const CHECK_VERSION_SYNC: &str = env!("CARGO_BIN_EXE_check-version-sync");

struct Release {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Release {
    fn packages(&self) -> Utf8PathBuf {
        self.root.join("packages")
    }

    fn add_package(&self, dir: &str, version: &str) {
        let package_dir = self.packages().join(dir);
        fs::create_dir_all(&package_dir).expect("create package dir");
        let body = serde_json::json!({ "name": format!("@safedep/{dir}"), "version": version });
        fs::write(package_dir.join("package.json"), body.to_string()).expect("write package.json");
    }

    fn write_manifest(&self, platforms: &[(&str, &str)]) -> Utf8PathBuf {
        let dist = self.root.join("dist");
        let mut entries = Vec::new();
        for (goos, goarch) in platforms {
            let build_dir = dist.join(format!("safedep_{goos}_{goarch}"));
            fs::create_dir_all(&build_dir).expect("create build dir");
            let binary = build_dir.join("safedep");
            fs::write(&binary, format!("{goos}-{goarch}")).expect("write binary");
            entries.push(serde_json::json!({
                "path": binary,
                "goos": goos,
                "goarch": goarch,
                "type": "Binary",
            }));
        }
        let manifest = dist.join("artifacts.json");
        fs::write(&manifest, serde_json::Value::Array(entries).to_string())
            .expect("write manifest");
        manifest
    }
}

#[fixture]
fn release() -> Release {
    let dir = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("utf-8 temp dir");
    fs::create_dir_all(root.join("packages")).expect("create packages root");
    Release { _dir: dir, root }
}

fn run(binary: &str, cwd: &Utf8Path, args: &[&str]) -> Output {
    Command::new(binary)
        .current_dir(cwd)
        .args(args)
        .env("RUST_LOG", "info")
        .env("NO_COLOR", "1")
        .output()
        .expect("binary should launch")
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[rstest]
fn sync_binaries_installs_with_default_paths(release: Release) {
    release.add_package("cli-linux-x64", "1.0.0");
    release.write_manifest(&[("linux", "amd64")]);

    let output = run(SYNC_BINARIES, &release.root, &[]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let installed = release.packages().join("cli-linux-x64/bin/safedep");
    assert_eq!(fs::read_to_string(installed).expect("installed"), "linux-amd64");
}

#[rstest]
fn sync_binaries_fails_without_manifest(release: Release) {
    let output = run(SYNC_BINARIES, &release.root, &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("goreleaser build"));
}

#[rstest]
#[case::strict_by_default(&[], false)]
#[case::lenient(&["--strict=false"], true)]
fn sync_binaries_missing_package(
    release: Release,
    #[case] extra: &[&str],
    #[case] succeeds: bool,
) {
    release.write_manifest(&[("darwin", "arm64")]);

    let output = run(SYNC_BINARIES, &release.root, extra);

    assert_eq!(output.status.success(), succeeds, "stderr: {}", stderr_of(&output));
    assert!(stderr_of(&output).contains("cli-darwin-arm64"));
}

#[rstest]
fn check_version_sync_passes_for_matching_versions(release: Release) {
    release.add_package("cli", "1.4.0");
    release.add_package("cli-linux-x64", "1.4.0");

    let output = run(CHECK_VERSION_SYNC, &release.root, &[]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stderr_of(&output).contains("all 2 packages are at version: 1.4.0"));
}

#[rstest]
fn check_version_sync_fails_on_drift(release: Release) {
    release.add_package("cli", "1.4.0");
    release.add_package("cli-linux-x64", "1.3.9");

    let output = run(
        CHECK_VERSION_SYNC,
        &release.root,
        &["--packages-path", release.packages().as_str()],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("@safedep/cli is at 1.4.0"), "stderr: {stderr}");
    assert!(stderr.contains("@safedep/cli-linux-x64 is at 1.3.9"), "stderr: {stderr}");
}

