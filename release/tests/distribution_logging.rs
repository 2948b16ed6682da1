//! Log output emitted while distributing binaries.
//!
//! `logtest` installs a process-wide logger, so this file holds a single
//! test.

use camino::Utf8PathBuf;
use log::Level;
use logtest::Logger;
use safedep_release::artifact::ArtifactDescriptor;
use safedep_release::config::FailurePolicy;
use safedep_release::distribute::distribute;
use std::fs;

#[test]
fn skipped_artifacts_are_logged_as_warnings() {
    let mut logger = Logger::start();
    let dir = tempfile::tempdir().expect("temp dir");
    let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("utf-8 temp dir");
    fs::create_dir_all(root.join("packages")).expect("create packages root");

    let artifacts = vec![
        ArtifactDescriptor {
            path: root.join("dist/safedep.tar.gz"),
            goos: "linux".to_owned(),
            goarch: "amd64".to_owned(),
            kind: "Archive".to_owned(),
        },
        ArtifactDescriptor {
            path: root.join("dist/safedep"),
            goos: "linux".to_owned(),
            goarch: "amd64".to_owned(),
            kind: "Binary".to_owned(),
        },
    ];

    let report = distribute(&artifacts, &root.join("packages"), FailurePolicy::Lenient)
        .expect("lenient distribution succeeds");
    assert_eq!(report.skipped.len(), 2);

    let mut invalid_warned = false;
    let mut missing_warned = false;
    while let Some(record) = logger.pop() {
        if record.level() != Level::Warn {
            continue;
        }
        let message = record.args().to_string();
        invalid_warned |= message.contains("skipping invalid artifact #0");
        missing_warned |= message.contains("cli-linux-x64 does not exist");
    }

    assert!(invalid_warned, "expected the invalid artifact to be logged");
    assert!(missing_warned, "expected the missing package to be logged");
}
