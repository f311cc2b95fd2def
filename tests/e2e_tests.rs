//! End-to-end tests for the wrapup CLI
//!
//! These tests verify:
//! - Exit codes for clean runs and precondition failures
//! - Update flows through the real binary against file remotes
//! - JSON output schema
//!
//! Every test pins `WRAPUP_SYSTEM_ROOT` and `WRAPUP_REMOTES_CONFIG` to
//! per-test locations so runs never touch the invoking user's machine.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Writes a minimal `<name>-<version>.wrap` archive into `dir`
fn write_wrap_archive(dir: &Path, name: &str, version: &str) -> PathBuf {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let path = dir.join(format!("{}-{}.wrap", name, version));
    let file = fs::File::create(&path).unwrap();
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    let manifest = format!("{} {}\n", name, version);
    let mut header = tar::Header::new_gnu();
    header.set_size(manifest.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder
        .append_data(&mut header, "manifest.txt", manifest.as_bytes())
        .unwrap();
    builder.into_inner().unwrap().finish().unwrap();
    path
}

struct Fixture {
    current: TempDir,
    system_root: TempDir,
    config_dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            current: TempDir::new().unwrap(),
            system_root: TempDir::new().unwrap(),
            config_dir: TempDir::new().unwrap(),
        }
    }

    /// Points the remotes configuration at a single file:// feed
    fn add_file_remote(&self, feed: &Path) {
        let config = self.config_dir.path().join("remotes.toml");
        fs::write(
            &config,
            format!(
                "[[remotes]]\nname = \"main feed\"\nhref = \"file://{}\"\n",
                feed.display()
            ),
        )
        .unwrap();
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("wrapup").unwrap();
        cmd.current_dir(self.current.path())
            .env("WRAPUP_SYSTEM_ROOT", self.system_root.path())
            .env(
                "WRAPUP_REMOTES_CONFIG",
                self.config_dir.path().join("remotes.toml"),
            );
        cmd
    }
}

#[test]
fn test_update_without_project_is_a_precondition_failure() {
    let fixture = Fixture::new();

    fixture
        .command()
        .arg("update")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Project repository not found"))
        .stdout(predicate::str::contains("--system"));
}

#[test]
fn test_system_update_with_no_packages_succeeds() {
    let fixture = Fixture::new();

    fixture
        .command()
        .args(["update", "--system"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Searching for updated packages..."));
}

#[test]
fn test_system_update_pulls_from_file_remote() {
    let fixture = Fixture::new();
    let feed = TempDir::new().unwrap();

    write_wrap_archive(fixture.system_root.path(), "openwrap", "1.0.0.0");
    write_wrap_archive(feed.path(), "openwrap", "1.0.1.0");
    fs::write(
        feed.path().join("index.toml"),
        "[packages]\nopenwrap = [\"1.0.1.0\"]\n",
    )
    .unwrap();
    fixture.add_file_remote(feed.path());

    fixture
        .command()
        .args(["update", "--system"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Copying 'openwrap-1.0.1.0'"));

    assert!(fixture
        .system_root
        .path()
        .join("openwrap-1.0.1.0.wrap")
        .exists());
}

#[test]
fn test_project_update_copies_into_wraps() {
    let fixture = Fixture::new();
    let feed = TempDir::new().unwrap();

    fs::write(
        fixture.current.path().join("wrap.toml"),
        "[dependencies]\nopenwrap = \"> 1.0\"\n",
    )
    .unwrap();
    let wraps = fixture.current.path().join("wraps");
    fs::create_dir(&wraps).unwrap();

    write_wrap_archive(feed.path(), "openwrap", "2.0.0.0");
    fs::write(
        feed.path().join("index.toml"),
        "[packages]\nopenwrap = [\"2.0.0.0\"]\n",
    )
    .unwrap();
    fixture.add_file_remote(feed.path());

    fixture
        .command()
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Copying 'openwrap-2.0.0.0' to 'project repository'",
        ));

    assert!(wraps.join("openwrap-2.0.0.0.wrap").exists());
    assert!(wraps.join("_cache/openwrap-2.0.0.0").is_dir());
}

#[test]
fn test_project_update_missing_dependency_exits_cleanly_with_warning() {
    let fixture = Fixture::new();

    fs::write(
        fixture.current.path().join("wrap.toml"),
        "[dependencies]\nghost = \"> 1.0\"\n",
    )
    .unwrap();
    fs::create_dir(fixture.current.path().join("wraps")).unwrap();

    // Not-found is a warning, not an error: exit code stays 0
    fixture
        .command()
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("'ghost > 1.0.0.0' not found in '"));
}

#[test]
fn test_json_output_schema() {
    let fixture = Fixture::new();

    let output = fixture
        .command()
        .args(["update", "--system", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let events = parsed["events"].as_array().unwrap();
    assert!(events
        .iter()
        .any(|e| e["message"] == "Searching for updated packages..."));
}

#[test]
fn test_quiet_mode_suppresses_informational_output() {
    let fixture = Fixture::new();

    fixture
        .command()
        .args(["update", "--system", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_list_system_repository() {
    let fixture = Fixture::new();
    write_wrap_archive(fixture.system_root.path(), "foo", "1.0.0.0");
    write_wrap_archive(fixture.system_root.path(), "foo", "2.0.0.0");

    fixture
        .command()
        .args(["list", "--system"])
        .assert()
        .success()
        .stdout(predicate::str::contains("foo: 1.0.0.0, 2.0.0.0"));
}

#[test]
fn test_invalid_descriptor_is_fatal() {
    let fixture = Fixture::new();
    fs::write(
        fixture.current.path().join("wrap.toml"),
        "[dependencies]\nfoo = \">= 1.0\"\n",
    )
    .unwrap();

    fixture
        .command()
        .arg("update")
        .assert()
        .failure()
        .stderr(predicate::str::contains("foo"));
}
