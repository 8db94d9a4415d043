use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use predicates::prelude::*;

const MANIFEST: &str = "node_modules/next/package.json";

fn nextpatch(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("nextpatch").unwrap();
    cmd.current_dir(temp.path())
        .env_remove("PROJECT_DIR")
        .env_remove("DRY_RUN")
        .env_remove("VERBOSE");
    cmd
}

#[test]
fn skips_when_next_is_not_installed() {
    let temp = TempDir::new().unwrap();

    nextpatch(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("skipping patch"));

    temp.child("node_modules").assert(predicate::path::missing());
}

#[test]
fn patches_then_reports_nothing_to_do() {
    let temp = TempDir::new().unwrap();
    let manifest = temp.child(MANIFEST);
    manifest.write_str(r#"{"name": "next", "version": "14.2.3", "dependencies": {"cross-spawn": "7.0.3", "glob": "10.3.10", "busboy": "1.6.0"}}"#).unwrap();

    nextpatch(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("Next dependencies: cross-spawn: 7.0.5, glob: 10.5.0"));

    manifest.assert("{\n  \"name\": \"next\",\n  \"version\": \"14.2.3\",\n  \"dependencies\": {\n    \"cross-spawn\": \"7.0.5\",\n    \"glob\": \"10.5.0\",\n    \"busboy\": \"1.6.0\"\n  }\n}");

    nextpatch(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("No patch needed"));
}

#[test]
fn project_dir_flag_points_at_another_root() {
    let temp = TempDir::new().unwrap();
    let app = temp.child("app");
    let manifest = app.child(MANIFEST);
    manifest.write_str(r#"{"devDependencies": {"glob": "^8.0.0"}}"#).unwrap();

    nextpatch(&temp)
        .args(["--project-dir", "app"])
        .assert()
        .success();

    manifest.assert("{\n  \"devDependencies\": {\n    \"glob\": \"10.5.0\"\n  }\n}");
}

#[test]
fn dry_run_leaves_manifest_alone() {
    let temp = TempDir::new().unwrap();
    let data = r#"{"dependencies": {"cross-spawn": "7.0.3"}}"#;
    let manifest = temp.child(MANIFEST);
    manifest.write_str(data).unwrap();

    nextpatch(&temp)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("dry run, nothing written"));

    manifest.assert(data);
}

#[test]
fn malformed_manifest_exits_non_zero() {
    let temp = TempDir::new().unwrap();
    let manifest = temp.child(MANIFEST);
    manifest.write_str("{ not json").unwrap();

    nextpatch(&temp)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Patching failed: parsing"));

    manifest.assert("{ not json");
}

#[test]
fn verbose_explains_each_target() {
    let temp = TempDir::new().unwrap();
    temp.child(MANIFEST)
        .write_str(r#"{"name": "next", "version": "14.2.3", "dependencies": {"cross-spawn": "^7.0.3"}}"#)
        .unwrap();

    nextpatch(&temp)
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("checking 2 targets against next@14.2.3"))
        .stdout(predicate::str::contains("cross-spawn range ^7.0.3 already admits 7.0.5"))
        .stdout(predicate::str::contains("dependencies: glob not declared"))
        .stdout(predicate::str::contains("devDependencies: not present"));
}

#[test]
fn null_specifier_is_left_alone() {
    let temp = TempDir::new().unwrap();
    let manifest = temp.child(MANIFEST);
    manifest.write_str(r#"{"dependencies": {"cross-spawn": null}}"#).unwrap();

    nextpatch(&temp)
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("dependencies: cross-spawn has an empty specifier"))
        .stdout(predicate::str::contains("No patch needed"));

    manifest.assert(r#"{"dependencies": {"cross-spawn": null}}"#);
}
