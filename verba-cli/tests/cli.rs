use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::{fs, path::Path, process::Command};

fn bin_cmd() -> Command {
    let mut cmd = Command::cargo_bin("verba").expect("verba built");
    cmd.arg("--no-color");
    cmd
}

fn write_messages(root: &Path) {
    fs::write(root.join("app.properties"), "greeting=hi\nwelcome=Welcome, {0}!\n").unwrap();
    fs::write(root.join("app_de.properties"), "greeting=hallo\n").unwrap();
    fs::write(root.join("app_de_DE.properties"), "greeting=guten Tag\n").unwrap();
    fs::write(root.join("errors.properties"), "not_found={0} was not found\n").unwrap();
}

#[test]
fn basenames_lists_sorted_names() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_messages(tmp.path());

    bin_cmd()
        .args(["basenames", "--source-dir"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout("app\nerrors\n");
}

#[test]
fn show_prints_summary_and_full_dump() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_messages(tmp.path());

    bin_cmd()
        .args(["show", "app", "--source-dir"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 messages for locale default (base)"))
        .stdout(predicate::str::contains("1 messages for locale de_DE"));

    bin_cmd()
        .args(["show", "app", "--full", "--source-dir"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Messages for locale de\n"))
        .stdout(predicate::str::contains("greeting=hallo\n"));
}

#[test]
fn resolve_walks_locale_fallback() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_messages(tmp.path());

    bin_cmd()
        .args(["resolve", "greeting", "--locale", "de_AT", "--source-dir"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout("hallo\n");

    bin_cmd()
        .args(["resolve", "greeting", "--locale", "fr_FR", "--source-dir"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout("hi\n");

    bin_cmd()
        .args(["resolve", "welcome", "--arg", "Ada", "--source-dir"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout("Welcome, Ada!\n");
}

#[test]
fn resolve_uses_default_locale_and_basename_order() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_messages(tmp.path());
    fs::write(tmp.path().join("app_en.properties"), "greeting=hello\n").unwrap();

    bin_cmd()
        .args(["resolve", "greeting", "--locale", "fr_FR", "--default-locale", "en_US", "--source-dir"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout("hello\n");

    bin_cmd()
        .args(["resolve", "greeting", "-b", "errors", "--source-dir"])
        .arg(tmp.path())
        .assert()
        .failure();
}

#[test]
fn resolve_missing_code() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_messages(tmp.path());

    bin_cmd()
        .args(["resolve", "nope", "--source-dir"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No message found for code 'nope'"));

    bin_cmd()
        .args(["resolve", "nope", "--fallback-to-code", "--source-dir"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout("nope\n");
}

#[test]
fn missing_source_directory_fails() {
    let tmp = tempfile::tempdir().expect("tempdir");

    bin_cmd()
        .args(["basenames", "--source-dir"])
        .arg(tmp.path().join("absent"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn transfer_to_directory_and_zip() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let source = tmp.path().join("src");
    fs::create_dir(&source).unwrap();
    write_messages(&source);
    let target = tmp.path().join("out");

    bin_cmd()
        .args(["transfer", "-b", "app", "--source-dir"])
        .arg(&source)
        .arg("--target-dir")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("app: 4 messages in 3 locales"));

    assert!(target.join("app_de_DE.properties").is_file());
    assert!(!target.join("errors.properties").exists());

    let archive = tmp.path().join("messages.zip");
    bin_cmd()
        .args(["transfer", "--source-dir"])
        .arg(&source)
        .arg("--target-zip")
        .arg(&archive)
        .assert()
        .success();

    let zip = zip::ZipArchive::new(fs::File::open(&archive).unwrap()).unwrap();
    let mut names: Vec<&str> = zip.file_names().collect();
    names.sort();
    assert_eq!(
        names,
        [
            "app.properties",
            "app_de.properties",
            "app_de_DE.properties",
            "errors.properties"
        ]
    );
}

#[test]
fn transfer_to_database_and_read_back() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let source = tmp.path().join("src");
    fs::create_dir(&source).unwrap();
    write_messages(&source);
    let url = format!("sqlite://{}?mode=rwc", tmp.path().join("messages.db").display());

    bin_cmd()
        .args(["transfer", "--source-dir"])
        .arg(&source)
        .args(["--target-db", &url])
        .assert()
        .success();

    bin_cmd()
        .args(["basenames", "--source-db", &url])
        .assert()
        .success()
        .stdout("app\nerrors\n");

    bin_cmd()
        .args(["resolve", "greeting", "--locale", "de_DE", "--source-db", &url])
        .assert()
        .success()
        .stdout("guten Tag\n");
}
