use assert_cmd::Command;
use std::fs;
use std::path::Path;

/*-------------------------------------------------------------------------------------------------
  servicetag-edl Binary Tests
-------------------------------------------------------------------------------------------------*/

const DOCUMENT: &str = r#"{"values":[{"name":"Tag1","properties":{"addressPrefixes":["10.0.0.0/8","2001:db8::/32","not-an-ip"]}}]}"#;

/// Command running in `dir` with a clean URL-base environment.
fn command(dir: &Path) -> Command {
    let mut command = Command::cargo_bin("servicetag-edl").unwrap();
    command
        .current_dir(dir)
        .env_remove("EDL_URL_BASE")
        .env_remove("GITHUB_REPOSITORY")
        .env_remove("GITHUB_REF_NAME");
    command
}

fn write_document(dir: &Path, document: &str) {
    fs::write(dir.join("ServiceTags_Public.json"), document).unwrap();
}

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).unwrap()
}

/*--------------------------------------------------------------------------------------
  Version and Help
--------------------------------------------------------------------------------------*/

#[test]
fn command_version() {
    Command::cargo_bin("servicetag-edl")
        .unwrap()
        .arg("--version")
        .assert()
        .success();
}

#[test]
fn command_help() {
    let output = Command::cargo_bin("servicetag-edl")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    for option in ["--include-tags", "--exclude-tags", "--save-json", "--url-index", "--url-base"] {
        assert!(help.contains(option), "missing {option} in help");
    }
}

#[test]
fn command_requires_output_dir() {
    Command::cargo_bin("servicetag-edl")
        .unwrap()
        .assert()
        .failure()
        .code(2);
}

/*--------------------------------------------------------------------------------------
  Offline Runs (--source-json)
--------------------------------------------------------------------------------------*/

#[test]
fn command_writes_edl_files() {
    let dir = tempfile::tempdir().unwrap();
    write_document(dir.path(), DOCUMENT);

    let output = command(dir.path())
        .args(["out", "--source-json", "ServiceTags_Public.json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not-an-ip"));
    assert!(stderr.contains("total=3, v4=1, v6=1"));

    let out = dir.path().join("out");
    assert_eq!(read(out.join("Tag1.txt")), "10.0.0.0/8\n2001:db8::/32\nnot-an-ip\n");
    assert_eq!(read(out.join("Tag1-v4.txt")), "10.0.0.0/8\n");
    assert_eq!(read(out.join("Tag1-v6.txt")), "2001:db8::/32\n");
}

#[test]
fn command_writes_url_index() {
    let dir = tempfile::tempdir().unwrap();
    write_document(
        dir.path(),
        r#"{"values":[{"name":"East US","properties":{"addressPrefixes":["10.0.0.0/8"]}}]}"#,
    );

    command(dir.path())
        .args([
            "edl",
            "--source-json",
            "ServiceTags_Public.json",
            "--url-index",
            "index/edl.csv",
            "--url-base",
            "https://x.test/",
        ])
        .assert()
        .success();

    assert_eq!(
        read(dir.path().join("index").join("edl.csv")),
        "East US,https://x.test/edl/East_US.txt,all\n\
         East US,https://x.test/edl/East_US-v4.txt,ipv4\n\
         East US,https://x.test/edl/East_US-v6.txt,ipv6\n"
    );
}

#[test]
fn command_url_base_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    write_document(dir.path(), DOCUMENT);

    command(dir.path())
        .env("GITHUB_REPOSITORY", "acme/edl")
        .env("GITHUB_REF_NAME", "main")
        .args(["edl", "--source-json", "ServiceTags_Public.json", "--url-index", "index.csv"])
        .assert()
        .success();

    let index = read(dir.path().join("index.csv"));
    assert!(index.starts_with("Tag1,https://raw.githubusercontent.com/acme/edl/main/edl/Tag1.txt,all\n"));

    command(dir.path())
        .env("EDL_URL_BASE", "https://lists.example.com")
        .env("GITHUB_REPOSITORY", "acme/edl")
        .env("GITHUB_REF_NAME", "main")
        .args(["edl", "--source-json", "ServiceTags_Public.json", "--url-index", "index.csv"])
        .assert()
        .success();

    let index = read(dir.path().join("index.csv"));
    assert!(index.starts_with("Tag1,https://lists.example.com/edl/Tag1.txt,all\n"));
}

#[test]
fn command_include_and_exclude_tags() {
    let dir = tempfile::tempdir().unwrap();
    write_document(
        dir.path(),
        r#"{"values":[
          {"name":"A","properties":{"addressPrefixes":["10.0.0.0/8"]}},
          {"name":"B","properties":{"addressPrefixes":["10.1.0.0/16"]}},
          {"name":"C","properties":{"addressPrefixes":["10.2.0.0/16"]}}
        ]}"#,
    );

    command(dir.path())
        .args([
            "--include-tags",
            "A",
            "B",
            "--exclude-tags",
            "B",
            "--source-json",
            "ServiceTags_Public.json",
            "out",
        ])
        .assert()
        .success();

    let out = dir.path().join("out");
    assert!(out.join("A.txt").is_file());
    assert!(!out.join("B.txt").exists());
    assert!(!out.join("C.txt").exists());
}

#[test]
fn command_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    write_document(dir.path(), DOCUMENT);
    let run = || {
        command(dir.path())
            .args(["out", "--source-json", "ServiceTags_Public.json"])
            .assert()
            .success();
        ["Tag1.txt", "Tag1-v4.txt", "Tag1-v6.txt"]
            .map(|file| fs::read(dir.path().join("out").join(file)).unwrap())
    };

    assert_eq!(run(), run());
}

#[test]
fn command_saves_json() {
    let dir = tempfile::tempdir().unwrap();
    write_document(dir.path(), DOCUMENT);

    command(dir.path())
        .args([
            "out",
            "--source-json",
            "ServiceTags_Public.json",
            "--save-json",
            "archive/copy.json",
        ])
        .assert()
        .success();

    assert_eq!(read(dir.path().join("archive").join("copy.json")), DOCUMENT);
}

/*--------------------------------------------------------------------------------------
  Fatal Errors
--------------------------------------------------------------------------------------*/

#[test]
fn command_malformed_document() {
    let dir = tempfile::tempdir().unwrap();
    write_document(dir.path(), r#"{"other":[]}"#);

    let output = command(dir.path())
        .args(["out", "--source-json", "ServiceTags_Public.json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("malformed document"));
    assert!(!dir.path().join("out").exists());
}

#[cfg(unix)]
#[test]
fn command_tolerates_non_unicode_environment() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    write_document(dir.path(), DOCUMENT);

    command(dir.path())
        .env("SERVICETAG_EDL_BINARY_VALUE", OsStr::from_bytes(b"\xff\xfe"))
        .args(["out", "--source-json", "ServiceTags_Public.json"])
        .assert()
        .success();

    assert_eq!(read(dir.path().join("out").join("Tag1-v4.txt")), "10.0.0.0/8\n");
}

#[test]
fn command_missing_source_file() {
    let dir = tempfile::tempdir().unwrap();

    command(dir.path())
        .args(["out", "--source-json", "missing.json"])
        .assert()
        .failure()
        .code(1);

    assert!(!dir.path().join("out").exists());
}

#[test]
fn command_filename_collision() {
    let dir = tempfile::tempdir().unwrap();
    write_document(
        dir.path(),
        r#"{"values":[
          {"name":"East US","properties":{"addressPrefixes":["10.0.0.0/8"]}},
          {"name":"East_US","properties":{"addressPrefixes":["10.1.0.0/16"]}}
        ]}"#,
    );

    let output = command(dir.path())
        .args(["out", "--source-json", "ServiceTags_Public.json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("East_US"));
    assert!(!dir.path().join("out").exists());
}
