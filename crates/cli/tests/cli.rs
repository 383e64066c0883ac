use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cmd(data_dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("permapress");
    cmd.env("PERMAPRESS__GENERAL__DATA_DIR", data_dir);
    cmd
}

fn article_ids(data_dir: &Path) -> Vec<String> {
    let output = cmd(data_dir)
        .args(["article", "list", "--json"])
        .output()
        .expect("run article list");
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    value
        .as_array()
        .expect("array")
        .iter()
        .map(|a| a["id"].as_str().expect("id").to_string())
        .collect()
}

#[test]
fn config_init_writes_example_file() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("config.toml");

    let mut cmd = cargo_bin_cmd!("permapress");
    cmd.args(["config", "init", "--path"])
        .arg(&config_path)
        .assert()
        .success();

    let content = fs::read_to_string(&config_path).expect("read config");
    assert!(content.contains("data_dir"));
    assert!(content.contains("[ipfs]"));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "# existing").expect("write config");

    let mut cmd = cargo_bin_cmd!("permapress");
    cmd.args(["config", "init", "--path"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn article_lifecycle_round_trip() {
    let dir = TempDir::new().expect("temp dir");

    cmd(dir.path())
        .args(["article", "new", "--title", "Hello", "--body", "# Hi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved draft"));

    let ids = article_ids(dir.path());
    assert_eq!(ids.len(), 1);
    let id = &ids[0];

    cmd(dir.path())
        .args(["article", "show", id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: draft"));

    cmd(dir.path())
        .args(["article", "edit", id, "--body", "# Changed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("back to draft"));

    cmd(dir.path())
        .args(["article", "delete", id])
        .assert()
        .success();

    assert!(article_ids(dir.path()).is_empty());
}

#[test]
fn article_new_requires_a_body() {
    let dir = TempDir::new().expect("temp dir");

    cmd(dir.path())
        .args(["article", "new", "--title", "Hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--body or --file"));
}

#[test]
fn publish_against_unreachable_node_marks_article_failed() {
    let dir = TempDir::new().expect("temp dir");

    cmd(dir.path())
        .args(["article", "new", "--title", "Hello", "--body", "# Hi"])
        .assert()
        .success();
    let id = article_ids(dir.path()).remove(0);

    cmd(dir.path())
        .env("PERMAPRESS__IPFS__API_ENDPOINT", "http://127.0.0.1:1")
        .args(["article", "publish", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Publish failed"));

    cmd(dir.path())
        .args(["article", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: failed"))
        .stdout(predicate::str::contains("Last error"));
}

#[test]
fn publish_all_with_no_articles_reports_zero() {
    let dir = TempDir::new().expect("temp dir");

    cmd(dir.path())
        .arg("publish-all")
        .assert()
        .success()
        .stdout(predicate::str::contains("Published: 0, failed: 0"));
}

#[test]
fn settings_show_and_set_round_trip() {
    let dir = TempDir::new().expect("temp dir");

    let output = cmd(dir.path())
        .args(["settings", "show", "--json"])
        .output()
        .expect("run settings show");
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["gateway"], "https://ipfs.io/ipfs/");

    cmd(dir.path())
        .args(["settings", "set", "--gateway", "https://dweb.link/ipfs/"])
        .assert()
        .success();

    cmd(dir.path())
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://dweb.link/ipfs/"));
}

#[test]
fn collection_membership_round_trip() {
    let dir = TempDir::new().expect("temp dir");

    cmd(dir.path())
        .args(["article", "new", "--title", "Hello", "--body", "# Hi"])
        .assert()
        .success();
    let article_id = article_ids(dir.path()).remove(0);

    cmd(dir.path())
        .args(["collection", "create", "--name", "Notes"])
        .assert()
        .success();

    let output = cmd(dir.path())
        .args(["collection", "list", "--json"])
        .output()
        .expect("run collection list");
    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let collection_id = value[0]["id"].as_str().expect("id").to_string();

    cmd(dir.path())
        .args(["collection", "add", &collection_id, &article_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added"));

    // Adding again is a no-op
    cmd(dir.path())
        .args(["collection", "add", &collection_id, &article_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("already in"));

    cmd(dir.path())
        .args(["collection", "remove", &collection_id, &article_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));
}

#[test]
fn doctor_reports_unreachable_node() {
    let dir = TempDir::new().expect("temp dir");

    cmd(dir.path())
        .env("PERMAPRESS__IPFS__API_ENDPOINT", "http://127.0.0.1:1")
        .args(["doctor", "--json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("unreachable"));
}
