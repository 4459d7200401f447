use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

fn konf(context: &str, cluster: &str) -> String {
    format!(
        "apiVersion: v1\nkind: Config\nclusters:\n- name: {cluster}\n  cluster:\n    server: https://10.1.1.0\ncontexts:\n- name: {context}\n  context:\n    cluster: {cluster}\n    user: {context}\ncurrent-context: {context}\n"
    )
}

fn setup_store() -> TempDir {
    let temp = tempdir().unwrap();
    let store = temp.path().join("store");
    fs::create_dir_all(&store).unwrap();
    fs::write(store.join("dev-eu_dev-eu-1.yaml"), konf("dev-eu", "dev-eu-1")).unwrap();
    fs::write(
        store.join("dev-asia_dev-asia-1.yaml"),
        konf("dev-asia", "dev-asia-1"),
    )
    .unwrap();
    temp
}

#[allow(deprecated)]
fn konf_cmd(konf_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("konf").expect("binary");
    cmd.env("KONF_DIR", konf_dir)
        .env_remove("RUST_LOG")
        .env_remove("COMPLETE");
    cmd
}

// the spawned binary is a child of this test process
fn active_path(konf_dir: &Path) -> PathBuf {
    konf_dir
        .join("active")
        .join(format!("{}.yaml", std::process::id()))
}

#[test]
fn completion_lists_ids_in_name_order() {
    let temp = setup_store();
    konf_cmd(temp.path())
        .args(["complete-set", ""])
        .assert()
        .success()
        .stdout("dev-asia_dev-asia-1\ndev-eu_dev-eu-1\n");
}

#[test]
fn completion_ignores_partial_id() {
    let temp = setup_store();
    konf_cmd(temp.path())
        .args(["complete-set", "dev-e"])
        .assert()
        .success()
        .stdout("dev-asia_dev-asia-1\ndev-eu_dev-eu-1\n");
}

#[test]
fn completion_on_empty_store_is_silent() {
    let temp = tempdir().unwrap();
    fs::create_dir_all(temp.path().join("store")).unwrap();
    konf_cmd(temp.path())
        .arg("complete-set")
        .assert()
        .success()
        .stdout("")
        .stderr("");
}

#[test]
fn set_by_id_activates_and_signals() {
    let temp = setup_store();
    let active = active_path(temp.path());

    konf_cmd(temp.path())
        .args(["set", "dev-eu_dev-eu-1"])
        .assert()
        .success()
        .stdout(format!("KUBECONFIGCHANGE:{}\n", active.display()));

    assert_eq!(
        fs::read(&active).unwrap(),
        fs::read(temp.path().join("store").join("dev-eu_dev-eu-1.yaml")).unwrap()
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("latestkonf")).unwrap(),
        "dev-eu_dev-eu-1"
    );
}

#[test]
fn set_dash_repeats_last_konf() {
    let temp = setup_store();
    let active = active_path(temp.path());

    konf_cmd(temp.path())
        .args(["set", "dev-asia_dev-asia-1"])
        .assert()
        .success();
    fs::remove_file(&active).unwrap();

    konf_cmd(temp.path())
        .args(["set", "-"])
        .assert()
        .success()
        .stdout(format!("KUBECONFIGCHANGE:{}\n", active.display()));
    assert_eq!(fs::read_to_string(&active).unwrap(), konf("dev-asia", "dev-asia-1"));
}

#[test]
fn set_dash_without_history_explains() {
    let temp = setup_store();
    konf_cmd(temp.path())
        .args(["set", "-"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("no konf was yet set"));
}

#[test]
fn set_unknown_id_fails() {
    let temp = setup_store();
    konf_cmd(temp.path())
        .args(["set", "i-am-invalid"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("i-am-invalid"));
}

#[test]
fn picker_on_empty_store_points_to_import() {
    let temp = tempdir().unwrap();
    konf_cmd(temp.path())
        .arg("set")
        .assert()
        .failure()
        .stderr(predicate::str::contains("konf import"));
}

#[test]
fn picker_without_terminal_fails_cleanly() {
    let temp = setup_store();
    konf_cmd(temp.path())
        .arg("set")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("needs a terminal"));
    assert!(!temp.path().join("active").exists());
}

#[test]
fn impure_store_is_reported() {
    let temp = setup_store();
    let multi = konf("dev-eu", "dev-eu-1").replace(
        "contexts:\n",
        "contexts:\n- name: admin\n  context:\n    cluster: dev-eu-1\n",
    );
    fs::write(temp.path().join("store").join("multi.yaml"), multi).unwrap();

    konf_cmd(temp.path())
        .arg("set")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Impure Store"));
}

#[test]
fn completion_script_calls_back_into_konf() {
    let temp = tempdir().unwrap();
    for shell in ["bash", "zsh", "fish"] {
        konf_cmd(temp.path())
            .args(["completion", shell])
            .assert()
            .success()
            .stdout(predicate::str::contains("COMPLETE"))
            .stdout(predicate::str::contains("konf"));
    }
}

#[test]
fn set_completes_konf_ids() {
    let temp = setup_store();
    konf_cmd(temp.path())
        .env("COMPLETE", "fish")
        .args(["--", "konf", "set", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("dev-asia_dev-asia-1"))
        .stdout(predicate::str::contains("dev-eu_dev-eu-1"));
}

#[test]
fn set_completion_narrows_to_typed_prefix() {
    let temp = setup_store();
    konf_cmd(temp.path())
        .env("COMPLETE", "fish")
        .args(["--", "konf", "set", "dev-e"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dev-eu_dev-eu-1"))
        .stdout(predicate::str::contains("dev-asia").not());
}
