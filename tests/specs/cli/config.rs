// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

//! Configuration discovery and validation through the CLI binary.

mod common;
use common::*;

#[test]
fn outside_a_project_is_not_initialized() {
    let temp = TempDir::new().unwrap();

    sonarlens()
        .arg("analyze")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn invalid_toml_is_reported() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "mode = [");

    sonarlens()
        .arg("analyze")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));
}

#[test]
fn local_without_script_section() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "[[resources]]\nkey = \"org:app\"\n");

    sonarlens()
        .arg("local")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("script is not configured"));
}

#[test]
fn remote_without_server_section() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "[[resources]]\nkey = \"org:app\"\n");

    sonarlens()
        .arg("remote")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("server is not configured"));
}

#[test]
fn remote_without_resources() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "[server]\nurl = \"http://127.0.0.1:9\"\n");

    sonarlens()
        .arg("remote")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("resources is not configured"));
}

#[test]
fn token_from_environment_is_sent() {
    let page = r#"{"paging": {"pageIndex": 1, "pageSize": 500, "total": 0}, "issues": []}"#;
    let (url, server) = serve(vec![(200, page.to_string())]);
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        &format!(
            "[server]\nurl = \"{}\"\ntoken = \"configured\"\n\n[[resources]]\nkey = \"k\"\n",
            url
        ),
    );

    sonarlens()
        .arg("remote")
        .env("SONARLENS_TOKEN", "from-env")
        .current_dir(temp.path())
        .assert()
        .success();

    let requests = server.join().unwrap();
    // base64("from-env:")
    assert!(requests[0]
        .to_ascii_lowercase()
        .contains("authorization: basic znjvbs1lbny6"));
}

#[test]
fn help_mentions_subcommands() {
    sonarlens()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("local"))
        .stdout(predicate::str::contains("remote"))
        .stdout(predicate::str::contains("analyze"));
}
