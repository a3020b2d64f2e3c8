// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

//! Acquisition runs through the CLI binary.

mod common;
use common::*;

#[test]
fn local_run_prints_index() {
    let temp = local_project(0);

    sonarlens()
        .arg("local")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("src/A.java"))
        .stdout(predicate::str::contains("[MAJOR] Remove this unused import (squid:S1128)"))
        .stdout(predicate::str::contains("src/B.java"))
        .stdout(predicate::str::contains("Gone.java").not())
        .stdout(predicate::str::contains("2 issues in 2 files"));
}

#[test]
fn local_run_logs_process_output() {
    let temp = local_project(0);

    sonarlens()
        .arg("local")
        .current_dir(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("run: sh analyze.sh"))
        .stderr(predicate::str::contains("analysis starting"))
        .stderr(predicate::str::contains("warning from analyzer"))
        .stderr(predicate::str::contains("finished with exit code 0"));
}

#[test]
fn local_nonzero_exit_still_indexes_report() {
    let temp = local_project(1);

    sonarlens()
        .args(["local", "-o", "json"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("finished with exit code 1"))
        .stdout(predicate::str::contains("\"total\": 2"));
}

#[test]
fn local_json_output_is_valid() {
    let temp = local_project(0);

    let output = sonarlens()
        .args(["local", "--output", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["total"], 2);
    assert_eq!(value["files"][0]["path"], "src/A.java");
    assert_eq!(value["files"][1]["issues"][0]["severity"], "CRITICAL");
}

#[test]
fn resource_keys_limit_local_index() {
    let temp = local_project(0);
    write_config(
        temp.path(),
        "[script]\ncommand = \"sh analyze.sh\"\nreport = \"build/report.json\"\n\n[[resources]]\nkey = \"org:lib\"\n",
    );

    sonarlens()
        .arg("local")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("src/B.java"))
        .stdout(predicate::str::contains("src/A.java").not());
}

#[test]
fn missing_report_fails() {
    let temp = local_project(0);
    write_config(
        temp.path(),
        "[script]\ncommand = \"true\"\nreport = \"build/report.json\"\n",
    );

    sonarlens()
        .arg("local")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("report not available"))
        .stderr(predicate::str::contains("error: local analysis failed"));
}

#[test]
fn unknown_command_fails() {
    let temp = local_project(0);
    write_config(
        temp.path(),
        "[script]\ncommand = \"sonarlens-missing-analyzer --run\"\nreport = \"build/report.json\"\n",
    );

    sonarlens()
        .arg("local")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to launch"));
}

#[test]
fn directory_flag_selects_project() {
    let temp = local_project(0);

    sonarlens()
        .args(["-C", temp.path().to_str().unwrap(), "analyze"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 issues in 2 files"));
}

#[test]
fn runs_from_subdirectory() {
    let temp = local_project(0);

    sonarlens()
        .arg("analyze")
        .current_dir(temp.path().join("src"))
        .assert()
        .success()
        .stdout(predicate::str::contains("src/A.java"));
}

#[test]
fn remote_run_downloads_each_resource() {
    let page = r#"{
      "paging": {"pageIndex": 1, "pageSize": 500, "total": 1},
      "issues": [{"rule": "squid:S1", "message": "Remote issue", "severity": "BLOCKER",
                  "component": "org:app:src/A.java", "project": "org:app", "line": 7}],
      "components": [{"key": "org:app:src/A.java", "path": "src/A.java"}]
    }"#;
    let (url, server) = serve(vec![(200, page.to_string())]);
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "src/A.java", "class A {}\n");
    write_config(
        temp.path(),
        &format!(
            "mode = \"remote\"\n\n[server]\nurl = \"{}\"\n\n[[resources]]\nkey = \"org:app\"\n",
            url
        ),
    );

    sonarlens()
        .arg("analyze")
        .current_dir(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Downloading issues for SonarQube resource org:app"))
        .stderr(predicate::str::contains("Downloaded 1 issues in"))
        .stdout(predicate::str::contains("      7  [BLOCKER] Remote issue (squid:S1)"));

    let requests = server.join().unwrap();
    assert!(requests[0].starts_with("GET /api/issues/search?"));
    assert!(requests[0].contains("componentKeys=org%3Aapp"));
}

#[test]
fn remote_fetch_error_is_logged_and_run_succeeds() {
    let (url, server) = serve(vec![(500, "boom".to_string())]);
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "src/A.java", "class A {}\n");
    write_config(
        temp.path(),
        &format!("[server]\nurl = \"{}\"\n\n[[resources]]\nkey = \"org:app\"\n", url),
    );

    sonarlens()
        .arg("remote")
        .current_dir(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("failed to download issues for org:app"))
        .stdout(predicate::str::contains("0 issues in 0 files"));

    server.join().unwrap();
}
