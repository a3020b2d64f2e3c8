// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test files,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread::JoinHandle;

use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub fn sonarlens() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("sonarlens").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("SONARLENS_TOKEN")
        .env("NO_COLOR", "1");
    cmd
}

/// Local report covering `src/A.java`, `src/B.java` and a file that does not
/// exist in the project.
pub const REPORT: &str = r#"{
  "issues": [
    {"component": "org:app:src/A.java", "line": 10, "message": "Remove this unused import",
     "severity": "MAJOR", "rule": "squid:S1128"},
    {"component": "org:app:src/Gone.java", "line": 1, "message": "Not in project",
     "severity": "MINOR", "rule": "squid:S1"},
    {"component": "org:lib:src/B.java", "line": 3, "message": "Method too long",
     "severity": "CRITICAL", "rule": "squid:S138"}
  ],
  "components": [
    {"key": "org:app:src/A.java", "path": "src/A.java", "moduleKey": "org:app"},
    {"key": "org:app:src/Gone.java", "path": "src/Gone.java", "moduleKey": "org:app"},
    {"key": "org:lib:src/B.java", "path": "src/B.java", "moduleKey": "org:lib"}
  ]
}"#;

pub fn write_file(root: &Path, path: &str, content: &str) {
    let full = root.join(path);
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(full, content).unwrap();
}

pub fn write_config(root: &Path, content: &str) {
    write_file(root, ".sonarlens/config.toml", content);
}

/// Project with two sources and a local script that copies `REPORT` into
/// `build/report.json` and exits with `exit_code`.
pub fn local_project(exit_code: i32) -> TempDir {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "src/A.java", "class A {}\n");
    write_file(temp.path(), "src/B.java", "class B {}\n");
    write_file(temp.path(), "fixtures/report.json", REPORT);
    write_file(
        temp.path(),
        "analyze.sh",
        &format!(
            "echo analysis starting\nmkdir -p build\ncp fixtures/report.json build/report.json\necho warning from analyzer >&2\nexit {}\n",
            exit_code
        ),
    );
    write_config(
        temp.path(),
        "[script]\ncommand = \"sh analyze.sh\"\nreport = \"build/report.json\"\n",
    );
    temp
}

/// Serves one canned `(status, body)` response per accepted connection.
pub fn serve(responses: Vec<(u16, String)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let handle = std::thread::spawn(move || {
        let mut requests = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().unwrap();
            let mut head = Vec::new();
            let mut byte = [0u8; 1];
            while !head.ends_with(b"\r\n\r\n") {
                if stream.read(&mut byte).unwrap() == 0 {
                    break;
                }
                head.push(byte[0]);
            }
            requests.push(String::from_utf8_lossy(&head).to_string());
            let response = format!(
                "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        }
        requests
    });
    (url, handle)
}
