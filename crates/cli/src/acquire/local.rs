// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Local acquisition: run the analysis command, then index its report.

use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};

use sl_core::{indexer, parse_report, IssueIndexStore, IssueRecord, MergeMode, SourceFileHandle};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::{AcquisitionError, LocalScriptConfig, TaskResult, TaskState};
use crate::console::{ConsoleLevel, ConsoleSink};
use crate::timings::{elapsed_ms, format_duration};

/// How long output is drained after the process exits.
const OUTPUT_FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

/// Runs a local analysis command and indexes the report it produces.
pub struct LocalScriptTask {
    config: LocalScriptConfig,
    files: Vec<SourceFileHandle>,
    store: Arc<IssueIndexStore>,
    console: Arc<dyn ConsoleSink>,
    state: TaskState,
}

impl LocalScriptTask {
    pub fn new(
        config: LocalScriptConfig,
        files: Vec<SourceFileHandle>,
        store: Arc<IssueIndexStore>,
        console: Arc<dyn ConsoleSink>,
    ) -> Self {
        LocalScriptTask {
            config,
            files,
            store,
            console,
            state: TaskState::Ready,
        }
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Runs the command to completion or cancellation.
    pub async fn run(&mut self, cancel: &CancellationToken) -> TaskResult {
        let started = Instant::now();
        self.state = TaskState::Running;
        self.state = self.execute(cancel).await;
        TaskResult {
            state: self.state,
            elapsed_ms: elapsed_ms(started.elapsed()),
        }
    }

    async fn execute(&self, cancel: &CancellationToken) -> TaskState {
        let command_line = self.config.command.join(" ");
        self.console.info(&format!(
            "working dir: {}",
            self.config.working_dir.display()
        ));
        self.console.info(&format!("run: {}", command_line));
        self.console
            .info(&format!("report: {}", self.config.report_path.display()));

        if cancel.is_cancelled() {
            self.console.info("analysis canceled before launch");
            return TaskState::Canceled;
        }

        let started = Instant::now();
        let mut child = match self.spawn(&command_line) {
            Ok(child) => child,
            Err(e) => {
                self.console.error(&e.to_string());
                return TaskState::Failed;
            }
        };
        tracing::debug!(pid = ?child.id(), "analysis process started");

        let mut drains = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            drains.push(drain(stdout, ConsoleLevel::Info, Arc::clone(&self.console)));
        }
        if let Some(stderr) = child.stderr.take() {
            drains.push(drain(stderr, ConsoleLevel::Error, Arc::clone(&self.console)));
        }

        let status = tokio::select! {
            _ = cancel.cancelled() => None,
            status = child.wait() => Some(status),
        };

        let status = match status {
            None => {
                if let Err(e) = child.kill().await {
                    tracing::warn!(error = %e, "failed to kill analysis process");
                }
                for handle in &drains {
                    handle.abort();
                }
                self.console.info("analysis canceled");
                return TaskState::Canceled;
            }
            Some(Err(e)) => {
                for handle in &drains {
                    handle.abort();
                }
                self.console.error(&AcquisitionError::Wait(e).to_string());
                return TaskState::Failed;
            }
            Some(Ok(status)) => status,
        };

        // Flush what the process wrote before exiting. A background child that
        // inherited the pipes can hold them open indefinitely, so the flush is
        // bounded.
        let deadline = tokio::time::Instant::now() + OUTPUT_FLUSH_TIMEOUT;
        for handle in drains {
            let abort = handle.abort_handle();
            tokio::select! {
                _ = cancel.cancelled() => {
                    abort.abort();
                    self.console.info("analysis canceled");
                    return TaskState::Canceled;
                }
                _ = tokio::time::sleep_until(deadline) => {
                    abort.abort();
                    tracing::debug!("process output still open after exit, detaching");
                }
                _ = handle => {}
            }
        }

        self.console.info(&format!(
            "finished with exit code {} in {}",
            exit_code(status),
            format_duration(started.elapsed())
        ));

        match self.read_report().await {
            Ok(issues) => {
                self.publish(&issues);
                TaskState::Succeeded
            }
            Err(e) => {
                self.console.error(&e.to_string());
                TaskState::Failed
            }
        }
    }

    fn spawn(&self, command_line: &str) -> Result<Child, AcquisitionError> {
        let (program, args) = self
            .config
            .command
            .split_first()
            .ok_or(AcquisitionError::EmptyCommand)?;
        Command::new(program)
            .args(args)
            .current_dir(&self.config.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| AcquisitionError::Launch {
                command: command_line.to_string(),
                source,
            })
    }

    async fn read_report(&self) -> Result<Vec<IssueRecord>, AcquisitionError> {
        let path = &self.config.report_path;
        let bytes =
            tokio::fs::read(path)
                .await
                .map_err(|source| AcquisitionError::ReportUnavailable {
                    path: path.clone(),
                    source,
                })?;
        parse_report(&bytes).map_err(|source| AcquisitionError::ReportMalformed {
            path: path.clone(),
            source,
        })
    }

    fn publish(&self, issues: &[IssueRecord]) {
        let partials = if self.config.resource_keys.is_empty() {
            vec![indexer::create(&self.files, issues, None)]
        } else {
            self.config
                .resource_keys
                .iter()
                .map(|key| indexer::create(&self.files, issues, Some(key)))
                .collect()
        };
        let mut indexed = 0;
        for partial in partials {
            if partial.is_empty() {
                continue;
            }
            indexed += indexer::issue_count(&partial);
            let written = self.store.merge(partial, MergeMode::Union);
            tracing::debug!(files = written, "merged local issues");
        }
        self.console.info(&format!(
            "indexed {} issues ({} in report)",
            indexed,
            issues.len()
        ));
    }
}

/// Forwards each line of `reader` to the console at `level`.
fn drain<R>(reader: R, level: ConsoleLevel, console: Arc<dyn ConsoleSink>) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    console.log(level, line.trim_end_matches(['\r', '\n']));
                }
                Err(e) => {
                    tracing::debug!(error = %e, "stopped reading process output");
                    break;
                }
            }
        }
    })
}

fn exit_code(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => code.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}
