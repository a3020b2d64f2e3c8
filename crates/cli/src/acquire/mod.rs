// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Issue acquisition.
//!
//! Two channels feed the shared [`IssueIndexStore`]:
//! - [`LocalScriptTask`] runs an analysis command and reads the report it writes
//! - [`RemoteTask`] downloads issues per resource key from an [`IssueService`]
//!
//! Both run on the tokio runtime and stop cooperatively when their
//! [`CancellationToken`] fires. Failures are logged to the [`ConsoleSink`]
//! and surface only as the final [`TaskState`].

mod local;
mod remote;

use std::path::PathBuf;
use std::sync::Arc;

use sl_core::{IssueIndexStore, SourceFileHandle};
use tokio_util::sync::CancellationToken;

use crate::config::ServerConfig;
use crate::console::ConsoleSink;
use crate::error::Result;
use crate::service::{ServiceError, SonarServer};

pub use local::LocalScriptTask;
pub use remote::RemoteTask;

/// Lifecycle of an acquisition task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Ready,
    Running,
    Succeeded,
    Failed,
    Canceled,
}

/// Outcome of one task run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskResult {
    pub state: TaskState,
    pub elapsed_ms: u64,
}

/// Channel selected for a run, with everything it needs.
#[derive(Debug, Clone)]
pub enum AcquisitionMode {
    Local(LocalScriptConfig),
    Remote(RemoteConfig),
}

impl AcquisitionMode {
    pub fn channel_name(&self) -> &'static str {
        match self {
            AcquisitionMode::Local(_) => "local",
            AcquisitionMode::Remote(_) => "remote",
        }
    }
}

/// Resolved local analysis command.
#[derive(Debug, Clone)]
pub struct LocalScriptConfig {
    /// Program followed by its arguments.
    pub command: Vec<String>,
    pub working_dir: PathBuf,
    pub report_path: PathBuf,
    /// Keys used as indexer filters; empty means a single unfiltered pass.
    pub resource_keys: Vec<String>,
}

/// Resolved remote download.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub server: ServerConfig,
    pub resource_keys: Vec<String>,
}

/// Failures reported to the console during acquisition.
#[derive(Debug, thiserror::Error)]
pub enum AcquisitionError {
    #[error("command is empty")]
    EmptyCommand,

    #[error("failed to launch '{command}': {source}")]
    Launch {
        command: String,
        source: std::io::Error,
    },

    #[error("failed waiting for process: {0}")]
    Wait(std::io::Error),

    #[error("report not available at {}: {source}", path.display())]
    ReportUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("report at {} could not be decoded: {source}", path.display())]
    ReportMalformed {
        path: PathBuf,
        source: sl_core::Error,
    },

    #[error("failed to download issues for {key}: {source}")]
    Fetch { key: String, source: ServiceError },
}

/// Runs one acquisition for `mode`, merging into `store`.
///
/// Returns `Err` only when the task cannot be constructed (for example an
/// unusable server URL); run failures are reported through the result state.
pub async fn run_acquisition(
    mode: AcquisitionMode,
    files: Vec<SourceFileHandle>,
    store: Arc<IssueIndexStore>,
    console: Arc<dyn ConsoleSink>,
    cancel: &CancellationToken,
) -> Result<TaskResult> {
    match mode {
        AcquisitionMode::Local(config) => {
            let mut task = LocalScriptTask::new(config, files, store, console);
            Ok(task.run(cancel).await)
        }
        AcquisitionMode::Remote(config) => {
            let service = SonarServer::new(&config.server)?;
            let mut task =
                RemoteTask::new(service, config.resource_keys, files, store, console);
            Ok(task.run(cancel).await)
        }
    }
}

#[cfg(test)]
mod test_helpers;
