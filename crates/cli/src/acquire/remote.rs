// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote acquisition: download issues per resource key and index them.

use std::sync::Arc;
use std::time::Instant;

use sl_core::{indexer, IssueIndexStore, MergeMode, SourceFileHandle};
use tokio_util::sync::CancellationToken;

use super::{AcquisitionError, TaskResult, TaskState};
use crate::console::ConsoleSink;
use crate::service::IssueService;
use crate::timings::{elapsed_ms, format_duration};

/// Downloads issues for each configured resource key, in order.
///
/// Keys are merged one at a time with [`MergeMode::Replace`], so a canceled
/// run keeps everything merged before the cancellation.
pub struct RemoteTask<S: IssueService> {
    service: S,
    resource_keys: Vec<String>,
    files: Vec<SourceFileHandle>,
    store: Arc<IssueIndexStore>,
    console: Arc<dyn ConsoleSink>,
    state: TaskState,
}

impl<S: IssueService> RemoteTask<S> {
    pub fn new(
        service: S,
        resource_keys: Vec<String>,
        files: Vec<SourceFileHandle>,
        store: Arc<IssueIndexStore>,
        console: Arc<dyn ConsoleSink>,
    ) -> Self {
        RemoteTask {
            service,
            resource_keys,
            files,
            store,
            console,
            state: TaskState::Ready,
        }
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub async fn run(&mut self, cancel: &CancellationToken) -> TaskResult {
        let started = Instant::now();
        self.state = TaskState::Running;
        self.state = self.execute(cancel, started).await;
        TaskResult {
            state: self.state,
            elapsed_ms: elapsed_ms(started.elapsed()),
        }
    }

    async fn execute(&self, cancel: &CancellationToken, started: Instant) -> TaskState {
        let mut downloaded = 0;
        for key in &self.resource_keys {
            if cancel.is_cancelled() {
                self.console.info("download canceled");
                return TaskState::Canceled;
            }

            self.console
                .info(&format!("Downloading issues for SonarQube resource {}", key));
            let issues = match self.service.fetch_all_issues(key).await {
                Ok(issues) => issues,
                Err(source) => {
                    let err = AcquisitionError::Fetch {
                        key: key.clone(),
                        source,
                    };
                    self.console.error(&err.to_string());
                    Vec::new()
                }
            };
            downloaded += issues.len();

            if cancel.is_cancelled() {
                self.console.info("download canceled");
                return TaskState::Canceled;
            }

            self.console
                .info(&format!("Creating index for SonarQube resource {}", key));
            let indexing_started = Instant::now();
            let partial = indexer::create(&self.files, &issues, Some(key));
            let indexed = indexer::issue_count(&partial);
            let written = self.store.merge(partial, MergeMode::Replace);
            tracing::debug!(key = %key, files = written, "merged remote issues");
            self.console.info(&format!(
                "Finished creating index with {} issues for SonarQube resource {} in {}",
                indexed,
                key,
                format_duration(indexing_started.elapsed())
            ));
        }

        self.console.info(&format!(
            "Downloaded {} issues in {}",
            downloaded,
            format_duration(started.elapsed())
        ));
        TaskState::Succeeded
    }
}
