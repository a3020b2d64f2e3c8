// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

//! Shared fixtures for acquisition task tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use sl_core::{IssueRecord, Severity, SourceFileHandle};
use tokio_util::sync::CancellationToken;

use crate::console::{ConsoleLevel, ConsoleSink};
use crate::service::{IssueService, ServiceError, ServiceFuture};

/// Console that records every line and can cancel a token on a trigger line.
#[derive(Default)]
pub struct MemoryConsole {
    lines: Mutex<Vec<(ConsoleLevel, String)>>,
    trigger: Option<(String, CancellationToken)>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels `token` as soon as a line containing `needle` is logged.
    pub fn cancel_on(needle: &str, token: CancellationToken) -> Self {
        MemoryConsole {
            lines: Mutex::new(Vec::new()),
            trigger: Some((needle.to_string(), token)),
        }
    }

    pub fn lines(&self) -> Vec<(ConsoleLevel, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn messages(&self, level: ConsoleLevel) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|(_, m)| m.contains(needle))
    }
}

impl ConsoleSink for MemoryConsole {
    fn log(&self, level: ConsoleLevel, message: &str) {
        self.lines
            .lock()
            .unwrap()
            .push((level, message.to_string()));
        if let Some((needle, token)) = &self.trigger {
            if message.contains(needle.as_str()) {
                token.cancel();
            }
        }
    }
}

/// In-memory issue service keyed by resource key.
///
/// Keys without a canned response return an empty list.
#[derive(Default)]
pub struct MockIssueService {
    responses: HashMap<String, Result<Vec<IssueRecord>, String>>,
    calls: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl MockIssueService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issues(mut self, key: &str, issues: Vec<IssueRecord>) -> Self {
        self.responses.insert(key.to_string(), Ok(issues));
        self
    }

    pub fn with_failure(mut self, key: &str, message: &str) -> Self {
        self.responses
            .insert(key.to_string(), Err(message.to_string()));
        self
    }

    /// Delays every response by `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl IssueService for MockIssueService {
    fn fetch_all_issues<'a>(&'a self, resource_key: &'a str) -> ServiceFuture<'a, Vec<IssueRecord>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(resource_key.to_string());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            match self.responses.get(resource_key) {
                Some(Ok(issues)) => Ok(issues.clone()),
                Some(Err(message)) => Err(ServiceError::Transport(message.clone())),
                None => Ok(Vec::new()),
            }
        })
    }
}

pub fn issue(key: &str, path: &str, line: u32, rule: &str) -> IssueRecord {
    IssueRecord::new(rule, format!("{} violated", rule), Severity::Major, path)
        .with_line(Some(line))
        .with_resource_key(key)
}

pub fn files(paths: &[&str]) -> Vec<SourceFileHandle> {
    paths.iter().map(|p| SourceFileHandle::from(*p)).collect()
}
