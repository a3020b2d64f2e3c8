// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Normalized issue records shared by both acquisition channels.
//!
//! A local report and a remote search page describe issues differently;
//! both are reduced to [`IssueRecord`] before they reach the indexer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::file::normalize_path;

/// Severity of a static-analysis finding, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Minor,
    Major,
    Critical,
    Blocker,
}

impl Severity {
    /// Returns the upper-case name used by the analysis server.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Minor => "MINOR",
            Severity::Major => "MAJOR",
            Severity::Critical => "CRITICAL",
            Severity::Blocker => "BLOCKER",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "minor" => Ok(Severity::Minor),
            "major" => Ok(Severity::Major),
            "critical" => Ok(Severity::Critical),
            "blocker" => Ok(Severity::Blocker),
            _ => Err(Error::InvalidSeverity(s.to_string())),
        }
    }
}

/// One static-analysis finding, independent of the channel it came from.
///
/// Records are immutable once built. Equality covers every field, which is
/// what lets an index hold them in a set without duplicates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IssueRecord {
    path: String,
    line: Option<u32>,
    rule: String,
    severity: Severity,
    message: String,
    resource_key: String,
}

impl IssueRecord {
    /// Creates a file-level issue with no resource key.
    pub fn new(
        rule: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        path: impl AsRef<str>,
    ) -> Self {
        IssueRecord {
            path: normalize_path(path.as_ref()),
            line: None,
            rule: rule.into(),
            severity,
            message: message.into(),
            resource_key: String::new(),
        }
    }

    /// Attaches a line number. Line 0 is treated as a file-level issue.
    pub fn with_line(mut self, line: Option<u32>) -> Self {
        self.line = line.filter(|l| *l > 0);
        self
    }

    /// Attaches the resource key (project or module) the issue belongs to.
    pub fn with_resource_key(mut self, resource_key: impl Into<String>) -> Self {
        self.resource_key = resource_key.into();
        self
    }

    pub fn rule(&self) -> &str {
        &self.rule
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Resource-relative path, `/`-separated.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Line number, `None` for file-level issues.
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    pub fn resource_key(&self) -> &str {
        &self.resource_key
    }

    /// Returns true if this issue belongs to `key` or to one of its sub-modules.
    ///
    /// Sub-module keys extend their parent with a `:` separator
    /// (`org:app` owns `org:app:web`).
    pub fn belongs_to(&self, key: &str) -> bool {
        match self.resource_key.strip_prefix(key) {
            Some("") => true,
            Some(rest) => rest.starts_with(':'),
            None => false,
        }
    }
}

impl fmt::Display for IssueRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(
                f,
                "{}:{} [{}] {} ({})",
                self.path, line, self.severity, self.message, self.rule
            ),
            None => write!(
                f,
                "{} [{}] {} ({})",
                self.path, self.severity, self.message, self.rule
            ),
        }
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
