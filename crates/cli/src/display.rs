// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;
use sl_core::{issue_count, IssueIndex, IssueRecord};

use crate::cli::OutputFormat;
use crate::colors;
use crate::error::Result;

#[derive(Serialize)]
struct IndexJson<'a> {
    files: Vec<FileJson<'a>>,
    total: usize,
}

#[derive(Serialize)]
struct FileJson<'a> {
    path: &'a str,
    issues: Vec<IssueJson<'a>>,
}

#[derive(Serialize)]
struct IssueJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
    severity: &'static str,
    rule: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    resource_key: &'a str,
}

impl<'a> From<&'a IssueRecord> for IssueJson<'a> {
    fn from(issue: &'a IssueRecord) -> Self {
        IssueJson {
            line: issue.line(),
            severity: issue.severity().as_str(),
            rule: issue.rule(),
            message: issue.message(),
            resource_key: issue.resource_key(),
        }
    }
}

/// Render the index in the requested format.
pub fn render(index: &IssueIndex, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format_text(index, colors::should_colorize())),
        OutputFormat::Json => format_json(index),
    }
}

/// Text listing: one header per file, one indented line per issue, then a
/// summary line.
///
/// ```text
/// src/A.java
///   10  [MAJOR] Remove this unused import (squid:S1128)
///    -  [INFO] Missing header (common:Header)
///
/// 2 issues in 1 file
/// ```
pub fn format_text(index: &IssueIndex, colorize: bool) -> String {
    let mut lines = Vec::new();
    for (path, issues) in index {
        lines.push(if colorize {
            colors::header(path)
        } else {
            path.clone()
        });
        for issue in issues {
            lines.push(format_issue_line(issue, colorize));
        }
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(summary(index));
    lines.join("\n")
}

fn format_issue_line(issue: &IssueRecord, colorize: bool) -> String {
    let line = format!(
        "{:>5}",
        issue
            .line()
            .map(|l| l.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    let tag = format!("[{}]", issue.severity());
    let rule = format!("({})", issue.rule());
    if colorize {
        format!(
            "  {}  {} {} {}",
            colors::context(&line),
            colors::severity(issue.severity(), &tag),
            issue.message(),
            colors::context(&rule)
        )
    } else {
        format!("  {}  {} {} {}", line, tag, issue.message(), rule)
    }
}

fn summary(index: &IssueIndex) -> String {
    let issues = issue_count(index);
    let files = index.len();
    format!(
        "{} issue{} in {} file{}",
        issues,
        if issues == 1 { "" } else { "s" },
        files,
        if files == 1 { "" } else { "s" }
    )
}

/// JSON document: `{"files": [{"path", "issues": [...]}], "total": N}`.
pub fn format_json(index: &IssueIndex) -> Result<String> {
    let output = IndexJson {
        files: index
            .iter()
            .map(|(path, issues)| FileJson {
                path,
                issues: issues.iter().map(IssueJson::from).collect(),
            })
            .collect(),
        total: issue_count(index),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
