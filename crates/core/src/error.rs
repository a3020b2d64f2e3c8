// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for sl-core operations.

use thiserror::Error;

/// All possible errors that can occur in sl-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid severity: '{0}'\n  hint: valid severities are: info, minor, major, critical, blocker")]
    InvalidSeverity(String),

    #[error("malformed report: {0}")]
    MalformedReport(String),

    #[error("malformed search page: {0}")]
    MalformedPage(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for sl-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
