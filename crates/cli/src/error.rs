// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the slrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: no .sonarlens/config.toml found in {0} or its parents")]
    NotInitialized(String),

    #[error("{section} is not configured\n  hint: add a [{section}] section to .sonarlens/config.toml")]
    NotConfigured { section: &'static str },

    #[error("{field} cannot be empty")]
    FieldEmpty { field: &'static str },

    #[error("operation cancelled")]
    Cancelled,

    #[error("{channel} analysis failed; see the log above for details")]
    AcquisitionFailed { channel: &'static str },

    #[error("failed to enumerate source files: {0}")]
    Walk(String),

    #[error("remote service error: {0}")]
    Service(#[from] crate::service::ServiceError),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for slrs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
