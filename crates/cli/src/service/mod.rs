// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote issue service abstraction.
//!
//! The remote acquisition task only needs "all issues for a resource key".
//! [`IssueService`] is that seam: [`SonarServer`] talks HTTP to a real
//! server, tests substitute an in-memory implementation.

mod http;

use std::future::Future;
use std::pin::Pin;

use sl_core::IssueRecord;

pub use http::SonarServer;

/// Error type for remote service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Connection, HTTP status, or body read failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server rejected the credentials.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The response body was not a search page.
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Result type for remote service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Boxed future returned by [`IssueService`] methods.
pub type ServiceFuture<'a, T> = Pin<Box<dyn Future<Output = ServiceResult<T>> + Send + 'a>>;

/// Source of issues scoped to a resource key.
pub trait IssueService: Send + Sync {
    /// Fetches every open issue for `resource_key`, following pagination.
    fn fetch_all_issues<'a>(&'a self, resource_key: &'a str) -> ServiceFuture<'a, Vec<IssueRecord>>;
}

impl<T: IssueService + ?Sized> IssueService for std::sync::Arc<T> {
    fn fetch_all_issues<'a>(&'a self, resource_key: &'a str) -> ServiceFuture<'a, Vec<IssueRecord>> {
        (**self).fetch_all_issues(resource_key)
    }
}
