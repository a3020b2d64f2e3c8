// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP implementation of [`IssueService`] against `api/issues/search`.

use reqwest::StatusCode;
use sl_core::{parse_search_page, IssueRecord, SearchPage};

use super::{IssueService, ServiceError, ServiceFuture, ServiceResult};
use crate::config::ServerConfig;

const SEARCH_PATH: &str = "api/issues/search";

/// The search endpoint refuses to page past this many results.
pub const MAX_SEARCH_RESULTS: u32 = 10_000;

/// Credentials sent with every request.
#[derive(Debug, Clone)]
enum Credentials {
    Anonymous,
    /// Token auth is basic auth with the token as user and an empty password.
    Token(String),
    Basic { user: String, password: String },
}

/// Client for one analysis server.
pub struct SonarServer {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
    page_size: u32,
}

impl SonarServer {
    /// Creates a client for the configured server.
    pub fn new(config: &ServerConfig) -> ServiceResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("sonarlens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        let credentials = match (&config.token, &config.user) {
            (Some(token), _) if !token.is_empty() => Credentials::Token(token.clone()),
            (_, Some(user)) if !user.is_empty() => Credentials::Basic {
                user: user.clone(),
                password: config.password.clone().unwrap_or_default(),
            },
            _ => Credentials::Anonymous,
        };
        Ok(SonarServer {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            credentials,
            page_size: config.page_size.clamp(1, 500),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/{}", self.base_url, SEARCH_PATH)
    }

    /// Fetches one 1-based page of open issues for `resource_key`.
    pub async fn fetch_page(&self, resource_key: &str, page: u32) -> ServiceResult<SearchPage> {
        let request = self.client.get(self.search_url()).query(&[
            ("componentKeys", resource_key.to_string()),
            ("resolved", "false".to_string()),
            ("ps", self.page_size.to_string()),
            ("p", page.to_string()),
        ]);
        let request = match &self.credentials {
            Credentials::Anonymous => request,
            Credentials::Token(token) => request.basic_auth(token, Some("")),
            Credentials::Basic { user, password } => request.basic_auth(user, Some(password)),
        };

        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ServiceError::Auth(format!(
                    "{} returned {}",
                    self.base_url,
                    response.status()
                )));
            }
            status if !status.is_success() => {
                return Err(ServiceError::Transport(format!(
                    "{} returned {}",
                    self.search_url(),
                    status
                )));
            }
            _ => {}
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        parse_search_page(&body).map_err(|e| ServiceError::Decode(e.to_string()))
    }

    async fn fetch_all(&self, resource_key: &str) -> ServiceResult<Vec<IssueRecord>> {
        let mut issues = Vec::new();
        let mut page_index = 1;
        loop {
            let page = self.fetch_page(resource_key, page_index).await?;
            tracing::debug!(
                resource_key,
                page = page.page_index,
                total = page.total,
                received = page.raw_count,
                "fetched issue page"
            );
            let more = page.has_more();
            issues.extend(page.issues);
            if !more {
                break;
            }
            // The next page must end inside the search window or the server rejects it.
            if (page_index + 1).saturating_mul(self.page_size) > MAX_SEARCH_RESULTS {
                tracing::warn!(
                    resource_key,
                    total = page.total,
                    received = issues.len(),
                    "search window reached, remaining issues skipped"
                );
                break;
            }
            page_index += 1;
        }
        Ok(issues)
    }
}

impl IssueService for SonarServer {
    fn fetch_all_issues<'a>(&'a self, resource_key: &'a str) -> ServiceFuture<'a, Vec<IssueRecord>> {
        Box::pin(self.fetch_all(resource_key))
    }
}
