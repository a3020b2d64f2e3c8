// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Decoder for one page of the remote `api/issues/search` response.
//!
//! Servers report paging either in a `paging` object or, on older versions,
//! as top-level `p`, `ps` and `total` fields. Both are accepted.

use serde::Deserialize;
use serde_json::Value as Json;

use crate::component::ComponentTable;
use crate::error::{Error, Result};
use crate::issue::IssueRecord;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Paging {
    page_index: u32,
    page_size: u32,
    total: u32,
}

#[derive(Deserialize)]
struct RawPage {
    #[serde(default)]
    paging: Option<Paging>,
    #[serde(default)]
    p: Option<u32>,
    #[serde(default)]
    ps: Option<u32>,
    #[serde(default)]
    total: Option<u32>,
    #[serde(default)]
    issues: Vec<Json>,
    #[serde(default)]
    components: Vec<Json>,
}

/// One decoded page of search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    pub issues: Vec<IssueRecord>,
    /// 1-based page index.
    pub page_index: u32,
    pub page_size: u32,
    /// Total matching issues across all pages.
    pub total: u32,
    /// Raw entries on this page, including ones that failed to normalize.
    pub raw_count: usize,
}

impl SearchPage {
    /// Returns true if pages beyond this one hold more results.
    pub fn has_more(&self) -> bool {
        let seen = u64::from(self.page_index) * u64::from(self.page_size);
        self.raw_count > 0 && seen < u64::from(self.total)
    }
}

/// Parses one search page.
pub fn parse_search_page(bytes: &[u8]) -> Result<SearchPage> {
    let raw: RawPage =
        serde_json::from_slice(bytes).map_err(|e| Error::MalformedPage(e.to_string()))?;
    let (page_index, page_size, total) = match raw.paging {
        Some(p) => (p.page_index, p.page_size, p.total),
        None => match (raw.p, raw.ps, raw.total) {
            (Some(p), Some(ps), Some(total)) => (p, ps, total),
            _ => {
                return Err(Error::MalformedPage(
                    "missing paging information".to_string(),
                ))
            }
        },
    };
    let raw_count = raw.issues.len();
    let table = ComponentTable::from_values(raw.components);
    let issues = raw
        .issues
        .into_iter()
        .filter_map(|issue| table.normalize(issue))
        .collect();
    Ok(SearchPage {
        issues,
        page_index,
        page_size,
        total,
        raw_count,
    })
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
