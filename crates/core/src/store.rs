// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Session-lifetime store of issues by file identity.
//!
//! The store is shared by every acquisition task of a session. Merges are
//! copy-on-write: a whole partial index is applied under one write lock, and
//! readers hold immutable snapshots, so a reader never observes half of a
//! merge.

use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};

use crate::indexer::{issue_count, IssueIndex};
use crate::issue::IssueRecord;

/// How a partial index is combined with existing entries for the same file.
///
/// Files absent from the partial are never touched by either mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Add the partial's issues to the file's existing set.
    Union,
    /// Overwrite the file's set with the partial's issues.
    Replace,
}

/// Shared, concurrently accessed index of issues by file identity.
#[derive(Debug, Default)]
pub struct IssueIndexStore {
    index: RwLock<Arc<IssueIndex>>,
}

impl IssueIndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an immutable view of the current index.
    pub fn snapshot(&self) -> Arc<IssueIndex> {
        Arc::clone(&self.index.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Merges a partial index atomically. Returns the number of files written.
    ///
    /// Empty issue sets in the partial are ignored so the store never holds a
    /// file without issues.
    pub fn merge(&self, partial: IssueIndex, mode: MergeMode) -> usize {
        let mut guard = self.index.write().unwrap_or_else(PoisonError::into_inner);
        let index = Arc::make_mut(&mut guard);
        let mut written = 0;
        for (identity, issues) in partial {
            if issues.is_empty() {
                continue;
            }
            match mode {
                MergeMode::Union => index.entry(identity).or_default().extend(issues),
                MergeMode::Replace => {
                    index.insert(identity, issues);
                }
            }
            written += 1;
        }
        written
    }

    /// Issues currently recorded for one file.
    pub fn get(&self, identity: &str) -> Option<BTreeSet<IssueRecord>> {
        self.snapshot().get(identity).cloned()
    }

    /// Number of files with at least one issue.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Total number of issues across all files.
    pub fn issue_count(&self) -> usize {
        issue_count(&self.snapshot())
    }

    /// Drops every entry.
    pub fn clear(&self) {
        let mut guard = self.index.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(IssueIndex::new());
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
