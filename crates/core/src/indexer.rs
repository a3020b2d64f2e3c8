// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Maps raw issues onto known source files.
//!
//! Resolution rules, in order:
//! - an issue path equal to a file identity resolves to that file
//! - otherwise one path must be a suffix of the other on a `/` boundary
//!   (project-relative issue paths against absolute file paths, and the
//!   reverse); the shortest matching identity wins, ties broken by name
//!
//! Issues that resolve to no known file are left out of the result.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::file::{file_name_of, is_absolute_path, is_boundary_suffix, SourceFileHandle};
use crate::issue::IssueRecord;

/// File identity mapped to the set of issues reported against it.
pub type IssueIndex = BTreeMap<String, BTreeSet<IssueRecord>>;

/// Total number of issues across every file in an index.
pub fn issue_count(index: &IssueIndex) -> usize {
    index.values().map(BTreeSet::len).sum()
}

/// Builds a fresh index for `raw_issues` against `known_files`.
///
/// With a `resource_key` filter only issues belonging to that key (or one of
/// its sub-modules) are considered.
pub fn create(
    known_files: &[SourceFileHandle],
    raw_issues: &[IssueRecord],
    resource_key: Option<&str>,
) -> IssueIndex {
    FileIndexer::new(known_files).index(raw_issues, resource_key)
}

/// Resolver over a fixed list of known files.
///
/// Holds only borrowed lookup tables; every call to [`FileIndexer::index`]
/// returns an independent mapping.
pub struct FileIndexer<'a> {
    by_identity: HashMap<&'a str, &'a SourceFileHandle>,
    by_name: HashMap<&'a str, Vec<&'a SourceFileHandle>>,
}

impl<'a> FileIndexer<'a> {
    pub fn new(known_files: &'a [SourceFileHandle]) -> Self {
        let mut by_identity = HashMap::new();
        let mut by_name: HashMap<&str, Vec<&SourceFileHandle>> = HashMap::new();
        for file in known_files {
            by_identity.insert(file.identity(), file);
            by_name.entry(file.file_name()).or_default().push(file);
        }
        for candidates in by_name.values_mut() {
            candidates.sort_by(|a, b| {
                a.identity()
                    .len()
                    .cmp(&b.identity().len())
                    .then_with(|| a.identity().cmp(b.identity()))
            });
            candidates.dedup_by(|a, b| a.identity() == b.identity());
        }
        FileIndexer {
            by_identity,
            by_name,
        }
    }

    /// Resolves a normalized issue path to the identity of a known file.
    pub fn resolve(&self, issue_path: &str) -> Option<&'a str> {
        if issue_path.is_empty() {
            return None;
        }
        if let Some(file) = self.by_identity.get(issue_path).copied() {
            return Some(file.identity());
        }
        self.by_name
            .get(file_name_of(issue_path))?
            .iter()
            .copied()
            .find(|file| {
                // A longer issue path only matches when it is absolute; a longer
                // relative path names a file in another module.
                is_boundary_suffix(file.identity(), issue_path)
                    || (is_absolute_path(issue_path)
                        && is_boundary_suffix(issue_path, file.identity()))
            })
            .map(|file| file.identity())
    }

    /// Groups the resolvable issues by file identity.
    pub fn index<'i>(
        &self,
        raw_issues: impl IntoIterator<Item = &'i IssueRecord>,
        resource_key: Option<&str>,
    ) -> IssueIndex {
        let mut index = IssueIndex::new();
        for issue in raw_issues {
            if let Some(key) = resource_key {
                if !issue.belongs_to(key) {
                    continue;
                }
            }
            if let Some(identity) = self.resolve(issue.path()) {
                index
                    .entry(identity.to_string())
                    .or_default()
                    .insert(issue.clone());
            }
        }
        index
    }
}

#[cfg(test)]
#[path = "indexer_tests.rs"]
mod tests;
