// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! sl-core: Issue model, normalization, indexing and the shared issue store.
//!
//! This crate is synchronous and holds no I/O beyond decoding byte buffers.
//! The acquisition tasks in the `sonarlens` crate feed it.

mod component;
pub mod error;
pub mod file;
pub mod indexer;
pub mod issue;
pub mod report;
pub mod search;
pub mod store;

pub use error::{Error, Result};
pub use file::{normalize_path, SourceFileHandle};
pub use indexer::{issue_count, FileIndexer, IssueIndex};
pub use issue::{IssueRecord, Severity};
pub use report::parse_report;
pub use search::{parse_search_page, SearchPage};
pub use store::{IssueIndexStore, MergeMode};
