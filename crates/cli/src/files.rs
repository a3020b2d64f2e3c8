// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Enumerates the project's source files for the indexer.

use std::path::Path;

use ignore::WalkBuilder;
use sl_core::SourceFileHandle;

use crate::error::{Error, Result};

/// Lists every non-ignored file under `root`, relative to it, sorted.
///
/// Honors `.gitignore` files even outside a git checkout. Hidden entries
/// (including `.sonarlens/`) are skipped.
pub fn collect_source_files(root: &Path) -> Result<Vec<SourceFileHandle>> {
    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(true)
        .follow_links(false)
        .git_ignore(true)
        .git_exclude(true)
        .require_git(false);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry.map_err(|e| Error::Walk(e.to_string()))?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        files.push(SourceFileHandle::from(relative.to_path_buf()));
    }
    files.sort_by(|a, b| a.identity().cmp(b.identity()));
    tracing::debug!(count = files.len(), root = %root.display(), "collected source files");
    Ok(files)
}

#[cfg(test)]
#[path = "files_tests.rs"]
mod tests;
