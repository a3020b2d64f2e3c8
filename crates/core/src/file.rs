// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Source file handles and path normalization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Normalizes a path string into the `/`-separated identity form.
///
/// Backslashes become slashes, `.` segments and empty segments are dropped,
/// and a leading slash is preserved for absolute paths.
pub fn normalize_path(raw: &str) -> String {
    let replaced = raw.trim().replace('\\', "/");
    let absolute = replaced.starts_with('/');
    let joined = replaced
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");
    if absolute {
        format!("/{}", joined)
    } else {
        joined
    }
}

/// Returns true if `tail` is a suffix of `full` that starts on a segment boundary.
///
/// Both arguments must already be normalized.
pub fn is_boundary_suffix(full: &str, tail: &str) -> bool {
    if tail.is_empty() || tail.len() > full.len() {
        return false;
    }
    if full == tail {
        return true;
    }
    let tail = tail.trim_start_matches('/');
    match full.strip_suffix(tail) {
        Some(head) => head.ends_with('/'),
        None => false,
    }
}

/// Returns true for a normalized absolute path: a leading `/` or a drive letter.
pub fn is_absolute_path(path: &str) -> bool {
    let bytes = path.as_bytes();
    path.starts_with('/')
        || (bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/')
}

/// A file known to the caller, matched against issue paths by identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceFileHandle {
    identity: String,
    path: PathBuf,
}

impl SourceFileHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let identity = normalize_path(&path.to_string_lossy());
        SourceFileHandle { identity, path }
    }

    /// The path as supplied by the caller.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The normalized identity string used as the index key.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Last path segment, used to narrow match candidates.
    pub fn file_name(&self) -> &str {
        file_name_of(&self.identity)
    }
}

impl fmt::Display for SourceFileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identity)
    }
}

impl From<&str> for SourceFileHandle {
    fn from(path: &str) -> Self {
        SourceFileHandle::new(path)
    }
}

impl From<PathBuf> for SourceFileHandle {
    fn from(path: PathBuf) -> Self {
        SourceFileHandle::new(path)
    }
}

/// Last segment of a normalized path.
pub(crate) fn file_name_of(normalized: &str) -> &str {
    normalized.rsplit('/').next().unwrap_or(normalized)
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
