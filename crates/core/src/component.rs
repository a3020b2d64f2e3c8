// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Component-key resolution shared by the report and search-page decoders.

use serde::Deserialize;
use serde_json::Value as Json;
use std::collections::HashMap;

use crate::issue::{IssueRecord, Severity};

/// A `components` entry as emitted by both the report and the search API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Component {
    key: String,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    module_key: Option<String>,
}

/// An issue entry before normalization. Fields common to both formats.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawIssue {
    rule: String,
    message: String,
    severity: String,
    component: String,
    #[serde(default)]
    line: Option<u32>,
    #[serde(default)]
    project: Option<String>,
    #[serde(default)]
    sub_project: Option<String>,
}

/// Lookup from component key to its path and owning module.
#[derive(Debug, Default)]
pub(crate) struct ComponentTable {
    components: HashMap<String, Component>,
}

impl ComponentTable {
    /// Builds the table, skipping entries that do not decode.
    pub(crate) fn from_values(values: Vec<Json>) -> Self {
        let components = values
            .into_iter()
            .filter_map(|v| serde_json::from_value::<Component>(v).ok())
            .map(|c| (c.key.clone(), c))
            .collect();
        ComponentTable { components }
    }

    /// Returns `(resource_key, path)` for a component key.
    fn resolve(&self, component_key: &str) -> (String, String) {
        let (prefix, suffix) = split_component_key(component_key);
        match self.components.get(component_key) {
            Some(c) => (
                c.module_key.clone().unwrap_or_else(|| prefix.to_string()),
                c.path.clone().unwrap_or_else(|| suffix.to_string()),
            ),
            None => (prefix.to_string(), suffix.to_string()),
        }
    }

    /// Normalizes one raw issue value. `None` when the entry is malformed.
    pub(crate) fn normalize(&self, value: Json) -> Option<IssueRecord> {
        let raw: RawIssue = serde_json::from_value(value).ok()?;
        let severity = raw.severity.parse::<Severity>().ok()?;
        if raw.rule.is_empty() || raw.component.is_empty() {
            return None;
        }
        let (component_resource, path) = self.resolve(&raw.component);
        let resource_key = raw
            .sub_project
            .or(raw.project)
            .unwrap_or(component_resource);
        Some(
            IssueRecord::new(raw.rule, raw.message, severity, path)
                .with_line(raw.line)
                .with_resource_key(resource_key),
        )
    }
}

/// Splits `org:app:src/A.java` into `("org:app", "src/A.java")`.
///
/// Paths never contain `:` in component keys, so the last separator marks
/// the boundary. A key without a separator is all path.
pub(crate) fn split_component_key(key: &str) -> (&str, &str) {
    key.rsplit_once(':').unwrap_or(("", key))
}

#[cfg(test)]
#[path = "component_tests.rs"]
mod tests;
