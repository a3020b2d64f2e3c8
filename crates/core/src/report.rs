// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Decoder for the `sonar-report.json` artifact written by a local analysis.
//!
//! ```json
//! {
//!   "issues": [
//!     {"rule": "squid:S106", "message": "...", "severity": "MAJOR",
//!      "component": "org:app:src/A.java", "line": 10}
//!   ],
//!   "components": [
//!     {"key": "org:app:src/A.java", "path": "src/A.java", "moduleKey": "org:app"}
//!   ]
//! }
//! ```
//!
//! The report is not scoped to one resource; every issue carries the resource
//! key it came from so the indexer can filter per key.

use serde::Deserialize;
use serde_json::Value as Json;

use crate::component::ComponentTable;
use crate::error::{Error, Result};
use crate::issue::IssueRecord;

#[derive(Deserialize)]
struct RawReport {
    #[serde(default)]
    issues: Vec<Json>,
    #[serde(default)]
    components: Vec<Json>,
}

/// Parses a report into issue records.
///
/// Fails only when the document itself is not a report object; individual
/// malformed issues are dropped.
pub fn parse_report(bytes: &[u8]) -> Result<Vec<IssueRecord>> {
    let value: Json = serde_json::from_slice(bytes)?;
    if !value.is_object() {
        return Err(Error::MalformedReport(
            "expected a JSON object at top level".to_string(),
        ));
    }
    let report: RawReport = serde_json::from_value(value)
        .map_err(|e| Error::MalformedReport(e.to_string()))?;
    let table = ComponentTable::from_values(report.components);
    Ok(report
        .issues
        .into_iter()
        .filter_map(|issue| table.normalize(issue))
        .collect())
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
