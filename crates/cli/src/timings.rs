// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable durations for progress and summary lines.

use std::time::Duration;

/// Formats a duration as a breakdown like `1 min 2 sec 30 ms`.
///
/// Zero-valued units are omitted; a zero duration is `0 ms`.
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let seconds = (total_ms / 1_000) % 60;
    let millis = total_ms % 1_000;

    let parts: Vec<String> = [(hours, "h"), (minutes, "min"), (seconds, "sec"), (millis, "ms")]
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{} {}", value, unit))
        .collect();

    if parts.is_empty() {
        "0 ms".to_string()
    } else {
        parts.join(" ")
    }
}

/// Milliseconds elapsed, saturating at `u64::MAX`.
pub fn elapsed_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[path = "timings_tests.rs"]
mod tests;
