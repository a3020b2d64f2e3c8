// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal color utilities for issue listings.
//!
//! Respects environment variables:
//! - `NO_COLOR=1`: Disables colors
//! - `COLOR=1`: Forces colors even without TTY

use std::io::IsTerminal;

use sl_core::Severity;

/// ANSI 256-color codes.
pub mod codes {
    /// File headers: pastel cyan/steel blue
    pub const HEADER: u8 = 74;
    /// Line numbers and rule keys: medium grey
    pub const CONTEXT: u8 = 245;
    /// Info and minor issues: light grey
    pub const LOW: u8 = 250;
    /// Major issues: amber
    pub const MAJOR: u8 = 214;
    /// Critical and blocker issues: red
    pub const HIGH: u8 = 196;
}

/// Check if colors should be enabled based on TTY and environment variables.
pub fn should_colorize() -> bool {
    // NO_COLOR=1 disables colors
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }

    // COLOR=1 forces colors even without TTY
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }

    std::io::stdout().is_terminal()
}

/// Format a 256-color ANSI escape sequence for foreground color.
fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

/// ANSI reset sequence.
const RESET: &str = "\x1b[0m";

fn paint(code: u8, text: &str) -> String {
    format!("{}{}{}", fg256(code), text, RESET)
}

/// Apply header color (file paths) to text.
pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

/// Apply context color (line numbers, rule keys) to text.
pub fn context(text: &str) -> String {
    paint(codes::CONTEXT, text)
}

/// Color code for a severity.
pub fn severity_code(severity: Severity) -> u8 {
    match severity {
        Severity::Info | Severity::Minor => codes::LOW,
        Severity::Major => codes::MAJOR,
        Severity::Critical | Severity::Blocker => codes::HIGH,
    }
}

/// Apply the severity's color to text.
pub fn severity(severity: Severity, text: &str) -> String {
    paint(severity_code(severity), text)
}

#[cfg(test)]
#[path = "colors_tests.rs"]
mod tests;
