// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Console sink for acquisition progress and captured process output.
//!
//! Tasks never print directly. Every line goes through a [`ConsoleSink`], and
//! the default sink turns lines into `tracing` events under the
//! `sonarlens::console` target.

use std::fmt;

/// Severity of a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Info,
    Error,
}

impl fmt::Display for ConsoleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleLevel::Info => write!(f, "INFO"),
            ConsoleLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Fire-and-forget line sink. Implementations must not block.
pub trait ConsoleSink: Send + Sync {
    fn log(&self, level: ConsoleLevel, message: &str);

    fn info(&self, message: &str) {
        self.log(ConsoleLevel::Info, message);
    }

    fn error(&self, message: &str) {
        self.log(ConsoleLevel::Error, message);
    }
}

/// Sink that forwards lines to the installed `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingConsole;

impl ConsoleSink for TracingConsole {
    fn log(&self, level: ConsoleLevel, message: &str) {
        match level {
            ConsoleLevel::Info => tracing::info!(target: "sonarlens::console", "{}", message),
            ConsoleLevel::Error => tracing::error!(target: "sonarlens::console", "{}", message),
        }
    }
}
