// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! slrs - map static-analysis issues onto the files of a local project.
//!
//! This crate provides the acquisition side of the `sonarlens` CLI. Issues
//! come from one of two channels and land in a shared
//! [`IssueIndexStore`](sl_core::IssueIndexStore):
//!
//! - [`acquire::LocalScriptTask`] runs an analysis command and reads its report
//! - [`acquire::RemoteTask`] downloads open issues through an [`service::IssueService`]
//!
//! # Main Components
//!
//! - [`Config`] - Project configuration in `.sonarlens/config.toml`
//! - [`acquire`] - Acquisition tasks, modes and task states
//! - [`service`] - Remote issue service and its HTTP implementation
//! - [`console`] - Line sink for task progress and process output
//!
//! # Running a task directly
//!
//! ```rust,ignore
//! use slrs::acquire::{run_acquisition, TaskState};
//!
//! let config = Config::load(&root)?;
//! let mode = config.acquisition_mode(&root, None)?;
//! let store = Arc::new(IssueIndexStore::new());
//! let result = run_acquisition(mode, files, store.clone(), console, &cancel).await?;
//! assert_eq!(result.state, TaskState::Succeeded);
//! ```

mod cli;
pub mod colors;
mod display;
pub mod files;
pub mod timings;

pub mod acquire;
pub mod config;
pub mod console;
pub mod error;
pub mod service;

pub use cli::{Cli, Command, OutputFormat};
pub use config::{find_project_root, Config};
pub use error::{Error, Result};

use std::io::IsTerminal;
use std::sync::Arc;

use sl_core::{IssueIndexStore, SourceFileHandle};
use tokio_util::sync::CancellationToken;

use acquire::{run_acquisition, AcquisitionMode, TaskResult, TaskState};
use console::{ConsoleSink, TracingConsole};

/// Execute a CLI invocation. Blocks until the acquisition finishes, then
/// prints the resulting index to stdout.
pub fn run(cli: Cli) -> Result<()> {
    let start = match cli.directory {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let root = find_project_root(&start)?;
    let config = Config::load(&root)?.with_token_override(std::env::var(config::TOKEN_ENV).ok());
    let mode = config.acquisition_mode(&root, cli.command.channel())?;
    let channel = mode.channel_name();
    let files = files::collect_source_files(&root)?;
    tracing::debug!(channel, files = files.len(), root = %root.display(), "starting acquisition");

    let store = Arc::new(IssueIndexStore::new());
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Io(std::io::Error::other(format!("tokio: {}", e))))?;
    let result = rt.block_on(acquire(mode, files, Arc::clone(&store)))?;
    check_outcome(result, channel)?;

    println!("{}", display::render(&store.snapshot(), cli.command.output())?);
    Ok(())
}

/// Runs one acquisition with Ctrl-C wired to cancellation.
async fn acquire(
    mode: AcquisitionMode,
    files: Vec<SourceFileHandle>,
    store: Arc<IssueIndexStore>,
) -> Result<TaskResult> {
    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupt received, canceling");
                cancel.cancel();
            }
        })
    };
    let console: Arc<dyn ConsoleSink> = Arc::new(TracingConsole);
    let result = run_acquisition(mode, files, store, console, &cancel).await;
    interrupt.abort();
    result
}

/// Maps a finished task to the CLI outcome.
fn check_outcome(result: TaskResult, channel: &'static str) -> Result<()> {
    tracing::debug!(state = ?result.state, elapsed_ms = result.elapsed_ms, "acquisition finished");
    match result.state {
        TaskState::Succeeded => Ok(()),
        TaskState::Canceled => Err(Error::Cancelled),
        TaskState::Failed | TaskState::Ready | TaskState::Running => {
            Err(Error::AcquisitionFailed { channel })
        }
    }
}

/// Installs the stderr `tracing` subscriber.
///
/// `RUST_LOG` wins; otherwise the level is `info`, or `debug` when `verbose`.
pub fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
