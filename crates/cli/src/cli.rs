// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Channel;

/// Output format for the resulting issue index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

const QUICKSTART_HELP: &str = "\
Get started:
  sonarlens local             Run the configured analysis script
  sonarlens remote            Download open issues from the server
  sonarlens analyze -o json   Use the configured mode, print JSON

Configuration lives in .sonarlens/config.toml at the project root.
SONARLENS_TOKEN overrides server.token.";

#[derive(Parser, Debug)]
#[command(name = "sonarlens")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Map static-analysis issues onto the files of a local project")]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    /// Run as if started in this directory
    #[arg(short = 'C', long = "directory", global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the local analysis script and index its report
    Local {
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Download issues for the configured resources and index them
    Remote {
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Acquire issues through the configured channel
    Analyze {
        /// Channel to use instead of the configured mode
        #[arg(long, value_enum)]
        channel: Option<Channel>,

        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },
}

impl Command {
    /// Channel requested on the command line, if any.
    pub fn channel(&self) -> Option<Channel> {
        match self {
            Command::Local { .. } => Some(Channel::Local),
            Command::Remote { .. } => Some(Channel::Remote),
            Command::Analyze { channel, .. } => *channel,
        }
    }

    pub fn output(&self) -> OutputFormat {
        match self {
            Command::Local { output }
            | Command::Remote { output }
            | Command::Analyze { output, .. } => *output,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
