// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project configuration management.
//!
//! Configuration is stored in `.sonarlens/config.toml` and includes:
//! - `mode`: which channel `analyze` uses (`local` or `remote`)
//! - `[server]`: analysis server URL and credentials
//! - `[[resources]]`: resource keys the project maps to
//! - `[script]`: local analysis command and the report it writes

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::acquire::{AcquisitionMode, LocalScriptConfig, RemoteConfig};
use crate::error::{Error, Result};

pub const CONFIG_DIR_NAME: &str = ".sonarlens";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable that overrides `server.token`.
pub const TOKEN_ENV: &str = "SONARLENS_TOKEN";

/// Acquisition channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Local,
    Remote,
}

/// Project configuration stored in `.sonarlens/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Channel used by `analyze` when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Channel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourceConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<ScriptConfig>,
}

/// Analysis server connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL, e.g. `https://sonar.example.com`.
    pub url: String,
    /// User token. Takes precedence over `user`/`password`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Issues requested per page (server maximum is 500).
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    500
}

/// A remote resource (project or module) the local files belong to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Local analysis script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    /// Command line, split on whitespace.
    pub command: String,
    /// Report written by the command, relative to the working directory.
    pub report: String,
    /// Working directory relative to the project root (default: the root).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
}

impl Config {
    /// Loads `.sonarlens/config.toml` under `project_root`.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
        let content = fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse config: {}", e)))
    }

    /// Replaces the server token when `token` is set and non-empty.
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        if let (Some(server), Some(token)) = (self.server.as_mut(), token) {
            if !token.is_empty() {
                server.token = Some(token);
            }
        }
        self
    }

    /// Configured resource keys, de-duplicated, in declaration order.
    pub fn resource_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::with_capacity(self.resources.len());
        for resource in &self.resources {
            let key = resource.key.trim();
            if !key.is_empty() && !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
        }
        keys
    }

    /// Picks the channel: explicit request, then `mode`, then whichever
    /// section is configured (script first).
    pub fn channel(&self, requested: Option<Channel>) -> Channel {
        requested.or(self.mode).unwrap_or(if self.script.is_some() {
            Channel::Local
        } else {
            Channel::Remote
        })
    }

    /// Resolves the acquisition mode for a run rooted at `project_root`.
    pub fn acquisition_mode(
        &self,
        project_root: &Path,
        requested: Option<Channel>,
    ) -> Result<AcquisitionMode> {
        match self.channel(requested) {
            Channel::Local => self.local_mode(project_root).map(AcquisitionMode::Local),
            Channel::Remote => self.remote_mode().map(AcquisitionMode::Remote),
        }
    }

    fn local_mode(&self, project_root: &Path) -> Result<LocalScriptConfig> {
        let script = self
            .script
            .as_ref()
            .ok_or(Error::NotConfigured { section: "script" })?;
        let command: Vec<String> = script.command.split_whitespace().map(String::from).collect();
        if command.is_empty() {
            return Err(Error::FieldEmpty {
                field: "script.command",
            });
        }
        if script.report.trim().is_empty() {
            return Err(Error::FieldEmpty {
                field: "script.report",
            });
        }
        let working_dir = resolve_under(project_root, script.working_dir.as_deref().unwrap_or("."));
        let report_path = resolve_under(&working_dir, script.report.trim());
        Ok(LocalScriptConfig {
            command,
            working_dir,
            report_path,
            resource_keys: self.resource_keys(),
        })
    }

    fn remote_mode(&self) -> Result<RemoteConfig> {
        let server = self
            .server
            .clone()
            .ok_or(Error::NotConfigured { section: "server" })?;
        if server.url.trim().is_empty() {
            return Err(Error::FieldEmpty { field: "server.url" });
        }
        let resource_keys = self.resource_keys();
        if resource_keys.is_empty() {
            return Err(Error::NotConfigured {
                section: "resources",
            });
        }
        Ok(RemoteConfig {
            server,
            resource_keys,
        })
    }
}

/// Joins a relative path onto `base`; absolute paths are kept as-is.
fn resolve_under(base: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else if path == Path::new(".") {
        base.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Finds the project root by walking up from `start` to the first directory
/// containing `.sonarlens/config.toml`.
pub fn find_project_root(start: &Path) -> Result<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME).is_file() {
            return Ok(dir.to_path_buf());
        }
        current = dir.parent();
    }
    Err(Error::NotInitialized(start.display().to_string()))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
