// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Configuration file handling.
//!
//! Deployment settings live in a TOML file with a `[warehouse]` section for
//! the rewrite values and a `[mirth]` section for the admin shell:
//!
//! ```toml
//! [warehouse]
//! database = "warehouse"
//! database_user = "deploy"
//! database_password = "secret"
//! input_dir = "/var/mirth/in"
//! output_dir = "/var/mirth/out"
//! error_dir = "/var/mirth/err"
//!
//! [mirth]
//! mirth_home = "/opt/mirthconnect"
//! mirth_system_user = "mirth"
//! ```
//!
//! File values are defaults; CLI flags override them per run. Every field is
//! optional and defaults to empty — this layer enforces nothing.

use std::path::Path;

use serde::Deserialize;

use crate::core::{ChannelError, Result};
use crate::rewrite::RewriteContext;

/// Rewrite value defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WarehouseSettings {
    /// Database name substituted into connection URLs
    pub database: String,
    /// Database user
    pub database_user: String,
    /// Database password
    pub database_password: String,
    /// Filesystem directory for the channel to poll
    pub input_dir: String,
    /// Filesystem directory for channel output
    pub output_dir: String,
    /// Filesystem directory for channel errors
    pub error_dir: String,
}

/// Admin shell settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MirthSettings {
    /// Installation directory holding the `mccommand` executable
    pub mirth_home: String,
    /// System user the admin shell runs as
    pub mirth_system_user: String,
}

/// Full configuration file contents.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `[warehouse]` section
    pub warehouse: WarehouseSettings,
    /// `[mirth]` section
    pub mirth: MirthSettings,
}

impl Settings {
    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Io`] when the file cannot be read and
    /// [`ChannelError::Config`] when it is not valid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| ChannelError::config(path.display().to_string(), e.to_string()))
    }

    /// Build a [`RewriteContext`] from the `[warehouse]` defaults.
    pub fn rewrite_context(&self) -> RewriteContext {
        RewriteContext {
            database: self.warehouse.database.clone(),
            user: self.warehouse.database_user.clone(),
            password: self.warehouse.database_password.clone(),
            input_dir: self.warehouse.input_dir.clone(),
            output_dir: self.warehouse.output_dir.clone(),
            error_dir: self.warehouse.error_dir.clone(),
        }
    }
}
