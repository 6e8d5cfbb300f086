// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::PathBuf;

use channelforge::Settings;

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Load settings from the given file, or fall back to empty defaults.
pub fn load_settings(config: Option<&PathBuf>) -> Result<Settings> {
    match config {
        Some(path) => Ok(Settings::load(path)?),
        None => Ok(Settings::default()),
    }
}
