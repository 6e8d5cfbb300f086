// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Admin shell interface.
//!
//! Deployment and export go through the integration engine's scriptable
//! admin shell (`mccommand`). This module generates the instruction scripts
//! the shell consumes and runs the shell over them. A few patterns cover
//! everything: import a set of channel exports and deploy them, or export
//! the live channels to a directory. Code templates ride along with either
//! direction in a `codetemplates.xml` next to the first named channel file.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::config::Settings;
use crate::core::{ChannelError, Result};
use crate::rewrite::CODETEMPLATES_FILE;

/// Drives the integration engine's admin shell.
#[derive(Debug, Clone)]
pub struct MirthShell {
    /// Installation directory holding the `mccommand` executable
    mirth_home: PathBuf,
    /// System user the shell must run as
    system_user: String,
}

impl MirthShell {
    /// Create a shell driver.
    pub fn new(mirth_home: impl Into<PathBuf>, system_user: impl Into<String>) -> Self {
        Self {
            mirth_home: mirth_home.into(),
            system_user: system_user.into(),
        }
    }

    /// Create a shell driver from the `[mirth]` configuration section.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.mirth.mirth_home.clone(),
            settings.mirth.mirth_system_user.clone(),
        )
    }

    /// Write admin shell instructions for the given imports and exports.
    ///
    /// * `imports` - channel export files to import (each must exist)
    /// * `exports` - `(channel name, output path)` pairs to export
    ///
    /// Imports are followed by a code template import, a deploy, and a
    /// status check; exports are followed by a code template export. The
    /// codetemplates path is derived from the directory of the first named
    /// import or export.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Io`] when an import file is missing or the
    /// sink cannot be written.
    pub fn write_script<W: Write>(
        &self,
        out: &mut W,
        imports: &[PathBuf],
        exports: &[(String, PathBuf)],
    ) -> Result<()> {
        for channel in imports {
            if !channel.exists() {
                return Err(ChannelError::io(format!(
                    "import file does not exist: {}",
                    channel.display()
                )));
            }
            writeln!(out, "import {} force", channel.display())?;
        }
        for (channel, output) in exports {
            writeln!(out, "export {channel} {}", output.display())?;
        }

        if let Some(first) = imports.first() {
            let codetemplates = sibling_codetemplates(first);
            writeln!(out, "importcodetemplates {}", codetemplates.display())?;
            writeln!(out, "deploy")?;
            writeln!(out, "status")?;
        }
        if let Some((_, first_output)) = exports.first() {
            let codetemplates = sibling_codetemplates(first_output);
            writeln!(out, "exportcodetemplates {}", codetemplates.display())?;
        }
        Ok(())
    }

    /// Execute a generated script file via the admin shell.
    ///
    /// Runs `./mccommand -s <script>` from the configured installation
    /// directory, prefixed with `sudo -H -u <user>` when the current user is
    /// not the configured system user.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Io`] when the shell cannot be spawned or
    /// exits unsuccessfully.
    pub fn execute_script(&self, script: &Path) -> Result<()> {
        let current_user = std::env::var("USER").unwrap_or_default();
        let mut command = if !self.system_user.is_empty() && current_user != self.system_user {
            let mut c = Command::new("sudo");
            c.args(["-H", "-u", &self.system_user]).arg("./mccommand");
            c
        } else {
            Command::new("./mccommand")
        };
        command.arg("-s").arg(script).current_dir(&self.mirth_home);

        debug!(script = %script.display(), home = %self.mirth_home.display(), "running admin shell");
        let status = command
            .status()
            .map_err(|e| ChannelError::io(format!("failed to run mccommand: {e}")))?;
        if !status.success() {
            return Err(ChannelError::io(format!(
                "mccommand exited with {status}"
            )));
        }
        Ok(())
    }
}

/// The codetemplates file next to a channel file.
fn sibling_codetemplates(channel_path: &Path) -> PathBuf {
    channel_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(CODETEMPLATES_FILE)
}
