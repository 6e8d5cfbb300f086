// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Export command - export the live channel roster.

use std::path::PathBuf;

use anyhow::bail;
use clap::Args;

use super::deploy::write_script_file;
use crate::common::{load_settings, Result};
use channelforge::{MirthShell, CHANNEL_ROSTER};

/// Export the channel roster and code templates from the running engine to
/// a directory.
#[derive(Args, Clone, Debug)]
pub struct ExportCmd {
    /// Directory for exported files
    #[arg(value_name = "EXPORT_DIR")]
    export_dir: PathBuf,

    /// Configuration file with admin shell settings
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

impl ExportCmd {
    pub fn run(self) -> Result<()> {
        if !self.export_dir.is_dir() {
            bail!("can't access {}", self.export_dir.display());
        }

        let settings = load_settings(self.config.as_ref())?;
        let shell = MirthShell::from_settings(&settings);

        let exports: Vec<(String, PathBuf)> = CHANNEL_ROSTER
            .iter()
            .map(|name| {
                (
                    name.to_string(),
                    self.export_dir.join(format!("{name}.xml")),
                )
            })
            .collect();

        println!("Exporting {} channel(s) to {}", exports.len(), self.export_dir.display());
        let script_path = write_script_file("export", |out| {
            shell.write_script(out, &[], &exports)
        })?;
        let result = shell.execute_script(&script_path);
        std::fs::remove_file(&script_path).ok();
        result?;

        println!("Export complete");
        Ok(())
    }
}
