// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Deploy command - import the channel roster and deploy it.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::common::{load_settings, Result};
use channelforge::{MirthShell, CHANNEL_ROSTER};

/// Import the channel roster from a directory and deploy it via the admin
/// shell on localhost.
#[derive(Args, Clone, Debug)]
pub struct DeployCmd {
    /// Directory containing channel definition files
    #[arg(value_name = "DEPLOY_DIR")]
    deploy_dir: PathBuf,

    /// Configuration file with admin shell settings
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

impl DeployCmd {
    pub fn run(self) -> Result<()> {
        let settings = load_settings(self.config.as_ref())?;
        let shell = MirthShell::from_settings(&settings);

        let imports: Vec<PathBuf> = CHANNEL_ROSTER
            .iter()
            .map(|name| self.deploy_dir.join(format!("{name}.xml")))
            .collect();

        println!("Deploying {} channel(s) from {}", imports.len(), self.deploy_dir.display());
        let script_path = write_script_file("deploy", |out| {
            shell.write_script(out, &imports, &[])
        })?;
        let result = shell.execute_script(&script_path);
        std::fs::remove_file(&script_path).ok();
        result?;

        println!("Deploy complete");
        Ok(())
    }
}

/// Write a scratch admin-shell script and return its path.
pub(crate) fn write_script_file<F>(tag: &str, fill: F) -> Result<PathBuf>
where
    F: FnOnce(&mut std::fs::File) -> channelforge::Result<()>,
{
    let path = std::env::temp_dir().join(format!(
        "channelforge_{}_{}.script",
        tag,
        std::process::id()
    ));
    let mut file = std::fs::File::create(&path)?;
    fill(&mut file)?;
    file.flush()?;
    Ok(path)
}
