// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Transform command - rewrite channel exports for another environment.

use std::path::PathBuf;

use clap::Args;

use crate::common::{load_settings, Result};
use channelforge::rewrite::{transform_channels, RewriteContext, TransformManager};

/// Rewrite channel exports for another environment.
///
/// SOURCE may be a directory holding the full channel roster (every roster
/// channel is transformed and codetemplates.xml is copied along) or a single
/// exported channel file. Values default to the configuration file and are
/// overridden by flags.
#[derive(Args, Clone, Debug)]
pub struct TransformCmd {
    /// Source channel export file, or directory containing the roster
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Directory where transformed file(s) will be written
    #[arg(value_name = "TARGET_DIR")]
    target_dir: PathBuf,

    /// Name of database (overrides [warehouse]database)
    #[arg(short = 'd', long)]
    database: Option<String>,

    /// Database user (overrides [warehouse]database_user)
    #[arg(short = 'u', long)]
    user: Option<String>,

    /// Database password (overrides [warehouse]database_password)
    #[arg(short = 'p', long)]
    password: Option<String>,

    /// Filesystem directory for channel to poll (overrides [warehouse]input_dir)
    #[arg(long)]
    input_dir: Option<String>,

    /// Filesystem directory for channel output (overrides [warehouse]output_dir)
    #[arg(long)]
    output_dir: Option<String>,

    /// Filesystem directory for channel errors (overrides [warehouse]error_dir)
    #[arg(long)]
    error_dir: Option<String>,

    /// Configuration file with default values
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

impl TransformCmd {
    pub fn run(self) -> Result<()> {
        let settings = load_settings(self.config.as_ref())?;
        let context = self.context(settings.rewrite_context());

        if self.source.is_dir() {
            println!("Transforming channel roster:");
            println!("  Source: {}", self.source.display());
            println!("  Target: {}", self.target_dir.display());
            let written = transform_channels(&self.source, &self.target_dir, &context)?;
            for path in &written {
                println!("  Wrote: {}", path.display());
            }
            println!("  {} file(s) written", written.len());
        } else {
            let manager = TransformManager::with_context(context);
            let written = manager.run(&self.source, &self.target_dir)?;
            println!("wrote new channel export: {}", written.display());
        }
        Ok(())
    }

    /// Apply flag overrides on top of configuration defaults.
    fn context(&self, defaults: RewriteContext) -> RewriteContext {
        RewriteContext {
            database: self.database.clone().unwrap_or(defaults.database),
            user: self.user.clone().unwrap_or(defaults.user),
            password: self.password.clone().unwrap_or(defaults.password),
            input_dir: self.input_dir.clone().unwrap_or(defaults.input_dir),
            output_dir: self.output_dir.clone().unwrap_or(defaults.output_dir),
            error_dir: self.error_dir.clone().unwrap_or(defaults.error_dir),
        }
    }
}
