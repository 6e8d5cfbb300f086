// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! End-to-end transform orchestration.
//!
//! [`TransformManager`] drives one document at a time: parse the source
//! export, pick the agent from the channel's declared name, apply the
//! agent's edits, and serialize the result into the target directory under
//! the source's base name. Documents are fully independent; a batch run is
//! a plain sequential loop over the channel roster.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::agent::select_agent;
use super::RewriteContext;
use crate::core::{ChannelError, Result};
use crate::document::ChannelDocument;

/// The channel definitions deployed as a set.
pub const CHANNEL_ROSTER: &[&str] = &[
    "PHEME_hl7_obx_insert",
    "PHEME_http_receiver",
    "PHEME_hl7_visit_insert",
    "PHEME_batchfile_consumer",
    "PHEME_hl7_dx_insert",
    "PHEME_hl7_obr_insert",
    "dump_to_disk",
];

/// Shared script library exported alongside channels.
///
/// Not transformed, but the importer expects it next to the channel files,
/// so batch runs copy it over verbatim.
pub const CODETEMPLATES_FILE: &str = "codetemplates.xml";

/// Orchestrates one channel export end to end.
///
/// Holds the [`RewriteContext`] for the run; each [`run`](Self::run) call
/// parses, transforms, and serializes one independent document.
#[derive(Debug, Clone)]
pub struct TransformManager {
    context: RewriteContext,
}

impl TransformManager {
    /// Create a manager with the given rewrite context.
    pub fn with_context(context: RewriteContext) -> Self {
        Self { context }
    }

    /// The context applied to every document this manager processes.
    pub fn context(&self) -> &RewriteContext {
        &self.context
    }

    /// Transform an already-parsed document in place.
    pub fn transform_document(&self, doc: &mut ChannelDocument) -> Result<()> {
        let agent = select_agent(doc);
        agent.transform(doc, &self.context)
    }

    /// Transform one channel export file.
    ///
    /// Writes the transformed document to `<target_dir>/<basename>` where
    /// `basename` is the source's file name, overwriting any existing file.
    /// Returns the written path.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Parse`] on malformed XML,
    /// [`ChannelError::Structural`] on a violated structural assumption, the
    /// embedded-call errors on unsupported script shapes, and
    /// [`ChannelError::Io`] on read/write failures.
    pub fn run(&self, source: &Path, target_dir: &Path) -> Result<PathBuf> {
        let mut doc = ChannelDocument::parse_file(source)?;
        self.transform_document(&mut doc)?;

        let basename = source.file_name().ok_or_else(|| {
            ChannelError::io(format!("source path has no file name: {}", source.display()))
        })?;
        let target = target_dir.join(basename);
        doc.write_file(&target)?;
        debug!(source = %source.display(), target = %target.display(), "wrote channel export");
        Ok(target)
    }
}

/// Transform the full channel roster from one directory into another.
///
/// Expects `<name>.xml` for every roster channel under `source_dir`, writes
/// the transformed exports into `target_dir`, then copies the untransformed
/// codetemplates file alongside them. Stops at the first failing document.
///
/// Returns the paths written, codetemplates last.
pub fn transform_channels(
    source_dir: &Path,
    target_dir: &Path,
    context: &RewriteContext,
) -> Result<Vec<PathBuf>> {
    let manager = TransformManager::with_context(context.clone());
    let mut written = Vec::with_capacity(CHANNEL_ROSTER.len() + 1);
    for name in CHANNEL_ROSTER {
        let source = source_dir.join(format!("{name}.xml"));
        written.push(manager.run(&source, target_dir)?);
    }

    let templates_target = target_dir.join(CODETEMPLATES_FILE);
    std::fs::copy(source_dir.join(CODETEMPLATES_FILE), &templates_target)?;
    written.push(templates_target);
    Ok(written)
}
