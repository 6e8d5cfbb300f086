// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Channel rewriting engine.
//!
//! This module rewrites the environment-specific fields of a parsed channel
//! export: filesystem paths on polling source connectors, destination
//! credentials and connection URLs, and connection parameters embedded as
//! string literals inside serialized script bodies.
//!
//! Work is organized as a closed set of strategies sharing the
//! [`TransferAgent`] trait. [`select_agent`] picks the strategy from the
//! channel's declared name; [`TransformManager`] drives one document end to
//! end (parse, transform, serialize).
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use channelforge::rewrite::{RewriteContext, TransformManager};
//!
//! let context = RewriteContext {
//!     database: "warehouse".into(),
//!     user: "deploy".into(),
//!     password: "secret".into(),
//!     input_dir: "/var/mirth/in".into(),
//!     output_dir: "/var/mirth/out".into(),
//!     error_dir: "/var/mirth/err".into(),
//! };
//! let manager = TransformManager::with_context(context);
//! manager.run("exports/channel.xml".as_ref(), "deploy/".as_ref())?;
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod connection_url;
pub mod embedded_call;
pub mod manager;

pub use agent::{select_agent, CommonTransferAgent, HttpReceiverTransferAgent};
pub use connection_url::rewrite_database_name;
pub use embedded_call::{rewrite_connection_call, CONNECTION_CALL_MARKER};
pub use manager::{transform_channels, TransformManager, CHANNEL_ROSTER, CODETEMPLATES_FILE};

use crate::core::Result;
use crate::document::{ChannelDocument, NodeId};

/// Channel name that selects the specialized HTTP receiver agent.
pub const HTTP_RECEIVER_CHANNEL: &str = "PHEME_http_receiver";

/// Environment-specific values applied during one transformation run.
///
/// Built once per run (from the configuration file and CLI overrides) and
/// referenced read-only by every agent. Applying the same context twice
/// yields the same document.
#[derive(Debug, Clone, Default)]
pub struct RewriteContext {
    /// Database name substituted into connection URLs
    pub database: String,
    /// Database user for destination connectors and embedded calls
    pub user: String,
    /// Database password for destination connectors and embedded calls
    pub password: String,
    /// Directory a filesystem-polling source connector reads from
    pub input_dir: String,
    /// Directory processed input is moved to
    pub output_dir: String,
    /// Directory errored input is moved to
    pub error_dir: String,
}

/// One field-editing strategy for a channel kind.
///
/// The four capability methods edit one structural section each; the
/// provided [`transform`](TransferAgent::transform) drives them in document
/// order against the required structural paths. The specialized variant
/// composes the common one and overrides a single step.
pub trait TransferAgent {
    /// Edit the source connector's properties section.
    fn transform_source_connector(
        &self,
        doc: &mut ChannelDocument,
        props: NodeId,
        ctx: &RewriteContext,
    ) -> Result<()>;

    /// Edit the script bodies of one source filter.
    fn transform_filters(
        &self,
        doc: &mut ChannelDocument,
        filter: NodeId,
        ctx: &RewriteContext,
    ) -> Result<()>;

    /// Edit the script bodies of one source transformer.
    fn transform_transformers(
        &self,
        doc: &mut ChannelDocument,
        transformer: NodeId,
        ctx: &RewriteContext,
    ) -> Result<()>;

    /// Edit one destination connector's properties section.
    fn transform_destinations(
        &self,
        doc: &mut ChannelDocument,
        props: NodeId,
        ctx: &RewriteContext,
    ) -> Result<()>;

    /// Apply all field edits to one parsed document.
    ///
    /// The source connector's properties section must resolve to exactly one
    /// node; filters, transformers, and destinations are zero-or-more.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ChannelError::Structural`] when the source
    /// connector's properties path does not resolve to exactly one node, and
    /// propagates any script-rewriting failure.
    fn transform(&self, doc: &mut ChannelDocument, ctx: &RewriteContext) -> Result<()> {
        let source_props = doc.select_one("channel/sourceConnector/properties")?;
        self.transform_source_connector(doc, source_props, ctx)?;

        for filter in doc.select("channel/sourceConnector/filter") {
            self.transform_filters(doc, filter, ctx)?;
        }
        for transformer in doc.select("channel/sourceConnector/transformer") {
            self.transform_transformers(doc, transformer, ctx)?;
        }
        for dest_props in doc.select("channel/destinationConnectors/connector/properties") {
            self.transform_destinations(doc, dest_props, ctx)?;
        }
        Ok(())
    }

    /// Get a reference as `Any` for downcasting to concrete agent types.
    fn as_any(&self) -> &dyn std::any::Any;
}
