// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Transfer agent implementations.
//!
//! [`CommonTransferAgent`] carries the edits every channel kind shares;
//! [`HttpReceiverTransferAgent`] composes it for the one channel whose
//! output is consumed in-place by a downstream channel rather than delivered
//! to a conventional destination host.

use tracing::debug;

use super::connection_url::rewrite_database_name;
use super::embedded_call::{rewrite_connection_call, CONNECTION_CALL_MARKER};
use super::{RewriteContext, TransferAgent, HTTP_RECEIVER_CHANNEL};
use crate::core::{ChannelError, Result};
use crate::document::{ChannelDocument, NodeId};

/// `DataType` property value of a filesystem-polling source connector.
const FILE_READER_DATA_TYPE: &str = "File Reader";

/// Script-bearing structural paths under a source filter.
const FILTER_SCRIPT_PATHS: &[&str] = &["rules/rule/data/entry/string", "rules/rule/script"];

/// Script-bearing structural paths under a source transformer.
const TRANSFORMER_SCRIPT_PATHS: &[&str] = &["steps/step/data/entry/string", "steps/step/script"];

/// `property` children of a properties section, in document order.
fn properties(doc: &ChannelDocument, props: NodeId) -> Vec<NodeId> {
    doc.child_elements(props)
        .into_iter()
        .filter(|&id| doc.name(id) == "property")
        .collect()
}

/// Value of the named property, if present.
///
/// Duplicate names are unguarded; the first match in document order wins.
fn property_value(doc: &ChannelDocument, props: NodeId, name: &str) -> Option<String> {
    properties(doc, props)
        .into_iter()
        .find(|&id| doc.attribute(id, "name") == Some(name))
        .map(|id| doc.text(id))
}

/// Set every property with the given name to `value`.
fn set_property(doc: &mut ChannelDocument, props: NodeId, name: &str, value: &str) {
    for id in properties(doc, props) {
        if doc.attribute(id, "name") == Some(name) {
            doc.set_text(id, value);
        }
    }
}

/// Field edits shared by every channel kind.
#[derive(Debug, Clone, Default)]
pub struct CommonTransferAgent;

impl CommonTransferAgent {
    /// Create a new common agent.
    pub fn new() -> Self {
        Self
    }

    /// Rewrite every marker-bearing script node under the given paths.
    fn rewrite_script_nodes(
        &self,
        doc: &mut ChannelDocument,
        root: NodeId,
        paths: &[&str],
        ctx: &RewriteContext,
    ) -> Result<()> {
        for path in paths {
            for node in doc.find_all(root, path) {
                let text = doc.text(node);
                if text.contains(CONNECTION_CALL_MARKER) {
                    let rewritten =
                        rewrite_connection_call(&text, &ctx.database, &ctx.user, &ctx.password)?;
                    doc.set_text(node, rewritten);
                }
            }
        }
        Ok(())
    }
}

impl TransferAgent for CommonTransferAgent {
    /// The same properties section shape is used for every source connector
    /// kind. Only the filesystem-polling kind gets path rewrites; writing
    /// path information into the host field of a network listener would
    /// silently break it.
    fn transform_source_connector(
        &self,
        doc: &mut ChannelDocument,
        props: NodeId,
        ctx: &RewriteContext,
    ) -> Result<()> {
        let data_type = property_value(doc, props, "DataType").ok_or_else(|| {
            ChannelError::structural("sourceConnector/properties/property[DataType]", 0)
        })?;
        if data_type != FILE_READER_DATA_TYPE {
            debug!(connector = %data_type, "source connector is not a file poller, leaving untouched");
            return Ok(());
        }

        set_property(doc, props, "host", &ctx.input_dir);
        set_property(doc, props, "moveToDirectory", &ctx.output_dir);
        set_property(doc, props, "moveToErrorDirectory", &ctx.error_dir);
        Ok(())
    }

    fn transform_filters(
        &self,
        doc: &mut ChannelDocument,
        filter: NodeId,
        ctx: &RewriteContext,
    ) -> Result<()> {
        self.rewrite_script_nodes(doc, filter, FILTER_SCRIPT_PATHS, ctx)
    }

    fn transform_transformers(
        &self,
        doc: &mut ChannelDocument,
        transformer: NodeId,
        ctx: &RewriteContext,
    ) -> Result<()> {
        self.rewrite_script_nodes(doc, transformer, TRANSFORMER_SCRIPT_PATHS, ctx)
    }

    fn transform_destinations(
        &self,
        doc: &mut ChannelDocument,
        props: NodeId,
        ctx: &RewriteContext,
    ) -> Result<()> {
        for prop in properties(doc, props) {
            match doc.attribute(prop, "name") {
                Some("username") => doc.set_text(prop, ctx.user.as_str()),
                Some("password") => doc.set_text(prop, ctx.password.as_str()),
                Some("URL") => {
                    let url = doc.text(prop);
                    doc.set_text(prop, rewrite_database_name(&url, &ctx.database));
                }
                Some("script") => {
                    let text = doc.text(prop);
                    if text.contains(CONNECTION_CALL_MARKER) {
                        let rewritten = rewrite_connection_call(
                            &text,
                            &ctx.database,
                            &ctx.user,
                            &ctx.password,
                        )?;
                        doc.set_text(prop, rewritten);
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Specialized agent for the HTTP receiver channel.
///
/// Inherits every common edit, then points each destination's `host` at the
/// input directory: this channel's output is polled off disk by a downstream
/// channel instead of being delivered to a destination host.
#[derive(Debug, Clone, Default)]
pub struct HttpReceiverTransferAgent {
    common: CommonTransferAgent,
}

impl HttpReceiverTransferAgent {
    /// Create a new HTTP receiver agent.
    pub fn new() -> Self {
        Self {
            common: CommonTransferAgent::new(),
        }
    }
}

impl TransferAgent for HttpReceiverTransferAgent {
    fn transform_source_connector(
        &self,
        doc: &mut ChannelDocument,
        props: NodeId,
        ctx: &RewriteContext,
    ) -> Result<()> {
        self.common.transform_source_connector(doc, props, ctx)
    }

    fn transform_filters(
        &self,
        doc: &mut ChannelDocument,
        filter: NodeId,
        ctx: &RewriteContext,
    ) -> Result<()> {
        self.common.transform_filters(doc, filter, ctx)
    }

    fn transform_transformers(
        &self,
        doc: &mut ChannelDocument,
        transformer: NodeId,
        ctx: &RewriteContext,
    ) -> Result<()> {
        self.common.transform_transformers(doc, transformer, ctx)
    }

    fn transform_destinations(
        &self,
        doc: &mut ChannelDocument,
        props: NodeId,
        ctx: &RewriteContext,
    ) -> Result<()> {
        self.common.transform_destinations(doc, props, ctx)?;
        set_property(doc, props, "host", &ctx.input_dir);
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Select the transfer agent for a parsed document.
///
/// Dispatch is an exact string match on the text of `/channel/name`; the
/// reserved HTTP receiver name gets the specialized agent, everything else
/// (including a missing name) gets the common one.
pub fn select_agent(doc: &ChannelDocument) -> Box<dyn TransferAgent> {
    let name = doc
        .select("channel/name")
        .first()
        .map(|&id| doc.text(id))
        .unwrap_or_default();
    if name == HTTP_RECEIVER_CHANNEL {
        Box::new(HttpReceiverTransferAgent::new())
    } else {
        Box::new(CommonTransferAgent::new())
    }
}
