// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Event-based parsing of channel exports into the arena tree.

use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use super::{ChannelDocument, ElementData, NodeId, XmlContent};
use crate::core::{ChannelError, Result};

impl ChannelDocument {
    /// Parse a channel export from a string.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Parse`] on malformed XML, a missing root
    /// element, or more than one root element.
    pub fn parse_str(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);

        let mut nodes: Vec<ElementData> = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();
        let mut root: Option<NodeId> = None;
        let mut decl = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let id = push_element(&mut nodes, &e)?;
                    attach(&mut nodes, &stack, &mut root, id)?;
                    stack.push(id);
                }
                Ok(Event::Empty(e)) => {
                    let id = push_element(&mut nodes, &e)?;
                    attach(&mut nodes, &stack, &mut root, id)?;
                }
                Ok(Event::End(_)) => {
                    if stack.pop().is_none() {
                        return Err(ChannelError::parse(
                            "channel document",
                            "unexpected closing tag",
                        ));
                    }
                }
                Ok(Event::Text(e)) => {
                    // Character data outside the root element is ignored.
                    if let Some(&parent) = stack.last() {
                        let text = e
                            .unescape()
                            .map_err(|e| ChannelError::parse("text content", e.to_string()))?;
                        nodes[parent.0]
                            .children
                            .push(XmlContent::Text(text.into_owned()));
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(&parent) = stack.last() {
                        let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                        nodes[parent.0].children.push(XmlContent::Text(text));
                    }
                }
                Ok(Event::Decl(e)) => {
                    decl = Some(e.into_owned());
                }
                Ok(Event::Eof) => break,
                Ok(_) => {} // comments, PIs, DOCTYPE
                Err(e) => {
                    return Err(ChannelError::parse("channel document", e.to_string()));
                }
            }
        }

        if !stack.is_empty() {
            return Err(ChannelError::parse(
                "channel document",
                "unexpected end of input with unclosed elements",
            ));
        }
        let root = root.ok_or_else(|| {
            ChannelError::parse("channel document", "document has no root element")
        })?;

        Ok(ChannelDocument { nodes, root, decl })
    }

    /// Parse a channel export from a file.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Io`] when the file cannot be read and
    /// [`ChannelError::Parse`] on malformed XML.
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Self> {
        let xml = std::fs::read_to_string(path.as_ref())?;
        Self::parse_str(&xml)
    }
}

/// Append a new element slot for a start/empty tag.
fn push_element(
    nodes: &mut Vec<ElementData>,
    e: &quick_xml::events::BytesStart<'_>,
) -> Result<NodeId> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| ChannelError::parse("attribute", e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| ChannelError::parse("attribute value", e.to_string()))?
            .into_owned();
        attributes.push((key, value));
    }
    let id = NodeId(nodes.len());
    nodes.push(ElementData {
        name,
        attributes,
        children: Vec::new(),
    });
    Ok(id)
}

/// Link a freshly-pushed element to its parent, or install it as the root.
fn attach(
    nodes: &mut [ElementData],
    stack: &[NodeId],
    root: &mut Option<NodeId>,
    id: NodeId,
) -> Result<()> {
    match stack.last() {
        Some(&parent) => {
            nodes[parent.0].children.push(XmlContent::Element(id));
        }
        None => {
            if root.is_some() {
                return Err(ChannelError::parse(
                    "channel document",
                    "more than one root element",
                ));
            }
            *root = Some(id);
        }
    }
    Ok(())
}
