// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Channel document tree model.
//!
//! An exported channel is an XML document. This module provides an in-memory
//! tree representation owned by a single transform invocation:
//! parse, mutate field values, serialize, discard.
//!
//! The tree is an arena of elements addressed by [`NodeId`] handles. Nodes
//! carry their element name, ordered attributes, and ordered mixed content
//! (child elements and text runs). There are no parent back-references;
//! all navigation is downward via structural path queries.
//!
//! # Example
//!
//! ```
//! use channelforge::document::ChannelDocument;
//!
//! let doc = ChannelDocument::parse_str("<channel><name>demo</name></channel>").unwrap();
//! let name = doc.select("channel/name");
//! assert_eq!(doc.text(name[0]), "demo");
//! ```

mod parse;
mod serialize;

use crate::core::{ChannelError, Result};

/// Handle to one element in a [`ChannelDocument`] arena.
///
/// Handles are plain indices: cheap to copy, valid for the lifetime of the
/// document that produced them, and meaningless across documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// One unit of mixed content inside an element.
#[derive(Debug, Clone)]
pub(crate) enum XmlContent {
    /// A child element, by arena handle
    Element(NodeId),
    /// A run of character data (stored unescaped)
    Text(String),
}

/// Arena slot for one element.
#[derive(Debug, Clone)]
pub(crate) struct ElementData {
    /// Element name
    pub(crate) name: String,
    /// Attributes in document order
    pub(crate) attributes: Vec<(String, String)>,
    /// Mixed content in document order
    pub(crate) children: Vec<XmlContent>,
}

/// An in-memory parsed channel export.
///
/// Owned exclusively by one transform invocation for its lifetime. Comments,
/// processing instructions, and DOCTYPE declarations are not preserved; the
/// XML declaration is carried through verbatim when present.
#[derive(Debug, Clone)]
pub struct ChannelDocument {
    pub(crate) nodes: Vec<ElementData>,
    pub(crate) root: NodeId,
    pub(crate) decl: Option<quick_xml::events::BytesDecl<'static>>,
}

impl ChannelDocument {
    /// Handle of the document's root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Element name of a node.
    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.0].name
    }

    /// Look up an attribute value on a node.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.0]
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Concatenated text content of a node.
    ///
    /// Text runs are joined in document order; child element content is not
    /// included. Returns an empty string for an element with no text.
    pub fn text(&self, id: NodeId) -> String {
        let mut out = String::new();
        for content in &self.nodes[id.0].children {
            if let XmlContent::Text(t) = content {
                out.push_str(t);
            }
        }
        out
    }

    /// Replace the text content of a node.
    ///
    /// All existing text runs are removed and a single run holding `value` is
    /// placed before any child elements.
    pub fn set_text(&mut self, id: NodeId, value: impl Into<String>) {
        let children = &mut self.nodes[id.0].children;
        children.retain(|c| matches!(c, XmlContent::Element(_)));
        children.insert(0, XmlContent::Text(value.into()));
    }

    /// Child elements of a node, in document order.
    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes[id.0]
            .children
            .iter()
            .filter_map(|c| match c {
                XmlContent::Element(child) => Some(*child),
                XmlContent::Text(_) => None,
            })
            .collect()
    }

    /// Select nodes by absolute structural path.
    ///
    /// The first path segment must match the root element name; each further
    /// segment steps down one generation of child elements. Returns every
    /// match in document order, possibly empty.
    pub fn select(&self, path: &str) -> Vec<NodeId> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let first = match segments.next() {
            Some(s) => s,
            None => return Vec::new(),
        };
        if self.name(self.root) != first {
            return Vec::new();
        }
        let mut current = vec![self.root];
        for segment in segments {
            current = self.step(&current, segment);
            if current.is_empty() {
                break;
            }
        }
        current
    }

    /// Select exactly one node by absolute structural path.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Structural`] when the path resolves to zero or
    /// more than one node.
    pub fn select_one(&self, path: &str) -> Result<NodeId> {
        let matches = self.select(path);
        if matches.len() != 1 {
            return Err(ChannelError::structural(path, matches.len()));
        }
        Ok(matches[0])
    }

    /// Select descendant nodes by a path relative to `from`.
    ///
    /// Each segment steps down one generation of child elements, starting at
    /// the children of `from`.
    pub fn find_all(&self, from: NodeId, path: &str) -> Vec<NodeId> {
        let mut current = vec![from];
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = self.step(&current, segment);
            if current.is_empty() {
                break;
            }
        }
        current
    }

    /// One path step: all children of `nodes` named `segment`.
    fn step(&self, nodes: &[NodeId], segment: &str) -> Vec<NodeId> {
        let mut next = Vec::new();
        for &node in nodes {
            for child in self.child_elements(node) {
                if self.name(child) == segment {
                    next.push(child);
                }
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ChannelDocument {
        ChannelDocument::parse_str(
            "<channel>\
               <name>demo</name>\
               <sourceConnector>\
                 <properties>\
                   <property name=\"DataType\">File Reader</property>\
                   <property name=\"host\">/old/in</property>\
                 </properties>\
               </sourceConnector>\
               <destinationConnectors>\
                 <connector><properties/></connector>\
                 <connector><properties/></connector>\
               </destinationConnectors>\
             </channel>",
        )
        .unwrap()
    }

    #[test]
    fn test_root_name() {
        let doc = sample();
        assert_eq!(doc.name(doc.root()), "channel");
    }

    #[test]
    fn test_select_single() {
        let doc = sample();
        let names = doc.select("channel/name");
        assert_eq!(names.len(), 1);
        assert_eq!(doc.text(names[0]), "demo");
    }

    #[test]
    fn test_select_multiple() {
        let doc = sample();
        let props = doc.select("channel/destinationConnectors/connector/properties");
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn test_select_no_match() {
        let doc = sample();
        assert!(doc.select("channel/nonexistent").is_empty());
        assert!(doc.select("wrongRoot/name").is_empty());
    }

    #[test]
    fn test_select_one_ok() {
        let doc = sample();
        let props = doc.select_one("channel/sourceConnector/properties").unwrap();
        assert_eq!(doc.name(props), "properties");
    }

    #[test]
    fn test_select_one_zero_matches() {
        let doc = sample();
        let err = doc.select_one("channel/missing").unwrap_err();
        match err {
            ChannelError::Structural { path, found } => {
                assert_eq!(path, "channel/missing");
                assert_eq!(found, 0);
            }
            other => panic!("expected Structural error, got {other:?}"),
        }
    }

    #[test]
    fn test_select_one_multiple_matches() {
        let doc = sample();
        let err = doc
            .select_one("channel/destinationConnectors/connector")
            .unwrap_err();
        assert!(matches!(err, ChannelError::Structural { found: 2, .. }));
    }

    #[test]
    fn test_find_all_relative() {
        let doc = sample();
        let source = doc.select_one("channel/sourceConnector").unwrap();
        let props = doc.find_all(source, "properties/property");
        assert_eq!(props.len(), 2);
        assert_eq!(doc.attribute(props[0], "name"), Some("DataType"));
    }

    #[test]
    fn test_attribute_missing() {
        let doc = sample();
        let name = doc.select_one("channel/name").unwrap();
        assert_eq!(doc.attribute(name, "name"), None);
    }

    #[test]
    fn test_set_text_replaces() {
        let mut doc = sample();
        let name = doc.select_one("channel/name").unwrap();
        doc.set_text(name, "renamed");
        assert_eq!(doc.text(name), "renamed");
    }

    #[test]
    fn test_set_text_keeps_child_elements() {
        let mut doc = ChannelDocument::parse_str("<a>before<b/>after</a>").unwrap();
        let root = doc.root();
        doc.set_text(root, "only");
        assert_eq!(doc.text(root), "only");
        assert_eq!(doc.child_elements(root).len(), 1);
    }

    #[test]
    fn test_text_empty_element() {
        let doc = sample();
        let props = doc
            .select("channel/destinationConnectors/connector/properties")
            .remove(0);
        assert_eq!(doc.text(props), "");
    }
}
