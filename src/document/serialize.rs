// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Stable serialization of the arena tree back to XML.
//!
//! Output is deterministic and non-pretty: no indentation is added or
//! removed, attributes keep document order, and text runs are emitted
//! exactly as stored (with `&`, `<`, `>` re-escaped). Transforming a
//! document without editing any field serializes to an equivalent tree,
//! so target files stay diffable across runs.

use std::io::Write;
use std::path::Path;

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{ChannelDocument, NodeId, XmlContent};
use crate::core::{ChannelError, Result};

impl ChannelDocument {
    /// Serialize the document to a string.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        if let Some(decl) = &self.decl {
            writer
                .write_event(Event::Decl(decl.clone()))
                .map_err(|e| ChannelError::parse("serializer", e.to_string()))?;
        }
        self.write_element(&mut writer, self.root)?;
        String::from_utf8(writer.into_inner())
            .map_err(|e| ChannelError::parse("serializer", e.to_string()))
    }

    /// Serialize the document to a file, overwriting any existing content.
    ///
    /// The output handle is scoped to this call and closed on all exit paths.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let xml = self.to_xml()?;
        let mut file = std::fs::File::create(path.as_ref())?;
        file.write_all(xml.as_bytes())?;
        Ok(())
    }

    fn write_element(&self, writer: &mut Writer<Vec<u8>>, id: NodeId) -> Result<()> {
        let element = &self.nodes[id.0];
        let mut start = BytesStart::new(element.name.as_str());
        for (key, value) in &element.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if element.children.is_empty() {
            writer
                .write_event(Event::Empty(start))
                .map_err(|e| ChannelError::parse("serializer", e.to_string()))?;
            return Ok(());
        }

        writer
            .write_event(Event::Start(start))
            .map_err(|e| ChannelError::parse("serializer", e.to_string()))?;
        for content in &element.children {
            match content {
                XmlContent::Element(child) => self.write_element(writer, *child)?,
                XmlContent::Text(text) => {
                    // Script bodies are full of quotes; only &, < and > need
                    // escaping in character data.
                    let escaped = partial_escape(text.as_str());
                    writer
                        .write_event(Event::Text(BytesText::from_escaped(escaped)))
                        .map_err(|e| ChannelError::parse("serializer", e.to_string()))?;
                }
            }
        }
        writer
            .write_event(Event::End(BytesEnd::new(element.name.as_str())))
            .map_err(|e| ChannelError::parse("serializer", e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_simple() {
        let src = "<channel><name>demo</name></channel>";
        let doc = ChannelDocument::parse_str(src).unwrap();
        assert_eq!(doc.to_xml().unwrap(), src);
    }

    #[test]
    fn test_round_trip_attributes() {
        let src = "<property name=\"host\" version=\"1\">/var/in</property>";
        let doc = ChannelDocument::parse_str(src).unwrap();
        assert_eq!(doc.to_xml().unwrap(), src);
    }

    #[test]
    fn test_round_trip_whitespace() {
        let src = "<channel>\n  <name>demo</name>\n</channel>";
        let doc = ChannelDocument::parse_str(src).unwrap();
        assert_eq!(doc.to_xml().unwrap(), src);
    }

    #[test]
    fn test_empty_element_collapsed() {
        let doc = ChannelDocument::parse_str("<properties></properties>").unwrap();
        assert_eq!(doc.to_xml().unwrap(), "<properties/>");
    }

    #[test]
    fn test_escapes_markup_in_text() {
        let doc = ChannelDocument::parse_str("<script>a &lt; b &amp;&amp; c</script>").unwrap();
        assert_eq!(
            doc.to_xml().unwrap(),
            "<script>a &lt; b &amp;&amp; c</script>"
        );
    }

    #[test]
    fn test_quotes_in_text_not_escaped() {
        let mut doc = ChannelDocument::parse_str("<script/>").unwrap();
        let root = doc.root();
        doc.set_text(root, "var url = 'jdbc:mysql://localhost/db';");
        assert_eq!(
            doc.to_xml().unwrap(),
            "<script>var url = 'jdbc:mysql://localhost/db';</script>"
        );
    }

    #[test]
    fn test_declaration_preserved() {
        let src = "<?xml version=\"1.0\" encoding=\"UTF-8\"?><channel/>";
        let doc = ChannelDocument::parse_str(src).unwrap();
        assert_eq!(doc.to_xml().unwrap(), src);
    }

    #[test]
    fn test_serialize_stable_across_runs() {
        let src = "<channel><a x=\"1\"/><b>t</b></channel>";
        let doc = ChannelDocument::parse_str(src).unwrap();
        let first = doc.to_xml().unwrap();
        let second = doc.to_xml().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_write_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("channelforge_ser_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.xml");

        let doc = ChannelDocument::parse_str("<channel><name>demo</name></channel>").unwrap();
        doc.write_file(&path).unwrap();

        let reparsed = ChannelDocument::parse_file(&path).unwrap();
        assert_eq!(reparsed.to_xml().unwrap(), doc.to_xml().unwrap());
        std::fs::remove_dir_all(&dir).ok();
    }
}
