//! Owned XML element tree
//!
//! Requests are assembled as `XmlElement` trees and written with quick-xml;
//! responses are parsed with roxmltree and copied into the same owned form so
//! they can outlive the response body they were read from.

use crate::error::{Error, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Leaf element holding a text value
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn first_child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Walk a slash separated path of child names, e.g. `operation/result/data`
    pub fn find(&self, path: &str) -> Option<&XmlElement> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |node, segment| node.first_child(segment))
    }

    /// All elements matching a slash separated path, in document order
    pub fn find_all(&self, path: &str) -> Vec<&XmlElement> {
        let mut current = vec![self];
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = current
                .into_iter()
                .flat_map(|node| node.children.iter().filter(move |c| c.name == segment))
                .collect();
        }
        current
    }

    pub fn find_text(&self, path: &str) -> Option<&str> {
        self.find(path).and_then(|e| e.text())
    }

    pub fn parse(xml: &str) -> std::result::Result<Self, roxmltree::Error> {
        let doc = roxmltree::Document::parse(xml)?;
        Ok(Self::from_node(doc.root_element()))
    }

    pub fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let attributes = node
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect();

        let mut text = String::new();
        let mut children = Vec::new();
        for child in node.children() {
            if child.is_element() {
                children.push(Self::from_node(child));
            } else if child.is_text() {
                if let Some(t) = child.text() {
                    text.push_str(t);
                }
            }
        }

        // Whitespace between child elements is formatting, not content
        let formatting = !children.is_empty() && text.trim().is_empty();
        Self {
            name: node.tag_name().name().to_string(),
            attributes,
            text: if text.is_empty() || formatting {
                None
            } else {
                Some(text)
            },
            children,
        }
    }

    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.text.is_none() && self.children.is_empty() {
            writer.write_event(Event::Empty(start)).map_err(encode_err)?;
            return Ok(());
        }

        writer.write_event(Event::Start(start)).map_err(encode_err)?;
        if let Some(text) = &self.text {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(encode_err)?;
        }
        for child in &self.children {
            child.write_to(writer)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(encode_err)?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        self.write_to(&mut writer)?;
        Ok(writer.into_inner())
    }

    pub fn to_xml_string(&self) -> Result<String> {
        String::from_utf8(self.to_bytes()?).map_err(|e| Error::Encode(e.to_string()))
    }

    pub fn to_pretty_string(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        self.write_to(&mut writer)?;
        String::from_utf8(writer.into_inner()).map_err(|e| Error::Encode(e.to_string()))
    }
}

fn encode_err(err: impl std::fmt::Display) -> Error {
    Error::Encode(err.to_string())
}
