//! Request-body form of a record
//!
//! Only fields holding a non-empty value are written. A nested group becomes
//! an element named after the group and is left out when nothing below it
//! is set.

use super::instance::{EntryRef, RecordInstance};
use crate::error::Result;
use crate::xml::XmlElement;

impl RecordInstance {
    pub fn to_wire_format(&self) -> XmlElement {
        let mut element = XmlElement::new(self.type_name());
        for (name, entry) in self.entries() {
            match entry {
                EntryRef::Field(Some(value)) if !value.is_empty() => {
                    element.push(XmlElement::with_text(name, value.render()));
                }
                EntryRef::Field(_) => {}
                EntryRef::Group(group) if !group.is_empty() => {
                    element.push(group.to_wire_format());
                }
                EntryRef::Group(_) => {}
            }
        }
        element
    }

    pub fn to_xml_string(&self) -> Result<String> {
        self.to_wire_format().to_xml_string()
    }
}
