//! Fluent construction of readByQuery requests

use crate::api::operations::non_empty;
use crate::error::Result;
use crate::xml::XmlElement;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadByQuery {
    pub object: String,
    pub query: String,
    pub fields: String,
    pub page_size: Option<u32>,
    pub return_format: String,
}

impl ReadByQuery {
    pub fn new(object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            query: String::new(),
            fields: "*".to_string(),
            page_size: None,
            return_format: "xml".to_string(),
        }
    }

    /// Query expression using SQL style operators, e.g. `STATUS = 'active'`
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Comma separated field list
    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = fields.into();
        self
    }

    pub fn select(self, fields: &[&str]) -> Self {
        self.fields(fields.join(","))
    }

    /// Requested page size; the paginator clamps it before sending
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn return_format(mut self, format: impl Into<String>) -> Self {
        self.return_format = format.into();
        self
    }

    pub(crate) fn to_element(&self, page_size: u32) -> Result<XmlElement> {
        let object = non_empty(&self.object, "readByQuery object")?;
        let fields = if self.fields.trim().is_empty() {
            "*"
        } else {
            self.fields.trim()
        };

        Ok(XmlElement::new("readByQuery")
            .child(XmlElement::with_text("object", object))
            .child(XmlElement::with_text("fields", fields))
            .child(XmlElement::with_text("query", self.query.as_str()))
            .child(XmlElement::with_text("returnFormat", self.return_format.as_str()))
            .child(XmlElement::with_text("pagesize", page_size.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = ReadByQuery::new("USERINFO");
        assert_eq!(query.fields, "*");
        assert_eq!(query.return_format, "xml");
        assert_eq!(query.page_size, None);
    }

    #[test]
    fn test_element_layout() {
        let xml = ReadByQuery::new("USERINFO")
            .select(&["LOGINID", "STATUS"])
            .query("STATUS = 'active'")
            .to_element(250)
            .unwrap();

        assert_eq!(xml.find_text("object"), Some("USERINFO"));
        assert_eq!(xml.find_text("fields"), Some("LOGINID,STATUS"));
        assert_eq!(xml.find_text("query"), Some("STATUS = 'active'"));
        assert_eq!(xml.find_text("pagesize"), Some("250"));
        let order: Vec<_> = xml.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(order, vec!["object", "fields", "query", "returnFormat", "pagesize"]);
    }

    #[test]
    fn test_empty_object_rejected() {
        assert!(ReadByQuery::new("  ").to_element(10).is_err());
    }
}
