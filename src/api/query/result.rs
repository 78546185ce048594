//! Query result handling
//!
//! Handles readByQuery/readMore responses from the gateway

use crate::api::response::ApiResponse;
use crate::error::{Error, Result};
use crate::xml::XmlElement;

/// One batch of records as returned by a single call
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub records: Vec<XmlElement>,
    pub num_remaining: u64,
}

impl Page {
    /// Read the `data` element of a query response
    pub fn from_response(response: &ApiResponse) -> Result<Self> {
        let data = response.require_data()?;
        let raw_remaining = data.attribute("numremaining").ok_or_else(|| {
            Error::malformed(response.status, "data element has no numremaining attribute", &response.raw)
        })?;
        let num_remaining = raw_remaining.trim().parse::<u64>().map_err(|_| {
            Error::malformed(
                response.status,
                format!("invalid numremaining '{}'", raw_remaining),
                &response.raw,
            )
        })?;

        Ok(Self {
            records: data.children.clone(),
            num_remaining,
        })
    }
}

/// All records of a query, merged across pages in response order
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub object: String,
    pub records: Vec<XmlElement>,
    pub pages: usize,
}

impl QueryResult {
    pub fn new(object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            records: Vec::new(),
            pages: 0,
        }
    }

    /// Append a page; no reordering or deduplication
    pub fn append(&mut self, page: Page) {
        self.records.extend(page.records);
        self.pages += 1;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&XmlElement> {
        self.records.first()
    }

    pub fn into_records(self) -> Vec<XmlElement> {
        self.records
    }

    /// Value of one field across all records
    pub fn field_values(&self, field: &str) -> Vec<Option<&str>> {
        self.records.iter().map(|r| r.find_text(field)).collect()
    }

    /// Records whose field equals the given value
    pub fn find_by_field(&self, field: &str, value: &str) -> Vec<&XmlElement> {
        self.records
            .iter()
            .filter(|r| r.find_text(field) == Some(value))
            .collect()
    }

    /// Merged result as a single `data` element
    pub fn to_element(&self) -> XmlElement {
        let mut data = XmlElement::new("data")
            .attr("listtype", self.object.as_str())
            .attr("count", self.records.len().to_string())
            .attr("numremaining", "0");
        data.children = self.records.clone();
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, status: &str) -> XmlElement {
        XmlElement::new("USERINFO")
            .child(XmlElement::with_text("RECORDNO", id))
            .child(XmlElement::with_text("STATUS", status))
    }

    fn response(body: &str) -> ApiResponse {
        ApiResponse::parse(200, body.to_string()).unwrap()
    }

    #[test]
    fn test_page_from_response() {
        let page = Page::from_response(&response(
            "<response><operation><result><status>success</status>\
             <data numremaining=\"42\"><USERINFO/><USERINFO/></data></result></operation></response>",
        ))
        .unwrap();

        assert_eq!(page.num_remaining, 42);
        assert_eq!(page.records.len(), 2);
    }

    #[test]
    fn test_page_requires_numremaining() {
        let err = Page::from_response(&response(
            "<response><operation><result><status>success</status>\
             <data><USERINFO/></data></result></operation></response>",
        ))
        .unwrap_err();
        assert!(err.to_string().contains("numremaining"));
    }

    #[test]
    fn test_append_keeps_order() {
        let mut result = QueryResult::new("USERINFO");
        result.append(Page {
            records: vec![record("1", "active"), record("2", "inactive")],
            num_remaining: 1,
        });
        result.append(Page {
            records: vec![record("3", "active")],
            num_remaining: 0,
        });

        assert_eq!(result.pages, 2);
        assert_eq!(result.field_values("RECORDNO"), vec![Some("1"), Some("2"), Some("3")]);
        assert_eq!(result.find_by_field("STATUS", "active").len(), 2);
        assert_eq!(result.to_element().attribute("count"), Some("3"));
    }
}
