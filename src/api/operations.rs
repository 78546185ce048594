//! Operation payloads carried inside the request `function` element

use super::query::ReadByQuery;
use crate::error::{Error, Result};
use crate::record::RecordInstance;
use crate::xml::XmlElement;

/// What an inspect call targets: an integration object name or a record name.
/// Either may be `"*"` to list every object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectTarget {
    Object(String),
    Name(String),
}

impl InspectTarget {
    /// Exactly one of `object` and `name` must be given
    pub fn from_args(object: Option<&str>, name: Option<&str>) -> Result<Self> {
        match (object, name) {
            (Some(_), Some(_)) => Err(Error::validation(
                "inspect accepts either an object or a name, not both",
            )),
            (None, None) => Err(Error::validation("inspect requires an object or a name")),
            (Some(object), None) => Ok(InspectTarget::Object(object.to_string())),
            (None, Some(name)) => Ok(InspectTarget::Name(name.to_string())),
        }
    }

    fn element(&self) -> Result<XmlElement> {
        let (tag, value) = match self {
            InspectTarget::Object(v) => ("object", v),
            InspectTarget::Name(v) => ("name", v),
        };
        if value.trim().is_empty() {
            return Err(Error::validation(format!("inspect {} must not be empty", tag)));
        }
        Ok(XmlElement::with_text(tag, value.as_str()))
    }
}

#[derive(Debug, Clone)]
pub enum Operation {
    GetApiSession,
    Create(Vec<RecordInstance>),
    Update(Vec<RecordInstance>),
    Delete { object: String, keys: Vec<String> },
    Inspect { target: InspectTarget, detail: bool },
    ReadByQuery { query: ReadByQuery, page_size: u32 },
    ReadMore { object: String },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::GetApiSession => "getAPISession",
            Operation::Create(_) => "create",
            Operation::Update(_) => "update",
            Operation::Delete { .. } => "delete",
            Operation::Inspect { .. } => "inspect",
            Operation::ReadByQuery { .. } => "readByQuery",
            Operation::ReadMore { .. } => "readMore",
        }
    }

    /// Build the payload element, validating arguments first
    pub fn to_element(&self) -> Result<XmlElement> {
        let mut element = XmlElement::new(self.name());
        match self {
            Operation::GetApiSession => {}
            Operation::Create(records) | Operation::Update(records) => {
                if records.is_empty() {
                    return Err(Error::validation(format!(
                        "{} requires at least one record",
                        self.name()
                    )));
                }
                for record in records {
                    element.push(record.to_wire_format());
                }
            }
            Operation::Delete { object, keys } => {
                let object = non_empty(object, "delete object")?;
                let keys: Vec<&str> = keys
                    .iter()
                    .map(|k| k.trim())
                    .filter(|k| !k.is_empty())
                    .collect();
                if keys.is_empty() {
                    return Err(Error::validation("delete requires at least one key"));
                }
                element.push(XmlElement::with_text("object", object));
                element.push(XmlElement::with_text("keys", keys.join(",")));
            }
            Operation::Inspect { target, detail } => {
                if *detail {
                    element = element.attr("detail", "1");
                }
                element.push(target.element()?);
            }
            Operation::ReadByQuery { query, page_size } => {
                element = query.to_element(*page_size)?;
            }
            Operation::ReadMore { object } => {
                element.push(XmlElement::with_text(
                    "object",
                    non_empty(object, "readMore object")?,
                ));
            }
        }
        Ok(element)
    }
}

pub(crate) fn non_empty<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::validation(format!("{} must not be empty", what)))
    } else {
        Ok(trimmed)
    }
}
