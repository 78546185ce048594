//! Gateway response handling

use super::constants::{STATUS_SUCCESS, paths};
use crate::error::{Error, Result};
use crate::xml::XmlElement;
use log::debug;

/// A parsed, successful gateway response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub root: XmlElement,
    pub raw: String,
}

impl ApiResponse {
    /// Parse a raw HTTP response, rejecting transport and remote failures
    pub fn parse(status: u16, body: String) -> Result<Self> {
        if !(200..300).contains(&status) {
            return Err(Error::Transport {
                status: Some(status),
                message: "non-success HTTP status".to_string(),
                body,
            });
        }

        let root = XmlElement::parse(&body).map_err(|e| {
            Error::malformed(status, format!("malformed response body: {}", e), &body)
        })?;

        if let Some(control_status) = root.find_text(paths::CONTROL_STATUS).map(str::trim) {
            if control_status != STATUS_SUCCESS {
                return Err(remote_failure(control_status, &root, &root));
            }
        }

        match root.find(paths::RESULT) {
            Some(result) => {
                let result_status = result.find_text("status").unwrap_or_default().trim();
                if result_status != STATUS_SUCCESS {
                    return Err(remote_failure(result_status, result, &root));
                }
            }
            None => {
                if let Some(operation) = root.first_child("operation") {
                    if operation.first_child("errormessage").is_some() {
                        return Err(remote_failure("failure", operation, &root));
                    }
                }
            }
        }

        debug!("Gateway response parsed ({} bytes)", body.len());
        Ok(Self { status, root, raw: body })
    }

    pub fn result(&self) -> Option<&XmlElement> {
        self.root.find(paths::RESULT)
    }

    pub fn data(&self) -> Option<&XmlElement> {
        self.root.find(paths::RESULT_DATA)
    }

    /// The `data` element, required for read style operations
    pub fn require_data(&self) -> Result<&XmlElement> {
        self.data().ok_or_else(|| {
            Error::malformed(self.status, "response has no operation/result/data element", &self.raw)
        })
    }
}

/// Build a remote failure from the closest errormessage, or the scope itself
fn remote_failure(status: &str, scope: &XmlElement, root: &XmlElement) -> Error {
    let error_node = scope
        .first_child("errormessage")
        .or_else(|| root.first_child("errormessage"))
        .unwrap_or(scope);

    let payload = error_node
        .to_xml_string()
        .unwrap_or_else(|_| format!("{:?}", error_node));

    Error::RemoteOperation {
        status: if status.is_empty() { "unknown" } else { status }.to_string(),
        payload,
    }
}
