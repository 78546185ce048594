//! Request envelope construction
//!
//! Every call sent to the gateway is wrapped in the same outer structure:
//! a control block carrying the sender credentials, an authentication block
//! carrying either the user login or an established session id, and a single
//! `function` element holding the operation payload.

use super::constants::{DEFAULT_CONTROL_ID, DEFAULT_DTD_VERSION, DTD_VERSIONS};
use crate::error::{Error, Result};
use crate::xml::XmlElement;
use std::fmt;
use std::str::FromStr;

/// Sender level credentials, as supplied by configuration
#[derive(Debug, Clone, Default)]
pub struct ControlCredentials {
    pub sender_id: Option<String>,
    pub sender_password: Option<String>,
    pub control_id: Option<String>,
    /// `"true"` or `"false"`
    pub unique_id: Option<String>,
    pub dtd_version: Option<String>,
}

impl ControlCredentials {
    pub fn new(sender_id: impl Into<String>, sender_password: impl Into<String>) -> Self {
        Self {
            sender_id: Some(sender_id.into()),
            sender_password: Some(sender_password.into()),
            ..Default::default()
        }
    }

    pub fn control_id(mut self, control_id: impl Into<String>) -> Self {
        self.control_id = Some(control_id.into());
        self
    }

    pub fn unique_id(mut self, unique_id: bool) -> Self {
        self.unique_id = Some(unique_id.to_string());
        self
    }

    pub fn dtd_version(mut self, version: impl Into<String>) -> Self {
        self.dtd_version = Some(version.into());
        self
    }
}

/// End user login, as supplied by configuration
#[derive(Debug, Clone, Default)]
pub struct LoginCredentials {
    pub company_id: Option<String>,
    pub user_id: Option<String>,
    pub user_password: Option<String>,
}

impl LoginCredentials {
    pub fn new(
        company_id: impl Into<String>,
        user_id: impl Into<String>,
        user_password: impl Into<String>,
    ) -> Self {
        Self {
            company_id: Some(company_id.into()),
            user_id: Some(user_id.into()),
            user_password: Some(user_password.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtdVersion {
    V3_0,
    V2_1,
}

impl DtdVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            DtdVersion::V3_0 => "3.0",
            DtdVersion::V2_1 => "2.1",
        }
    }
}

impl FromStr for DtdVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "3.0" => Ok(DtdVersion::V3_0),
            "2.1" => Ok(DtdVersion::V2_1),
            other => Err(Error::validation(format!(
                "invalid dtdversion '{}', expected one of {:?}",
                other, DTD_VERSIONS
            ))),
        }
    }
}

impl fmt::Display for DtdVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, PartialEq, Eq)]
enum Authentication {
    Login {
        user_id: String,
        company_id: String,
        password: String,
    },
    Session {
        session_id: String,
    },
}

impl fmt::Debug for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Authentication::Login {
                user_id, company_id, ..
            } => f
                .debug_struct("Login")
                .field("user_id", user_id)
                .field("company_id", company_id)
                .finish_non_exhaustive(),
            Authentication::Session { .. } => f.write_str("Session"),
        }
    }
}

/// Validated envelope, reused across calls on one client
#[derive(Clone)]
pub struct RequestEnvelope {
    sender_id: String,
    sender_password: String,
    control_id: String,
    unique_id: bool,
    dtd_version: DtdVersion,
    authentication: Authentication,
}

impl fmt::Debug for RequestEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestEnvelope")
            .field("sender_id", &self.sender_id)
            .field("control_id", &self.control_id)
            .field("unique_id", &self.unique_id)
            .field("dtd_version", &self.dtd_version)
            .field("authentication", &self.authentication)
            .finish_non_exhaustive()
    }
}

fn required(value: &Option<String>, block: &str, field: &str) -> Result<String> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(Error::validation(format!(
            "missing required {} field '{}'",
            block, field
        ))),
    }
}

fn parse_unique_id(value: Option<&str>) -> Result<bool> {
    match value.map(str::trim) {
        None | Some("") => Ok(false),
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(other) => Err(Error::validation(format!(
            "invalid uniqueid '{}', expected true or false",
            other
        ))),
    }
}

impl RequestEnvelope {
    pub fn build(control: &ControlCredentials, login: &LoginCredentials) -> Result<Self> {
        let sender_id = required(&control.sender_id, "control", "senderid")?;
        let sender_password = required(&control.sender_password, "control", "password")?;
        let company_id = required(&login.company_id, "login", "companyid")?;
        let user_id = required(&login.user_id, "login", "userid")?;
        let password = required(&login.user_password, "login", "password")?;

        let dtd_version = control
            .dtd_version
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(DEFAULT_DTD_VERSION)
            .trim()
            .parse::<DtdVersion>()?;
        let unique_id = parse_unique_id(control.unique_id.as_deref())?;
        let control_id = control
            .control_id
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_CONTROL_ID)
            .to_string();

        Ok(Self {
            sender_id,
            sender_password,
            control_id,
            unique_id,
            dtd_version,
            authentication: Authentication::Login {
                user_id,
                company_id,
                password,
            },
        })
    }

    pub fn control_id(&self) -> &str {
        &self.control_id
    }

    pub fn dtd_version(&self) -> DtdVersion {
        self.dtd_version
    }

    pub fn has_session(&self) -> bool {
        matches!(self.authentication, Authentication::Session { .. })
    }

    /// Replace the login block with a session id for the rest of this envelope's life
    pub(crate) fn activate_session(&mut self, session_id: String) {
        self.authentication = Authentication::Session { session_id };
    }

    fn control_element(&self) -> XmlElement {
        XmlElement::new("control")
            .child(XmlElement::with_text("senderid", &self.sender_id))
            .child(XmlElement::with_text("password", &self.sender_password))
            .child(XmlElement::with_text("controlid", &self.control_id))
            .child(XmlElement::with_text("uniqueid", self.unique_id.to_string()))
            .child(XmlElement::with_text("dtdversion", self.dtd_version.as_str()))
    }

    fn authentication_element(&self) -> XmlElement {
        let auth = XmlElement::new("authentication");
        match &self.authentication {
            Authentication::Login {
                user_id,
                company_id,
                password,
            } => auth.child(
                XmlElement::new("login")
                    .child(XmlElement::with_text("userid", user_id))
                    .child(XmlElement::with_text("companyid", company_id))
                    .child(XmlElement::with_text("password", password)),
            ),
            Authentication::Session { session_id } => {
                auth.child(XmlElement::with_text("sessionid", session_id))
            }
        }
    }

    /// Full request tree around one operation payload
    pub fn to_element(&self, payload: XmlElement) -> XmlElement {
        let function = XmlElement::new("function")
            .attr("controlid", &self.control_id)
            .child(payload);

        XmlElement::new("request").child(self.control_element()).child(
            XmlElement::new("operation")
                .child(self.authentication_element())
                .child(XmlElement::new("content").child(function)),
        )
    }

    pub fn with_operation(&self, payload: XmlElement) -> Result<Vec<u8>> {
        self.to_element(payload).to_bytes()
    }
}
