use super::constants::paths;
use super::request::RequestEnvelope;
use crate::error::{Error, Result};
use crate::xml::XmlElement;
use log::info;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    /// Terminal; there is no transition back to login credentials.
    SessionActive { endpoint: String },
}

/// Tracks which credentials authenticate calls and which URL they target
#[derive(Debug, Clone)]
pub struct SessionManager {
    state: SessionState,
    default_url: String,
}

impl SessionManager {
    pub fn new(default_url: impl Into<String>) -> Self {
        Self {
            state: SessionState::Unauthenticated,
            default_url: default_url.into(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::SessionActive { .. })
    }

    pub fn base_url(&self) -> &str {
        match &self.state {
            SessionState::Unauthenticated => &self.default_url,
            SessionState::SessionActive { endpoint } => endpoint,
        }
    }

    /// Apply a getAPISession response.
    ///
    /// Both the session id and endpoint must be present and non-empty, otherwise
    /// neither the envelope nor this manager is touched and the raw body is
    /// reported back.
    pub fn establish(
        &mut self,
        envelope: &mut RequestEnvelope,
        response: &XmlElement,
        raw_body: &str,
    ) -> Result<()> {
        let session_id = non_empty(response.find_text(paths::SESSION_ID));
        let endpoint = non_empty(response.find_text(paths::SESSION_ENDPOINT));

        let (Some(session_id), Some(endpoint)) = (session_id, endpoint) else {
            return Err(Error::Authentication {
                body: raw_body.to_string(),
            });
        };

        envelope.activate_session(session_id.to_string());
        info!("API session established, endpoint {}", endpoint);
        self.state = SessionState::SessionActive {
            endpoint: endpoint.to_string(),
        };
        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
