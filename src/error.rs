use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Authentication,
    Transport,
    RemoteOperation,
    SchemaLookup,
    Cache,
    Encode,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Authentication => "authentication",
            ErrorKind::Transport => "transport",
            ErrorKind::RemoteOperation => "remote_operation",
            ErrorKind::SchemaLookup => "schema_lookup",
            ErrorKind::Cache => "cache",
            ErrorKind::Encode => "encode",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// Bad input detected before any network call.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid attribute '{field}' for objects of type '{record_type}'")]
    UnknownField { record_type: String, field: String },

    /// The raw response body is kept for diagnosis.
    #[error("call to getAPISession failed:\n{body}")]
    Authentication { body: String },

    #[error("transport failure{}: {message}", status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Transport {
        status: Option<u16>,
        message: String,
        body: String,
    },

    #[error("remote operation failed with status '{status}': {payload}")]
    RemoteOperation { status: String, payload: String },

    #[error("object type '{0}' not found in metadata cache")]
    SchemaLookup(String),

    #[error("metadata cache I/O error at {path:?}: {source}")]
    CacheIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("metadata cache at {path:?} is not readable: {source}")]
    CacheFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) | Error::UnknownField { .. } => ErrorKind::Validation,
            Error::Authentication { .. } => ErrorKind::Authentication,
            Error::Transport { .. } => ErrorKind::Transport,
            Error::RemoteOperation { .. } => ErrorKind::RemoteOperation,
            Error::SchemaLookup(_) => ErrorKind::SchemaLookup,
            Error::CacheIo { .. } | Error::CacheFormat { .. } => ErrorKind::Cache,
            Error::Encode(_) => ErrorKind::Encode,
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub(crate) fn malformed(status: u16, message: impl Into<String>, body: &str) -> Self {
        Error::Transport {
            status: Some(status),
            message: message.into(),
            body: body.to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
            body: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_field_is_a_validation_error() {
        let err = Error::UnknownField {
            record_type: "USERINFO".to_string(),
            field: "NICKNAME".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("NICKNAME"));
        assert!(err.to_string().contains("USERINFO"));
    }

    #[test]
    fn transport_message_includes_status_when_known() {
        let err = Error::malformed(502, "bad gateway", "<html/>");
        assert_eq!(err.to_string(), "transport failure (HTTP 502): bad gateway");

        let err = Error::Transport {
            status: None,
            message: "connection reset".to_string(),
            body: String::new(),
        };
        assert_eq!(err.to_string(), "transport failure: connection reset");
    }
}
