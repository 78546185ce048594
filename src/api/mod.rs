//! Intacct XML gateway protocol
//!
//! Request envelopes, session switching, operation payloads, response
//! checking and paginated queries, behind a pluggable [`Transport`].

pub mod client;
pub mod constants;
pub mod operations;
pub mod query;
pub mod request;
pub mod response;
pub mod session;
pub mod transport;

pub use client::IntacctClient;
pub use operations::{InspectTarget, Operation};
pub use query::{Page, PageCursor, PageSource, Paginator, QueryResult, ReadByQuery};
pub use request::{ControlCredentials, DtdVersion, LoginCredentials, RequestEnvelope};
pub use response::ApiResponse;
pub use session::{SessionManager, SessionState};
pub use transport::{HttpTransport, Transport, TransportResponse};
