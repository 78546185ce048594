pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod record;
pub mod schema;
pub mod xml;

pub use api::{InspectTarget, IntacctClient, ReadByQuery};
pub use error::{Error, ErrorKind, Result};
pub use record::{RecordInstance, RecordShape, Scalar, Value};
pub use schema::{MetadataCache, SchemaRegistry};
