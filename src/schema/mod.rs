//! Schema-driven record metadata
//!
//! `MetadataCache` persists raw inspect output per record type,
//! `SchemaRegistry` turns it into `TypeSchema` trees that record shapes are
//! built from.

pub mod cache;
pub mod model;
pub mod registry;

pub use cache::{MetadataCache, MetadataSource, RawField, RawObjectMetadata};
pub use model::{FieldSchema, GroupSchema, SchemaNode, TypeSchema};
pub use registry::SchemaRegistry;
