//! Typed, schema-constrained records
//!
//! A [`RecordShape`] is derived once per type from its parsed schema and fixes
//! which attribute names a [`RecordInstance`] accepts.

mod instance;
mod shape;
mod wire;

pub use instance::{RecordInstance, Scalar, Value};
pub use shape::{RecordShape, Slot};
