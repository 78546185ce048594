//! readByQuery support
//!
//! `ReadByQuery` describes a query, `Paginator` drives it to completion by
//! following the server side cursor with `readMore` calls, and `QueryResult`
//! holds the merged records.

pub mod builder;
pub mod paginator;
pub mod result;

pub use builder::ReadByQuery;
pub use paginator::{PageCursor, PageSource, Paginator};
pub use result::{Page, QueryResult};
