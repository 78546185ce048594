//! Multi-page query aggregation
//!
//! The gateway keeps the query cursor server side, keyed to the session and
//! scoped only by object name. Only one paginated query per object type may be
//! in flight on a session at a time; a second query against the same object
//! would share the cursor.

use super::builder::ReadByQuery;
use super::result::{Page, QueryResult};
use crate::api::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::error::Result;
use async_trait::async_trait;
use log::debug;

/// Issues the two calls a paginated query needs
#[async_trait]
pub trait PageSource: Send {
    async fn first_page(&mut self, query: &ReadByQuery, page_size: u32) -> Result<Page>;
    async fn next_page(&mut self, object: &str) -> Result<Page>;
}

/// Cursor state for a query with records still on the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    pub object: String,
    pub remaining: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    default_page_size: u32,
    max_page_size: u32,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)
    }
}

impl Paginator {
    pub fn new(default_page_size: u32, max_page_size: u32) -> Self {
        Self {
            default_page_size,
            max_page_size,
        }
    }

    /// Requested size if within the maximum, otherwise the default
    pub fn clamp(&self, requested: Option<u32>) -> u32 {
        match requested {
            Some(size) if size > 0 && size <= self.max_page_size => size,
            _ => self.default_page_size,
        }
    }

    /// Run a query and drain every remaining page.
    ///
    /// A failure on any page aborts the whole query; records gathered so far
    /// are dropped.
    pub async fn query<S>(&self, source: &mut S, query: &ReadByQuery) -> Result<QueryResult>
    where
        S: PageSource + ?Sized,
    {
        let page_size = self.clamp(query.page_size);
        let mut result = QueryResult::new(query.object.clone());

        let first = source.first_page(query, page_size).await?;
        let mut cursor = (first.num_remaining > 0).then(|| PageCursor {
            object: query.object.clone(),
            remaining: first.num_remaining,
        });
        result.append(first);

        while let Some(current) = cursor.take() {
            debug!(
                "{} records of {} remaining, reading more",
                current.remaining, current.object
            );
            let page = source.next_page(&current.object).await?;
            let remaining = page.num_remaining;
            result.append(page);
            if remaining > 0 {
                cursor = Some(PageCursor {
                    remaining,
                    ..current
                });
            }
        }

        debug!(
            "Query on {} returned {} records in {} pages",
            result.object,
            result.len(),
            result.pages
        );
        Ok(result)
    }
}
