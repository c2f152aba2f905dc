use std::future::Future;

use crate::utils::CCStr;

use super::PageQuery;

/// Failures a table view can run into.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// Transport, connectivity or HTTP status failure
    #[error("network error: {0}")]
    Network(CCStr),
    /// The payload is missing required fields or cannot be decoded
    #[error("invalid response: {0}")]
    InvalidResponse(CCStr),
    /// A caller-supplied filter was rejected
    #[error("invalid input: {0}")]
    Validation(CCStr),
}

/// One page of records together with the size of the whole collection.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult<R> {
    pub items: Vec<R>,
    pub total: u64,
}

impl<R> FetchResult<R> {
    pub fn new(items: Vec<R>, total: u64) -> Self {
        Self { items, total }
    }
}

/// Async boundary between a table view and whatever holds its records.
///
/// Implementors translate a [PageQuery] into the parameters their endpoint
/// understands and decode the answer into a [FetchResult].
pub trait DataFetcher: 'static {
    type Record: Clone + PartialEq + 'static;

    fn fetch(
        &self,
        query: PageQuery,
    ) -> impl Future<Output = Result<FetchResult<Self::Record>, TableError>> + 'static;
}
