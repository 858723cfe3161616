//! Seams the controllers depend on
//!
//! Implemented over HTTP by [`crate::ApiClient`] and by in-memory fakes in
//! tests.

use crate::error::{DeleteError, FetchError};
use async_trait::async_trait;
use timeline_types::{ItemId, ItemKind, Record};

/// Retrieves the revision record of one timeline item
///
/// The record shape is determined entirely by `kind`: edit kinds yield
/// [`Record::Edit`], experiments yield [`Record::Experiment`]. No caching and
/// no retries happen behind this trait.
#[async_trait]
pub trait RecordFetcher: Send + Sync {
    /// Fetch the record for `id`
    async fn fetch(&self, kind: ItemKind, id: &ItemId) -> Result<Record, FetchError>;
}

/// Issues delete requests for confirmed deletions
#[async_trait]
pub trait Deleter: Send + Sync {
    /// `DELETE` the target; success means a 2xx response
    async fn delete(&self, target_url: &str) -> Result<(), DeleteError>;
}
