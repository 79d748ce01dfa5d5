use async_trait::async_trait;

use crate::context::RequestContext;
use crate::error::StoreResult;

/// A collection of documents of one aggregate type, keyed by id.
///
/// All implementations must satisfy these invariants:
/// - `create_document` never overwrites: an existing id is a `Conflict`.
/// - `update_document` and `delete_document` report `NotFound` when the id
///   is absent at the time of the write.
/// - `update_document` is a blind overwrite; concurrent read-modify-write
///   cycles on the same id can lose updates.
/// - `list_documents` returns an empty vector, never an error, for an empty
///   collection.
/// - Every operation checks the [`RequestContext`] before touching the
///   backend.
#[async_trait]
pub trait DocumentStore<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// Insert a new document under `id`.
    async fn create_document(&self, ctx: &RequestContext, id: &str, document: &T)
        -> StoreResult<()>;

    /// All documents in the collection.
    async fn list_documents(&self, ctx: &RequestContext) -> StoreResult<Vec<T>>;

    /// Load the document stored under `id`.
    async fn find_document(&self, ctx: &RequestContext, id: &str) -> StoreResult<T>;

    /// Replace the document stored under `id`.
    async fn update_document(&self, ctx: &RequestContext, id: &str, document: &T)
        -> StoreResult<()>;

    /// Remove the document stored under `id`.
    async fn delete_document(&self, ctx: &RequestContext, id: &str) -> StoreResult<()>;

    /// Release backend resources. Called once at shutdown.
    async fn disconnect(&self, ctx: &RequestContext) -> StoreResult<()>;
}
