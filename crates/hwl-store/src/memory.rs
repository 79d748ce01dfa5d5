use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::context::RequestContext;
use crate::error::{StoreError, StoreResult};
use crate::traits::DocumentStore;

/// In-memory document store.
///
/// Intended for tests and ephemeral runs. Documents are held in a map behind
/// an `RwLock` and cloned on read and write. Listing returns documents in id
/// order.
pub struct InMemoryDocumentStore<T> {
    documents: RwLock<BTreeMap<String, T>>,
    connected: AtomicBool,
}

impl<T> InMemoryDocumentStore<T> {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(BTreeMap::new()),
            connected: AtomicBool::new(true),
        }
    }

    /// Create a store pre-populated with `(id, document)` pairs.
    pub fn with_documents(documents: impl IntoIterator<Item = (String, T)>) -> Self {
        Self {
            documents: RwLock::new(documents.into_iter().collect()),
            connected: AtomicBool::new(true),
        }
    }

    /// Number of documents currently stored.
    pub fn len(&self) -> usize {
        self.documents.read().map(|map| map.len()).unwrap_or(0)
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `false` once `disconnect` has been called.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn ensure_ready(&self, ctx: &RequestContext) -> StoreResult<()> {
        if !self.is_connected() {
            return Err(StoreError::Disconnected);
        }
        ctx.check()
    }

    fn read_map(&self) -> StoreResult<RwLockReadGuard<'_, BTreeMap<String, T>>> {
        self.documents
            .read()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))
    }

    fn write_map(&self) -> StoreResult<RwLockWriteGuard<'_, BTreeMap<String, T>>> {
        self.documents
            .write()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))
    }
}

impl<T> Default for InMemoryDocumentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> DocumentStore<T> for InMemoryDocumentStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn create_document(
        &self,
        ctx: &RequestContext,
        id: &str,
        document: &T,
    ) -> StoreResult<()> {
        self.ensure_ready(ctx)?;
        let mut map = self.write_map()?;
        if map.contains_key(id) {
            return Err(StoreError::Conflict(id.to_string()));
        }
        map.insert(id.to_string(), document.clone());
        Ok(())
    }

    async fn list_documents(&self, ctx: &RequestContext) -> StoreResult<Vec<T>> {
        self.ensure_ready(ctx)?;
        let map = self.read_map()?;
        Ok(map.values().cloned().collect())
    }

    async fn find_document(&self, ctx: &RequestContext, id: &str) -> StoreResult<T> {
        self.ensure_ready(ctx)?;
        let map = self.read_map()?;
        map.get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn update_document(
        &self,
        ctx: &RequestContext,
        id: &str,
        document: &T,
    ) -> StoreResult<()> {
        self.ensure_ready(ctx)?;
        let mut map = self.write_map()?;
        match map.get_mut(id) {
            Some(slot) => {
                *slot = document.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    async fn delete_document(&self, ctx: &RequestContext, id: &str) -> StoreResult<()> {
        self.ensure_ready(ctx)?;
        let mut map = self.write_map()?;
        map.remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn disconnect(&self, _ctx: &RequestContext) -> StoreResult<()> {
        self.connected.store(false, Ordering::SeqCst);
        tracing::debug!("in-memory document store disconnected");
        Ok(())
    }
}

impl<T> std::fmt::Debug for InMemoryDocumentStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryDocumentStore")
            .field("document_count", &self.len())
            .field("connected", &self.is_connected())
            .finish()
    }
}
