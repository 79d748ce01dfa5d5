//! Store double for exercising failure paths.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hwl_store::{DocumentStore, InMemoryDocumentStore, RequestContext, StoreError, StoreResult};
use hwl_types::Hospital;

use crate::Worklist;

/// In-memory store that can be told to fail or race on specific ids.
#[derive(Default)]
pub struct FaultyStore {
    inner: InMemoryDocumentStore<Hospital>,
    failing_finds: Mutex<HashSet<String>>,
    failing_updates: Mutex<HashSet<String>>,
    removed_before_update: Mutex<HashSet<String>>,
    update_calls: AtomicUsize,
}

impl FaultyStore {
    pub fn with_hospitals(hospitals: Vec<Hospital>) -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryDocumentStore::with_documents(
                hospitals.into_iter().map(|h| (h.id.clone(), h)),
            ),
            ..Self::default()
        })
    }

    /// `find_document(id)` fails with a backend error.
    pub fn fail_find(&self, id: &str) {
        self.failing_finds.lock().unwrap().insert(id.to_string());
    }

    /// `update_document(id)` fails with a backend error and writes nothing.
    pub fn fail_update(&self, id: &str) {
        self.failing_updates.lock().unwrap().insert(id.to_string());
    }

    /// The document is deleted right before `update_document(id)` runs, as a
    /// concurrent request would.
    pub fn remove_before_update(&self, id: &str) {
        self.removed_before_update.lock().unwrap().insert(id.to_string());
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub async fn get(&self, id: &str) -> Option<Hospital> {
        self.inner
            .find_document(&RequestContext::background(), id)
            .await
            .ok()
    }
}

#[async_trait]
impl DocumentStore<Hospital> for FaultyStore {
    async fn create_document(
        &self,
        ctx: &RequestContext,
        id: &str,
        document: &Hospital,
    ) -> StoreResult<()> {
        self.inner.create_document(ctx, id, document).await
    }

    async fn list_documents(&self, ctx: &RequestContext) -> StoreResult<Vec<Hospital>> {
        self.inner.list_documents(ctx).await
    }

    async fn find_document(&self, ctx: &RequestContext, id: &str) -> StoreResult<Hospital> {
        if self.failing_finds.lock().unwrap().contains(id) {
            return Err(StoreError::Backend("find unavailable".into()));
        }
        self.inner.find_document(ctx, id).await
    }

    async fn update_document(
        &self,
        ctx: &RequestContext,
        id: &str,
        document: &Hospital,
    ) -> StoreResult<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_updates.lock().unwrap().contains(id) {
            return Err(StoreError::Backend("write unavailable".into()));
        }
        let race = self.removed_before_update.lock().unwrap().contains(id);
        if race {
            self.inner.delete_document(ctx, id).await?;
        }
        self.inner.update_document(ctx, id, document).await
    }

    async fn delete_document(&self, ctx: &RequestContext, id: &str) -> StoreResult<()> {
        self.inner.delete_document(ctx, id).await
    }

    async fn disconnect(&self, ctx: &RequestContext) -> StoreResult<()> {
        self.inner.disconnect(ctx).await
    }
}

/// A worklist over a [`FaultyStore`] seeded with `hospitals`.
pub fn worklist_with(hospitals: Vec<Hospital>) -> (Worklist, Arc<FaultyStore>) {
    let store = FaultyStore::with_hospitals(hospitals);
    (Worklist::new(store.clone()), store)
}

pub fn ctx() -> RequestContext {
    RequestContext::background()
}
