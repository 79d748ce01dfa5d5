use std::sync::Arc;

use hwl_store::DocumentStore;
use hwl_types::Hospital;

/// Entry point for all worklist operations.
///
/// Holds the single shared hospital store. Cheap to clone: clones share the
/// store handle.
#[derive(Clone)]
pub struct Worklist {
    store: Arc<dyn DocumentStore<Hospital>>,
}

impl Worklist {
    pub fn new(store: Arc<dyn DocumentStore<Hospital>>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn DocumentStore<Hospital> {
        self.store.as_ref()
    }
}

impl std::fmt::Debug for Worklist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worklist").finish_non_exhaustive()
    }
}
