use std::sync::Arc;
use std::time::Duration;

use hwl_store::{DocumentStore, RequestContext};
use hwl_types::Hospital;
use hwl_worklist::Worklist;

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub worklist: Worklist,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore<Hospital>>, request_timeout: Duration) -> Self {
        Self {
            worklist: Worklist::new(store),
            request_timeout,
        }
    }

    /// A fresh context bounded by the configured request timeout.
    pub fn request_context(&self) -> RequestContext {
        RequestContext::with_timeout(self.request_timeout)
    }
}
