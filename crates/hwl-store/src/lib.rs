//! Generic document storage for the hospital worklist.
//!
//! A document store holds a single collection of documents of one aggregate
//! type, keyed by a string id. It knows nothing about the structure of the
//! documents: the aggregate is read and written as a whole.
//!
//! # Storage Backends
//!
//! All backends implement the [`DocumentStore`] trait:
//!
//! - [`InMemoryDocumentStore`] -- map-based store for tests and ephemeral runs
//! - [`FileDocumentStore`] -- one JSON file per document in a directory
//!
//! # Design Rules
//!
//! 1. `NotFound` and `Conflict` are the only errors callers are expected to
//!    branch on. Everything else is an opaque backend failure.
//! 2. Updates are blind overwrites. There is no version check; the last
//!    writer wins.
//! 3. Every operation takes a [`RequestContext`] and fails fast once the
//!    request is cancelled or past its deadline.
//! 4. `disconnect` is called once at shutdown. Operations after it fail with
//!    [`StoreError::Disconnected`].

pub mod context;
pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use context::RequestContext;
pub use error::{StoreError, StoreResult};
pub use file::FileDocumentStore;
pub use memory::InMemoryDocumentStore;
pub use traits::DocumentStore;
