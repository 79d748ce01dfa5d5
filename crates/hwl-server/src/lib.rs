//! HTTP server for the hospital worklist.
//!
//! Exposes hospitals, their predefined roles, employee list entries and
//! per-entry performances as a REST API under `/api/hospital`. Every request
//! runs with its own context bounded by the configured timeout.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::{ServerConfig, StorageConfig};
pub use error::{ApiError, ApiResult, ServerError, ServerResult};
pub use server::{open_store, HospitalServer};
pub use state::AppState;
