//! Hospital worklist core.
//!
//! Every operation on the nested resources of a hospital goes through one
//! read-modify-write cycle, [`Worklist::apply_update`]: load the hospital,
//! hand it to a mutation callback, and write it back if the callback asks for
//! it. The callbacks are built from the id-indexed operators in [`nested`].
//!
//! Moving an employee entry between hospitals ([`Worklist::transfer_entry`])
//! does not use that cycle; it drives the store directly with two separate
//! writes and is not atomic.
//!
//! # Concurrency
//!
//! There is no version check between the read and the write of a cycle.
//! Two concurrent cycles on the same hospital can race and the later write
//! silently wins (lost update). Callers that need more must add optimistic
//! versioning on top.

pub mod employees;
pub mod error;
pub mod hospitals;
pub mod nested;
pub mod performances;
pub mod reply;
pub mod roles;
pub mod service;
pub mod transfer;
pub mod updater;

#[cfg(test)]
mod testing;

pub use error::{WorklistError, WorklistResult};
pub use reply::{Mutation, Reply, Status};
pub use service::Worklist;

// Re-export the types callers need to drive the worklist.
pub use hwl_store::{DocumentStore, RequestContext};
pub use hwl_types::{EmployeeListEntry, Hospital, PerformanceEntry, Role};
