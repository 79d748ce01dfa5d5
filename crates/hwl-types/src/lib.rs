//! Domain types for the hospital worklist.
//!
//! A [`Hospital`] is the aggregate: it is stored and written back as one
//! document. It owns an ordered list of [`EmployeeListEntry`] values, each of
//! which owns an ordered list of [`PerformanceEntry`] values. Both nested
//! levels implement [`NestedEntry`] so the collection operators can be written
//! once.
//!
//! # Key Types
//!
//! - [`Hospital`]: the stored aggregate
//! - [`EmployeeListEntry`]: an employee on a hospital's worklist
//! - [`PerformanceEntry`]: an opaque performance record of one employee
//! - [`Role`]: read-only value/code pair from a hospital's predefined roles
//!
//! All types serialize to camelCase JSON, which is both the wire shape and
//! the persisted shape.

pub mod employee;
pub mod hospital;
pub mod identity;

pub use employee::{EmployeeListEntry, PerformanceEntry};
pub use hospital::{Hospital, Role};
pub use identity::{generate_id, is_blank, needs_generated_id, NestedEntry, NEW_ENTRY_ID};
