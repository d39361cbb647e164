//! Store subsystem for pastedb
//!
//! Defines the record store contract the executor runs against, and an
//! in-memory implementation backed by a JSON data file.
//!
//! # Invariants
//!
//! - One fetch = one consistent read
//! - Filters are conjunctive
//! - Sorting is stable; clause order is precedence
//! - Paging happens after sorting

mod backend;
mod errors;
mod matcher;
mod memory;
mod persist;

pub use backend::{QueryHandle, RecordStore, WritableStore};
pub use errors::{StoreError, StoreResult};
pub use memory::{MemoryQuery, MemoryStore};
pub use persist::{load_json, save_json};
