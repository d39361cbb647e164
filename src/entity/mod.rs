//! Entity subsystem for pastedb
//!
//! Entities are opaque records with a fixed set of named scalar fields.
//! The query engine never knows an entity's schema at compile time; it
//! resolves fields by name through a per-type accessor table.
//!
//! # Design Principles
//!
//! - Accessor tables are built once, at registration time
//! - Lookups are exact and case-sensitive
//! - A lookup miss is a recoverable error, never a zero value
//! - Entities are read, never mutated, by the engine

mod errors;
mod paste;
mod table;
mod value;

pub use errors::{EntityError, EntityResult};
pub use paste::{Paste, CONTENT_MAX_LEN, POSTER_MAX_LEN, SYNTAX_MAX_LEN};
pub use table::{Entity, EntityAccessor, FieldTable, Record};
pub use value::{FieldKind, FieldValue};
