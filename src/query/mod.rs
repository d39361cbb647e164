//! Query subsystem for pastedb
//!
//! Turns loosely-typed request parameters into a validated [`QuerySpec`].
//!
//! # Validation Flow (strict order)
//!
//! 1. Parse `query` into filter clauses
//! 2. Resolve `sortby` against `order`
//! 3. Split `fields` into the projection list
//! 4. Apply `limit` / `offset` defaults
//!
//! Every check happens before the store is touched.

mod errors;
mod filter;
mod params;
mod sort;
mod spec;

pub use errors::{QueryError, QueryErrorCode, QueryResult};
pub use filter::{
    canonical_path, FilterBuilder, FilterClause, FilterSet, NULL_CHECK_MARKER, PATH_SEPARATOR,
};
pub use params::{split_list, QueryParams, DEFAULT_LIMIT, DEFAULT_OFFSET};
pub use sort::{SortClause, SortDirection, SortResolver};
pub use spec::{QueryDefaults, QuerySpec};
