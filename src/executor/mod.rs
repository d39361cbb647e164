//! Query Executor subsystem for pastedb
//!
//! The executor consumes a validated [`QuerySpec`](crate::query::QuerySpec)
//! and produces the raw page from the store.
//!
//! # Execution Flow (strict order)
//!
//! 1. Apply filters (AND)
//! 2. Apply sort clauses (clause order = precedence)
//! 3. Skip `offset`, take `limit`
//! 4. Fetch once
//!
//! Projection is not the executor's concern.

mod errors;
mod executor;
mod result;

pub use errors::{ExecutorError, ExecutorErrorCode, ExecutorResult};
pub use executor::QueryExecutor;
pub use result::ExecutionResult;
