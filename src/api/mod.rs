//! Request orchestration for pastedb
//!
//! [`PasteService`] is the single entry point callers use. A list request
//! flows strictly through:
//!
//! 1. Validate parameters into a [`QuerySpec`](crate::query::QuerySpec)
//! 2. Execute against the store (one fetch)
//! 3. Project the page
//!
//! Validation failures never reach the store. Error codes from lower
//! layers are passed through unchanged.

mod errors;
mod service;

pub use errors::{ApiError, ApiResult};
pub use service::PasteService;
