//! Projection of query results
//!
//! Shapes the raw page returned by the executor. Without a projection the
//! entities pass through untouched; with one, each entity becomes a row
//! holding only the requested fields, in request order.
//!
//! An unknown field aborts the whole page (fail-closed): a row silently
//! missing a requested column would mislead the caller.

mod page;

pub use page::{ProjectedRow, Projector, ResultPage};
