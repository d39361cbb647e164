//! Raw request parameters
//!
//! The loosely-typed parameters a caller hands to the engine. Every field
//! is a string exactly as it arrived; an empty string means "absent".

use serde::{Deserialize, Serialize};

/// Default number of records in a page
pub const DEFAULT_LIMIT: i64 = 10;

/// Default number of records skipped
pub const DEFAULT_OFFSET: i64 = 0;

/// Unvalidated query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    /// Filter conditions, e.g. `col1:v1,col2:v2`
    pub query: String,
    /// Projected fields, e.g. `col1,col2`
    pub fields: String,
    /// Sort fields, e.g. `col1,col2`
    pub sortby: String,
    /// Order per sort field, or a single order for all, e.g. `desc,asc`
    pub order: String,
    /// Page size
    pub limit: String,
    /// Records to skip
    pub offset: String,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, v: impl Into<String>) -> Self {
        self.query = v.into();
        self
    }

    pub fn fields(mut self, v: impl Into<String>) -> Self {
        self.fields = v.into();
        self
    }

    pub fn sortby(mut self, v: impl Into<String>) -> Self {
        self.sortby = v.into();
        self
    }

    pub fn order(mut self, v: impl Into<String>) -> Self {
        self.order = v.into();
        self
    }

    pub fn limit(mut self, v: impl ToString) -> Self {
        self.limit = v.to_string();
        self
    }

    pub fn offset(mut self, v: impl ToString) -> Self {
        self.offset = v.to_string();
        self
    }

    /// Projected field names
    pub fn field_list(&self) -> Vec<String> {
        split_list(&self.fields)
    }

    /// Sort field names
    pub fn sort_list(&self) -> Vec<String> {
        split_list(&self.sortby)
    }

    /// Order tokens
    pub fn order_list(&self) -> Vec<String> {
        split_list(&self.order)
    }

    /// Page size, falling back to `default` when absent or not an integer
    pub fn limit_or(&self, default: i64) -> i64 {
        parse_int_or(&self.limit, default)
    }

    /// Records to skip, falling back to `default` when absent or not an integer
    pub fn offset_or(&self, default: i64) -> i64 {
        parse_int_or(&self.offset, default)
    }
}

/// Splits a comma-separated list; an empty string is an empty list.
///
/// Items are not trimmed and empty items are kept.
pub fn split_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(str::to_string).collect()
}

fn parse_int_or(raw: &str, default: i64) -> i64 {
    raw.parse().unwrap_or(default)
}
