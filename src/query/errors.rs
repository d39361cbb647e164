//! Query validation error types
//!
//! Error codes:
//! - PASTE_MALFORMED_FILTER (REJECT)
//! - PASTE_INVALID_ORDER_TOKEN (REJECT)
//! - PASTE_SORT_ORDER_SIZE_MISMATCH (REJECT)
//! - PASTE_UNUSED_ORDER (REJECT)
//! - PASTE_LIMIT_EXCEEDED (REJECT)
//!
//! All query errors are raised before any store access and are never
//! retryable: the caller must correct the request.

use std::fmt;

/// Severity levels for query errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Client request rejected
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Query-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorCode {
    /// Filter condition is not `key:value`
    PasteMalformedFilter,
    /// Order token is neither `asc` nor `desc`
    PasteInvalidOrderToken,
    /// `sortby` and `order` lengths cannot be reconciled
    PasteSortOrderSizeMismatch,
    /// `order` supplied without any `sortby`
    PasteUnusedOrder,
    /// Requested limit above the configured cap
    PasteLimitExceeded,
}

impl QueryErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            QueryErrorCode::PasteMalformedFilter => "PASTE_MALFORMED_FILTER",
            QueryErrorCode::PasteInvalidOrderToken => "PASTE_INVALID_ORDER_TOKEN",
            QueryErrorCode::PasteSortOrderSizeMismatch => "PASTE_SORT_ORDER_SIZE_MISMATCH",
            QueryErrorCode::PasteUnusedOrder => "PASTE_UNUSED_ORDER",
            QueryErrorCode::PasteLimitExceeded => "PASTE_LIMIT_EXCEEDED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for QueryErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Query error type with full context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    code: QueryErrorCode,
    message: String,
    /// Offending input fragment if applicable
    input: Option<String>,
}

impl QueryError {
    /// Create a malformed filter error
    pub fn malformed_filter(condition: impl Into<String>) -> Self {
        let c = condition.into();
        Self {
            code: QueryErrorCode::PasteMalformedFilter,
            message: format!("Invalid query key/value pair '{}'", c),
            input: Some(c),
        }
    }

    /// Create an invalid order token error
    pub fn invalid_order_token(token: impl Into<String>) -> Self {
        let t = token.into();
        Self {
            code: QueryErrorCode::PasteInvalidOrderToken,
            message: format!("Invalid order '{}'. Must be either [asc|desc]", t),
            input: Some(t),
        }
    }

    /// Create a sort/order size mismatch error
    pub fn sort_order_size_mismatch(sort_len: usize, order_len: usize) -> Self {
        Self {
            code: QueryErrorCode::PasteSortOrderSizeMismatch,
            message: format!(
                "'sortby' ({}) and 'order' ({}) sizes mismatch or 'order' size is not 1",
                sort_len, order_len
            ),
            input: None,
        }
    }

    /// Create an unused order error
    pub fn unused_order(order_len: usize) -> Self {
        Self {
            code: QueryErrorCode::PasteUnusedOrder,
            message: format!("Unused 'order' fields ({} given without 'sortby')", order_len),
            input: None,
        }
    }

    /// Create a limit exceeded error
    pub fn limit_exceeded(limit: i64, max: i64) -> Self {
        Self {
            code: QueryErrorCode::PasteLimitExceeded,
            message: format!("Limit {} exceeds maximum {}", limit, max),
            input: Some(limit.to_string()),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> QueryErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending input fragment if applicable
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    /// Query errors are never retryable
    pub fn is_retryable(&self) -> bool {
        false
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for QueryError {}

/// Result type for query validation
pub type QueryResult<T> = Result<T, QueryError>;
