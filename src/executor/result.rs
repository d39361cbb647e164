//! Result types for query execution

/// Raw page returned by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult<E> {
    /// Records in result order
    pub records: Vec<E>,
    /// Limit the page was fetched with (negative = unbounded)
    pub limit: i64,
    /// Offset the page was fetched with
    pub offset: i64,
}

impl<E> ExecutionResult<E> {
    /// Consumes the result, returning the records
    pub fn into_records(self) -> Vec<E> {
        self.records
    }
}
