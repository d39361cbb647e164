//! Query executor for pastedb
//!
//! Executes a validated query against a record store, producing the raw
//! ordered, filtered page.

use crate::query::QuerySpec;
use crate::store::{QueryHandle, RecordStore};

use super::errors::ExecutorResult;
use super::result::ExecutionResult;

/// Query executor bound to one store
pub struct QueryExecutor<'a, S: RecordStore> {
    store: &'a S,
}

impl<'a, S: RecordStore> QueryExecutor<'a, S> {
    /// Creates a new executor
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Executes a query and returns the page.
    ///
    /// Performs exactly one store fetch. Never fails on a validated query
    /// except with what the store reports.
    pub fn execute(&self, spec: &QuerySpec) -> ExecutorResult<ExecutionResult<S::Entity>> {
        let records = self
            .store
            .filter(spec.filters())
            .order_by(spec.sorts())
            .limit(spec.limit(), spec.offset())
            .fetch()?;

        Ok(ExecutionResult {
            records,
            limit: spec.limit(),
            offset: spec.offset(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Paste;
    use crate::executor::ExecutorErrorCode;
    use crate::query::{FilterSet, QueryParams, SortClause};
    use crate::store::{MemoryStore, StoreError, StoreResult};
    use std::cell::RefCell;

    /// Mock store recording every handle call
    struct MockStore {
        calls: RefCell<Vec<String>>,
        fail: Option<StoreError>,
    }

    impl MockStore {
        fn new(fail: Option<StoreError>) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail,
            }
        }
    }

    struct MockHandle<'a> {
        store: &'a MockStore,
    }

    impl RecordStore for MockStore {
        type Entity = Paste;
        type Handle<'a> = MockHandle<'a>;

        fn filter<'a>(&'a self, filters: &FilterSet) -> MockHandle<'a> {
            self.calls
                .borrow_mut()
                .push(format!("filter({})", filters.len()));
            MockHandle { store: self }
        }
    }

    impl QueryHandle for MockHandle<'_> {
        type Entity = Paste;

        fn order_by(self, sorts: &[SortClause]) -> Self {
            let names: Vec<String> = sorts.iter().map(|s| s.to_string()).collect();
            self.store
                .calls
                .borrow_mut()
                .push(format!("order_by({})", names.join(",")));
            self
        }

        fn limit(self, limit: i64, offset: i64) -> Self {
            self.store
                .calls
                .borrow_mut()
                .push(format!("limit({},{})", limit, offset));
            self
        }

        fn fetch(self) -> StoreResult<Vec<Paste>> {
            self.store.calls.borrow_mut().push("fetch".to_string());
            match &self.store.fail {
                Some(e) => Err(e.clone()),
                None => Ok(vec![Paste::new("a", "go", "x").with_id(1)]),
            }
        }
    }

    #[test]
    fn test_single_chain_in_order() {
        let store = MockStore::new(None);
        let spec = QuerySpec::from_params(
            &QueryParams::new()
                .query("syntax:go")
                .sortby("id,poster")
                .order("desc")
                .limit(5)
                .offset(3),
        )
        .unwrap();

        let result = QueryExecutor::new(&store).execute(&spec).unwrap();

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.limit, 5);
        assert_eq!(result.offset, 3);
        assert_eq!(
            *store.calls.borrow(),
            vec!["filter(1)", "order_by(-id,-poster)", "limit(5,3)", "fetch"]
        );
    }

    #[test]
    fn test_store_unavailable_passthrough() {
        let store = MockStore::new(Some(StoreError::Unavailable("connection refused".into())));
        let spec = QuerySpec::all(10, 0);

        let err = QueryExecutor::new(&store).execute(&spec).unwrap_err();

        assert_eq!(err.code(), ExecutorErrorCode::PasteStoreUnavailable);
        assert_eq!(
            err.into_store_error(),
            StoreError::Unavailable("connection refused".into())
        );
        // No retry
        assert_eq!(store.calls.borrow().iter().filter(|c| *c == "fetch").count(), 1);
    }

    #[test]
    fn test_against_memory_store() {
        let store = MemoryStore::from_records(vec![
            Paste::new("a", "go", "1"),
            Paste::new("b", "rust", "2"),
            Paste::new("c", "go", "3"),
        ])
        .unwrap();
        let spec = QuerySpec::from_params(
            &QueryParams::new().query("syntax:go").sortby("id").order("desc"),
        )
        .unwrap();

        let result = QueryExecutor::new(&store).execute(&spec).unwrap();
        let ids: Vec<i64> = result.records.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
