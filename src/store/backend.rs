//! Record store abstraction consumed by the query executor
//!
//! A store is queried through a chain of handle calls:
//! `filter(clauses) -> order_by(sorts) -> limit(n, offset) -> fetch()`.
//! Only `fetch` touches data and only `fetch` can fail.

use crate::entity::Entity;
use crate::query::{FilterSet, SortClause};

use super::errors::StoreResult;

/// A store that can answer filter + sort + page queries
pub trait RecordStore {
    /// Entity type held by the store
    type Entity: Entity;

    /// Query handle borrowing the store
    type Handle<'a>: QueryHandle<Entity = Self::Entity>
    where
        Self: 'a;

    /// Starts a query restricted by all clauses (AND)
    fn filter<'a>(&'a self, filters: &FilterSet) -> Self::Handle<'a>;
}

/// A pending query against a [`RecordStore`]
pub trait QueryHandle: Sized {
    type Entity;

    /// Orders results; clause order is precedence
    fn order_by(self, sorts: &[SortClause]) -> Self;

    /// Pages results. A negative limit means unbounded.
    fn limit(self, limit: i64, offset: i64) -> Self;

    /// Runs the query with one consistent read
    fn fetch(self) -> StoreResult<Vec<Self::Entity>>;
}

/// Keyed writes and point reads
pub trait WritableStore: RecordStore {
    /// Inserts a record, assigning a key when it has none
    fn insert(&self, record: Self::Entity) -> StoreResult<i64>;

    fn get(&self, key: i64) -> StoreResult<Self::Entity>;

    /// Replaces the record with the same key
    fn update(&self, record: Self::Entity) -> StoreResult<()>;

    fn delete(&self, key: i64) -> StoreResult<()>;
}
