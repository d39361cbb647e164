//! In-memory record store
//!
//! Records live in a key-ordered map behind a read/write lock. Natural
//! order is ascending key. A fetch holds one read lock for the whole
//! filter + sort + page, so each query sees a consistent snapshot.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::entity::{Entity, FieldValue, Record};
use crate::query::{FilterSet, SortClause};

use super::backend::{QueryHandle, RecordStore, WritableStore};
use super::errors::{StoreError, StoreResult};
use super::matcher::{resolve_sort_field, CompiledClause};

/// Thread-safe in-memory store
#[derive(Debug)]
pub struct MemoryStore<E: Record> {
    records: RwLock<BTreeMap<i64, E>>,
}

impl<E: Record> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Record> MemoryStore<E> {
    /// Creates an empty store
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }

    /// Creates a store holding the given records
    pub fn from_records(records: impl IntoIterator<Item = E>) -> StoreResult<Self> {
        let store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, BTreeMap<i64, E>>> {
        self.records
            .read()
            .map_err(|_| StoreError::Unavailable("record lock poisoned".into()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, BTreeMap<i64, E>>> {
        self.records
            .write()
            .map_err(|_| StoreError::Unavailable("record lock poisoned".into()))
    }

    /// Inserts a record and returns its key.
    ///
    /// A key of 0 is replaced by the next free key.
    pub fn insert(&self, mut record: E) -> StoreResult<i64> {
        let mut records = self.write()?;

        let key = match record.key() {
            0 => records.keys().next_back().map_or(1, |last| last + 1),
            k if records.contains_key(&k) => return Err(StoreError::DuplicateKey(k)),
            k => k,
        };
        record.set_key(key);
        records.insert(key, record);

        Ok(key)
    }

    /// Returns the record with this key
    pub fn get(&self, key: i64) -> StoreResult<E> {
        self.read()?
            .get(&key)
            .cloned()
            .ok_or(StoreError::NotFound(key))
    }

    /// Replaces an existing record
    pub fn update(&self, record: E) -> StoreResult<()> {
        let mut records = self.write()?;
        match records.get_mut(&record.key()) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(StoreError::NotFound(record.key())),
        }
    }

    /// Removes an existing record
    pub fn delete(&self, key: i64) -> StoreResult<()> {
        self.write()?
            .remove(&key)
            .map(|_| ())
            .ok_or(StoreError::NotFound(key))
    }

    /// Returns every record in key order
    pub fn all(&self) -> StoreResult<Vec<E>> {
        Ok(self.read()?.values().cloned().collect())
    }

    /// Returns the number of records
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read()?.is_empty())
    }
}

impl<E: Record> RecordStore for MemoryStore<E> {
    type Entity = E;
    type Handle<'a> = MemoryQuery<'a, E> where Self: 'a;

    fn filter<'a>(&'a self, filters: &FilterSet) -> Self::Handle<'a> {
        MemoryQuery {
            store: self,
            filters: filters.clone(),
            sorts: Vec::new(),
            limit: -1,
            offset: 0,
        }
    }
}

impl<E: Record> WritableStore for MemoryStore<E> {
    fn insert(&self, record: E) -> StoreResult<i64> {
        MemoryStore::insert(self, record)
    }

    fn get(&self, key: i64) -> StoreResult<E> {
        MemoryStore::get(self, key)
    }

    fn update(&self, record: E) -> StoreResult<()> {
        MemoryStore::update(self, record)
    }

    fn delete(&self, key: i64) -> StoreResult<()> {
        MemoryStore::delete(self, key)
    }
}

/// Pending query against a [`MemoryStore`]
#[derive(Debug)]
pub struct MemoryQuery<'a, E: Record> {
    store: &'a MemoryStore<E>,
    filters: FilterSet,
    sorts: Vec<SortClause>,
    limit: i64,
    offset: i64,
}

impl<E: Record> QueryHandle for MemoryQuery<'_, E> {
    type Entity = E;

    fn order_by(mut self, sorts: &[SortClause]) -> Self {
        self.sorts = sorts.to_vec();
        self
    }

    fn limit(mut self, limit: i64, offset: i64) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }

    fn fetch(self) -> StoreResult<Vec<E>> {
        // Resolve every path before reading so bad queries fail even on an
        // empty store.
        let clauses = CompiledClause::compile_all::<E>(&self.filters)?;
        let sort_fields = self
            .sorts
            .iter()
            .map(resolve_sort_field::<E>)
            .collect::<StoreResult<Vec<_>>>()?;

        let records = self.store.read()?;

        let mut matched: Vec<(Vec<FieldValue>, &E)> = Vec::new();
        'records: for record in records.values() {
            for clause in &clauses {
                if !clause.matches(record)? {
                    continue 'records;
                }
            }
            let keys = sort_fields
                .iter()
                .map(|field| sort_key(record, field))
                .collect();
            matched.push((keys, record));
        }

        if !self.sorts.is_empty() {
            // Stable: ties keep natural (key) order
            matched.sort_by(|(a, _), (b, _)| {
                self.sorts
                    .iter()
                    .zip(a.iter().zip(b))
                    .map(|(clause, (av, bv))| {
                        let ord = av.sort_cmp(bv);
                        if clause.descending {
                            ord.reverse()
                        } else {
                            ord
                        }
                    })
                    .find(|ord| ord.is_ne())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }

        let skip = usize::try_from(self.offset.max(0)).unwrap_or(usize::MAX);
        let take = usize::try_from(self.limit).unwrap_or(usize::MAX);

        Ok(matched
            .into_iter()
            .skip(skip)
            .take(take)
            .map(|(_, record)| record.clone())
            .collect())
    }
}

fn sort_key<E: Entity>(record: &E, field: &str) -> FieldValue {
    // Field was resolved against the table already
    E::field_table().get(record, field).unwrap_or(FieldValue::Null)
}
