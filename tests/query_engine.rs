//! Query Engine Tests
//!
//! End-to-end behavior of the list pipeline:
//! - Filters are conjunctive and validated before the store is touched
//! - Sorting is stable with clause order as precedence
//! - Paging happens after sorting
//! - Projection is all-or-nothing

use std::cell::Cell;
use std::sync::Arc;
use std::thread;

use pastedb::api::{ApiError, PasteService};
use pastedb::entity::{EntityError, FieldValue, Paste};
use pastedb::executor::{ExecutorErrorCode, QueryExecutor};
use pastedb::projector::{Projector, ResultPage};
use pastedb::query::{
    FilterBuilder, FilterClause, FilterSet, QueryDefaults, QueryErrorCode, QueryParams, QuerySpec,
    SortClause,
};
use pastedb::store::{
    MemoryStore, QueryHandle, RecordStore, StoreError, StoreResult, WritableStore,
};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

/// Seven `go` pastes interleaved with three `rust` pastes.
fn mixed_store() -> MemoryStore<Paste> {
    let mut records = Vec::new();
    for i in 1..=10 {
        let syntax = if i % 3 == 0 { "rust" } else { "go" };
        records.push(Paste::new(format!("user{}", i), syntax, format!("body {}", i)));
    }
    MemoryStore::from_records(records).unwrap()
}

fn ids(page: &ResultPage<Paste>) -> Vec<i64> {
    page.entities().unwrap().iter().map(|p| p.id).collect()
}

/// Store that counts fetches and can be told to fail.
struct CountingStore {
    fetches: Cell<usize>,
    down: bool,
}

struct CountingHandle<'a> {
    store: &'a CountingStore,
}

impl RecordStore for CountingStore {
    type Entity = Paste;
    type Handle<'a> = CountingHandle<'a>;

    fn filter<'a>(&'a self, _filters: &FilterSet) -> CountingHandle<'a> {
        CountingHandle { store: self }
    }
}

impl QueryHandle for CountingHandle<'_> {
    type Entity = Paste;

    fn order_by(self, _sorts: &[SortClause]) -> Self {
        self
    }

    fn limit(self, _limit: i64, _offset: i64) -> Self {
        self
    }

    fn fetch(self) -> StoreResult<Vec<Paste>> {
        self.store.fetches.set(self.store.fetches.get() + 1);
        if self.store.down {
            Err(StoreError::Unavailable("connection refused".into()))
        } else {
            Ok(Vec::new())
        }
    }
}

impl WritableStore for CountingStore {
    fn insert(&self, _record: Paste) -> StoreResult<i64> {
        Err(StoreError::Unavailable("read-only".into()))
    }

    fn get(&self, key: i64) -> StoreResult<Paste> {
        Err(StoreError::NotFound(key))
    }

    fn update(&self, record: Paste) -> StoreResult<()> {
        Err(StoreError::NotFound(record.id))
    }

    fn delete(&self, key: i64) -> StoreResult<()> {
        Err(StoreError::NotFound(key))
    }
}

// =============================================================================
// Scenario Tests
// =============================================================================

/// Five most recent `go` pastes by id, as full entities.
#[test]
fn test_recent_go_pastes() {
    let service = PasteService::new(mixed_store());

    let params = QueryParams::new()
        .query("syntax:go")
        .sortby("id")
        .order("desc")
        .limit(5)
        .offset(0);
    let page = service.get_all(&params).unwrap();

    assert_eq!(ids(&page), vec![10, 8, 7, 5, 4]);
    assert!(page
        .entities()
        .unwrap()
        .iter()
        .all(|p| p.syntax.as_deref() == Some("go") && p.content.is_some()));
}

/// Empty parameters return the store's natural page, unmodified.
#[test]
fn test_empty_request_is_natural_page() {
    let store = mixed_store();
    let natural = store.all().unwrap();
    let service = PasteService::new(store);

    let page = service.get_all(&QueryParams::new()).unwrap();
    assert_eq!(page.entities().unwrap(), &natural[..10]);

    let page = service
        .get_all(&QueryParams::new().limit(3).offset(4))
        .unwrap();
    assert_eq!(page.entities().unwrap(), &natural[4..7]);
}

/// Paging applies after sorting.
#[test]
fn test_offset_after_sort() {
    let service = PasteService::new(mixed_store());

    let page = service
        .get_all(&QueryParams::new().sortby("id").order("desc").limit(2).offset(1))
        .unwrap();
    assert_eq!(ids(&page), vec![9, 8]);
}

/// Conditions are ANDed together.
#[test]
fn test_conjunctive_filters() {
    let service = PasteService::new(mixed_store());

    let page = service
        .get_all(&QueryParams::new().query("syntax:rust,poster.endswith:6"))
        .unwrap();
    assert_eq!(ids(&page), vec![6]);
}

// =============================================================================
// Projection Tests
// =============================================================================

/// Projection keeps only the requested fields.
#[test]
fn test_projection_subset() {
    let paste = Paste::new("x", "go", "y").with_id(1);
    let page = Projector::project(vec![paste], &["id".to_string(), "poster".to_string()]).unwrap();

    assert_eq!(
        serde_json::to_value(&page).unwrap(),
        json!([{"id": 1, "poster": "x"}])
    );
}

/// Projected pages keep the sorted order.
#[test]
fn test_projection_preserves_order() {
    let service = PasteService::new(mixed_store());

    let page = service
        .get_all(
            &QueryParams::new()
                .query("syntax:rust")
                .fields("poster")
                .sortby("id")
                .order("desc"),
        )
        .unwrap();

    let posters: Vec<&FieldValue> = page
        .rows()
        .unwrap()
        .iter()
        .map(|row| row.get("poster").unwrap())
        .collect();
    assert_eq!(
        posters,
        vec![
            &FieldValue::from("user9"),
            &FieldValue::from("user6"),
            &FieldValue::from("user3")
        ]
    );
}

/// An unknown projected field fails the whole page.
#[test]
fn test_unknown_projection_fails_closed() {
    let service = PasteService::new(mixed_store());

    let err = service
        .get_all(&QueryParams::new().fields("id,author"))
        .unwrap_err();
    match err {
        ApiError::Entity(EntityError::UnknownField { field, .. }) => assert_eq!(field, "author"),
        other => panic!("unexpected error {:?}", other),
    }
}

// =============================================================================
// Null Check Edge Cases
// =============================================================================

/// Nested `isnull` key becomes a null-check on the canonical path.
#[test]
fn test_nested_isnull_clause() {
    let set = FilterBuilder::parse("a.b.isnull:true").unwrap();
    assert_eq!(
        set.get("a__b__isnull"),
        Some(&FilterClause::NullCheck {
            path: "a__b__isnull".into(),
            is_null: true
        })
    );

    let set = FilterBuilder::parse("a.b.isnull:yes").unwrap();
    assert_eq!(
        set.get("a__b__isnull"),
        Some(&FilterClause::NullCheck {
            path: "a__b__isnull".into(),
            is_null: false
        })
    );
}

/// The marker is matched anywhere in the key.
#[test]
fn test_isnull_substring_keys() {
    let set = FilterBuilder::parse("isnull:true,myisnullfield:x").unwrap();
    assert!(set.get("isnull").unwrap().is_null_check());
    assert!(set.get("myisnullfield").unwrap().is_null_check());
}

/// Null checks select rows by presence of a value.
#[test]
fn test_null_check_against_store() {
    let store = MemoryStore::from_records(vec![
        Paste::new("a", "go", "x"),
        Paste {
            poster: None,
            ..Paste::new("", "go", "y")
        },
    ])
    .unwrap();
    let service = PasteService::new(store);

    let page = service
        .get_all(&QueryParams::new().query("poster.isnull:true"))
        .unwrap();
    assert_eq!(ids(&page), vec![2]);

    let page = service
        .get_all(&QueryParams::new().query("poster.isnull:false"))
        .unwrap();
    assert_eq!(ids(&page), vec![1]);
}

// =============================================================================
// Duplicate Key Tests
// =============================================================================

/// Repeated keys: the last condition wins.
#[test]
fn test_duplicate_key_last_write_wins() {
    let set = FilterBuilder::parse("syntax:go,syntax:rust").unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(
        set.get("syntax"),
        Some(&FilterClause::Equals {
            path: "syntax".into(),
            value: "rust".into()
        })
    );

    let service = PasteService::new(mixed_store());
    let page = service
        .get_all(&QueryParams::new().query("syntax:go,syntax:rust"))
        .unwrap();
    assert_eq!(ids(&page), vec![3, 6, 9]);
}

/// Dot and double-underscore spellings are the same key.
#[test]
fn test_dot_and_separator_collide() {
    let set = FilterBuilder::parse("a.b:1,a__b:2").unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(
        set.get("a__b"),
        Some(&FilterClause::Equals {
            path: "a__b".into(),
            value: "2".into()
        })
    );
}

// =============================================================================
// Validation Tests
// =============================================================================

/// Invalid requests never reach the store.
#[test]
fn test_validation_before_store_access() {
    let store = CountingStore {
        fetches: Cell::new(0),
        down: false,
    };
    let service = PasteService::new(store).with_defaults(QueryDefaults {
        default_limit: 10,
        max_limit: Some(50),
    });

    for params in [
        QueryParams::new().query("syntax"),
        QueryParams::new().sortby("id").order("up"),
        QueryParams::new().sortby("id,poster").order("asc,desc,asc"),
        QueryParams::new().order("desc"),
        QueryParams::new().fields("id,author"),
        QueryParams::new().limit(51),
    ] {
        let err = service.get_all(&params).unwrap_err();
        assert!(err.is_client_error(), "{:?} -> {}", params, err);
        assert_eq!(service.store().fetches.get(), 0, "{:?} reached the store", params);
    }
    assert_eq!(service.metrics().snapshot().queries_rejected, 6);

    service.get_all(&QueryParams::new().fields("id")).unwrap();
    assert_eq!(service.store().fetches.get(), 1);
}

/// First failing stage determines the error.
#[test]
fn test_error_codes() {
    let code = |params: QueryParams| QuerySpec::from_params(&params).unwrap_err().code();

    assert_eq!(
        code(QueryParams::new().query("name:doe,age")),
        QueryErrorCode::PasteMalformedFilter
    );
    assert_eq!(
        code(QueryParams::new().sortby("id").order("ASC")),
        QueryErrorCode::PasteInvalidOrderToken
    );
    assert_eq!(
        code(QueryParams::new().sortby("a,b").order("asc,desc,asc")),
        QueryErrorCode::PasteSortOrderSizeMismatch
    );
    assert_eq!(
        code(QueryParams::new().order("asc")),
        QueryErrorCode::PasteUnusedOrder
    );
    // Filter errors come before sort errors
    assert_eq!(
        code(QueryParams::new().query("bad").order("asc")),
        QueryErrorCode::PasteMalformedFilter
    );
}

/// Store failures pass through once, without retry.
#[test]
fn test_store_unavailable_passthrough() {
    let store = CountingStore {
        fetches: Cell::new(0),
        down: true,
    };

    let spec = QuerySpec::from_params(&QueryParams::new()).unwrap();
    let err = QueryExecutor::new(&store).execute(&spec).unwrap_err();

    assert_eq!(err.code(), ExecutorErrorCode::PasteStoreUnavailable);
    assert!(err.is_unavailable());
    assert_eq!(store.fetches.get(), 1);
}

// =============================================================================
// Concurrency Tests
// =============================================================================

/// Overlapping queries against one store see the same page.
#[test]
fn test_concurrent_queries() {
    let service = Arc::new(PasteService::new(mixed_store()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                let page = service
                    .get_all(&QueryParams::new().query("syntax:go").sortby("id").order("desc"))
                    .unwrap();
                ids(&page)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), vec![10, 8, 7, 5, 4, 2, 1]);
    }
    assert_eq!(service.metrics().snapshot().queries_executed, 8);
}

/// Writes interleaved with reads never produce a torn page.
#[test]
fn test_reads_during_writes() {
    let service = Arc::new(PasteService::new(mixed_store()));

    let writer = {
        let service = Arc::clone(&service);
        thread::spawn(move || {
            for i in 0..20 {
                service.create(Paste::new("w", "zig", i.to_string())).unwrap();
            }
        })
    };

    for _ in 0..20 {
        let page = service
            .get_all(&QueryParams::new().query("syntax:go").limit(-1))
            .unwrap();
        assert_eq!(page.len(), 7);
    }

    writer.join().unwrap();
    let page = service
        .get_all(&QueryParams::new().query("syntax:zig").limit(-1))
        .unwrap();
    assert_eq!(page.len(), 20);
}
