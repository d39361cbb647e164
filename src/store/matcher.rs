//! Clause evaluation for the in-memory store
//!
//! A canonical path is `field` or `field__lookup`. Lookups follow the ORM
//! conventions callers already use (`exact`, `icontains`, `gte`, ...).
//! A path with more segments would traverse a relation; flat records
//! reject it.

use std::cmp::Ordering;

use crate::entity::{Entity, FieldKind, FieldValue};
use crate::query::{FilterClause, FilterSet, SortClause, PATH_SEPARATOR};

use super::errors::{StoreError, StoreResult};

const NULL_SUFFIX: &str = "__isnull";

/// Value lookups understood by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    Exact,
    IExact,
    Contains,
    IContains,
    StartsWith,
    IStartsWith,
    EndsWith,
    IEndsWith,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Lookup {
    /// Parses a trailing path segment
    fn parse(segment: &str) -> Option<Self> {
        let lookup = match segment {
            "exact" => Lookup::Exact,
            "iexact" => Lookup::IExact,
            "contains" => Lookup::Contains,
            "icontains" => Lookup::IContains,
            "startswith" => Lookup::StartsWith,
            "istartswith" => Lookup::IStartsWith,
            "endswith" => Lookup::EndsWith,
            "iendswith" => Lookup::IEndsWith,
            "gt" => Lookup::Gt,
            "gte" => Lookup::Gte,
            "lt" => Lookup::Lt,
            "lte" => Lookup::Lte,
            _ => return None,
        };
        Some(lookup)
    }
}

#[derive(Debug)]
enum Test {
    /// Operand already parsed as the field's declared kind
    Value(Lookup, FieldValue),
    Null(bool),
}

/// A filter clause resolved against an entity's fields
#[derive(Debug)]
pub struct CompiledClause {
    field: &'static str,
    test: Test,
}

impl CompiledClause {
    /// Resolves a clause's path against `E`'s declared fields and parses
    /// its value as the field's kind
    pub fn compile<E: Entity>(clause: &FilterClause) -> StoreResult<Self> {
        match clause {
            FilterClause::Equals { path, value } => {
                let mut segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
                let lookup = match segments.last().copied().and_then(Lookup::parse) {
                    Some(lookup) if segments.len() > 1 => {
                        segments.pop();
                        lookup
                    }
                    _ => Lookup::Exact,
                };
                if segments.len() != 1 {
                    return Err(StoreError::UnsupportedPath(path.clone()));
                }
                let field = resolve_field::<E>(segments[0])?;
                Ok(Self {
                    field,
                    test: Test::Value(lookup, parse_operand::<E>(field, lookup, value)?),
                })
            }
            FilterClause::NullCheck { path, is_null } => {
                let field = path.strip_suffix(NULL_SUFFIX).unwrap_or(path);
                if field.contains(PATH_SEPARATOR) {
                    return Err(StoreError::UnsupportedPath(path.clone()));
                }
                Ok(Self {
                    field: resolve_field::<E>(field)?,
                    test: Test::Null(*is_null),
                })
            }
        }
    }

    /// Compiles every clause of a set
    pub fn compile_all<E: Entity>(filters: &FilterSet) -> StoreResult<Vec<Self>> {
        filters.iter().map(Self::compile::<E>).collect()
    }

    /// Evaluates the clause against one entity
    pub fn matches<E: Entity>(&self, entity: &E) -> StoreResult<bool> {
        let actual = E::field_table()
            .get(entity, self.field)
            .map_err(|_| StoreError::UnknownField(self.field.to_string()))?;

        match &self.test {
            Test::Null(expect_null) => Ok(actual.is_null() == *expect_null),
            Test::Value(lookup, expected) => Ok(value_matches(&actual, *lookup, expected)),
        }
    }
}

/// Checks a sort clause's field and returns its declared name
pub fn resolve_sort_field<E: Entity>(clause: &SortClause) -> StoreResult<&'static str> {
    if clause.field.contains(PATH_SEPARATOR) {
        return Err(StoreError::UnsupportedPath(clause.field.clone()));
    }
    resolve_field::<E>(&clause.field)
}

fn resolve_field<E: Entity>(name: &str) -> StoreResult<&'static str> {
    E::field_table()
        .names()
        .find(|declared| *declared == name)
        .ok_or_else(|| StoreError::UnknownField(name.to_string()))
}

/// Parses a filter value once, before any record is read.
///
/// Pattern lookups on integer fields match the decimal text, so their
/// operand stays text.
fn parse_operand<E: Entity>(field: &str, lookup: Lookup, raw: &str) -> StoreResult<FieldValue> {
    let kind = match E::field_table().kind(field) {
        Some(FieldKind::Int) if is_pattern(lookup) => FieldKind::Text,
        Some(kind) => kind,
        None => return Err(StoreError::UnknownField(field.to_string())),
    };
    kind.parse(raw).ok_or_else(|| StoreError::InvalidValue {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

fn is_pattern(lookup: Lookup) -> bool {
    !matches!(
        lookup,
        Lookup::Exact | Lookup::IExact | Lookup::Gt | Lookup::Gte | Lookup::Lt | Lookup::Lte
    )
}

fn value_matches(actual: &FieldValue, lookup: Lookup, expected: &FieldValue) -> bool {
    let ordering = match (actual, expected) {
        // Null never matches a value lookup
        (FieldValue::Null, _) => return false,
        (FieldValue::Text(s), FieldValue::Text(e)) => match text_lookup(s, lookup, e) {
            Some(hit) => return hit,
            None => s.as_str().cmp(e.as_str()),
        },
        (FieldValue::Int(n), FieldValue::Text(e)) => {
            return text_lookup(&n.to_string(), lookup, e).unwrap_or(false)
        }
        (FieldValue::Int(n), FieldValue::Int(e)) => n.cmp(e),
        (FieldValue::Bool(b), FieldValue::Bool(e)) => b.cmp(e),
        // A getter disagreeing with its declared kind matches nothing
        _ => return false,
    };

    match lookup {
        Lookup::Gt => ordering == Ordering::Greater,
        Lookup::Gte => ordering != Ordering::Less,
        Lookup::Lt => ordering == Ordering::Less,
        Lookup::Lte => ordering != Ordering::Greater,
        // Pattern lookups on booleans compare like exact
        _ => ordering == Ordering::Equal,
    }
}

/// Evaluates string-only lookups; None for ordering lookups
fn text_lookup(actual: &str, lookup: Lookup, expected: &str) -> Option<bool> {
    let lower = || (actual.to_lowercase(), expected.to_lowercase());
    let hit = match lookup {
        Lookup::Exact => actual == expected,
        Lookup::IExact => {
            let (a, e) = lower();
            a == e
        }
        Lookup::Contains => actual.contains(expected),
        Lookup::IContains => {
            let (a, e) = lower();
            a.contains(&e)
        }
        Lookup::StartsWith => actual.starts_with(expected),
        Lookup::IStartsWith => {
            let (a, e) = lower();
            a.starts_with(&e)
        }
        Lookup::EndsWith => actual.ends_with(expected),
        Lookup::IEndsWith => {
            let (a, e) = lower();
            a.ends_with(&e)
        }
        Lookup::Gt | Lookup::Gte | Lookup::Lt | Lookup::Lte => return None,
    };
    Some(hit)
}
