//! Filter clause building
//!
//! Converts a flat `key:value,key:value` condition string into normalized
//! clauses. Dotted keys are rewritten to the canonical `__` separator and
//! keys carrying the `isnull` marker become boolean null checks.

use std::collections::BTreeMap;

use super::errors::{QueryError, QueryResult};

/// Canonical nested-path separator
pub const PATH_SEPARATOR: &str = "__";

/// Marker substring that turns a condition into a null check
pub const NULL_CHECK_MARKER: &str = "isnull";

/// A single normalized filter clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterClause {
    /// `path = value`
    Equals { path: String, value: String },
    /// Null test; `is_null` is true when the field must be null
    NullCheck { path: String, is_null: bool },
}

impl FilterClause {
    /// Returns the canonical path
    pub fn path(&self) -> &str {
        match self {
            FilterClause::Equals { path, .. } | FilterClause::NullCheck { path, .. } => path,
        }
    }

    /// Returns true for null-check clauses
    pub fn is_null_check(&self) -> bool {
        matches!(self, FilterClause::NullCheck { .. })
    }
}

/// Conjunctive set of filter clauses keyed by canonical path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    clauses: BTreeMap<String, FilterClause>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a clause; an existing clause on the same path is replaced
    pub fn insert(&mut self, clause: FilterClause) {
        self.clauses.insert(clause.path().to_string(), clause);
    }

    /// Returns the clause on a canonical path
    pub fn get(&self, path: &str) -> Option<&FilterClause> {
        self.clauses.get(path)
    }

    /// Iterates clauses in path order
    pub fn iter(&self) -> impl Iterator<Item = &FilterClause> {
        self.clauses.values()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Parses raw condition strings into a [`FilterSet`]
pub struct FilterBuilder;

impl FilterBuilder {
    /// Parses `key:value` conditions separated by commas.
    ///
    /// Each condition splits on its first colon only, so values may contain
    /// colons. An empty input yields an empty set.
    pub fn parse(raw: &str) -> QueryResult<FilterSet> {
        let mut set = FilterSet::new();
        if raw.is_empty() {
            return Ok(set);
        }

        for condition in raw.split(',') {
            let (key, value) = condition
                .split_once(':')
                .ok_or_else(|| QueryError::malformed_filter(condition))?;
            set.insert(Self::clause(key, value));
        }

        Ok(set)
    }

    /// Builds one clause from a raw key and value
    pub fn clause(key: &str, value: &str) -> FilterClause {
        let path = canonical_path(key);
        if path.contains(NULL_CHECK_MARKER) {
            FilterClause::NullCheck {
                path,
                is_null: value == "true" || value == "1",
            }
        } else {
            FilterClause::Equals {
                path,
                value: value.to_string(),
            }
        }
    }
}

/// Rewrites dot-notation to the canonical separator
pub fn canonical_path(key: &str) -> String {
    key.replace('.', PATH_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryErrorCode;

    #[test]
    fn test_two_equality_clauses() {
        let set = FilterBuilder::parse("name:doe,age:30").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.get("name"),
            Some(&FilterClause::Equals {
                path: "name".into(),
                value: "doe".into()
            })
        );
        assert_eq!(
            set.get("age"),
            Some(&FilterClause::Equals {
                path: "age".into(),
                value: "30".into()
            })
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(FilterBuilder::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_value_keeps_extra_colons() {
        let set = FilterBuilder::parse("content:http://x:80").unwrap();
        assert_eq!(
            set.get("content"),
            Some(&FilterClause::Equals {
                path: "content".into(),
                value: "http://x:80".into()
            })
        );
    }

    #[test]
    fn test_empty_value_allowed() {
        let set = FilterBuilder::parse("poster:").unwrap();
        assert_eq!(
            set.get("poster"),
            Some(&FilterClause::Equals {
                path: "poster".into(),
                value: String::new()
            })
        );
    }

    #[test]
    fn test_missing_colon_rejected() {
        let err = FilterBuilder::parse("name:doe,age").unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::PasteMalformedFilter);
        assert_eq!(err.input(), Some("age"));
    }

    #[test]
    fn test_trailing_comma_rejected() {
        let err = FilterBuilder::parse("name:doe,").unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::PasteMalformedFilter);
    }

    #[test]
    fn test_dotted_null_check() {
        let set = FilterBuilder::parse("a.b.isnull:true").unwrap();
        assert_eq!(
            set.get("a__b__isnull"),
            Some(&FilterClause::NullCheck {
                path: "a__b__isnull".into(),
                is_null: true
            })
        );
    }

    #[test]
    fn test_null_check_value_coercion() {
        let clause = |v| FilterBuilder::clause("a.b.isnull", v);

        assert_eq!(
            clause("1"),
            FilterClause::NullCheck {
                path: "a__b__isnull".into(),
                is_null: true
            }
        );
        for v in ["yes", "false", "0", "TRUE", ""] {
            assert_eq!(
                clause(v),
                FilterClause::NullCheck {
                    path: "a__b__isnull".into(),
                    is_null: false
                }
            );
        }
    }

    #[test]
    fn test_marker_matches_as_substring() {
        // A bare key named after the marker, and a key merely containing it,
        // are both null checks.
        assert!(FilterBuilder::clause("isnull", "x").is_null_check());
        assert!(FilterBuilder::clause("myisnullfield", "true").is_null_check());
        assert!(!FilterBuilder::clause("is.null", "true").is_null_check());
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let set = FilterBuilder::parse("syntax:go,syntax:rust").unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.get("syntax"),
            Some(&FilterClause::Equals {
                path: "syntax".into(),
                value: "rust".into()
            })
        );
    }

    #[test]
    fn test_dotted_and_canonical_keys_collide() {
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
}
