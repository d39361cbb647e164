//! Validated query specification

use super::errors::{QueryError, QueryResult};
use super::filter::{FilterBuilder, FilterSet};
use super::params::{split_list, QueryParams, DEFAULT_LIMIT, DEFAULT_OFFSET};
use super::sort::{SortClause, SortResolver};

/// Limits applied while building a [`QuerySpec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryDefaults {
    /// Page size when the request names none
    pub default_limit: i64,
    /// Largest page size a request may ask for (None = no cap)
    pub max_limit: Option<i64>,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: None,
        }
    }
}

/// A fully validated query.
///
/// Built once per request and immutable afterwards. A negative limit means
/// "no limit"; offset is never negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    filters: FilterSet,
    sorts: Vec<SortClause>,
    projection: Vec<String>,
    limit: i64,
    offset: i64,
}

impl QuerySpec {
    /// Validates raw parameters with default limits
    pub fn from_params(params: &QueryParams) -> QueryResult<Self> {
        Self::build(params, &QueryDefaults::default())
    }

    /// Validates raw parameters.
    ///
    /// Filters are parsed before sorts; the first failure is returned.
    pub fn build(params: &QueryParams, defaults: &QueryDefaults) -> QueryResult<Self> {
        let filters = FilterBuilder::parse(&params.query)?;
        let sorts = SortResolver::resolve(&split_list(&params.sortby), &split_list(&params.order))?;

        let limit = params.limit_or(defaults.default_limit);
        if let Some(max) = defaults.max_limit {
            if limit < 0 || limit > max {
                return Err(QueryError::limit_exceeded(limit, max));
            }
        }
        let offset = params.offset_or(DEFAULT_OFFSET).max(0);

        Ok(Self {
            filters,
            sorts,
            projection: params.field_list(),
            limit,
            offset,
        })
    }

    /// Returns a spec with no filters, no sorts, no projection
    pub fn all(limit: i64, offset: i64) -> Self {
        Self {
            filters: FilterSet::new(),
            sorts: Vec::new(),
            projection: Vec::new(),
            limit,
            offset: offset.max(0),
        }
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn sorts(&self) -> &[SortClause] {
        &self.sorts
    }

    /// Requested fields (empty = all fields)
    pub fn projection(&self) -> &[String] {
        &self.projection
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Returns true if the result should be projected
    pub fn is_projected(&self) -> bool {
        !self.projection.is_empty()
    }
}
