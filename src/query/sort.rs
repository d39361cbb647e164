//! Sort resolution
//!
//! Reconciles a list of sort fields with a list of order tokens.
//!
//! # Alignment policies (strict order)
//!
//! 1. No sort fields: any order token is an error, otherwise no sorting
//! 2. Equal lengths: pairwise, in input order
//! 3. Exactly one token and several fields: the token applies to all
//! 4. Anything else is a size mismatch
//!
//! Token legality is only checked once a policy has accepted the lengths,
//! so a bad token never masks a size error and vice versa.

use std::fmt;

use super::errors::{QueryError, QueryResult};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parses an order token; only the exact lowercase tokens are accepted
    pub fn parse(token: &str) -> QueryResult<Self> {
        match token {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(QueryError::invalid_order_token(other)),
        }
    }
}

/// A single directional sort instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortClause {
    /// Field to sort by
    pub field: String,
    /// True for descending order
    pub descending: bool,
}

impl SortClause {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    /// Creates a clause from a parsed direction
    pub fn with_direction(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            descending: direction == SortDirection::Desc,
        }
    }
}

impl fmt::Display for SortClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.field)
        } else {
            write!(f, "{}", self.field)
        }
    }
}

/// Resolves sort fields and order tokens into sort clauses
pub struct SortResolver;

impl SortResolver {
    /// Produces clauses in precedence order, or a validation error
    pub fn resolve<F, T>(fields: &[F], tokens: &[T]) -> QueryResult<Vec<SortClause>>
    where
        F: AsRef<str>,
        T: AsRef<str>,
    {
        if fields.is_empty() {
            if !tokens.is_empty() {
                return Err(QueryError::unused_order(tokens.len()));
            }
            return Ok(Vec::new());
        }

        if fields.len() == tokens.len() {
            return fields
                .iter()
                .zip(tokens)
                .map(|(field, token)| {
                    let direction = SortDirection::parse(token.as_ref())?;
                    Ok(SortClause::with_direction(field.as_ref(), direction))
                })
                .collect();
        }

        if tokens.len() == 1 {
            let direction = SortDirection::parse(tokens[0].as_ref())?;
            return Ok(fields
                .iter()
                .map(|field| SortClause::with_direction(field.as_ref(), direction))
                .collect());
        }

        Err(QueryError::sort_order_size_mismatch(
            fields.len(),
            tokens.len(),
        ))
    }
}
