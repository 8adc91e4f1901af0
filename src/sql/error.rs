//! Error types for query construction and rendering.
//!
//! Every error here is a usage error: a builder was asked to do something
//! that cannot produce valid SQL. They are raised immediately and carry a
//! message suitable for showing to the programmer.

use thiserror::Error;

use super::dialect::Dialect;

/// Result type for builder and render operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised while building or rendering a statement.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// Statement shape is invalid (verb conflicts, set-once attributes, bad literals).
    #[error("{0}")]
    Query(String),

    /// GROUP BY misuse.
    #[error("{0}")]
    Grouping(String),

    /// CASE expression without any WHEN clause.
    #[error("{0}")]
    Case(String),

    /// Join is missing its criterion or references tables that are not in scope.
    #[error("{0}")]
    Join(String),

    /// Set operation between queries with different projection arity.
    #[error("{0}")]
    SetOperation(String),

    /// ROLLUP requested without any grouping terms.
    #[error("{0}")]
    Rollup(String),

    /// Feature requested on a dialect that has no syntax for it.
    #[error("{feature} is not supported by the {dialect} dialect")]
    DialectNotSupported {
        dialect: Dialect,
        feature: &'static str,
    },

    /// Custom function called with the wrong number of arguments.
    #[error("{0}")]
    Function(String),

    /// Invalid bind parameter definition.
    #[error("{0}")]
    Parameter(String),
}

impl QueryError {
    pub(crate) fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }

    /// Error for an attribute that can only be set once, or not at all in the current state.
    pub(crate) fn no_attribute(attribute: &str) -> Self {
        Self::Query(format!("'Query' object has no attribute '{attribute}'"))
    }

    pub(crate) fn already_set(attribute: &str) -> Self {
        Self::Query(format!("'Query' object already has attribute {attribute}"))
    }

    pub(crate) fn unsupported(dialect: Dialect, feature: &'static str) -> Self {
        Self::DialectNotSupported { dialect, feature }
    }
}
