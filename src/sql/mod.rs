//! SQL generation module.
//!
//! This module provides an immutable, composable SQL builder that renders to
//! multiple dialects. It includes:
//!
//! - [`query`] - SELECT/INSERT/UPDATE/DELETE builder, joins and set operations
//! - [`expr`] - Term tree and builder DSL
//! - [`table`] - Tables, schemas and FROM sources
//! - [`functions`] - Named function constructors
//! - [`ddl`] - CREATE TABLE and DROP TABLE
//! - [`load`] - MySQL LOAD DATA
//! - [`context`] - Render context
//! - [`param`] - Bind parameter capture
//! - [`token`] - Token types for SQL generation
//! - [`dialect`] - SQL dialect implementations

pub mod context;
pub mod ddl;
pub mod dialect;
pub mod error;
pub mod expr;
pub mod functions;
pub mod load;
pub mod param;
pub mod query;
pub mod table;
pub mod token;
pub mod value;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types at the sql module level
pub use context::{ContextOverrides, RenderContext};
pub use ddl::{make_columns, Column, CreateQueryBuilder, DropQueryBuilder, PeriodFor};
pub use dialect::{Dialect, SqlDialect};
pub use error::{QueryError, QueryResult};
pub use expr::{
    not_, Case, ColumnRef, CustomFunction, Edge, Function, Interval, Order, Term, TermExt,
};
pub use load::LoadQueryBuilder;
pub use param::{Parameter, Parameterizer};
pub use query::{
    ForUpdate, Join, JoinType, MsSqlQuery, MySqlQuery, OracleQuery, PostgresQuery, Query,
    QueryBuilder, SetOperation, SetOperator, SqliteQuery,
};
pub use table::{make_tables, Database, Schema, Selectable, Table};
pub use token::{Node, Token, TokenStream};
pub use value::{DatePart, Value};
