//! # quarry
//!
//! An immutable, composable SQL query builder that renders to multiple
//! SQL dialects.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        Builders (QueryBuilder, Create/Drop, Load)        │
//! │   (select, join, where, group, order, set operations)    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [term tree]
//! ┌─────────────────────────────────────────────────────────┐
//! │          Terms (fields, values, criteria, functions)     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [to_tokens + RenderContext]
//! ┌─────────────────────────────────────────────────────────┐
//! │          TokenStream (+ captured bind parameters)        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [serialize per dialect]
//! ┌─────────────────────────────────────────────────────────┐
//! │                       SQL text                           │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use quarry::prelude::*;
//!
//! let users = Table::new("users");
//! let q = PostgresQuery::from_(users.clone())
//!     .select([users.field("id"), users.field("name")])
//!     .unwrap()
//!     .where_(users.field("age").gte(18))
//!     .unwrap()
//!     .limit(10);
//!
//! assert_eq!(
//!     q.to_sql().unwrap(),
//!     "SELECT \"id\",\"name\" FROM \"users\" WHERE \"age\">=18 LIMIT 10"
//! );
//! ```

pub mod config;
pub mod sql;

// Re-export SQL submodules at crate level
pub use sql::ddl;
pub use sql::dialect;
pub use sql::expr;
pub use sql::functions;
pub use sql::query;
pub use sql::token;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::Settings;
    pub use crate::sql::context::RenderContext;
    pub use crate::sql::ddl::{Column, PeriodFor};
    pub use crate::sql::dialect::{Dialect, SqlDialect};
    pub use crate::sql::error::{QueryError, QueryResult};
    pub use crate::sql::expr::{
        not_, Case, CustomFunction, Edge, Function, Interval, Order, Term, TermExt,
    };
    pub use crate::sql::functions;
    pub use crate::sql::param::{Parameter, Parameterizer};
    pub use crate::sql::query::{
        ForUpdate, JoinType, MsSqlQuery, MySqlQuery, OracleQuery, PostgresQuery, Query,
        QueryBuilder, SqliteQuery,
    };
    pub use crate::sql::table::{Schema, Selectable, Table};
    pub use crate::sql::token::Node;
    pub use crate::sql::value::{DatePart, Value};
}

// Also export at crate root for convenience
pub use dialect::Dialect;
pub use query::{Query, QueryBuilder};
pub use sql::{QueryError, QueryResult, RenderContext, Table, Term};
