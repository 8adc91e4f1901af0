//! SQL Dialect definitions and formatting rules.
//!
//! This module provides a trait-based abstraction for SQL dialect differences.
//! Each dialect implements `SqlDialect` and overrides only the rendering steps
//! where it departs from the generic behavior:
//!
//! - Default quoting: `"` (generic/PG/Oracle/MSSQL/SQLite), `` ` `` (MySQL)
//! - Pagination: LIMIT/OFFSET vs OFFSET ... FETCH NEXT
//! - Boolean literals: true/false vs 1/0
//! - Placeholders: `?`, `%s`, `$1`
//! - JSON path access, interval templates, UPDATE and upsert layout
//!
//! # Usage
//!
//! ```
//! use quarry::sql::dialect::{Dialect, SqlDialect};
//!
//! let dialect = Dialect::Postgres;
//! assert_eq!(dialect.placeholder(2), "$2");
//! ```
//!
//! # Feature Support
//!
//! | Feature | Generic | MySQL | PostgreSQL | Oracle | MSSQL | SQLite |
//! |---------|---------|-------|------------|--------|-------|--------|
//! | RETURNING | ❌ | ❌ | ✓ | ❌ | ❌ | ❌ |
//! | DISTINCT ON | ❌ | ❌ | ✓ | ❌ | ❌ | ❌ |
//! | TOP | ❌ | ❌ | ❌ | ❌ | ✓ | ❌ |
//! | SELECT modifiers | ❌ | ✓ | ❌ | ❌ | ❌ | ❌ |
//! | FOR NO KEY UPDATE | ❌ | ❌ | ✓ | ❌ | ❌ | ❌ |
//! | GROUP BY alias | ✓ | ✓ | ✓ | ❌ | ❌ | ✓ |
//!
//! Builders check the feature flags (e.g. `supports_returning()`) and raise
//! `QueryError::DialectNotSupported` instead of emitting invalid SQL.

mod generic;
pub mod helpers;
mod mssql;
mod mysql;
mod oracle;
mod postgres;
mod sqlite;

pub use generic::Generic;
pub use mssql::MsSql;
pub use mysql::MySql;
pub use oracle::Oracle;
pub use postgres::Postgres;
pub use sqlite::Sqlite;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::expr::JsonPathStep;
use super::token::{Token, TokenStream};

/// Layout of an UPDATE statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateLayout {
    /// `UPDATE t [JOIN ..] SET .. [FROM ..] [WHERE ..]`
    Standard,
    /// Standard, followed by `ORDER BY` and `LIMIT`.
    TrailingOrderLimit,
    /// `UPDATE t SET .. [FROM .., t "t_"] [JOIN ..] [WHERE ..] [ORDER BY ..] [LIMIT ..]`
    FromAfterSet,
}

/// Upsert syntax used by INSERT statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictStyle {
    /// `ON CONFLICT (..) DO NOTHING | DO UPDATE SET ..`
    OnConflict,
    /// `INSERT IGNORE` and `ON DUPLICATE KEY UPDATE ..`
    OnDuplicateKey,
}

/// SQL dialect trait - defines how SQL constructs are rendered.
///
/// Implementations handle dialect-specific syntax differences.
/// The default implementations follow the generic dialect.
pub trait SqlDialect: std::fmt::Debug + Send + Sync {
    /// Dialect name for display/logging.
    fn name(&self) -> &'static str;

    // =========================================================================
    // Default Context
    // =========================================================================

    /// Identifier quote character of the default render context.
    fn quote_char(&self) -> &'static str {
        "\""
    }

    /// Alias quote character of the default render context.
    ///
    /// Empty means aliases are quoted with `quote_char`.
    fn alias_quote_char(&self) -> &'static str {
        ""
    }

    /// Whether GROUP BY may reference a SELECT alias.
    ///
    /// - Oracle/MSSQL: false (the full select expression is repeated)
    fn supports_groupby_alias(&self) -> bool {
        true
    }

    // =========================================================================
    // Literals and Placeholders
    // =========================================================================

    /// Format a boolean value.
    ///
    /// - Generic/PostgreSQL/MySQL: `true`/`false`
    /// - SQLite: `1`/`0`
    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_literal(b)
    }

    /// Escape the body of a string literal quoted with `quote`.
    fn escape_string(&self, s: &str, quote: &str) -> String {
        helpers::escape_quote_doubling(s, quote)
    }

    /// Escape the JSON text of a dict/list literal after quoting.
    fn escape_json(&self, json: &str) -> String {
        json.to_string()
    }

    /// Positional placeholder for the 1-based bind index.
    ///
    /// - Generic/Oracle/MSSQL/SQLite: `?`
    /// - MySQL: `%s`
    /// - PostgreSQL: `$1`, `$2`, ...
    fn placeholder(&self, _idx: usize) -> String {
        "?".into()
    }

    // =========================================================================
    // Terms
    // =========================================================================

    /// Emit an array literal from its rendered items.
    ///
    /// - Default: `[a,b]`
    /// - PostgreSQL: `ARRAY[a,b]`, or `'{}'` when empty
    fn emit_array(&self, items: Vec<TokenStream>) -> TokenStream {
        let mut ts = TokenStream::new();
        ts.push(Token::LBracket)
            .append(&TokenStream::join(items, Token::Comma))
            .push(Token::RBracket);
        ts
    }

    /// Render an INTERVAL literal from its expression and unit label.
    fn format_interval(&self, expr: &str, unit: &str) -> String {
        helpers::interval_quoted_expr_and_unit(expr, unit)
    }

    /// Emit JSON path access on a rendered column.
    fn emit_json_path(&self, column: TokenStream, path: &[JsonPathStep]) -> TokenStream {
        helpers::json_path_arrows(column, path)
    }

    /// Remap a function name for this dialect.
    ///
    /// Returns `Some(new_name)` if the function should be renamed,
    /// or `None` to use the original name.
    fn remap_function(&self, _name: &str) -> Option<&'static str> {
        None
    }

    // =========================================================================
    // Statement Structure
    // =========================================================================

    /// Whether set-operation members are wrapped in parentheses.
    fn wrap_set_operation_queries(&self) -> bool {
        true
    }

    /// Whether the OFFSET value is rendered (and parameterized) before LIMIT.
    fn offset_before_limit(&self) -> bool {
        false
    }

    /// Emit LIMIT/OFFSET or equivalent pagination clause, leading space included.
    ///
    /// - Generic/PostgreSQL/MySQL/SQLite: ` LIMIT n OFFSET m` (default)
    /// - MSSQL/Oracle: ` OFFSET m ROWS FETCH NEXT n ROWS ONLY`
    fn emit_limit_offset(
        &self,
        limit: Option<TokenStream>,
        offset: Option<TokenStream>,
        _has_order_by: bool,
    ) -> TokenStream {
        helpers::emit_limit_offset_standard(limit, offset)
    }

    /// Layout of UPDATE statements.
    fn update_layout(&self) -> UpdateLayout {
        UpdateLayout::Standard
    }

    /// Upsert syntax.
    fn conflict_style(&self) -> ConflictStyle {
        ConflictStyle::OnConflict
    }

    // =========================================================================
    // Feature Flags
    // =========================================================================

    /// Whether the dialect supports `RETURNING`.
    fn supports_returning(&self) -> bool {
        false
    }

    /// Whether the dialect supports `SELECT DISTINCT ON (...)`.
    fn supports_distinct_on(&self) -> bool {
        false
    }

    /// Whether the dialect supports `SELECT TOP (n)`.
    fn supports_top(&self) -> bool {
        false
    }

    /// Whether the dialect supports SELECT modifiers such as `SQL_CALC_FOUND_ROWS`.
    fn supports_select_modifiers(&self) -> bool {
        false
    }

    /// Whether the dialect supports `FOR NO KEY UPDATE`.
    fn supports_no_key_update(&self) -> bool {
        false
    }
}

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Generic,
    #[serde(alias = "my_sql")]
    MySql,
    #[serde(alias = "postgresql")]
    Postgres,
    Oracle,
    #[serde(alias = "ms_sql")]
    MsSql,
    Sqlite,
}

impl Dialect {
    /// All dialects, in declaration order.
    pub const ALL: [Dialect; 6] = [
        Dialect::Generic,
        Dialect::MySql,
        Dialect::Postgres,
        Dialect::Oracle,
        Dialect::MsSql,
        Dialect::Sqlite,
    ];

    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::Generic => &Generic,
            Dialect::MySql => &MySql,
            Dialect::Postgres => &Postgres,
            Dialect::Oracle => &Oracle,
            Dialect::MsSql => &MsSql,
            Dialect::Sqlite => &Sqlite,
        }
    }
}

// Implement SqlDialect for Dialect enum by delegating to concrete types
impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn quote_char(&self) -> &'static str {
        self.dialect().quote_char()
    }

    fn alias_quote_char(&self) -> &'static str {
        self.dialect().alias_quote_char()
    }

    fn supports_groupby_alias(&self) -> bool {
        self.dialect().supports_groupby_alias()
    }

    fn format_bool(&self, b: bool) -> &'static str {
        self.dialect().format_bool(b)
    }

    fn escape_string(&self, s: &str, quote: &str) -> String {
        self.dialect().escape_string(s, quote)
    }

    fn escape_json(&self, json: &str) -> String {
        self.dialect().escape_json(json)
    }

    fn placeholder(&self, idx: usize) -> String {
        self.dialect().placeholder(idx)
    }

    fn emit_array(&self, items: Vec<TokenStream>) -> TokenStream {
        self.dialect().emit_array(items)
    }

    fn format_interval(&self, expr: &str, unit: &str) -> String {
        self.dialect().format_interval(expr, unit)
    }

    fn emit_json_path(&self, column: TokenStream, path: &[JsonPathStep]) -> TokenStream {
        self.dialect().emit_json_path(column, path)
    }

    fn remap_function(&self, name: &str) -> Option<&'static str> {
        self.dialect().remap_function(name)
    }

    fn wrap_set_operation_queries(&self) -> bool {
        self.dialect().wrap_set_operation_queries()
    }

    fn offset_before_limit(&self) -> bool {
        self.dialect().offset_before_limit()
    }

    fn emit_limit_offset(
        &self,
        limit: Option<TokenStream>,
        offset: Option<TokenStream>,
        has_order_by: bool,
    ) -> TokenStream {
        self.dialect().emit_limit_offset(limit, offset, has_order_by)
    }

    fn update_layout(&self) -> UpdateLayout {
        self.dialect().update_layout()
    }

    fn conflict_style(&self) -> ConflictStyle {
        self.dialect().conflict_style()
    }

    fn supports_returning(&self) -> bool {
        self.dialect().supports_returning()
    }

    fn supports_distinct_on(&self) -> bool {
        self.dialect().supports_distinct_on()
    }

    fn supports_top(&self) -> bool {
        self.dialect().supports_top()
    }

    fn supports_select_modifiers(&self) -> bool {
        self.dialect().supports_select_modifiers()
    }

    fn supports_no_key_update(&self) -> bool {
        self.dialect().supports_no_key_update()
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dialect().name())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "generic" | "default" => Ok(Dialect::Generic),
            "mysql" => Ok(Dialect::MySql),
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "oracle" => Ok(Dialect::Oracle),
            "mssql" | "sqlserver" => Ok(Dialect::MsSql),
            "sqlite" => Ok(Dialect::Sqlite),
            other => Err(format!("unknown dialect '{other}'")),
        }
    }
}
