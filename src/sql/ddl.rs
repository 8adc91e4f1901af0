//! DDL (Data Definition Language) support.
//!
//! Builders for `CREATE TABLE` and `DROP TABLE`. Like the query builder they
//! consume and return themselves, and render to an empty string until the
//! statement has enough state to be valid.
//!
//! # Examples
//!
//! ```
//! use quarry::sql::ddl::Column;
//! use quarry::sql::query::Query;
//!
//! let create = Query::create_table("users")
//!     .unwrap()
//!     .columns([
//!         Column::new("id").with_type("INT").nullable(false),
//!         Column::new("name").with_type("VARCHAR(255)"),
//!     ])
//!     .unwrap()
//!     .primary_key(["id"])
//!     .unwrap();
//!
//! assert_eq!(
//!     create.to_sql().unwrap(),
//!     "CREATE TABLE \"users\" (\"id\" INT NOT NULL,\"name\" VARCHAR(255),PRIMARY KEY (\"id\"))"
//! );
//! ```

use super::context::RenderContext;
use super::dialect::Dialect;
use super::error::{QueryError, QueryResult};
use super::expr::Term;
use super::query::QueryBuilder;
use super::table::Table;
use super::token::{Node, Token, TokenStream};

// ============================================================================
// Column Definition
// ============================================================================

/// Column definition for CREATE TABLE.
#[derive(Debug, Clone)]
#[must_use = "builders have no effect until used"]
pub struct Column {
    pub name: String,
    pub column_type: Option<String>,
    /// `Some(true)` renders `NULL`, `Some(false)` renders `NOT NULL`.
    pub nullable: Option<bool>,
    pub default: Option<Term>,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: None,
            nullable: None,
            default: None,
        }
    }

    /// Raw type text, e.g. `VARCHAR(255)`.
    pub fn with_type(mut self, column_type: impl Into<String>) -> Self {
        self.column_type = Some(column_type.into());
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    /// Default value. Plain values are wrapped as constants.
    pub fn default(mut self, value: impl Into<Term>) -> Self {
        self.default = Some(value.into());
        self
    }

    fn name_tokens(&self) -> TokenStream {
        TokenStream::from(Token::Ident(self.name.clone()))
    }
}

impl Node for Column {
    fn to_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let mut ts = self.name_tokens();
        if let Some(column_type) = &self.column_type {
            ts.space().raw(column_type.clone());
        }
        match self.nullable {
            Some(true) => {
                ts.space().push(Token::Null);
            }
            Some(false) => {
                ts.space().push(Token::Not).space().push(Token::Null);
            }
            None => {}
        }
        if let Some(default) = &self.default {
            ts.space()
                .push(Token::Default)
                .space()
                .append(&default.to_tokens(ctx)?);
        }
        Ok(ts)
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Column::new(name)
    }
}

impl From<String> for Column {
    fn from(name: String) -> Self {
        Column::new(name)
    }
}

/// `(name, type)`
impl From<(&str, &str)> for Column {
    fn from((name, column_type): (&str, &str)) -> Self {
        Column::new(name).with_type(column_type)
    }
}

/// Build several columns from names or `(name, type)` pairs.
pub fn make_columns<I, C>(specs: I) -> Vec<Column>
where
    I: IntoIterator<Item = C>,
    C: Into<Column>,
{
    specs.into_iter().map(Into::into).collect()
}

/// `PERIOD FOR name (start, end)` for system-versioned tables.
#[derive(Debug, Clone)]
pub struct PeriodFor {
    pub name: String,
    pub start_column: Column,
    pub end_column: Column,
}

impl PeriodFor {
    pub fn new(
        name: impl Into<String>,
        start_column: impl Into<Column>,
        end_column: impl Into<Column>,
    ) -> Self {
        Self {
            name: name.into(),
            start_column: start_column.into(),
            end_column: end_column.into(),
        }
    }
}

impl Node for PeriodFor {
    fn to_tokens(&self, _ctx: &RenderContext) -> QueryResult<TokenStream> {
        let mut ts = TokenStream::new();
        ts.push(Token::Period)
            .space()
            .push(Token::For)
            .space()
            .push(Token::Ident(self.name.clone()))
            .space()
            .lparen()
            .append(&self.start_column.name_tokens())
            .comma()
            .append(&self.end_column.name_tokens())
            .rparen();
        Ok(ts)
    }
}

fn column_names(columns: &[Column]) -> TokenStream {
    let mut ts = TokenStream::join(columns.iter().map(Column::name_tokens), Token::Comma);
    ts.parenthesize();
    ts
}

// ============================================================================
// CREATE TABLE
// ============================================================================

/// CREATE TABLE statement.
#[derive(Debug, Clone)]
#[must_use = "DDL statements have no effect until converted to SQL with to_sql()"]
pub struct CreateQueryBuilder {
    dialect: Dialect,
    table: Option<Table>,
    temporary: bool,
    unlogged: bool,
    if_not_exists: bool,
    with_system_versioning: bool,
    columns: Vec<Column>,
    period_fors: Vec<PeriodFor>,
    uniques: Vec<Vec<Column>>,
    primary_key: Vec<Column>,
    as_select: Option<Box<QueryBuilder>>,
}

impl CreateQueryBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            table: None,
            temporary: false,
            unlogged: false,
            if_not_exists: false,
            with_system_versioning: false,
            columns: Vec::new(),
            period_fors: Vec::new(),
            uniques: Vec::new(),
            primary_key: Vec::new(),
            as_select: None,
        }
    }

    /// Set the table to create. May only be called once.
    pub fn create_table(mut self, table: impl Into<Table>) -> QueryResult<Self> {
        if self.table.is_some() {
            return Err(QueryError::already_set("create_table"));
        }
        self.table = Some(table.into());
        Ok(self)
    }

    /// `CREATE TEMPORARY TABLE`. Takes precedence over [`CreateQueryBuilder::unlogged`].
    pub fn temporary(mut self) -> Self {
        self.temporary = true;
        self
    }

    /// `CREATE UNLOGGED TABLE` (PostgreSQL).
    pub fn unlogged(mut self) -> Self {
        self.unlogged = true;
        self
    }

    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    pub fn with_system_versioning(mut self) -> Self {
        self.with_system_versioning = true;
        self
    }

    /// Add column definitions. Not allowed once [`CreateQueryBuilder::as_select`] is set.
    pub fn columns<I, C>(mut self, columns: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        if self.as_select.is_some() {
            return Err(QueryError::already_set("as_select"));
        }
        self.columns.extend(columns.into_iter().map(Into::into));
        Ok(self)
    }

    pub fn period_for(
        mut self,
        name: impl Into<String>,
        start_column: impl Into<Column>,
        end_column: impl Into<Column>,
    ) -> Self {
        self.period_fors
            .push(PeriodFor::new(name, start_column, end_column));
        self
    }

    /// Add a `UNIQUE (..)` constraint. Each call adds a separate constraint.
    pub fn unique<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        self.uniques.push(make_columns(columns));
        self
    }

    /// Set the `PRIMARY KEY (..)` constraint. May only be called once.
    pub fn primary_key<I, C>(mut self, columns: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        if !self.primary_key.is_empty() {
            return Err(QueryError::already_set("primary_key"));
        }
        self.primary_key = make_columns(columns);
        Ok(self)
    }

    /// `CREATE TABLE t AS (query)`. Not allowed once columns are defined.
    pub fn as_select(mut self, query: QueryBuilder) -> QueryResult<Self> {
        if !self.columns.is_empty() {
            return Err(QueryError::already_set("columns"));
        }
        self.as_select = Some(Box::new(query));
        Ok(self)
    }

    /// Render with this builder's dialect defaults.
    pub fn to_sql(&self) -> QueryResult<String> {
        self.render(&RenderContext::for_dialect(self.dialect))
    }

    fn body_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let mut clauses = Vec::new();
        for column in &self.columns {
            clauses.push(column.to_tokens(ctx)?);
        }
        for period in &self.period_fors {
            clauses.push(period.to_tokens(ctx)?);
        }
        for unique in &self.uniques {
            let mut ts = TokenStream::from(Token::Unique);
            ts.space().append(&column_names(unique));
            clauses.push(ts);
        }
        if !self.primary_key.is_empty() {
            let mut ts = TokenStream::from(Token::Primary);
            ts.space()
                .push(Token::Key)
                .space()
                .append(&column_names(&self.primary_key));
            clauses.push(ts);
        }
        Ok(TokenStream::join(clauses, Token::Comma))
    }
}

impl Node for CreateQueryBuilder {
    fn to_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let mut ts = TokenStream::new();
        let Some(table) = &self.table else {
            return Ok(ts);
        };
        if self.columns.is_empty() && self.as_select.is_none() {
            return Ok(ts);
        }

        ts.push(Token::Create).space();
        if self.temporary {
            ts.push(Token::Temporary).space();
        } else if self.unlogged {
            ts.push(Token::Unlogged).space();
        }
        ts.push(Token::Table).space();
        if self.if_not_exists {
            ts.push(Token::If)
                .space()
                .push(Token::Not)
                .space()
                .push(Token::Exists)
                .space();
        }
        ts.append(&table.to_tokens(ctx)?);

        if let Some(query) = &self.as_select {
            ts.space()
                .push(Token::As)
                .space()
                .lparen()
                .append(&query.to_tokens(&ctx.subquery(false).with_alias(false))?)
                .rparen();
            return Ok(ts);
        }

        ts.space().lparen().append(&self.body_tokens(ctx)?).rparen();
        if self.with_system_versioning {
            ts.space()
                .push(Token::With)
                .space()
                .push(Token::SystemVersioning);
        }
        Ok(ts)
    }
}

// ============================================================================
// DROP TABLE
// ============================================================================

/// DROP TABLE statement.
#[derive(Debug, Clone)]
#[must_use = "DDL statements have no effect until converted to SQL with to_sql()"]
pub struct DropQueryBuilder {
    dialect: Dialect,
    table: Option<Table>,
    if_exists: bool,
}

impl DropQueryBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            table: None,
            if_exists: false,
        }
    }

    /// Set the table to drop. May only be called once.
    pub fn drop_table(mut self, table: impl Into<Table>) -> QueryResult<Self> {
        if self.table.is_some() {
            return Err(QueryError::already_set("drop_table"));
        }
        self.table = Some(table.into());
        Ok(self)
    }

    pub fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    pub fn to_sql(&self) -> QueryResult<String> {
        self.render(&RenderContext::for_dialect(self.dialect))
    }
}

impl Node for DropQueryBuilder {
    fn to_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let mut ts = TokenStream::new();
        let Some(table) = &self.table else {
            return Ok(ts);
        };
        ts.push(Token::Drop).space().push(Token::Table).space();
        if self.if_exists {
            ts.push(Token::If).space().push(Token::Exists).space();
        }
        ts.append(&table.to_tokens(ctx)?);
        Ok(ts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::query::{MySqlQuery, PostgresQuery, Query};

    #[test]
    fn test_column_rendering() {
        let ctx = RenderContext::default();
        assert_eq!(Column::new("a").render(&ctx).unwrap(), "\"a\"");
        assert_eq!(
            Column::new("a")
                .with_type("INT")
                .nullable(false)
                .default(0)
                .render(&ctx)
                .unwrap(),
            "\"a\" INT NOT NULL DEFAULT 0"
        );
        assert_eq!(
            Column::new("b").nullable(true).default("x").render(&ctx).unwrap(),
            "\"b\" NULL DEFAULT 'x'"
        );
    }

    #[test]
    fn test_create_table_variants() {
        let q = Query::create_table("abc")
            .unwrap()
            .temporary()
            .if_not_exists()
            .columns(make_columns([("a", "INT"), ("b", "TEXT")]))
            .unwrap();
        assert_eq!(
            q.to_sql().unwrap(),
            "CREATE TEMPORARY TABLE IF NOT EXISTS \"abc\" (\"a\" INT,\"b\" TEXT)"
        );

        let q = PostgresQuery::create_table("abc")
            .unwrap()
            .unlogged()
            .columns(["a"])
            .unwrap();
        assert_eq!(q.to_sql().unwrap(), "CREATE UNLOGGED TABLE \"abc\" (\"a\")");
    }

    #[test]
    fn test_create_table_constraints_and_periods() {
        let q = Query::create_table("abc")
            .unwrap()
            .columns([("id", "INT"), ("start", "DATE"), ("end", "DATE")])
            .unwrap()
            .period_for("valid", "start", "end")
            .unique(["start", "end"])
            .primary_key(["id"])
            .unwrap()
            .with_system_versioning();
        assert_eq!(
            q.to_sql().unwrap(),
            "CREATE TABLE \"abc\" (\"id\" INT,\"start\" DATE,\"end\" DATE,\
             PERIOD FOR \"valid\" (\"start\",\"end\"),UNIQUE (\"start\",\"end\"),\
             PRIMARY KEY (\"id\")) WITH SYSTEM VERSIONING"
        );
    }

    #[test]
    fn test_create_table_as_select() {
        let select = MySqlQuery::from_("def").select(["a"]).unwrap();
        let q = MySqlQuery::create_table("abc").unwrap().as_select(select).unwrap();
        assert_eq!(
            q.to_sql().unwrap(),
            "CREATE TABLE `abc` AS (SELECT `a` FROM `def`)"
        );
    }

    #[test]
    fn test_create_table_errors_and_empty() {
        assert_eq!(CreateQueryBuilder::new(Dialect::Generic).to_sql().unwrap(), "");
        assert_eq!(Query::create_table("abc").unwrap().to_sql().unwrap(), "");

        let err = Query::create_table("abc").unwrap().create_table("def").unwrap_err();
        assert_eq!(err.to_string(), "'Query' object already has attribute create_table");

        let select = Query::from_("def").select(["a"]).unwrap();
        let err = Query::create_table("abc")
            .unwrap()
            .columns(["a"])
            .unwrap()
            .as_select(select.clone())
            .unwrap_err();
        assert_eq!(err.to_string(), "'Query' object already has attribute columns");

        let err = Query::create_table("abc")
            .unwrap()
            .as_select(select)
            .unwrap()
            .columns(["a"])
            .unwrap_err();
        assert_eq!(err.to_string(), "'Query' object already has attribute as_select");

        let err = Query::create_table("abc")
            .unwrap()
            .primary_key(["a"])
            .unwrap()
            .primary_key(["b"])
            .unwrap_err();
        assert_eq!(err.to_string(), "'Query' object already has attribute primary_key");
    }

    #[test]
    fn test_drop_table() {
        let q = Query::drop_table("abc").unwrap();
        assert_eq!(q.to_sql().unwrap(), "DROP TABLE \"abc\"");
        let q = MySqlQuery::drop_table("abc").unwrap().if_exists();
        assert_eq!(q.to_sql().unwrap(), "DROP TABLE IF EXISTS `abc`");
        assert_eq!(DropQueryBuilder::new(Dialect::Generic).to_sql().unwrap(), "");
        let err = Query::drop_table("abc").unwrap().drop_table("def").unwrap_err();
        assert_eq!(err.to_string(), "'Query' object already has attribute drop_table");
    }
}
