//! Test utilities for SQL emission validation.
//!
//! Rendered statements are parsed back with sqlparser-rs to check that the
//! builder emits syntactically valid SQL.

use sqlparser::dialect::{
    AnsiDialect, GenericDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect,
};
use sqlparser::parser::Parser;

use super::dialect::Dialect;

/// Validates that a SQL string is syntactically valid for the given dialect.
///
/// # Example
///
/// ```ignore
/// use crate::sql::test_utils::validate_sql;
/// use crate::sql::dialect::Dialect;
///
/// validate_sql("SELECT * FROM users", Dialect::Postgres).unwrap();
/// ```
pub fn validate_sql(sql: &str, dialect: Dialect) -> Result<(), String> {
    let parser_dialect: Box<dyn sqlparser::dialect::Dialect> = match dialect {
        Dialect::Generic => Box::new(AnsiDialect {}),
        Dialect::Postgres => Box::new(PostgreSqlDialect {}),
        Dialect::MySql => Box::new(MySqlDialect {}),
        Dialect::MsSql => Box::new(MsSqlDialect {}),
        Dialect::Sqlite => Box::new(SQLiteDialect {}),
        Dialect::Oracle => Box::new(GenericDialect {}), // sqlparser has no Oracle dialect
    };

    Parser::parse_sql(&*parser_dialect, sql)
        .map(|_| ())
        .map_err(|e| format!("Invalid SQL for {dialect}: {e}\nSQL: {sql}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::expr::{Order, Term, TermExt};
    use crate::sql::query::{MySqlQuery, PostgresQuery, Query, SqliteQuery};
    use crate::sql::table::Table;

    #[test]
    fn test_validate_valid_sql() {
        validate_sql("SELECT * FROM users", Dialect::Postgres).unwrap();
        validate_sql("SELECT * FROM users", Dialect::MySql).unwrap();
        validate_sql("SELECT * FROM users", Dialect::Sqlite).unwrap();
    }

    #[test]
    fn test_validate_invalid_sql() {
        let result = validate_sql("SELEC * FORM users", Dialect::Postgres);
        assert!(result.is_err());
    }

    #[test]
    fn test_rendered_select_roundtrips() {
        let (a, b) = (Table::new("a"), Table::new("b"));
        let q = PostgresQuery::from_(a.clone())
            .select([a.field("x"), b.field("y")])
            .unwrap()
            .left_join(b.clone())
            .on(a.field("id").eq(b.field("a_id")))
            .unwrap()
            .where_(a.field("x").gt(1))
            .unwrap()
            .orderby([a.field("x")], Some(Order::Desc))
            .limit(10)
            .offset(5);
        validate_sql(&q.to_sql().unwrap(), Dialect::Postgres).unwrap();

        let q = MySqlQuery::from_("abc")
            .select(["a"])
            .unwrap()
            .groupby(["a"])
            .unwrap()
            .having(Term::field("a").gt(2));
        validate_sql(&q.to_sql().unwrap(), Dialect::MySql).unwrap();
    }

    #[test]
    fn test_rendered_dml_roundtrips() {
        let q = SqliteQuery::into("abc")
            .columns(["a", "b"])
            .unwrap()
            .insert([Term::value(1), Term::value("x")])
            .unwrap();
        validate_sql(&q.to_sql().unwrap(), Dialect::Sqlite).unwrap();

        let q = Query::update("abc")
            .set("a", 1)
            .where_(Term::field("b").eq("x"))
            .unwrap();
        validate_sql(&q.to_sql().unwrap(), Dialect::Generic).unwrap();

        let q = Query::from_("abc").delete().unwrap();
        validate_sql(&q.to_sql().unwrap(), Dialect::Generic).unwrap();
    }
}
