//! CREATE TABLE, DROP TABLE and LOAD DATA tests.

use insta::assert_snapshot;
use quarry::ddl::{make_columns, CreateQueryBuilder, DropQueryBuilder};
use quarry::prelude::*;

#[test]
fn test_create_table_with_column_options() {
    let q = PostgresQuery::create_table("accounts")
        .unwrap()
        .if_not_exists()
        .columns([
            Column::new("id").with_type("BIGINT").nullable(false),
            Column::new("email").with_type("TEXT").nullable(false),
            Column::new("active").with_type("BOOLEAN").default(true),
            Column::new("created_at")
                .with_type("TIMESTAMP")
                .default(functions::current_timestamp()),
        ])
        .unwrap()
        .unique(["email"])
        .primary_key(["id"])
        .unwrap();
    assert_snapshot!(
        q.to_sql().unwrap(),
        @r#"CREATE TABLE IF NOT EXISTS "accounts" ("id" BIGINT NOT NULL,"email" TEXT NOT NULL,"active" BOOLEAN DEFAULT true,"created_at" TIMESTAMP DEFAULT CURRENT_TIMESTAMP,UNIQUE ("email"),PRIMARY KEY ("id"))"#
    );
}

#[test]
fn test_create_table_from_pairs() {
    let q = MySqlQuery::create_table("t")
        .unwrap()
        .columns(make_columns([("a", "INT"), ("b", "VARCHAR(10)")]))
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "CREATE TABLE `t` (`a` INT,`b` VARCHAR(10))"
    );
}

#[test]
fn test_create_temporary_table_as_select() {
    let source = Table::new("orders");
    let select = Query::from_(source.clone())
        .select([source.field("id")])
        .unwrap()
        .where_(source.field("total").gt(100))
        .unwrap();
    let q = CreateQueryBuilder::new(Dialect::Generic)
        .create_table("big_orders")
        .unwrap()
        .temporary()
        .as_select(select)
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "CREATE TEMPORARY TABLE \"big_orders\" AS (SELECT \"id\" FROM \"orders\" WHERE \"total\">100)"
    );
}

#[test]
fn test_create_table_in_schema() {
    let table = Table::new("abc").with_schema("app");
    let q = Query::create_table(table)
        .unwrap()
        .columns([("id", "INT")])
        .unwrap();
    assert_eq!(q.to_sql().unwrap(), "CREATE TABLE \"app\".\"abc\" (\"id\" INT)");
}

#[test]
fn test_columns_and_as_select_are_exclusive() {
    let select = Query::from_("abc").select(["a"]).unwrap();
    let err = Query::create_table("t")
        .unwrap()
        .columns(["a"])
        .unwrap()
        .as_select(select.clone())
        .unwrap_err();
    assert_eq!(err.to_string(), "'Query' object already has attribute columns");

    let err = Query::create_table("t")
        .unwrap()
        .as_select(select)
        .unwrap()
        .columns(["a"])
        .unwrap_err();
    assert_eq!(err.to_string(), "'Query' object already has attribute as_select");
}

#[test]
fn test_incomplete_create_is_empty() {
    assert_eq!(Query::create_table("t").unwrap().to_sql().unwrap(), "");
}

#[test]
fn test_drop_table() {
    assert_eq!(
        Query::drop_table("abc").unwrap().to_sql().unwrap(),
        "DROP TABLE \"abc\""
    );
    assert_eq!(
        MsSqlQuery::drop_table("abc").unwrap().if_exists().to_sql().unwrap(),
        "DROP TABLE IF EXISTS \"abc\""
    );
    assert_eq!(DropQueryBuilder::new(Dialect::MySql).to_sql().unwrap(), "");
}

#[test]
fn test_load_data() {
    let q = MySqlQuery::load("/var/data/users.csv").into_table("users");
    assert_snapshot!(
        q.to_sql().unwrap(),
        @"LOAD DATA LOCAL INFILE '/var/data/users.csv' INTO TABLE `users` FIELDS TERMINATED BY ','"
    );
}

#[test]
fn test_load_escapes_path() {
    let q = MySqlQuery::load("it's.csv").into_table("t");
    assert_eq!(
        q.to_sql().unwrap(),
        "LOAD DATA LOCAL INFILE 'it''s.csv' INTO TABLE `t` FIELDS TERMINATED BY ','"
    );
}
