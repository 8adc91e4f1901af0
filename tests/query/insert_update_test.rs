//! INSERT, UPDATE and DELETE tests, including conflict handling and RETURNING.

use chrono::NaiveDate;
use insta::assert_snapshot;
use quarry::prelude::*;

#[test]
fn test_insert_single_row() {
    let q = Query::into("abc").insert([1, 2, 3]).unwrap();
    assert_eq!(q.to_sql().unwrap(), "INSERT INTO \"abc\" VALUES (1,2,3)");
}

#[test]
fn test_insert_from_table() {
    let q = Table::new("abc").insert([Term::value("a"), Term::null()]).unwrap();
    assert_eq!(q.to_sql().unwrap(), "INSERT INTO \"abc\" VALUES ('a',NULL)");
}

#[test]
fn test_insert_mixed_values() {
    let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    let q = Query::into("events")
        .columns(["day", "name", "active"])
        .unwrap()
        .insert([Term::value(day), Term::value("it's"), Term::value(true)])
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "INSERT INTO \"events\" (\"day\",\"name\",\"active\") VALUES ('2024-03-09','it''s',true)"
    );
}

#[test]
fn test_insert_table_fields_as_columns() {
    let t = Table::new("abc");
    let q = Query::into(t.clone())
        .columns([t.field("a"), t.field("b")])
        .unwrap()
        .insert_rows([[1, 2], [3, 4]])
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "INSERT INTO \"abc\" (\"a\",\"b\") VALUES (1,2),(3,4)"
    );
}

#[test]
fn test_insert_select() {
    let q = Query::into("archive")
        .columns(["id"])
        .unwrap()
        .from_("live")
        .select(["id"])
        .unwrap()
        .where_(Term::field("deleted").eq(true))
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "INSERT INTO \"archive\" (\"id\") SELECT \"id\" FROM \"live\" WHERE \"deleted\"=true"
    );
}

#[test]
fn test_postgres_upsert_returning() {
    let q = PostgresQuery::into("users")
        .insert([Term::value(1), Term::value("ann")])
        .unwrap()
        .on_conflict(["id"])
        .unwrap()
        .do_update("name", None::<Term>)
        .unwrap()
        .returning(["id"])
        .unwrap();
    assert_snapshot!(
        q.to_sql().unwrap(),
        @r#"INSERT INTO "users" VALUES (1,'ann') ON CONFLICT ("id") DO UPDATE SET "name"=EXCLUDED."name" RETURNING "id""#
    );
}

#[test]
fn test_mysql_on_duplicate_key_update() {
    let q = MySqlQuery::into("counters")
        .insert([Term::value("home"), Term::value(1)])
        .unwrap()
        .on_duplicate_key_update("hits", Some(Term::field("hits") + 1))
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "INSERT INTO `counters` VALUES ('home',1) ON DUPLICATE KEY UPDATE `hits`=`hits`+1"
    );
}

#[test]
fn test_update_multiple_assignments() {
    let q = Table::new("abc").update().set("a", 1).set("b", "x");
    assert_eq!(q.to_sql().unwrap(), "UPDATE \"abc\" SET \"a\"=1,\"b\"='x'");
}

#[test]
fn test_update_with_expression() {
    let t = Table::new("stock");
    let q = Query::update(t.clone())
        .set(t.field("qty"), t.field("qty") - 1)
        .where_(t.field("id").eq(7))
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "UPDATE \"stock\" SET \"qty\"=\"qty\"-1 WHERE \"id\"=7"
    );
}

#[test]
fn test_update_with_subquery_value() {
    let count = Query::from_("orders")
        .select([functions::count_star()])
        .unwrap();
    let q = Query::update("customers").set("order_count", count);
    assert_eq!(
        q.to_sql().unwrap(),
        "UPDATE \"customers\" SET \"order_count\"=(SELECT COUNT(*) FROM \"orders\")"
    );
}

#[test]
fn test_update_without_assignments_is_empty() {
    assert_eq!(Query::update("abc").to_sql().unwrap(), "");
}

#[test]
fn test_postgres_delete_returning() {
    let q = PostgresQuery::from_("abc")
        .delete()
        .unwrap()
        .where_(Term::field("id").eq(1))
        .unwrap()
        .returning(["id"])
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "DELETE FROM \"abc\" WHERE \"id\"=1 RETURNING \"id\""
    );
}

#[test]
fn test_verbs_cannot_be_mixed() {
    assert!(Query::update("abc").delete().is_err());
    assert!(Query::into("abc").update("abc").is_err());
    assert!(Query::from_("abc").delete().unwrap().delete().is_err());
}

#[test]
fn test_returning_requires_dialect_support() {
    let err = MySqlQuery::into("abc").returning(["id"]).unwrap_err();
    assert!(matches!(err, QueryError::DialectNotSupported { .. }));
}
