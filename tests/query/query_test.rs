//! SELECT statement tests through the public builder API.

use insta::assert_snapshot;
use quarry::prelude::*;

#[test]
fn test_select_from_table() {
    let q = Query::from_("abc").select(["a", "b"]).unwrap();
    assert_eq!(q.to_sql().unwrap(), "SELECT \"a\",\"b\" FROM \"abc\"");
}

#[test]
fn test_select_without_from() {
    let q = Query::select([Term::value(1), Term::value("x")]).unwrap();
    assert_eq!(q.to_sql().unwrap(), "SELECT 1,'x'");
}

#[test]
fn test_empty_query_renders_nothing() {
    assert_eq!(Query::from_("abc").to_sql().unwrap(), "");
    assert_eq!(Query::builder().to_sql().unwrap(), "");
}

#[test]
fn test_select_star() {
    let q = Query::from_("abc").select(["*"]).unwrap();
    assert_eq!(q.to_sql().unwrap(), "SELECT * FROM \"abc\"");
}

#[test]
fn test_schema_qualified_table() {
    let t = Table::new("abc").with_schema("schema1");
    let q = Query::from_(t.clone()).select([t.field("a")]).unwrap();
    assert_eq!(q.to_sql().unwrap(), "SELECT \"a\" FROM \"schema1\".\"abc\"");
}

#[test]
fn test_aliased_table_namespaces_fields() {
    let t = Table::new("abc").as_("t");
    let q = Query::from_(t.clone()).select([t.field("a")]).unwrap();
    assert_eq!(q.to_sql().unwrap(), "SELECT \"t\".\"a\" FROM \"abc\" \"t\"");
}

#[test]
fn test_where_and_orderby() {
    let t = Table::new("abc");
    let q = Query::from_(t.clone())
        .select([t.field("a")])
        .unwrap()
        .where_(t.field("a").gt(1))
        .unwrap()
        .where_(t.field("b").isnull())
        .unwrap()
        .orderby([t.field("a")], Some(Order::Desc));
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT \"a\" FROM \"abc\" WHERE \"a\">1 AND \"b\" IS NULL ORDER BY \"a\" DESC"
    );
}

#[test]
fn test_or_criteria_are_grouped() {
    let t = Table::new("abc");
    let q = Query::from_(t.clone())
        .select([t.field("a")])
        .unwrap()
        .where_(t.field("a").eq(1) | t.field("a").eq(2))
        .unwrap()
        .where_(t.field("b").like("x%"))
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT \"a\" FROM \"abc\" WHERE (\"a\"=1 OR \"a\"=2) AND \"b\" LIKE 'x%'"
    );
}

#[test]
fn test_groupby_having() {
    let t = Table::new("orders");
    let q = Query::from_(t.clone())
        .select([
            t.field("customer"),
            functions::sum(t.field("total")).as_("spent").into(),
        ])
        .unwrap()
        .groupby([t.field("customer")])
        .unwrap()
        .having(functions::sum(t.field("total")).gt(100));
    assert_snapshot!(
        q.to_sql().unwrap(),
        @r#"SELECT "customer",SUM("total") "spent" FROM "orders" GROUP BY "customer" HAVING SUM("total")>100"#
    );
}

#[test]
fn test_count_star_with_alias() {
    let q = Query::from_("abc")
        .select([functions::count_star().as_("n")])
        .unwrap();
    assert_eq!(q.to_sql().unwrap(), "SELECT COUNT(*) \"n\" FROM \"abc\"");
}

#[test]
fn test_distinct() {
    let q = Query::from_("abc").select(["a"]).unwrap().distinct();
    assert_eq!(q.to_sql().unwrap(), "SELECT DISTINCT \"a\" FROM \"abc\"");
}

#[test]
fn test_limit_offset() {
    let q = Query::from_("abc").select(["a"]).unwrap().limit(10).offset(5);
    assert_eq!(q.to_sql().unwrap(), "SELECT \"a\" FROM \"abc\" LIMIT 10 OFFSET 5");
}

#[test]
fn test_slice() {
    let q = Query::from_("abc").select(["a"]).unwrap().slice(..5);
    assert_eq!(q.to_sql().unwrap(), "SELECT \"a\" FROM \"abc\" LIMIT 5");
}

#[test]
fn test_subquery_in_from() {
    let inner = Query::from_("abc").select(["a"]).unwrap().as_("sub");
    let q = Query::from_(inner.clone())
        .select([inner.field("a")])
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT \"sub\".\"a\" FROM (SELECT \"a\" FROM \"abc\") \"sub\""
    );
}

#[test]
fn test_subquery_in_where() {
    let inner = Query::from_("def").select(["b"]).unwrap();
    let q = Query::from_("abc")
        .select(["a"])
        .unwrap()
        .where_(Term::field("b").isin_term(inner))
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT \"a\" FROM \"abc\" WHERE \"b\" IN (SELECT \"b\" FROM \"def\")"
    );
}

#[test]
fn test_with_clause() {
    let sub = Query::from_("abc").select(["a"]).unwrap();
    let cte = Table::new("cte");
    let q = Query::with_(sub, "cte")
        .from_(cte.clone())
        .select([cte.field("a")])
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "WITH cte AS (SELECT \"a\" FROM \"abc\") SELECT \"a\" FROM \"cte\""
    );
}

#[test]
fn test_case_in_select() {
    let t = Table::new("abc");
    let label = Case::new()
        .when(t.field("a").lt(0), "neg")
        .else_("pos")
        .as_("sign");
    let q = Query::from_(t.clone()).select([label]).unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT CASE WHEN \"a\"<0 THEN 'neg' ELSE 'pos' END \"sign\" FROM \"abc\""
    );
}

#[test]
fn test_builder_values_are_independent() {
    let base = Query::from_("abc").select(["a"]).unwrap();
    let limited = base.clone().limit(1);
    assert_eq!(base.to_sql().unwrap(), "SELECT \"a\" FROM \"abc\"");
    assert_eq!(limited.to_sql().unwrap(), "SELECT \"a\" FROM \"abc\" LIMIT 1");
}

#[test]
fn test_self_join_leaves_earlier_builder_untouched() {
    let t = Table::new("abc");
    let base = Query::from_(t.clone()).select([t.field("a")]).unwrap();
    let joined = base
        .clone()
        .join(t.clone(), JoinType::Inner)
        .on(t.field("id").eq(t.field("id")))
        .unwrap();
    assert_eq!(base.to_sql().unwrap(), "SELECT \"a\" FROM \"abc\"");
    assert_eq!(
        joined.to_sql().unwrap(),
        "SELECT \"abc2\".\"a\" FROM \"abc\" \"abc2\" JOIN \"abc\" \"abc2\" ON \"abc2\".\"id\"=\"abc2\".\"id\""
    );
    assert_eq!(t.alias(), None);
}

#[test]
fn test_subquery_auto_alias_stays_with_outer_builder() {
    let inner = Query::from_("abc").select(["a"]).unwrap();
    let first = Query::from_(inner.clone()).select([inner.field("a")]).unwrap();
    let second = Query::from_("def")
        .from_(inner.clone())
        .select([inner.field("a")])
        .unwrap();
    assert_eq!(
        first.to_sql().unwrap(),
        "SELECT \"sq0\".\"a\" FROM (SELECT \"a\" FROM \"abc\") \"sq0\""
    );
    assert_eq!(
        second.to_sql().unwrap(),
        "SELECT \"sq0\".\"a\" FROM \"def\",(SELECT \"a\" FROM \"abc\") \"sq0\""
    );
    assert_eq!(inner.alias(), None);
    assert_eq!(inner.to_sql().unwrap(), "SELECT \"a\" FROM \"abc\"");
}

#[test]
fn test_select_subquery_column() {
    let count = Query::from_("def")
        .select([functions::count_star()])
        .unwrap()
        .as_("n");
    let q = Query::from_("abc").select([count]).unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT (SELECT COUNT(*) FROM \"def\") \"n\" FROM \"abc\""
    );
}

#[test]
fn test_to_sql_is_idempotent() {
    let t = Table::new("abc");
    let q = Query::from_(t.clone())
        .join(Table::new("def"), JoinType::Left)
        .on_field(["id"])
        .unwrap()
        .select([t.field("a")])
        .unwrap()
        .where_(t.field("a").gt(1))
        .unwrap();
    assert_eq!(q.to_sql().unwrap(), q.to_sql().unwrap());
}

#[test]
fn test_top_can_only_be_set_once() {
    let q = MsSqlQuery::from_("abc").select(["a"]).unwrap().top(1).unwrap();
    assert!(q.clone().top(2).is_err());
    assert_eq!(q.to_sql().unwrap(), "SELECT TOP (1) \"a\" FROM \"abc\"");
}

#[test]
fn test_select_name_without_from_fails() {
    let err = Query::select(["a"]).unwrap_err();
    assert_eq!(err.to_string(), "Cannot select a, no FROM table specified.");
}

#[test]
fn test_delete() {
    let t = Table::new("abc");
    let q = Query::from_(t.clone())
        .delete()
        .unwrap()
        .where_(t.field("id").eq(1))
        .unwrap();
    assert_eq!(q.to_sql().unwrap(), "DELETE FROM \"abc\" WHERE \"id\"=1");
}

#[test]
fn test_for_update() {
    let q = Query::from_("abc")
        .select(["a"])
        .unwrap()
        .for_update(ForUpdate::new().nowait())
        .unwrap();
    assert_eq!(q.to_sql().unwrap(), "SELECT \"a\" FROM \"abc\" FOR UPDATE NOWAIT");
}

#[test]
fn test_window_function() {
    let t = Table::new("sales");
    let running = Function::new("SUM", vec![t.field("amount")])
        .over([t.field("region")])
        .orderby([t.field("day")], None)
        .as_("running");
    let q = Query::from_(t.clone()).select([running]).unwrap();
    assert_snapshot!(
        q.to_sql().unwrap(),
        @r#"SELECT SUM("amount") OVER(PARTITION BY "region" ORDER BY "day") "running" FROM "sales""#
    );
}
