//! UNION / INTERSECT / EXCEPT / MINUS tests.

use quarry::prelude::*;

fn select(table: &str) -> QueryBuilder {
    Query::from_(table).select(["id"]).unwrap()
}

#[test]
fn test_union() {
    let op = select("a").union(select("b"));
    assert_eq!(
        op.to_sql().unwrap(),
        "(SELECT \"id\" FROM \"a\") UNION (SELECT \"id\" FROM \"b\")"
    );
}

#[test]
fn test_union_operator() {
    let op = select("a") + select("b") + select("c");
    assert_eq!(
        op.to_sql().unwrap(),
        "(SELECT \"id\" FROM \"a\") UNION (SELECT \"id\" FROM \"b\") UNION (SELECT \"id\" FROM \"c\")"
    );
}

#[test]
fn test_chained_operators() {
    let op = select("a").union_all(select("b")).intersect(select("c"));
    assert_eq!(
        op.to_sql().unwrap(),
        "(SELECT \"id\" FROM \"a\") UNION ALL (SELECT \"id\" FROM \"b\") INTERSECT (SELECT \"id\" FROM \"c\")"
    );
}

#[test]
fn test_except_with_order_and_limit() {
    let op = select("a")
        .except_of(select("b"))
        .orderby(["id"], Some(Order::Asc))
        .limit(3);
    assert_eq!(
        op.to_sql().unwrap(),
        "(SELECT \"id\" FROM \"a\") EXCEPT (SELECT \"id\" FROM \"b\") ORDER BY \"id\" ASC LIMIT 3"
    );
}

#[test]
fn test_mysql_union_is_unwrapped() {
    let a = MySqlQuery::from_("a").select(["id"]).unwrap();
    let b = MySqlQuery::from_("b").select(["id"]).unwrap();
    assert_eq!(
        a.union(b).to_sql().unwrap(),
        "SELECT `id` FROM `a` UNION SELECT `id` FROM `b`"
    );
}

#[test]
fn test_mssql_pagination() {
    let a = MsSqlQuery::from_("a").select(["id"]).unwrap();
    let b = MsSqlQuery::from_("b").select(["id"]).unwrap();
    let op = a.union(b).limit(10);
    assert_eq!(
        op.to_sql().unwrap(),
        "(SELECT \"id\" FROM \"a\") UNION (SELECT \"id\" FROM \"b\") ORDER BY (SELECT 0) OFFSET 0 ROWS FETCH NEXT 10 ROWS ONLY"
    );
}

#[test]
fn test_mismatched_select_counts() {
    let wide = Query::from_("a").select(["id", "name"]).unwrap();
    let err = wide.union(select("b")).to_sql().unwrap_err();
    assert!(matches!(err, QueryError::SetOperation(_)));
}

#[test]
fn test_set_operation_as_subquery() {
    let op = select("a").union(select("b")).as_("ids");
    let q = Query::from_(op.clone()).select([op.field("id")]).unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT \"ids\".\"id\" FROM ((SELECT \"id\" FROM \"a\") UNION (SELECT \"id\" FROM \"b\")) \"ids\""
    );
}
