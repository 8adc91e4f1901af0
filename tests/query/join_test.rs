//! JOIN tests.

use insta::assert_snapshot;
use quarry::prelude::*;

#[test]
fn test_inner_join_on() {
    let (orders, customers) = (Table::new("orders"), Table::new("customers"));
    let q = Query::from_(orders.clone())
        .inner_join(customers.clone())
        .on(orders.field("customer_id").eq(customers.field("id")))
        .unwrap()
        .select([orders.field("id"), customers.field("name")])
        .unwrap();
    assert_snapshot!(
        q.to_sql().unwrap(),
        @r#"SELECT "orders"."id","customers"."name" FROM "orders" JOIN "customers" ON "orders"."customer_id"="customers"."id""#
    );
}

#[test]
fn test_left_join_with_aliases() {
    let a = Table::new("accounts").as_("a");
    let u = Table::new("users").as_("u");
    let q = Query::from_(a.clone())
        .left_join(u.clone())
        .on(a.field("owner").eq(u.field("id")))
        .unwrap()
        .select([a.field("name"), u.field("email")])
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT \"a\".\"name\",\"u\".\"email\" FROM \"accounts\" \"a\" LEFT JOIN \"users\" \"u\" ON \"a\".\"owner\"=\"u\".\"id\""
    );
}

#[test]
fn test_multiple_joins() {
    let (a, b, c) = (Table::new("a"), Table::new("b"), Table::new("c"));
    let q = Query::from_(a.clone())
        .inner_join(b.clone())
        .on(a.field("id").eq(b.field("a_id")))
        .unwrap()
        .left_join(c.clone())
        .on(b.field("id").eq(c.field("b_id")))
        .unwrap()
        .select([c.star()])
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT \"c\".* FROM \"a\" JOIN \"b\" ON \"a\".\"id\"=\"b\".\"a_id\" LEFT JOIN \"c\" ON \"b\".\"id\"=\"c\".\"b_id\""
    );
}

#[test]
fn test_join_using() {
    let q = Query::from_("a")
        .inner_join("b")
        .using(["id", "kind"])
        .unwrap()
        .select(["*"])
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT * FROM \"a\" JOIN \"b\" USING (\"id\",\"kind\")"
    );
}

#[test]
fn test_cross_join() {
    let q = Query::from_("a")
        .cross_join("b")
        .cross()
        .unwrap()
        .select(["*"])
        .unwrap();
    assert_eq!(q.to_sql().unwrap(), "SELECT * FROM \"a\" CROSS JOIN \"b\"");
}

#[test]
fn test_join_criterion_must_reference_joined_tables() {
    let (a, b, c) = (Table::new("a"), Table::new("b"), Table::new("c"));
    let err = Query::from_(a)
        .left_join(b.clone())
        .on(b.field("x").eq(c.field("x")))
        .unwrap_err();
    assert!(matches!(err, QueryError::Join(_)));
}

#[test]
fn test_join_requires_criterion() {
    let err = Query::from_("a")
        .inner_join("b")
        .on(Term::empty())
        .unwrap_err();
    assert!(matches!(err, QueryError::Join(_)));
}

#[test]
fn test_is_joined() {
    let (a, b) = (Table::new("a"), Table::new("b"));
    let q = Query::from_(a.clone())
        .inner_join(b.clone())
        .on(a.field("id").eq(b.field("id")))
        .unwrap();
    assert!(q.is_joined(&b));
    assert!(!q.is_joined(&Table::new("c")));
}

#[test]
fn test_join_mysql_quoting() {
    let (a, b) = (Table::new("a"), Table::new("b"));
    let q = MySqlQuery::from_(a.clone())
        .right_join(b.clone())
        .on(a.field("id").eq(b.field("id")))
        .unwrap()
        .select([a.field("x")])
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT `a`.`x` FROM `a` RIGHT JOIN `b` ON `a`.`id`=`b`.`id`"
    );
}
