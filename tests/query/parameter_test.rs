//! Parameterized rendering tests.

use quarry::prelude::*;

#[test]
fn test_generic_question_marks() {
    let q = Query::from_("abc")
        .select(["a"])
        .unwrap()
        .where_(Term::field("b").eq("x"))
        .unwrap()
        .limit(5);
    let (sql, values) = q.render_parameterized(None).unwrap();
    assert_eq!(sql, "SELECT \"a\" FROM \"abc\" WHERE \"b\"=? LIMIT ?");
    assert_eq!(values, vec![Value::from("x"), Value::Int(5)]);
}

#[test]
fn test_mysql_format_placeholders() {
    let q = MySqlQuery::from_("abc")
        .select(["a"])
        .unwrap()
        .where_(Term::field("b").isin([1, 2]))
        .unwrap();
    let (sql, values) = q.render_parameterized(None).unwrap();
    assert_eq!(sql, "SELECT `a` FROM `abc` WHERE `b` IN (%s,%s)");
    assert_eq!(values, vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn test_postgres_numbered_placeholders_in_insert() {
    let q = PostgresQuery::into("abc")
        .insert_rows([vec![Term::value(1), Term::value("a")], vec![Term::value(2), Term::value("b")]])
        .unwrap();
    let (sql, values) = q.get_parameterized_sql(None).unwrap();
    assert_eq!(sql, "INSERT INTO \"abc\" VALUES ($1,$2),($3,$4)");
    assert_eq!(
        values,
        vec![Value::Int(1), Value::from("a"), Value::Int(2), Value::from("b")]
    );
}

#[test]
fn test_values_follow_clause_order() {
    let t = Table::new("abc");
    let q = PostgresQuery::update(t.clone())
        .set("name", "new")
        .where_(t.field("id").eq(3))
        .unwrap();
    let (sql, values) = q.render_parameterized(None).unwrap();
    assert_eq!(sql, "UPDATE \"abc\" SET \"name\"=$1 WHERE \"id\"=$2");
    assert_eq!(values, vec![Value::from("new"), Value::Int(3)]);
}

#[test]
fn test_inline_values_are_not_bound() {
    let q = Query::from_("abc")
        .select([Term::inline(1).as_("one")])
        .unwrap()
        .where_(Term::field("b").eq(2))
        .unwrap();
    let (sql, values) = q.render_parameterized(None).unwrap();
    assert_eq!(sql, "SELECT 1 \"one\" FROM \"abc\" WHERE \"b\"=?");
    assert_eq!(values, vec![Value::Int(2)]);
}

#[test]
fn test_date_part_stays_inline() {
    let q = Query::from_("abc")
        .select([functions::extract(DatePart::Year, Term::field("d"))])
        .unwrap();
    let (sql, values) = q.render_parameterized(None).unwrap();
    assert_eq!(sql, "SELECT EXTRACT(YEAR FROM \"d\") FROM \"abc\"");
    assert!(values.is_empty());
}

#[test]
fn test_custom_placeholder_factory() {
    let q = Query::from_("abc")
        .select(["a"])
        .unwrap()
        .where_(Term::field("b").eq(1) & Term::field("c").eq(2))
        .unwrap();
    let p = Parameterizer::with_placeholder_factory(|idx| format!(":p{idx}"));
    let ctx = RenderContext::for_dialect(Dialect::Oracle).parameterizer(p.clone());
    let (sql, values) = q.render_parameterized(Some(&ctx)).unwrap();
    assert_eq!(sql, "SELECT \"a\" FROM \"abc\" WHERE \"b\"=:p1 AND \"c\"=:p2");
    assert_eq!(values, p.values());
    assert_eq!(values.len(), 2);
}

#[test]
fn test_explicit_parameter_terms() {
    let q = Query::from_("abc")
        .select(["a"])
        .unwrap()
        .where_(Term::field("b").eq(Parameter::placeholder(":b").unwrap()))
        .unwrap();
    assert_eq!(q.to_sql().unwrap(), "SELECT \"a\" FROM \"abc\" WHERE \"b\"=:b");
}

#[test]
fn test_plain_render_keeps_literals() {
    let q = Query::from_("abc")
        .select(["a"])
        .unwrap()
        .where_(Term::field("b").eq("x"))
        .unwrap();
    assert_eq!(q.to_sql().unwrap(), "SELECT \"a\" FROM \"abc\" WHERE \"b\"='x'");
}

fn insert_abc(dialect_query: QueryBuilder) -> QueryBuilder {
    dialect_query
        .columns(["a", "b", "c"])
        .unwrap()
        .insert([Term::value(1), Term::value(2.2), Term::value("foo")])
        .unwrap()
}

#[test]
fn test_insert_with_columns_captures_values() {
    let q = insert_abc(Query::into("abc"));
    let (sql, values) = q.render_parameterized(None).unwrap();
    assert_eq!(sql, "INSERT INTO \"abc\" (\"a\",\"b\",\"c\") VALUES (?,?,?)");
    assert_eq!(values, vec![Value::Int(1), Value::Float(2.2), Value::from("foo")]);
}

#[test]
fn test_parameterized_render_is_deterministic() {
    let q = insert_abc(PostgresQuery::into("abc"));
    let first = q.render_parameterized(None).unwrap();
    let second = q.render_parameterized(None).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.1.len(), 3);
}

#[test]
fn test_shared_parameterizer_accumulates() {
    let q = insert_abc(PostgresQuery::into("abc"));
    let p = Parameterizer::new();
    let ctx = RenderContext::for_dialect(Dialect::Postgres).parameterizer(p.clone());

    let (sql, _) = q.render_parameterized(Some(&ctx)).unwrap();
    assert_eq!(sql, "INSERT INTO \"abc\" (\"a\",\"b\",\"c\") VALUES ($1,$2,$3)");
    let (sql, values) = q.render_parameterized(Some(&ctx)).unwrap();
    assert_eq!(sql, "INSERT INTO \"abc\" (\"a\",\"b\",\"c\") VALUES ($4,$5,$6)");
    assert_eq!(values.len(), 6);
    assert_eq!(p.len(), 6);
}
