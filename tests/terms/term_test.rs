//! Expression term rendering tests.

use quarry::expr::Negatable;
use quarry::prelude::*;

fn sql(term: impl Into<Term>) -> String {
    term.into().render(&RenderContext::default()).unwrap()
}

fn f(name: &str) -> Term {
    Term::field(name)
}

#[test]
fn test_comparison_operators() {
    assert_eq!(sql(f("a").eq(1)), "\"a\"=1");
    assert_eq!(sql(f("a").ne("x")), "\"a\"<>'x'");
    assert_eq!(sql(f("a").lt(1.5)), "\"a\"<1.5");
    assert_eq!(sql(f("a").lte(f("b"))), "\"a\"<=\"b\"");
    assert_eq!(sql(f("a").gte(0)), "\"a\">=0");
}

#[test]
fn test_pattern_matching() {
    assert_eq!(sql(f("a").not_like("x%")), "\"a\" NOT LIKE 'x%'");
    assert_eq!(sql(f("a").ilike("x%")), "\"a\" ILIKE 'x%'");
    assert_eq!(sql(f("a").regexp("^a")), "\"a\" REGEXP '^a'");
    assert_eq!(sql(f("a").glob("*.rs")), "\"a\" GLOB '*.rs'");
}

#[test]
fn test_membership_and_range() {
    assert_eq!(sql(f("a").isin(["x", "y"])), "\"a\" IN ('x','y')");
    assert_eq!(sql(f("a").notin([1])), "\"a\" NOT IN (1)");
    assert_eq!(sql(f("a").between(1, 10)), "\"a\" BETWEEN 1 AND 10");
}

#[test]
fn test_null_checks() {
    assert_eq!(sql(f("a").isnull()), "\"a\" IS NULL");
    assert_eq!(sql(f("a").notnull()), "NOT \"a\" IS NULL");
    assert_eq!(sql(Term::from(None::<&str>)), "NULL");
}

#[test]
fn test_boolean_composition() {
    let crit = (f("a").eq(1) | f("b").eq(2)) & f("c").eq(3);
    assert_eq!(sql(crit), "(\"a\"=1 OR \"b\"=2) AND \"c\"=3");
    assert_eq!(
        sql(Term::any([f("a").eq(1), f("b").eq(2), f("c").eq(3)])),
        "\"a\"=1 OR \"b\"=2 OR \"c\"=3"
    );
    assert_eq!(sql(not_(f("a")).eq(1)), "NOT \"a\"=1");
}

#[test]
fn test_empty_criterion_is_identity() {
    let mut crit = Term::empty();
    for name in ["a", "b"] {
        crit = crit & f(name).eq(1);
    }
    assert_eq!(sql(crit), "\"a\"=1 AND \"b\"=1");
}

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(sql((f("a") + 1) * 2), "(\"a\"+1)*2");
    assert_eq!(sql(f("a") + f("b") * 2), "\"a\"+\"b\"*2");
    assert_eq!(sql(f("a") / (f("b") - 1)), "\"a\"/(\"b\"-1)");
    assert_eq!(sql(f("a").mod_(2)), "MOD(\"a\",2)");
}

#[test]
fn test_functions() {
    assert_eq!(sql(functions::upper(f("name"))), "UPPER(\"name\")");
    assert_eq!(
        sql(functions::coalesce(f("a"), [f("b"), Term::value(0)])),
        "COALESCE(\"a\",\"b\",0)"
    );
    assert_eq!(
        sql(functions::cast(f("a"), "text")),
        "CAST(\"a\" AS TEXT)"
    );
    assert_eq!(
        sql(functions::date_diff(Term::value("day"), f("s"), f("e"))),
        "DATEDIFF('day',\"s\",\"e\")"
    );
}

#[test]
fn test_custom_function() {
    let fmt = CustomFunction::new("FORMAT", ["value", "pattern"]);
    let call = fmt.call([f("price"), Term::value("0.00")]).unwrap();
    assert_eq!(sql(call), "FORMAT(\"price\",'0.00')");
    assert!(fmt.call([f("price")]).is_err());
}

#[test]
fn test_window_frame() {
    let avg = functions::avg(f("v"))
        .over([f("g")])
        .orderby([f("t")], Some(Order::Asc))
        .rows(Edge::Preceding(Some(3)), Some(Edge::CurrentRow))
        .unwrap();
    assert_eq!(
        sql(avg),
        "AVG(\"v\") OVER(PARTITION BY \"g\" ORDER BY \"t\" ASC ROWS BETWEEN 3 PRECEDING AND CURRENT ROW)"
    );
}

#[test]
fn test_case_expression() {
    let case = Case::new()
        .when(f("score").gte(90), "A")
        .when(f("score").gte(80), "B")
        .else_(Term::null());
    assert_eq!(
        sql(case),
        "CASE WHEN \"score\">=90 THEN 'A' WHEN \"score\">=80 THEN 'B' ELSE NULL END"
    );
}

#[test]
fn test_empty_case_fails() {
    let term: Term = Case::new().into();
    assert!(matches!(
        term.render(&RenderContext::default()),
        Err(QueryError::Case(_))
    ));
}

#[test]
fn test_table_bound_fields() {
    let t = Table::new("abc");
    let ctx = RenderContext::default().with_namespace(true);
    assert_eq!(t.field("a").render(&ctx).unwrap(), "\"abc\".\"a\"");
    assert_eq!(t.star().render(&ctx).unwrap(), "\"abc\".*");
}

#[test]
fn test_string_literal_escaping() {
    assert_eq!(sql(f("a").eq("O'Brien")), "\"a\"='O''Brien'");
}

#[test]
fn test_tuple_comparison() {
    let lhs = Term::tuple([f("a"), f("b")]);
    assert_eq!(sql(lhs.eq(Term::tuple([1, 2]))), "(\"a\",\"b\")=(1,2)");
}

#[test]
fn test_non_finite_float_fails() {
    let term = f("a").eq(f64::NAN);
    assert!(term.render(&RenderContext::default()).is_err());
}
