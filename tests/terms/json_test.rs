//! JSON operator and literal tests.

use quarry::prelude::*;
use serde_json::json;

fn pg(term: Term) -> String {
    term.render(&RenderContext::for_dialect(Dialect::Postgres))
        .unwrap()
}

#[test]
fn test_arrow_operators() {
    let data = Term::field("data");
    assert_eq!(pg(data.clone().get_json_value("a")), "\"data\"->'a'");
    assert_eq!(pg(data.clone().get_text_value("a")), "\"data\"->>'a'");
    assert_eq!(pg(data.get_json_value(1)), "\"data\"->1");
}

#[test]
fn test_containment() {
    let data = Term::field("data");
    assert_eq!(
        pg(data.clone().contains(json!({"a": 1}))),
        "\"data\"@>'{\"a\":1}'"
    );
    assert_eq!(
        pg(data.contained_by(json!([1, 2]))),
        "\"data\"<@'[1,2]'"
    );
}

#[test]
fn test_key_existence() {
    let data = Term::field("data");
    assert_eq!(pg(data.clone().has_key(json!("k"))), "\"data\"?'k'");
    assert_eq!(pg(data.has_any_keys(["a", "b"])), "\"data\"?|ARRAY['a','b']");
}

#[test]
fn test_json_path_in_query() {
    let users = Table::new("users");
    let q = PostgresQuery::from_(users.clone())
        .select([users.field("id")])
        .unwrap()
        .where_(users.field("data").get_text_value("role").eq("admin"))
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT \"id\" FROM \"users\" WHERE \"data\"->>'role'='admin'"
    );
}

#[test]
fn test_json_path_per_dialect() {
    let attr = Term::field("doc").json_path(["a", "b"]);
    assert_eq!(
        attr.render(&RenderContext::for_dialect(Dialect::Postgres)).unwrap(),
        "\"doc\"->'a'->>'b'"
    );
    assert_eq!(
        attr.render(&RenderContext::for_dialect(Dialect::MySql)).unwrap(),
        "`doc`->>'$.a.b'"
    );
    assert_eq!(
        attr.render(&RenderContext::for_dialect(Dialect::MsSql)).unwrap(),
        "JSON_VALUE(\"doc\", '$.a.b')"
    );
}

#[test]
fn test_json_document_literal() {
    let doc = Term::json(json!({"b": [1, null], "a": "x"}));
    assert_eq!(pg(doc), "'{\"a\":\"x\",\"b\":[1,null]}'");
}

#[test]
fn test_insert_json_value() {
    let q = PostgresQuery::into("docs")
        .insert([Term::value(json!({"k": "v"}))])
        .unwrap();
    assert_eq!(q.to_sql().unwrap(), "INSERT INTO \"docs\" VALUES ('{\"k\": \"v\"}')");
}
