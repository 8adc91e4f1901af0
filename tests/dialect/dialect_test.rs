//! The same statements rendered across dialects.

use quarry::prelude::*;

fn paged(dialect: Dialect) -> String {
    QueryBuilder::new(dialect)
        .from_("abc")
        .select(["a"])
        .unwrap()
        .orderby(["a"], None)
        .limit(10)
        .offset(20)
        .to_sql()
        .unwrap()
}

#[test]
fn test_identifier_quoting() {
    let render = |dialect: Dialect| {
        QueryBuilder::new(dialect)
            .from_("abc")
            .select(["a"])
            .unwrap()
            .to_sql()
            .unwrap()
    };
    assert_eq!(render(Dialect::Generic), "SELECT \"a\" FROM \"abc\"");
    assert_eq!(render(Dialect::MySql), "SELECT `a` FROM `abc`");
    assert_eq!(render(Dialect::Postgres), "SELECT \"a\" FROM \"abc\"");
    assert_eq!(render(Dialect::Oracle), "SELECT \"a\" FROM \"abc\"");
    assert_eq!(render(Dialect::MsSql), "SELECT \"a\" FROM \"abc\"");
    assert_eq!(render(Dialect::Sqlite), "SELECT \"a\" FROM \"abc\"");
}

#[test]
fn test_pagination() {
    assert_eq!(
        paged(Dialect::Generic),
        "SELECT \"a\" FROM \"abc\" ORDER BY \"a\" LIMIT 10 OFFSET 20"
    );
    assert_eq!(
        paged(Dialect::MySql),
        "SELECT `a` FROM `abc` ORDER BY `a` LIMIT 10 OFFSET 20"
    );
    assert_eq!(
        paged(Dialect::Oracle),
        "SELECT \"a\" FROM \"abc\" ORDER BY \"a\" OFFSET 20 ROWS FETCH NEXT 10 ROWS ONLY"
    );
    assert_eq!(
        paged(Dialect::MsSql),
        "SELECT \"a\" FROM \"abc\" ORDER BY \"a\" OFFSET 20 ROWS FETCH NEXT 10 ROWS ONLY"
    );
}

#[test]
fn test_mssql_offset_requires_order() {
    let q = MsSqlQuery::from_("abc").select(["a"]).unwrap().limit(5);
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT \"a\" FROM \"abc\" ORDER BY (SELECT 0) OFFSET 0 ROWS FETCH NEXT 5 ROWS ONLY"
    );
}

#[test]
fn test_oracle_limit_only() {
    let q = OracleQuery::from_("abc").select(["a"]).unwrap().limit(5);
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT \"a\" FROM \"abc\" FETCH NEXT 5 ROWS ONLY"
    );
}

#[test]
fn test_mssql_top() {
    let q = MsSqlQuery::from_("abc").select(["a"]).unwrap().top(5).unwrap();
    assert_eq!(q.to_sql().unwrap(), "SELECT TOP (5) \"a\" FROM \"abc\"");
}

#[test]
fn test_postgres_distinct_on() {
    let q = PostgresQuery::from_("abc")
        .distinct_on(["a"])
        .unwrap()
        .select(["a", "b"])
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT DISTINCT ON(\"a\") \"a\",\"b\" FROM \"abc\""
    );
}

#[test]
fn test_groupby_alias_per_dialect() {
    let build = |dialect: Dialect| {
        let t = Table::new("abc");
        QueryBuilder::new(dialect)
            .from_(t.clone())
            .select([t.field("a").as_("x")])
            .unwrap()
            .groupby([t.field("a").as_("x")])
            .unwrap()
            .to_sql()
            .unwrap()
    };
    assert_eq!(
        build(Dialect::Postgres),
        "SELECT \"a\" \"x\" FROM \"abc\" GROUP BY \"x\""
    );
    assert_eq!(
        build(Dialect::Oracle),
        "SELECT \"a\" \"x\" FROM \"abc\" GROUP BY \"a\""
    );
}

#[test]
fn test_sqlite_booleans() {
    let q = SqliteQuery::from_("abc")
        .select(["a"])
        .unwrap()
        .where_(Term::field("active").eq(true))
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT \"a\" FROM \"abc\" WHERE \"active\"=1"
    );
}

#[test]
fn test_mysql_string_escaping() {
    let q = MySqlQuery::from_("abc")
        .select(["a"])
        .unwrap()
        .where_(Term::field("p").eq(r"C:\tmp"))
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        r"SELECT `a` FROM `abc` WHERE `p`='C:\\tmp'"
    );
}

#[test]
fn test_mssql_pow_is_power() {
    let q = MsSqlQuery::from_("abc")
        .select([Term::field("a").pow(2)])
        .unwrap();
    assert_eq!(q.to_sql().unwrap(), "SELECT POWER(\"a\",2) FROM \"abc\"");
}

#[test]
fn test_mysql_for_update_modifiers() {
    let q = MySqlQuery::from_("abc")
        .select(["a"])
        .unwrap()
        .force_index(["idx_a"])
        .for_update(ForUpdate::new().skip_locked())
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT `a` FROM `abc` FORCE INDEX (`idx_a`) FOR UPDATE SKIP LOCKED"
    );
}

#[test]
fn test_dialect_names_round_trip() {
    for dialect in Dialect::ALL {
        assert_eq!(dialect.to_string().parse::<Dialect>(), Ok(dialect));
    }
    assert_eq!("postgresql".parse::<Dialect>(), Ok(Dialect::Postgres));
}

#[test]
fn test_render_with_overridden_context() {
    let q = Query::from_("abc").select(["a"]).unwrap();
    let ctx = RenderContext::for_dialect(Dialect::Generic).quote_char("`");
    assert_eq!(q.render(&ctx).unwrap(), "SELECT `a` FROM `abc`");
}
