//! INTERVAL literal tests.

use quarry::expr::IntervalParts;
use quarry::prelude::*;

fn render(interval: Interval, dialect: Dialect) -> String {
    Term::from(interval)
        .render(&RenderContext::for_dialect(dialect))
        .unwrap()
}

#[test]
fn test_single_unit() {
    assert_eq!(render(Interval::days(7), Dialect::Generic), "INTERVAL '7 DAY'");
    assert_eq!(render(Interval::days(7), Dialect::MySql), "INTERVAL '7' DAY");
    assert_eq!(render(Interval::days(7), Dialect::Oracle), "INTERVAL '7' DAY");
    assert_eq!(render(Interval::days(7), Dialect::Postgres), "INTERVAL '7 DAY'");
}

#[test]
fn test_compound_units() {
    let interval = Interval::new(IntervalParts {
        hours: 1,
        minutes: 30,
        ..Default::default()
    });
    assert_eq!(
        render(interval.clone(), Dialect::Generic),
        "INTERVAL '1:30 HOUR_MINUTE'"
    );
    assert_eq!(
        render(interval, Dialect::MySql),
        "INTERVAL '1:30' HOUR_MINUTE"
    );
}

#[test]
fn test_negative_interval() {
    assert_eq!(
        render(Interval::months(-3), Dialect::Generic),
        "INTERVAL '-3 MONTH'"
    );
}

#[test]
fn test_quarters_and_weeks() {
    assert_eq!(
        render(Interval::quarters(2), Dialect::Generic),
        "INTERVAL '2 QUARTER'"
    );
    assert_eq!(render(Interval::weeks(1), Dialect::MySql), "INTERVAL '1' WEEK");
}

#[test]
fn test_interval_arithmetic_in_query() {
    let events = Table::new("events");
    let q = PostgresQuery::from_(events.clone())
        .select([events.field("id")])
        .unwrap()
        .where_(
            events
                .field("created_at")
                .gt(Term::from(functions::now()) - Interval::days(1)),
        )
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT \"id\" FROM \"events\" WHERE \"created_at\">NOW()-INTERVAL '1 DAY'"
    );
}

#[test]
fn test_interval_is_never_parameterized() {
    let q = Query::from_("abc")
        .select([Term::from(functions::now()) + Interval::hours(2)])
        .unwrap();
    let (sql, values) = q.render_parameterized(None).unwrap();
    assert_eq!(sql, "SELECT NOW()+INTERVAL '2 HOUR' FROM \"abc\"");
    assert!(values.is_empty());
}
