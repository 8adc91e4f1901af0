//! Named SQL function constructors.
//!
//! Each helper returns a [`Function`], so aliases, `DISTINCT`, `FILTER` and
//! window options chain on the result. String arguments are constants; pass
//! a field (`Term::field("x")` or `table.field("x")`) to reference a column.

use super::expr::function::SpecialParams;
use super::expr::{Function, Term};
use super::value::DatePart;

fn call<const N: usize>(name: &str, args: [Term; N]) -> Function {
    Function::new(name, args.into())
}

fn aggregate<const N: usize>(name: &str, args: [Term; N]) -> Function {
    Function::aggregate(name, args.into())
}

// ============================================================================
// Aggregates
// ============================================================================

/// `COUNT(term)`
pub fn count(term: impl Into<Term>) -> Function {
    aggregate("COUNT", [term.into()])
}

/// `COUNT(*)`
pub fn count_star() -> Function {
    aggregate("COUNT", [Term::star()])
}

/// `COUNT(DISTINCT term)`
pub fn count_distinct(term: impl Into<Term>) -> Function {
    count(term).distinct()
}

pub fn sum(term: impl Into<Term>) -> Function {
    aggregate("SUM", [term.into()])
}

pub fn avg(term: impl Into<Term>) -> Function {
    aggregate("AVG", [term.into()])
}

pub fn min(term: impl Into<Term>) -> Function {
    aggregate("MIN", [term.into()])
}

pub fn max(term: impl Into<Term>) -> Function {
    aggregate("MAX", [term.into()])
}

pub fn std(term: impl Into<Term>) -> Function {
    aggregate("STD", [term.into()])
}

pub fn std_dev(term: impl Into<Term>) -> Function {
    aggregate("STDDEV", [term.into()])
}

pub fn abs(term: impl Into<Term>) -> Function {
    aggregate("ABS", [term.into()])
}

pub fn first(term: impl Into<Term>) -> Function {
    aggregate("FIRST", [term.into()])
}

pub fn last(term: impl Into<Term>) -> Function {
    aggregate("LAST", [term.into()])
}

/// `APPROXIMATE_PERCENTILE(term USING PARAMETERS percentile=p)`
pub fn approximate_percentile(term: impl Into<Term>, percentile: f64) -> Function {
    aggregate("APPROXIMATE_PERCENTILE", [term.into()]).with_special(SpecialParams::Keywords(
        format!("USING PARAMETERS percentile={percentile:?}"),
    ))
}

// ============================================================================
// Math
// ============================================================================

pub fn sqrt(term: impl Into<Term>) -> Function {
    call("SQRT", [term.into()])
}

pub fn floor(term: impl Into<Term>) -> Function {
    call("FLOOR", [term.into()])
}

// ============================================================================
// Types
// ============================================================================

/// `CAST(term AS TYPE)`. The type name is upper-cased.
pub fn cast(term: impl Into<Term>, as_type: &str) -> Function {
    call("CAST", [term.into()])
        .with_special(SpecialParams::Keywords(format!("AS {}", as_type.to_uppercase())))
}

/// `CONVERT(term USING encoding)`
pub fn convert(term: impl Into<Term>, encoding: &str) -> Function {
    call("CONVERT", [term.into()])
        .with_special(SpecialParams::Keywords(format!("USING {encoding}")))
}

/// `CAST(term AS SIGNED)`
pub fn signed(term: impl Into<Term>) -> Function {
    cast(term, "SIGNED")
}

/// `CAST(term AS UNSIGNED)`
pub fn unsigned(term: impl Into<Term>) -> Function {
    cast(term, "UNSIGNED")
}

pub fn to_char(term: impl Into<Term>, format: impl Into<Term>) -> Function {
    call("TO_CHAR", [term.into(), format.into()])
}

// ============================================================================
// Dates and times
// ============================================================================

pub fn date(term: impl Into<Term>) -> Function {
    call("DATE", [term.into()])
}

pub fn date_diff(
    interval: impl Into<Term>,
    start: impl Into<Term>,
    end: impl Into<Term>,
) -> Function {
    call("DATEDIFF", [interval.into(), start.into(), end.into()])
}

pub fn time_diff(start: impl Into<Term>, end: impl Into<Term>) -> Function {
    call("TIMEDIFF", [start.into(), end.into()])
}

pub fn date_add(
    date_part: impl Into<Term>,
    interval: impl Into<Term>,
    term: impl Into<Term>,
) -> Function {
    call("DATE_ADD", [date_part.into(), interval.into(), term.into()])
}

pub fn to_date(value: impl Into<Term>, format_mask: impl Into<Term>) -> Function {
    call("TO_DATE", [value.into(), format_mask.into()])
}

pub fn timestamp(term: impl Into<Term>) -> Function {
    call("TIMESTAMP", [term.into()])
}

pub fn timestamp_add(
    date_part: impl Into<Term>,
    interval: impl Into<Term>,
    term: impl Into<Term>,
) -> Function {
    call("TIMESTAMPADD", [date_part.into(), interval.into(), term.into()])
}

pub fn now() -> Function {
    call("NOW", [])
}

pub fn utc_timestamp() -> Function {
    call("UTC_TIMESTAMP", [])
}

/// `CURRENT_TIMESTAMP`, without parentheses.
pub fn current_timestamp() -> Function {
    Function::bare("CURRENT_TIMESTAMP")
}

pub fn current_date() -> Function {
    call("CURRENT_DATE", [])
}

pub fn current_time() -> Function {
    call("CURRENT_TIME", [])
}

/// `EXTRACT(PART FROM term)`
pub fn extract(part: DatePart, term: impl Into<Term>) -> Function {
    call("EXTRACT", [Term::value(part)]).with_special(SpecialParams::From(Box::new(term.into())))
}

// ============================================================================
// Strings
// ============================================================================

pub fn ascii(term: impl Into<Term>) -> Function {
    call("ASCII", [term.into()])
}

pub fn bin(term: impl Into<Term>) -> Function {
    call("BIN", [term.into()])
}

/// `CONCAT(a, b, ...)`
pub fn concat<I, T>(terms: I) -> Function
where
    I: IntoIterator<Item = T>,
    T: Into<Term>,
{
    Function::new("CONCAT", terms.into_iter().map(Into::into).collect())
}

/// MySQL string `INSERT(term, start, stop, subterm)`.
pub fn insert(
    term: impl Into<Term>,
    start: impl Into<Term>,
    stop: impl Into<Term>,
    subterm: impl Into<Term>,
) -> Function {
    call(
        "INSERT",
        [term.into(), start.into(), stop.into(), subterm.into()],
    )
}

pub fn length(term: impl Into<Term>) -> Function {
    call("LENGTH", [term.into()])
}

pub fn upper(term: impl Into<Term>) -> Function {
    call("UPPER", [term.into()])
}

pub fn lower(term: impl Into<Term>) -> Function {
    call("LOWER", [term.into()])
}

pub fn substring(
    term: impl Into<Term>,
    start: impl Into<Term>,
    stop: impl Into<Term>,
) -> Function {
    call("SUBSTRING", [term.into(), start.into(), stop.into()])
}

pub fn reverse(term: impl Into<Term>) -> Function {
    call("REVERSE", [term.into()])
}

pub fn trim(term: impl Into<Term>) -> Function {
    call("TRIM", [term.into()])
}

pub fn split_part(
    term: impl Into<Term>,
    delimiter: impl Into<Term>,
    index: impl Into<Term>,
) -> Function {
    call("SPLIT_PART", [term.into(), delimiter.into(), index.into()])
}

/// `REGEXP_MATCHES(term, pattern[, modifiers])`
pub fn regexp_matches(
    term: impl Into<Term>,
    pattern: impl Into<Term>,
    modifiers: Option<&str>,
) -> Function {
    let mut args = vec![term.into(), pattern.into()];
    args.extend(modifiers.map(Term::value));
    Function::new("REGEXP_MATCHES", args)
}

/// `REGEXP_LIKE(term, pattern[, modifiers])`
pub fn regexp_like(
    term: impl Into<Term>,
    pattern: impl Into<Term>,
    modifiers: Option<&str>,
) -> Function {
    let mut args = vec![term.into(), pattern.into()];
    args.extend(modifiers.map(Term::value));
    Function::new("REGEXP_LIKE", args)
}

// ============================================================================
// Nulls
// ============================================================================

pub fn null_if(term: impl Into<Term>, condition: impl Into<Term>) -> Function {
    call("NULLIF", [term.into(), condition.into()])
}

pub fn is_null(term: impl Into<Term>) -> Function {
    call("ISNULL", [term.into()])
}

/// `COALESCE(term, defaults...)`
pub fn coalesce<I, T>(term: impl Into<Term>, defaults: I) -> Function
where
    I: IntoIterator<Item = T>,
    T: Into<Term>,
{
    let mut args = vec![term.into()];
    args.extend(defaults.into_iter().map(Into::into));
    Function::new("COALESCE", args)
}

pub fn if_null(condition: impl Into<Term>, term: impl Into<Term>) -> Function {
    call("IFNULL", [condition.into(), term.into()])
}

pub fn nvl(condition: impl Into<Term>, term: impl Into<Term>) -> Function {
    call("NVL", [condition.into(), term.into()])
}
