//! Term tree - every expression that can appear in a statement.
//!
//! A [`Term`] is an immutable node: a [`TermKind`] plus an optional alias.
//! Criteria are terms too, built by the comparison methods of [`TermExt`]
//! and combined with `&`, `|` and `^`. The empty criterion is the identity
//! of every combinator, so `Term::all(vec![])` folds to nothing.

mod case;
mod ext;
pub mod function;
mod interval;
mod negate;
mod ops;
mod render;
mod visit;

pub use case::Case;
pub use ext::TermExt;
pub use function::{CustomFunction, Edge, Frame, FrameKind, Function};
pub use interval::{Interval, IntervalParts};
pub use negate::{not_, Negatable, Not};
pub use ops::{ArithmeticOp, BooleanOp, Comparator, Order};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

use super::param::Parameter;
use super::query::{QueryBuilder, SetOperation};
use super::table::Source;
use super::value::{DatePart, Value};

/// One step of a JSON attribute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonPathStep {
    Key(String),
    Index(i64),
}

impl From<&str> for JsonPathStep {
    fn from(key: &str) -> Self {
        JsonPathStep::Key(key.to_string())
    }
}

impl From<String> for JsonPathStep {
    fn from(key: String) -> Self {
        JsonPathStep::Key(key)
    }
}

impl From<i64> for JsonPathStep {
    fn from(idx: i64) -> Self {
        JsonPathStep::Index(idx)
    }
}

impl From<i32> for JsonPathStep {
    fn from(idx: i32) -> Self {
        JsonPathStep::Index(idx.into())
    }
}

// =============================================================================
// Term
// =============================================================================

/// An expression node with an optional alias.
///
/// `Term` deliberately has no `PartialEq`: `eq` builds an equality criterion.
#[derive(Debug, Clone)]
pub struct Term {
    pub(crate) kind: TermKind,
    pub(crate) alias: Option<String>,
}

/// Every kind of term.
///
/// Every variant must be handled in `to_tokens()` - the compiler enforces this.
#[derive(Debug, Clone)]
pub enum TermKind {
    /// Raw SQL such as `NULL` or `SYSTEM_TIME`.
    Literal(String),
    /// Constant value, parameterized when the context carries a parameterizer.
    Value {
        value: Value,
        allow_parametrize: bool,
    },
    /// Column reference, optionally bound to a source.
    Field {
        name: String,
        table: Option<Source>,
    },
    /// `*` or `"t".*`
    Star(Option<Source>),
    /// `(a,b)`
    Tuple(Vec<Term>),
    /// `[a,b]`, or the dialect's array literal
    Array(Vec<Term>),
    Function(Box<Function>),
    Case(Box<Case>),
    Interval(Interval),
    /// JSON document literal.
    Json(serde_json::Value),
    Arithmetic {
        op: ArithmeticOp,
        left: Box<Term>,
        right: Box<Term>,
    },
    /// `-term`
    Negative(Box<Term>),
    Parameter(Parameter),

    // === Criteria ===
    Basic {
        comparator: Comparator,
        left: Box<Term>,
        right: Box<Term>,
    },
    Complex {
        op: BooleanOp,
        left: Box<Term>,
        right: Box<Term>,
    },
    /// `left cmp right nested_cmp nested`
    Nested {
        comparator: Comparator,
        nested_comparator: Comparator,
        left: Box<Term>,
        right: Box<Term>,
        nested: Box<Term>,
    },
    /// `term [NOT ]IN container`
    Contains {
        term: Box<Term>,
        container: Box<Term>,
        negated: bool,
    },
    Between {
        term: Box<Term>,
        start: Box<Term>,
        end: Box<Term>,
    },
    /// `term FROM start TO end`, used by temporal table clauses.
    Period {
        term: Box<Term>,
        start: Box<Term>,
        end: Box<Term>,
    },
    /// `(term & value)`
    BitwiseAnd {
        term: Box<Term>,
        value: i64,
    },
    IsNull(Box<Term>),
    Not(Box<Term>),
    /// `term ALL`
    All(Box<Term>),
    /// Dialect-specific JSON path access.
    JsonAttribute {
        column: Box<Term>,
        path: Vec<JsonPathStep>,
    },
    /// Nested SELECT.
    Subquery(Box<QueryBuilder>),
    SetOperation(Box<SetOperation>),
    /// `VALUES(field)` in MySQL upserts.
    Values(Box<Term>),
    /// Index name in FORCE/USE INDEX hints.
    Index(String),
    /// Unquoted pseudo column such as `ROWNUM`.
    PseudoColumn(String),
    AtTimezone {
        field: Box<Term>,
        zone: String,
        interval: bool,
    },
    /// Identity of the boolean combinators; renders nothing.
    Empty,
}

impl Term {
    pub(crate) fn new(kind: TermKind) -> Self {
        Self { kind, alias: None }
    }

    pub fn kind(&self) -> &TermKind {
        &self.kind
    }

    /// The alias of this term. Subqueries report the alias of the query.
    pub fn alias(&self) -> Option<String> {
        match &self.kind {
            TermKind::Subquery(query) => query.alias(),
            TermKind::SetOperation(op) => op.alias(),
            _ => self.alias.clone(),
        }
    }

    pub(crate) fn set_alias(&mut self, alias: Option<String>) {
        match &mut self.kind {
            TermKind::Subquery(query) => query.set_alias(alias),
            TermKind::SetOperation(op) => op.set_alias(alias),
            _ => self.alias = alias,
        }
    }

    // ===== Constructors =====

    /// Raw SQL emitted verbatim.
    pub fn literal(sql: impl Into<String>) -> Self {
        Self::new(TermKind::Literal(sql.into()))
    }

    pub fn null() -> Self {
        Self::literal("NULL")
    }

    pub fn system_time() -> Self {
        Self::literal("SYSTEM_TIME")
    }

    /// A constant value.
    pub fn value(value: impl Into<Value>) -> Self {
        Self::new(TermKind::Value {
            value: value.into(),
            allow_parametrize: true,
        })
    }

    /// A constant value that is always rendered inline.
    pub fn inline(value: impl Into<Value>) -> Self {
        Self::new(TermKind::Value {
            value: value.into(),
            allow_parametrize: false,
        })
    }

    /// A column not bound to any table.
    pub fn field(name: impl Into<String>) -> Self {
        Self::new(TermKind::Field {
            name: name.into(),
            table: None,
        })
    }

    pub(crate) fn bound_field(name: impl Into<String>, table: Option<Source>) -> Self {
        Self::new(TermKind::Field {
            name: name.into(),
            table,
        })
    }

    pub fn star() -> Self {
        Self::new(TermKind::Star(None))
    }

    pub fn tuple<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        Self::new(TermKind::Tuple(items.into_iter().map(Into::into).collect()))
    }

    /// A single parenthesized term.
    pub fn bracket(term: impl Into<Term>) -> Self {
        Self::tuple([term.into()])
    }

    pub fn array<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        Self::new(TermKind::Array(items.into_iter().map(Into::into).collect()))
    }

    /// A JSON document literal.
    pub fn json(value: serde_json::Value) -> Self {
        Self::new(TermKind::Json(value))
    }

    pub fn parameter(parameter: Parameter) -> Self {
        Self::new(TermKind::Parameter(parameter))
    }

    pub fn index(name: impl Into<String>) -> Self {
        Self::new(TermKind::Index(name.into()))
    }

    pub fn pseudo_column(name: impl Into<String>) -> Self {
        Self::new(TermKind::PseudoColumn(name.into()))
    }

    /// `VALUES(field)`
    pub fn values(field: impl Into<ColumnRef>) -> Self {
        let field = match field.into() {
            ColumnRef::Name(name) => Term::field(name),
            ColumnRef::Term(term) => term,
        };
        Self::new(TermKind::Values(Box::new(field)))
    }

    /// `field AT TIME ZONE 'zone'`, or `AT TIME ZONE INTERVAL 'zone'`.
    pub fn at_timezone(field: impl Into<ColumnRef>, zone: impl Into<String>, interval: bool) -> Self {
        let field = match field.into() {
            ColumnRef::Name(name) => Term::field(name),
            ColumnRef::Term(term) => term,
        };
        Self::new(TermKind::AtTimezone {
            field: Box::new(field),
            zone: zone.into(),
            interval,
        })
    }

    /// The empty criterion.
    pub fn empty() -> Self {
        Self::new(TermKind::Empty)
    }

    /// OR of all criteria; the empty criterion when there are none.
    pub fn any<I, T>(terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        terms
            .into_iter()
            .fold(Term::empty(), |acc, term| acc | term.into())
    }

    /// AND of all criteria; the empty criterion when there are none.
    pub fn all<I, T>(terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        terms
            .into_iter()
            .fold(Term::empty(), |acc, term| acc & term.into())
    }

    pub(crate) fn basic(comparator: Comparator, left: Term, right: Term) -> Self {
        Self::new(TermKind::Basic {
            comparator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub(crate) fn complex(op: BooleanOp, left: Term, right: Term) -> Self {
        if left.is_empty_criterion() {
            return right;
        }
        if right.is_empty_criterion() {
            return left;
        }
        Self::new(TermKind::Complex {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub(crate) fn arithmetic(op: ArithmeticOp, left: Term, right: Term) -> Self {
        Self::new(TermKind::Arithmetic {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// `left comparator right nested_comparator nested`
    pub fn nested(
        comparator: Comparator,
        nested_comparator: Comparator,
        left: impl Into<Term>,
        right: impl Into<Term>,
        nested: impl Into<Term>,
    ) -> Self {
        Self::new(TermKind::Nested {
            comparator,
            nested_comparator,
            left: Box::new(left.into()),
            right: Box::new(right.into()),
            nested: Box::new(nested.into()),
        })
    }

    // ===== Queries =====

    pub fn is_empty_criterion(&self) -> bool {
        matches!(self.kind, TermKind::Empty)
    }

    /// The wrapped value of a constant term.
    pub(crate) fn as_value(&self) -> Option<&Value> {
        match &self.kind {
            TermKind::Value { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Source of a field or star term.
    pub(crate) fn source(&self) -> Option<&Source> {
        match &self.kind {
            TermKind::Field { table, .. } => table.as_ref(),
            TermKind::Star(table) => table.as_ref(),
            _ => None,
        }
    }

    pub(crate) fn is_star(&self) -> bool {
        matches!(self.kind, TermKind::Star(_))
    }
}

// =============================================================================
// Conversions
// =============================================================================

macro_rules! value_term {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Term {
                fn from(v: $ty) -> Self {
                    Term::value(v)
                }
            }
        )*
    };
}

value_term!(
    bool,
    i32,
    i64,
    u32,
    f64,
    &str,
    String,
    NaiveDate,
    NaiveTime,
    NaiveDateTime,
    DateTime<FixedOffset>,
    Uuid,
    serde_json::Value,
    DatePart,
    Value
);

impl<T: Into<Term>> From<Option<T>> for Term {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Term::null(),
        }
    }
}

impl<T: Into<Term>> From<Vec<T>> for Term {
    fn from(items: Vec<T>) -> Self {
        Term::array(items)
    }
}

impl From<QueryBuilder> for Term {
    fn from(query: QueryBuilder) -> Self {
        Term::new(TermKind::Subquery(Box::new(query)))
    }
}

impl From<SetOperation> for Term {
    fn from(op: SetOperation) -> Self {
        Term::new(TermKind::SetOperation(Box::new(op)))
    }
}

impl From<Parameter> for Term {
    fn from(p: Parameter) -> Self {
        Term::parameter(p)
    }
}

impl From<Function> for Term {
    fn from(f: Function) -> Self {
        let alias = f.alias.clone();
        Term {
            kind: TermKind::Function(Box::new(f)),
            alias,
        }
    }
}

impl From<Case> for Term {
    fn from(c: Case) -> Self {
        let alias = c.alias.clone();
        Term {
            kind: TermKind::Case(Box::new(c)),
            alias,
        }
    }
}

impl From<Interval> for Term {
    fn from(i: Interval) -> Self {
        Term::new(TermKind::Interval(i))
    }
}

/// A column argument: a bare name resolved against the query's first FROM
/// source, or a ready-made term.
#[derive(Debug, Clone)]
pub enum ColumnRef {
    Name(String),
    Term(Term),
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        ColumnRef::Name(name.to_string())
    }
}

impl From<String> for ColumnRef {
    fn from(name: String) -> Self {
        ColumnRef::Name(name)
    }
}

impl From<Term> for ColumnRef {
    fn from(term: Term) -> Self {
        ColumnRef::Term(term)
    }
}

impl From<Function> for ColumnRef {
    fn from(f: Function) -> Self {
        ColumnRef::Term(f.into())
    }
}

impl From<Case> for ColumnRef {
    fn from(c: Case) -> Self {
        ColumnRef::Term(c.into())
    }
}

impl From<Not> for ColumnRef {
    fn from(n: Not) -> Self {
        ColumnRef::Term(n.into())
    }
}

impl From<QueryBuilder> for ColumnRef {
    fn from(q: QueryBuilder) -> Self {
        ColumnRef::Term(Term::from(q))
    }
}
