//! Function calls: plain, aggregate and analytic (windowed).
//!
//! A single [`Function`] struct covers every form. Aggregate options
//! (`DISTINCT`, `FILTER`) and window options (`OVER`, frames, `IGNORE NULLS`)
//! are plain fields that render only when set.

use std::fmt;

use super::{Order, Term};
use crate::sql::context::RenderContext;
use crate::sql::error::{QueryError, QueryResult};
use crate::sql::table::Schema;
use crate::sql::token::{Node, Token, TokenStream};

/// Extra text rendered inside the parentheses after the arguments.
#[derive(Debug, Clone)]
pub(crate) enum SpecialParams {
    /// Verbatim keywords, e.g. `AS INTEGER`.
    Keywords(String),
    IgnoreNulls,
    /// `FROM term`, used by EXTRACT.
    From(Box<Term>),
}

/// A function call term.
#[derive(Debug, Clone)]
pub struct Function {
    pub(crate) name: String,
    pub(crate) args: Vec<Term>,
    pub(crate) schema: Option<Schema>,
    pub(crate) alias: Option<String>,
    pub(crate) special: Option<SpecialParams>,
    /// Renders the bare name without parentheses.
    pub(crate) bare: bool,
    pub(crate) aggregate: bool,
    pub(crate) distinct: bool,
    pub(crate) filters: Option<Vec<Term>>,
    pub(crate) window: Option<Window>,
    pub(crate) frame: Option<Frame>,
}

/// PARTITION BY and ORDER BY of an OVER clause.
#[derive(Debug, Clone, Default)]
pub(crate) struct Window {
    pub(crate) partition: Vec<Term>,
    pub(crate) orderbys: Vec<(Term, Option<Order>)>,
}

/// ROWS or RANGE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Rows,
    Range,
}

impl FrameKind {
    fn token(self) -> Token {
        match self {
            FrameKind::Rows => Token::Rows,
            FrameKind::Range => Token::Range,
        }
    }
}

/// One bound of a window frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// `n PRECEDING`, or `UNBOUNDED PRECEDING` when the offset is absent or zero.
    Preceding(Option<u64>),
    /// `n FOLLOWING`, or `UNBOUNDED FOLLOWING` when the offset is absent or zero.
    Following(Option<u64>),
    CurrentRow,
}

impl Edge {
    fn tokens(self) -> TokenStream {
        let (offset, direction) = match self {
            Edge::Preceding(offset) => (offset, Token::Preceding),
            Edge::Following(offset) => (offset, Token::Following),
            Edge::CurrentRow => return TokenStream::from(Token::CurrentRow),
        };
        let mut ts = match offset {
            Some(n) if n > 0 => TokenStream::from(Token::Raw(n.to_string())),
            _ => TokenStream::from(Token::Unbounded),
        };
        ts.space().push(direction);
        ts
    }
}

/// Window frame: `ROWS bound` or `ROWS BETWEEN lower AND upper`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub kind: FrameKind,
    pub bound: Edge,
    pub and_bound: Option<Edge>,
}

impl Frame {
    pub(crate) fn tokens(&self) -> TokenStream {
        let mut ts = TokenStream::from(self.kind.token());
        ts.space();
        match self.and_bound {
            None => {
                ts.append(&self.bound.tokens());
            }
            Some(upper) => {
                ts.push(Token::Between)
                    .space()
                    .append(&self.bound.tokens())
                    .space()
                    .push(Token::And)
                    .space()
                    .append(&upper.tokens());
            }
        }
        ts
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens().serialize(&RenderContext::default()))
    }
}

impl Function {
    /// A plain function call `name(args)`.
    pub fn new(name: impl Into<String>, args: Vec<Term>) -> Self {
        Self {
            name: name.into(),
            args,
            schema: None,
            alias: None,
            special: None,
            bare: false,
            aggregate: false,
            distinct: false,
            filters: None,
            window: None,
            frame: None,
        }
    }

    /// An aggregate function call.
    pub fn aggregate(name: impl Into<String>, args: Vec<Term>) -> Self {
        Self {
            aggregate: true,
            ..Self::new(name, args)
        }
    }

    /// A niladic function rendered without parentheses, e.g. `CURRENT_TIMESTAMP`.
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            bare: true,
            ..Self::new(name, Vec::new())
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Term] {
        &self.args
    }

    pub fn is_aggregate(&self) -> bool {
        self.aggregate
    }

    pub fn as_(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Prefix the call with a schema: `"schema".name(..)`.
    pub fn with_schema(mut self, schema: impl Into<Schema>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub(crate) fn with_special(mut self, special: SpecialParams) -> Self {
        self.special = Some(special);
        self
    }

    // ===== Aggregate options =====

    /// `NAME(DISTINCT args)`
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// `NAME(args) FILTER(WHERE criteria)`; repeated calls AND the criteria together.
    pub fn filter<I, T>(mut self, criteria: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.filters
            .get_or_insert_with(Vec::new)
            .extend(criteria.into_iter().map(Into::into));
        self
    }

    // ===== Window options =====

    /// Add PARTITION BY terms and render the OVER clause.
    pub fn over<I, T>(mut self, partition: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.window
            .get_or_insert_with(Window::default)
            .partition
            .extend(partition.into_iter().map(Into::into));
        self
    }

    /// Add ORDER BY terms to the OVER clause.
    pub fn orderby<I, T>(mut self, terms: I, order: Option<Order>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.window
            .get_or_insert_with(Window::default)
            .orderbys
            .extend(terms.into_iter().map(|t| (t.into(), order)));
        self
    }

    /// `ROWS bound` or, with `and_bound`, `ROWS BETWEEN bound AND and_bound`.
    pub fn rows(self, bound: Edge, and_bound: Option<Edge>) -> QueryResult<Self> {
        self.set_frame(FrameKind::Rows, bound, and_bound)
    }

    /// `RANGE bound` or, with `and_bound`, `RANGE BETWEEN bound AND and_bound`.
    pub fn range(self, bound: Edge, and_bound: Option<Edge>) -> QueryResult<Self> {
        self.set_frame(FrameKind::Range, bound, and_bound)
    }

    fn set_frame(mut self, kind: FrameKind, bound: Edge, and_bound: Option<Edge>) -> QueryResult<Self> {
        if self.frame.is_some() {
            return Err(QueryError::Function(format!(
                "Window frame already set for function {}",
                self.name
            )));
        }
        self.frame = Some(Frame {
            kind,
            bound,
            and_bound,
        });
        Ok(self)
    }

    /// `NAME(args IGNORE NULLS)`
    pub fn ignore_nulls(self) -> Self {
        self.with_special(SpecialParams::IgnoreNulls)
    }
}

/// A user-defined function with a fixed parameter list.
#[derive(Debug, Clone)]
pub struct CustomFunction {
    name: String,
    params: Vec<String>,
}

impl CustomFunction {
    pub fn new<I, S>(name: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a call, checking that the argument count matches the parameter list.
    pub fn call<I, T>(&self, args: I) -> QueryResult<Function>
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        let args: Vec<Term> = args.into_iter().map(Into::into).collect();
        if args.len() != self.params.len() {
            let ctx = RenderContext::default();
            let rendered = args
                .iter()
                .map(|arg| arg.render(&ctx))
                .collect::<QueryResult<Vec<_>>>()?;
            return Err(QueryError::Function(format!(
                "Function {} require these arguments ({}), ({}) passed",
                self.name,
                self.params.join(", "),
                rendered.join(", ")
            )));
        }
        Ok(Function::new(self.name.clone(), args))
    }
}
