//! `NOT` wrapper whose builder methods stay negated.

use super::{JsonPathStep, Term, TermExt, TermKind};

/// A negated term. Builder methods called on it are applied to the inner
/// term and the result is negated again, so `not_(f).isin([1])` renders
/// `NOT "f" IN (1)`.
#[derive(Debug, Clone)]
pub struct Not {
    term: Term,
    alias: Option<String>,
}

/// Negate a term.
pub fn not_(term: impl Into<Term>) -> Not {
    Not {
        term: term.into(),
        alias: None,
    }
}

impl Not {
    pub fn as_(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Unwrap the negation.
    pub fn inner(&self) -> &Term {
        &self.term
    }

    fn rewrap(self, f: impl FnOnce(Term) -> Term) -> Not {
        Not {
            term: f(self.term),
            alias: self.alias,
        }
    }
}

impl From<Not> for Term {
    fn from(n: Not) -> Self {
        Term {
            kind: TermKind::Not(Box::new(n.term)),
            alias: n.alias,
        }
    }
}

/// Builder methods of a negated term.
pub trait Negatable: Sized {
    fn eq(self, other: impl Into<Term>) -> Self;
    fn ne(self, other: impl Into<Term>) -> Self;
    fn gt(self, other: impl Into<Term>) -> Self;
    fn gte(self, other: impl Into<Term>) -> Self;
    fn lt(self, other: impl Into<Term>) -> Self;
    fn lte(self, other: impl Into<Term>) -> Self;
    fn like(self, pattern: impl Into<Term>) -> Self;
    fn ilike(self, pattern: impl Into<Term>) -> Self;
    fn rlike(self, pattern: impl Into<Term>) -> Self;
    fn regex(self, pattern: impl Into<Term>) -> Self;
    fn glob(self, pattern: impl Into<Term>) -> Self;
    fn between(self, start: impl Into<Term>, end: impl Into<Term>) -> Self;
    fn isin<I, T>(self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>;
    fn isin_term(self, container: impl Into<Term>) -> Self;
    fn isnull(self) -> Self;
    fn bitwiseand(self, value: i64) -> Self;
    fn json_path<I, S>(self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<JsonPathStep>;
}

impl Negatable for Not {
    fn eq(self, other: impl Into<Term>) -> Self {
        self.rewrap(|t| t.eq(other))
    }

    fn ne(self, other: impl Into<Term>) -> Self {
        self.rewrap(|t| t.ne(other))
    }

    fn gt(self, other: impl Into<Term>) -> Self {
        self.rewrap(|t| t.gt(other))
    }

    fn gte(self, other: impl Into<Term>) -> Self {
        self.rewrap(|t| t.gte(other))
    }

    fn lt(self, other: impl Into<Term>) -> Self {
        self.rewrap(|t| t.lt(other))
    }

    fn lte(self, other: impl Into<Term>) -> Self {
        self.rewrap(|t| t.lte(other))
    }

    fn like(self, pattern: impl Into<Term>) -> Self {
        self.rewrap(|t| t.like(pattern))
    }

    fn ilike(self, pattern: impl Into<Term>) -> Self {
        self.rewrap(|t| t.ilike(pattern))
    }

    fn rlike(self, pattern: impl Into<Term>) -> Self {
        self.rewrap(|t| t.rlike(pattern))
    }

    fn regex(self, pattern: impl Into<Term>) -> Self {
        self.rewrap(|t| t.regex(pattern))
    }

    fn glob(self, pattern: impl Into<Term>) -> Self {
        self.rewrap(|t| t.glob(pattern))
    }

    fn between(self, start: impl Into<Term>, end: impl Into<Term>) -> Self {
        self.rewrap(|t| t.between(start, end))
    }

    fn isin<I, T>(self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.rewrap(|t| t.isin(items))
    }

    fn isin_term(self, container: impl Into<Term>) -> Self {
        self.rewrap(|t| t.isin_term(container))
    }

    fn isnull(self) -> Self {
        self.rewrap(|t| t.isnull())
    }

    fn bitwiseand(self, value: i64) -> Self {
        self.rewrap(|t| t.bitwiseand(value))
    }

    fn json_path<I, S>(self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<JsonPathStep>,
    {
        self.rewrap(|t| t.json_path(path))
    }
}
