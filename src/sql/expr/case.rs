//! CASE expressions.

use super::Term;

/// `CASE WHEN c THEN v .. [ELSE e] END`
///
/// Rendering a CASE without any WHEN clause is an error.
#[derive(Debug, Clone, Default)]
pub struct Case {
    pub(crate) cases: Vec<(Term, Term)>,
    pub(crate) else_: Option<Term>,
    pub(crate) alias: Option<String>,
}

impl Case {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn when(mut self, criterion: impl Into<Term>, value: impl Into<Term>) -> Self {
        self.cases.push((criterion.into(), value.into()));
        self
    }

    pub fn else_(mut self, value: impl Into<Term>) -> Self {
        self.else_ = Some(value.into());
        self
    }

    pub fn as_(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}
