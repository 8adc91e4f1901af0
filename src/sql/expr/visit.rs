//! Traversal of term trees.
//!
//! Walks stop at subqueries: a nested statement keeps its own tables.

use super::function::SpecialParams;
use super::{ColumnRef, Term, TermKind};
use crate::sql::table::{Source, Table};

impl Term {
    /// Visit this term and every nested term, parents first.
    pub(crate) fn walk(&self, f: &mut impl FnMut(&Term)) {
        f(self);
        match &self.kind {
            TermKind::Tuple(items) | TermKind::Array(items) => {
                items.iter().for_each(|t| t.walk(f));
            }
            TermKind::Function(function) => {
                function.args.iter().for_each(|t| t.walk(f));
                if let Some(SpecialParams::From(term)) = &function.special {
                    term.walk(f);
                }
            }
            TermKind::Case(case) => {
                for (criterion, value) in &case.cases {
                    criterion.walk(f);
                    value.walk(f);
                }
                if let Some(else_) = &case.else_ {
                    else_.walk(f);
                }
            }
            TermKind::Arithmetic { left, right, .. }
            | TermKind::Basic { left, right, .. }
            | TermKind::Complex { left, right, .. } => {
                left.walk(f);
                right.walk(f);
            }
            TermKind::Nested {
                left,
                right,
                nested,
                ..
            } => {
                left.walk(f);
                right.walk(f);
                nested.walk(f);
            }
            TermKind::Contains {
                term, container, ..
            } => {
                term.walk(f);
                container.walk(f);
            }
            TermKind::Between { term, start, end } | TermKind::Period { term, start, end } => {
                term.walk(f);
                start.walk(f);
                end.walk(f);
            }
            TermKind::BitwiseAnd { term, .. }
            | TermKind::IsNull(term)
            | TermKind::Not(term)
            | TermKind::All(term)
            | TermKind::Negative(term)
            | TermKind::Values(term) => term.walk(f),
            TermKind::JsonAttribute { column, .. } => column.walk(f),
            TermKind::AtTimezone { field, .. } => field.walk(f),
            TermKind::Literal(_)
            | TermKind::Value { .. }
            | TermKind::Field { .. }
            | TermKind::Star(_)
            | TermKind::Interval(_)
            | TermKind::Json(_)
            | TermKind::Parameter(_)
            | TermKind::Subquery(_)
            | TermKind::SetOperation(_)
            | TermKind::Index(_)
            | TermKind::PseudoColumn(_)
            | TermKind::Empty => {}
        }
    }

    /// Mutable counterpart of [`Term::walk`].
    pub(crate) fn walk_mut(&mut self, f: &mut impl FnMut(&mut Term)) {
        f(self);
        match &mut self.kind {
            TermKind::Tuple(items) | TermKind::Array(items) => {
                items.iter_mut().for_each(|t| t.walk_mut(f));
            }
            TermKind::Function(function) => {
                function.args.iter_mut().for_each(|t| t.walk_mut(f));
                if let Some(SpecialParams::From(term)) = &mut function.special {
                    term.walk_mut(f);
                }
            }
            TermKind::Case(case) => {
                for (criterion, value) in &mut case.cases {
                    criterion.walk_mut(f);
                    value.walk_mut(f);
                }
                if let Some(else_) = &mut case.else_ {
                    else_.walk_mut(f);
                }
            }
            TermKind::Arithmetic { left, right, .. }
            | TermKind::Basic { left, right, .. }
            | TermKind::Complex { left, right, .. } => {
                left.walk_mut(f);
                right.walk_mut(f);
            }
            TermKind::Nested {
                left,
                right,
                nested,
                ..
            } => {
                left.walk_mut(f);
                right.walk_mut(f);
                nested.walk_mut(f);
            }
            TermKind::Contains {
                term, container, ..
            } => {
                term.walk_mut(f);
                container.walk_mut(f);
            }
            TermKind::Between { term, start, end } | TermKind::Period { term, start, end } => {
                term.walk_mut(f);
                start.walk_mut(f);
                end.walk_mut(f);
            }
            TermKind::BitwiseAnd { term, .. }
            | TermKind::IsNull(term)
            | TermKind::Not(term)
            | TermKind::All(term)
            | TermKind::Negative(term)
            | TermKind::Values(term) => term.walk_mut(f),
            TermKind::JsonAttribute { column, .. } => column.walk_mut(f),
            TermKind::AtTimezone { field, .. } => field.walk_mut(f),
            TermKind::Literal(_)
            | TermKind::Value { .. }
            | TermKind::Field { .. }
            | TermKind::Star(_)
            | TermKind::Interval(_)
            | TermKind::Json(_)
            | TermKind::Parameter(_)
            | TermKind::Subquery(_)
            | TermKind::SetOperation(_)
            | TermKind::Index(_)
            | TermKind::PseudoColumn(_)
            | TermKind::Empty => {}
        }
    }

    /// Sources of every field referenced by this term. Unbound fields yield `None`.
    pub(crate) fn field_sources(&self) -> Vec<Option<Source>> {
        let mut out = Vec::new();
        self.walk(&mut |term| {
            if let TermKind::Field { table, .. } = &term.kind {
                out.push(table.clone());
            }
        });
        out
    }

    /// Rebind fields of `current` to `new`.
    pub fn replace_table(mut self, current: &Table, new: &Table) -> Term {
        self.walk_mut(&mut |term| {
            if let TermKind::Field {
                table: Some(source),
                ..
            }
            | TermKind::Star(Some(source)) = &mut term.kind
            {
                if matches!(source, Source::Table(t) if t == current) {
                    *source = Source::Table(new.clone());
                }
            }
        });
        self
    }
}

impl ColumnRef {
    /// The column as a term, binding bare names to `table`.
    pub(crate) fn into_bound_term(self, table: Option<&Source>) -> Term {
        match self {
            ColumnRef::Name(name) => Term::bound_field(name, table.cloned()),
            ColumnRef::Term(term) => term,
        }
    }
}
