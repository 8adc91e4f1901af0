//! Upserts: `ON CONFLICT` and MySQL's `INSERT IGNORE` / `ON DUPLICATE KEY UPDATE`.

use super::QueryBuilder;
use crate::sql::context::RenderContext;
use crate::sql::error::{QueryError, QueryResult};
use crate::sql::expr::{ColumnRef, Term};
use crate::sql::table::{Source, Table};
use crate::sql::token::{Node, Token, TokenStream};

/// Conflict target and action of an INSERT.
#[derive(Debug, Clone)]
pub(crate) struct Conflict {
    /// Set by `on_conflict`; routes `where_` to the conflict filters.
    pub(crate) active: bool,
    fields: Vec<Term>,
    pub(crate) do_nothing: bool,
    updates: Vec<(Term, Option<Term>)>,
    wheres: Term,
    update_wheres: Term,
}

impl Default for Conflict {
    fn default() -> Self {
        Self {
            active: false,
            fields: Vec::new(),
            do_nothing: false,
            updates: Vec::new(),
            wheres: Term::empty(),
            update_wheres: Term::empty(),
        }
    }
}

impl Conflict {
    pub(crate) fn add_where(&mut self, criterion: Term) -> QueryResult<()> {
        if self.do_nothing {
            return Err(QueryError::query("DO NOTHING doest not support WHERE"));
        }
        if !self.fields.is_empty() && !self.updates.is_empty() {
            self.update_wheres = std::mem::replace(&mut self.update_wheres, Term::empty()) & criterion;
        } else if !self.fields.is_empty() {
            self.wheres = std::mem::replace(&mut self.wheres, Term::empty()) & criterion;
        } else {
            return Err(QueryError::query("Can not have fieldless ON CONFLICT WHERE"));
        }
        Ok(())
    }

    pub(crate) fn replace_table(self, current: &Table, new: &Table) -> Self {
        let swap = |t: Term| t.replace_table(current, new);
        Self {
            active: self.active,
            fields: self.fields.into_iter().map(swap).collect(),
            do_nothing: self.do_nothing,
            updates: self
                .updates
                .into_iter()
                .map(|(field, value)| (swap(field), value.map(swap)))
                .collect(),
            wheres: swap(self.wheres),
            update_wheres: swap(self.update_wheres),
        }
    }
}

impl QueryBuilder {
    /// Open an `ON CONFLICT (fields)` clause. Bare names bind to the insert table.
    pub fn on_conflict<I, T>(mut self, fields: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<ColumnRef>,
    {
        let Some(table) = self.insert_table.clone() else {
            return Err(QueryError::query("On conflict only applies to insert query"));
        };
        let source = Source::Table(table);
        self.conflict.active = true;
        self.conflict.fields.extend(
            fields
                .into_iter()
                .map(|f| f.into().into_bound_term(Some(&source))),
        );
        Ok(self)
    }

    /// `DO NOTHING`, or `INSERT IGNORE` on MySQL.
    pub fn do_nothing(mut self) -> QueryResult<Self> {
        if !self.conflict.updates.is_empty() {
            return Err(QueryError::query("Can not have two conflict handlers"));
        }
        self.conflict.do_nothing = true;
        Ok(self)
    }

    /// `DO UPDATE SET field = value`. Without a value the field takes the
    /// incoming row's value (`EXCLUDED.field`, or the MySQL equivalent).
    pub fn do_update(
        mut self,
        field: impl Into<ColumnRef>,
        value: Option<impl Into<Term>>,
    ) -> QueryResult<Self> {
        if self.conflict.do_nothing {
            return Err(QueryError::query("Can not have two conflict handlers"));
        }
        let source = self.insert_table.clone().map(Source::Table);
        let field = field.into().into_bound_term(source.as_ref());
        self.conflict.updates.push((field, value.map(Into::into)));
        Ok(self)
    }

    /// `ON DUPLICATE KEY UPDATE field = value` (MySQL).
    pub fn on_duplicate_key_update(
        mut self,
        field: impl Into<ColumnRef>,
        value: Option<impl Into<Term>>,
    ) -> QueryResult<Self> {
        if !self.uses_duplicate_key() {
            return Err(QueryError::unsupported(self.dialect, "ON DUPLICATE KEY UPDATE"));
        }
        if self.insert_table.is_none() {
            return Err(QueryError::query("On conflict only applies to insert query"));
        }
        self.conflict.active = true;
        self.do_update(field, value)
    }

    /// `INSERT IGNORE` (MySQL).
    pub fn on_duplicate_key_ignore(self) -> QueryResult<Self> {
        if !self.uses_duplicate_key() {
            return Err(QueryError::unsupported(self.dialect, "INSERT IGNORE"));
        }
        self.do_nothing()
    }

    /// Conflict target and action, appended after VALUES or the INSERT-SELECT.
    pub(crate) fn conflict_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        if self.uses_duplicate_key() {
            return self.duplicate_key_tokens(ctx);
        }

        let conflict = &self.conflict;
        let mut ts = TokenStream::new();
        if !conflict.do_nothing && conflict.updates.is_empty() {
            if conflict.fields.is_empty() {
                return Ok(ts);
            }
            return Err(QueryError::query("No handler defined for on conflict"));
        }
        if !conflict.updates.is_empty() && conflict.fields.is_empty() {
            return Err(QueryError::query("Can not have fieldless on conflict do update"));
        }

        ts.space().push(Token::On).space().push(Token::Conflict);
        if !conflict.fields.is_empty() {
            let field_ctx = ctx.with_alias(true);
            let fields = conflict
                .fields
                .iter()
                .map(|f| f.to_tokens(&field_ctx))
                .collect::<QueryResult<Vec<_>>>()?;
            let mut list = TokenStream::new();
            for (i, field) in fields.into_iter().enumerate() {
                if i > 0 {
                    list.comma().space();
                }
                list.append(&field);
            }
            ts.space().lparen().append(&list).rparen();
        }
        if !conflict.wheres.is_empty_criterion() {
            ts.space()
                .push(Token::Where)
                .space()
                .append(&conflict.wheres.to_tokens(&ctx.subquery(true))?);
        }

        let action_ctx = ctx.with_namespace(false);
        if conflict.do_nothing {
            ts.space().push(Token::Do).space().push(Token::Nothing);
        } else {
            let value_ctx = action_ctx.with_namespace(true);
            let mut sets = Vec::with_capacity(conflict.updates.len());
            for (field, value) in &conflict.updates {
                let mut set = field.to_tokens(&action_ctx)?;
                set.push(Token::Eq);
                match value {
                    Some(value) => set.append(&value.to_tokens(&value_ctx)?),
                    None => set
                        .push(Token::Excluded)
                        .push(Token::Dot)
                        .append(&field.to_tokens(&action_ctx)?),
                };
                sets.push(set);
            }
            ts.space()
                .push(Token::Do)
                .space()
                .push(Token::Update)
                .space()
                .push(Token::Set)
                .space()
                .append(&TokenStream::join(sets, Token::Comma));

            if !conflict.update_wheres.is_empty_criterion() {
                ts.space().push(Token::Where).space().append(
                    &conflict
                        .update_wheres
                        .to_tokens(&action_ctx.subquery(true).with_namespace(true))?,
                );
            }
        }
        Ok(ts)
    }

    /// ` AS alias ON DUPLICATE KEY UPDATE f=v,...`; the alias renders only when the query has one.
    fn duplicate_key_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let mut ts = TokenStream::new();
        let alias = self.alias();
        ctx.as_keyword(true).push_alias(&mut ts, alias.as_deref());

        if self.conflict.updates.is_empty() {
            return Ok(ts);
        }
        let field_ctx = ctx.with_namespace(false);
        let mut sets = Vec::with_capacity(self.conflict.updates.len());
        for (field, value) in &self.conflict.updates {
            let mut set = field.to_tokens(&field_ctx)?;
            set.push(Token::Eq);
            match (value, &alias) {
                (Some(value), _) => set.append(&value.to_tokens(&field_ctx)?),
                (None, Some(alias)) => set
                    .push(Token::Ident(alias.clone()))
                    .push(Token::Dot)
                    .append(&field.to_tokens(&field_ctx)?),
                (None, None) => set
                    .push(Token::Values)
                    .lparen()
                    .append(&field.to_tokens(&field_ctx)?)
                    .rparen(),
            };
            sets.push(set);
        }
        ts.space()
            .push(Token::On)
            .space()
            .push(Token::DuplicateKey)
            .space()
            .push(Token::Update)
            .space()
            .append(&TokenStream::join(sets, Token::Comma));
        Ok(ts)
    }
}
