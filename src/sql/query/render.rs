//! Statement rendering for [`QueryBuilder`].
//!
//! Clauses are rendered strictly left to right so that bind values land in
//! the parameterizer in the order their placeholders appear.

use tracing::debug;

use super::QueryBuilder;
use crate::sql::context::RenderContext;
use crate::sql::dialect::{SqlDialect, UpdateLayout};
use crate::sql::error::QueryResult;
use crate::sql::expr::Term;
use crate::sql::param::Parameterizer;
use crate::sql::table::{Selectable, Table};
use crate::sql::token::{Node, Token, TokenStream};
use crate::sql::value::Value;

fn terms_tokens<'a>(
    terms: impl IntoIterator<Item = &'a Term>,
    ctx: &RenderContext,
    sep: Token,
) -> QueryResult<TokenStream> {
    let rendered = terms
        .into_iter()
        .map(|term| term.to_tokens(ctx))
        .collect::<QueryResult<Vec<_>>>()?;
    Ok(TokenStream::join(rendered, sep))
}

impl QueryBuilder {
    /// Render with this builder's dialect defaults.
    pub fn to_sql(&self) -> QueryResult<String> {
        self.render(&RenderContext::for_dialect(self.dialect))
    }

    /// Render with placeholders in place of bind values.
    ///
    /// A fresh [`Parameterizer`] is attached unless `ctx` already carries one.
    /// Returns the SQL text and the captured values in placeholder order.
    pub fn render_parameterized(
        &self,
        ctx: Option<&RenderContext>,
    ) -> QueryResult<(String, Vec<Value>)> {
        let mut ctx = ctx
            .cloned()
            .unwrap_or_else(|| RenderContext::for_dialect(self.dialect));
        let parameterizer = ctx
            .parameterizer
            .get_or_insert_with(Parameterizer::new)
            .clone();
        let sql = self.render(&ctx)?;
        let values = parameterizer.values();
        debug!(
            dialect = %self.dialect,
            placeholders = values.len(),
            "rendered parameterized query"
        );
        Ok((sql, values))
    }

    /// Alias of [`QueryBuilder::render_parameterized`].
    pub fn get_parameterized_sql(
        &self,
        ctx: Option<&RenderContext>,
    ) -> QueryResult<(String, Vec<Value>)> {
        self.render_parameterized(ctx)
    }

    fn is_empty_statement(&self) -> bool {
        let has_statement = !self.selects.is_empty()
            || self.insert_table.is_some()
            || self.delete_from
            || self.update_table.is_some();
        if !has_statement {
            return true;
        }
        if self.insert_table.is_some() && self.selects.is_empty() && self.values.is_empty() {
            return true;
        }
        self.update_table.is_some() && self.updates.is_empty()
    }

    fn needs_namespace(&self) -> bool {
        !self.joins.is_empty()
            || self.from.len() > 1
            || matches!(self.from.first(), Some(Selectable::Query(_)))
            || self.foreign_table
            || (self.update_table.is_some() && !self.from.is_empty())
    }

    /// Context for the clauses of this statement. Outer alias and subquery
    /// flags do not leak into nested clauses.
    fn clause_context(&self, ctx: &RenderContext) -> RenderContext {
        let mut inner = ctx
            .subquery(false)
            .with_alias(false)
            .with_namespace(self.needs_namespace());
        if !self.dialect.supports_groupby_alias() {
            inner.groupby_alias = false;
        }
        inner
    }

    fn selected_aliases(&self) -> Vec<String> {
        self.selects.iter().filter_map(Term::alias).collect()
    }

    // ===== Statement heads =====

    fn with_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let recursive = self.with.iter().any(|cte| match &cte.query {
            Selectable::Query(q) => q.references(&cte.name),
            Selectable::SetOperation(op) => op.references(&cte.name),
            _ => false,
        });
        let query_ctx = ctx.subquery(false).with_alias(false);
        let column_ctx = ctx.with_namespace(false);

        let mut clauses = Vec::with_capacity(self.with.len());
        for cte in &self.with {
            let mut ts = TokenStream::from(Token::Raw(cte.name.clone()));
            if !cte.columns.is_empty() {
                ts.lparen()
                    .append(&terms_tokens(&cte.columns, &column_ctx, Token::Comma)?)
                    .rparen();
            }
            ts.space()
                .push(Token::As)
                .space()
                .lparen()
                .append(&cte.query.to_tokens(&query_ctx)?)
                .rparen()
                .space();
            clauses.push(ts);
        }

        let mut ts = TokenStream::from(Token::With);
        ts.space();
        if recursive {
            ts.push(Token::Recursive).space();
        }
        ts.append(&TokenStream::join(clauses, Token::Comma));
        Ok(ts)
    }

    fn select_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let mut ts = TokenStream::from(Token::Select);
        ts.space();
        if !self.distinct_on.is_empty() {
            ts.push(Token::Distinct)
                .space()
                .push(Token::On)
                .lparen()
                .append(&terms_tokens(&self.distinct_on, &ctx.with_alias(true), Token::Comma)?)
                .rparen()
                .space();
        } else if self.distinct {
            ts.push(Token::Distinct).space();
        }
        if let Some(top) = self.top.filter(|n| *n != 0) {
            ts.push(Token::Top)
                .space()
                .lparen()
                .push(Token::LitInt(top))
                .rparen()
                .space();
        }
        if !self.modifiers.is_empty() {
            ts.raw(self.modifiers.join(" ")).space();
        }
        let select_ctx = ctx.subquery(true).with_alias(true);
        ts.append(&terms_tokens(&self.selects, &select_ctx, Token::Comma)?);

        if self.select_into {
            if let Some(table) = &self.insert_table {
                ts.space()
                    .push(Token::Into)
                    .space()
                    .append(&table.to_tokens(ctx)?);
            }
        }
        Ok(ts)
    }

    fn insert_head_tokens(&self, table: &Table, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let mut ts = TokenStream::new();
        if self.replace {
            ts.push(Token::Replace).space();
        } else {
            ts.push(Token::Insert).space();
            if self.uses_duplicate_key() && self.conflict.do_nothing {
                ts.push(Token::Ignore).space();
            }
        }
        ts.push(Token::Into).space().append(&table.to_tokens(ctx)?);

        if !self.columns.is_empty() {
            ts.space()
                .lparen()
                .append(&terms_tokens(
                    &self.columns,
                    &ctx.with_namespace(false),
                    Token::Comma,
                )?)
                .rparen();
        }
        Ok(ts)
    }

    fn values_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let value_ctx = ctx.subquery(true).with_alias(true);
        let rows = self
            .values
            .iter()
            .map(|row| {
                let mut ts = terms_tokens(row, &value_ctx, Token::Comma)?;
                ts.parenthesize();
                Ok(ts)
            })
            .collect::<QueryResult<Vec<_>>>()?;
        let mut ts = TokenStream::new();
        ts.space()
            .push(Token::Values)
            .space()
            .append(&TokenStream::join(rows, Token::Comma));
        Ok(ts)
    }

    fn set_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let field_ctx = ctx.with_namespace(false);
        let value_ctx = ctx.subquery(true);
        let mut assignments = Vec::with_capacity(self.updates.len());
        for (field, value) in &self.updates {
            let mut ts = field.to_tokens(&field_ctx)?;
            ts.push(Token::Eq).append(&value.to_tokens(&value_ctx)?);
            assignments.push(ts);
        }
        let mut ts = TokenStream::new();
        ts.space()
            .push(Token::Set)
            .space()
            .append(&TokenStream::join(assignments, Token::Comma));
        Ok(ts)
    }

    // ===== Clauses =====

    fn from_tokens(&self, items: &[Selectable], ctx: &RenderContext) -> QueryResult<TokenStream> {
        let item_ctx = ctx.subquery(true).with_alias(true);
        let rendered = items
            .iter()
            .map(|item| item.to_tokens(&item_ctx))
            .collect::<QueryResult<Vec<_>>>()?;
        let mut ts = TokenStream::new();
        ts.space()
            .push(Token::From)
            .space()
            .append(&TokenStream::join(rendered, Token::Comma));
        Ok(ts)
    }

    fn joins_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let rendered = self
            .joins
            .iter()
            .map(|join| join.to_tokens(ctx))
            .collect::<QueryResult<Vec<_>>>()?;
        let mut ts = TokenStream::new();
        ts.space().append(&TokenStream::join(rendered, Token::Space));
        Ok(ts)
    }

    fn index_hint_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let mut ts = TokenStream::new();
        if !self.force_indexes.is_empty() {
            ts.space()
                .push(Token::Force)
                .space()
                .push(Token::Index)
                .space()
                .lparen()
                .append(&terms_tokens(&self.force_indexes, ctx, Token::Comma)?)
                .rparen();
        }
        if !self.use_indexes.is_empty() {
            ts.space()
                .push(Token::Use)
                .space()
                .push(Token::Index)
                .space()
                .lparen()
                .append(&terms_tokens(&self.use_indexes, ctx, Token::Comma)?)
                .rparen();
        }
        Ok(ts)
    }

    fn criterion_tokens(keyword: Token, criterion: &Term, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let mut ts = TokenStream::new();
        if !criterion.is_empty_criterion() {
            ts.space()
                .push(keyword)
                .space()
                .append(&criterion.to_tokens(&ctx.subquery(true))?);
        }
        Ok(ts)
    }

    fn groupby_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let mut ts = TokenStream::new();
        if self.groupbys.is_empty() {
            return Ok(ts);
        }
        let selected = self.selected_aliases();
        let mut clauses = Vec::with_capacity(self.groupbys.len());
        for term in &self.groupbys {
            let clause = match term.alias() {
                Some(alias) if selected.contains(&alias) => {
                    if ctx.groupby_alias {
                        TokenStream::from(Token::Alias(alias))
                    } else {
                        let select = self
                            .selects
                            .iter()
                            .find(|s| s.alias().as_deref() == Some(alias.as_str()))
                            .unwrap_or(term);
                        select.to_tokens(ctx)?
                    }
                }
                _ => term.to_tokens(ctx)?,
            };
            clauses.push(clause);
        }
        ts.space()
            .push(Token::GroupBy)
            .space()
            .append(&TokenStream::join(clauses, Token::Comma));
        if self.with_totals {
            ts.space().push(Token::With).space().push(Token::Totals);
        }
        if self.mysql_rollup {
            ts.space().push(Token::With).space().push(Token::Rollup);
        }
        Ok(ts)
    }

    fn orderby_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let mut ts = TokenStream::new();
        if self.orderbys.is_empty() {
            return Ok(ts);
        }
        let selected = self.selected_aliases();
        let mut clauses = Vec::with_capacity(self.orderbys.len());
        for (term, order) in &self.orderbys {
            let mut clause = match term.alias() {
                Some(alias) if ctx.orderby_alias && selected.contains(&alias) => {
                    TokenStream::from(Token::Alias(alias))
                }
                _ => term.to_tokens(ctx)?,
            };
            if let Some(order) = order {
                clause.space().raw(order.as_str());
            }
            clauses.push(clause);
        }
        ts.space()
            .push(Token::OrderBy)
            .space()
            .append(&TokenStream::join(clauses, Token::Comma));
        Ok(ts)
    }

    fn pagination_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let render = |term: &Option<Term>| term.as_ref().map(|t| t.to_tokens(ctx)).transpose();
        let (limit, offset) = if self.dialect.offset_before_limit() {
            let offset = render(&self.offset)?;
            (render(&self.limit)?, offset)
        } else {
            let limit = render(&self.limit)?;
            (limit, render(&self.offset)?)
        };
        Ok(self
            .dialect
            .emit_limit_offset(limit, offset, !self.orderbys.is_empty()))
    }

    fn for_update_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let mut ts = TokenStream::new();
        let Some(options) = &self.for_update else {
            return Ok(ts);
        };
        ts.space().push(Token::For).space();
        if options.no_key {
            ts.push(Token::NoKey).space();
        }
        ts.push(Token::Update);
        if !options.of.is_empty() {
            let tables = options
                .of
                .iter()
                .map(|name| Table::new(name.clone()).to_tokens(ctx))
                .collect::<QueryResult<Vec<_>>>()?;
            ts.space()
                .push(Token::Of)
                .space()
                .append(&TokenStream::join(tables, Token::Raw(", ".into())));
        }
        if options.nowait {
            ts.space().push(Token::Nowait);
        } else if options.skip_locked {
            ts.space().push(Token::SkipLocked);
        }
        Ok(ts)
    }

    // ===== Statements =====

    fn update_tokens(&self, table: &Table, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let mut ts = TokenStream::new();
        if !self.with.is_empty() {
            ts.append(&self.with_tokens(ctx)?);
        }
        ts.push(Token::Update).space().append(&table.to_tokens(ctx)?);

        match self.dialect.update_layout() {
            UpdateLayout::FromAfterSet => {
                ts.append(&self.set_tokens(ctx)?);
                let mut from = self.from.clone();
                if !self.joins.is_empty() {
                    let name = format!("{}_", table.table_name_in(ctx));
                    from.push(Selectable::Table(table.clone().as_(name)));
                }
                if !from.is_empty() {
                    ts.append(&self.from_tokens(&from, ctx)?);
                }
                if !self.joins.is_empty() {
                    ts.append(&self.joins_tokens(ctx)?);
                }
                ts.append(&Self::criterion_tokens(Token::Where, &self.wheres, ctx)?)
                    .append(&self.orderby_tokens(ctx)?);
                if let Some(limit) = &self.limit {
                    ts.space().push(Token::Limit).space().append(&limit.to_tokens(ctx)?);
                }
            }
            layout => {
                if !self.joins.is_empty() {
                    ts.append(&self.joins_tokens(ctx)?);
                }
                ts.append(&self.set_tokens(ctx)?);
                if !self.from.is_empty() {
                    ts.append(&self.from_tokens(&self.from, ctx)?);
                }
                ts.append(&Self::criterion_tokens(Token::Where, &self.wheres, ctx)?);
                if layout == UpdateLayout::TrailingOrderLimit {
                    ts.append(&self.orderby_tokens(ctx)?);
                    if let Some(limit) = &self.limit {
                        ts.space().push(Token::Limit).space().append(&limit.to_tokens(ctx)?);
                    }
                }
            }
        }

        if !self.returns.is_empty() {
            ts.append(&self.returning_tokens(ctx)?);
        }
        Ok(ts)
    }
}

impl Node for QueryBuilder {
    fn to_tokens(&self, outer: &RenderContext) -> QueryResult<TokenStream> {
        if self.is_empty_statement() {
            return Ok(TokenStream::new());
        }
        let outer = &outer.with_alias_scope(&self.aliases);
        let ctx = self.clause_context(outer);

        if let Some(table) = &self.update_table {
            return self.update_tokens(table, &ctx);
        }

        let mut ts = TokenStream::new();
        if !self.with.is_empty() {
            ts.append(&self.with_tokens(&ctx)?);
        }

        if self.delete_from {
            ts.push(Token::Delete);
        } else if let (Some(table), false) = (&self.insert_table, self.select_into) {
            ts.append(&self.insert_head_tokens(table, &ctx)?);
            if !self.values.is_empty() {
                ts.append(&self.values_tokens(&ctx)?);
                if self.conflict.active {
                    ts.append(&self.conflict_tokens(&ctx)?);
                }
                if !self.returns.is_empty() {
                    ts.append(&self.returning_tokens(&ctx)?);
                }
                return Ok(ts);
            }
            ts.space().append(&self.select_tokens(&ctx)?);
        } else {
            ts.append(&self.select_tokens(&ctx)?);
        }

        if !self.from.is_empty() {
            ts.append(&self.from_tokens(&self.from, &ctx)?);
        }
        ts.append(&self.index_hint_tokens(&ctx)?);
        if !self.joins.is_empty() {
            ts.append(&self.joins_tokens(&ctx)?);
        }
        ts.append(&Self::criterion_tokens(Token::Prewhere, &self.prewheres, &ctx)?)
            .append(&Self::criterion_tokens(Token::Where, &self.wheres, &ctx)?)
            .append(&self.groupby_tokens(&ctx)?)
            .append(&Self::criterion_tokens(Token::Having, &self.havings, &ctx)?)
            .append(&self.orderby_tokens(&ctx)?)
            .append(&self.pagination_tokens(&ctx)?)
            .append(&self.for_update_tokens(&ctx)?);

        if outer.subquery {
            ts.parenthesize();
        }
        if self.conflict.active {
            ts.append(&self.conflict_tokens(&ctx)?);
        }
        if outer.with_alias {
            outer.push_alias(&mut ts, outer.alias_of(&self.alias).as_deref());
        }
        if !self.returns.is_empty() {
            ts.append(&self.returning_tokens(&ctx)?);
        }
        Ok(ts)
    }
}
