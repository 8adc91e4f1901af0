//! UNION, INTERSECT, EXCEPT and MINUS.

use std::ops;

use super::QueryBuilder;
use crate::sql::context::RenderContext;
use crate::sql::dialect::SqlDialect;
use crate::sql::error::{QueryError, QueryResult};
use crate::sql::expr::{ColumnRef, Order, Term};
use crate::sql::table::{AliasSlot, Table};
use crate::sql::token::{Node, Token, TokenStream};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    Union,
    UnionAll,
    Intersect,
    Except,
    Minus,
}

impl SetOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            SetOperator::Union => "UNION",
            SetOperator::UnionAll => "UNION ALL",
            SetOperator::Intersect => "INTERSECT",
            SetOperator::Except => "EXCEPT",
            SetOperator::Minus => "MINUS",
        }
    }
}

/// Queries combined by set operators, with an optional trailing ORDER BY and pagination.
///
/// Every operand must select the same number of terms; this is checked at render time.
#[derive(Debug, Clone)]
pub struct SetOperation {
    base: Box<QueryBuilder>,
    operations: Vec<(SetOperator, QueryBuilder)>,
    orderbys: Vec<(Term, Option<Order>)>,
    limit: Option<i64>,
    offset: Option<i64>,
    alias: AliasSlot,
}

impl SetOperation {
    pub(crate) fn new(base: QueryBuilder, operator: SetOperator, other: QueryBuilder) -> Self {
        Self {
            base: Box::new(base),
            operations: vec![(operator, other)],
            orderbys: Vec::new(),
            limit: None,
            offset: None,
            alias: AliasSlot::default(),
        }
    }

    pub fn alias(&self) -> Option<String> {
        self.alias.get()
    }

    /// Replace the alias. Fields created before this call keep the old one.
    pub fn set_alias(&mut self, alias: Option<String>) {
        self.alias = AliasSlot::fork(alias);
    }

    pub(crate) fn alias_slot(&self) -> AliasSlot {
        self.alias.clone()
    }

    pub fn as_(mut self, alias: impl Into<String>) -> Self {
        self.set_alias(Some(alias.into()));
        self
    }

    /// A field of this set operation, usable once it is aliased as a subquery.
    pub fn field(&self, name: impl Into<String>) -> Term {
        crate::sql::table::Selectable::from(self.clone()).field(name)
    }

    pub fn union(self, other: QueryBuilder) -> Self {
        self.push(SetOperator::Union, other)
    }

    pub fn union_all(self, other: QueryBuilder) -> Self {
        self.push(SetOperator::UnionAll, other)
    }

    pub fn intersect(self, other: QueryBuilder) -> Self {
        self.push(SetOperator::Intersect, other)
    }

    pub fn except_of(self, other: QueryBuilder) -> Self {
        self.push(SetOperator::Except, other)
    }

    pub fn minus(self, other: QueryBuilder) -> Self {
        self.push(SetOperator::Minus, other)
    }

    fn push(mut self, operator: SetOperator, other: QueryBuilder) -> Self {
        self.operations.push((operator, other));
        self
    }

    /// Bare names bind to the first FROM item of the base query.
    pub fn orderby<I, T>(mut self, fields: I, order: Option<Order>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ColumnRef>,
    {
        let base = self.base.from.first().map(|item| item.source());
        for field in fields {
            let term = field.into().into_bound_term(base.as_ref());
            self.orderbys.push((term, order));
        }
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub(crate) fn replace_table(mut self, current: &Table, new: &Table) -> Self {
        self.base = Box::new(self.base.replace_table(current, new));
        self.operations = self
            .operations
            .into_iter()
            .map(|(op, q)| (op, q.replace_table(current, new)))
            .collect();
        self
    }

    /// Whether any operand reads from the WITH clause `name`.
    pub(crate) fn references(&self, name: &str) -> bool {
        self.base.references(name) || self.operations.iter().any(|(_, q)| q.references(name))
    }

    /// Render with the base query's dialect defaults.
    pub fn to_sql(&self) -> QueryResult<String> {
        self.render(&RenderContext::for_dialect(self.base.dialect))
    }

    fn orderby_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let selected: Vec<String> = self.base.selects.iter().filter_map(Term::alias).collect();
        let mut clauses = Vec::with_capacity(self.orderbys.len());
        for (term, order) in &self.orderbys {
            let mut ts = match term.alias() {
                Some(alias) if selected.contains(&alias) => {
                    TokenStream::from(Token::Ident(alias))
                }
                _ => term.to_tokens(ctx)?,
            };
            if let Some(order) = order {
                ts.space().raw(order.as_str());
            }
            clauses.push(ts);
        }
        Ok(TokenStream::join(clauses, Token::Comma))
    }
}

impl Node for SetOperation {
    fn to_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let dialect = self.base.dialect;
        let ctx = ctx.dialect(dialect).quote_char(dialect.quote_char());
        let operand_ctx = ctx.subquery(dialect.wrap_set_operation_queries());

        let mut ts = self.base.to_tokens(&operand_ctx)?;
        for (operator, query) in &self.operations {
            if query.selects.len() != self.base.selects.len() {
                return Err(QueryError::SetOperation(format!(
                    "Queries must have an equal number of select statements in a set operation.\
                     \n\nMain Query:\n{}\n\nSet Operations Query:\n{}",
                    self.base.render(&operand_ctx)?,
                    query.render(&operand_ctx)?
                )));
            }
            ts.space()
                .raw(operator.as_str())
                .space()
                .append(&query.to_tokens(&operand_ctx)?);
        }

        if !self.orderbys.is_empty() {
            ts.space()
                .push(Token::OrderBy)
                .space()
                .append(&self.orderby_tokens(&ctx)?);
        }
        ts.append(&dialect.emit_limit_offset(
            self.limit.map(|n| Token::LitInt(n).into()),
            self.offset.map(|n| Token::LitInt(n).into()),
            !self.orderbys.is_empty(),
        ));

        if ctx.subquery {
            ts.parenthesize();
        }
        if ctx.with_alias {
            ctx.push_alias(&mut ts, ctx.alias_of(&self.alias).as_deref());
        }
        Ok(ts)
    }
}

impl ops::Add<QueryBuilder> for QueryBuilder {
    type Output = SetOperation;

    fn add(self, rhs: QueryBuilder) -> SetOperation {
        self.union(rhs)
    }
}

impl ops::Mul<QueryBuilder> for QueryBuilder {
    type Output = SetOperation;

    fn mul(self, rhs: QueryBuilder) -> SetOperation {
        self.union_all(rhs)
    }
}

impl ops::Sub<QueryBuilder> for QueryBuilder {
    type Output = SetOperation;

    fn sub(self, rhs: QueryBuilder) -> SetOperation {
        self.minus(rhs)
    }
}

impl ops::Add<QueryBuilder> for SetOperation {
    type Output = SetOperation;

    fn add(self, rhs: QueryBuilder) -> SetOperation {
        self.union(rhs)
    }
}

impl ops::Mul<QueryBuilder> for SetOperation {
    type Output = SetOperation;

    fn mul(self, rhs: QueryBuilder) -> SetOperation {
        self.union_all(rhs)
    }
}

impl ops::Sub<QueryBuilder> for SetOperation {
    type Output = SetOperation;

    fn sub(self, rhs: QueryBuilder) -> SetOperation {
        self.minus(rhs)
    }
}

impl QueryBuilder {
    pub fn union(self, other: QueryBuilder) -> SetOperation {
        SetOperation::new(self, SetOperator::Union, other)
    }

    pub fn union_all(self, other: QueryBuilder) -> SetOperation {
        SetOperation::new(self, SetOperator::UnionAll, other)
    }

    pub fn intersect(self, other: QueryBuilder) -> SetOperation {
        SetOperation::new(self, SetOperator::Intersect, other)
    }

    pub fn except_of(self, other: QueryBuilder) -> SetOperation {
        SetOperation::new(self, SetOperator::Except, other)
    }

    pub fn minus(self, other: QueryBuilder) -> SetOperation {
        SetOperation::new(self, SetOperator::Minus, other)
    }
}
