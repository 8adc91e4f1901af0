//! JOIN clauses.

use tracing::{debug, warn};

use super::QueryBuilder;
use crate::sql::context::RenderContext;
use crate::sql::error::{QueryError, QueryResult};
use crate::sql::expr::{Term, TermExt};
use crate::sql::table::{Selectable, Source, Table};
use crate::sql::token::{Node, Token, TokenStream};

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinType {
    #[default]
    Inner,
    Left,
    LeftOuter,
    Right,
    RightOuter,
    Outer,
    FullOuter,
    Cross,
    Hash,
}

impl JoinType {
    /// Keyword rendered before `JOIN`. Inner joins render a bare `JOIN`.
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinType::Inner => "",
            JoinType::Left => "LEFT",
            JoinType::LeftOuter => "LEFT OUTER",
            JoinType::Right => "RIGHT",
            JoinType::RightOuter => "RIGHT OUTER",
            JoinType::Outer | JoinType::FullOuter => "FULL OUTER",
            JoinType::Cross => "CROSS",
            JoinType::Hash => "HASH",
        }
    }
}

#[derive(Debug, Clone)]
enum Condition {
    None,
    On {
        criterion: Term,
        collate: Option<String>,
    },
    Using(Vec<Term>),
}

/// A join attached to a query.
#[derive(Debug, Clone)]
pub struct Join {
    pub(crate) item: Selectable,
    how: JoinType,
    condition: Condition,
}

impl Join {
    pub fn join_type(&self) -> JoinType {
        self.how
    }

    pub fn item(&self) -> &Selectable {
        &self.item
    }

    /// Sources referenced by the ON criterion.
    pub(crate) fn criterion_sources(&self) -> Vec<Option<Source>> {
        match &self.condition {
            Condition::On { criterion, .. } => criterion.field_sources(),
            _ => Vec::new(),
        }
    }

    /// Check that the ON criterion only references visible tables.
    fn validate(&self, base: &[Selectable], joins: &[Join]) -> QueryResult<()> {
        let Condition::On { criterion, .. } = &self.condition else {
            return Ok(());
        };

        let mut missing: Vec<String> = Vec::new();
        for source in criterion.field_sources().into_iter().flatten() {
            let visible = base.iter().any(|item| item.owns(&source))
                || joins.iter().any(|join| join.item.owns(&source))
                || self.item.owns(&source);
            if !visible {
                let name = source.table_name().unwrap_or_default();
                if !missing.contains(&name) {
                    missing.push(name);
                }
            }
        }

        if missing.is_empty() {
            return Ok(());
        }
        warn!(tables = ?missing, "join criterion references tables outside the query");
        Err(QueryError::Join(format!(
            "Invalid join criterion. One field is required from the joined item and another \
             from the selected table or an existing join.  Found [{}]",
            missing.join(", ")
        )))
    }

    pub(crate) fn replace_table(self, current: &Table, new: &Table) -> Self {
        let condition = match self.condition {
            Condition::On { criterion, collate } => Condition::On {
                criterion: criterion.replace_table(current, new),
                collate,
            },
            Condition::Using(fields) => Condition::Using(
                fields
                    .into_iter()
                    .map(|f| f.replace_table(current, new))
                    .collect(),
            ),
            Condition::None => Condition::None,
        };
        Self {
            item: self.item.replace_table(current, new),
            how: self.how,
            condition,
        }
    }
}

impl Node for Join {
    fn to_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let mut ts = TokenStream::new();
        if !self.how.as_str().is_empty() {
            ts.raw(self.how.as_str()).space();
        }
        ts.push(Token::Join)
            .space()
            .append(&self.item.to_tokens(&ctx.subquery(true).with_alias(true))?);

        match &self.condition {
            Condition::None => {}
            Condition::On { criterion, collate } => {
                ts.space()
                    .push(Token::On)
                    .space()
                    .append(&criterion.to_tokens(&ctx.subquery(true))?);
                if let Some(collate) = collate {
                    ts.space().push(Token::Collate).space().raw(collate.clone());
                }
            }
            Condition::Using(fields) => {
                let rendered = fields
                    .iter()
                    .map(|f| f.to_tokens(ctx))
                    .collect::<QueryResult<Vec<_>>>()?;
                ts.space()
                    .push(Token::Using)
                    .space()
                    .lparen()
                    .append(&TokenStream::join(rendered, Token::Comma))
                    .rparen();
            }
        }
        Ok(ts)
    }
}

/// Pending join returned by [`QueryBuilder::join`]; completing it returns the query.
#[derive(Debug)]
pub struct Joiner {
    query: QueryBuilder,
    item: Selectable,
    how: JoinType,
    type_label: &'static str,
}

impl Joiner {
    pub(crate) fn new(query: QueryBuilder, item: Selectable, how: JoinType) -> Self {
        let type_label = match item {
            Selectable::Table(_) | Selectable::Cte(_) => "table",
            Selectable::Query(_) | Selectable::SetOperation(_) => "subquery",
        };
        Self {
            query,
            item,
            how,
            type_label,
        }
    }

    /// `JOIN item ON criterion`
    pub fn on(self, criterion: impl Into<Term>) -> QueryResult<QueryBuilder> {
        self.on_collate(criterion, None::<String>)
    }

    /// `JOIN item ON criterion COLLATE collation`
    pub fn on_collate(
        self,
        criterion: impl Into<Term>,
        collate: Option<impl Into<String>>,
    ) -> QueryResult<QueryBuilder> {
        let criterion = criterion.into();
        if criterion.is_empty_criterion() {
            return Err(QueryError::Join(format!(
                "Parameter 'criterion' is required for a {} JOIN but was not supplied.",
                self.type_label
            )));
        }
        let join = Join {
            item: self.item,
            how: self.how,
            condition: Condition::On {
                criterion,
                collate: collate.map(Into::into),
            },
        };
        self.query.do_join(join)
    }

    /// Equi-join on columns present on both sides, AND-ed together.
    pub fn on_field<I, S>(self, names: I) -> QueryResult<QueryBuilder>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(QueryError::Join(format!(
                "Parameter 'fields' is required for a {} JOIN but was not supplied.",
                self.type_label
            )));
        }
        let Some(base) = self.query.from.first().cloned() else {
            return Err(QueryError::Join(
                "Cannot join on fields without a FROM table.".into(),
            ));
        };
        let criterion = Term::all(
            names
                .iter()
                .map(|name| base.field(name.as_str()).eq(self.item.field(name.as_str()))),
        );
        self.on(criterion)
    }

    /// `JOIN item USING (names)`
    pub fn using<I, S>(self, names: I) -> QueryResult<QueryBuilder>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<Term> = names.into_iter().map(Term::field).collect();
        if fields.is_empty() {
            return Err(QueryError::Join(format!(
                "Parameter 'fields' is required when joining with {} a using clause but was not supplied.",
                self.type_label
            )));
        }
        let join = Join {
            item: self.item,
            how: self.how,
            condition: Condition::Using(fields),
        };
        self.query.do_join(join)
    }

    /// `CROSS JOIN item`
    pub fn cross(self) -> QueryResult<QueryBuilder> {
        let join = Join {
            item: self.item,
            how: JoinType::Cross,
            condition: Condition::None,
        };
        self.query.do_join(join)
    }
}

impl QueryBuilder {
    /// Start a join of `item`. Subqueries without an alias are named `sq<N>`.
    pub fn join(mut self, item: impl Into<Selectable>, how: JoinType) -> Joiner {
        let item = item.into();
        if let Some(slot) = self.unaliased_slot(&item).filter(|_| item.is_query()) {
            let alias = format!("sq{}", self.subquery_count);
            debug!(alias = %alias, "aliasing joined subquery");
            self.aliases.insert(slot, alias);
            self.subquery_count += 1;
        }
        Joiner::new(self, item, how)
    }

    pub fn inner_join(self, item: impl Into<Selectable>) -> Joiner {
        self.join(item, JoinType::Inner)
    }

    pub fn left_join(self, item: impl Into<Selectable>) -> Joiner {
        self.join(item, JoinType::Left)
    }

    pub fn left_outer_join(self, item: impl Into<Selectable>) -> Joiner {
        self.join(item, JoinType::LeftOuter)
    }

    pub fn right_join(self, item: impl Into<Selectable>) -> Joiner {
        self.join(item, JoinType::Right)
    }

    pub fn right_outer_join(self, item: impl Into<Selectable>) -> Joiner {
        self.join(item, JoinType::RightOuter)
    }

    pub fn outer_join(self, item: impl Into<Selectable>) -> Joiner {
        self.join(item, JoinType::Outer)
    }

    pub fn full_outer_join(self, item: impl Into<Selectable>) -> Joiner {
        self.join(item, JoinType::FullOuter)
    }

    pub fn cross_join(self, item: impl Into<Selectable>) -> Joiner {
        self.join(item, JoinType::Cross)
    }

    pub fn hash_join(self, item: impl Into<Selectable>) -> Joiner {
        self.join(item, JoinType::Hash)
    }

    /// Whether `table` is the target of one of the joins.
    pub fn is_joined(&self, table: &Table) -> bool {
        self.joins
            .iter()
            .any(|join| join.item.as_table() == Some(table))
    }

    fn do_join(mut self, join: Join) -> QueryResult<Self> {
        let mut base: Vec<Selectable> = self.from.clone();
        if let Some(table) = &self.update_table {
            base.push(Selectable::Table(table.clone()));
        }
        base.extend(self.with.iter().map(|cte| Selectable::cte(cte.name.clone())));
        join.validate(&base, &self.joins)?;

        // Same table joined again without an alias: name it `<table>2`.
        if let Selectable::Table(table) = &join.item {
            let in_query = base.iter().any(|item| item.as_table() == Some(table));
            if let (Some(slot), true) = (self.unaliased_slot(&join.item), in_query) {
                let alias = format!("{}2", table.name());
                debug!(table = table.name(), alias = %alias, "aliasing self-join");
                self.aliases.insert(slot, alias);
            }
        }

        self.joins.push(join);
        Ok(self)
    }
}
