//! Query builder - construct SQL statements with a fluent API.
//!
//! A [`QueryBuilder`] holds the state of one SELECT, INSERT, UPDATE or DELETE
//! statement. Builder methods consume the builder and return it, so a clone
//! taken at any point is an independent, reusable partial query. Methods that
//! can reject their input return [`QueryResult<Self>`].
//!
//! Entry points are the unit structs [`Query`], [`MySqlQuery`],
//! [`PostgresQuery`], [`OracleQuery`], [`MsSqlQuery`] and [`SqliteQuery`],
//! which differ only in the dialect of the builder they start.

mod conflict;
mod join;
mod render;
mod returning;
mod set_operation;

pub use join::{Join, JoinType, Joiner};
pub use set_operation::{SetOperation, SetOperator};

pub(crate) use conflict::Conflict;

use std::ops::{Bound, RangeBounds};

use tracing::debug;

use super::ddl::{CreateQueryBuilder, DropQueryBuilder};
use super::dialect::{ConflictStyle, Dialect, SqlDialect};
use super::error::{QueryError, QueryResult};
use super::expr::{ColumnRef, Function, Order, Term, TermKind};
use super::load::LoadQueryBuilder;
use super::table::{AliasScope, AliasSlot, Selectable, Source, Table};

// =============================================================================
// Supporting types
// =============================================================================

/// A named WITH clause.
#[derive(Debug, Clone)]
pub(crate) struct Cte {
    pub(crate) name: String,
    pub(crate) query: Selectable,
    pub(crate) columns: Vec<Term>,
}

/// Options of a `FOR UPDATE` locking clause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use = "builders have no effect until used"]
pub struct ForUpdate {
    pub nowait: bool,
    pub skip_locked: bool,
    pub of: Vec<String>,
    pub no_key: bool,
}

impl ForUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// `NOWAIT`. Takes precedence over `SKIP LOCKED`.
    pub fn nowait(mut self) -> Self {
        self.nowait = true;
        self
    }

    pub fn skip_locked(mut self) -> Self {
        self.skip_locked = true;
        self
    }

    /// Lock only rows of the named tables.
    pub fn of<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for table in tables {
            let table = table.into();
            if !self.of.contains(&table) {
                self.of.push(table);
            }
        }
        self
    }

    /// `FOR NO KEY UPDATE` (PostgreSQL).
    pub fn no_key(mut self) -> Self {
        self.no_key = true;
        self
    }
}

// =============================================================================
// QueryBuilder
// =============================================================================

/// State of a single statement under construction.
#[derive(Debug, Clone)]
#[must_use = "builders have no effect until used"]
pub struct QueryBuilder {
    pub(crate) dialect: Dialect,
    pub(crate) alias: AliasSlot,

    pub(crate) from: Vec<Selectable>,
    pub(crate) with: Vec<Cte>,
    pub(crate) selects: Vec<Term>,
    pub(crate) select_star: bool,
    pub(crate) select_star_tables: Vec<Option<Source>>,
    pub(crate) distinct: bool,
    pub(crate) distinct_on: Vec<Term>,
    pub(crate) top: Option<i64>,
    pub(crate) modifiers: Vec<String>,

    pub(crate) insert_table: Option<Table>,
    pub(crate) update_table: Option<Table>,
    pub(crate) delete_from: bool,
    pub(crate) replace: bool,
    pub(crate) select_into: bool,
    pub(crate) columns: Vec<Term>,
    pub(crate) values: Vec<Vec<Term>>,
    pub(crate) updates: Vec<(Term, Term)>,

    pub(crate) force_indexes: Vec<Term>,
    pub(crate) use_indexes: Vec<Term>,
    pub(crate) joins: Vec<Join>,
    pub(crate) prewheres: Term,
    pub(crate) wheres: Term,
    pub(crate) groupbys: Vec<Term>,
    pub(crate) with_totals: bool,
    pub(crate) mysql_rollup: bool,
    pub(crate) havings: Term,
    pub(crate) orderbys: Vec<(Term, Option<Order>)>,
    pub(crate) limit: Option<Term>,
    pub(crate) offset: Option<Term>,
    pub(crate) for_update: Option<ForUpdate>,

    pub(crate) conflict: Conflict,
    pub(crate) returns: Vec<Term>,
    pub(crate) return_star: bool,

    pub(crate) subquery_count: usize,
    /// Aliases this builder gave to unaliased subqueries and self-joined tables.
    pub(crate) aliases: AliasScope,
    pub(crate) foreign_table: bool,
}

impl QueryBuilder {
    /// An empty builder for `dialect`.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            alias: AliasSlot::default(),
            from: Vec::new(),
            with: Vec::new(),
            selects: Vec::new(),
            select_star: false,
            select_star_tables: Vec::new(),
            distinct: false,
            distinct_on: Vec::new(),
            top: None,
            modifiers: Vec::new(),
            insert_table: None,
            update_table: None,
            delete_from: false,
            replace: false,
            select_into: false,
            columns: Vec::new(),
            values: Vec::new(),
            updates: Vec::new(),
            force_indexes: Vec::new(),
            use_indexes: Vec::new(),
            joins: Vec::new(),
            prewheres: Term::empty(),
            wheres: Term::empty(),
            groupbys: Vec::new(),
            with_totals: false,
            mysql_rollup: false,
            havings: Term::empty(),
            orderbys: Vec::new(),
            limit: None,
            offset: None,
            for_update: None,
            conflict: Conflict::default(),
            returns: Vec::new(),
            return_star: false,
            subquery_count: 0,
            aliases: AliasScope::default(),
            foreign_table: false,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    // ===== Alias =====

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

    /// Alias this query for use as a subquery.
    pub fn as_(mut self, alias: impl Into<String>) -> Self {
        self.set_alias(Some(alias.into()));
        self
    }

    /// A column of this query used as a subquery.
    pub fn field(&self, name: impl Into<String>) -> Term {
        Term::bound_field(name, Some(Source::Query(self.alias_slot())))
    }

    /// `alias.*` of this query used as a subquery.
    pub fn star(&self) -> Term {
        Term::new(TermKind::Star(Some(Source::Query(self.alias_slot()))))
    }

    // ===== Sources =====

    /// Add a FROM item. Subqueries without an alias are named `sq<N>`.
    pub fn from_(mut self, selectable: impl Into<Selectable>) -> Self {
        let selectable = selectable.into();
        let unaliased = self.unaliased_slot(&selectable);
        let nested_count = match &selectable {
            Selectable::Query(q) => Some(q.subquery_count),
            Selectable::SetOperation(_) => Some(0),
            _ => None,
        };
        if let (Some(slot), Some(nested_count)) = (unaliased, nested_count) {
            let count = self.subquery_count.max(nested_count);
            let alias = format!("sq{count}");
            debug!(alias = %alias, "aliasing subquery in FROM");
            self.aliases.insert(slot, alias);
            self.subquery_count = count + 1;
        }
        self.from.push(selectable);
        self
    }

    /// Slot of `selectable` when neither it nor this builder names it.
    pub(crate) fn unaliased_slot(&self, selectable: &Selectable) -> Option<AliasSlot> {
        selectable
            .alias_slot()
            .filter(|slot| self.aliases.resolve(slot).is_none())
    }

    /// Add a WITH clause `name AS (selectable)`.
    pub fn with_(self, selectable: impl Into<Selectable>, name: impl Into<String>) -> Self {
        self.with_columns(selectable, name, Vec::<ColumnRef>::new())
    }

    /// Add a WITH clause `name(columns) AS (selectable)`.
    pub fn with_columns<I, T>(
        mut self,
        selectable: impl Into<Selectable>,
        name: impl Into<String>,
        columns: I,
    ) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ColumnRef>,
    {
        self.with.push(Cte {
            name: name.into(),
            query: selectable.into(),
            columns: columns
                .into_iter()
                .map(|c| c.into().into_bound_term(None))
                .collect(),
        });
        self
    }

    /// INSERT target, or the target of `SELECT ... INTO` once terms are selected.
    pub fn into(mut self, table: impl Into<Table>) -> QueryResult<Self> {
        if self.insert_table.is_some() || self.update_table.is_some() || self.delete_from {
            return Err(QueryError::no_attribute("into"));
        }
        if !self.selects.is_empty() {
            self.select_into = true;
        }
        self.insert_table = Some(table.into());
        Ok(self)
    }

    /// `SELECT ... INTO table`.
    pub fn select_into(mut self, table: impl Into<Table>) -> QueryResult<Self> {
        self = self.into(table)?;
        self.select_into = true;
        Ok(self)
    }

    pub fn update(mut self, table: impl Into<Table>) -> QueryResult<Self> {
        if self.update_table.is_some()
            || !self.selects.is_empty()
            || self.delete_from
            || self.insert_table.is_some()
        {
            return Err(QueryError::no_attribute("update"));
        }
        self.update_table = Some(table.into());
        Ok(self)
    }

    pub fn delete(mut self) -> QueryResult<Self> {
        if self.delete_from
            || !self.selects.is_empty()
            || self.update_table.is_some()
            || self.insert_table.is_some()
        {
            return Err(QueryError::no_attribute("delete"));
        }
        self.delete_from = true;
        Ok(self)
    }

    // ===== SELECT =====

    /// Add select terms. Bare names bind to the first FROM item; `"*"` selects everything.
    pub fn select<I, T>(mut self, terms: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<ColumnRef>,
    {
        for term in terms {
            match term.into() {
                ColumnRef::Name(name) => self.select_name(name)?,
                ColumnRef::Term(term) => {
                    if matches!(term.kind, TermKind::Field { .. } | TermKind::Star(_)) {
                        self.select_field(term);
                    } else {
                        self.selects.push(term);
                    }
                }
            }
        }
        Ok(self)
    }

    fn select_name(&mut self, name: String) -> QueryResult<()> {
        let Some(base) = self.from.first().map(Selectable::source) else {
            return Err(QueryError::query(format!(
                "Cannot select {name}, no FROM table specified."
            )));
        };
        if name == "*" {
            self.select_star = true;
            self.selects = vec![Term::star()];
            return Ok(());
        }
        self.select_field(Term::bound_field(name, Some(base)));
        Ok(())
    }

    fn select_field(&mut self, term: Term) {
        if self.select_star {
            return;
        }
        let table = term.source().cloned();
        if self.select_star_tables.contains(&table) {
            return;
        }
        if term.is_star() {
            self.selects.retain(|select| {
                let is_column = matches!(select.kind, TermKind::Field { .. } | TermKind::Star(_));
                !is_column || select.source().cloned() != table
            });
            self.select_star_tables.push(table);
        }
        self.selects.push(term);
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// `SELECT DISTINCT ON (fields)` (PostgreSQL).
    pub fn distinct_on<I, T>(mut self, fields: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<ColumnRef>,
    {
        if !self.dialect.supports_distinct_on() {
            return Err(QueryError::unsupported(self.dialect, "DISTINCT ON"));
        }
        self.distinct_on
            .extend(fields.into_iter().map(|f| f.into().into_bound_term(None)));
        Ok(self)
    }

    /// `SELECT TOP (n)` (MSSQL). The value must parse as an integer.
    pub fn top(mut self, value: impl ToString) -> QueryResult<Self> {
        if !self.dialect.supports_top() {
            return Err(QueryError::unsupported(self.dialect, "TOP"));
        }
        if self.top.is_some() {
            return Err(QueryError::already_set("top"));
        }
        let top = value
            .to_string()
            .trim()
            .parse::<i64>()
            .map_err(|_| QueryError::query("TOP value must be an integer"))?;
        self.top = Some(top);
        Ok(self)
    }

    /// Select modifier such as `SQL_CALC_FOUND_ROWS` (MySQL).
    pub fn modifier(mut self, value: impl Into<String>) -> QueryResult<Self> {
        if !self.dialect.supports_select_modifiers() {
            return Err(QueryError::unsupported(self.dialect, "SELECT modifiers"));
        }
        self.modifiers.push(value.into());
        Ok(self)
    }

    // ===== INSERT / UPDATE =====

    /// Explicit INSERT columns. Bare names bind to the insert table.
    pub fn columns<I, T>(mut self, terms: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<ColumnRef>,
    {
        let Some(table) = self.insert_table.clone() else {
            return Err(QueryError::no_attribute("insert"));
        };
        let source = Source::Table(table);
        self.columns.extend(
            terms
                .into_iter()
                .map(|t| t.into().into_bound_term(Some(&source))),
        );
        Ok(self)
    }

    /// Append one VALUES row.
    pub fn insert<I, T>(self, row: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.insert_rows([row])
    }

    /// Append several VALUES rows.
    pub fn insert_rows<R, I, T>(mut self, rows: R) -> QueryResult<Self>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.apply_rows(rows)?;
        self.replace = false;
        Ok(self)
    }

    /// Like [`QueryBuilder::insert`] but renders `REPLACE INTO`.
    pub fn replace<I, T>(self, row: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.replace_rows([row])
    }

    pub fn replace_rows<R, I, T>(mut self, rows: R) -> QueryResult<Self>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.apply_rows(rows)?;
        self.replace = true;
        Ok(self)
    }

    fn apply_rows<R, I, T>(&mut self, rows: R) -> QueryResult<()>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        if self.insert_table.is_none() {
            return Err(QueryError::no_attribute("insert"));
        }
        for row in rows {
            let row: Vec<Term> = row.into_iter().map(Into::into).collect();
            if !row.is_empty() {
                self.values.push(row);
            }
        }
        Ok(())
    }

    /// `SET field = value`. Bare names stay unqualified.
    pub fn set(mut self, field: impl Into<ColumnRef>, value: impl Into<Term>) -> Self {
        self.updates
            .push((field.into().into_bound_term(None), value.into()));
        self
    }

    // ===== Filters =====

    /// AND `criterion` into WHERE. While an ON CONFLICT clause is open the
    /// criterion filters the conflict target or its DO UPDATE action instead.
    pub fn where_(mut self, criterion: impl Into<Term>) -> QueryResult<Self> {
        let criterion = criterion.into();
        if criterion.is_empty_criterion() {
            return Ok(self);
        }
        if self.conflict.active {
            self.conflict.add_where(criterion)?;
            return Ok(self);
        }
        self.note_foreign_tables(&criterion);
        self.wheres = std::mem::replace(&mut self.wheres, Term::empty()) & criterion;
        Ok(self)
    }

    /// AND `criterion` into PREWHERE (ClickHouse-style).
    pub fn prewhere(mut self, criterion: impl Into<Term>) -> Self {
        let criterion = criterion.into();
        self.note_foreign_tables(&criterion);
        self.prewheres = std::mem::replace(&mut self.prewheres, Term::empty()) & criterion;
        self
    }

    pub fn having(mut self, criterion: impl Into<Term>) -> Self {
        self.havings = std::mem::replace(&mut self.havings, Term::empty()) & criterion.into();
        self
    }

    /// Fields bound to tables outside FROM, UPDATE and the joins force namespacing.
    fn note_foreign_tables(&mut self, criterion: &Term) {
        let foreign = criterion.field_sources().into_iter().flatten().any(|source| {
            let in_from = self.from.iter().any(|item| item.owns(&source));
            let in_update = matches!((&source, &self.update_table), (Source::Table(t), Some(u)) if t == u);
            let in_joins = self.joins.iter().any(|join| join.item.owns(&source));
            !(in_from || in_update || in_joins)
        });
        if foreign {
            self.foreign_table = true;
        }
    }

    // ===== Grouping and ordering =====

    /// Add GROUP BY terms. Bare names bind to the first FROM item.
    pub fn groupby<I, T>(mut self, terms: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<ColumnRef>,
    {
        for term in terms {
            let term = match term.into() {
                ColumnRef::Name(name) => {
                    let Some(base) = self.from.first().map(Selectable::source) else {
                        return Err(QueryError::Grouping(format!(
                            "Cannot group by {name}, no FROM table specified."
                        )));
                    };
                    Term::bound_field(name, Some(base))
                }
                ColumnRef::Term(term) => term,
            };
            self.groupbys.push(term);
        }
        Ok(self)
    }

    /// `GROUP BY ... WITH TOTALS` (ClickHouse).
    pub fn with_totals(mut self) -> Self {
        self.with_totals = true;
        self
    }

    /// `GROUP BY ROLLUP(...)`. On MySQL the terms are appended to GROUP BY
    /// followed by `WITH ROLLUP`, and at least one group is required.
    pub fn rollup<I, T>(mut self, terms: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        let terms: Vec<Term> = terms.into_iter().map(Into::into).collect();

        if self.dialect == Dialect::MySql {
            if self.mysql_rollup {
                return Err(QueryError::no_attribute("rollup"));
            }
            if terms.is_empty() && self.groupbys.is_empty() {
                return Err(QueryError::Rollup(
                    "At least one group is required. Call Query.groupby(term) or pass \
                     as parameter to rollup."
                        .into(),
                ));
            }
            self.mysql_rollup = true;
            self.groupbys.extend(terms);
            return Ok(self);
        }

        if let Some(TermKind::Function(function)) = self.groupbys.last_mut().map(|t| &mut t.kind) {
            if function.name == "ROLLUP" {
                function.args.extend(terms);
                return Ok(self);
            }
        }
        self.groupbys.push(Function::new("ROLLUP", terms).into());
        Ok(self)
    }

    /// Add ORDER BY terms. Bare names bind to the first FROM item, or the update target.
    pub fn orderby<I, T>(mut self, fields: I, order: Option<Order>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ColumnRef>,
    {
        let base = self
            .from
            .first()
            .map(Selectable::source)
            .or_else(|| self.update_table.clone().map(Source::Table));
        for field in fields {
            self.orderbys
                .push((field.into().into_bound_term(base.as_ref()), order));
        }
        self
    }

    // ===== Pagination and locking =====

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(Term::value(limit));
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(Term::value(offset));
        self
    }

    /// `FETCH NEXT n ROWS ONLY`; an alias of [`QueryBuilder::limit`].
    pub fn fetch_next(self, limit: i64) -> Self {
        self.limit(limit)
    }

    /// Set OFFSET from the range start and LIMIT from its end.
    pub fn slice(mut self, range: impl RangeBounds<i64>) -> Self {
        match range.start_bound() {
            Bound::Included(&n) => self.offset = Some(Term::value(n)),
            Bound::Excluded(&n) => self.offset = Some(Term::value(n.saturating_add(1))),
            Bound::Unbounded => {}
        }
        match range.end_bound() {
            Bound::Excluded(&n) => self.limit = Some(Term::value(n)),
            Bound::Included(&n) => self.limit = Some(Term::value(n.saturating_add(1))),
            Bound::Unbounded => {}
        }
        self
    }

    pub fn for_update(mut self, options: ForUpdate) -> QueryResult<Self> {
        if options.no_key && !self.dialect.supports_no_key_update() {
            return Err(QueryError::unsupported(self.dialect, "FOR NO KEY UPDATE"));
        }
        self.for_update = Some(options);
        Ok(self)
    }

    // ===== Index hints =====

    /// `FORCE INDEX (names)` (MySQL).
    pub fn force_index<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.force_indexes.extend(names.into_iter().map(Term::index));
        self
    }

    /// `USE INDEX (names)` (MySQL).
    pub fn use_index<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.use_indexes.extend(names.into_iter().map(Term::index));
        self
    }

    // ===== Rewriting =====

    /// Rebind every reference to `current` onto `new`.
    pub fn replace_table(mut self, current: &Table, new: &Table) -> Self {
        let swap = |t: Table| if &t == current { new.clone() } else { t };
        let terms = |terms: Vec<Term>| -> Vec<Term> {
            terms
                .into_iter()
                .map(|t| t.replace_table(current, new))
                .collect()
        };

        self.from = self
            .from
            .into_iter()
            .map(|item| item.replace_table(current, new))
            .collect();
        self.insert_table = self.insert_table.map(swap);
        self.update_table = self.update_table.map(swap);
        self.selects = terms(self.selects);
        self.columns = terms(self.columns);
        self.values = self.values.into_iter().map(terms).collect();
        self.updates = self
            .updates
            .into_iter()
            .map(|(f, v)| (f.replace_table(current, new), v.replace_table(current, new)))
            .collect();
        self.wheres = self.wheres.replace_table(current, new);
        self.prewheres = self.prewheres.replace_table(current, new);
        self.havings = self.havings.replace_table(current, new);
        self.groupbys = terms(self.groupbys);
        self.orderbys = self
            .orderbys
            .into_iter()
            .map(|(t, o)| (t.replace_table(current, new), o))
            .collect();
        self.joins = self
            .joins
            .into_iter()
            .map(|join| join.replace_table(current, new))
            .collect();
        self.conflict = self.conflict.replace_table(current, new);
        self.returns = terms(self.returns);
        self.distinct_on = terms(self.distinct_on);

        let old = Some(Source::Table(current.clone()));
        for table in &mut self.select_star_tables {
            if *table == old {
                *table = Some(Source::Table(new.clone()));
            }
        }
        self
    }

    /// Whether FROM or a join reads the WITH clause `name`.
    pub(crate) fn references(&self, name: &str) -> bool {
        let reads = |item: &Selectable| match item {
            Selectable::Cte(cte) => cte == name,
            Selectable::Table(t) => t.schema().is_none() && t.name() == name,
            _ => false,
        };
        self.from.iter().any(reads) || self.joins.iter().any(|join| reads(&join.item))
    }

    /// Source used to bind bare names in conflict and RETURNING clauses.
    pub(crate) fn target_source(&self) -> Option<Source> {
        self.insert_table
            .clone()
            .or_else(|| self.update_table.clone())
            .map(Source::Table)
            .or_else(|| {
                self.delete_from
                    .then(|| self.from.first().map(Selectable::source))
                    .flatten()
            })
    }

    pub(crate) fn uses_duplicate_key(&self) -> bool {
        self.dialect.conflict_style() == ConflictStyle::OnDuplicateKey
    }
}

// =============================================================================
// Entry points
// =============================================================================

macro_rules! query_entry {
    ($(#[$meta:meta])* $name:ident => $dialect:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl $name {
            pub const DIALECT: Dialect = $dialect;

            /// An empty builder.
            pub fn builder() -> QueryBuilder {
                QueryBuilder::new(Self::DIALECT)
            }

            /// `SELECT ... FROM selectable`
            pub fn from_(selectable: impl Into<Selectable>) -> QueryBuilder {
                Self::builder().from_(selectable)
            }

            /// `INSERT INTO table`
            pub fn into(table: impl Into<Table>) -> QueryBuilder {
                let mut query = Self::builder();
                query.insert_table = Some(table.into());
                query
            }

            /// `UPDATE table`
            pub fn update(table: impl Into<Table>) -> QueryBuilder {
                let mut query = Self::builder();
                query.update_table = Some(table.into());
                query
            }

            /// `SELECT terms` without a FROM clause.
            pub fn select<I, T>(terms: I) -> QueryResult<QueryBuilder>
            where
                I: IntoIterator<Item = T>,
                T: Into<ColumnRef>,
            {
                Self::builder().select(terms)
            }

            /// `WITH name AS (selectable) ...`
            pub fn with_(selectable: impl Into<Selectable>, name: impl Into<String>) -> QueryBuilder {
                Self::builder().with_(selectable, name)
            }

            pub fn create_table(table: impl Into<Table>) -> QueryResult<CreateQueryBuilder> {
                CreateQueryBuilder::new(Self::DIALECT).create_table(table)
            }

            pub fn drop_table(table: impl Into<Table>) -> QueryResult<DropQueryBuilder> {
                DropQueryBuilder::new(Self::DIALECT).drop_table(table)
            }

            pub fn table(name: impl Into<String>) -> Table {
                Table::new(name)
            }
        }
    };
}

query_entry!(
    /// Entry point for ANSI SQL with double-quoted identifiers.
    Query => Dialect::Generic
);
query_entry!(
    /// Entry point for MySQL.
    MySqlQuery => Dialect::MySql
);
query_entry!(
    /// Entry point for PostgreSQL.
    PostgresQuery => Dialect::Postgres
);
query_entry!(
    /// Entry point for Oracle.
    OracleQuery => Dialect::Oracle
);
query_entry!(
    /// Entry point for Microsoft SQL Server.
    MsSqlQuery => Dialect::MsSql
);
query_entry!(
    /// Entry point for SQLite.
    SqliteQuery => Dialect::Sqlite
);

impl MySqlQuery {
    /// `LOAD DATA LOCAL INFILE 'path' ...`
    pub fn load(path: impl Into<String>) -> LoadQueryBuilder {
        LoadQueryBuilder::new().load(path)
    }
}
