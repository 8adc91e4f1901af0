//! Tables, schemas and the other sources a query can select from.
//!
//! Fields keep a [`Source`] handle to the thing they were created from so
//! that they can be qualified at render time. The handle carries the identity
//! of its table or subquery. A builder that names a source itself (e.g. a
//! subquery auto-named `sq0` in FROM) records the name in its own
//! [`AliasScope`], so fields created earlier are qualified correctly while
//! other builders holding the same source are unaffected.

use std::fmt;
use std::sync::Arc;

use super::context::RenderContext;
use super::error::{QueryError, QueryResult};
use super::expr::{ColumnRef, Term, TermKind};
use super::query::{Query, QueryBuilder, SetOperation};
use super::token::{Node, Token, TokenStream};

// =============================================================================
// Alias slot
// =============================================================================

/// Alias of a table or subquery, with an identity shared by its clones.
///
/// Clones share the slot. [`AliasSlot::fork`] starts a new one.
#[derive(Clone, Default)]
pub(crate) struct AliasSlot(Arc<Option<String>>);

impl AliasSlot {
    pub(crate) fn new(alias: Option<String>) -> Self {
        Self(Arc::new(alias))
    }

    pub(crate) fn get(&self) -> Option<String> {
        (*self.0).clone()
    }

    /// A detached slot holding `alias`.
    pub(crate) fn fork(alias: Option<String>) -> Self {
        Self::new(alias)
    }

    /// Whether both handles come from the same slot.
    pub(crate) fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for AliasSlot {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl fmt::Debug for AliasSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Aliases a builder assigned to unaliased slots.
///
/// Resolved at render time through [`RenderContext`]; the slots themselves
/// never change.
#[derive(Debug, Clone, Default)]
pub(crate) struct AliasScope(Vec<(AliasSlot, String)>);

impl AliasScope {
    pub(crate) fn insert(&mut self, slot: AliasSlot, alias: String) {
        self.0.push((slot, alias));
    }

    /// Scoped alias of `slot`, falling back to the slot's own.
    pub(crate) fn resolve(&self, slot: &AliasSlot) -> Option<String> {
        if slot.0.is_some() {
            return slot.get();
        }
        self.0
            .iter()
            .rev()
            .find(|(s, _)| s.same(slot))
            .map(|(_, alias)| alias.clone())
    }

    /// Entries of `inner` shadow those already here.
    pub(crate) fn extend(&mut self, inner: &AliasScope) {
        self.0.extend(inner.0.iter().cloned());
    }
}

// =============================================================================
// Schema
// =============================================================================

/// A schema, optionally nested in a parent (database) schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    name: String,
    parent: Option<Box<Schema>>,
}

/// A database is the root of a schema chain.
pub type Database = Schema;

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
        }
    }

    /// Build a chain from the outermost name inwards: `["db", "s"]` is `"db"."s"`.
    pub fn chain<I, S>(names: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().fold(None, |parent, name| {
            Some(Schema {
                name: name.into(),
                parent: parent.map(Box::new),
            })
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// A schema nested inside this one.
    pub fn schema(&self, name: impl Into<String>) -> Schema {
        Schema {
            name: name.into(),
            parent: Some(Box::new(self.clone())),
        }
    }

    /// A table inside this schema.
    pub fn table(&self, name: impl Into<String>) -> Table {
        Table::new(name).with_schema(self.clone())
    }

    /// Tables inside this schema; see [`make_tables`].
    pub fn tables<I, T>(&self, specs: I) -> Vec<Table>
    where
        I: IntoIterator<Item = T>,
        T: Into<TableSpec>,
    {
        make_tables(specs)
            .into_iter()
            .map(|t| t.with_schema(self.clone()))
            .collect()
    }
}

impl From<&str> for Schema {
    fn from(name: &str) -> Self {
        Schema::new(name)
    }
}

impl From<String> for Schema {
    fn from(name: String) -> Self {
        Schema::new(name)
    }
}

impl Node for Schema {
    fn to_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let mut ts = TokenStream::new();
        if let Some(parent) = &self.parent {
            ts.append(&parent.to_tokens(ctx)?).push(Token::Dot);
        }
        ts.push(Token::Ident(self.name.clone()));
        Ok(ts)
    }
}

// =============================================================================
// Table
// =============================================================================

/// A named table, optionally schema-qualified and aliased.
///
/// Equality compares name, schema and the current alias.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    schema: Option<Schema>,
    alias: AliasSlot,
    for_: Option<Box<Term>>,
    for_portion: Option<Box<Term>>,
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.schema == other.schema && self.alias == other.alias
    }
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            alias: AliasSlot::default(),
            for_: None,
            for_portion: None,
        }
    }

    pub fn with_schema(mut self, schema: impl Into<Schema>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Alias this table. The result no longer shares its alias with `self`.
    pub fn as_(mut self, alias: impl Into<String>) -> Self {
        self.alias = AliasSlot::fork(Some(alias.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    pub fn alias(&self) -> Option<String> {
        self.alias.get()
    }

    pub(crate) fn alias_slot(&self) -> AliasSlot {
        self.alias.clone()
    }

    /// The alias when set, otherwise the table name.
    pub fn get_table_name(&self) -> String {
        self.alias.get().unwrap_or_else(|| self.name.clone())
    }

    /// [`Table::get_table_name`] with the aliases assigned by the rendering builders.
    pub(crate) fn table_name_in(&self, ctx: &RenderContext) -> String {
        ctx.alias_of(&self.alias).unwrap_or_else(|| self.name.clone())
    }

    /// `t FOR criterion`, e.g. `FOR SYSTEM_TIME AS OF ..`.
    pub fn for_(mut self, temporal: impl Into<Term>) -> QueryResult<Self> {
        if self.for_.is_some() {
            return Err(QueryError::already_set("for_"));
        }
        if self.for_portion.is_some() {
            return Err(QueryError::already_set("for_portion"));
        }
        self.for_ = Some(Box::new(temporal.into()));
        Ok(self)
    }

    /// `t FOR PORTION OF period`.
    pub fn for_portion(mut self, period: impl Into<Term>) -> QueryResult<Self> {
        if self.for_portion.is_some() {
            return Err(QueryError::already_set("for_portion"));
        }
        if self.for_.is_some() {
            return Err(QueryError::already_set("for_"));
        }
        self.for_portion = Some(Box::new(period.into()));
        Ok(self)
    }

    pub fn field(&self, name: impl Into<String>) -> Term {
        Term::bound_field(name, Some(Source::Table(self.clone())))
    }

    pub fn star(&self) -> Term {
        Term::new(TermKind::Star(Some(Source::Table(self.clone()))))
    }

    /// `SELECT terms FROM self`.
    pub fn select<I, T>(&self, terms: I) -> QueryResult<QueryBuilder>
    where
        I: IntoIterator<Item = T>,
        T: Into<ColumnRef>,
    {
        Query::from_(self.clone()).select(terms)
    }

    /// `UPDATE self`.
    pub fn update(&self) -> QueryBuilder {
        Query::update(self.clone())
    }

    /// `INSERT INTO self VALUES (terms)`.
    pub fn insert<I, T>(&self, terms: I) -> QueryResult<QueryBuilder>
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        Query::into(self.clone()).insert(terms)
    }
}

impl From<&str> for Table {
    fn from(name: &str) -> Self {
        Table::new(name)
    }
}

impl From<String> for Table {
    fn from(name: String) -> Self {
        Table::new(name)
    }
}

impl Node for Table {
    fn to_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let mut ts = TokenStream::new();
        if let Some(schema) = &self.schema {
            ts.append(&schema.to_tokens(ctx)?).push(Token::Dot);
        }
        ts.push(Token::Ident(self.name.clone()));

        if let Some(criterion) = &self.for_ {
            ts.space()
                .push(Token::For)
                .space()
                .append(&criterion.to_tokens(ctx)?);
        } else if let Some(period) = &self.for_portion {
            ts.space()
                .push(Token::For)
                .space()
                .push(Token::Portion)
                .space()
                .push(Token::Of)
                .space()
                .append(&period.to_tokens(ctx)?);
        }

        ctx.push_alias(&mut ts, ctx.alias_of(&self.alias).as_deref());
        Ok(ts)
    }
}

/// Name of a table, optionally with an alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSpec {
    Name(String),
    Aliased(String, String),
}

impl From<&str> for TableSpec {
    fn from(name: &str) -> Self {
        TableSpec::Name(name.to_string())
    }
}

impl From<String> for TableSpec {
    fn from(name: String) -> Self {
        TableSpec::Name(name)
    }
}

impl From<(&str, &str)> for TableSpec {
    fn from((name, alias): (&str, &str)) -> Self {
        TableSpec::Aliased(name.to_string(), alias.to_string())
    }
}

/// Create several tables at once. `(name, alias)` pairs produce aliased tables.
pub fn make_tables<I, T>(specs: I) -> Vec<Table>
where
    I: IntoIterator<Item = T>,
    T: Into<TableSpec>,
{
    specs
        .into_iter()
        .map(|spec| match spec.into() {
            TableSpec::Name(name) => Table::new(name),
            TableSpec::Aliased(name, alias) => Table::new(name).as_(alias),
        })
        .collect()
}

// =============================================================================
// Source
// =============================================================================

/// What a field or star belongs to.
#[derive(Debug, Clone)]
pub enum Source {
    Table(Table),
    /// A subquery or set operation, identified by its alias.
    Query(AliasSlot),
    /// A named WITH clause.
    Cte(String),
}

impl Source {
    pub fn alias(&self) -> Option<String> {
        match self {
            Source::Table(t) => t.alias(),
            Source::Query(slot) => slot.get(),
            Source::Cte(name) => Some(name.clone()),
        }
    }

    /// Qualifier used when the field is namespaced.
    pub fn table_name(&self) -> Option<String> {
        match self {
            Source::Table(t) => Some(t.get_table_name()),
            Source::Query(slot) => slot.get(),
            Source::Cte(name) => Some(name.clone()),
        }
    }

    /// [`Source::alias`] as seen by the builders being rendered.
    pub(crate) fn alias_in(&self, ctx: &RenderContext) -> Option<String> {
        match self {
            Source::Table(t) => ctx.alias_of(&t.alias),
            Source::Query(slot) => ctx.alias_of(slot),
            Source::Cte(name) => Some(name.clone()),
        }
    }

    /// [`Source::table_name`] as seen by the builders being rendered.
    pub(crate) fn table_name_in(&self, ctx: &RenderContext) -> Option<String> {
        match self {
            Source::Table(t) => Some(t.table_name_in(ctx)),
            Source::Query(slot) => ctx.alias_of(slot),
            Source::Cte(name) => Some(name.clone()),
        }
    }
}

impl PartialEq for Source {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Source::Table(a), Source::Table(b)) => a == b,
            (Source::Query(a), Source::Query(b)) => a.same(b),
            (Source::Cte(a), Source::Cte(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Table> for Source {
    fn from(t: Table) -> Self {
        Source::Table(t)
    }
}

// =============================================================================
// Selectable
// =============================================================================

/// Anything usable in FROM or JOIN.
#[derive(Debug, Clone)]
pub enum Selectable {
    Table(Table),
    Query(Box<QueryBuilder>),
    SetOperation(Box<SetOperation>),
    /// Reference to a WITH clause by name.
    Cte(String),
}

impl Selectable {
    /// A reference to the WITH clause `name`.
    pub fn cte(name: impl Into<String>) -> Self {
        Selectable::Cte(name.into())
    }

    pub fn source(&self) -> Source {
        match self {
            Selectable::Table(t) => Source::Table(t.clone()),
            Selectable::Query(q) => Source::Query(q.alias_slot()),
            Selectable::SetOperation(op) => Source::Query(op.alias_slot()),
            Selectable::Cte(name) => Source::Cte(name.clone()),
        }
    }

    pub fn alias(&self) -> Option<String> {
        self.source().alias()
    }

    /// Alias slot of a table, subquery or set operation.
    pub(crate) fn alias_slot(&self) -> Option<AliasSlot> {
        match self {
            Selectable::Table(t) => Some(t.alias_slot()),
            Selectable::Query(q) => Some(q.alias_slot()),
            Selectable::SetOperation(op) => Some(op.alias_slot()),
            Selectable::Cte(_) => None,
        }
    }

    pub fn field(&self, name: impl Into<String>) -> Term {
        Term::bound_field(name, Some(self.source()))
    }

    pub fn star(&self) -> Term {
        Term::new(TermKind::Star(Some(self.source())))
    }

    pub(crate) fn as_table(&self) -> Option<&Table> {
        match self {
            Selectable::Table(t) => Some(t),
            _ => None,
        }
    }

    pub(crate) fn is_query(&self) -> bool {
        matches!(self, Selectable::Query(_))
    }

    /// Whether a field bound to `source` belongs to this item.
    pub(crate) fn owns(&self, source: &Source) -> bool {
        match (self, source) {
            (Selectable::Table(a), Source::Table(b)) => a == b,
            (Selectable::Query(q), Source::Query(slot)) => q.alias_slot().same(slot),
            (Selectable::SetOperation(op), Source::Query(slot)) => op.alias_slot().same(slot),
            (Selectable::Cte(a), Source::Cte(b)) => a == b,
            _ => false,
        }
    }

    pub(crate) fn replace_table(self, current: &Table, new: &Table) -> Self {
        match self {
            Selectable::Table(t) if &t == current => Selectable::Table(new.clone()),
            other => other,
        }
    }
}

impl From<Table> for Selectable {
    fn from(t: Table) -> Self {
        Selectable::Table(t)
    }
}

impl From<&Table> for Selectable {
    fn from(t: &Table) -> Self {
        Selectable::Table(t.clone())
    }
}

impl From<&str> for Selectable {
    fn from(name: &str) -> Self {
        Selectable::Table(Table::new(name))
    }
}

impl From<String> for Selectable {
    fn from(name: String) -> Self {
        Selectable::Table(Table::new(name))
    }
}

impl From<QueryBuilder> for Selectable {
    fn from(q: QueryBuilder) -> Self {
        Selectable::Query(Box::new(q))
    }
}

impl From<SetOperation> for Selectable {
    fn from(op: SetOperation) -> Self {
        Selectable::SetOperation(Box::new(op))
    }
}

impl Node for Selectable {
    fn to_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        match self {
            Selectable::Table(t) => t.to_tokens(ctx),
            Selectable::Query(q) => q.to_tokens(ctx),
            Selectable::SetOperation(op) => op.to_tokens(ctx),
            Selectable::Cte(name) => Ok(TokenStream::from(Token::Raw(name.clone()))),
        }
    }
}
