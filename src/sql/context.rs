//! Render context threaded through every `to_tokens` call.
//!
//! A [`RenderContext`] is a plain value: overriding a flag returns a new
//! context and leaves the original untouched. Each dialect has a default
//! context, built once and looked up through [`RenderContext::for_dialect`].

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::dialect::{Dialect, SqlDialect};
use super::param::Parameterizer;
use super::table::{AliasScope, AliasSlot};
use super::token::{Token, TokenStream};

/// Default render contexts, one per dialect.
static DEFAULT_CONTEXTS: Lazy<HashMap<Dialect, RenderContext>> = Lazy::new(|| {
    Dialect::ALL
        .iter()
        .map(|dialect| (*dialect, RenderContext::build(*dialect)))
        .collect()
});

/// Rendering configuration: quoting, dialect and the contextual flags that
/// nested nodes consult.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Identifier quote.
    pub quote_char: String,
    /// String literal quote.
    pub secondary_quote_char: String,
    /// Alias quote. Empty means aliases use `quote_char`.
    pub alias_quote_char: String,
    pub dialect: Dialect,
    /// Emit `AS` before aliases.
    pub as_keyword: bool,
    /// The node is rendered nested inside another statement.
    pub subquery: bool,
    /// Aliases are emitted.
    pub with_alias: bool,
    /// Fields are qualified with their table.
    pub with_namespace: bool,
    /// The node is a boolean operand of a different combinator.
    pub subcriterion: bool,
    pub parameterizer: Option<Parameterizer>,
    pub groupby_alias: bool,
    pub orderby_alias: bool,
    /// Aliases the enclosing builders assigned to their sources.
    pub(crate) aliases: AliasScope,
}

/// Partial set of context fields, merged over an existing context by
/// [`RenderContext::with_overrides`].
#[derive(Debug, Clone, Default)]
pub struct ContextOverrides {
    pub quote_char: Option<String>,
    pub secondary_quote_char: Option<String>,
    pub alias_quote_char: Option<String>,
    pub dialect: Option<Dialect>,
    pub as_keyword: Option<bool>,
    pub subquery: Option<bool>,
    pub with_alias: Option<bool>,
    pub with_namespace: Option<bool>,
    pub subcriterion: Option<bool>,
    pub parameterizer: Option<Parameterizer>,
    pub groupby_alias: Option<bool>,
    pub orderby_alias: Option<bool>,
}

impl RenderContext {
    fn build(dialect: Dialect) -> Self {
        Self {
            quote_char: dialect.quote_char().into(),
            secondary_quote_char: "'".into(),
            alias_quote_char: dialect.alias_quote_char().into(),
            dialect,
            as_keyword: false,
            subquery: false,
            with_alias: false,
            with_namespace: false,
            subcriterion: false,
            parameterizer: None,
            groupby_alias: dialect.supports_groupby_alias(),
            orderby_alias: true,
            aliases: AliasScope::default(),
        }
    }

    /// Default context of a dialect.
    pub fn for_dialect(dialect: Dialect) -> Self {
        match DEFAULT_CONTEXTS.get(&dialect) {
            Some(ctx) => ctx.clone(),
            None => Self::build(dialect),
        }
    }

    /// Merge the supplied fields over this context.
    pub fn with_overrides(&self, overrides: ContextOverrides) -> Self {
        let mut ctx = self.clone();
        if let Some(v) = overrides.quote_char {
            ctx.quote_char = v;
        }
        if let Some(v) = overrides.secondary_quote_char {
            ctx.secondary_quote_char = v;
        }
        if let Some(v) = overrides.alias_quote_char {
            ctx.alias_quote_char = v;
        }
        if let Some(v) = overrides.dialect {
            ctx.dialect = v;
        }
        if let Some(v) = overrides.as_keyword {
            ctx.as_keyword = v;
        }
        if let Some(v) = overrides.subquery {
            ctx.subquery = v;
        }
        if let Some(v) = overrides.with_alias {
            ctx.with_alias = v;
        }
        if let Some(v) = overrides.with_namespace {
            ctx.with_namespace = v;
        }
        if let Some(v) = overrides.subcriterion {
            ctx.subcriterion = v;
        }
        if let Some(v) = overrides.parameterizer {
            ctx.parameterizer = Some(v);
        }
        if let Some(v) = overrides.groupby_alias {
            ctx.groupby_alias = v;
        }
        if let Some(v) = overrides.orderby_alias {
            ctx.orderby_alias = v;
        }
        ctx
    }

    // Single-field overrides, each returning a new context.

    pub fn subquery(&self, value: bool) -> Self {
        Self {
            subquery: value,
            ..self.clone()
        }
    }

    pub fn with_alias(&self, value: bool) -> Self {
        Self {
            with_alias: value,
            ..self.clone()
        }
    }

    pub fn with_namespace(&self, value: bool) -> Self {
        Self {
            with_namespace: value,
            ..self.clone()
        }
    }

    pub fn subcriterion(&self, value: bool) -> Self {
        Self {
            subcriterion: value,
            ..self.clone()
        }
    }

    pub fn as_keyword(&self, value: bool) -> Self {
        Self {
            as_keyword: value,
            ..self.clone()
        }
    }

    pub fn dialect(&self, dialect: Dialect) -> Self {
        Self {
            dialect,
            ..self.clone()
        }
    }

    pub fn quote_char(&self, quote: impl Into<String>) -> Self {
        Self {
            quote_char: quote.into(),
            ..self.clone()
        }
    }

    pub fn parameterizer(&self, parameterizer: Parameterizer) -> Self {
        Self {
            parameterizer: Some(parameterizer),
            ..self.clone()
        }
    }

    /// Add the aliases a builder assigned. They shadow those of outer builders.
    pub(crate) fn with_alias_scope(&self, scope: &AliasScope) -> Self {
        let mut ctx = self.clone();
        ctx.aliases.extend(scope);
        ctx
    }

    /// Alias of a table or subquery, including the ones assigned by builders.
    pub(crate) fn alias_of(&self, slot: &AliasSlot) -> Option<String> {
        self.aliases.resolve(slot)
    }

    /// Quote used for aliases: the alias quote, or the identifier quote when unset.
    pub fn effective_alias_quote(&self) -> &str {
        if self.alias_quote_char.is_empty() {
            &self.quote_char
        } else {
            &self.alias_quote_char
        }
    }

    /// Append ` alias` (or ` AS alias`) to a stream. Absent or empty aliases leave it unchanged.
    pub fn push_alias(&self, ts: &mut TokenStream, alias: Option<&str>) {
        let Some(alias) = alias.filter(|a| !a.is_empty()) else {
            return;
        };
        ts.space();
        if self.as_keyword {
            ts.push(Token::As).space();
        }
        ts.push(Token::Alias(alias.to_string()));
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::for_dialect(Dialect::Generic)
    }
}
