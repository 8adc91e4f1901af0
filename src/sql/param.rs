//! Bind parameters.
//!
//! A [`Parameterizer`] attached to a [`RenderContext`] captures every
//! parameterizable [`Value`] met during rendering, in render order, and
//! replaces it with a placeholder. Clones share the captured list, so a
//! context copied down the tree keeps feeding the same collector.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use super::context::RenderContext;
use super::dialect::SqlDialect;
use super::error::{QueryError, QueryResult};
use super::token::{Token, TokenStream};
use super::value::Value;

/// Builds the placeholder text for a 1-based bind index.
pub type PlaceholderFactory = Arc<dyn Fn(usize) -> String + Send + Sync>;

/// A placeholder term: either literal placeholder text or a positional index
/// resolved by the rendering dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameter {
    Placeholder(String),
    Index(usize),
}

impl Parameter {
    /// Literal placeholder such as `:name` or `%(name)s`.
    pub fn placeholder(text: impl Into<String>) -> QueryResult<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(QueryError::Parameter(
                "Must provide either a placeholder or an idx".into(),
            ));
        }
        Ok(Parameter::Placeholder(text))
    }

    /// Positional placeholder, starting at 1.
    pub fn index(idx: usize) -> QueryResult<Self> {
        if idx < 1 {
            return Err(QueryError::Parameter("idx must start at 1".into()));
        }
        Ok(Parameter::Index(idx))
    }

    pub fn to_tokens(&self, ctx: &RenderContext) -> TokenStream {
        let text = match self {
            Parameter::Placeholder(text) => text.clone(),
            Parameter::Index(idx) => ctx.dialect.placeholder(*idx),
        };
        TokenStream::from(Token::Raw(text))
    }
}

/// Collects bind values during a render pass.
#[derive(Clone, Default)]
pub struct Parameterizer {
    values: Arc<Mutex<Vec<Value>>>,
    placeholder_factory: Option<PlaceholderFactory>,
}

impl Parameterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom placeholder text instead of the dialect's positional style.
    pub fn with_placeholder_factory(
        factory: impl Fn(usize) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            values: Arc::default(),
            placeholder_factory: Some(Arc::new(factory)),
        }
    }

    pub fn should_parameterize(&self, value: &Value) -> bool {
        value.is_parameterizable()
    }

    /// Record a value and return the placeholder that replaces it.
    pub fn create_param(&self, value: Value) -> Parameter {
        let idx = {
            let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
            values.push(value);
            values.len()
        };
        match &self.placeholder_factory {
            Some(factory) => Parameter::Placeholder(factory(idx)),
            None => Parameter::Index(idx),
        }
    }

    /// Values captured so far, in render order.
    pub fn values(&self) -> Vec<Value> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Parameterizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameterizer")
            .field("values", &self.values())
            .field("placeholder_factory", &self.placeholder_factory.is_some())
            .finish()
    }
}
