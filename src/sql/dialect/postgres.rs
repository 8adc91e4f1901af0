//! PostgreSQL SQL dialect.
//!
//! PostgreSQL features:
//! - ANSI identifier quoting (`"`), aliases always double-quoted
//! - `$n` positional placeholders
//! - `ARRAY[...]` literals
//! - RETURNING clause
//! - ON CONFLICT for upserts
//! - DISTINCT ON
//! - FOR NO KEY UPDATE
//! - UPDATE ... SET ... FROM

use super::{SqlDialect, UpdateLayout};
use crate::sql::token::{Token, TokenStream};

/// PostgreSQL SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Postgres;

impl SqlDialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn alias_quote_char(&self) -> &'static str {
        "\""
    }

    fn placeholder(&self, idx: usize) -> String {
        format!("${idx}")
    }

    fn emit_array(&self, items: Vec<TokenStream>) -> TokenStream {
        let mut ts = TokenStream::new();
        if items.is_empty() {
            ts.push(Token::Raw("'{}'".into()));
            return ts;
        }
        ts.push(Token::Array)
            .push(Token::LBracket)
            .append(&TokenStream::join(items, Token::Comma))
            .push(Token::RBracket);
        ts
    }

    // Uses default emit_limit_offset (LIMIT ... OFFSET ...)

    fn update_layout(&self) -> UpdateLayout {
        UpdateLayout::FromAfterSet
    }

    fn supports_returning(&self) -> bool {
        true
    }

    fn supports_distinct_on(&self) -> bool {
        true
    }

    fn supports_no_key_update(&self) -> bool {
        true
    }
}
