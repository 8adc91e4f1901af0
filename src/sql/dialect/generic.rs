//! Generic SQL dialect.
//!
//! The default rendering target. Every hook uses the trait defaults:
//! - ANSI identifier quoting (`"`)
//! - `'` string literals with doubled quotes
//! - Boolean literals `true`/`false`
//! - `?` placeholders
//! - `LIMIT n OFFSET m` pagination

use super::SqlDialect;

/// Generic SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Generic;

impl SqlDialect for Generic {
    fn name(&self) -> &'static str {
        "generic"
    }
}
