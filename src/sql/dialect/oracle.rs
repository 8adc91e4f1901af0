//! Oracle SQL dialect.
//!
//! Oracle features:
//! - ANSI identifier quoting (`"`), aliases always double-quoted
//! - `OFFSET n ROWS FETCH NEXT m ROWS ONLY` pagination
//! - GROUP BY cannot reference a SELECT alias
//! - `INTERVAL '1' DAY` literals

use super::helpers;
use super::SqlDialect;
use crate::sql::token::TokenStream;

/// Oracle SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Oracle;

impl SqlDialect for Oracle {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn alias_quote_char(&self) -> &'static str {
        "\""
    }

    fn supports_groupby_alias(&self) -> bool {
        false
    }

    fn format_interval(&self, expr: &str, unit: &str) -> String {
        helpers::interval_quoted_expr(expr, unit)
    }

    fn offset_before_limit(&self) -> bool {
        true
    }

    fn emit_limit_offset(
        &self,
        limit: Option<TokenStream>,
        offset: Option<TokenStream>,
        has_order_by: bool,
    ) -> TokenStream {
        helpers::emit_offset_fetch(limit, offset, has_order_by, false)
    }
}
