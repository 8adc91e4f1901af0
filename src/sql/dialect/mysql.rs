//! MySQL SQL dialect.
//!
//! MySQL features:
//! - Backtick identifier quoting (`` ` ``)
//! - Backslash escaping inside string and JSON literals
//! - `%s` placeholders
//! - SELECT modifiers (`SQL_CALC_FOUND_ROWS`)
//! - `INSERT IGNORE` and `ON DUPLICATE KEY UPDATE`
//! - ORDER BY / LIMIT on UPDATE
//! - Set-operation members are not parenthesized

use super::helpers;
use super::{ConflictStyle, SqlDialect, UpdateLayout};
use crate::sql::expr::JsonPathStep;
use crate::sql::token::TokenStream;

/// MySQL SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct MySql;

impl SqlDialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_char(&self) -> &'static str {
        "`"
    }

    fn escape_string(&self, s: &str, quote: &str) -> String {
        helpers::escape_quote_and_backslash(s, quote)
    }

    fn escape_json(&self, json: &str) -> String {
        json.replace('\\', "\\\\")
    }

    fn placeholder(&self, _idx: usize) -> String {
        "%s".into()
    }

    fn format_interval(&self, expr: &str, unit: &str) -> String {
        helpers::interval_quoted_expr(expr, unit)
    }

    fn emit_json_path(&self, column: TokenStream, path: &[JsonPathStep]) -> TokenStream {
        helpers::json_path_extract_operator(column, path)
    }

    fn wrap_set_operation_queries(&self) -> bool {
        false
    }

    fn update_layout(&self) -> UpdateLayout {
        UpdateLayout::TrailingOrderLimit
    }

    fn conflict_style(&self) -> ConflictStyle {
        ConflictStyle::OnDuplicateKey
    }

    fn supports_select_modifiers(&self) -> bool {
        true
    }
}
