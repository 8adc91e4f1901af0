//! SQLite dialect.
//!
//! SQLite features:
//! - Booleans stored as integers (`1`/`0`)
//! - `col->>'$.path'` JSON access
//! - UPDATE ... SET ... FROM with trailing ORDER BY / LIMIT

use super::helpers;
use super::{SqlDialect, UpdateLayout};
use crate::sql::expr::JsonPathStep;
use crate::sql::token::TokenStream;

/// SQLite dialect.
#[derive(Debug, Clone, Copy)]
pub struct Sqlite;

impl SqlDialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }

    fn emit_json_path(&self, column: TokenStream, path: &[JsonPathStep]) -> TokenStream {
        helpers::json_path_extract_operator(column, path)
    }

    fn update_layout(&self) -> UpdateLayout {
        UpdateLayout::FromAfterSet
    }
}
