//! Microsoft SQL Server dialect.
//!
//! MSSQL features:
//! - `SELECT TOP (n)`
//! - `OFFSET n ROWS FETCH NEXT m ROWS ONLY` pagination; OFFSET is mandatory
//!   and needs an ORDER BY, so `ORDER BY (SELECT 0)` is inserted when absent
//! - GROUP BY cannot reference a SELECT alias
//! - `JSON_VALUE(col, '$.path')` for JSON access
//! - `POWER` instead of `POW`

use super::helpers;
use super::SqlDialect;
use crate::sql::expr::JsonPathStep;
use crate::sql::token::TokenStream;

/// Microsoft SQL Server dialect.
#[derive(Debug, Clone, Copy)]
pub struct MsSql;

impl SqlDialect for MsSql {
    fn name(&self) -> &'static str {
        "mssql"
    }

    fn supports_groupby_alias(&self) -> bool {
        false
    }

    fn emit_json_path(&self, column: TokenStream, path: &[JsonPathStep]) -> TokenStream {
        helpers::json_path_value_function(column, path)
    }

    fn remap_function(&self, name: &str) -> Option<&'static str> {
        helpers::remap_function_mssql(name)
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
        helpers::emit_offset_fetch(limit, offset, has_order_by, true)
    }

    fn supports_top(&self) -> bool {
        true
    }
}
