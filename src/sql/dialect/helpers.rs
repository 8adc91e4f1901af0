//! Shared helper functions for dialect implementations.
//!
//! These are free functions that dialects can delegate to, avoiding
//! code duplication across similar dialects.

use crate::sql::expr::JsonPathStep;
use crate::sql::token::{Token, TokenStream};

// =============================================================================
// Quoting
// =============================================================================

/// Wrap a value in a quote string. An empty quote leaves the value bare.
///
/// Embedded quote characters are not escaped.
pub fn format_quotes(value: &str, quote: &str) -> String {
    format!("{quote}{value}{quote}")
}

/// Double every occurrence of the quote inside a string literal.
/// Used by: all dialects
pub fn escape_quote_doubling(s: &str, quote: &str) -> String {
    if quote.is_empty() {
        return s.to_string();
    }
    s.replace(quote, &quote.repeat(2))
}

/// Double quotes, then double backslashes.
/// Used by: MySQL
pub fn escape_quote_and_backslash(s: &str, quote: &str) -> String {
    escape_quote_doubling(s, quote).replace('\\', "\\\\")
}

// =============================================================================
// Boolean Literals
// =============================================================================

/// Format boolean as literal true/false.
/// Used by: Generic, Postgres, MySQL, Oracle, MSSQL
pub fn format_bool_literal(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}

/// Format boolean as numeric 1/0.
/// Used by: SQLite
pub fn format_bool_numeric(b: bool) -> &'static str {
    if b {
        "1"
    } else {
        "0"
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Emit ` LIMIT n OFFSET m` (standard SQL).
/// Used by: Generic, Postgres, MySQL, SQLite
pub fn emit_limit_offset_standard(
    limit: Option<TokenStream>,
    offset: Option<TokenStream>,
) -> TokenStream {
    let mut ts = TokenStream::new();

    if let Some(lim) = limit {
        ts.space().push(Token::Limit).space().append(&lim);
    }

    if let Some(off) = offset {
        ts.space().push(Token::Offset).space().append(&off);
    }

    ts
}

/// Emit ` OFFSET m ROWS FETCH NEXT n ROWS ONLY`.
///
/// With `order_by_fallback`, a missing ORDER BY is replaced by
/// `ORDER BY (SELECT 0)` and a missing offset renders as `0`, since the
/// OFFSET clause is mandatory before FETCH.
/// Used by: MSSQL (with fallback), Oracle (without)
pub fn emit_offset_fetch(
    limit: Option<TokenStream>,
    offset: Option<TokenStream>,
    has_order_by: bool,
    order_by_fallback: bool,
) -> TokenStream {
    let mut ts = TokenStream::new();

    if order_by_fallback {
        if limit.is_none() && offset.is_none() {
            return ts;
        }
        if !has_order_by {
            ts.space()
                .push(Token::OrderBy)
                .space()
                .lparen()
                .push(Token::Select)
                .space()
                .push(Token::LitInt(0))
                .rparen();
        }
        ts.space().push(Token::Offset).space();
        match &offset {
            Some(off) => ts.append(off),
            None => ts.push(Token::LitInt(0)),
        };
        ts.space().push(Token::Rows);
    } else if let Some(off) = &offset {
        ts.space()
            .push(Token::Offset)
            .space()
            .append(off)
            .space()
            .push(Token::Rows);
    }

    if let Some(lim) = limit {
        ts.space()
            .push(Token::Fetch)
            .space()
            .push(Token::Next)
            .space()
            .append(&lim)
            .space()
            .push(Token::Rows)
            .space()
            .push(Token::Only);
    }

    ts
}

// =============================================================================
// Intervals
// =============================================================================

/// `INTERVAL '1 DAY'`
/// Used by: Generic, Postgres, MSSQL, SQLite
pub fn interval_quoted_expr_and_unit(expr: &str, unit: &str) -> String {
    format!("INTERVAL '{expr} {unit}'")
}

/// `INTERVAL '1' DAY`
/// Used by: MySQL, Oracle
pub fn interval_quoted_expr(expr: &str, unit: &str) -> String {
    format!("INTERVAL '{expr}' {unit}")
}

// =============================================================================
// JSON Path Access
// =============================================================================

/// Chained arrow access: `col->'a'->'b'->>0`. The last step uses `->>`.
/// Used by: Generic, Postgres, Oracle
pub fn json_path_arrows(column: TokenStream, path: &[JsonPathStep]) -> TokenStream {
    let mut ts = column;
    let last = path.len().saturating_sub(1);
    for (i, step) in path.iter().enumerate() {
        let operator = if i == last { "->>" } else { "->" };
        let part = match step {
            JsonPathStep::Index(idx) => idx.to_string(),
            JsonPathStep::Key(key) => format!("'{key}'"),
        };
        ts.push(Token::Raw(format!("{operator}{part}")));
    }
    ts
}

/// Build a `$.a.b[0]` path expression.
pub fn dollar_path(path: &[JsonPathStep]) -> String {
    let mut out = String::from("$");
    for step in path {
        match step {
            JsonPathStep::Index(idx) => out.push_str(&format!("[{idx}]")),
            JsonPathStep::Key(key) => {
                out.push('.');
                out.push_str(key);
            }
        }
    }
    out
}

/// `col->>'$.a.b[0]'`
/// Used by: MySQL, SQLite
pub fn json_path_extract_operator(column: TokenStream, path: &[JsonPathStep]) -> TokenStream {
    let mut ts = column;
    ts.push(Token::Raw(format!("->>'{}'", dollar_path(path))));
    ts
}

/// `JSON_VALUE(col, '$.a.b[0]')`
/// Used by: MSSQL
pub fn json_path_value_function(column: TokenStream, path: &[JsonPathStep]) -> TokenStream {
    let mut ts = TokenStream::new();
    ts.push(Token::FunctionName("JSON_VALUE".into()))
        .lparen()
        .append(&column)
        .comma()
        .space()
        .push(Token::Raw(format!("'{}'", dollar_path(path))))
        .rparen();
    ts
}

// =============================================================================
// Function Remapping
// =============================================================================

/// Remap functions for MSSQL dialect.
pub fn remap_function_mssql(name: &str) -> Option<&'static str> {
    match name.to_uppercase().as_str() {
        "POW" => Some("POWER"),
        _ => None,
    }
}
