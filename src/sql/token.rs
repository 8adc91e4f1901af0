//! SQL Tokens - the atomic units of SQL output.
//!
//! Tokens are dialect-agnostic representations that serialize to
//! dialect-specific strings under a [`RenderContext`]: identifiers take the
//! context's quote character, string literals its secondary quote, and
//! booleans and function names go through the context's dialect.

use super::context::RenderContext;
use super::dialect::{helpers, SqlDialect};
use super::error::QueryResult;

/// SQL Token - every possible element in a SQL statement.
///
/// Adding a new variant here will cause compile errors everywhere
/// it needs to be handled (exhaustive matching).
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // === Keywords ===
    Select,
    From,
    Where,
    Prewhere,
    And,
    Or,
    Xor,
    Not,
    As,
    On,
    Join,
    Using,
    Collate,
    GroupBy,
    Having,
    OrderBy,
    Limit,
    Offset,
    Fetch,
    Next,
    Rows,
    Only,
    Top,
    Case,
    When,
    Then,
    Else,
    End,
    In,
    Between,
    IsNull,
    Distinct,
    All,
    With,
    Recursive,
    Totals,
    Rollup,
    Null,

    // === Window Function Keywords ===
    Over,
    PartitionBy,
    Filter,
    IgnoreNulls,
    Range,
    Unbounded,
    Preceding,
    Following,
    CurrentRow,

    // === DDL Keywords ===
    Create,
    Drop,
    Table,
    Temporary,
    Unlogged,
    If,
    Exists,
    Primary,
    Key,
    Unique,
    Default,
    Period,
    SystemVersioning,

    // === DML Keywords ===
    Insert,
    Replace,
    Ignore,
    Into,
    Values,
    Update,
    Set,
    Delete,
    Returning,
    Conflict,
    Do,
    Nothing,
    DuplicateKey,
    Excluded,

    // === Locking and Hints ===
    For,
    Portion,
    Of,
    NoKey,
    Nowait,
    SkipLocked,
    Force,
    Use,
    Index,

    // === Misc Keywords ===
    Array,
    AtTimeZone,
    Interval,
    Load,
    Data,
    Local,
    Infile,
    Fields,
    TerminatedBy,

    // === Punctuation ===
    Comma,
    Dot,
    Star,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Eq,

    /// Operator text emitted verbatim (comparators, arithmetic, JSON operators).
    Operator(&'static str),

    // === Whitespace ===
    Space,

    // === Dynamic Content ===
    /// Identifier quoted with the context quote character.
    Ident(String),
    /// Alias quoted with the alias quote character (falling back to the quote character).
    Alias(String),
    /// Integer literal
    LitInt(i64),
    /// Float literal. Finiteness is checked before the token is built.
    LitFloat(f64),
    /// String literal, quoted with the secondary quote character.
    LitString(String),
    /// Boolean literal
    LitBool(bool),
    /// JSON document literal, quoted with the secondary quote character.
    LitJson(String),
    /// NULL literal
    LitNull,

    // === Function Names ===
    /// Function name, remapped per dialect.
    FunctionName(String),

    // === Escape Hatch ===
    /// Raw SQL passed directly to output without escaping.
    ///
    /// # Security Warning
    ///
    /// **Never pass user input to this variant.** Raw SQL is not sanitized
    /// and can lead to SQL injection vulnerabilities. Only use with:
    /// - Trusted, static SQL fragments
    /// - Placeholders and already-rendered nested statements
    Raw(String),
}

impl Token {
    /// Serialize this token to a string for the given context.
    pub fn serialize(&self, ctx: &RenderContext) -> String {
        match self {
            // Keywords
            Token::Select => "SELECT".into(),
            Token::From => "FROM".into(),
            Token::Where => "WHERE".into(),
            Token::Prewhere => "PREWHERE".into(),
            Token::And => "AND".into(),
            Token::Or => "OR".into(),
            Token::Xor => "XOR".into(),
            Token::Not => "NOT".into(),
            Token::As => "AS".into(),
            Token::On => "ON".into(),
            Token::Join => "JOIN".into(),
            Token::Using => "USING".into(),
            Token::Collate => "COLLATE".into(),
            Token::GroupBy => "GROUP BY".into(),
            Token::Having => "HAVING".into(),
            Token::OrderBy => "ORDER BY".into(),
            Token::Limit => "LIMIT".into(),
            Token::Offset => "OFFSET".into(),
            Token::Fetch => "FETCH".into(),
            Token::Next => "NEXT".into(),
            Token::Rows => "ROWS".into(),
            Token::Only => "ONLY".into(),
            Token::Top => "TOP".into(),
            Token::Case => "CASE".into(),
            Token::When => "WHEN".into(),
            Token::Then => "THEN".into(),
            Token::Else => "ELSE".into(),
            Token::End => "END".into(),
            Token::In => "IN".into(),
            Token::Between => "BETWEEN".into(),
            Token::IsNull => "IS NULL".into(),
            Token::Distinct => "DISTINCT".into(),
            Token::All => "ALL".into(),
            Token::With => "WITH".into(),
            Token::Recursive => "RECURSIVE".into(),
            Token::Totals => "TOTALS".into(),
            Token::Rollup => "ROLLUP".into(),
            Token::Null => "NULL".into(),

            // Window function keywords
            Token::Over => "OVER".into(),
            Token::PartitionBy => "PARTITION BY".into(),
            Token::Filter => "FILTER".into(),
            Token::IgnoreNulls => "IGNORE NULLS".into(),
            Token::Range => "RANGE".into(),
            Token::Unbounded => "UNBOUNDED".into(),
            Token::Preceding => "PRECEDING".into(),
            Token::Following => "FOLLOWING".into(),
            Token::CurrentRow => "CURRENT ROW".into(),

            // DDL keywords
            Token::Create => "CREATE".into(),
            Token::Drop => "DROP".into(),
            Token::Table => "TABLE".into(),
            Token::Temporary => "TEMPORARY".into(),
            Token::Unlogged => "UNLOGGED".into(),
            Token::If => "IF".into(),
            Token::Exists => "EXISTS".into(),
            Token::Primary => "PRIMARY".into(),
            Token::Key => "KEY".into(),
            Token::Unique => "UNIQUE".into(),
            Token::Default => "DEFAULT".into(),
            Token::Period => "PERIOD".into(),
            Token::SystemVersioning => "SYSTEM VERSIONING".into(),

            // DML keywords
            Token::Insert => "INSERT".into(),
            Token::Replace => "REPLACE".into(),
            Token::Ignore => "IGNORE".into(),
            Token::Into => "INTO".into(),
            Token::Values => "VALUES".into(),
            Token::Update => "UPDATE".into(),
            Token::Set => "SET".into(),
            Token::Delete => "DELETE".into(),
            Token::Returning => "RETURNING".into(),
            Token::Conflict => "CONFLICT".into(),
            Token::Do => "DO".into(),
            Token::Nothing => "NOTHING".into(),
            Token::DuplicateKey => "DUPLICATE KEY".into(),
            Token::Excluded => "EXCLUDED".into(),

            // Locking and hints
            Token::For => "FOR".into(),
            Token::Portion => "PORTION".into(),
            Token::Of => "OF".into(),
            Token::NoKey => "NO KEY".into(),
            Token::Nowait => "NOWAIT".into(),
            Token::SkipLocked => "SKIP LOCKED".into(),
            Token::Force => "FORCE".into(),
            Token::Use => "USE".into(),
            Token::Index => "INDEX".into(),

            // Misc keywords
            Token::Array => "ARRAY".into(),
            Token::AtTimeZone => "AT TIME ZONE".into(),
            Token::Interval => "INTERVAL".into(),
            Token::Load => "LOAD".into(),
            Token::Data => "DATA".into(),
            Token::Local => "LOCAL".into(),
            Token::Infile => "INFILE".into(),
            Token::Fields => "FIELDS".into(),
            Token::TerminatedBy => "TERMINATED BY".into(),

            // Punctuation
            Token::Comma => ",".into(),
            Token::Dot => ".".into(),
            Token::Star => "*".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
            Token::LBracket => "[".into(),
            Token::RBracket => "]".into(),
            Token::Eq => "=".into(),
            Token::Operator(op) => (*op).into(),

            // Whitespace
            Token::Space => " ".into(),

            // Dynamic - context-specific formatting
            Token::Ident(name) => helpers::format_quotes(name, &ctx.quote_char),
            Token::Alias(name) => helpers::format_quotes(name, ctx.effective_alias_quote()),
            Token::LitInt(n) => n.to_string(),
            Token::LitFloat(f) => {
                let mut buffer = ryu::Buffer::new();
                buffer.format(*f).to_string()
            }
            Token::LitString(s) => {
                let quote = &ctx.secondary_quote_char;
                helpers::format_quotes(&ctx.dialect.escape_string(s, quote), quote)
            }
            Token::LitBool(b) => ctx.dialect.format_bool(*b).into(),
            Token::LitJson(text) => ctx
                .dialect
                .escape_json(&helpers::format_quotes(text, &ctx.secondary_quote_char)),
            Token::LitNull => "NULL".into(),

            // Function names with dialect-specific remapping
            Token::FunctionName(name) => match ctx.dialect.remap_function(name) {
                Some(remapped) => remapped.into(),
                None => name.clone(),
            },

            // Escape hatch
            Token::Raw(s) => s.clone(),
        }
    }
}

/// A stream of tokens that can be serialized to SQL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Create an empty token stream.
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    /// Join streams with a separator token between each pair.
    pub fn join(streams: impl IntoIterator<Item = TokenStream>, sep: Token) -> Self {
        let mut ts = TokenStream::new();
        for (i, stream) in streams.into_iter().enumerate() {
            if i > 0 {
                ts.push(sep.clone());
            }
            ts.tokens.extend(stream.tokens);
        }
        ts
    }

    /// Push a single token.
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Extend with multiple tokens.
    pub fn extend(&mut self, tokens: impl IntoIterator<Item = Token>) -> &mut Self {
        self.tokens.extend(tokens);
        self
    }

    /// Append another token stream.
    pub fn append(&mut self, other: &TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    /// Wrap the whole stream in parentheses.
    pub fn parenthesize(&mut self) -> &mut Self {
        self.tokens.insert(0, Token::LParen);
        self.tokens.push(Token::RParen);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Serialize all tokens to a SQL string.
    pub fn serialize(&self, ctx: &RenderContext) -> String {
        self.tokens.iter().map(|t| t.serialize(ctx)).collect()
    }

    // Convenience methods for common tokens
    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
    pub fn raw(&mut self, sql: impl Into<String>) -> &mut Self {
        self.push(Token::Raw(sql.into()))
    }
}

impl From<Token> for TokenStream {
    fn from(token: Token) -> Self {
        Self {
            tokens: vec![token],
        }
    }
}

/// Anything that renders to SQL under a [`RenderContext`].
///
/// Rendering is a pure function of the node and the context; the only side
/// effect is bind-value capture on the context's parameterizer.
pub trait Node {
    /// Build the token stream for this node.
    fn to_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream>;

    /// Render this node to SQL text.
    fn render(&self, ctx: &RenderContext) -> QueryResult<String> {
        Ok(self.to_tokens(ctx)?.serialize(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::dialect::Dialect;

    #[test]
    fn test_keyword_serialize() {
        let ctx = RenderContext::default();
        assert_eq!(Token::Select.serialize(&ctx), "SELECT");
        assert_eq!(Token::GroupBy.serialize(&ctx), "GROUP BY");
    }

    #[test]
    fn test_ident_serialize() {
        let tok = Token::Ident("users".into());
        assert_eq!(tok.serialize(&RenderContext::default()), "\"users\"");
        assert_eq!(
            tok.serialize(&RenderContext::for_dialect(Dialect::MySql)),
            "`users`"
        );
    }

    #[test]
    fn test_ident_not_escaped() {
        let tok = Token::Ident("we\"ird".into());
        assert_eq!(tok.serialize(&RenderContext::default()), "\"we\"ird\"");
    }

    #[test]
    fn test_alias_quote_fallback() {
        let tok = Token::Alias("total".into());
        assert_eq!(tok.serialize(&RenderContext::default()), "\"total\"");
        assert_eq!(
            tok.serialize(&RenderContext::for_dialect(Dialect::MySql)),
            "`total`"
        );
    }

    #[test]
    fn test_string_literal_escaping() {
        let tok = Token::LitString("it's".into());
        assert_eq!(tok.serialize(&RenderContext::default()), "'it''s'");

        let tok = Token::LitString(r"a\b".into());
        assert_eq!(
            tok.serialize(&RenderContext::for_dialect(Dialect::MySql)),
            r"'a\\b'"
        );
    }

    #[test]
    fn test_bool_literal() {
        assert_eq!(Token::LitBool(true).serialize(&RenderContext::default()), "true");
        assert_eq!(
            Token::LitBool(true).serialize(&RenderContext::for_dialect(Dialect::Sqlite)),
            "1"
        );
    }

    #[test]
    fn test_function_name_remap() {
        let tok = Token::FunctionName("POW".into());
        assert_eq!(tok.serialize(&RenderContext::default()), "POW");
        assert_eq!(
            tok.serialize(&RenderContext::for_dialect(Dialect::MsSql)),
            "POWER"
        );
        let tok = Token::FunctionName("count".into());
        assert_eq!(tok.serialize(&RenderContext::default()), "count");
    }

    #[test]
    fn test_token_stream() {
        let mut ts = TokenStream::new();
        ts.push(Token::Select)
            .space()
            .push(Token::Ident("name".into()))
            .space()
            .push(Token::From)
            .space()
            .push(Token::Ident("users".into()));

        assert_eq!(
            ts.serialize(&RenderContext::default()),
            "SELECT \"name\" FROM \"users\""
        );
    }

    #[test]
    fn test_join_and_parenthesize() {
        let items = vec![
            TokenStream::from(Token::LitInt(1)),
            TokenStream::from(Token::LitInt(2)),
        ];
        let mut ts = TokenStream::join(items, Token::Comma);
        ts.parenthesize();
        assert_eq!(ts.serialize(&RenderContext::default()), "(1,2)");
        assert!(TokenStream::join(Vec::new(), Token::Comma).is_empty());
    }

    #[test]
    fn test_float_serialize() {
        let ctx = RenderContext::default();
        assert_eq!(Token::LitFloat(2.2).serialize(&ctx), "2.2");
        assert_eq!(Token::LitFloat(1.0).serialize(&ctx), "1.0");
        assert_eq!(Token::LitFloat(-42.5).serialize(&ctx), "-42.5");
    }
}
