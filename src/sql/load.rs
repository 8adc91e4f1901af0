//! MySQL `LOAD DATA LOCAL INFILE`.

use super::context::RenderContext;
use super::dialect::Dialect;
use super::error::QueryResult;
use super::table::Table;
use super::token::{Node, Token, TokenStream};

/// Bulk load of a comma separated file into a table.
///
/// Renders nothing until both the file and the target table are set.
#[derive(Debug, Clone, Default)]
#[must_use = "builders have no effect until used"]
pub struct LoadQueryBuilder {
    file: Option<String>,
    table: Option<Table>,
}

impl LoadQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the file on the client.
    pub fn load(mut self, path: impl Into<String>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn into_table(mut self, table: impl Into<Table>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Render with MySQL defaults.
    pub fn to_sql(&self) -> QueryResult<String> {
        self.render(&RenderContext::for_dialect(Dialect::MySql))
    }
}

impl Node for LoadQueryBuilder {
    fn to_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let mut ts = TokenStream::new();
        let (Some(file), Some(table)) = (&self.file, &self.table) else {
            return Ok(ts);
        };
        ts.push(Token::Load)
            .space()
            .push(Token::Data)
            .space()
            .push(Token::Local)
            .space()
            .push(Token::Infile)
            .space()
            .push(Token::LitString(file.clone()))
            .space()
            .push(Token::Into)
            .space()
            .push(Token::Table)
            .space()
            .append(&table.to_tokens(ctx)?)
            .space()
            .push(Token::Fields)
            .space()
            .push(Token::TerminatedBy)
            .space()
            .push(Token::LitString(",".into()));
        Ok(ts)
    }
}
