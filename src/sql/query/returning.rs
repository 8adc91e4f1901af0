//! `RETURNING` (PostgreSQL).

use super::QueryBuilder;
use crate::sql::context::RenderContext;
use crate::sql::dialect::SqlDialect;
use crate::sql::error::{QueryError, QueryResult};
use crate::sql::expr::{ColumnRef, Term, TermKind};
use crate::sql::table::Source;
use crate::sql::token::{Node, Token, TokenStream};

impl QueryBuilder {
    /// Add RETURNING terms. Bare names bind to the statement's target table;
    /// `"*"` returns every column and ignores later terms.
    pub fn returning<I, T>(mut self, terms: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<ColumnRef>,
    {
        if !self.dialect.supports_returning() {
            return Err(QueryError::unsupported(self.dialect, "RETURNING"));
        }
        for term in terms {
            match term.into() {
                ColumnRef::Name(name) if name == "*" => {
                    self.set_returns_for_star();
                    self.returns.push(Term::star());
                }
                ColumnRef::Name(name) => {
                    let Some(target) = self.target_source() else {
                        return Err(QueryError::query("Returning can't be used in this query"));
                    };
                    self.return_field(Term::bound_field(name, Some(target)))?;
                }
                ColumnRef::Term(term) => {
                    if matches!(term.kind, TermKind::Field { .. } | TermKind::Star(_)) {
                        self.return_field(term)?;
                    } else if matches!(&term.kind, TermKind::Function(f) if f.is_aggregate()) {
                        return Err(QueryError::query(
                            "Aggregate functions are not allowed in returning",
                        ));
                    } else {
                        self.validate_returning_term(&term)?;
                        self.returns.push(term);
                    }
                }
            }
        }
        Ok(self)
    }

    fn set_returns_for_star(&mut self) {
        self.returns
            .retain(|term| !matches!(term.kind, TermKind::Field { .. } | TermKind::Star(_)));
        self.return_star = true;
    }

    fn return_field(&mut self, term: Term) -> QueryResult<()> {
        if self.return_star {
            return Ok(());
        }
        self.validate_returning_term(&term)?;
        if term.is_star() {
            self.set_returns_for_star();
        }
        self.returns.push(term);
        Ok(())
    }

    /// Every field must come from the target table, FROM or a joined table.
    fn validate_returning_term(&self, term: &Term) -> QueryResult<()> {
        let sources = term.field_sources();
        if sources.is_empty() {
            return Ok(());
        }
        if self.insert_table.is_none() && self.update_table.is_none() && !self.delete_from {
            return Err(QueryError::query("Returning can't be used in this query"));
        }
        for source in sources.into_iter().flatten() {
            let is_target = match &source {
                Source::Table(t) => {
                    self.insert_table.as_ref() == Some(t) || self.update_table.as_ref() == Some(t)
                }
                _ => false,
            };
            let is_visible = self.from.iter().any(|item| item.owns(&source))
                || self.joins.iter().any(|join| {
                    join.item.owns(&source)
                        || join.criterion_sources().iter().flatten().any(|s| *s == source)
                });
            if !is_target && !is_visible {
                return Err(QueryError::query("You can't return from other tables"));
            }
        }
        Ok(())
    }

    pub(crate) fn returning_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let ctx = ctx
            .with_alias(true)
            .with_namespace(self.update_table.is_some());
        let terms = self
            .returns
            .iter()
            .map(|term| term.to_tokens(&ctx))
            .collect::<QueryResult<Vec<_>>>()?;
        let mut ts = TokenStream::new();
        ts.space()
            .push(Token::Returning)
            .space()
            .append(&TokenStream::join(terms, Token::Comma));
        Ok(ts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::expr::Function;
    use crate::sql::query::{PostgresQuery, Query};
    use crate::sql::table::Table;

    #[test]
    fn test_returning_insert() {
        let q = PostgresQuery::into("abc")
            .insert([1])
            .unwrap()
            .returning(["id", "name"])
            .unwrap();
        assert_eq!(
            q.to_sql().unwrap(),
            "INSERT INTO \"abc\" VALUES (1) RETURNING \"id\",\"name\""
        );
    }

    #[test]
    fn test_returning_star_short_circuits() {
        let q = PostgresQuery::into("abc")
            .insert([1])
            .unwrap()
            .returning(["id", "*", "name"])
            .unwrap();
        assert_eq!(q.to_sql().unwrap(), "INSERT INTO \"abc\" VALUES (1) RETURNING *");
    }

    #[test]
    fn test_returning_update_is_namespaced() {
        let t = Table::new("abc");
        let q = PostgresQuery::update(t.clone())
            .set("a", 1)
            .returning([t.field("id")])
            .unwrap();
        assert_eq!(
            q.to_sql().unwrap(),
            "UPDATE \"abc\" SET \"a\"=1 RETURNING \"abc\".\"id\""
        );
    }

    #[test]
    fn test_returning_errors() {
        let err = Query::into("abc").returning(["id"]).unwrap_err();
        assert!(matches!(err, QueryError::DialectNotSupported { .. }));

        let err = PostgresQuery::from_("abc")
            .select(["id"])
            .unwrap()
            .returning(["id"])
            .unwrap_err();
        assert_eq!(err.to_string(), "Returning can't be used in this query");

        let other = Table::new("other");
        let err = PostgresQuery::into("abc")
            .returning([other.field("id")])
            .unwrap_err();
        assert_eq!(err.to_string(), "You can't return from other tables");

        let err = PostgresQuery::into("abc")
            .returning([Function::aggregate("SUM", vec![Term::field("x")])])
            .unwrap_err();
        assert_eq!(err.to_string(), "Aggregate functions are not allowed in returning");
    }

    #[test]
    fn test_returning_expression() {
        let t = Table::new("abc");
        let q = PostgresQuery::into(t.clone())
            .insert([1])
            .unwrap()
            .returning([t.field("a") + 1])
            .unwrap();
        assert_eq!(
            q.to_sql().unwrap(),
            "INSERT INTO \"abc\" VALUES (1) RETURNING \"a\"+1"
        );
    }
}
