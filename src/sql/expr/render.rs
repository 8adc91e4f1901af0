//! Rendering of terms into token streams.
//!
//! Alias handling differs per kind: value-like terms (constants, tuples,
//! membership and range tests) always carry their alias, while fields,
//! functions and most criteria only do so when the context asks for aliases.

use super::function::SpecialParams;
use super::{ArithmeticOp, Case, Function, Term, TermKind};
use crate::sql::context::RenderContext;
use crate::sql::dialect::helpers;
use crate::sql::dialect::SqlDialect;
use crate::sql::error::{QueryError, QueryResult};
use crate::sql::table::Source;
use crate::sql::token::{Node, Token, TokenStream};

impl Node for Term {
    fn to_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let mut ts = TokenStream::new();
        let alias = self.alias.as_deref();

        match &self.kind {
            TermKind::Literal(sql) => {
                ts.raw(sql.clone());
                ctx.push_alias(&mut ts, alias);
            }

            TermKind::Value {
                value,
                allow_parametrize,
            } => {
                match &ctx.parameterizer {
                    Some(p) if *allow_parametrize && p.should_parameterize(value) => {
                        ts.append(&p.create_param(value.clone()).to_tokens(ctx));
                    }
                    _ => {
                        ts.append(&value.to_literal_tokens(ctx)?);
                    }
                }
                ctx.push_alias(&mut ts, alias);
            }

            TermKind::Field { name, table } => {
                if let Some(namespace) = namespace_of(table.as_ref(), ctx) {
                    ts.push(Token::Ident(namespace)).push(Token::Dot);
                }
                ts.push(Token::Ident(name.clone()));
                if ctx.with_alias {
                    ctx.push_alias(&mut ts, alias);
                }
            }

            TermKind::Star(table) => {
                if let Some(namespace) = namespace_of(table.as_ref(), ctx) {
                    ts.push(Token::Ident(namespace)).push(Token::Dot);
                }
                ts.push(Token::Star);
            }

            TermKind::Tuple(items) => {
                ts.lparen()
                    .append(&join_terms(items, ctx, Token::Comma)?)
                    .rparen();
                ctx.push_alias(&mut ts, alias);
            }

            TermKind::Array(items) => {
                if let Some(p) = &ctx.parameterizer {
                    let values: Option<Vec<_>> =
                        items.iter().map(|item| item.as_value().cloned()).collect();
                    if let Some(values) = values {
                        let list = crate::sql::value::Value::List(values);
                        if p.should_parameterize(&list) {
                            return Ok(p.create_param(list).to_tokens(ctx));
                        }
                    }
                }
                let rendered = items
                    .iter()
                    .map(|item| item.to_tokens(ctx))
                    .collect::<QueryResult<Vec<_>>>()?;
                ts.append(&ctx.dialect.emit_array(rendered));
                ctx.push_alias(&mut ts, alias);
            }

            TermKind::Function(function) => {
                ts.append(&function_tokens(function, ctx)?);
                if ctx.with_alias {
                    ctx.push_alias(&mut ts, alias);
                }
            }

            TermKind::Case(case) => {
                ts.append(&case_tokens(case, ctx)?);
                if ctx.with_alias {
                    ctx.push_alias(&mut ts, alias);
                }
            }

            TermKind::Interval(interval) => {
                let (expr, unit) = interval.expr_and_unit();
                ts.raw(ctx.dialect.format_interval(&expr, &unit));
            }

            TermKind::Json(value) => {
                ts.raw(helpers::format_quotes(
                    &json_sql(value),
                    &ctx.secondary_quote_char,
                ));
                ctx.push_alias(&mut ts, alias);
            }

            TermKind::Arithmetic { op, left, right } => {
                let left_ts = left.to_tokens(ctx)?;
                if left_needs_parens(*op, arithmetic_op(left)) {
                    ts.lparen().append(&left_ts).rparen();
                } else {
                    ts.append(&left_ts);
                }
                ts.push(Token::Operator(op.as_str()));
                let right_ts = right.to_tokens(ctx)?;
                if right_needs_parens(*op, arithmetic_op(right)) {
                    ts.lparen().append(&right_ts).rparen();
                } else {
                    ts.append(&right_ts);
                }
                if ctx.with_alias {
                    ctx.push_alias(&mut ts, alias);
                }
            }

            TermKind::Negative(term) => {
                ts.push(Token::Operator("-")).append(&term.to_tokens(ctx)?);
            }

            TermKind::Parameter(parameter) => {
                ts.append(&parameter.to_tokens(ctx));
            }

            TermKind::Basic {
                comparator,
                left,
                right,
            } => {
                ts.append(&left.to_tokens(ctx)?)
                    .push(Token::Operator(comparator.as_str()))
                    .append(&right.to_tokens(ctx)?);
                if ctx.with_alias {
                    ctx.push_alias(&mut ts, alias);
                }
            }

            TermKind::Complex { op, left, right } => {
                let left_ctx = ctx.subcriterion(needs_brackets(*op, left));
                let right_ctx = ctx.subcriterion(needs_brackets(*op, right));
                ts.append(&left.to_tokens(&left_ctx)?)
                    .space()
                    .push(match op {
                        super::BooleanOp::And => Token::And,
                        super::BooleanOp::Or => Token::Or,
                        super::BooleanOp::Xor => Token::Xor,
                    })
                    .space()
                    .append(&right.to_tokens(&right_ctx)?);
                if ctx.subcriterion {
                    ts.parenthesize();
                }
            }

            TermKind::Nested {
                comparator,
                nested_comparator,
                left,
                right,
                nested,
            } => {
                ts.append(&left.to_tokens(ctx)?)
                    .push(Token::Operator(comparator.as_str()))
                    .append(&right.to_tokens(ctx)?)
                    .push(Token::Operator(nested_comparator.as_str()))
                    .append(&nested.to_tokens(ctx)?);
                if ctx.with_alias {
                    ctx.push_alias(&mut ts, alias);
                }
            }

            TermKind::Contains {
                term,
                container,
                negated,
            } => {
                ts.append(&term.to_tokens(ctx)?).space();
                if *negated {
                    ts.push(Token::Not).space();
                }
                ts.push(Token::In)
                    .space()
                    .append(&container.to_tokens(&ctx.subquery(true))?);
                ctx.push_alias(&mut ts, alias);
            }

            TermKind::Between { term, start, end } => {
                ts.append(&term.to_tokens(ctx)?)
                    .space()
                    .push(Token::Between)
                    .space()
                    .append(&start.to_tokens(ctx)?)
                    .space()
                    .push(Token::And)
                    .space()
                    .append(&end.to_tokens(ctx)?);
                ctx.push_alias(&mut ts, alias);
            }

            TermKind::Period { term, start, end } => {
                ts.append(&term.to_tokens(ctx)?)
                    .space()
                    .push(Token::From)
                    .space()
                    .append(&start.to_tokens(ctx)?)
                    .space()
                    .raw("TO")
                    .space()
                    .append(&end.to_tokens(ctx)?);
                ctx.push_alias(&mut ts, alias);
            }

            TermKind::BitwiseAnd { term, value } => {
                ts.lparen()
                    .append(&term.to_tokens(ctx)?)
                    .push(Token::Operator(" & "))
                    .push(Token::LitInt(*value))
                    .rparen();
                ctx.push_alias(&mut ts, alias);
            }

            TermKind::IsNull(term) => {
                ts.append(&term.to_tokens(ctx)?)
                    .space()
                    .push(Token::IsNull);
                ctx.push_alias(&mut ts, alias);
            }

            TermKind::Not(term) => {
                ts.push(Token::Not)
                    .space()
                    .append(&term.to_tokens(&ctx.subcriterion(true))?);
                ctx.push_alias(&mut ts, alias);
            }

            TermKind::All(term) => {
                ts.append(&term.to_tokens(ctx)?).space().push(Token::All);
                ctx.push_alias(&mut ts, alias);
            }

            TermKind::JsonAttribute { column, path } => {
                ts.append(&ctx.dialect.emit_json_path(column.to_tokens(ctx)?, path));
                if ctx.with_alias {
                    ctx.push_alias(&mut ts, alias);
                }
            }

            TermKind::Subquery(query) => {
                ts.append(&query.to_tokens(ctx)?);
            }

            TermKind::SetOperation(op) => {
                ts.append(&op.to_tokens(ctx)?);
            }

            TermKind::Values(field) => {
                ts.push(Token::Values)
                    .lparen()
                    .append(&field.to_tokens(ctx)?)
                    .rparen();
            }

            TermKind::Index(name) => {
                ts.push(Token::Ident(name.clone()));
            }

            TermKind::PseudoColumn(name) => {
                ts.raw(name.clone());
            }

            TermKind::AtTimezone {
                field,
                zone,
                interval,
            } => {
                ts.append(&field.to_tokens(ctx)?)
                    .space()
                    .push(Token::AtTimeZone)
                    .space();
                if *interval {
                    ts.push(Token::Interval).space();
                }
                ts.raw(format!("'{zone}'"));
                ctx.push_alias(&mut ts, alias);
            }

            TermKind::Empty => {}
        }

        Ok(ts)
    }
}

/// Qualifier of a field: the source's alias or name, when namespacing is on
/// or the source carries an alias.
fn namespace_of(source: Option<&Source>, ctx: &RenderContext) -> Option<String> {
    let source = source?;
    if ctx.with_namespace || source.alias_in(ctx).is_some() {
        source.table_name_in(ctx)
    } else {
        None
    }
}

pub(crate) fn join_terms(terms: &[Term], ctx: &RenderContext, sep: Token) -> QueryResult<TokenStream> {
    let rendered = terms
        .iter()
        .map(|term| term.to_tokens(ctx))
        .collect::<QueryResult<Vec<_>>>()?;
    Ok(TokenStream::join(rendered, sep))
}

// ===== Arithmetic precedence =====

fn arithmetic_op(term: &Term) -> Option<ArithmeticOp> {
    match &term.kind {
        TermKind::Arithmetic { op, .. } => Some(*op),
        _ => None,
    }
}

/// `(a+b)*c`: an additive left operand under a multiplicative operator.
fn left_needs_parens(current: ArithmeticOp, left: Option<ArithmeticOp>) -> bool {
    match left {
        None => false,
        Some(left) => !current.is_additive() && left.is_additive(),
    }
}

/// `a-(b+c)`, `a/(b*c)`: right operands bind left-associatively.
fn right_needs_parens(current: ArithmeticOp, right: Option<ArithmeticOp>) -> bool {
    match right {
        None => false,
        Some(_) if current == ArithmeticOp::Add => false,
        Some(_) if current == ArithmeticOp::Div => true,
        Some(right) => right.is_additive(),
    }
}

/// A nested combinator needs parentheses when it differs from its parent's.
fn needs_brackets(parent: super::BooleanOp, child: &Term) -> bool {
    matches!(&child.kind, TermKind::Complex { op, .. } if *op != parent)
}

// ===== Functions =====

fn function_tokens(function: &Function, ctx: &RenderContext) -> QueryResult<TokenStream> {
    let mut ts = TokenStream::new();
    if let Some(schema) = &function.schema {
        ts.append(&schema.to_tokens(ctx)?).push(Token::Dot);
    }
    ts.push(Token::FunctionName(function.name.clone()));
    if function.bare {
        return Ok(ts);
    }

    ts.lparen();
    if function.distinct {
        ts.push(Token::Distinct).space();
    }
    ts.append(&join_terms(&function.args, &ctx.with_alias(false), Token::Comma)?);
    match &function.special {
        Some(SpecialParams::Keywords(keywords)) => {
            ts.space().raw(keywords.clone());
        }
        Some(SpecialParams::IgnoreNulls) => {
            ts.space().push(Token::IgnoreNulls);
        }
        Some(SpecialParams::From(term)) => {
            ts.space()
                .push(Token::From)
                .space()
                .append(&term.to_tokens(ctx)?);
        }
        None => {}
    }
    ts.rparen();

    if let Some(filters) = &function.filters {
        ts.space()
            .push(Token::Filter)
            .lparen()
            .push(Token::Where)
            .space()
            .append(&Term::all(filters.iter().cloned()).to_tokens(ctx)?)
            .rparen();
    }

    if let Some(window) = &function.window {
        let mut parts = Vec::new();
        if !window.partition.is_empty() {
            let mut part = TokenStream::from(Token::PartitionBy);
            part.space()
                .append(&join_terms(&window.partition, ctx, Token::Comma)?);
            parts.push(part);
        }
        if !window.orderbys.is_empty() {
            let mut items = Vec::with_capacity(window.orderbys.len());
            for (term, order) in &window.orderbys {
                let mut item = term.to_tokens(ctx)?;
                if let Some(order) = order {
                    item.space().raw(order.as_str());
                }
                items.push(item);
            }
            let mut part = TokenStream::from(Token::OrderBy);
            part.space().append(&TokenStream::join(items, Token::Comma));
            parts.push(part);
        }
        if let Some(frame) = &function.frame {
            parts.push(frame.tokens());
        }
        ts.space()
            .push(Token::Over)
            .lparen()
            .append(&TokenStream::join(parts, Token::Space))
            .rparen();
    }

    Ok(ts)
}

fn case_tokens(case: &Case, ctx: &RenderContext) -> QueryResult<TokenStream> {
    if case.cases.is_empty() {
        return Err(QueryError::Case(
            "At least one 'when' case is required for a CASE statement.".into(),
        ));
    }
    let inner = ctx.with_alias(false);
    let mut ts = TokenStream::from(Token::Case);
    for (criterion, value) in &case.cases {
        ts.space()
            .push(Token::When)
            .space()
            .append(&criterion.to_tokens(&inner)?)
            .space()
            .push(Token::Then)
            .space()
            .append(&value.to_tokens(&inner)?);
    }
    if let Some(else_) = &case.else_ {
        ts.space()
            .push(Token::Else)
            .space()
            .append(&else_.to_tokens(&inner)?);
    }
    ts.space().push(Token::End);
    Ok(ts)
}

// ===== JSON documents =====

/// Compact JSON with unescaped double-quoted strings.
fn json_sql(value: &serde_json::Value) -> String {
    use serde_json::Value as Json;
    match value {
        Json::Object(map) => {
            let pairs: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("\"{k}\":{}", json_sql(v)))
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
        Json::Array(items) => {
            let items: Vec<String> = items.iter().map(json_sql).collect();
            format!("[{}]", items.join(","))
        }
        Json::String(s) => format!("\"{s}\""),
        other => other.to_string(),
    }
}
