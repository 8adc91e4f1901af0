//! Fluent builder methods shared by every term-like type.

use super::{
    ArithmeticOp, BooleanOp, Case, Comparator, Function, Interval, JsonPathStep, Term, TermKind,
};

/// Extension trait for building criteria and expressions fluently.
///
/// Every method consumes the receiver and returns a new [`Term`].
pub trait TermExt: Sized {
    fn into_term(self) -> Term;

    /// Give the term an alias.
    fn as_(self, alias: impl Into<String>) -> Term {
        let mut term = self.into_term();
        term.set_alias(Some(alias.into()));
        term
    }

    // ===== Comparison =====

    fn eq(self, other: impl Into<Term>) -> Term {
        Term::basic(Comparator::Eq, self.into_term(), other.into())
    }

    fn ne(self, other: impl Into<Term>) -> Term {
        Term::basic(Comparator::Ne, self.into_term(), other.into())
    }

    fn gt(self, other: impl Into<Term>) -> Term {
        Term::basic(Comparator::Gt, self.into_term(), other.into())
    }

    fn gte(self, other: impl Into<Term>) -> Term {
        Term::basic(Comparator::Gte, self.into_term(), other.into())
    }

    fn lt(self, other: impl Into<Term>) -> Term {
        Term::basic(Comparator::Lt, self.into_term(), other.into())
    }

    fn lte(self, other: impl Into<Term>) -> Term {
        Term::basic(Comparator::Lte, self.into_term(), other.into())
    }

    // ===== Pattern matching =====

    fn like(self, pattern: impl Into<Term>) -> Term {
        Term::basic(Comparator::Like, self.into_term(), pattern.into())
    }

    fn not_like(self, pattern: impl Into<Term>) -> Term {
        Term::basic(Comparator::NotLike, self.into_term(), pattern.into())
    }

    fn ilike(self, pattern: impl Into<Term>) -> Term {
        Term::basic(Comparator::ILike, self.into_term(), pattern.into())
    }

    fn not_ilike(self, pattern: impl Into<Term>) -> Term {
        Term::basic(Comparator::NotILike, self.into_term(), pattern.into())
    }

    fn rlike(self, pattern: impl Into<Term>) -> Term {
        Term::basic(Comparator::RLike, self.into_term(), pattern.into())
    }

    fn regex(self, pattern: impl Into<Term>) -> Term {
        Term::basic(Comparator::Regex, self.into_term(), pattern.into())
    }

    fn regexp(self, pattern: impl Into<Term>) -> Term {
        Term::basic(Comparator::Regexp, self.into_term(), pattern.into())
    }

    fn bin_regex(self, pattern: impl Into<Term>) -> Term {
        Term::basic(Comparator::BinRegex, self.into_term(), pattern.into())
    }

    fn glob(self, pattern: impl Into<Term>) -> Term {
        Term::basic(Comparator::Glob, self.into_term(), pattern.into())
    }

    fn as_of(self, expr: impl Into<Term>) -> Term {
        Term::basic(Comparator::AsOf, self.into_term(), expr.into())
    }

    // ===== Ranges and membership =====

    fn between(self, start: impl Into<Term>, end: impl Into<Term>) -> Term {
        Term::new(TermKind::Between {
            term: Box::new(self.into_term()),
            start: Box::new(start.into()),
            end: Box::new(end.into()),
        })
    }

    /// `term FROM start TO end`
    fn from_to(self, start: impl Into<Term>, end: impl Into<Term>) -> Term {
        Term::new(TermKind::Period {
            term: Box::new(self.into_term()),
            start: Box::new(start.into()),
            end: Box::new(end.into()),
        })
    }

    /// `term ALL`
    fn all_(self) -> Term {
        Term::new(TermKind::All(Box::new(self.into_term())))
    }

    /// `term IN (a,b,..)`
    fn isin<I, T>(self, items: I) -> Term
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.isin_term(Term::tuple(items))
    }

    /// `term IN container` where the container is a subquery or any other term.
    fn isin_term(self, container: impl Into<Term>) -> Term {
        Term::new(TermKind::Contains {
            term: Box::new(self.into_term()),
            container: Box::new(container.into()),
            negated: false,
        })
    }

    fn notin<I, T>(self, items: I) -> Term
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.isin(items).negate()
    }

    fn notin_term(self, container: impl Into<Term>) -> Term {
        self.isin_term(container).negate()
    }

    fn isnull(self) -> Term {
        Term::new(TermKind::IsNull(Box::new(self.into_term())))
    }

    fn notnull(self) -> Term {
        self.isnull().negate()
    }

    /// `(term & value)`
    fn bitwiseand(self, value: i64) -> Term {
        Term::new(TermKind::BitwiseAnd {
            term: Box::new(self.into_term()),
            value,
        })
    }

    /// Logical negation. Membership tests flip to `NOT IN`; everything else
    /// is wrapped in `NOT`.
    fn negate(self) -> Term {
        let term = self.into_term();
        match term.kind {
            TermKind::Contains {
                term: inner,
                container,
                negated,
            } => Term {
                kind: TermKind::Contains {
                    term: inner,
                    container,
                    negated: !negated,
                },
                alias: term.alias,
            },
            kind => !Term {
                kind,
                alias: term.alias,
            },
        }
    }

    // ===== Boolean =====

    fn and_(self, other: impl Into<Term>) -> Term {
        Term::complex(BooleanOp::And, self.into_term(), other.into())
    }

    fn or_(self, other: impl Into<Term>) -> Term {
        Term::complex(BooleanOp::Or, self.into_term(), other.into())
    }

    fn xor_(self, other: impl Into<Term>) -> Term {
        Term::complex(BooleanOp::Xor, self.into_term(), other.into())
    }

    // ===== Arithmetic =====

    fn add(self, other: impl Into<Term>) -> Term {
        Term::arithmetic(ArithmeticOp::Add, self.into_term(), other.into())
    }

    fn sub(self, other: impl Into<Term>) -> Term {
        Term::arithmetic(ArithmeticOp::Sub, self.into_term(), other.into())
    }

    fn mul(self, other: impl Into<Term>) -> Term {
        Term::arithmetic(ArithmeticOp::Mul, self.into_term(), other.into())
    }

    fn div(self, other: impl Into<Term>) -> Term {
        Term::arithmetic(ArithmeticOp::Div, self.into_term(), other.into())
    }

    /// `POW(term,exponent)`
    fn pow(self, exponent: impl Into<Term>) -> Term {
        Function::new("POW", vec![self.into_term(), exponent.into()]).into()
    }

    /// `MOD(term,modulus)`
    fn mod_(self, modulus: impl Into<Term>) -> Term {
        Function::new("MOD", vec![self.into_term(), modulus.into()]).into()
    }

    // ===== JSON =====

    /// `term->key`
    fn get_json_value(self, key_or_index: impl Into<Term>) -> Term {
        Term::basic(Comparator::GetJsonValue, self.into_term(), key_or_index.into())
    }

    /// `term->>key`
    fn get_text_value(self, key_or_index: impl Into<Term>) -> Term {
        Term::basic(Comparator::GetTextValue, self.into_term(), key_or_index.into())
    }

    /// `term#>'path'`
    fn get_path_json_value(self, path: impl Into<String>) -> Term {
        Term::basic(
            Comparator::GetPathJsonValue,
            self.into_term(),
            Term::value(path.into()),
        )
    }

    /// `term#>>'path'`
    fn get_path_text_value(self, path: impl Into<String>) -> Term {
        Term::basic(
            Comparator::GetPathTextValue,
            self.into_term(),
            Term::value(path.into()),
        )
    }

    /// `term?key`
    fn has_key(self, key: serde_json::Value) -> Term {
        Term::basic(Comparator::HasKey, self.into_term(), json_operand(key))
    }

    /// `term@>other`
    fn contains(self, other: serde_json::Value) -> Term {
        Term::basic(Comparator::Contains, self.into_term(), json_operand(other))
    }

    /// `term<@other`
    fn contained_by(self, other: serde_json::Value) -> Term {
        Term::basic(Comparator::ContainedBy, self.into_term(), json_operand(other))
    }

    /// `term?&[keys]`
    fn has_keys<I, T>(self, keys: I) -> Term
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        Term::basic(Comparator::HasKeys, self.into_term(), Term::array(keys))
    }

    /// `term?|[keys]`
    fn has_any_keys<I, T>(self, keys: I) -> Term
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        Term::basic(Comparator::HasAnyKeys, self.into_term(), Term::array(keys))
    }

    /// Dialect-specific access to a nested JSON attribute.
    fn json_path<I, S>(self, path: I) -> Term
    where
        I: IntoIterator<Item = S>,
        S: Into<JsonPathStep>,
    {
        Term::new(TermKind::JsonAttribute {
            column: Box::new(self.into_term()),
            path: path.into_iter().map(Into::into).collect(),
        })
    }

    /// `term AT TIME ZONE 'zone'`
    fn at_timezone(self, zone: impl Into<String>, interval: bool) -> Term {
        Term::at_timezone(self.into_term(), zone, interval)
    }
}

/// Scalars become plain values, `null` the NULL literal, documents JSON literals.
fn json_operand(value: serde_json::Value) -> Term {
    use serde_json::Value as Json;
    match value {
        Json::Null => Term::null(),
        Json::Bool(b) => Term::value(b),
        Json::String(s) => Term::value(s),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Term::value(i),
            None => Term::value(n.as_f64().unwrap_or_default()),
        },
        doc => Term::json(doc),
    }
}

impl TermExt for Term {
    fn into_term(self) -> Term {
        self
    }
}

impl TermExt for Function {
    fn into_term(self) -> Term {
        self.into()
    }
}

impl TermExt for Case {
    fn into_term(self) -> Term {
        self.into()
    }
}

impl TermExt for Interval {
    fn into_term(self) -> Term {
        self.into()
    }
}
