//! Operator enums and the `std::ops` overloads that build terms from them.

use std::ops;

use super::{Term, TermKind};

// =============================================================================
// Operators
// =============================================================================

/// Binary comparator of a basic criterion. The text is emitted verbatim
/// between the operands, padding included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    NotLike,
    ILike,
    NotILike,
    RLike,
    Regex,
    Regexp,
    BinRegex,
    Glob,
    AsOf,
    // JSON operators
    GetJsonValue,
    GetTextValue,
    GetPathJsonValue,
    GetPathTextValue,
    HasKey,
    Contains,
    ContainedBy,
    HasKeys,
    HasAnyKeys,
}

impl Comparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparator::Eq => "=",
            Comparator::Ne => "<>",
            Comparator::Gt => ">",
            Comparator::Gte => ">=",
            Comparator::Lt => "<",
            Comparator::Lte => "<=",
            Comparator::Like => " LIKE ",
            Comparator::NotLike => " NOT LIKE ",
            Comparator::ILike => " ILIKE ",
            Comparator::NotILike => " NOT ILIKE ",
            Comparator::RLike => " RLIKE ",
            Comparator::Regex => " REGEX ",
            Comparator::Regexp => " REGEXP ",
            Comparator::BinRegex => " REGEX BINARY ",
            Comparator::Glob => " GLOB ",
            Comparator::AsOf => " AS OF ",
            Comparator::GetJsonValue => "->",
            Comparator::GetTextValue => "->>",
            Comparator::GetPathJsonValue => "#>",
            Comparator::GetPathTextValue => "#>>",
            Comparator::HasKey => "?",
            Comparator::Contains => "@>",
            Comparator::ContainedBy => "<@",
            Comparator::HasKeys => "?&",
            Comparator::HasAnyKeys => "?|",
        }
    }
}

/// Boolean combinator of a complex criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    And,
    Or,
    Xor,
}

impl BooleanOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BooleanOp::And => "AND",
            BooleanOp::Or => "OR",
            BooleanOp::Xor => "XOR",
        }
    }
}

/// Arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithmeticOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Sub => "-",
            ArithmeticOp::Mul => "*",
            ArithmeticOp::Div => "/",
        }
    }

    pub(crate) fn is_additive(&self) -> bool {
        matches!(self, ArithmeticOp::Add | ArithmeticOp::Sub)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

// =============================================================================
// Operator overloads
// =============================================================================

impl<T: Into<Term>> ops::BitAnd<T> for Term {
    type Output = Term;

    fn bitand(self, rhs: T) -> Term {
        Term::complex(BooleanOp::And, self, rhs.into())
    }
}

impl<T: Into<Term>> ops::BitOr<T> for Term {
    type Output = Term;

    fn bitor(self, rhs: T) -> Term {
        Term::complex(BooleanOp::Or, self, rhs.into())
    }
}

impl<T: Into<Term>> ops::BitXor<T> for Term {
    type Output = Term;

    fn bitxor(self, rhs: T) -> Term {
        Term::complex(BooleanOp::Xor, self, rhs.into())
    }
}

impl ops::Not for Term {
    type Output = Term;

    fn not(self) -> Term {
        Term::new(TermKind::Not(Box::new(self)))
    }
}

impl ops::Neg for Term {
    type Output = Term;

    fn neg(self) -> Term {
        Term::new(TermKind::Negative(Box::new(self)))
    }
}

macro_rules! arithmetic_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<T: Into<Term>> ops::$trait<T> for Term {
            type Output = Term;

            fn $method(self, rhs: T) -> Term {
                Term::arithmetic($op, self, rhs.into())
            }
        }
    };
}

arithmetic_op!(Add, add, ArithmeticOp::Add);
arithmetic_op!(Sub, sub, ArithmeticOp::Sub);
arithmetic_op!(Mul, mul, ArithmeticOp::Mul);
arithmetic_op!(Div, div, ArithmeticOp::Div);

impl<T: Into<Term>> ops::Rem<T> for Term {
    type Output = Term;

    fn rem(self, rhs: T) -> Term {
        super::function::Function::new("MOD", vec![self, rhs.into()]).into()
    }
}
