mod normalize;

#[cfg(test)]
mod tests;

pub use normalize::normalize;

use crate::value::Value;
use std::fmt;
use std::ops::{BitAnd, BitOr};

///
/// Predicate AST
///
/// Pure representation of compiled filter conditions, independent of
/// final SQL text. Field references are already fully qualified; literal
/// operands stay untyped scalars. Rendering to executable SQL and
/// parameter extraction belong to the external statement builder.
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CompareOp {
    /// SQL comparison symbol, for diagnostics rendering.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
        }
    }
}

///
/// ComparePredicate
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComparePredicate {
    pub field: String,
    pub op: CompareOp,
    pub value: Value,
}

impl ComparePredicate {
    #[must_use]
    pub fn new(field: impl Into<String>, op: CompareOp, value: Value) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }
}

///
/// Predicate
///
/// Leaf comparison or boolean composite. Composites with a single child
/// are semantically equivalent to that child; `normalize` removes the
/// redundant nesting when a flat tree is wanted.
///
/// An empty `And` is vacuously true. An empty `Or` is passed through
/// as-is; its truth value is whatever the external builder assigns to an
/// empty OR group.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Predicate {
    And(Vec<Self>),
    Or(Vec<Self>),
    Compare(ComparePredicate),
}

impl Predicate {
    #[must_use]
    pub const fn and(preds: Vec<Self>) -> Self {
        Self::And(preds)
    }

    #[must_use]
    pub const fn or(preds: Vec<Self>) -> Self {
        Self::Or(preds)
    }

    #[must_use]
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(field, CompareOp::Eq, value))
    }

    #[must_use]
    pub fn ne(field: impl Into<String>, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(field, CompareOp::Ne, value))
    }

    #[must_use]
    pub fn lt(field: impl Into<String>, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(field, CompareOp::Lt, value))
    }

    #[must_use]
    pub fn lte(field: impl Into<String>, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(field, CompareOp::Lte, value))
    }

    #[must_use]
    pub fn gt(field: impl Into<String>, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(field, CompareOp::Gt, value))
    }

    #[must_use]
    pub fn gte(field: impl Into<String>, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(field, CompareOp::Gte, value))
    }

    /// True when this is an empty conjunction (vacuously true).
    #[must_use]
    pub fn is_vacuous(&self) -> bool {
        matches!(self, Self::And(children) if children.is_empty())
    }
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::And(vec![self, rhs])
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::Or(vec![self, rhs])
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compare(cmp) => {
                write!(f, "{} {} {}", cmp.field, cmp.op.symbol(), cmp.value)
            }
            Self::And(children) => write_composite(f, children, "AND", "TRUE"),
            Self::Or(children) => write_composite(f, children, "OR", "FALSE"),
        }
    }
}

// Diagnostics text only; empty composites render their conventional
// identity even though the empty-OR truth value is builder-defined.
fn write_composite(
    f: &mut fmt::Formatter<'_>,
    children: &[Predicate],
    relation: &str,
    empty: &str,
) -> fmt::Result {
    if children.is_empty() {
        return write!(f, "({empty})");
    }

    write!(f, "(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            write!(f, " {relation} ")?;
        }
        write!(f, "{child}")?;
    }
    write!(f, ")")
}
