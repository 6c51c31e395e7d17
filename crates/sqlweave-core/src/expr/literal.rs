//! Literal values and conversions from Rust primitives.

use std::sync::Arc;

use crate::precedence;
use crate::shared::{Bytes, SharedBytes, SharedText, Text};
use crate::snapshot::Snapshot;
use crate::writer::{Render, SqlWriter};

use super::Expr;

/// A SQL literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// NULL value.
    Null,
    /// Boolean value.
    Boolean(bool),
    /// Integer value.
    Integer(i64),
    /// Real value.
    Real(f64),
    /// Text value.
    Text(Text),
    /// Binary blob value.
    Blob(Bytes),
    /// `CURRENT_TIME`
    CurrentTime,
    /// `CURRENT_DATE`
    CurrentDate,
    /// `CURRENT_TIMESTAMP`
    CurrentTimestamp,
}

impl Render for Literal {
    /// Signed numbers bind like a prefix minus, since their text starts
    /// with one.
    fn precedence(&self) -> u8 {
        match self {
            Self::Integer(n) if *n < 0 => precedence::UNARY,
            Self::Real(f) if f.is_sign_negative() && !f.is_nan() => precedence::UNARY,
            _ => precedence::ATOMIC,
        }
    }

    fn render(&self, w: &mut SqlWriter) {
        match self {
            Self::Null => w.push_str("NULL"),
            Self::Boolean(b) => w.boolean_literal(*b),
            Self::Integer(n) => w.integer_literal(*n),
            Self::Real(f) => w.real_literal(*f),
            Self::Text(text) => text.with(|t| w.text_literal(t)),
            Self::Blob(bytes) => bytes.with(|b| w.blob_literal(b)),
            Self::CurrentTime => w.push_str("CURRENT_TIME"),
            Self::CurrentDate => w.push_str("CURRENT_DATE"),
            Self::CurrentTimestamp => w.push_str("CURRENT_TIMESTAMP"),
        }
    }
}

impl Snapshot for Literal {
    fn snapshot(&self) -> Option<Self> {
        match self {
            Self::Text(text) => text.snapshot().map(Self::Text),
            Self::Blob(bytes) => bytes.snapshot().map(Self::Blob),
            _ => None,
        }
    }
}

/// Trait for types that can be converted to SQL literals.
pub trait ToLiteral {
    /// Converts the value to a `Literal`.
    fn to_literal(self) -> Literal;
}

impl ToLiteral for Literal {
    fn to_literal(self) -> Literal {
        self
    }
}

impl ToLiteral for bool {
    fn to_literal(self) -> Literal {
        Literal::Boolean(self)
    }
}

macro_rules! impl_to_literal_integer {
    ($($ty:ty),+) => {
        $(
            impl ToLiteral for $ty {
                fn to_literal(self) -> Literal {
                    Literal::Integer(i64::from(self))
                }
            }
        )+
    };
}

impl_to_literal_integer!(i8, i16, i32, i64, u8, u16, u32);

impl ToLiteral for f64 {
    fn to_literal(self) -> Literal {
        Literal::Real(self)
    }
}

impl ToLiteral for f32 {
    fn to_literal(self) -> Literal {
        Literal::Real(f64::from(self))
    }
}

impl ToLiteral for &str {
    fn to_literal(self) -> Literal {
        Literal::Text(Text::from(self))
    }
}

impl ToLiteral for String {
    fn to_literal(self) -> Literal {
        Literal::Text(Text::from(self))
    }
}

impl ToLiteral for Arc<str> {
    fn to_literal(self) -> Literal {
        Literal::Text(Text::from(self))
    }
}

impl ToLiteral for SharedText {
    fn to_literal(self) -> Literal {
        Literal::Text(Text::from(self))
    }
}

impl ToLiteral for &SharedText {
    fn to_literal(self) -> Literal {
        Literal::Text(Text::from(self))
    }
}

impl ToLiteral for Vec<u8> {
    fn to_literal(self) -> Literal {
        Literal::Blob(Bytes::from(self))
    }
}

impl ToLiteral for &[u8] {
    fn to_literal(self) -> Literal {
        Literal::Blob(Bytes::from(self))
    }
}

impl ToLiteral for SharedBytes {
    fn to_literal(self) -> Literal {
        Literal::Blob(Bytes::from(self))
    }
}

impl ToLiteral for &SharedBytes {
    fn to_literal(self) -> Literal {
        Literal::Blob(Bytes::from(self))
    }
}

impl<T: ToLiteral> ToLiteral for Option<T> {
    fn to_literal(self) -> Literal {
        match self {
            Some(v) => v.to_literal(),
            None => Literal::Null,
        }
    }
}

/// Trait for operands accepted by the expression factories: expressions
/// themselves, or any value with a literal form.
pub trait IntoExpr {
    /// Converts the operand to an expression.
    fn into_expr(self) -> Expr;
}

impl IntoExpr for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

impl IntoExpr for &Expr {
    fn into_expr(self) -> Expr {
        self.clone()
    }
}

impl<T: ToLiteral> IntoExpr for Option<T> {
    fn into_expr(self) -> Expr {
        Expr::literal(self.to_literal())
    }
}

macro_rules! impl_into_expr_via_literal {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl IntoExpr for $ty {
                fn into_expr(self) -> Expr {
                    Expr::literal(self.to_literal())
                }
            }
        )+
    };
}

impl_into_expr_via_literal!(
    Literal,
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    &str,
    String,
    Arc<str>,
    SharedText,
    &SharedText,
    Vec<u8>,
    &[u8],
    SharedBytes,
    &SharedBytes,
);
