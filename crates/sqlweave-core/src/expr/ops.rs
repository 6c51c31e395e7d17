//! Operator tags and their precedence.

use crate::precedence;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // String and JSON
    Concat,
    Extract,
    ExtractText,

    // Arithmetic
    Mul,
    Div,
    Mod,
    Add,
    Sub,

    // Bitwise
    LeftShift,
    RightShift,
    BitAnd,
    BitOr,

    // Comparison
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Equality
    Eq,
    NotEq,
    Is,
    IsNot,

    // Logical
    And,
    Or,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Concat => "||",
            Self::Extract => "->",
            Self::ExtractText => "->>",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Add => "+",
            Self::Sub => "-",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    /// Returns the precedence of the operator (higher = binds tighter).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Concat | Self::Extract | Self::ExtractText => precedence::CONCAT,
            Self::Mul | Self::Div | Self::Mod => precedence::MULTIPLICATIVE,
            Self::Add | Self::Sub => precedence::ADDITIVE,
            Self::LeftShift | Self::RightShift | Self::BitAnd | Self::BitOr => {
                precedence::BITWISE
            }
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => precedence::COMPARISON,
            Self::Eq | Self::NotEq | Self::Is | Self::IsNot => precedence::EQUALITY,
            Self::And => precedence::AND,
            Self::Or => precedence::OR,
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// No-op `+`
    Plus,
    /// Negation `-`
    Neg,
    /// Bitwise NOT `~`
    BitNot,
    /// Logical NOT
    Not,
    /// Postfix ISNULL
    IsNull,
    /// Postfix NOTNULL
    NotNull,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Neg => "-",
            Self::BitNot => "~",
            Self::Not => "NOT",
            Self::IsNull => "ISNULL",
            Self::NotNull => "NOTNULL",
        }
    }

    /// Returns true for operators written after their operand.
    #[must_use]
    pub const fn is_postfix(&self) -> bool {
        matches!(self, Self::IsNull | Self::NotNull)
    }

    /// Returns the precedence of the operator.
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Plus | Self::Neg | Self::BitNot => precedence::UNARY,
            Self::Not => precedence::NOT,
            Self::IsNull | Self::NotNull => precedence::EQUALITY,
        }
    }
}

/// Pattern-matching operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOp {
    Like,
    Glob,
    Regexp,
    Match,
}

impl MatchOp {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "LIKE",
            Self::Glob => "GLOB",
            Self::Regexp => "REGEXP",
            Self::Match => "MATCH",
        }
    }
}
