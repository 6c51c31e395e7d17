//! The immutable expression model.
//!
//! An [`Expr`] is a cheap-to-clone handle over a [`Node`]. Operator methods
//! build new nodes on top of existing ones without touching them, so a
//! sub-expression can be shared between any number of parents.
//!
//! ```
//! use sqlweave_core::{col, Render};
//!
//! let expr = col("a").plus(col("b")).mult(col("c"));
//! assert_eq!(expr.to_sql(), "(a + b) * c");
//! ```

pub mod case;
pub mod column;
mod copy;
pub mod function;
pub mod literal;
pub mod ops;
pub mod param;
mod render;

use std::fmt;
use std::sync::Arc;

use crate::error::{Result, SqlError};
use crate::shared::Text;
use crate::writer::{Query, Render};

use case::Case;
use column::{ColumnRef, TableRef};
use function::FunctionCall;
use literal::{IntoExpr, Literal, ToLiteral};
use ops::{BinaryOp, MatchOp, UnaryOp};
use param::Param;

/// An SQL expression.
#[derive(Clone)]
pub struct Expr(Arc<Node>);

/// The closed set of expression forms.
#[derive(Debug)]
pub enum Node {
    /// A literal value.
    Literal(Literal),
    /// A column reference.
    Column(ColumnRef),
    /// A prefix or postfix unary operation.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Expr,
    },
    /// A binary operation.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        left: Expr,
        /// Right operand.
        right: Expr,
    },
    /// `operand COLLATE collation`
    Collate {
        /// Operand.
        operand: Expr,
        /// Collation name.
        collation: Text,
    },
    /// `subject [NOT] LIKE|GLOB|REGEXP|MATCH pattern [ESCAPE escape]`
    Match {
        /// Operator.
        op: MatchOp,
        /// Whether NOT was specified.
        negated: bool,
        /// Matched expression.
        subject: Expr,
        /// Pattern.
        pattern: Expr,
        /// Escape character (LIKE only).
        escape: Option<Expr>,
    },
    /// `subject [NOT] BETWEEN low AND high`
    Between {
        /// Whether NOT was specified.
        negated: bool,
        /// Tested expression.
        subject: Expr,
        /// Lower bound.
        low: Expr,
        /// Upper bound.
        high: Expr,
    },
    /// `subject [NOT] IN target`
    In {
        /// Whether NOT was specified.
        negated: bool,
        /// Tested expression.
        subject: Expr,
        /// What the subject is looked up in.
        target: InTarget,
    },
    /// `CASE [operand] WHEN .. THEN .. [ELSE ..] END`
    Case {
        /// Optional comparand.
        operand: Option<Expr>,
        /// Non-empty `(when, then)` pairs.
        arms: Vec<(Expr, Expr)>,
        /// Optional ELSE result.
        otherwise: Option<Expr>,
    },
    /// `CAST(operand AS type_name)`
    Cast {
        /// Operand.
        operand: Expr,
        /// Target type.
        type_name: Text,
    },
    /// A function call.
    Function(FunctionCall),
    /// A non-empty row value `(a, b, ...)`.
    Row(Vec<Expr>),
    /// A bound parameter.
    Param(Param),
    /// `[NOT] EXISTS (query)`
    Exists {
        /// Whether NOT was specified.
        negated: bool,
        /// Subquery.
        query: Arc<dyn Query>,
    },
    /// A scalar subquery `(query)`.
    Subquery(Arc<dyn Query>),
}

/// The right-hand side of an IN expression.
#[derive(Debug, Clone)]
pub enum InTarget {
    /// A non-empty parenthesized list.
    List(Vec<Expr>),
    /// A subquery.
    Query(Arc<dyn Query>),
    /// A table name.
    Table(TableRef),
    /// A table-valued function call.
    Function {
        /// Function name.
        name: Text,
        /// Arguments.
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Wraps a node.
    #[must_use]
    pub fn new(node: Node) -> Self {
        Self(Arc::new(node))
    }

    /// Creates a literal expression.
    #[must_use]
    pub fn literal(literal: Literal) -> Self {
        Self::new(Node::Literal(literal))
    }

    /// Returns the node behind the handle.
    #[must_use]
    pub fn node(&self) -> &Node {
        &self.0
    }

    /// Returns true if both handles point to the same node.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Starts a searched `CASE WHEN ..` expression.
    #[must_use]
    pub const fn case() -> Case {
        Case::new(None)
    }

    /// Starts a simple `CASE operand WHEN ..` expression.
    #[must_use]
    pub fn case_on(operand: impl IntoExpr) -> Case {
        Case::new(Some(operand.into_expr()))
    }

    fn binary(self, op: BinaryOp, right: impl IntoExpr) -> Self {
        Self::new(Node::Binary {
            op,
            left: self,
            right: right.into_expr(),
        })
    }

    fn unary(self, op: UnaryOp) -> Self {
        Self::new(Node::Unary { op, operand: self })
    }

    fn matching(
        self,
        op: MatchOp,
        negated: bool,
        pattern: impl IntoExpr,
        escape: Option<Self>,
    ) -> Self {
        Self::new(Node::Match {
            op,
            negated,
            subject: self,
            pattern: pattern.into_expr(),
            escape,
        })
    }

    fn range(self, negated: bool, low: impl IntoExpr, high: impl IntoExpr) -> Self {
        Self::new(Node::Between {
            negated,
            subject: self,
            low: low.into_expr(),
            high: high.into_expr(),
        })
    }

    fn membership(self, negated: bool, target: InTarget) -> Self {
        Self::new(Node::In {
            negated,
            subject: self,
            target,
        })
    }
}

macro_rules! binary_methods {
    ($($(#[$doc:meta])* $name:ident => $op:ident;)+) => {
        impl Expr {
            $(
                $(#[$doc])*
                #[must_use]
                pub fn $name(self, other: impl IntoExpr) -> Self {
                    self.binary(BinaryOp::$op, other)
                }
            )+
        }
    };
}

binary_methods! {
    /// `self + other`
    plus => Add;
    /// `self - other`
    minus => Sub;
    /// `self * other`
    mult => Mul;
    /// `self / other`
    #[allow(clippy::should_implement_trait)]
    div => Div;
    /// `self % other`
    #[allow(clippy::should_implement_trait)]
    rem => Mod;
    /// `self || other`
    concat => Concat;
    /// `self & other`
    bit_and => BitAnd;
    /// `self | other`
    bit_or => BitOr;
    /// `self << other`
    #[allow(clippy::should_implement_trait)]
    shl => LeftShift;
    /// `self >> other`
    #[allow(clippy::should_implement_trait)]
    shr => RightShift;
    /// `self = other`
    eq => Eq;
    /// `self <> other`
    ne => NotEq;
    /// `self < other`
    lt => Lt;
    /// `self <= other`
    le => LtEq;
    /// `self > other`
    gt => Gt;
    /// `self >= other`
    ge => GtEq;
    /// `self IS other`
    is => Is;
    /// `self IS NOT other`
    is_not => IsNot;
    /// `self AND other`
    and => And;
    /// `self OR other`
    or => Or;
    /// `self -> path` (JSON extraction, returns JSON text)
    json_get => Extract;
    /// `self ->> path` (JSON extraction, returns an SQL value)
    json_get_text => ExtractText;
}

impl Expr {
    /// `NOT self`
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        self.unary(UnaryOp::Not)
    }

    /// `-self`
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn neg(self) -> Self {
        self.unary(UnaryOp::Neg)
    }

    /// `+self`
    #[must_use]
    pub fn pos(self) -> Self {
        self.unary(UnaryOp::Plus)
    }

    /// `~self`
    #[must_use]
    pub fn inv(self) -> Self {
        self.unary(UnaryOp::BitNot)
    }

    /// `self ISNULL`
    #[must_use]
    pub fn is_null(self) -> Self {
        self.unary(UnaryOp::IsNull)
    }

    /// `self NOTNULL`
    #[must_use]
    pub fn not_null(self) -> Self {
        self.unary(UnaryOp::NotNull)
    }

    /// `self COLLATE collation`
    #[must_use]
    pub fn collate(self, collation: impl Into<Text>) -> Self {
        Self::new(Node::Collate {
            operand: self,
            collation: collation.into(),
        })
    }

    /// `CAST(self AS type_name)`
    #[must_use]
    pub fn cast(self, type_name: impl Into<Text>) -> Self {
        Self::new(Node::Cast {
            operand: self,
            type_name: type_name.into(),
        })
    }

    /// `self LIKE pattern`
    #[must_use]
    pub fn like(self, pattern: impl IntoExpr) -> Self {
        self.matching(MatchOp::Like, false, pattern, None)
    }

    /// `self NOT LIKE pattern`
    #[must_use]
    pub fn not_like(self, pattern: impl IntoExpr) -> Self {
        self.matching(MatchOp::Like, true, pattern, None)
    }

    /// `self LIKE pattern ESCAPE escape`
    #[must_use]
    pub fn like_escape(self, pattern: impl IntoExpr, escape: impl IntoExpr) -> Self {
        self.matching(MatchOp::Like, false, pattern, Some(escape.into_expr()))
    }

    /// `self NOT LIKE pattern ESCAPE escape`
    #[must_use]
    pub fn not_like_escape(self, pattern: impl IntoExpr, escape: impl IntoExpr) -> Self {
        self.matching(MatchOp::Like, true, pattern, Some(escape.into_expr()))
    }

    /// `self GLOB pattern`
    #[must_use]
    pub fn glob(self, pattern: impl IntoExpr) -> Self {
        self.matching(MatchOp::Glob, false, pattern, None)
    }

    /// `self NOT GLOB pattern`
    #[must_use]
    pub fn not_glob(self, pattern: impl IntoExpr) -> Self {
        self.matching(MatchOp::Glob, true, pattern, None)
    }

    /// `self REGEXP pattern`
    #[must_use]
    pub fn regexp(self, pattern: impl IntoExpr) -> Self {
        self.matching(MatchOp::Regexp, false, pattern, None)
    }

    /// `self NOT REGEXP pattern`
    #[must_use]
    pub fn not_regexp(self, pattern: impl IntoExpr) -> Self {
        self.matching(MatchOp::Regexp, true, pattern, None)
    }

    /// `self MATCH pattern`
    #[must_use]
    pub fn matches(self, pattern: impl IntoExpr) -> Self {
        self.matching(MatchOp::Match, false, pattern, None)
    }

    /// `self NOT MATCH pattern`
    #[must_use]
    pub fn not_matches(self, pattern: impl IntoExpr) -> Self {
        self.matching(MatchOp::Match, true, pattern, None)
    }

    /// `self BETWEEN low AND high`
    #[must_use]
    pub fn between(self, low: impl IntoExpr, high: impl IntoExpr) -> Self {
        self.range(false, low, high)
    }

    /// `self NOT BETWEEN low AND high`
    #[must_use]
    pub fn not_between(self, low: impl IntoExpr, high: impl IntoExpr) -> Self {
        self.range(true, low, high)
    }

    /// `self IN (items...)`
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Empty`] when `items` is empty.
    pub fn in_list<I>(self, items: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        Ok(self.membership(false, InTarget::List(non_empty(items, "IN list")?)))
    }

    /// `self NOT IN (items...)`
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Empty`] when `items` is empty.
    pub fn not_in_list<I>(self, items: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        Ok(self.membership(true, InTarget::List(non_empty(items, "IN list")?)))
    }

    /// `self IN (query)`
    #[must_use]
    pub fn in_query<Q: Query + 'static>(self, query: Q) -> Self {
        self.membership(false, InTarget::Query(Arc::new(query)))
    }

    /// `self NOT IN (query)`
    #[must_use]
    pub fn not_in_query<Q: Query + 'static>(self, query: Q) -> Self {
        self.membership(true, InTarget::Query(Arc::new(query)))
    }

    /// `self IN table`
    #[must_use]
    pub fn in_table(self, table: impl Into<TableRef>) -> Self {
        self.membership(false, InTarget::Table(table.into()))
    }

    /// `self NOT IN table`
    #[must_use]
    pub fn not_in_table(self, table: impl Into<TableRef>) -> Self {
        self.membership(true, InTarget::Table(table.into()))
    }

    /// `self IN name(args...)`, a table-valued function.
    #[must_use]
    pub fn in_function<I>(self, name: impl Into<Text>, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        self.membership(
            false,
            InTarget::Function {
                name: name.into(),
                args: args.into_iter().map(IntoExpr::into_expr).collect(),
            },
        )
    }

    /// `self NOT IN name(args...)`, a table-valued function.
    #[must_use]
    pub fn not_in_function<I>(self, name: impl Into<Text>, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        self.membership(
            true,
            InTarget::Function {
                name: name.into(),
                args: args.into_iter().map(IntoExpr::into_expr).collect(),
            },
        )
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

fn non_empty<I>(items: I, what: &'static str) -> Result<Vec<Expr>>
where
    I: IntoIterator,
    I::Item: IntoExpr,
{
    let items: Vec<Expr> = items.into_iter().map(IntoExpr::into_expr).collect();
    if items.is_empty() {
        return Err(SqlError::Empty(what));
    }
    Ok(items)
}

/// Creates a literal expression from a Rust value.
#[must_use]
pub fn value(value: impl ToLiteral) -> Expr {
    Expr::literal(value.to_literal())
}

/// `NULL`
#[must_use]
pub fn null() -> Expr {
    Expr::literal(Literal::Null)
}

/// `CURRENT_TIME`
#[must_use]
pub fn current_time() -> Expr {
    Expr::literal(Literal::CurrentTime)
}

/// `CURRENT_DATE`
#[must_use]
pub fn current_date() -> Expr {
    Expr::literal(Literal::CurrentDate)
}

/// `CURRENT_TIMESTAMP`
#[must_use]
pub fn current_timestamp() -> Expr {
    Expr::literal(Literal::CurrentTimestamp)
}

/// Creates a row value `(a, b, ...)`.
///
/// # Errors
///
/// Returns [`SqlError::Empty`] when `items` is empty.
pub fn row<I>(items: I) -> Result<Expr>
where
    I: IntoIterator,
    I::Item: IntoExpr,
{
    Ok(Expr::new(Node::Row(non_empty(items, "row value")?)))
}

/// `EXISTS (query)`
#[must_use]
pub fn exists<Q: Query + 'static>(query: Q) -> Expr {
    Expr::new(Node::Exists {
        negated: false,
        query: Arc::new(query),
    })
}

/// `NOT EXISTS (query)`
#[must_use]
pub fn not_exists<Q: Query + 'static>(query: Q) -> Expr {
    Expr::new(Node::Exists {
        negated: true,
        query: Arc::new(query),
    })
}

/// A scalar subquery `(query)`.
#[must_use]
pub fn subquery<Q: Query + 'static>(query: Q) -> Expr {
    Expr::new(Node::Subquery(Arc::new(query)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::col;

    #[test]
    fn test_operands_are_shared_not_copied() {
        let a = col("a");
        let sum = a.clone().plus(1);
        match sum.node() {
            Node::Binary { left, .. } => assert!(Expr::ptr_eq(left, &a)),
            other => panic!("unexpected node {other:?}"),
        }
    }

    #[test]
    fn test_empty_in_list_is_rejected() {
        let err = col("x").in_list(Vec::<Expr>::new()).unwrap_err();
        assert!(matches!(err, SqlError::Empty("IN list")));
        let err = col("x").not_in_list(Vec::<i32>::new()).unwrap_err();
        assert!(matches!(err, SqlError::Empty("IN list")));
    }

    #[test]
    fn test_empty_row_is_rejected() {
        let err = row(Vec::<Expr>::new()).unwrap_err();
        assert!(matches!(err, SqlError::Empty("row value")));
    }

    #[test]
    fn test_display_renders_sql() {
        let expr = col("name").eq("Alice");
        assert_eq!(expr.to_string(), "name = 'Alice'");
        assert_eq!(format!("{expr}"), expr.to_sql());
    }

    #[test]
    fn test_expr_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Expr>();
    }
}
