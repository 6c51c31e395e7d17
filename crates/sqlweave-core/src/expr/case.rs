//! Staged CASE builder.
//!
//! `Case` has no terminal method: a CASE expression needs at least one
//! WHEN arm, so only [`CaseWhen`] can produce an [`Expr`].

use super::literal::IntoExpr;
use super::{Expr, Node};

/// A CASE expression before its first WHEN arm.
#[derive(Debug, Clone)]
#[must_use = "a CASE expression needs at least one WHEN arm"]
pub struct Case {
    operand: Option<Expr>,
}

impl Case {
    pub(crate) const fn new(operand: Option<Expr>) -> Self {
        Self { operand }
    }

    /// Adds the first `WHEN condition THEN result` arm.
    pub fn when(self, condition: impl IntoExpr, result: impl IntoExpr) -> CaseWhen {
        CaseWhen {
            operand: self.operand,
            arms: vec![(condition.into_expr(), result.into_expr())],
        }
    }
}

/// A CASE expression with at least one WHEN arm.
#[derive(Debug, Clone)]
#[must_use = "call `end` or `otherwise` to obtain the expression"]
pub struct CaseWhen {
    operand: Option<Expr>,
    arms: Vec<(Expr, Expr)>,
}

impl CaseWhen {
    /// Adds another `WHEN condition THEN result` arm.
    pub fn when(mut self, condition: impl IntoExpr, result: impl IntoExpr) -> Self {
        self.arms.push((condition.into_expr(), result.into_expr()));
        self
    }

    /// Finishes the expression with an `ELSE` branch.
    pub fn otherwise(self, result: impl IntoExpr) -> Expr {
        self.build(Some(result.into_expr()))
    }

    /// Finishes the expression without an `ELSE` branch.
    pub fn end(self) -> Expr {
        self.build(None)
    }

    fn build(self, otherwise: Option<Expr>) -> Expr {
        Expr::new(Node::Case {
            operand: self.operand,
            arms: self.arms,
            otherwise,
        })
    }
}
