//! ORDER BY terms.

use sqlweave_core::{precedence, Expr, Freezer, IntoExpr, Render, Snapshot, SqlWriter};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `ASC`
    Asc,
    /// `DESC`
    Desc,
}

/// Placement of NULLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nulls {
    /// `NULLS FIRST`
    First,
    /// `NULLS LAST`
    Last,
}

/// One ORDER BY term.
#[derive(Debug, Clone)]
pub struct Ordering {
    expr: Expr,
    direction: Option<Direction>,
    nulls: Option<Nulls>,
}

impl Ordering {
    /// Orders by `expr` ascending.
    #[must_use]
    pub fn asc(expr: impl IntoExpr) -> Self {
        Self::with_direction(expr, Some(Direction::Asc))
    }

    /// Orders by `expr` descending.
    #[must_use]
    pub fn desc(expr: impl IntoExpr) -> Self {
        Self::with_direction(expr, Some(Direction::Desc))
    }

    fn with_direction(expr: impl IntoExpr, direction: Option<Direction>) -> Self {
        Self {
            expr: expr.into_expr(),
            direction,
            nulls: None,
        }
    }

    /// Sorts NULLs before other values.
    #[must_use]
    pub const fn nulls_first(mut self) -> Self {
        self.nulls = Some(Nulls::First);
        self
    }

    /// Sorts NULLs after other values.
    #[must_use]
    pub const fn nulls_last(mut self) -> Self {
        self.nulls = Some(Nulls::Last);
        self
    }
}

/// Shorthand for [`Ordering::asc`].
#[must_use]
pub fn asc(expr: impl IntoExpr) -> Ordering {
    Ordering::asc(expr)
}

/// Shorthand for [`Ordering::desc`].
#[must_use]
pub fn desc(expr: impl IntoExpr) -> Ordering {
    Ordering::desc(expr)
}

impl From<Expr> for Ordering {
    fn from(expr: Expr) -> Self {
        Self::with_direction(expr, None)
    }
}

impl Render for Ordering {
    fn render(&self, w: &mut SqlWriter) {
        w.render_at(&self.expr, precedence::LOWEST);
        match self.direction {
            Some(Direction::Asc) => w.push_str(" ASC"),
            Some(Direction::Desc) => w.push_str(" DESC"),
            None => {}
        }
        match self.nulls {
            Some(Nulls::First) => w.push_str(" NULLS FIRST"),
            Some(Nulls::Last) => w.push_str(" NULLS LAST"),
            None => {}
        }
    }
}

impl Snapshot for Ordering {
    fn snapshot(&self) -> Option<Self> {
        let mut f = Freezer::new();
        let expr = f.take(&self.expr);
        f.finish(|| Self {
            expr,
            direction: self.direction,
            nulls: self.nulls,
        })
    }
}

#[cfg(test)]
mod tests {
    use sqlweave_core::col;

    use super::*;

    #[test]
    fn test_ordering_terms() {
        assert_eq!(Ordering::from(col("a")).to_sql(), "a");
        assert_eq!(asc(col("a")).to_sql(), "a ASC");
        assert_eq!(desc(col("a")).nulls_last().to_sql(), "a DESC NULLS LAST");
        assert_eq!(
            asc(col("a").plus(col("b"))).nulls_first().to_sql(),
            "a + b ASC NULLS FIRST"
        );
    }
}
