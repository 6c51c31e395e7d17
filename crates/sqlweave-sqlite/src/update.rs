//! UPDATE statement builder.
//!
//! An UPDATE needs at least one assignment before it can be rendered.

use std::fmt;
use std::marker::PhantomData;

use sqlweave_core::{IntoExpr, Result, TableRef, Text};

use crate::chain::{complete_statement, non_empty, Chain, Clause};

/// Marker: target table specified, no assignment yet.
#[derive(Debug, Clone, Copy)]
pub struct Target;
/// Marker: at least one assignment specified.
#[derive(Debug, Clone, Copy)]
pub struct Assigned;
/// Marker: WHERE clause specified.
#[derive(Debug, Clone, Copy)]
pub struct Filtered;
/// Marker: RETURNING clause specified.
#[derive(Debug, Clone, Copy)]
pub struct Returning;

/// Stages that form a complete UPDATE statement.
pub trait Complete: fmt::Debug + Clone + Send + Sync + 'static {}

impl Complete for Assigned {}
impl Complete for Filtered {}
impl Complete for Returning {}

/// An UPDATE statement.
#[derive(Debug, Clone)]
pub struct Update<S = Target> {
    chain: Chain,
    _state: PhantomData<S>,
}

impl<S> Update<S> {
    const fn from_chain(chain: Chain) -> Self {
        Self {
            chain,
            _state: PhantomData,
        }
    }

    fn then<T>(self, clause: Clause) -> Update<T> {
        Update::from_chain(self.chain.push(clause))
    }

    fn returning_clause<I>(self, items: I) -> Result<Update<Returning>>
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        let items = non_empty(items, "RETURNING list")?;
        Ok(self.then(Clause::List("RETURNING", items)))
    }
}

impl Update {
    /// Starts `UPDATE table`.
    #[must_use]
    pub fn table(table: impl Into<TableRef>) -> Self {
        Self::from_chain(Chain::start(Clause::Table("UPDATE", table.into())))
    }

    /// Adds the first `SET column = value` assignment.
    #[must_use]
    pub fn set(self, column: impl Into<Text>, value: impl IntoExpr) -> Update<Assigned> {
        self.then(Clause::Assign {
            first: true,
            column: column.into(),
            value: value.into_expr(),
        })
    }
}

impl Update<Assigned> {
    /// Adds another assignment.
    #[must_use]
    pub fn set(self, column: impl Into<Text>, value: impl IntoExpr) -> Self {
        self.then(Clause::Assign {
            first: false,
            column: column.into(),
            value: value.into_expr(),
        })
    }

    /// Adds the WHERE clause.
    #[must_use]
    pub fn where_(self, condition: impl IntoExpr) -> Update<Filtered> {
        self.then(Clause::Expr("WHERE", condition.into_expr()))
    }

    /// Adds `RETURNING a, b, ...`.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Empty`](sqlweave_core::SqlError::Empty) when no
    /// expression is given.
    pub fn returning<I>(self, items: I) -> Result<Update<Returning>>
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        self.returning_clause(items)
    }
}

impl Update<Filtered> {
    /// Adds `RETURNING a, b, ...`.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Empty`](sqlweave_core::SqlError::Empty) when no
    /// expression is given.
    pub fn returning<I>(self, items: I) -> Result<Update<Returning>>
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        self.returning_clause(items)
    }
}

complete_statement!(Update, Complete);

#[cfg(test)]
mod tests {
    use sqlweave_core::{col, current_timestamp, param, Render, SharedText, Snapshot};

    use super::*;

    #[test]
    fn test_update_set_where() {
        let sql = Update::table("users")
            .set("name", param())
            .set("updated_at", current_timestamp())
            .where_(col("id").eq(param()))
            .to_sql();
        assert_eq!(
            sql,
            "UPDATE users SET name = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?"
        );
    }

    #[test]
    fn test_update_expression_value_and_returning() {
        let sql = Update::table(TableRef::new("accounts").alias("a"))
            .set("balance", col("balance").minus(col("fee").mult(2)))
            .returning([col("balance")])
            .unwrap()
            .to_sql();
        assert_eq!(
            sql,
            "UPDATE accounts AS a SET balance = balance - fee * 2 RETURNING balance"
        );
    }

    #[test]
    fn test_update_quotes_keyword_columns() {
        let sql = Update::table("t").set("order", 1).to_sql();
        assert_eq!(sql, "UPDATE t SET \"order\" = 1");
    }

    #[test]
    fn test_update_snapshot() {
        let column = SharedText::new("status");
        let update = Update::table("jobs").set(&column, "done");
        let frozen = update.copy();
        column.replace("state");
        assert_eq!(frozen.to_sql(), "UPDATE jobs SET status = 'done'");
        assert_eq!(update.to_sql(), "UPDATE jobs SET state = 'done'");
    }
}
