//! DELETE statement builder.
//!
//! Data-changing statements are not queries and cannot be nested inside an
//! expression:
//!
//! ```compile_fail
//! use sqlweave_core::col;
//! use sqlweave_sqlite::Delete;
//!
//! let expr = col("x").in_query(Delete::from("t"));
//! ```

use std::fmt;
use std::marker::PhantomData;

use sqlweave_core::{IntoExpr, Result, TableRef};

use crate::chain::{complete_statement, non_empty, Chain, Clause};

/// Marker: target table specified.
#[derive(Debug, Clone, Copy)]
pub struct Target;
/// Marker: WHERE clause specified.
#[derive(Debug, Clone, Copy)]
pub struct Filtered;
/// Marker: RETURNING clause specified.
#[derive(Debug, Clone, Copy)]
pub struct Returning;

/// Stages that form a complete DELETE statement.
pub trait Complete: fmt::Debug + Clone + Send + Sync + 'static {}

/// Stages that accept a RETURNING clause.
pub trait Returnable {}

impl Complete for Target {}
impl Complete for Filtered {}
impl Complete for Returning {}

impl Returnable for Target {}
impl Returnable for Filtered {}

/// A DELETE statement.
#[derive(Debug, Clone)]
pub struct Delete<S = Target> {
    chain: Chain,
    _state: PhantomData<S>,
}

impl<S> Delete<S> {
    const fn from_chain(chain: Chain) -> Self {
        Self {
            chain,
            _state: PhantomData,
        }
    }

    fn then<T>(self, clause: Clause) -> Delete<T> {
        Delete::from_chain(self.chain.push(clause))
    }
}

impl Delete {
    /// Starts `DELETE FROM table`.
    #[must_use]
    pub fn from(table: impl Into<TableRef>) -> Self {
        Self::from_chain(Chain::start(Clause::Table("DELETE FROM", table.into())))
    }

    /// Adds the WHERE clause.
    #[must_use]
    pub fn where_(self, condition: impl IntoExpr) -> Delete<Filtered> {
        self.then(Clause::Expr("WHERE", condition.into_expr()))
    }
}

impl<S: Returnable> Delete<S> {
    /// Adds `RETURNING a, b, ...`.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Empty`](sqlweave_core::SqlError::Empty) when no
    /// expression is given.
    pub fn returning<I>(self, items: I) -> Result<Delete<Returning>>
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        let items = non_empty(items, "RETURNING list")?;
        Ok(self.then(Clause::List("RETURNING", items)))
    }
}

complete_statement!(Delete, Complete);
