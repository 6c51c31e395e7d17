//! INSERT statement builder, including SQLite's UPSERT clause.
//!
//! See <https://www.sqlite.org/lang_insert.html> and
//! <https://www.sqlite.org/lang_upsert.html>.
//!
//! An INSERT without a data source, or an `ON CONFLICT` without its action,
//! is not a statement yet and cannot be rendered:
//!
//! ```compile_fail
//! use sqlweave_core::Render;
//! use sqlweave_sqlite::Insert;
//!
//! let sql = Insert::into("users").to_sql();
//! ```
//!
//! Only a SELECT can feed an INSERT:
//!
//! ```compile_fail
//! use sqlweave_sqlite::{Delete, Insert};
//!
//! let copy = Insert::into("archive").select(Delete::from("users"));
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use sqlweave_core::{ColumnRef, Expr, IntoExpr, Query, Result, TableRef, Text};

use crate::chain::{complete_statement, non_empty, non_empty_names, Chain, Clause};

// Typestate markers

/// Marker: target table specified, no columns or data yet.
#[derive(Debug, Clone, Copy)]
pub struct Target;
/// Marker: column list specified.
#[derive(Debug, Clone, Copy)]
pub struct Listed;
/// Marker: at least one VALUES row specified.
#[derive(Debug, Clone, Copy)]
pub struct Valued;
/// Marker: rows come from a SELECT.
#[derive(Debug, Clone, Copy)]
pub struct Selected;
/// Marker: DEFAULT VALUES specified.
#[derive(Debug, Clone, Copy)]
pub struct Defaulted;
/// Marker: ON CONFLICT target specified, action missing.
#[derive(Debug, Clone, Copy)]
pub struct Conflicting;
/// Marker: DO UPDATE specified, no assignment yet.
#[derive(Debug, Clone, Copy)]
pub struct Updating;
/// Marker: DO UPDATE with at least one assignment.
#[derive(Debug, Clone, Copy)]
pub struct UpdateSet;
/// Marker: upsert action complete.
#[derive(Debug, Clone, Copy)]
pub struct Upserted;
/// Marker: RETURNING clause specified.
#[derive(Debug, Clone, Copy)]
pub struct Returning;

/// Stages that form a complete INSERT statement.
pub trait Complete: fmt::Debug + Clone + Send + Sync + 'static {}

/// Stages that accept a data source.
pub trait Fillable {}

/// Stages that accept a RETURNING clause.
pub trait Returnable {}

impl Complete for Valued {}
impl Complete for Selected {}
impl Complete for Defaulted {}
impl Complete for UpdateSet {}
impl Complete for Upserted {}
impl Complete for Returning {}

impl Fillable for Target {}
impl Fillable for Listed {}

impl Returnable for Valued {}
impl Returnable for Selected {}
impl Returnable for Defaulted {}
impl Returnable for UpdateSet {}
impl Returnable for Upserted {}

/// An INSERT statement.
#[derive(Debug, Clone)]
pub struct Insert<S = Target> {
    chain: Chain,
    _state: PhantomData<S>,
}

impl<S> Insert<S> {
    const fn from_chain(chain: Chain) -> Self {
        Self {
            chain,
            _state: PhantomData,
        }
    }

    fn then<T>(self, clause: Clause) -> Insert<T> {
        Insert::from_chain(self.chain.push(clause))
    }
}

impl Insert {
    fn start(keyword: &'static str, table: impl Into<TableRef>) -> Self {
        Self::from_chain(Chain::start(Clause::Table(keyword, table.into())))
    }

    /// Starts `INSERT INTO table`.
    #[must_use]
    pub fn into(table: impl Into<TableRef>) -> Self {
        Self::start("INSERT INTO", table)
    }

    /// Starts `INSERT OR REPLACE INTO table`.
    #[must_use]
    pub fn or_replace_into(table: impl Into<TableRef>) -> Self {
        Self::start("INSERT OR REPLACE INTO", table)
    }

    /// Starts `INSERT OR IGNORE INTO table`.
    #[must_use]
    pub fn or_ignore_into(table: impl Into<TableRef>) -> Self {
        Self::start("INSERT OR IGNORE INTO", table)
    }

    /// Specifies the columns to insert into.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Empty`](sqlweave_core::SqlError::Empty) when no
    /// column is given.
    pub fn columns<I>(self, names: I) -> Result<Insert<Listed>>
    where
        I: IntoIterator,
        I::Item: Into<Text>,
    {
        let names = non_empty_names(names, "column list")?;
        Ok(self.then(Clause::Names("", names)))
    }

    /// Inserts a single row of default values.
    #[must_use]
    pub fn default_values(self) -> Insert<Defaulted> {
        self.then(Clause::Keyword("DEFAULT VALUES"))
    }
}

impl<S: Fillable> Insert<S> {
    /// Adds the first VALUES row.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Empty`](sqlweave_core::SqlError::Empty) when the
    /// row is empty.
    pub fn values<I>(self, row: I) -> Result<Insert<Valued>>
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        let items = non_empty(row, "VALUES row")?;
        Ok(self.then(Clause::Row { first: true, items }))
    }

    /// Takes the rows from a query.
    #[must_use]
    pub fn select<Q: Query + 'static>(self, query: Q) -> Insert<Selected> {
        self.then(Clause::Query(Arc::new(query)))
    }
}

impl Insert<Valued> {
    /// Adds another VALUES row.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Empty`](sqlweave_core::SqlError::Empty) when the
    /// row is empty.
    pub fn values<I>(self, row: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        let items = non_empty(row, "VALUES row")?;
        Ok(self.then(Clause::Row {
            first: false,
            items,
        }))
    }

    /// Adds `ON CONFLICT (columns...)`. With no column, the clause has no
    /// conflict target and matches any uniqueness violation.
    #[must_use]
    pub fn on_conflict<I>(self, columns: I) -> Insert<Conflicting>
    where
        I: IntoIterator,
        I::Item: Into<Text>,
    {
        let names = columns.into_iter().map(Into::into).collect();
        self.then(Clause::Names("ON CONFLICT", names))
    }
}

impl Insert<Conflicting> {
    /// Ignores the conflicting row.
    #[must_use]
    pub fn do_nothing(self) -> Insert<Upserted> {
        self.then(Clause::Keyword("DO NOTHING"))
    }

    /// Updates the existing row instead.
    #[must_use]
    pub fn do_update(self) -> Insert<Updating> {
        self.then(Clause::Keyword("DO UPDATE"))
    }
}

impl Insert<Updating> {
    /// Adds the first `SET column = value` assignment.
    #[must_use]
    pub fn set(self, column: impl Into<Text>, value: impl IntoExpr) -> Insert<UpdateSet> {
        self.then(Clause::Assign {
            first: true,
            column: column.into(),
            value: value.into_expr(),
        })
    }
}

impl Insert<UpdateSet> {
    /// Adds another assignment.
    #[must_use]
    pub fn set(self, column: impl Into<Text>, value: impl IntoExpr) -> Self {
        self.then(Clause::Assign {
            first: false,
            column: column.into(),
            value: value.into_expr(),
        })
    }

    /// Restricts the update with `WHERE condition`.
    #[must_use]
    pub fn where_(self, condition: impl IntoExpr) -> Insert<Upserted> {
        self.then(Clause::Expr("WHERE", condition.into_expr()))
    }
}

impl<S: Returnable> Insert<S> {
    /// Adds `RETURNING a, b, ...`.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Empty`](sqlweave_core::SqlError::Empty) when no
    /// expression is given.
    pub fn returning<I>(self, items: I) -> Result<Insert<Returning>>
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        let items = non_empty(items, "RETURNING list")?;
        Ok(self.then(Clause::List("RETURNING", items)))
    }
}

/// Refers to the value proposed for insertion in an upsert's DO UPDATE
/// clause: `excluded.column`.
#[must_use]
pub fn excluded(column: impl Into<Text>) -> Expr {
    ColumnRef::qualified("excluded", column).into()
}

complete_statement!(Insert, Complete);
