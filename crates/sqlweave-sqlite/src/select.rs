//! SELECT statement builder using the typestate pattern.
//!
//! Clauses can only be added in the order SQLite expects them, and a join
//! must receive its constraint before anything else happens:
//!
//! ```compile_fail
//! use sqlweave_core::Render;
//! use sqlweave_sqlite::Select;
//!
//! // Missing ON / USING: the stage does not implement `Render`.
//! let sql = Select::all().from("a").join("b").to_sql();
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use sqlweave_core::{IntoExpr, Query, Result, Snapshot, TableRef, Text};

use crate::chain::{complete_statement, non_empty, non_empty_names, Chain, Clause};
use crate::ordering::Ordering;

// Typestate markers (zero-sized types)

/// Marker: result columns specified, no FROM yet.
#[derive(Debug, Clone, Copy)]
pub struct Projected;
/// Marker: FROM clause (and any completed joins) specified.
#[derive(Debug, Clone, Copy)]
pub struct Sourced;
/// Marker: a join is waiting for its ON or USING constraint.
#[derive(Debug, Clone, Copy)]
pub struct Joining;
/// Marker: WHERE clause specified.
#[derive(Debug, Clone, Copy)]
pub struct Filtered;
/// Marker: GROUP BY clause specified.
#[derive(Debug, Clone, Copy)]
pub struct Grouped;
/// Marker: HAVING clause specified.
#[derive(Debug, Clone, Copy)]
pub struct Aggregated;
/// Marker: ORDER BY clause specified.
#[derive(Debug, Clone, Copy)]
pub struct Ordered;
/// Marker: LIMIT clause specified.
#[derive(Debug, Clone, Copy)]
pub struct Limited;
/// Marker: OFFSET clause specified.
#[derive(Debug, Clone, Copy)]
pub struct Paged;

/// Stages that form a complete SELECT statement.
pub trait Complete: fmt::Debug + Clone + Send + Sync + 'static {}

/// Stages that accept a WHERE clause.
pub trait Filterable {}

/// Stages that accept a GROUP BY clause.
pub trait Groupable {}

/// Stages that accept an ORDER BY clause.
pub trait Orderable {}

/// Stages that accept a LIMIT clause.
pub trait Limitable {}

impl Complete for Projected {}
impl Complete for Sourced {}
impl Complete for Filtered {}
impl Complete for Grouped {}
impl Complete for Aggregated {}
impl Complete for Ordered {}
impl Complete for Limited {}
impl Complete for Paged {}

impl Filterable for Projected {}
impl Filterable for Sourced {}

impl Groupable for Projected {}
impl Groupable for Sourced {}
impl Groupable for Filtered {}

impl Orderable for Projected {}
impl Orderable for Sourced {}
impl Orderable for Filtered {}
impl Orderable for Grouped {}
impl Orderable for Aggregated {}

impl Limitable for Projected {}
impl Limitable for Sourced {}
impl Limitable for Filtered {}
impl Limitable for Grouped {}
impl Limitable for Aggregated {}
impl Limitable for Ordered {}

/// A SELECT statement.
///
/// Every method returns a new stage that shares the clauses built so far,
/// so a partially built query can be reused as a common prefix.
#[derive(Debug, Clone)]
pub struct Select<S = Projected> {
    chain: Chain,
    _state: PhantomData<S>,
}

impl<S> Select<S> {
    const fn from_chain(chain: Chain) -> Self {
        Self {
            chain,
            _state: PhantomData,
        }
    }

    fn then<T>(self, clause: Clause) -> Select<T> {
        Select::from_chain(self.chain.push(clause))
    }
}

impl Select {
    /// Starts `SELECT a, b, ...`.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Empty`](sqlweave_core::SqlError::Empty) when no
    /// column is given.
    pub fn columns<I>(items: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        let items = non_empty(items, "result column list")?;
        Ok(Self::from_chain(Chain::start(Clause::List("SELECT", items))))
    }

    /// Starts `SELECT DISTINCT a, b, ...`.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Empty`](sqlweave_core::SqlError::Empty) when no
    /// column is given.
    pub fn distinct<I>(items: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        let items = non_empty(items, "result column list")?;
        Ok(Self::from_chain(Chain::start(Clause::List(
            "SELECT DISTINCT",
            items,
        ))))
    }

    /// Starts `SELECT *`.
    #[must_use]
    pub fn all() -> Self {
        Self::from_chain(Chain::start(Clause::Keyword("SELECT *")))
    }

    /// Adds the FROM clause.
    #[must_use]
    pub fn from(self, table: impl Into<TableRef>) -> Select<Sourced> {
        self.then(Clause::Table("FROM", table.into()))
    }
}

impl Select<Sourced> {
    /// Adds `JOIN table`; the join must be completed with `on` or `using`.
    #[must_use]
    pub fn join(self, table: impl Into<TableRef>) -> Select<Joining> {
        self.then(Clause::Table("JOIN", table.into()))
    }

    /// Adds `LEFT JOIN table`; the join must be completed with `on` or
    /// `using`.
    #[must_use]
    pub fn left_join(self, table: impl Into<TableRef>) -> Select<Joining> {
        self.then(Clause::Table("LEFT JOIN", table.into()))
    }

    /// Adds `CROSS JOIN table`.
    #[must_use]
    pub fn cross_join(self, table: impl Into<TableRef>) -> Self {
        self.then(Clause::Table("CROSS JOIN", table.into()))
    }
}

impl Select<Joining> {
    /// Completes the pending join with `ON constraint`.
    #[must_use]
    pub fn on(self, constraint: impl IntoExpr) -> Select<Sourced> {
        self.then(Clause::Expr("ON", constraint.into_expr()))
    }

    /// Completes the pending join with `USING (a, b, ...)`.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Empty`](sqlweave_core::SqlError::Empty) when no
    /// column is given.
    pub fn using<I>(self, columns: I) -> Result<Select<Sourced>>
    where
        I: IntoIterator,
        I::Item: Into<Text>,
    {
        let names = non_empty_names(columns, "USING column list")?;
        Ok(self.then(Clause::Names("USING", names)))
    }
}

impl<S: Filterable> Select<S> {
    /// Adds the WHERE clause.
    #[must_use]
    pub fn where_(self, condition: impl IntoExpr) -> Select<Filtered> {
        self.then(Clause::Expr("WHERE", condition.into_expr()))
    }
}

impl<S: Groupable> Select<S> {
    /// Adds the GROUP BY clause.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Empty`](sqlweave_core::SqlError::Empty) when no
    /// expression is given.
    pub fn group_by<I>(self, items: I) -> Result<Select<Grouped>>
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        let items = non_empty(items, "GROUP BY list")?;
        Ok(self.then(Clause::List("GROUP BY", items)))
    }
}

impl Select<Grouped> {
    /// Adds the HAVING clause.
    #[must_use]
    pub fn having(self, condition: impl IntoExpr) -> Select<Aggregated> {
        self.then(Clause::Expr("HAVING", condition.into_expr()))
    }
}

impl<S: Orderable> Select<S> {
    /// Adds the ORDER BY clause.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Empty`](sqlweave_core::SqlError::Empty) when no
    /// term is given.
    pub fn order_by<I>(self, terms: I) -> Result<Select<Ordered>>
    where
        I: IntoIterator,
        I::Item: Into<Ordering>,
    {
        let terms: Vec<Ordering> = terms.into_iter().map(Into::into).collect();
        if terms.is_empty() {
            return Err(sqlweave_core::SqlError::Empty("ORDER BY list"));
        }
        Ok(self.then(Clause::OrderBy(terms)))
    }
}

impl<S: Limitable> Select<S> {
    /// Adds the LIMIT clause.
    #[must_use]
    pub fn limit(self, count: impl IntoExpr) -> Select<Limited> {
        self.then(Clause::Expr("LIMIT", count.into_expr()))
    }
}

impl Select<Limited> {
    /// Adds the OFFSET clause.
    #[must_use]
    pub fn offset(self, skip: impl IntoExpr) -> Select<Paged> {
        self.then(Clause::Expr("OFFSET", skip.into_expr()))
    }
}

complete_statement!(Select, Complete);

impl<S: Complete> Query for Select<S> {
    fn snapshot_query(&self) -> Option<Arc<dyn Query>> {
        self.snapshot().map(|copy| Arc::new(copy) as Arc<dyn Query>)
    }
}
