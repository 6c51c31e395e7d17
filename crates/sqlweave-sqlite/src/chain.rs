//! Immutable clause chains shared by every statement builder.
//!
//! Each builder stage owns an `Arc` to the stage before it plus the clause
//! it added, so branching a half-built statement in two directions never
//! copies the common prefix.

use std::fmt;
use std::sync::Arc;

use sqlweave_core::{
    precedence, Expr, Freezer, IntoExpr, Query, Render, Result, Snapshot, SqlError, SqlWriter,
    TableRef, Text,
};
use tracing::trace;

use crate::ordering::Ordering;

/// One clause fragment appended by a builder stage.
#[derive(Debug, Clone)]
pub(crate) enum Clause {
    /// Fixed keywords, e.g. `SELECT *` or `DO NOTHING`.
    Keyword(&'static str),
    /// `keyword expr`
    Expr(&'static str, Expr),
    /// `keyword a, b, ...`
    List(&'static str, Vec<Expr>),
    /// `keyword table [AS alias]`
    Table(&'static str, TableRef),
    /// `[keyword] (name, ...)`
    Names(&'static str, Vec<Text>),
    /// `ORDER BY term, ...`
    OrderBy(Vec<Ordering>),
    /// A row of a VALUES list, led by `VALUES` when it is the first one.
    Row { first: bool, items: Vec<Expr> },
    /// An assignment of a SET list, led by `SET` when it is the first one.
    Assign {
        first: bool,
        column: Text,
        value: Expr,
    },
    /// A nested statement written inline, as in `INSERT ... SELECT`.
    Query(Arc<dyn Query>),
}

impl Clause {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Keyword(k)
            | Self::Expr(k, _)
            | Self::List(k, _)
            | Self::Table(k, _)
            | Self::Names(k, _) => *k,
            Self::OrderBy(_) => "ORDER BY",
            Self::Row { .. } => "VALUES",
            Self::Assign { .. } => "SET",
            Self::Query(_) => "query",
        }
    }
}

impl Render for Clause {
    fn render(&self, w: &mut SqlWriter) {
        match self {
            Self::Keyword(keyword) => w.keyword(keyword),
            Self::Expr(keyword, expr) => {
                w.keyword(keyword);
                w.push(' ');
                w.render_at(expr, precedence::LOWEST);
            }
            Self::List(keyword, items) => {
                w.keyword(keyword);
                w.push(' ');
                w.comma_separated(items, precedence::LOWEST);
            }
            Self::Table(keyword, table) => {
                w.keyword(keyword);
                w.push(' ');
                table.render(w);
            }
            Self::Names(keyword, names) => {
                if !keyword.is_empty() {
                    w.keyword(keyword);
                }
                if names.is_empty() {
                    return;
                }
                w.keyword("(");
                for (i, name) in names.iter().enumerate() {
                    if i > 0 {
                        w.push_str(", ");
                    }
                    name.with(|n| w.identifier(n));
                }
                w.push(')');
            }
            Self::OrderBy(terms) => {
                w.keyword("ORDER BY");
                w.push(' ');
                w.comma_separated(terms, precedence::LOWEST);
            }
            Self::Row { first, items } => {
                if *first {
                    w.keyword("VALUES");
                    w.push(' ');
                } else {
                    w.push_str(", ");
                }
                w.push('(');
                w.comma_separated(items, precedence::LOWEST);
                w.push(')');
            }
            Self::Assign {
                first,
                column,
                value,
            } => {
                if *first {
                    w.keyword("SET");
                    w.push(' ');
                } else {
                    w.push_str(", ");
                }
                column.with(|c| w.identifier(c));
                w.push_str(" = ");
                w.render_at(value, precedence::LOWEST);
            }
            Self::Query(query) => query.render(w),
        }
    }
}

impl Snapshot for Clause {
    fn snapshot(&self) -> Option<Self> {
        match self {
            Self::Keyword(_) => None,
            Self::Expr(keyword, expr) => expr.snapshot().map(|e| Self::Expr(*keyword, e)),
            Self::List(keyword, items) => items.snapshot().map(|i| Self::List(*keyword, i)),
            Self::Table(keyword, table) => table.snapshot().map(|t| Self::Table(*keyword, t)),
            Self::Names(keyword, names) => names.snapshot().map(|n| Self::Names(*keyword, n)),
            Self::OrderBy(terms) => terms.snapshot().map(Self::OrderBy),
            Self::Row { first, items } => items.snapshot().map(|items| Self::Row {
                first: *first,
                items,
            }),
            Self::Assign {
                first,
                column,
                value,
            } => {
                let mut f = Freezer::new();
                let column = f.take(column);
                let value = f.take(value);
                f.finish(|| Self::Assign {
                    first: *first,
                    column,
                    value,
                })
            }
            Self::Query(query) => query.snapshot().map(Self::Query),
        }
    }
}

struct Link {
    prev: Option<Chain>,
    clause: Clause,
}

/// A persistent list of clauses, newest last.
#[derive(Clone)]
pub(crate) struct Chain(Arc<Link>);

impl Chain {
    pub(crate) fn start(clause: Clause) -> Self {
        Self(Arc::new(Link { prev: None, clause }))
    }

    #[must_use]
    pub(crate) fn push(&self, clause: Clause) -> Self {
        Self(Arc::new(Link {
            prev: Some(self.clone()),
            clause,
        }))
    }

    #[cfg(test)]
    pub(crate) fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl Render for Chain {
    fn render(&self, w: &mut SqlWriter) {
        if let Some(prev) = &self.0.prev {
            prev.render(w);
        }
        self.0.clause.render(w);
    }
}

impl Snapshot for Chain {
    fn snapshot(&self) -> Option<Self> {
        let mut f = Freezer::new();
        let prev = f.take(&self.0.prev);
        let clause = f.take(&self.0.clause);
        let rebuilt = f.finish(|| Self(Arc::new(Link { prev, clause })))?;
        trace!(clause = rebuilt.0.clause.kind(), "rebuilt statement link");
        Some(rebuilt)
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Chain").field(&self.to_sql()).finish()
    }
}

/// Collects `items`, rejecting an empty list.
pub(crate) fn non_empty<I>(items: I, what: &'static str) -> Result<Vec<Expr>>
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

/// Collects identifier names, rejecting an empty list.
pub(crate) fn non_empty_names<I>(names: I, what: &'static str) -> Result<Vec<Text>>
where
    I: IntoIterator,
    I::Item: Into<Text>,
{
    let names: Vec<Text> = names.into_iter().map(Into::into).collect();
    if names.is_empty() {
        return Err(SqlError::Empty(what));
    }
    Ok(names)
}

/// Implements `Render` and `Snapshot` for the complete stages of a
/// statement builder. Rendering a whole statement emits a trace event.
macro_rules! complete_statement {
    ($stmt:ident, $complete:ident) => {
        impl<S: $complete> ::sqlweave_core::Render for $stmt<S> {
            fn render(&self, w: &mut ::sqlweave_core::SqlWriter) {
                ::sqlweave_core::Render::render(&self.chain, w);
            }

            fn to_sql_with(&self, settings: ::sqlweave_core::Settings) -> String {
                let mut w = ::sqlweave_core::SqlWriter::with_settings(settings);
                ::sqlweave_core::Render::render(&self.chain, &mut w);
                let sql = w.finish();
                ::tracing::trace!(statement = stringify!($stmt), sql = %sql, "rendered statement");
                sql
            }
        }

        impl<S: $complete> ::sqlweave_core::Snapshot for $stmt<S> {
            fn snapshot(&self) -> Option<Self> {
                ::sqlweave_core::Snapshot::snapshot(&self.chain).map(Self::from_chain)
            }
        }
    };
}

pub(crate) use complete_statement;

#[cfg(test)]
mod tests {
    use sqlweave_core::{col, SharedText};

    use super::*;

    #[test]
    fn test_chain_renders_in_order() {
        let chain = Chain::start(Clause::List("SELECT", vec![col("a")]))
            .push(Clause::Table("FROM", TableRef::new("t")))
            .push(Clause::Expr("WHERE", col("a").gt(1)));
        assert_eq!(chain.to_sql(), "SELECT a FROM t WHERE a > 1");
    }

    #[test]
    fn test_names_clause_spacing() {
        let chain = Chain::start(Clause::Table("INSERT INTO", TableRef::new("t")))
            .push(Clause::Names("", vec![Text::from("a"), Text::from("order")]));
        assert_eq!(chain.to_sql(), "INSERT INTO t (a, \"order\")");
    }

    #[test]
    fn test_unchanged_chain_keeps_identity() {
        let chain = Chain::start(Clause::Keyword("SELECT *"))
            .push(Clause::Table("FROM", TableRef::new("t")));
        assert!(Chain::ptr_eq(&chain.copy(), &chain));
    }

    #[test]
    fn test_live_clause_rebuilds_suffix_only() {
        let table = SharedText::new("t");
        let head = Chain::start(Clause::Keyword("SELECT *"));
        let chain = head
            .push(Clause::Table("FROM", TableRef::new(&table)))
            .push(Clause::Expr("WHERE", col("x").eq(1)));
        let frozen = chain.copy();
        assert!(!Chain::ptr_eq(&frozen, &chain));
        let frozen_head = frozen.0.prev.as_ref().and_then(|p| p.0.prev.clone());
        assert!(frozen_head.is_some_and(|h| Chain::ptr_eq(&h, &head)));
        table.replace("u");
        assert_eq!(frozen.to_sql(), "SELECT * FROM t WHERE x = 1");
        assert_eq!(chain.to_sql(), "SELECT * FROM u WHERE x = 1");
    }

    #[test]
    fn test_non_empty_helpers() {
        assert!(matches!(
            non_empty(Vec::<Expr>::new(), "RETURNING list"),
            Err(SqlError::Empty("RETURNING list"))
        ));
        assert_eq!(non_empty_names(["a"], "column list").unwrap().len(), 1);
    }
}
