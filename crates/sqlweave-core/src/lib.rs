//! # sqlweave-core
//!
//! An immutable SQL expression model that renders SQLite SQL text.
//!
//! This crate provides:
//! - A closed set of expression nodes built through factory functions and
//!   operator methods
//! - A precedence-driven renderer that emits only the parentheses SQLite
//!   needs to read the tree back unchanged
//! - A snapshot protocol that freezes caller-owned mutable inputs while
//!   sharing every untouched subtree
//! - Identifier quoting and literal formatting
//!
//! Nothing here parses, validates or executes SQL.
//!
//! ## Building expressions
//!
//! ```rust
//! use sqlweave_core::{col, row, Render};
//!
//! let expr = col("age").ge(18).and(col("status").in_list(["active", "trial"]).unwrap());
//! assert_eq!(expr.to_sql(), "age >= 18 AND status IN ('active', 'trial')");
//!
//! let pair = row([col("a"), col("b")]).unwrap();
//! assert_eq!(pair.to_sql(), "(a, b)");
//! ```
//!
//! ## Snapshots
//!
//! Inputs wrapped in [`Shared`] may keep changing after they were handed to
//! an expression. [`Snapshot::copy`] freezes them:
//!
//! ```rust
//! use sqlweave_core::{col, Render, SharedText, Snapshot};
//!
//! let name = SharedText::new("alice");
//! let expr = col("name").eq(&name);
//! let frozen = expr.copy();
//!
//! name.replace("bob");
//! assert_eq!(frozen.to_sql(), "name = 'alice'");
//! assert_eq!(expr.to_sql(), "name = 'bob'");
//! ```

pub mod error;
pub mod expr;
pub mod precedence;
pub mod quote;
pub mod settings;
pub mod shared;
pub mod snapshot;
pub mod writer;

pub use error::{Result, SqlError};
pub use expr::case::{Case, CaseWhen};
pub use expr::column::{col, Column, ColumnRef, TableRef};
pub use expr::function::{self as functions, count_star, Function, FunctionArgs, FunctionCall};
pub use expr::literal::{IntoExpr, Literal, ToLiteral};
pub use expr::ops::{BinaryOp, MatchOp, UnaryOp};
pub use expr::param::{param, param_at, parameter, Param};
pub use expr::{
    current_date, current_time, current_timestamp, exists, not_exists, null, row, subquery,
    value, Expr, InTarget, Node,
};
pub use settings::{BooleanStyle, IdentifierQuoting, Settings};
pub use shared::{Bytes, Shared, SharedBytes, SharedText, Text};
pub use snapshot::{Freezer, Snapshot};
pub use writer::{Query, Render, SqlWriter};
