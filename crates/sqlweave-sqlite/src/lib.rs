//! # sqlweave-sqlite
//!
//! Staged SQLite statement builders on top of `sqlweave-core`.
//!
//! Every builder is a typestate: each method returns a new stage type, and
//! only stages that form a complete statement implement
//! [`Render`](sqlweave_core::Render) and
//! [`Snapshot`](sqlweave_core::Snapshot). Complete SELECT stages also
//! implement [`Query`](sqlweave_core::Query), which lets them nest inside
//! expressions and `INSERT ... SELECT`. Stages are immutable and share
//! their prefix, so a half-built statement can be extended in several
//! directions.
//!
//! # SQLite features covered
//!
//! - **[UPSERT]**: `INSERT ... ON CONFLICT DO NOTHING` and
//!   `ON CONFLICT DO UPDATE SET ...` (since SQLite 3.24.0), with
//!   [`excluded`] for the proposed row.
//! - **[RETURNING]**: on INSERT, UPDATE and DELETE (since SQLite 3.35.0).
//! - **`NULLS FIRST` / `NULLS LAST`** in ORDER BY (since SQLite 3.30.0).
//! - **[Savepoints]**: `SAVEPOINT`, `RELEASE`, `ROLLBACK TO`.
//!
//! [UPSERT]: https://www.sqlite.org/lang_upsert.html
//! [RETURNING]: https://www.sqlite.org/lang_returning.html
//! [Savepoints]: https://www.sqlite.org/lang_savepoint.html
//!
//! ## Example
//!
//! ```rust
//! use sqlweave_core::{col, param, Render};
//! use sqlweave_sqlite::{desc, excluded, Insert, Select};
//!
//! let query = Select::columns([col("id"), col("name")])
//!     .unwrap()
//!     .from("users")
//!     .where_(col("active").eq(true))
//!     .order_by([desc(col("created_at"))])
//!     .unwrap()
//!     .limit(10);
//! assert_eq!(
//!     query.to_sql(),
//!     "SELECT id, name FROM users WHERE active = TRUE ORDER BY created_at DESC LIMIT 10"
//! );
//!
//! let upsert = Insert::into("users")
//!     .columns(["id", "name"])
//!     .unwrap()
//!     .values([param(), param()])
//!     .unwrap()
//!     .on_conflict(["id"])
//!     .do_update()
//!     .set("name", excluded("name"));
//! assert_eq!(
//!     upsert.to_sql(),
//!     "INSERT INTO users (id, name) VALUES (?, ?) ON CONFLICT (id) DO UPDATE SET name = excluded.name"
//! );
//! ```

mod chain;
pub mod delete;
pub mod insert;
pub mod ordering;
pub mod select;
pub mod transaction;
pub mod update;

pub use delete::Delete;
pub use insert::{excluded, Insert};
pub use ordering::{asc, desc, Direction, Nulls, Ordering};
pub use select::Select;
pub use transaction::{Begin, Commit, Release, Rollback, Savepoint, TransactionMode};
pub use update::Update;
