#![allow(dead_code)]

use rusqlite::types::Value;
use rusqlite::Connection;
use sqlweave_core::{Expr, Render};

pub fn connection() -> Connection {
    Connection::open_in_memory().unwrap_or_else(|e| panic!("Failed to open SQLite: {e}"))
}

/// Evaluates `SELECT <expr>` in a fresh in-memory database.
pub fn eval(expr: &Expr) -> Value {
    eval_sql(&format!("SELECT {}", expr.to_sql()))
}

pub fn eval_sql(sql: &str) -> Value {
    connection()
        .query_row(sql, [], |row| row.get(0))
        .unwrap_or_else(|e| panic!("SQLite rejected: {sql}\nError: {e}"))
}

/// Asserts that SQLite compiles `sql` against `conn`.
pub fn assert_prepares(conn: &Connection, sql: &str) {
    if let Err(e) = conn.prepare(sql) {
        panic!("SQLite rejected: {sql}\nError: {e}");
    }
}

/// Asserts the rendering and that SQLite accepts it as a result column.
pub fn check(expr: &Expr, expected: &str) {
    let sql = expr.to_sql();
    assert_eq!(sql, expected, "unexpected rendering");
    assert_prepares(&connection(), &format!("SELECT {sql}"));
}
