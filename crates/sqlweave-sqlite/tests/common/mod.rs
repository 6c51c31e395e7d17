#![allow(dead_code)]

use rusqlite::Connection;

/// Opens an in-memory database with the tables used by the statement
/// tests.
pub fn database() -> Connection {
    let conn =
        Connection::open_in_memory().unwrap_or_else(|e| panic!("Failed to open SQLite: {e}"));
    conn.execute_batch(
        "CREATE TABLE users (
             id INTEGER PRIMARY KEY,
             name TEXT NOT NULL,
             email TEXT UNIQUE,
             active INTEGER NOT NULL DEFAULT 1
         );
         CREATE TABLE orders (
             id INTEGER PRIMARY KEY,
             user_id INTEGER NOT NULL,
             total REAL NOT NULL,
             \"order\" INTEGER
         );",
    )
    .unwrap_or_else(|e| panic!("Failed to create schema: {e}"));
    conn
}

/// Executes a rendered statement, panicking with the SQL on failure.
pub fn execute(conn: &Connection, sql: &str) -> usize {
    conn.execute(sql, [])
        .unwrap_or_else(|e| panic!("SQLite rejected: {sql}\nError: {e}"))
}

/// Runs a rendered query and collects the first column as integers.
pub fn query_i64(conn: &Connection, sql: &str) -> Vec<i64> {
    let mut stmt = conn
        .prepare(sql)
        .unwrap_or_else(|e| panic!("SQLite rejected: {sql}\nError: {e}"));
    let rows = stmt
        .query_map([], |row| row.get(0))
        .unwrap_or_else(|e| panic!("Query failed: {sql}\nError: {e}"));
    rows.map(|r| r.unwrap_or_else(|e| panic!("Bad row: {e}")))
        .collect()
}

/// Runs a rendered query and collects the first column as text.
pub fn query_text(conn: &Connection, sql: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(sql)
        .unwrap_or_else(|e| panic!("SQLite rejected: {sql}\nError: {e}"));
    let rows = stmt
        .query_map([], |row| row.get(0))
        .unwrap_or_else(|e| panic!("Query failed: {sql}\nError: {e}"));
    rows.map(|r| r.unwrap_or_else(|e| panic!("Bad row: {e}")))
        .collect()
}
