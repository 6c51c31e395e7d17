//! Invoicing queries built with sqlweave and run against an in-memory
//! SQLite database.
//!
//! Run with: cargo run -p sqlweave-sqlite --example invoicing

use rusqlite::Connection;
use sqlweave_core::{
    col, count_star, functions, param, value, Expr, Render, SharedText, Snapshot, TableRef,
};
use sqlweave_sqlite::{desc, excluded, Begin, Commit, Insert, Select, Update};

fn print_sql(title: &str, sql: &str) {
    println!("-- {title}");
    println!("{sql};");
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(
        "CREATE TABLE clients (
             id INTEGER PRIMARY KEY,
             name TEXT NOT NULL,
             currency TEXT NOT NULL DEFAULT 'EUR'
         );
         CREATE TABLE invoices (
             id INTEGER PRIMARY KEY,
             client_id INTEGER NOT NULL REFERENCES clients(id),
             number TEXT NOT NULL UNIQUE,
             status TEXT NOT NULL,
             total_cents INTEGER NOT NULL
         );",
    )?;

    // -------------------------------------------------------------------------
    // WRITES
    // -------------------------------------------------------------------------
    let sql = Begin::immediate().to_sql();
    print_sql("Start a write transaction", &sql);
    conn.execute_batch(&sql)?;

    let sql = Insert::into("clients")
        .columns(["id", "name", "currency"])?
        .values([value(1), value("Acme Corp"), value("EUR")])?
        .values([value(2), value("Globex"), value("USD")])?
        .to_sql();
    print_sql("Insert clients", &sql);
    conn.execute(&sql, [])?;

    let sql = Insert::into("invoices")
        .columns(["client_id", "number", "status", "total_cents"])?
        .values([value(1), value("INV-001"), value("paid"), value(125_000)])?
        .values([value(1), value("INV-002"), value("draft"), value(4_500)])?
        .values([value(2), value("INV-003"), value("sent"), value(980_000)])?
        .to_sql();
    print_sql("Insert invoices", &sql);
    conn.execute(&sql, [])?;

    // Re-issuing an invoice number updates the stored total instead.
    let sql = Insert::into("invoices")
        .columns(["client_id", "number", "status", "total_cents"])?
        .values([value(1), value("INV-002"), value("draft"), value(5_000)])?
        .on_conflict(["number"])
        .do_update()
        .set("total_cents", excluded("total_cents"))
        .where_(col("status").eq("draft"))
        .to_sql();
    print_sql("Upsert a draft invoice", &sql);
    conn.execute(&sql, [])?;

    let sql = Update::table("invoices")
        .set("status", "overdue")
        .where_(col("status").eq("sent"))
        .returning([col("number")])?
        .to_sql();
    print_sql("Mark sent invoices overdue", &sql);
    let overdue: Vec<String> = conn
        .prepare(&sql)?
        .query_map([], |row| row.get(0))?
        .collect::<Result<_, _>>()?;
    println!("-- overdue: {overdue:?}");
    println!();

    let sql = Commit.to_sql();
    print_sql("Commit", &sql);
    conn.execute_batch(&sql)?;

    // -------------------------------------------------------------------------
    // REPORTS
    // -------------------------------------------------------------------------
    let c = TableRef::new("clients").alias("c");
    let i = TableRef::new("invoices").alias("i");
    let revenue = functions::total(i.column("total_cents")).div(100.0);
    let sql = Select::columns([c.column("name"), count_star(), revenue.clone()])?
        .from(c.clone())
        .left_join(i.clone())
        .on(i.column("client_id").eq(c.column("id")))
        .group_by([c.column("name")])?
        .having(count_star().gt(0))
        .order_by([desc(revenue)])?
        .to_sql();
    print_sql("Revenue per client", &sql);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, f64>(2)?,
        ))
    })?;
    for row in rows {
        let (name, invoices, total) = row?;
        println!("-- {name}: {invoices} invoice(s), {total:.2}");
    }
    println!();

    let label = Expr::case()
        .when(col("total_cents").ge(100_000), "large")
        .when(col("total_cents").ge(10_000), "medium")
        .otherwise("small");
    let sql = Select::columns([col("number"), label])?
        .from("invoices")
        .where_(col("client_id").eq(param()))
        .to_sql();
    print_sql("Invoice size buckets for one client (bound parameter)", &sql);
    let buckets: Vec<(String, String)> = conn
        .prepare(&sql)?
        .query_map([1], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<_, _>>()?;
    println!("-- {buckets:?}");
    println!();

    // A frozen copy keeps the status it was built with.
    let status = SharedText::new("paid");
    let query = Select::columns([col("number")])?
        .from("invoices")
        .where_(col("status").eq(&status));
    let frozen = query.copy();
    status.replace("draft");
    print_sql("Frozen copy", &frozen.to_sql());
    print_sql("Live query", &query.to_sql());

    Ok(())
}
