//! Quoting and literal formatting following SQLite's lexical rules.
//!
//! See <https://www.sqlite.org/lang_keywords.html> and
//! <https://www.sqlite.org/lang_expr.html#literal_values_constants_>.

/// SQLite keywords, upper case and sorted for binary search.
///
/// `TRUE` and `FALSE` are not in SQLite's keyword list, but an unquoted
/// `true` only names a column when such a column exists, so they are quoted
/// as well.
const KEYWORDS: &[&str] = &[
    "ABORT",
    "ACTION",
    "ADD",
    "AFTER",
    "ALL",
    "ALTER",
    "ALWAYS",
    "ANALYZE",
    "AND",
    "AS",
    "ASC",
    "ATTACH",
    "AUTOINCREMENT",
    "BEFORE",
    "BEGIN",
    "BETWEEN",
    "BY",
    "CASCADE",
    "CASE",
    "CAST",
    "CHECK",
    "COLLATE",
    "COLUMN",
    "COMMIT",
    "CONFLICT",
    "CONSTRAINT",
    "CREATE",
    "CROSS",
    "CURRENT",
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "DATABASE",
    "DEFAULT",
    "DEFERRABLE",
    "DEFERRED",
    "DELETE",
    "DESC",
    "DETACH",
    "DISTINCT",
    "DO",
    "DROP",
    "EACH",
    "ELSE",
    "END",
    "ESCAPE",
    "EXCEPT",
    "EXCLUDE",
    "EXCLUSIVE",
    "EXISTS",
    "EXPLAIN",
    "FAIL",
    "FALSE",
    "FILTER",
    "FIRST",
    "FOLLOWING",
    "FOR",
    "FOREIGN",
    "FROM",
    "FULL",
    "GENERATED",
    "GLOB",
    "GROUP",
    "GROUPS",
    "HAVING",
    "IF",
    "IGNORE",
    "IMMEDIATE",
    "IN",
    "INDEX",
    "INDEXED",
    "INITIALLY",
    "INNER",
    "INSERT",
    "INSTEAD",
    "INTERSECT",
    "INTO",
    "IS",
    "ISNULL",
    "JOIN",
    "KEY",
    "LAST",
    "LEFT",
    "LIKE",
    "LIMIT",
    "MATCH",
    "MATERIALIZED",
    "NATURAL",
    "NO",
    "NOT",
    "NOTHING",
    "NOTNULL",
    "NULL",
    "NULLS",
    "OF",
    "OFFSET",
    "ON",
    "OR",
    "ORDER",
    "OTHERS",
    "OUTER",
    "OVER",
    "PARTITION",
    "PLAN",
    "PRAGMA",
    "PRECEDING",
    "PRIMARY",
    "QUERY",
    "RAISE",
    "RANGE",
    "RECURSIVE",
    "REFERENCES",
    "REGEXP",
    "REINDEX",
    "RELEASE",
    "RENAME",
    "REPLACE",
    "RESTRICT",
    "RETURNING",
    "RIGHT",
    "ROLLBACK",
    "ROW",
    "ROWS",
    "SAVEPOINT",
    "SELECT",
    "SET",
    "TABLE",
    "TEMP",
    "TEMPORARY",
    "THEN",
    "TIES",
    "TO",
    "TRANSACTION",
    "TRIGGER",
    "TRUE",
    "UNBOUNDED",
    "UNION",
    "UNIQUE",
    "UPDATE",
    "USING",
    "VACUUM",
    "VALUES",
    "VIEW",
    "VIRTUAL",
    "WHEN",
    "WHERE",
    "WINDOW",
    "WITH",
    "WITHOUT",
];

/// Keywords that SQLite's parser falls back to reading as plain
/// identifiers in call position, e.g. `replace(x, 'a', 'b')`.
const FUNCTION_KEYWORDS: &[&str] = &["GLOB", "LIKE", "MATCH", "REGEXP", "REPLACE"];

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Returns true if `word` is a SQLite keyword (case-insensitive).
#[must_use]
pub fn is_keyword(word: &str) -> bool {
    // Longest keyword is CURRENT_TIMESTAMP.
    if word.is_empty() || word.len() > 17 {
        return false;
    }
    let upper = word.to_ascii_uppercase();
    KEYWORDS.binary_search(&upper.as_str()).is_ok()
}

/// Returns true if `name` has the lexical shape of an unquoted identifier:
/// an ASCII letter or underscore followed by letters, digits or underscores.
#[must_use]
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Returns true if `name` must be delimited to be read back as the same
/// identifier.
#[must_use]
pub fn needs_quoting(name: &str) -> bool {
    !is_plain_identifier(name) || is_keyword(name)
}

/// Appends `name` wrapped in double quotes, doubling embedded quotes.
pub fn push_quoted_identifier(sql: &mut String, name: &str) {
    sql.reserve(name.len() + 2);
    sql.push('"');
    for c in name.chars() {
        if c == '"' {
            sql.push('"');
        }
        sql.push(c);
    }
    sql.push('"');
}

/// Appends an identifier, quoting it when needed or when `always` is set.
pub fn push_identifier(sql: &mut String, name: &str, always: bool) {
    if always || needs_quoting(name) {
        push_quoted_identifier(sql, name);
    } else {
        sql.push_str(name);
    }
}

/// Appends a function name. Keywords are quoted unless SQLite reads them
/// as a function name in call position.
pub fn push_function_name(sql: &mut String, name: &str, always: bool) {
    let bare = is_plain_identifier(name)
        && (!is_keyword(name)
            || FUNCTION_KEYWORDS.contains(&name.to_ascii_uppercase().as_str()));
    if always || !bare {
        push_quoted_identifier(sql, name);
    } else {
        sql.push_str(name);
    }
}

/// Returns `name` as it would appear in SQL text.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    let mut sql = String::with_capacity(name.len() + 2);
    push_identifier(&mut sql, name, false);
    sql
}

/// Appends a single-quoted text literal, doubling embedded quotes.
pub fn push_text_literal(sql: &mut String, text: &str) {
    sql.reserve(text.len() + 2);
    sql.push('\'');
    for c in text.chars() {
        if c == '\'' {
            sql.push('\'');
        }
        sql.push(c);
    }
    sql.push('\'');
}

/// Appends a blob literal: `X'...'` with two upper-case hex digits per byte.
pub fn push_blob_literal(sql: &mut String, bytes: &[u8]) {
    sql.reserve(bytes.len() * 2 + 3);
    sql.push_str("X'");
    for byte in bytes {
        sql.push(char::from(HEX_DIGITS[usize::from(byte >> 4)]));
        sql.push(char::from(HEX_DIGITS[usize::from(byte & 0x0F)]));
    }
    sql.push('\'');
}

/// Appends an integer literal.
pub fn push_integer_literal(sql: &mut String, value: i64) {
    sql.push_str(&value.to_string());
}

/// Appends a real literal that SQLite can never read back as an integer.
///
/// Finite values use the shortest representation that round-trips and
/// always carry a fractional part or an exponent. Infinities use an
/// out-of-range exponent, which SQLite reads back as an infinity. SQLite has
/// no NaN, so NaN renders as `NULL`, which is what SQLite stores for it.
pub fn push_real_literal(sql: &mut String, value: f64) {
    if value.is_nan() {
        sql.push_str("NULL");
        return;
    }
    if value.is_infinite() {
        sql.push_str(if value > 0.0 { "9e999" } else { "-9e999" });
        return;
    }
    let text = format!("{value:?}");
    sql.push_str(&text);
    if !text.contains(['.', 'e', 'E']) {
        sql.push_str(".0");
    }
}

/// Splits a type definition into its name and an optional trailing
/// parenthesized suffix, e.g. `VARCHAR(255)` into `VARCHAR` and `(255)`.
#[must_use]
pub fn split_type_name(type_name: &str) -> (&str, &str) {
    let trimmed = type_name.trim();
    if trimmed.ends_with(')') {
        if let Some(open) = trimmed.find('(') {
            let name = trimmed[..open].trim_end();
            if !name.is_empty() {
                return (name, &trimmed[open..]);
            }
        }
    }
    (trimmed, "")
}

/// Appends a type definition. Each word of the name is quoted on its own
/// when needed; the precision suffix is passed through verbatim.
pub fn push_type_name(sql: &mut String, type_name: &str) {
    let (name, suffix) = split_type_name(type_name);
    for (i, word) in name.split_whitespace().enumerate() {
        if i > 0 {
            sql.push(' ');
        }
        push_identifier(sql, word, false);
    }
    sql.push_str(suffix);
}
