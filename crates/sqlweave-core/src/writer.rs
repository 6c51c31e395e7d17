//! The output buffer and the traits every renderable fragment implements.

use std::fmt;
use std::sync::Arc;

use crate::precedence;
use crate::quote;
use crate::settings::{BooleanStyle, IdentifierQuoting, Settings};
use crate::snapshot::Snapshot;

/// A fragment of SQL that can append itself to a [`SqlWriter`].
pub trait Render {
    /// Returns how tightly the fragment binds (higher binds tighter).
    ///
    /// Self-delimiting fragments are [`precedence::ATOMIC`].
    fn precedence(&self) -> u8 {
        precedence::ATOMIC
    }

    /// Appends the fragment's SQL text.
    fn render(&self, w: &mut SqlWriter);

    /// Renders the fragment with the given settings.
    fn to_sql_with(&self, settings: Settings) -> String {
        let mut w = SqlWriter::with_settings(settings);
        self.render(&mut w);
        w.finish()
    }

    /// Renders the fragment with the default settings.
    fn to_sql(&self) -> String {
        self.to_sql_with(Settings::default())
    }
}

/// A complete statement that can be embedded as a subquery.
///
/// Only complete SELECT stages implement this trait, so neither an
/// incomplete statement nor a data-changing one can end up inside an
/// expression.
pub trait Query: Render + fmt::Debug + Send + Sync {
    /// Freezes the statement; `None` when it holds no live input.
    fn snapshot_query(&self) -> Option<Arc<dyn Query>>;
}

impl Snapshot for Arc<dyn Query> {
    fn snapshot(&self) -> Option<Self> {
        self.snapshot_query()
    }
}

/// Accumulates SQL text during a single depth-first rendering pass.
#[derive(Debug, Default)]
pub struct SqlWriter {
    sql: String,
    settings: Settings,
}

impl SqlWriter {
    /// Creates a writer with the default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_settings(Settings::new())
    }

    /// Creates a writer with the given settings.
    #[must_use]
    pub const fn with_settings(settings: Settings) -> Self {
        Self {
            sql: String::new(),
            settings,
        }
    }

    /// Returns the writer's settings.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the text written so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.sql
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sql.len()
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Consumes the writer and returns the SQL text.
    #[must_use]
    pub fn finish(self) -> String {
        self.sql
    }

    /// Appends raw text.
    pub fn push_str(&mut self, text: &str) {
        self.sql.push_str(text);
    }

    /// Appends a single character.
    pub fn push(&mut self, c: char) {
        self.sql.push(c);
    }

    /// Appends a keyword, preceded by a space unless the buffer is empty or
    /// ends with an opening parenthesis or a space.
    pub fn keyword(&mut self, keyword: &str) {
        if !self.sql.is_empty() && !self.sql.ends_with(['(', ' ']) {
            self.sql.push(' ');
        }
        self.sql.push_str(keyword);
    }

    /// Appends an identifier, quoted according to the settings.
    pub fn identifier(&mut self, name: &str) {
        let always = self.settings.identifier_quoting == IdentifierQuoting::Always;
        quote::push_identifier(&mut self.sql, name, always);
    }

    /// Appends a function name, quoted according to the settings.
    pub fn function_name(&mut self, name: &str) {
        let always = self.settings.identifier_quoting == IdentifierQuoting::Always;
        quote::push_function_name(&mut self.sql, name, always);
    }

    /// Appends a text literal.
    pub fn text_literal(&mut self, text: &str) {
        quote::push_text_literal(&mut self.sql, text);
    }

    /// Appends a blob literal.
    pub fn blob_literal(&mut self, bytes: &[u8]) {
        quote::push_blob_literal(&mut self.sql, bytes);
    }

    /// Appends an integer literal.
    pub fn integer_literal(&mut self, value: i64) {
        quote::push_integer_literal(&mut self.sql, value);
    }

    /// Appends a real literal.
    pub fn real_literal(&mut self, value: f64) {
        quote::push_real_literal(&mut self.sql, value);
    }

    /// Appends a boolean literal in the configured style.
    pub fn boolean_literal(&mut self, value: bool) {
        let text = match (self.settings.boolean_style, value) {
            (BooleanStyle::Keyword, true) => "TRUE",
            (BooleanStyle::Keyword, false) => "FALSE",
            (BooleanStyle::Integer, true) => "1",
            (BooleanStyle::Integer, false) => "0",
        };
        self.sql.push_str(text);
    }

    /// Appends a type definition.
    pub fn type_name(&mut self, type_name: &str) {
        quote::push_type_name(&mut self.sql, type_name);
    }

    /// Renders `fragment`, wrapping it in parentheses when it binds less
    /// tightly than `threshold`.
    pub fn render_at<R: Render + ?Sized>(&mut self, fragment: &R, threshold: u8) {
        if fragment.precedence() < threshold {
            self.sql.push('(');
            fragment.render(self);
            self.sql.push(')');
        } else {
            fragment.render(self);
        }
    }

    /// Renders `items` separated by `", "`, each at `threshold`.
    pub fn comma_separated<R: Render>(&mut self, items: &[R], threshold: u8) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            self.render_at(item, threshold);
        }
    }

    /// Inserts a space at byte offset `at` if the text written from there
    /// starts with `-`, so that a preceding `-` does not open a comment.
    pub(crate) fn separate_dash(&mut self, at: usize) {
        if self.sql[at..].starts_with('-') {
            self.sql.insert(at, ' ');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fragment(&'static str, u8);

    impl Render for Fragment {
        fn precedence(&self) -> u8 {
            self.1
        }

        fn render(&self, w: &mut SqlWriter) {
            w.push_str(self.0);
        }
    }

    #[test]
    fn test_render_at_wraps_lower_precedence() {
        let mut w = SqlWriter::new();
        w.render_at(&Fragment("a OR b", precedence::OR), precedence::AND);
        assert_eq!(w.finish(), "(a OR b)");
    }

    #[test]
    fn test_render_at_keeps_equal_precedence() {
        let mut w = SqlWriter::new();
        w.render_at(&Fragment("a AND b", precedence::AND), precedence::AND);
        assert_eq!(w.finish(), "a AND b");
    }

    #[test]
    fn test_keyword_spacing() {
        let mut w = SqlWriter::new();
        w.keyword("SELECT");
        w.keyword("1");
        w.push('(');
        w.keyword("x");
        assert_eq!(w.as_str(), "SELECT 1(x");
    }

    #[test]
    fn test_boolean_style() {
        let mut w = SqlWriter::with_settings(Settings::new().boolean_style(BooleanStyle::Integer));
        w.boolean_literal(true);
        w.push(' ');
        w.boolean_literal(false);
        assert_eq!(w.finish(), "1 0");
    }

    #[test]
    fn test_identifier_quoting_setting() {
        let mut w =
            SqlWriter::with_settings(Settings::new().identifier_quoting(IdentifierQuoting::Always));
        w.identifier("id");
        assert_eq!(w.finish(), "\"id\"");
    }

    #[test]
    fn test_comma_separated() {
        let mut w = SqlWriter::new();
        let items = [Fragment("a", precedence::ATOMIC), Fragment("b + c", precedence::ADDITIVE)];
        w.comma_separated(&items, precedence::MULTIPLICATIVE);
        assert_eq!(w.finish(), "a, (b + c)");
    }

    #[test]
    fn test_separate_dash() {
        let mut w = SqlWriter::new();
        w.push('-');
        let at = w.len();
        w.push_str("-1");
        w.separate_dash(at);
        assert_eq!(w.finish(), "- -1");
    }
}
