//! Render settings.
//!
//! Settings only change the spelling of the output, never its structure:
//! two renderings of the same tree under different settings parse to the
//! same SQLite expression.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// When identifiers are wrapped in double quotes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierQuoting {
    /// Quote only identifiers that are keywords or not plain names.
    #[default]
    WhenNeeded,
    /// Quote every identifier.
    Always,
}

/// How boolean literals are spelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanStyle {
    /// `TRUE` / `FALSE` (SQLite 3.23.0+).
    #[default]
    Keyword,
    /// `1` / `0`.
    Integer,
}

/// Settings carried by a [`SqlWriter`](crate::SqlWriter).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Identifier quoting policy.
    pub identifier_quoting: IdentifierQuoting,
    /// Boolean literal spelling.
    pub boolean_style: BooleanStyle,
}

impl Settings {
    /// Creates the default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            identifier_quoting: IdentifierQuoting::WhenNeeded,
            boolean_style: BooleanStyle::Keyword,
        }
    }

    /// Sets the identifier quoting policy.
    #[must_use]
    pub const fn identifier_quoting(mut self, quoting: IdentifierQuoting) -> Self {
        self.identifier_quoting = quoting;
        self
    }

    /// Sets the boolean literal spelling.
    #[must_use]
    pub const fn boolean_style(mut self, style: BooleanStyle) -> Self {
        self.boolean_style = style;
        self
    }

    /// Reads settings from a JSON document. Missing fields keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Settings`](crate::SqlError::Settings) when the
    /// document does not deserialize.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SqlError;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings, Settings::new());
        assert_eq!(settings.identifier_quoting, IdentifierQuoting::WhenNeeded);
        assert_eq!(settings.boolean_style, BooleanStyle::Keyword);
    }

    #[test]
    fn test_from_json_partial() {
        let settings = Settings::from_json(r#"{"boolean_style": "integer"}"#).unwrap();
        assert_eq!(settings.boolean_style, BooleanStyle::Integer);
        assert_eq!(settings.identifier_quoting, IdentifierQuoting::WhenNeeded);
    }

    #[test]
    fn test_from_json_invalid() {
        let err = Settings::from_json(r#"{"identifier_quoting": "sometimes"}"#).unwrap_err();
        assert!(matches!(err, SqlError::Settings(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings::new().identifier_quoting(IdentifierQuoting::Always);
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}
