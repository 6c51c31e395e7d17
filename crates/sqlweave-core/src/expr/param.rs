//! Bound parameters.
//!
//! See <https://www.sqlite.org/lang_expr.html#parameters>.

use std::sync::Arc;

use crate::error::{Result, SqlError};
use crate::writer::{Render, SqlWriter};

use super::{Expr, Node};

/// Largest `?NNN` index accepted by a default SQLite build
/// (`SQLITE_MAX_VARIABLE_NUMBER`).
pub const MAX_PARAMETER_INDEX: u32 = 32766;

/// A bound parameter placeholder.
///
/// Named parameters are validated on construction and stored frozen, so a
/// parameter never refers to caller-owned mutable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// `?`
    Anonymous,
    /// `?NNN`
    Numbered(u32),
    /// `:name`, `@name` or `$name`, stored with its prefix.
    Named(Arc<str>),
}

impl Param {
    /// Parses a parameter token such as `?`, `?3`, `:id`, `@id` or `$id`.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::InvalidParameter`] when the token is not valid
    /// SQLite parameter syntax or the index is out of range.
    pub fn parse(token: &str) -> Result<Self> {
        let invalid = || SqlError::InvalidParameter(String::from(token));
        let mut chars = token.chars();
        match chars.next() {
            Some('?') => {
                let digits = chars.as_str();
                if digits.is_empty() {
                    return Ok(Self::Anonymous);
                }
                if !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                let index: u32 = digits.parse().map_err(|_| invalid())?;
                Self::numbered(index)
            }
            Some(':' | '@' | '$') => {
                let name = chars.as_str();
                if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                {
                    return Err(invalid());
                }
                Ok(Self::Named(Arc::from(token)))
            }
            _ => Err(invalid()),
        }
    }

    /// Creates a numbered parameter `?N`.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::InvalidParameter`] when `index` is outside
    /// `1..=MAX_PARAMETER_INDEX`.
    pub fn numbered(index: u32) -> Result<Self> {
        if (1..=MAX_PARAMETER_INDEX).contains(&index) {
            Ok(Self::Numbered(index))
        } else {
            Err(SqlError::InvalidParameter(format!("?{index}")))
        }
    }
}

impl Render for Param {
    fn render(&self, w: &mut SqlWriter) {
        match self {
            Self::Anonymous => w.push('?'),
            Self::Numbered(index) => {
                w.push('?');
                w.push_str(&index.to_string());
            }
            Self::Named(token) => w.push_str(token),
        }
    }
}

/// Creates an anonymous parameter `?`.
#[must_use]
pub fn param() -> Expr {
    Expr::new(Node::Param(Param::Anonymous))
}

/// Creates a numbered parameter `?N`.
///
/// # Errors
///
/// Returns [`SqlError::InvalidParameter`] when `index` is out of range.
pub fn param_at(index: u32) -> Result<Expr> {
    Ok(Expr::new(Node::Param(Param::numbered(index)?)))
}

/// Creates a parameter from its token (`?`, `?N`, `:name`, `@name`,
/// `$name`).
///
/// # Errors
///
/// Returns [`SqlError::InvalidParameter`] when the token is malformed.
pub fn parameter(token: &str) -> Result<Expr> {
    Ok(Expr::new(Node::Param(Param::parse(token)?)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_tokens() {
        assert_eq!(Param::parse("?").unwrap(), Param::Anonymous);
        assert_eq!(Param::parse("?12").unwrap(), Param::Numbered(12));
        assert_eq!(Param::parse(":id").unwrap().to_sql(), ":id");
        assert_eq!(Param::parse("@user_id").unwrap().to_sql(), "@user_id");
        assert_eq!(Param::parse("$v2").unwrap().to_sql(), "$v2");
    }

    #[test]
    fn test_parse_invalid_tokens() {
        for token in ["", ":", "id", "?x", "?0", "?32767", "?-1", ":a b", "#id", "?+1"] {
            assert!(
                matches!(Param::parse(token), Err(SqlError::InvalidParameter(_))),
                "token {token:?} was accepted"
            );
        }
    }

    #[test]
    fn test_param_factories() {
        assert_eq!(param().to_sql(), "?");
        assert_eq!(param_at(3).unwrap().to_sql(), "?3");
        assert!(param_at(0).is_err());
        assert_eq!(parameter(":name").unwrap().to_sql(), ":name");
        assert!(parameter("name").is_err());
    }
}
