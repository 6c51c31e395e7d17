//! Column and table references.

use crate::error::{Result, SqlError};
use crate::shared::Text;
use crate::snapshot::{Freezer, Snapshot};
use crate::writer::{Render, SqlWriter};

use super::{Expr, Node};

/// Creates a column reference.
#[must_use]
pub fn col(name: impl Into<Text>) -> Expr {
    Expr::new(Node::Column(ColumnRef::new(name)))
}

/// Shorthand for building qualified columns: `Column::qualified("u", "id")`.
pub type Column = ColumnRef;

/// A possibly qualified column reference: `[schema.][table.]name`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    /// Optional schema qualifier (only rendered together with a table).
    pub schema: Option<Text>,
    /// Optional table name or alias.
    pub table: Option<Text>,
    /// Column name.
    pub name: Text,
}

impl ColumnRef {
    /// Creates an unqualified column reference.
    #[must_use]
    pub fn new(name: impl Into<Text>) -> Self {
        Self {
            schema: None,
            table: None,
            name: name.into(),
        }
    }

    /// Creates a table-qualified column reference.
    #[must_use]
    pub fn qualified(table: impl Into<Text>, name: impl Into<Text>) -> Self {
        Self {
            schema: None,
            table: Some(table.into()),
            name: name.into(),
        }
    }

    /// Creates a schema- and table-qualified column reference.
    #[must_use]
    pub fn in_schema(
        schema: impl Into<Text>,
        table: impl Into<Text>,
        name: impl Into<Text>,
    ) -> Self {
        Self {
            schema: Some(schema.into()),
            table: Some(table.into()),
            name: name.into(),
        }
    }
}

impl Render for ColumnRef {
    fn render(&self, w: &mut SqlWriter) {
        if let Some(table) = &self.table {
            if let Some(schema) = &self.schema {
                schema.with(|s| w.identifier(s));
                w.push('.');
            }
            table.with(|t| w.identifier(t));
            w.push('.');
        }
        self.name.with(|n| w.identifier(n));
    }
}

impl Snapshot for ColumnRef {
    fn snapshot(&self) -> Option<Self> {
        let mut freezer = Freezer::new();
        let schema = freezer.take(&self.schema);
        let table = freezer.take(&self.table);
        let name = freezer.take(&self.name);
        freezer.finish(|| Self {
            schema,
            table,
            name,
        })
    }
}

impl From<ColumnRef> for Expr {
    fn from(column: ColumnRef) -> Self {
        Self::new(Node::Column(column))
    }
}

/// A table reference: `[schema.]name [AS alias]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRef {
    /// Optional schema qualifier.
    pub schema: Option<Text>,
    /// Table name.
    pub name: Text,
    /// Optional alias.
    pub alias: Option<Text>,
}

impl TableRef {
    /// Creates a table reference.
    #[must_use]
    pub fn new(name: impl Into<Text>) -> Self {
        Self {
            schema: None,
            name: name.into(),
            alias: None,
        }
    }

    /// Sets the alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<Text>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Qualifies the table with a schema.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::SchemaMismatch`] if the reference already carries
    /// a different schema.
    pub fn in_schema(mut self, schema: impl Into<Text>) -> Result<Self> {
        let schema = schema.into();
        if let Some(current) = &self.schema {
            if current != &schema {
                return Err(SqlError::SchemaMismatch {
                    table: self.name.to_owned_string(),
                    current: current.to_owned_string(),
                    requested: schema.to_owned_string(),
                });
            }
        }
        self.schema = Some(schema);
        Ok(self)
    }

    /// Returns a column of this table, qualified by the alias when there is
    /// one and by `[schema.]name` otherwise.
    #[must_use]
    pub fn column(&self, name: impl Into<Text>) -> Expr {
        let column = match &self.alias {
            Some(alias) => ColumnRef::qualified(alias.clone(), name),
            None => ColumnRef {
                schema: self.schema.clone(),
                table: Some(self.name.clone()),
                name: name.into(),
            },
        };
        column.into()
    }

    /// Appends `[schema.]name` without the alias.
    pub fn render_name(&self, w: &mut SqlWriter) {
        if let Some(schema) = &self.schema {
            schema.with(|s| w.identifier(s));
            w.push('.');
        }
        self.name.with(|n| w.identifier(n));
    }
}

impl Render for TableRef {
    fn render(&self, w: &mut SqlWriter) {
        self.render_name(w);
        if let Some(alias) = &self.alias {
            w.push_str(" AS ");
            alias.with(|a| w.identifier(a));
        }
    }
}

impl Snapshot for TableRef {
    fn snapshot(&self) -> Option<Self> {
        let mut freezer = Freezer::new();
        let schema = freezer.take(&self.schema);
        let name = freezer.take(&self.name);
        let alias = freezer.take(&self.alias);
        freezer.finish(|| Self {
            schema,
            name,
            alias,
        })
    }
}

impl From<&str> for TableRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TableRef {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<Text> for TableRef {
    fn from(name: Text) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::SharedText;

    #[test]
    fn test_column_rendering() {
        assert_eq!(col("name").to_sql(), "name");
        assert_eq!(ColumnRef::qualified("users", "name").to_sql(), "users.name");
        assert_eq!(
            ColumnRef::in_schema("main", "users", "name").to_sql(),
            "main.users.name"
        );
        assert_eq!(
            ColumnRef::qualified("order", "select").to_sql(),
            "\"order\".\"select\""
        );
    }

    #[test]
    fn test_schema_without_table_is_not_rendered() {
        let column = ColumnRef {
            schema: Some(Text::from("main")),
            table: None,
            name: Text::from("id"),
        };
        assert_eq!(column.to_sql(), "id");
    }

    #[test]
    fn test_table_rendering() {
        assert_eq!(TableRef::new("users").to_sql(), "users");
        assert_eq!(TableRef::new("users").alias("u").to_sql(), "users AS u");
        let table = TableRef::new("users").in_schema("main").unwrap();
        assert_eq!(table.to_sql(), "main.users");
    }

    #[test]
    fn test_table_columns() {
        let users = TableRef::new("users").in_schema("main").unwrap();
        assert_eq!(users.column("id").to_sql(), "main.users.id");
        let aliased = users.alias("u");
        assert_eq!(aliased.column("id").to_sql(), "u.id");
    }

    #[test]
    fn test_schema_mismatch() {
        let table = TableRef::new("users").in_schema("main").unwrap();
        let same = table.clone().in_schema("main");
        assert!(same.is_ok());
        let err = table.in_schema("temp").unwrap_err();
        assert!(matches!(err, SqlError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_table_snapshot() {
        let buffer = SharedText::new("users");
        let table = TableRef::new(&buffer).alias("u");
        let frozen = table.copy();
        buffer.replace("accounts");
        assert_eq!(frozen.to_sql(), "users AS u");
        assert_eq!(table.to_sql(), "accounts AS u");

        let plain = TableRef::new("users");
        assert!(plain.snapshot().is_none());
    }
}
