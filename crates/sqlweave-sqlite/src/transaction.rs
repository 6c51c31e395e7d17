//! Transaction control statements.
//!
//! See <https://www.sqlite.org/lang_transaction.html> and
//! <https://www.sqlite.org/lang_savepoint.html>.

use sqlweave_core::{Render, Snapshot, SqlWriter, Text};

/// How a transaction acquires its locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionMode {
    /// `DEFERRED`
    Deferred,
    /// `IMMEDIATE`
    Immediate,
    /// `EXCLUSIVE`
    Exclusive,
}

impl TransactionMode {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Deferred => "DEFERRED",
            Self::Immediate => "IMMEDIATE",
            Self::Exclusive => "EXCLUSIVE",
        }
    }
}

/// `BEGIN [mode]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Begin {
    mode: Option<TransactionMode>,
}

impl Begin {
    /// `BEGIN`
    #[must_use]
    pub const fn new() -> Self {
        Self { mode: None }
    }

    /// `BEGIN DEFERRED`
    #[must_use]
    pub const fn deferred() -> Self {
        Self {
            mode: Some(TransactionMode::Deferred),
        }
    }

    /// `BEGIN IMMEDIATE`
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            mode: Some(TransactionMode::Immediate),
        }
    }

    /// `BEGIN EXCLUSIVE`
    #[must_use]
    pub const fn exclusive() -> Self {
        Self {
            mode: Some(TransactionMode::Exclusive),
        }
    }
}

impl Render for Begin {
    fn render(&self, w: &mut SqlWriter) {
        w.keyword("BEGIN");
        if let Some(mode) = self.mode {
            w.keyword(mode.as_str());
        }
    }
}

impl Snapshot for Begin {
    fn snapshot(&self) -> Option<Self> {
        None
    }
}

/// `COMMIT`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Commit;

impl Render for Commit {
    fn render(&self, w: &mut SqlWriter) {
        w.keyword("COMMIT");
    }
}

impl Snapshot for Commit {
    fn snapshot(&self) -> Option<Self> {
        None
    }
}

/// `ROLLBACK [TO savepoint]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rollback {
    savepoint: Option<Text>,
}

impl Rollback {
    /// `ROLLBACK`
    #[must_use]
    pub const fn new() -> Self {
        Self { savepoint: None }
    }

    /// `ROLLBACK TO name`
    #[must_use]
    pub fn to(savepoint: impl Into<Text>) -> Self {
        Self {
            savepoint: Some(savepoint.into()),
        }
    }
}

impl Render for Rollback {
    fn render(&self, w: &mut SqlWriter) {
        w.keyword("ROLLBACK");
        if let Some(name) = &self.savepoint {
            w.keyword("TO ");
            name.with(|n| w.identifier(n));
        }
    }
}

impl Snapshot for Rollback {
    fn snapshot(&self) -> Option<Self> {
        self.savepoint
            .snapshot()
            .map(|savepoint| Self { savepoint })
    }
}

/// `SAVEPOINT name`
#[derive(Debug, Clone, PartialEq)]
pub struct Savepoint {
    name: Text,
}

impl Savepoint {
    /// Creates a savepoint statement.
    #[must_use]
    pub fn new(name: impl Into<Text>) -> Self {
        Self { name: name.into() }
    }
}

impl Render for Savepoint {
    fn render(&self, w: &mut SqlWriter) {
        w.keyword("SAVEPOINT ");
        self.name.with(|n| w.identifier(n));
    }
}

impl Snapshot for Savepoint {
    fn snapshot(&self) -> Option<Self> {
        self.name.snapshot().map(|name| Self { name })
    }
}

/// `RELEASE name`
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    name: Text,
}

impl Release {
    /// Creates a release statement.
    #[must_use]
    pub fn new(name: impl Into<Text>) -> Self {
        Self { name: name.into() }
    }
}

impl Render for Release {
    fn render(&self, w: &mut SqlWriter) {
        w.keyword("RELEASE ");
        self.name.with(|n| w.identifier(n));
    }
}

impl Snapshot for Release {
    fn snapshot(&self) -> Option<Self> {
        self.name.snapshot().map(|name| Self { name })
    }
}

#[cfg(test)]
mod tests {
    use sqlweave_core::SharedText;

    use super::*;

    #[test]
    fn test_begin_modes() {
        assert_eq!(Begin::new().to_sql(), "BEGIN");
        assert_eq!(Begin::deferred().to_sql(), "BEGIN DEFERRED");
        assert_eq!(Begin::immediate().to_sql(), "BEGIN IMMEDIATE");
        assert_eq!(Begin::exclusive().to_sql(), "BEGIN EXCLUSIVE");
    }

    #[test]
    fn test_commit_and_rollback() {
        assert_eq!(Commit.to_sql(), "COMMIT");
        assert_eq!(Rollback::new().to_sql(), "ROLLBACK");
        assert_eq!(Rollback::to("sp1").to_sql(), "ROLLBACK TO sp1");
    }

    #[test]
    fn test_savepoints() {
        assert_eq!(Savepoint::new("sp1").to_sql(), "SAVEPOINT sp1");
        assert_eq!(Release::new("sp1").to_sql(), "RELEASE sp1");
        assert_eq!(
            Savepoint::new("before update").to_sql(),
            "SAVEPOINT \"before update\""
        );
    }

    #[test]
    fn test_savepoint_snapshot() {
        let name = SharedText::new("sp1");
        let savepoint = Savepoint::new(&name);
        let frozen = savepoint.copy();
        name.replace("sp2");
        assert_eq!(frozen.to_sql(), "SAVEPOINT sp1");
        assert_eq!(Rollback::to(&name).copy().to_sql(), "ROLLBACK TO sp2");
    }
}
