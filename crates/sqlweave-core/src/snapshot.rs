//! Defensive copies with structural sharing.
//!
//! A snapshot decouples a value from every [`Shared`](crate::Shared) buffer
//! reachable from it. Values that are already immutable are reused: a
//! composite node whose children all come back unchanged is returned as
//! the same `Arc`, so copying a long chain built from frozen inputs
//! allocates nothing.

/// A value that can be frozen into an independent snapshot.
pub trait Snapshot: Clone {
    /// Returns a frozen replacement, or `None` when `self` holds no live
    /// input and can be shared as-is.
    fn snapshot(&self) -> Option<Self>;

    /// Returns a value that renders like `self` does now and is unaffected
    /// by later mutation of any shared input. Returns a clone of `self`
    /// (the same allocation for `Arc`-backed values) when nothing changed.
    #[must_use]
    fn copy(&self) -> Self {
        self.snapshot().unwrap_or_else(|| self.clone())
    }
}

impl<T: Snapshot> Snapshot for Option<T> {
    fn snapshot(&self) -> Option<Self> {
        self.as_ref().and_then(Snapshot::snapshot).map(Some)
    }
}

impl<T: Snapshot> Snapshot for Vec<T> {
    fn snapshot(&self) -> Option<Self> {
        let mut freezer = Freezer::new();
        let items: Self = self.iter().map(|item| freezer.take(item)).collect();
        freezer.finish(|| items)
    }
}

impl<A: Snapshot, B: Snapshot> Snapshot for (A, B) {
    fn snapshot(&self) -> Option<Self> {
        let mut freezer = Freezer::new();
        let a = freezer.take(&self.0);
        let b = freezer.take(&self.1);
        freezer.finish(|| (a, b))
    }
}

/// Collects child snapshots and decides whether a composite must be
/// rebuilt.
///
/// ```
/// use sqlweave_core::{Freezer, Snapshot, Text};
///
/// let name = Text::from("id");
/// let alias: Option<Text> = None;
///
/// let mut freezer = Freezer::new();
/// let name_copy = freezer.take(&name);
/// let alias_copy = freezer.take(&alias);
/// assert!(freezer.finish(|| (name_copy, alias_copy)).is_none());
/// ```
#[derive(Debug, Default)]
pub struct Freezer {
    changed: bool,
}

impl Freezer {
    /// Creates a freezer with no recorded change.
    #[must_use]
    pub const fn new() -> Self {
        Self { changed: false }
    }

    /// Returns the snapshot of `value`, or a clone of it when it is already
    /// frozen. Records whether anything changed.
    pub fn take<T: Snapshot>(&mut self, value: &T) -> T {
        match value.snapshot() {
            Some(frozen) => {
                self.changed = true;
                frozen
            }
            None => value.clone(),
        }
    }

    /// Returns true if any child taken so far was replaced.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.changed
    }

    /// Builds the replacement only if some child changed.
    pub fn finish<T>(self, rebuild: impl FnOnce() -> T) -> Option<T> {
        self.changed.then(rebuild)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{SharedText, Text};

    #[test]
    fn test_vec_of_frozen_is_unchanged() {
        let items = vec![Text::from("a"), Text::from("b")];
        assert!(items.snapshot().is_none());
    }

    #[test]
    fn test_vec_with_live_item_is_rebuilt() {
        let buffer = SharedText::new("b");
        let items = vec![Text::from("a"), Text::from(&buffer)];
        let frozen = items.copy();
        buffer.push_str("!");
        assert!(Text::ptr_eq(&items[0], &frozen[0]));
        assert_eq!(frozen[1].to_owned_string(), "b");
    }

    #[test]
    fn test_option_snapshot() {
        let none: Option<Text> = None;
        assert!(none.snapshot().is_none());
        let live = Some(Text::from(SharedText::new("x")));
        assert!(live.snapshot().is_some());
    }

    #[test]
    fn test_freezer_tracks_changes() {
        let mut freezer = Freezer::new();
        let _ = freezer.take(&Text::from("a"));
        assert!(!freezer.changed());
        let _ = freezer.take(&Text::from(SharedText::new("b")));
        assert!(freezer.changed());
        assert_eq!(freezer.finish(|| 1), Some(1));
    }
}
