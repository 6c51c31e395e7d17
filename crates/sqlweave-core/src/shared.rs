//! Caller-owned mutable inputs and the field types that may hold them.
//!
//! A tree built from [`SharedText`] or [`SharedBytes`] renders whatever the
//! buffer contains at render time. [`Snapshot::copy`] replaces every live
//! buffer with a frozen copy of its current contents.

use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::snapshot::Snapshot;

/// A mutable buffer that the caller keeps a handle to after handing it to
/// an expression.
///
/// Clones share the same buffer.
pub struct Shared<T>(Arc<RwLock<T>>);

/// A shared, mutable string buffer.
pub type SharedText = Shared<String>;

/// A shared, mutable byte buffer.
pub type SharedBytes = Shared<Vec<u8>>;

impl<T> Shared<T> {
    /// Creates a new shared buffer.
    #[must_use]
    pub fn new(value: impl Into<T>) -> Self {
        Self(Arc::new(RwLock::new(value.into())))
    }

    /// Locks the buffer for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read()
    }

    /// Locks the buffer for reading even if this thread already holds a
    /// read lock on it.
    fn read_recursive(&self) -> RwLockReadGuard<'_, T> {
        self.0.read_recursive()
    }

    /// Locks the buffer for writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write()
    }

    /// Replaces the contents, returning the previous value.
    pub fn replace(&self, value: impl Into<T>) -> T {
        std::mem::replace(&mut *self.0.write(), value.into())
    }

    /// Returns true if both handles point to the same buffer.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Self(Arc::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Shared").field(&*self.read()).finish()
    }
}

impl SharedText {
    /// Appends to the buffer.
    pub fn push_str(&self, text: &str) {
        self.write().push_str(text);
    }
}

impl SharedBytes {
    /// Appends to the buffer.
    pub fn extend_from_slice(&self, bytes: &[u8]) {
        self.write().extend_from_slice(bytes);
    }
}

/// A name or text value: either frozen or a live caller buffer.
#[derive(Clone)]
pub enum Text {
    /// Immutable text.
    Frozen(Arc<str>),
    /// A buffer the caller may still mutate.
    Live(SharedText),
}

impl Text {
    /// Calls `f` with the current contents.
    pub fn with<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        match self {
            Self::Frozen(text) => f(text),
            Self::Live(buffer) => f(buffer.read_recursive().as_str()),
        }
    }

    /// Returns the current contents as an owned string.
    #[must_use]
    pub fn to_owned_string(&self) -> String {
        self.with(str::to_owned)
    }

    /// Returns true if both values are the same frozen allocation.
    ///
    /// Live buffers are never considered the same: their contents may change.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        match (a, b) {
            (Self::Frozen(a), Self::Frozen(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Snapshot for Text {
    fn snapshot(&self) -> Option<Self> {
        match self {
            Self::Frozen(_) => None,
            Self::Live(buffer) => Some(Self::Frozen(Arc::from(buffer.read().as_str()))),
        }
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|text| fmt::Debug::fmt(text, f))
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.with(|a| other.with(|b| a == b))
    }
}

impl From<&str> for Text {
    fn from(text: &str) -> Self {
        Self::Frozen(Arc::from(text))
    }
}

impl From<String> for Text {
    fn from(text: String) -> Self {
        Self::Frozen(Arc::from(text))
    }
}

impl From<Arc<str>> for Text {
    fn from(text: Arc<str>) -> Self {
        Self::Frozen(text)
    }
}

impl From<SharedText> for Text {
    fn from(buffer: SharedText) -> Self {
        Self::Live(buffer)
    }
}

impl From<&SharedText> for Text {
    fn from(buffer: &SharedText) -> Self {
        Self::Live(buffer.clone())
    }
}

/// Blob contents: either frozen or a live caller buffer.
#[derive(Clone)]
pub enum Bytes {
    /// Immutable bytes.
    Frozen(Arc<[u8]>),
    /// A buffer the caller may still mutate.
    Live(SharedBytes),
}

impl Bytes {
    /// Calls `f` with the current contents.
    pub fn with<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        match self {
            Self::Frozen(bytes) => f(bytes),
            Self::Live(buffer) => f(buffer.read_recursive().as_slice()),
        }
    }
}

impl Snapshot for Bytes {
    fn snapshot(&self) -> Option<Self> {
        match self {
            Self::Frozen(_) => None,
            Self::Live(buffer) => Some(Self::Frozen(Arc::from(buffer.read().as_slice()))),
        }
    }
}

impl fmt::Debug for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|bytes| fmt::Debug::fmt(bytes, f))
    }
}

impl PartialEq for Bytes {
    fn eq(&self, other: &Self) -> bool {
        self.with(|a| other.with(|b| a == b))
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Frozen(Arc::from(bytes))
    }
}

impl From<&[u8]> for Bytes {
    fn from(bytes: &[u8]) -> Self {
        Self::Frozen(Arc::from(bytes))
    }
}

impl From<SharedBytes> for Bytes {
    fn from(buffer: SharedBytes) -> Self {
        Self::Live(buffer)
    }
}

impl From<&SharedBytes> for Bytes {
    fn from(buffer: &SharedBytes) -> Self {
        Self::Live(buffer.clone())
    }
}
