use std::collections::TryReserveError;
use std::fmt;

/// Errors reported by the fallible map operations.
///
/// Misusing a [`Cursor`](crate::Cursor) (stale, foreign, or past the end) is not an error
/// value: it is a contract violation and panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The key queried with `at`/`at_mut` is not in the map.
    KeyNotFound,
    /// Growing the storage block failed. The map is left exactly as it was.
    OutOfMemory(TryReserveError),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::KeyNotFound => write!(f, "key not found"),
            MapError::OutOfMemory(e) => write!(f, "storage allocation failed: {e}"),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::KeyNotFound => None,
            MapError::OutOfMemory(e) => Some(e),
        }
    }
}

impl From<TryReserveError> for MapError {
    fn from(e: TryReserveError) -> Self {
        MapError::OutOfMemory(e)
    }
}

/// Error returned by [`try_insert`](crate::SortedVectorMap::try_insert) when the storage could
/// not grow. The map is unchanged and the rejected pair is handed back.
#[derive(Clone, PartialEq, Eq)]
pub struct InsertError<K, V> {
    key: K,
    value: V,
    error: TryReserveError,
}

impl<K, V> InsertError<K, V> {
    pub(crate) fn new(key: K, value: V, error: TryReserveError) -> Self {
        Self { key, value, error }
    }

    /// The key that could not be inserted.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The value that could not be inserted.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The allocation failure behind this error.
    pub fn reserve_error(&self) -> &TryReserveError {
        &self.error
    }

    /// Returns the pair that could not be inserted.
    pub fn into_inner(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> fmt::Debug for InsertError<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsertError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<K, V> fmt::Display for InsertError<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "storage allocation failed: {}", self.error)
    }
}

impl<K, V> std::error::Error for InsertError<K, V> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl<K, V> From<InsertError<K, V>> for MapError {
    fn from(e: InsertError<K, V>) -> Self {
        MapError::OutOfMemory(e.error)
    }
}
