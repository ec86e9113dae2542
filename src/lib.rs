//! An ordered map backed by a sorted vector of boxed entries.
//!
//! [`SortedVectorMap`] keeps its entries in one contiguous block of handles sorted by key.
//! Lookup is a binary search, inserts and removes shift the tail of the block. For small maps
//! this beats a tree on memory and locality, for large ones it does not.
//!
//! Positions are addressed with [`Cursor`]s, small copyable tokens checked against the map
//! they came from, so a cursor used after the map changed shape panics instead of reading the
//! wrong entry.
//!
//! The map is not synchronized. Share it across threads only behind a lock.

mod compare;
pub use compare::*;

mod cursor;
pub use cursor::Cursor;

mod error;
pub use error::{InsertError, MapError};

pub mod iterator;

mod map;
pub use map::*;

mod search;
mod storage;
