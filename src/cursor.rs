use std::sync::atomic::{AtomicU64, Ordering};

use crate::SortedVectorMap;

/// Identity of one map instance, so a cursor can tell which map it was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct MapId(u64);

impl MapId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// `Cursor` points to a slot of a [`SortedVectorMap`]. Not like Iterator, it can move to next or
/// prev, and it does not borrow the map: every access takes the map as an argument.
///
/// A cursor is either at an entry or at the end position (one past the last entry). It is
/// only usable with the map that created it, and only until that map's next structural
/// mutation (an insert that adds an entry, any erase, `clear`, `clone_from`). Using it after
/// that panics. Updating a value through `value_mut`/`get_mut` does not invalidate cursors.
///
/// There is no separate read-only cursor: the same cursor gives shared access through `&map`
/// and mutable access through `&mut map`.
///
/// # Example
/// ```rust
/// use sorted_vector_map::SortedVectorMap;
///
/// let mut map = SortedVectorMap::new();
/// map.insert(1, "a");
/// map.insert(2, "b");
///
/// let cursor = map.begin();
/// assert_eq!(cursor.key(&map), &1);
///
/// let cursor = cursor.next(&map);
/// *cursor.value_mut(&mut map) = "B";
/// assert_eq!(cursor.get(&map), (&2, &"B"));
///
/// assert!(cursor.next(&map).is_end(&map));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Cursor {
    map: MapId,
    /// Map generation at creation time. A mismatch means the slot may hold another entry now.
    generation: u64,
    idx: usize,
}

impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map && self.idx == other.idx
    }
}

impl Eq for Cursor {}

impl Cursor {
    #[inline(always)]
    pub(crate) fn new(map: MapId, generation: u64, idx: usize) -> Self {
        Self {
            map,
            generation,
            idx,
        }
    }

    #[inline(always)]
    pub(crate) fn map_id(&self) -> MapId {
        self.map
    }

    #[inline(always)]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Position of the cursor, `0` for the first entry, `map.len()` for the end.
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.idx
    }

    /// Whether this cursor can still be used with `map`.
    pub fn is_valid<K, V, C>(&self, map: &SortedVectorMap<K, V, C>) -> bool {
        map.owns_cursor(self)
    }

    /// Whether this cursor is at the end position of `map`.
    ///
    /// # Panics
    /// if the cursor is not valid for `map`.
    pub fn is_end<K, V, C>(&self, map: &SortedVectorMap<K, V, C>) -> bool {
        map.assert_cursor(self);
        self.idx == map.len()
    }

    /// Get the `Cursor` points to the next slot, which may be the end.
    ///
    /// # Panics
    /// if the cursor is not valid for `map` or already at the end.
    pub fn next<K, V, C>(self, map: &SortedVectorMap<K, V, C>) -> Self {
        let idx = map.assert_entry(&self);
        Self { idx: idx + 1, ..self }
    }

    /// Get the `Cursor` points to the prev entry.
    ///
    /// # Panics
    /// if the cursor is not valid for `map` or at the first slot.
    pub fn prev<K, V, C>(self, map: &SortedVectorMap<K, V, C>) -> Self {
        map.assert_cursor(&self);
        assert!(self.idx > 0, "cursor moved before the first entry");
        Self {
            idx: self.idx - 1,
            ..self
        }
    }

    /// Get the key this cursor points to.
    ///
    /// # Panics
    /// if the cursor is not valid for `map` or at the end.
    pub fn key<'b, K, V, C>(&self, map: &'b SortedVectorMap<K, V, C>) -> &'b K {
        self.get(map).0
    }

    /// Get the value this cursor points to.
    ///
    /// # Panics
    /// if the cursor is not valid for `map` or at the end.
    pub fn value<'b, K, V, C>(&self, map: &'b SortedVectorMap<K, V, C>) -> &'b V {
        self.get(map).1
    }

    /// Get the key value pair this cursor points to.
    ///
    /// # Panics
    /// if the cursor is not valid for `map` or at the end.
    pub fn get<'b, K, V, C>(&self, map: &'b SortedVectorMap<K, V, C>) -> (&'b K, &'b V) {
        let idx = map.assert_entry(self);
        let kv = map.storage().data_at(idx);
        (&kv.0, &kv.1)
    }

    /// Get a mut reference to the value this cursor points to. The key stays immutable, so
    /// the map order can't be broken through a cursor.
    ///
    /// # Panics
    /// if the cursor is not valid for `map` or at the end.
    pub fn value_mut<'b, K, V, C>(&self, map: &'b mut SortedVectorMap<K, V, C>) -> &'b mut V {
        let idx = map.assert_entry(self);
        &mut map.storage_mut().data_at_mut(idx).1
    }
}

#[cfg(test)]
mod tests {
    use rand::seq::SliceRandom;

    use crate::SortedVectorMap;

    fn create_test_map(n: i64) -> SortedVectorMap<i64, i64> {
        let mut keys = (0..n).collect::<Vec<_>>();
        keys.shuffle(&mut rand::thread_rng());

        let mut map = SortedVectorMap::new();
        for k in keys {
            map.insert(k, k * 10);
        }
        map
    }

    #[test]
    fn test_cursor_next() {
        let map = create_test_map(100);

        let mut cursor = map.begin();
        let mut keys = vec![];
        while !cursor.is_end(&map) {
            let (k, v) = cursor.get(&map);
            assert_eq!(*v, k * 10);
            keys.push(*k);
            cursor = cursor.next(&map);
        }

        assert_eq!(keys, (0..100).collect::<Vec<_>>());
        assert_eq!(cursor, map.end());
    }

    #[test]
    fn test_cursor_prev() {
        let map = create_test_map(50);

        let mut cursor = map.end();
        let mut keys = vec![];
        while cursor != map.begin() {
            cursor = cursor.prev(&map);
            keys.push(*cursor.key(&map));
        }

        assert_eq!(keys, (0..50).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_cursor_equality_ignores_generation() {
        let mut map = create_test_map(3);
        let a = map.find(&1);
        map.insert(1, 0);
        let b = map.find(&1);
        // inserting an existing key is not structural
        assert!(a.is_valid(&map));
        assert_eq!(a, b);

        let other = create_test_map(3);
        assert_ne!(map.find(&1), other.find(&1));
    }

    #[test]
    fn test_value_mut_keeps_cursor_valid() {
        let mut map = create_test_map(10);
        let cursor = map.find(&4);

        *cursor.value_mut(&mut map) += 1;
        assert!(cursor.is_valid(&map));
        assert_eq!(cursor.value(&map), &41);
        assert_eq!(map.get(&4), Some(&41));
    }

    #[test]
    fn test_structural_mutation_invalidates() {
        let mut map = create_test_map(10);

        let before_insert = map.find(&3);
        map.insert(100, 0);
        assert!(!before_insert.is_valid(&map));

        let before_erase = map.find(&3);
        map.erase_key(&5);
        assert!(!before_erase.is_valid(&map));

        let before_clear = map.begin();
        map.clear();
        assert!(!before_clear.is_valid(&map));
    }

    #[test]
    #[should_panic(expected = "invalidated")]
    fn test_stale_cursor_panics() {
        let mut map = create_test_map(10);
        let cursor = map.find(&3);
        map.remove(&3);
        cursor.key(&map);
    }

    #[test]
    #[should_panic(expected = "another map")]
    fn test_foreign_cursor_panics() {
        let map = create_test_map(10);
        let other = create_test_map(10);
        map.begin().key(&other);
    }

    #[test]
    #[should_panic(expected = "end")]
    fn test_deref_end_panics() {
        let map = create_test_map(10);
        map.end().value(&map);
    }

    #[test]
    #[should_panic(expected = "before the first")]
    fn test_prev_of_begin_panics() {
        let map = create_test_map(10);
        map.begin().prev(&map);
    }
}
