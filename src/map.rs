use std::borrow::Borrow;
use std::fmt;
use std::ops::Index;

use crate::compare::{Compare, Natural, ValueCompare};
use crate::cursor::{Cursor, MapId};
use crate::error::{InsertError, MapError};
use crate::iterator::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
use crate::search::{lower_bound, search, upper_bound};
use crate::storage::Storage;

/// An ordered map stored as a sorted vector of boxed entries.
///
/// Lookups are a binary search over a contiguous block of handles. Inserts and removes shift
/// the handles after the affected slot, so they are O(n), which is fine for the small maps this
/// is built for. Entries themselves never move once allocated.
///
/// Ordering comes from the comparator `C`, [`Natural`] by default. Keys are considered equal
/// when neither is less than the other.
///
/// # Example
/// ```rust
/// use sorted_vector_map::SortedVectorMap;
///
/// let mut map = SortedVectorMap::<u8, i32>::new();
/// for k in [b'3', b'1', 255, b'2'] {
///     map.insert(k, k as i32);
/// }
///
/// let keys = map.keys().copied().collect::<Vec<_>>();
/// assert_eq!(keys, vec![b'1', b'2', b'3', 255]);
///
/// map.clear();
/// assert!(map.is_empty());
/// ```
pub struct SortedVectorMap<K, V, C = Natural> {
    storage: Storage<K, V>,
    cmp: C,
    id: MapId,
    /// Bumped on every structural mutation, cursors from older generations are stale.
    generation: u64,
}

impl<K, V> SortedVectorMap<K, V> {
    /// Create a new empty map, nothing is allocated until the first insert.
    ///
    /// # Examples
    /// ```rust
    /// use sorted_vector_map::SortedVectorMap;
    ///
    /// let map = SortedVectorMap::<i32, i32>::new();
    ///
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 0);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }

    /// Create a new empty map with room for `capacity` entries. The map still grows past that.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, Natural)
    }
}

impl<K, V, C> SortedVectorMap<K, V, C> {
    /// Create a new empty map ordered by `cmp`.
    ///
    /// # Examples
    /// ```rust
    /// use sorted_vector_map::{Reverse, SortedVectorMap};
    ///
    /// let mut map = SortedVectorMap::with_comparator(Reverse);
    /// map.insert(1, ());
    /// map.insert(2, ());
    ///
    /// assert_eq!(map.keys().collect::<Vec<_>>(), vec![&2, &1]);
    /// ```
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            storage: Storage::new(),
            cmp,
            id: MapId::next(),
            generation: 0,
        }
    }

    /// Create a new empty map ordered by `cmp`, with room for `capacity` entries.
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        Self {
            storage: Storage::with_capacity(capacity),
            cmp,
            id: MapId::next(),
            generation: 0,
        }
    }

    /// Returns item count in the map
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns true if the map contains no item
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries the map holds before its storage has to grow.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// The key comparator.
    #[inline]
    pub fn key_comp(&self) -> &C {
        &self.cmp
    }

    /// A comparator over `(key, value)` entries, ordering them by key.
    #[inline]
    pub fn value_comp(&self) -> ValueCompare<'_, K, V, C>
    where
        C: Compare<K>,
    {
        ValueCompare::new(&self.cmp)
    }

    /// Cursor at the first entry, or the end if the map is empty.
    #[inline]
    pub fn begin(&self) -> Cursor {
        self.cursor_at(0)
    }

    /// Cursor at the end position, one past the last entry.
    #[inline]
    pub fn end(&self) -> Cursor {
        self.cursor_at(self.len())
    }

    /// Same as [`begin`](Self::begin). Cursors are read-only until passed to a `&mut` method,
    /// so the const and mutable flavours are the same cursor.
    #[inline]
    pub fn cbegin(&self) -> Cursor {
        self.begin()
    }

    /// Same as [`end`](Self::end).
    #[inline]
    pub fn cend(&self) -> Cursor {
        self.end()
    }

    /// Returns an iterator over the map, in key order.
    ///
    /// # Examples
    /// ```rust
    /// use sorted_vector_map::SortedVectorMap;
    ///
    /// let mut map = SortedVectorMap::<i32, i32>::new();
    /// map.insert(2, 3);
    /// map.insert(1, 2);
    ///
    /// let kvs = map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>();
    /// assert_eq!(kvs, vec![(1, 2), (2, 3)]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.storage.slots())
    }

    /// Returns an iterator with mutable access to the values.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(self.storage.slots_mut())
    }

    /// Returns an iterator over the keys, in order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values, in key order.
    #[inline]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable values, in key order.
    #[inline]
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Iterate the half open range `[first, last)`.
    ///
    /// # Panics
    /// if either cursor is not valid for this map, or `first` is after `last`.
    ///
    /// # Examples
    /// ```rust
    /// use sorted_vector_map::SortedVectorMap;
    ///
    /// let map = (0..10).map(|i| (i, i)).collect::<SortedVectorMap<_, _>>();
    /// let keys = map
    ///     .range(map.lower_bound(&3), map.upper_bound(&5))
    ///     .map(|(k, _)| *k)
    ///     .collect::<Vec<_>>();
    ///
    /// assert_eq!(keys, vec![3, 4, 5]);
    /// ```
    pub fn range(&self, first: Cursor, last: Cursor) -> Iter<'_, K, V> {
        let range = self.assert_range(&first, &last);
        Iter::new(&self.storage.slots()[range])
    }

    /// Returns the first key value pair.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.iter().next()
    }

    /// Returns the last key value pair.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.iter().next_back()
    }

    /// Remove the entry at `pos`. Returns a cursor to the entry that followed it (or the end).
    ///
    /// # Panics
    /// if `pos` is not valid for this map or is the end.
    ///
    /// # Examples
    /// ```rust
    /// use sorted_vector_map::SortedVectorMap;
    ///
    /// let mut map = (0..4).map(|i| (i, i)).collect::<SortedVectorMap<_, _>>();
    /// let next = map.erase(map.find(&1));
    ///
    /// assert_eq!(next.key(&map), &2);
    /// assert_eq!(map.len(), 3);
    /// ```
    pub fn erase(&mut self, pos: Cursor) -> Cursor {
        let idx = self.assert_entry(&pos);
        drop(self.storage.remove_at(idx));
        self.invalidate();
        self.cursor_at(idx)
    }

    /// Remove every entry in `[first, last)`. Returns a cursor to the entry that followed the
    /// range (or the end).
    ///
    /// # Panics
    /// if either cursor is not valid for this map, or `first` is after `last`.
    pub fn erase_range(&mut self, first: Cursor, last: Cursor) -> Cursor {
        let range = self.assert_range(&first, &last);
        let start = range.start;
        if self.storage.remove_range(range) > 0 {
            self.invalidate();
        }
        self.cursor_at(start)
    }

    /// Drop every entry. The storage is kept for reuse.
    ///
    /// # Examples
    /// ```rust
    /// use sorted_vector_map::SortedVectorMap;
    ///
    /// let mut map = SortedVectorMap::new();
    /// map.insert(1, "a");
    /// map.clear();
    ///
    /// assert!(map.is_empty());
    /// assert_eq!(map.begin(), map.end());
    /// ```
    pub fn clear(&mut self) {
        self.storage.clear();
        self.invalidate();
    }

    /// Exchange the contents of two maps in O(1).
    ///
    /// No entry is moved or cloned. Cursors follow their entries: a cursor made by `self`
    /// before the swap is valid for `other` afterwards.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    #[inline]
    pub(crate) fn storage(&self) -> &Storage<K, V> {
        &self.storage
    }

    #[inline]
    pub(crate) fn storage_mut(&mut self) -> &mut Storage<K, V> {
        &mut self.storage
    }

    #[inline]
    fn cursor_at(&self, idx: usize) -> Cursor {
        Cursor::new(self.id, self.generation, idx)
    }

    #[inline]
    fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Whether `cursor` was made by this map in its current generation.
    pub(crate) fn owns_cursor(&self, cursor: &Cursor) -> bool {
        cursor.map_id() == self.id
            && cursor.generation() == self.generation
            && cursor.index() <= self.len()
    }

    pub(crate) fn assert_cursor(&self, cursor: &Cursor) {
        assert!(cursor.map_id() == self.id, "cursor belongs to another map");
        assert!(
            cursor.generation() == self.generation,
            "cursor invalidated by a structural mutation of the map"
        );
        debug_assert!(cursor.index() <= self.len());
    }

    /// Assert `cursor` points to an entry and returns its index.
    pub(crate) fn assert_entry(&self, cursor: &Cursor) -> usize {
        self.assert_cursor(cursor);
        assert!(
            cursor.index() < self.len(),
            "cursor is at the end of the map"
        );
        cursor.index()
    }

    fn assert_range(&self, first: &Cursor, last: &Cursor) -> std::ops::Range<usize> {
        self.assert_cursor(first);
        self.assert_cursor(last);
        assert!(
            first.index() <= last.index(),
            "range start is after range end"
        );
        first.index()..last.index()
    }
}

impl<K, V, C: Compare<K>> SortedVectorMap<K, V, C> {
    /// Insert a key-value pair. If the key is already present the map is not changed and the
    /// given value is dropped.
    ///
    /// Returns a cursor to the entry for `key` and whether a new entry was inserted.
    ///
    /// # Panics
    /// if the storage can not grow, like `Vec::push`. See [`try_insert`](Self::try_insert).
    ///
    /// # Examples
    /// ```rust
    /// use sorted_vector_map::SortedVectorMap;
    ///
    /// let mut map = SortedVectorMap::<i32, i32>::new();
    /// let (cursor, inserted) = map.insert(1, 2);
    /// assert!(inserted);
    /// assert_eq!(cursor.value(&map), &2);
    ///
    /// let (cursor, inserted) = map.insert(1, 3);
    /// assert!(!inserted);
    /// assert_eq!(cursor.value(&map), &2);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Cursor, bool) {
        infallible(self.try_insert(key, value))
    }

    /// Same as [`insert`](Self::insert), but reports a failed storage growth instead of
    /// panicking. On error the map is unchanged, cursors taken before stay valid, and the
    /// rejected pair can be taken back with [`InsertError::into_inner`].
    ///
    /// # Examples
    /// ```rust
    /// use sorted_vector_map::SortedVectorMap;
    ///
    /// let mut map = SortedVectorMap::new();
    /// match map.try_insert(1, "a") {
    ///     Ok((cursor, inserted)) => {
    ///         assert!(inserted);
    ///         assert_eq!(cursor.value(&map), &"a");
    ///     }
    ///     Err(e) => {
    ///         let (key, value) = e.into_inner();
    ///         println!("no room for {key} => {value}");
    ///     }
    /// }
    /// ```
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(Cursor, bool), InsertError<K, V>> {
        match search(self.storage.slots(), &key, &self.cmp) {
            Ok(idx) => Ok((self.cursor_at(idx), false)),
            Err(idx) => {
                self.insert_at(idx, key, value)?;
                Ok((self.cursor_at(idx), true))
            }
        }
    }

    /// Insert using `hint` as the suggested position. If `key` belongs right before `hint` the
    /// search is skipped, otherwise this is a plain [`insert`](Self::insert).
    ///
    /// # Panics
    /// if `hint` is not valid for this map, or the storage can not grow.
    ///
    /// # Examples
    /// ```rust
    /// use sorted_vector_map::SortedVectorMap;
    ///
    /// let mut map = SortedVectorMap::new();
    /// for i in 0..10 {
    ///     map.insert_hint(map.end(), i, i);
    /// }
    ///
    /// assert_eq!(map.len(), 10);
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), (0..10).collect::<Vec<_>>());
    /// ```
    pub fn insert_hint(&mut self, hint: Cursor, key: K, value: V) -> (Cursor, bool) {
        self.assert_cursor(&hint);

        let idx = hint.index();
        let slots = self.storage.slots();
        let after_prev = idx == 0 || self.cmp.less(&slots[idx - 1].0, &key);
        let before_hint = idx == slots.len() || self.cmp.less(&key, &slots[idx].0);

        if after_prev && before_hint {
            infallible(self.insert_at(idx, key, value));
            (self.cursor_at(idx), true)
        } else {
            self.insert(key, value)
        }
    }

    /// Get a mut reference to the value for `key`, inserting `V::default()` first if the key is
    /// absent.
    ///
    /// # Panics
    /// if the storage can not grow.
    ///
    /// # Examples
    /// ```rust
    /// use sorted_vector_map::SortedVectorMap;
    ///
    /// let mut map = SortedVectorMap::<char, usize>::new();
    /// for c in "hello".chars() {
    ///     *map.get_or_insert_default(c) += 1;
    /// }
    ///
    /// assert_eq!(map[&'l'], 2);
    /// assert_eq!(map.keys().collect::<String>(), "ehlo");
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        infallible(self.try_get_or_insert_default(key))
    }

    /// Same as [`get_or_insert_default`](Self::get_or_insert_default), but reports a failed
    /// storage growth instead of panicking. The error carries `key` and the default value.
    pub fn try_get_or_insert_default(&mut self, key: K) -> Result<&mut V, InsertError<K, V>>
    where
        V: Default,
    {
        let idx = match search(self.storage.slots(), &key, &self.cmp) {
            Ok(idx) => idx,
            Err(idx) => {
                self.insert_at(idx, key, V::default())?;
                idx
            }
        };
        Ok(&mut self.storage.data_at_mut(idx).1)
    }

    /// Cursor at the entry for `key`, or [`end`](Self::end) if there is none.
    ///
    /// # Examples
    /// ```rust
    /// use sorted_vector_map::SortedVectorMap;
    ///
    /// let mut map = SortedVectorMap::new();
    /// map.insert("a", 1);
    ///
    /// assert_eq!(map.find("a").value(&map), &1);
    /// assert_eq!(map.find("b"), map.end());
    /// ```
    pub fn find<Q: ?Sized>(&self, key: &Q) -> Cursor
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        match search(self.storage.slots(), key, &self.cmp) {
            Ok(idx) => self.cursor_at(idx),
            Err(_) => self.end(),
        }
    }

    /// Cursor at the first entry whose key is not less than `key`.
    pub fn lower_bound<Q: ?Sized>(&self, key: &Q) -> Cursor
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        self.cursor_at(lower_bound(self.storage.slots(), key, &self.cmp))
    }

    /// Cursor at the first entry whose key is greater than `key`.
    pub fn upper_bound<Q: ?Sized>(&self, key: &Q) -> Cursor
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        self.cursor_at(upper_bound(self.storage.slots(), key, &self.cmp))
    }

    /// The half open range of entries matching `key`, `[lower_bound, upper_bound)`. Holds one
    /// entry at most since keys are unique.
    ///
    /// # Examples
    /// ```rust
    /// use sorted_vector_map::SortedVectorMap;
    ///
    /// let map = [('a', 0xa), ('c', 0xc), ('e', 0xe)]
    ///     .into_iter()
    ///     .collect::<SortedVectorMap<_, _>>();
    ///
    /// let (first, last) = map.equal_range(&'c');
    /// assert_eq!(map.range(first, last).collect::<Vec<_>>(), vec![(&'c', &0xc)]);
    ///
    /// let (first, last) = map.equal_range(&'d');
    /// assert_eq!(first, last);
    /// ```
    pub fn equal_range<Q: ?Sized>(&self, key: &Q) -> (Cursor, Cursor)
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Number of entries matching `key`, 0 or 1.
    pub fn count<Q: ?Sized>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        usize::from(self.contains_key(key))
    }

    /// Returns true if the map has an entry for `key`.
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        search(self.storage.slots(), key, &self.cmp).is_ok()
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    /// ```rust
    /// use sorted_vector_map::SortedVectorMap;
    ///
    /// let mut map = SortedVectorMap::<i32, i32>::new();
    /// map.insert(1, 2);
    ///
    /// assert_eq!(map.get(&1).unwrap(), &2);
    /// assert!(map.get(&2).is_none());
    /// ```
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the stored key and value for `key`.
    pub fn get_key_value<Q: ?Sized>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        let idx = search(self.storage.slots(), key, &self.cmp).ok()?;
        let kv = self.storage.data_at(idx);
        Some((&kv.0, &kv.1))
    }

    /// Returns a mut reference to the value corresponding to the key.
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        let idx = search(self.storage.slots(), key, &self.cmp).ok()?;
        Some(&mut self.storage.data_at_mut(idx).1)
    }

    /// Returns the value for `key`, or [`MapError::KeyNotFound`].
    ///
    /// # Examples
    /// ```rust
    /// use sorted_vector_map::{MapError, SortedVectorMap};
    ///
    /// let mut map = SortedVectorMap::new();
    /// map.insert(1, "a");
    ///
    /// assert_eq!(map.at(&1), Ok(&"a"));
    /// assert_eq!(map.at(&2), Err(MapError::KeyNotFound));
    /// ```
    pub fn at<Q: ?Sized>(&self, key: &Q) -> Result<&V, MapError>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        self.get(key).ok_or(MapError::KeyNotFound)
    }

    /// Returns the mutable value for `key`, or [`MapError::KeyNotFound`].
    pub fn at_mut<Q: ?Sized>(&mut self, key: &Q) -> Result<&mut V, MapError>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        self.get_mut(key).ok_or(MapError::KeyNotFound)
    }

    /// Remove the entry for `key`. Returns how many entries were removed, 0 or 1.
    pub fn erase_key<Q: ?Sized>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        usize::from(self.remove_entry(key).is_some())
    }

    /// Removes a key from the map, returning the value at the key if the key was previously in
    /// the map.
    ///
    /// # Examples
    /// ```rust
    /// use sorted_vector_map::SortedVectorMap;
    ///
    /// let mut map = SortedVectorMap::<i32, i32>::new();
    /// map.insert(1, 2);
    ///
    /// assert_eq!(map.remove(&1), Some(2));
    /// assert!(map.remove(&2).is_none());
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value.
    pub fn remove_entry<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        let idx = search(self.storage.slots(), key, &self.cmp).ok()?;
        let kv = self.storage.remove_at(idx);
        self.invalidate();
        Some(kv)
    }

    fn insert_at(&mut self, idx: usize, key: K, value: V) -> Result<(), InsertError<K, V>> {
        self.storage.try_insert_at(idx, key, value)?;
        self.invalidate();
        debug_assert!(self.is_sorted_around(idx));
        Ok(())
    }

    fn is_sorted_around(&self, idx: usize) -> bool {
        let slots = self.storage.slots();
        let before = idx == 0 || self.cmp.less(&slots[idx - 1].0, &slots[idx].0);
        let after = idx + 1 >= slots.len() || self.cmp.less(&slots[idx].0, &slots[idx + 1].0);
        before && after
    }
}

/// Storage growth only fails when the allocator does, treat it the way `Vec` does.
fn infallible<T, E: fmt::Display>(r: Result<T, E>) -> T {
    match r {
        Ok(t) => t,
        Err(e) => panic!("{e}"),
    }
}

impl<K, V, C: Default> Default for SortedVectorMap<K, V, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for SortedVectorMap<K, V, C> {
    /// Deep clone. The clone is a new map: cursors of `self` are not valid for it.
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            cmp: self.cmp.clone(),
            id: MapId::next(),
            generation: 0,
        }
    }

    /// Replace every entry of `self` with clones from `source`. The old entries are dropped and
    /// all cursors of `self` are invalidated.
    fn clone_from(&mut self, source: &Self) {
        self.storage = source.storage.clone();
        self.cmp = source.cmp.clone();
        self.invalidate();
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for SortedVectorMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for SortedVectorMap<K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for SortedVectorMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, Q: ?Sized, V, C> Index<&Q> for SortedVectorMap<K, V, C>
where
    K: Borrow<Q>,
    C: Compare<K> + Compare<Q>,
{
    type Output = V;

    /// # Panics
    /// if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(v) => v,
            None => panic!("no entry found for key"),
        }
    }
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for SortedVectorMap<K, V, C> {
    /// Insert every pair in order. For a key repeated in `iter` the first value is kept, the
    /// same as calling `insert` for each pair.
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, C: Compare<K> + Default> FromIterator<(K, V)> for SortedVectorMap<K, V, C> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, C> IntoIterator for SortedVectorMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.storage.into_slots())
    }
}

impl<'a, K, V, C> IntoIterator for &'a SortedVectorMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut SortedVectorMap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
