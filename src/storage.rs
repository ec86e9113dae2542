use std::collections::TryReserveError;
use std::ops::Range;

use crate::error::InsertError;

/// One owned entry. The storage block moves these handles around, never the entries.
pub(crate) type Slot<K, V> = Box<(K, V)>;

/// Capacity after one growth step: `max(2, cap * 3 / 2)`.
#[inline]
pub(crate) const fn next_capacity(cap: usize) -> usize {
    let grown = cap.saturating_add(cap / 2);
    if grown < 2 {
        2
    } else {
        grown
    }
}

/// Contiguous block of entry handles, sorted by the owning map.
///
/// `capacity` is the logical capacity the growth policy works with. The backing `Vec` always
/// has at least that much room, so inserting below `capacity` never reallocates.
#[derive(Debug)]
pub(crate) struct Storage<K, V> {
    slots: Vec<Slot<K, V>>,
    capacity: usize,
    /// Growth beyond this capacity fails as if the allocator refused it.
    #[cfg(test)]
    growth_limit: Option<usize>,
}

impl<K, V> Storage<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            capacity: 0,
            #[cfg(test)]
            growth_limit: None,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            #[cfg(test)]
            growth_limit: None,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(crate) fn slots(&self) -> &[Slot<K, V>] {
        &self.slots
    }

    #[inline]
    pub(crate) fn slots_mut(&mut self) -> &mut [Slot<K, V>] {
        &mut self.slots
    }

    #[inline]
    pub(crate) fn data_at(&self, idx: usize) -> &(K, V) {
        &self.slots[idx]
    }

    #[inline]
    pub(crate) fn data_at_mut(&mut self, idx: usize) -> &mut (K, V) {
        &mut self.slots[idx]
    }

    /// Make sure one more entry fits, growing by the policy if the block is full.
    ///
    /// On error nothing has changed.
    pub(crate) fn reserve_one(&mut self) -> Result<(), TryReserveError> {
        if self.slots.len() < self.capacity {
            return Ok(());
        }
        self.grow_to(next_capacity(self.capacity))
    }

    /// Reallocate to `new_capacity`. The old block stays in place until the new one exists.
    pub(crate) fn grow_to(&mut self, new_capacity: usize) -> Result<(), TryReserveError> {
        debug_assert!(new_capacity >= self.slots.len());

        let additional = new_capacity - self.slots.len();
        #[cfg(test)]
        let additional = match self.growth_limit {
            Some(limit) if new_capacity > limit => usize::MAX,
            _ => additional,
        };
        if let Err(e) = self.slots.try_reserve_exact(additional) {
            tracing::debug!(
                target: "sorted_vector_map::storage",
                len = self.slots.len(),
                capacity = self.capacity,
                requested = new_capacity,
                "storage growth failed"
            );
            return Err(e);
        }

        tracing::trace!(
            target: "sorted_vector_map::storage",
            len = self.slots.len(),
            old = self.capacity,
            new = new_capacity,
            "grow storage"
        );
        self.capacity = new_capacity;
        Ok(())
    }

    /// Insert a new entry at `idx`, shifting `idx..` one slot towards the tail.
    ///
    /// Growth, if needed, happens before the entry is allocated. On failure the block is
    /// untouched and `key`/`value` come back in the error.
    pub(crate) fn try_insert_at(
        &mut self,
        idx: usize,
        key: K,
        value: V,
    ) -> Result<(), InsertError<K, V>> {
        debug_assert!(idx <= self.slots.len());
        if let Err(error) = self.reserve_one() {
            return Err(InsertError::new(key, value, error));
        }
        self.slots.insert(idx, Box::new((key, value)));
        debug_assert!(self.slots.len() <= self.capacity);
        Ok(())
    }

    /// Remove the entry at `idx`, compacting the tail left by one.
    pub(crate) fn remove_at(&mut self, idx: usize) -> (K, V) {
        *self.slots.remove(idx)
    }

    /// Drop every entry in `range`, compacting the tail. Returns the number removed.
    pub(crate) fn remove_range(&mut self, range: Range<usize>) -> usize {
        let count = range.len();
        self.slots.drain(range);
        count
    }

    /// Drop every entry, keeping the block.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }

    pub(crate) fn into_slots(self) -> Vec<Slot<K, V>> {
        self.slots
    }

    #[cfg(test)]
    pub(crate) fn set_growth_limit(&mut self, limit: Option<usize>) {
        self.growth_limit = limit;
    }
}

impl<K: Clone, V: Clone> Clone for Storage<K, V> {
    /// Deep clone into a block sized to the entry count.
    fn clone(&self) -> Self {
        let slots: Vec<Slot<K, V>> = self.slots.to_vec();
        let capacity = slots.len();
        Self {
            slots,
            capacity,
            #[cfg(test)]
            growth_limit: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;

    #[derive(Clone)]
    struct TestValue {
        counter: Rc<AtomicU64>,
    }

    impl Drop for TestValue {
        fn drop(&mut self) {
            self.counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn keys(storage: &Storage<i32, i32>) -> Vec<i32> {
        storage.slots().iter().map(|s| s.0).collect()
    }

    #[test]
    fn test_next_capacity() {
        assert_eq!(next_capacity(0), 2);
        assert_eq!(next_capacity(1), 2);
        assert_eq!(next_capacity(2), 3);
        assert_eq!(next_capacity(3), 4);
        assert_eq!(next_capacity(4), 6);
        assert_eq!(next_capacity(6), 9);
        assert_eq!(next_capacity(9), 13);
        assert_eq!(next_capacity(usize::MAX), usize::MAX);
    }

    #[test_log::test]
    fn test_growth_sequence() {
        let mut storage = Storage::<i32, i32>::new();
        assert_eq!(storage.capacity(), 0);

        let mut capacities = vec![];
        for i in 0..13 {
            let len = storage.len();
            storage.try_insert_at(len, i, i).unwrap();
            capacities.push(storage.capacity());
        }

        assert_eq!(
            capacities,
            vec![2, 2, 3, 4, 6, 6, 9, 9, 9, 13, 13, 13, 13]
        );
        assert_eq!(keys(&storage), (0..13).collect::<Vec<_>>());
    }

    #[test]
    fn test_presized_still_grows() {
        let mut storage = Storage::<i32, i32>::with_capacity(3);
        assert_eq!(storage.capacity(), 3);
        for i in 0..3 {
            storage.try_insert_at(0, i, i).unwrap();
        }
        assert_eq!(storage.capacity(), 3);

        storage.try_insert_at(3, 10, 10).unwrap();
        assert_eq!(storage.capacity(), 4);
        assert_eq!(keys(&storage), vec![2, 1, 0, 10]);
    }

    #[test]
    fn test_insert_shifts_tail() {
        let mut storage = Storage::<i32, i32>::with_capacity(8);
        for (idx, k) in [(0, 10), (1, 30), (1, 20), (0, 5), (4, 40)] {
            storage.try_insert_at(idx, k, k * 2).unwrap();
        }
        assert_eq!(keys(&storage), vec![5, 10, 20, 30, 40]);
        assert_eq!(storage.data_at(2), &(20, 40));

        storage.data_at_mut(2).1 = 0;
        assert_eq!(storage.data_at(2), &(20, 0));
    }

    #[test]
    fn test_failed_growth_leaves_storage_untouched() {
        let mut storage = Storage::<i32, i32>::with_capacity(2);
        storage.try_insert_at(0, 1, 1).unwrap();
        storage.try_insert_at(1, 2, 2).unwrap();

        let first = &*storage.slots()[0] as *const (i32, i32);

        assert!(storage.grow_to(usize::MAX).is_err());

        assert_eq!(storage.len(), 2);
        assert_eq!(storage.capacity(), 2);
        assert_eq!(keys(&storage), vec![1, 2]);
        // entries were not moved or cloned
        assert_eq!(&*storage.slots()[0] as *const (i32, i32), first);
    }

    #[test]
    fn test_failed_insert_returns_pair() {
        let mut storage = Storage::<i32, String>::with_capacity(1);
        storage.try_insert_at(0, 1, "one".to_string()).unwrap();
        storage.set_growth_limit(Some(1));

        let err = storage.try_insert_at(1, 2, "two".to_string()).unwrap_err();
        assert_eq!(err.key(), &2);
        assert_eq!(err.into_inner(), (2, "two".to_string()));

        assert_eq!(storage.len(), 1);
        assert_eq!(storage.capacity(), 1);
        assert_eq!(storage.data_at(0), &(1, "one".to_string()));

        storage.set_growth_limit(None);
        storage.try_insert_at(1, 2, "two".to_string()).unwrap();
        assert_eq!(storage.capacity(), 2);
    }

    #[test]
    fn test_growth_moves_handles_not_entries() {
        let mut storage = Storage::<i32, i32>::new();
        storage.try_insert_at(0, 1, 1).unwrap();
        storage.try_insert_at(1, 3, 3).unwrap();
        let first = &*storage.slots()[0] as *const (i32, i32);
        let second = &*storage.slots()[1] as *const (i32, i32);

        // full, so this reallocates the block
        storage.try_insert_at(1, 2, 2).unwrap();
        assert_eq!(storage.capacity(), 3);
        assert_eq!(&*storage.slots()[0] as *const (i32, i32), first);
        assert_eq!(&*storage.slots()[2] as *const (i32, i32), second);
    }

    #[test]
    fn test_remove_and_clear_drop_entries() {
        let counter = Rc::new(AtomicU64::new(0));
        let mut storage = Storage::<i32, TestValue>::new();
        for i in 0..10 {
            let value = TestValue {
                counter: counter.clone(),
            };
            storage.try_insert_at(i as usize, i, value).unwrap();
        }
        let capacity = storage.capacity();

        let (k, v) = storage.remove_at(3);
        assert_eq!(k, 3);
        drop(v);
        assert_eq!(counter.load(Ordering::Relaxed), 1);

        assert_eq!(storage.remove_range(2..5), 3);
        assert_eq!(counter.load(Ordering::Relaxed), 4);
        assert_eq!(storage.len(), 6);

        storage.clear();
        assert_eq!(counter.load(Ordering::Relaxed), 10);
        assert_eq!(storage.len(), 0);
        assert_eq!(storage.capacity(), capacity);
    }

    #[test]
    fn test_clone_is_deep_and_compact() {
        let mut storage = Storage::<i32, String>::with_capacity(16);
        for i in 0..4 {
            storage.try_insert_at(i as usize, i, i.to_string()).unwrap();
        }

        let mut cloned = storage.clone();
        assert_eq!(cloned.capacity(), 4);
        assert_eq!(cloned.len(), 4);

        cloned.data_at_mut(0).1.push('!');
        assert_eq!(storage.data_at(0).1, "0");
        assert_eq!(cloned.data_at(0).1, "0!");
        assert_ne!(
            &*storage.slots()[1] as *const (i32, String),
            &*cloned.slots()[1] as *const (i32, String)
        );
    }
}
