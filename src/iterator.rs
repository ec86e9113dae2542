use std::iter::FusedIterator;

use crate::storage::Slot;

/// A borrowed iterator over the entries of a map, in ascending key order.
pub struct Iter<'a, K, V> {
    inner: std::slice::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(slots: &'a [Slot<K, V>]) -> Self {
        Self {
            inner: slots.iter(),
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|kv| (&kv.0, &kv.1))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|kv| (&kv.0, &kv.1))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// A borrowed iterator with mutable access to the values.
pub struct IterMut<'a, K, V> {
    inner: std::slice::IterMut<'a, Slot<K, V>>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(slots: &'a mut [Slot<K, V>]) -> Self {
        Self {
            inner: slots.iter_mut(),
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|kv| {
            let kv = &mut **kv;
            (&kv.0, &mut kv.1)
        })
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|kv| {
            let kv = &mut **kv;
            (&kv.0, &mut kv.1)
        })
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An owning iterator, entries are unboxed as they are yielded.
pub struct IntoIter<K, V> {
    inner: std::vec::IntoIter<Slot<K, V>>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(slots: Vec<Slot<K, V>>) -> Self {
        Self {
            inner: slots.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|kv| *kv)
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|kv| *kv)
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

/// Iterator over the keys of a map.
pub struct Keys<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Iterator over the values of a map.
pub struct Values<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

/// Iterator over mutable references to the values of a map.
pub struct ValuesMut<'a, K, V> {
    pub(crate) inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::sync::atomic::{AtomicU64, Ordering};

    use crate::SortedVectorMap;

    #[derive(Clone)]
    struct TestValue {
        counter: Rc<AtomicU64>,
    }

    impl Drop for TestValue {
        fn drop(&mut self) {
            self.counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_iter_double_ended() {
        let map = (0..100).map(|i| (i, i * 2)).collect::<SortedVectorMap<_, _>>();
        let kvs = map.iter().collect::<Vec<_>>();
        let rev_kvs = map.iter().rev().collect::<Vec<_>>();

        assert_eq!(kvs.len(), 100);
        assert_eq!(map.iter().len(), 100);
        assert_eq!(rev_kvs, kvs.iter().rev().cloned().collect::<Vec<_>>());
    }

    #[test]
    fn test_iter_mut() {
        let mut map = (0..10).map(|i| (i, i)).collect::<SortedVectorMap<_, _>>();
        for (k, v) in map.iter_mut() {
            *v += k;
        }
        for v in map.values_mut().rev().take(1) {
            *v = -1;
        }

        let values = map.values().copied().collect::<Vec<_>>();
        assert_eq!(values, vec![0, 2, 4, 6, 8, 10, 12, 14, 16, -1]);
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_into_iter_collect() {
        let counter = Rc::new(AtomicU64::new(0));
        let mut map = SortedVectorMap::new();
        for i in 0..10 {
            map.insert(
                i,
                TestValue {
                    counter: counter.clone(),
                },
            );
        }
        let items = map.into_iter().collect::<Vec<_>>();
        assert_eq!(items.len(), 10);
        assert_eq!(counter.load(Ordering::Relaxed), 0);
        drop(items);

        assert_eq!(counter.load(Ordering::Relaxed), 10);
    }

    #[test]
    fn test_into_iter_drop() {
        let counter = Rc::new(AtomicU64::new(0));
        let mut map = SortedVectorMap::new();
        for i in 0..10 {
            map.insert(
                i,
                TestValue {
                    counter: counter.clone(),
                },
            );
        }
        let mut iter = map.into_iter();
        iter.next();
        drop(iter);

        assert_eq!(counter.load(Ordering::Relaxed), 10);
    }

    #[test]
    fn test_into_iter_double_ended() {
        let map = (0..10).map(|i| (i, ())).collect::<SortedVectorMap<_, _>>();
        let items = map.into_iter().rev().map(|(k, _v)| k).collect::<Vec<_>>();
        assert_eq!(items, (0..10).rev().collect::<Vec<_>>());
    }
}
