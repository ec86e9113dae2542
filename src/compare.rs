use std::marker::PhantomData;

/// A strict total order over `T`.
///
/// The map never asks keys whether they are equal. Two keys are treated as the same key iff
/// neither is `less` than the other, so any comparator that defines a consistent order works,
/// even when it disagrees with `T: Eq`.
pub trait Compare<T: ?Sized> {
    /// Returns true if `a` is ordered strictly before `b`.
    fn less(&self, a: &T, b: &T) -> bool;

    /// Returns true if `a` and `b` are equivalent under this order.
    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }
}

/// Natural ascending order from `Ord`. The default comparator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    #[inline(always)]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// Descending order from `Ord`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Reverse;

impl<T: Ord + ?Sized> Compare<T> for Reverse {
    #[inline(always)]
    fn less(&self, a: &T, b: &T) -> bool {
        b < a
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Orders whole entries by their key, using the map's key comparator.
///
/// Returned by [`SortedVectorMap::value_comp`](crate::SortedVectorMap::value_comp).
pub struct ValueCompare<'a, K, V, C> {
    cmp: &'a C,
    _marker: PhantomData<fn(&K, &V)>,
}

impl<'a, K, V, C: Compare<K>> ValueCompare<'a, K, V, C> {
    pub(crate) fn new(cmp: &'a C) -> Self {
        Self {
            cmp,
            _marker: PhantomData,
        }
    }

    /// Returns true if the entry `a` is ordered before the entry `b`.
    #[inline]
    pub fn less(&self, a: (&K, &V), b: (&K, &V)) -> bool {
        self.cmp.less(a.0, b.0)
    }
}

impl<K, V, C> Clone for ValueCompare<'_, K, V, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, C> Copy for ValueCompare<'_, K, V, C> {}
