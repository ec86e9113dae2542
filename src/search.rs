use std::borrow::Borrow;

use crate::compare::Compare;
use crate::storage::Slot;

/// Binary search `k` in sorted `slots`, returns same result shape as `slice::binary_search`:
/// `Ok(idx)` if found, `Err(idx)` with the insertion point otherwise.
///
/// Only strict-less comparisons are made. A slot matches when neither side is less.
pub(crate) fn search<K, V, Q, C>(slots: &[Slot<K, V>], k: &Q, cmp: &C) -> Result<usize, usize>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Compare<Q>,
{
    let mut lo = 0;
    let mut hi = slots.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let pivot: &Q = slots[mid].0.borrow();
        if cmp.less(pivot, k) {
            lo = mid + 1;
        } else if cmp.less(k, pivot) {
            hi = mid;
        } else {
            return Ok(mid);
        }
    }
    Err(lo)
}

/// First slot whose key is not less than `k`.
#[inline]
pub(crate) fn lower_bound<K, V, Q, C>(slots: &[Slot<K, V>], k: &Q, cmp: &C) -> usize
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Compare<Q>,
{
    match search(slots, k, cmp) {
        Ok(idx) | Err(idx) => idx,
    }
}

/// First slot whose key is greater than `k`. Keys are unique, so this is at most one step
/// past the lower bound.
#[inline]
pub(crate) fn upper_bound<K, V, Q, C>(slots: &[Slot<K, V>], k: &Q, cmp: &C) -> usize
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Compare<Q>,
{
    let mut idx = lower_bound(slots, k, cmp);
    while idx < slots.len() {
        let candidate: &Q = slots[idx].0.borrow();
        if !cmp.equivalent(candidate, k) {
            break;
        }
        idx += 1;
    }
    idx
}
