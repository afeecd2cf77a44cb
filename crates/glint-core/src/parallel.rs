//! Threshold-based dispatch between sequential and rayon scans.
//!
//! Small buffers stay on the calling thread; the per-pixel work is too
//! cheap to amortize rayon's scheduling below a few tens of thousands of
//! pixels.

use rayon::prelude::*;

/// Fold every element into an accumulator, splitting across threads when
/// `data.len() >= threshold`.
///
/// `reduce_fn` must be associative and commutative with `init()` as its
/// identity, so the result does not depend on how rayon partitions `data`.
pub fn fold_reduce<T, A, I, F, R>(
    data: &[T],
    threshold: usize,
    init: I,
    fold_fn: F,
    reduce_fn: R,
) -> A
where
    T: Sync,
    A: Send,
    I: Fn() -> A + Sync + Send,
    F: Fn(A, &T) -> A + Sync + Send,
    R: Fn(A, A) -> A + Sync + Send,
{
    if data.len() >= threshold {
        data.par_iter()
            .fold(&init, &fold_fn)
            .reduce(&init, &reduce_fn)
    } else {
        data.iter().fold(init(), fold_fn)
    }
}

/// Map every element into a new vector, preserving order.
pub fn map_collect<T, U, F>(data: &[T], threshold: usize, map_fn: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    if data.len() >= threshold {
        data.par_iter().map(map_fn).collect()
    } else {
        data.iter().map(map_fn).collect()
    }
}
