//! The Pool subsystem (§5 "Pool discipline", §9 Design Notes).
//!
//! The source's hand-rolled LIFO arrays exist to avoid reallocating heap
//! buffers in hot loops, at the cost of a whole class of aliasing and
//! double-release bugs that the source catches only in debug builds. Here
//! we keep the pool — it is still load-bearing for performance — but make
//! "a borrowed element's lifetime is tied to a scope" (§9) a property the
//! borrow checker enforces rather than a discipline callers must remember.
//! [`PoolGuard`] can still be released early with [`PoolGuard::release`]
//! (mirroring the source's explicit `release` call so a caller can hand an
//! element back before its scope ends), and an unreleased guard returns
//! itself automatically on `Drop`. Because a guard can only be dropped
//! once, "double release" is not a runtime error class here: the type
//! system removes it.

use std::cell::RefCell;

/// A fixed-capacity LIFO of pre-allocated elements of type `T`.
///
/// Single-threaded per §5 ("not safe to share across threads"); `Pool` is
/// neither `Sync` nor does it attempt to be.
pub struct Pool<T> {
    free: RefCell<Vec<T>>,
    capacity: usize,
}

impl<T: Default> Pool<T> {
    /// Create an empty pool that will retain at most `capacity` released
    /// elements; released elements beyond capacity are simply dropped.
    pub fn new(capacity: usize) -> Self {
        Pool { free: RefCell::new(Vec::with_capacity(capacity)), capacity }
    }

    /// Acquire a blank element. The returned value's contents may be
    /// leftover data from a previous use (`Default::default()` only on a
    /// cold pool); callers must initialize before first read, matching
    /// §5's "every operation must either initialize the result before
    /// first read or use an explicit zero-init constructor".
    pub fn acquire(&self) -> PoolGuard<'_, T> {
        let value = self.free.borrow_mut().pop().unwrap_or_default();
        PoolGuard { pool: self, value: Some(value) }
    }

    fn release_raw(&self, value: T) {
        let mut free = self.free.borrow_mut();
        if free.len() < self.capacity {
            free.push(value);
        }
        // else: capacity exhausted, the element is dropped (§5).
    }

    /// Number of elements currently sitting in the free list (test/debug aid).
    pub fn len_free(&self) -> usize {
        self.free.borrow().len()
    }
}

/// A borrowed pool element, exclusively owned by the caller until released
/// or dropped.
pub struct PoolGuard<'a, T> {
    pool: &'a Pool<T>,
    value: Option<T>,
}

impl<'a, T> PoolGuard<'a, T> {
    /// Return the element to its pool now rather than waiting for `Drop`.
    pub fn release(mut self) {
        if let Some(v) = self.value.take() {
            self.pool.release_raw(v);
        }
    }
}

impl<'a, T> std::ops::Deref for PoolGuard<'a, T> {
    type Target = T;
    fn deref(&self) -> &T {
        self.value.as_ref().expect("PoolGuard used after release")
    }
}

impl<'a, T> std::ops::DerefMut for PoolGuard<'a, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.value.as_mut().expect("PoolGuard used after release")
    }
}

impl<'a, T> Drop for PoolGuard<'a, T> {
    fn drop(&mut self) {
        if let Some(v) = self.value.take() {
            self.pool.release_raw(v);
        }
    }
}
