use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex, MutexGuard};

struct Inner<T> {
    deque: Mutex<VecDeque<T>>,
    /// Signalled after every push, waiters re-check emptiness on each wake.
    not_empty: Condvar,
}

/// Unbounded deque shared between producer and consumer threads.
///
/// Every operation runs its critical section under one mutex. The only
/// blocking calls are [`wait_pop_front`](Self::wait_pop_front) and
/// [`wait_pop_back`](Self::wait_pop_back), which release the lock while the
/// deque is empty.
///
/// The value is a handle: clones refer to the same deque, `new` always
/// creates a fresh lock and condition.
pub struct ThreadSafeDeque<T> {
    inner: Arc<Inner<T>>,
}

impl<T> ThreadSafeDeque<T> {
    pub fn new() -> Self {
        Self::from_deque(VecDeque::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_deque(VecDeque::with_capacity(capacity))
    }

    fn from_deque(deque: VecDeque<T>) -> Self {
        Self {
            inner: Arc::new(Inner {
                deque: Mutex::new(deque),
                not_empty: Condvar::new(),
            }),
        }
    }

    pub fn push_back(&self, t: T) {
        {
            let mut lock = self.inner.deque.lock();
            lock.push_back(t);
        }
        self.inner.not_empty.notify_one();
    }

    pub fn push_front(&self, t: T) {
        {
            let mut lock = self.inner.deque.lock();
            lock.push_front(t);
        }
        self.inner.not_empty.notify_one();
    }

    /// Appends every item in one critical section and wakes all waiters.
    pub fn extend<I: IntoIterator<Item = T>>(&self, iter: I) {
        let pushed = {
            let mut lock = self.inner.deque.lock();
            let before = lock.len();
            lock.extend(iter);
            lock.len() - before
        };
        if pushed > 0 {
            self.inner.not_empty.notify_all();
        }
    }

    pub fn pop_front(&self) -> Option<T> {
        let mut lock = self.inner.deque.lock();
        lock.pop_front()
    }

    pub fn pop_back(&self) -> Option<T> {
        let mut lock = self.inner.deque.lock();
        lock.pop_back()
    }

    /// Moves the front element into `out` and returns `true`, or returns
    /// `false` and leaves `out` untouched when the deque is empty.
    pub fn pop_front_into(&self, out: &mut T) -> bool {
        match self.pop_front() {
            Some(t) => {
                *out = t;
                true
            }
            None => false,
        }
    }

    /// Removes the front element, blocking while the deque is empty.
    ///
    /// With `timeout == None` this waits until an element arrives and always
    /// returns `Some`. With `Some(duration)` it returns `None` once the
    /// duration has elapsed with the deque still empty; nothing is claimed
    /// in that case.
    pub fn wait_pop_front(&self, timeout: Option<Duration>) -> Option<T> {
        let mut lock = self.inner.deque.lock();
        if !self.wait_non_empty(&mut lock, timeout) {
            log::trace!("wait_pop_front timed out after {:?}", timeout);
            return None;
        }
        lock.pop_front()
    }

    /// Same as [`wait_pop_front`](Self::wait_pop_front), taking from the back.
    pub fn wait_pop_back(&self, timeout: Option<Duration>) -> Option<T> {
        let mut lock = self.inner.deque.lock();
        if !self.wait_non_empty(&mut lock, timeout) {
            log::trace!("wait_pop_back timed out after {:?}", timeout);
            return None;
        }
        lock.pop_back()
    }

    /// Blocks on the condition until the guarded deque is non-empty.
    /// Returns `false` only when the deadline passed and it is still empty.
    fn wait_non_empty(&self, lock: &mut MutexGuard<'_, VecDeque<T>>, timeout: Option<Duration>) -> bool {
        // a timeout too large to represent as an instant waits forever
        let deadline = timeout.and_then(|timeout| Instant::now().checked_add(timeout));
        match deadline {
            None => {
                while lock.is_empty() {
                    self.inner.not_empty.wait(lock);
                }
                true
            }
            Some(deadline) => {
                while lock.is_empty() {
                    if self.inner.not_empty.wait_until(lock, deadline).timed_out() {
                        return !lock.is_empty();
                    }
                }
                true
            }
        }
    }

    /// Drops every element for which `pred` returns `true`; survivors keep
    /// their relative order.
    ///
    /// The whole scan runs under the lock, `pred` is called exactly once per
    /// element from front to back. Neither `pred` nor the element's `Drop`
    /// may touch this deque again, that deadlocks. Use
    /// [`take_if`](Self::take_if) when the removed elements need further work.
    pub fn remove_if<F>(&self, mut pred: F)
    where
        F: FnMut(&T) -> bool,
    {
        let (before, after) = {
            let mut lock = self.inner.deque.lock();
            let before = lock.len();
            lock.retain(|t| !pred(t));
            (before, lock.len())
        };
        log::trace!("remove_if dropped {} of {} elements", before - after, before);
    }

    /// Moves every element matching `pred` out of the deque and returns them
    /// in their original order.
    ///
    /// Matching runs under the lock like [`remove_if`](Self::remove_if), but
    /// the caller gets ownership back, so follow-up work (including calls
    /// into this deque) can happen after the lock has been released.
    pub fn take_if<F>(&self, mut pred: F) -> Vec<T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut lock = self.inner.deque.lock();
        let mut taken = Vec::new();
        let mut kept = VecDeque::with_capacity(lock.len());
        for t in lock.drain(..) {
            if pred(&t) {
                taken.push(t);
            } else {
                kept.push_back(t);
            }
        }
        *lock = kept;
        taken
    }

    /// Moves all elements out in FIFO order.
    pub fn drain(&self) -> Vec<T> {
        let mut lock = self.inner.deque.lock();
        lock.drain(..).collect()
    }

    pub fn clear(&self) {
        let mut lock = self.inner.deque.lock();
        lock.clear();
    }

    pub fn len(&self) -> usize {
        let lock = self.inner.deque.lock();
        lock.len()
    }

    /// Snapshot, may be stale as soon as it returns.
    pub fn is_empty(&self) -> bool {
        let lock = self.inner.deque.lock();
        lock.is_empty()
    }
}

impl<T> Clone for ThreadSafeDeque<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for ThreadSafeDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ThreadSafeDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadSafeDeque").field("len", &self.len()).finish()
    }
}

impl<T> From<Vec<T>> for ThreadSafeDeque<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_deque(values.into())
    }
}

impl<T> FromIterator<T> for ThreadSafeDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_deque(iter.into_iter().collect())
    }
}
