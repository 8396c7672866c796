pub use core::sync::atomic::{fence, Ordering};
use std::sync::Arc;

/// Simple concurrency of primitive values.
#[derive(Clone)]
pub struct Shared<T: bytemuck::NoUninit> {
    raw_value: Arc<atomic::Atomic<T>>,
}

impl<T: bytemuck::NoUninit> Shared<T> {
    pub fn set(&self, value: T) {
        self.raw_value.store(value, Ordering::Relaxed)
    }
    pub fn get(&self) -> T {
        self.raw_value.load(Ordering::Relaxed)
    }
    pub fn new(value: T) -> Self {
        Self {
            raw_value: Arc::new(atomic::Atomic::new(value)),
        }
    }
}

impl Shared<usize> {
    /// Adds `value` and returns the new count.
    pub fn add(&self, value: usize) -> usize {
        self.raw_value.fetch_add(value, Ordering::AcqRel) + value
    }
}

impl<T: bytemuck::NoUninit + Default> Default for Shared<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: bytemuck::NoUninit + std::fmt::Debug> std::fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Shared").field(&self.get()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn add_from_many_threads() {
        let counter = Shared::new(0usize);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counter = counter.clone();
                thread::spawn(move || {
                    for _ in 0..1000 {
                        counter.add(1);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(counter.get(), 8000);
        assert_eq!(counter.add(2), 8002);
    }

    #[test]
    fn set_get() {
        let flag = Shared::new(false);
        let other = flag.clone();
        other.set(true);
        assert!(flag.get());
    }
}
