/// A type that can live in a [`Pool`].
pub trait PoolEntry {
    type Params;

    fn create(params: Self::Params) -> Self;

    /// Must overwrite every mutable field: a recycled entry carries the
    /// state of its previous life until this runs.
    fn reconfigure(&mut self, params: Self::Params);

    fn is_live(&self) -> bool;

    fn set_live(&mut self, live: bool);
}

/// Free-list allocator for short-lived entities (bullets, dropped
/// items). Entries move out by value on `acquire` and back in on
/// `recycle`, so use-after-recycle cannot compile; the live flag
/// catches an entry recycled twice between acquires.
#[derive(Debug)]
pub struct Pool<T> {
    free: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self { free: Vec::new() }
    }

    pub fn free_len(&self) -> usize {
        self.free.len()
    }
}

impl<T: PoolEntry> Pool<T> {
    pub fn acquire(&mut self, params: T::Params) -> T {
        let mut entry = match self.free.pop() {
            Some(mut recycled) => {
                recycled.reconfigure(params);
                recycled
            }
            None => T::create(params),
        };
        debug_assert!(!entry.is_live(), "acquired an entry that is still live");
        entry.set_live(true);
        entry
    }

    pub fn recycle(&mut self, mut entry: T) {
        debug_assert!(entry.is_live(), "entry recycled twice");
        entry.set_live(false);
        self.free.push(entry);
    }

    pub fn recycle_all(&mut self, entries: impl IntoIterator<Item = T>) {
        for entry in entries {
            self.recycle(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Counter {
        value: u32,
        generation: u32,
        live: bool,
    }

    impl PoolEntry for Counter {
        type Params = u32;

        fn create(value: u32) -> Self {
            Self {
                value,
                generation: 0,
                live: false,
            }
        }

        fn reconfigure(&mut self, value: u32) {
            self.value = value;
            self.generation += 1;
        }

        fn is_live(&self) -> bool {
            self.live
        }

        fn set_live(&mut self, live: bool) {
            self.live = live;
        }
    }

    #[test]
    fn test_acquire_from_empty_pool_creates() {
        let mut pool: Pool<Counter> = Pool::new();
        let entry = pool.acquire(7);
        assert_eq!(entry.value, 7);
        assert_eq!(entry.generation, 0);
        assert!(entry.is_live());
        assert_eq!(pool.free_len(), 0);
    }

    #[test]
    fn test_recycle_then_acquire_reuses_and_reconfigures() {
        let mut pool: Pool<Counter> = Pool::new();
        let entry = pool.acquire(7);
        pool.recycle(entry);
        assert_eq!(pool.free_len(), 1);

        let entry = pool.acquire(42);
        // reused instance, fully reconfigured
        assert_eq!(entry.value, 42);
        assert_eq!(entry.generation, 1);
        assert!(entry.is_live());
        assert_eq!(pool.free_len(), 0);
    }

    #[test]
    fn test_recycle_all_batches() {
        let mut pool: Pool<Counter> = Pool::new();
        let batch = vec![pool.acquire(1), pool.acquire(2), pool.acquire(3)];
        pool.recycle_all(batch);
        assert_eq!(pool.free_len(), 3);
    }

    #[test]
    #[should_panic(expected = "entry recycled twice")]
    #[cfg(debug_assertions)]
    fn test_double_recycle_is_detected() {
        let mut pool: Pool<Counter> = Pool::new();
        let mut entry = pool.acquire(1);
        entry.set_live(false);
        // simulates a handle that already went through recycle
        pool.recycle(entry);
    }
}
