use parking_lot::Mutex;
use std::{
    borrow::Borrow,
    hash::{BuildHasher, Hash},
    marker::PhantomData,
    sync::Arc,
    time::Duration,
};

use crate::{cache::Cache, lfu_cache::LfuCache, stats::CacheStats, tiebreak::TieBreak};

/// Wrapper for a Cache which is shareable across thread boundaries.
///
/// Every call holds one lock for its whole duration, so a read and the
/// promotion it causes, or an eviction and the insert that caused it, happen
/// as one step as far as other threads can tell. Reads mutate an LFU cache, so
/// there's nothing to gain from a reader-writer lock.
///
/// The removal listener runs with the lock held. It must not call back into
/// the same SharedCache, or it will deadlock.
pub struct SharedCache<C, K, V>(Arc<Mutex<C>>, PhantomData<K>, PhantomData<V>)
where
    C: Cache<K, V>,
    K: Eq + Hash,
    V: Clone;

impl<C, K, V> SharedCache<C, K, V>
where
    C: Cache<K, V>,
    K: Eq + Hash,
    V: Clone,
{
    /// Wraps a cache into a shared cache accessor, making it safe to move
    /// across thread boundaries. Enforces an additional constraint of Clone on
    /// values.
    pub fn with_cache(cache: C) -> Self {
        Self(Arc::new(Mutex::new(cache)), PhantomData, PhantomData)
    }

    /// Inserts an item into the cache.
    pub fn insert(&self, k: K, v: V) -> Option<V> {
        self.0.lock().insert(k, v)
    }

    /// Get an item from the cache. This clones it to minimize the lock time of
    /// the cache.
    pub fn get<Q>(&self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.lock().get(k).cloned()
    }

    /// Remove an item from the cache, returning the removed item if it existed.
    pub fn remove<Q>(&self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.lock().remove(k)
    }

    /// A copy of every value in the cache.
    pub fn values(&self) -> Vec<V> {
        self.0.lock().values().into_iter().cloned().collect()
    }

    /// Clears the cache.
    pub fn clear(&self) {
        self.0.lock().clear()
    }

    /// The number of elements in the cache at present.
    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }

    /// Runs `f` with the cache locked, for anything that isn't wrapped here.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut self.0.lock())
    }
}

impl<K, V, B, S> SharedCache<LfuCache<K, V, B, S>, K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
    B: TieBreak<K>,
    S: BuildHasher,
{
    /// How many times `key` has been read, without reading it.
    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.lock().frequency(key)
    }

    pub fn total_add_time(&self) -> Duration {
        self.0.lock().total_add_time()
    }

    pub fn avg_add_time(&self) -> Option<Duration> {
        self.0.lock().avg_add_time()
    }

    pub fn eviction_count(&self) -> u64 {
        self.0.lock().eviction_count()
    }

    /// All the counters, read under one lock so they agree with each other.
    pub fn stats(&self) -> CacheStats {
        self.0.lock().stats()
    }

    pub fn set_removal_listener<F>(&self, listener: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.0.lock().set_removal_listener(listener)
    }
}

impl<C, K, V> Clone for SharedCache<C, K, V>
where
    C: Cache<K, V>,
    K: Eq + Hash,
    V: Clone,
{
    fn clone(&self) -> Self {
        SharedCache(self.0.clone(), PhantomData, PhantomData)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
        thread,
    };

    use crate::{LfuCache, SharedCache};

    type SharedLfu = SharedCache<LfuCache<usize, usize>, usize, usize>;

    #[test]
    fn readme_snippet() {
        let cache: SharedLfu = SharedCache::with_cache(LfuCache::with_capacity(1));
        cache.insert(1, 1);

        let thread_cache = cache.clone();
        let r = thread::spawn(move || thread_cache.get(&1)).join();

        assert_eq!(Some(1), r.unwrap());
        assert_eq!(Some(1), cache.frequency(&1));
    }

    #[test]
    fn concurrent_reads_are_all_counted() {
        let cache: SharedLfu = SharedCache::with_cache(LfuCache::with_capacity(4));
        cache.insert(7, 7);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for _ in 0..500 {
                        assert_eq!(Some(7), cache.get(&7));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(Some(4000), cache.frequency(&7));
        cache.with_lock(|c| c.check_invariants()).unwrap();
    }

    #[test]
    fn listener_sees_every_eviction() {
        let cache: SharedLfu = SharedCache::with_cache(LfuCache::with_capacity(8));
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        cache.set_removal_listener(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        cache.insert(t * 1000 + i, i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(8, cache.len());
        assert_eq!(392, cache.eviction_count());
        assert_eq!(392, calls.load(Ordering::SeqCst) as u64);
        assert_eq!(400, cache.stats().times_added());
    }
}
