//! A bounded cache that throws out whatever has been read the fewest times.

use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    hash::{BuildHasher, Hash},
    time::{Duration, Instant},
};

use tracing::{debug, trace};

use crate::{
    cache::Cache,
    config::{LfuCacheBuilder, RemovalListener},
    error::{ConfigError, InvariantError},
    frequency_index::FrequencyIndex,
    key_lookup::KeyLookup,
    stats::CacheStats,
    tiebreak::{HashTieBreak, TieBreak},
};

/// Most slots the key lookup reserves up front. Past this it grows on demand,
/// so a huge `max_size` costs nothing until it's actually filled.
const MAX_PRESIZE: usize = 1024;

/// A least-frequently-used cache: a [`FrequencyIndex`] holding the entries in
/// eviction order, and a [`KeyLookup`] to find them again by key.
///
/// New entries start at frequency 0 and every `get` bumps that by one. When a
/// new key arrives at a full cache, the entry with the lowest frequency goes,
/// ties settled by `B`. Inserting a key that's already present replaces it
/// outright, frequency included, and isn't counted as an eviction.
///
/// Everything that mutates takes `&mut self`, so lookup-then-promote and
/// evict-then-insert can't interleave with anything. Use
/// [`SharedCache`](crate::SharedCache) to share one between threads.
pub struct LfuCache<K, V, B = HashTieBreak, S = RandomState>
where
    B: TieBreak<K>,
{
    index: FrequencyIndex<K, V, B>,
    lookup: KeyLookup<K, B::Key, S>,
    max_size: usize,
    stats: CacheStats,
    removal_listener: RemovalListener,
}

impl<K, V> LfuCache<K, V, HashTieBreak, RandomState>
where
    K: Eq + Hash + Clone,
{
    /// Make a new LfuCache holding at most `max_size` elements.
    ///
    /// # Panics
    ///
    /// If `max_size` is zero. Use [`LfuCache::try_with_capacity`] to get an
    /// error instead.
    pub fn with_capacity(max_size: usize) -> Self {
        match Self::try_with_capacity(max_size) {
            Ok(cache) => cache,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn try_with_capacity(max_size: usize) -> Result<Self, ConfigError> {
        LfuCacheBuilder::new(max_size).build()
    }
}

impl<K, V, B, S> LfuCache<K, V, B, S>
where
    K: Eq + Hash + Clone,
    B: TieBreak<K>,
    S: BuildHasher,
{
    /// Assumes `max_size` has already been validated.
    pub(crate) fn from_parts(
        max_size: usize,
        tiebreak: B,
        hash_builder: S,
        removal_listener: RemovalListener,
    ) -> Self {
        debug!(max_size, "created lfu cache");

        Self {
            index: FrequencyIndex::new(tiebreak),
            lookup: KeyLookup::with_capacity_and_hash_builder(
                max_size.min(MAX_PRESIZE),
                hash_builder,
            ),
            max_size,
            stats: CacheStats::default(),
            removal_listener,
        }
    }

    /// Stores `value` under `key` at frequency 0, evicting the least
    /// frequently used entry first if the cache is full. Returns the value
    /// `key` held before, if any.
    ///
    /// If the removal listener panics, the eviction has already happened and
    /// been counted, but `value` is dropped and this insert isn't timed.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let started = Instant::now();

        let previous = self.take(&key);
        if previous.is_some() {
            trace!("replaced existing entry");
        } else if self.index.len() >= self.max_size {
            self.evict();
        }

        let position = self.index.insert(key.clone(), 0, value);
        self.lookup.put(key, position);

        self.stats.record_add(started.elapsed());
        previous
    }

    /// Looks up `key` and, if it's there, counts the read by promoting it one
    /// frequency.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let position = self.lookup.get(key)?.clone();
        let promoted = self.index.promote(&position)?;
        self.lookup.update(key, promoted.clone());
        self.index.get(&promoted)
    }

    /// Looks at the value under `key` without counting it as a read.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(self.lookup.get(key)?)
    }

    /// How many times `key` has been read since it was inserted.
    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lookup.frequency(key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lookup.contains(key)
    }

    /// Takes `key` out of the cache. This is not an eviction: the removal
    /// listener isn't called and the eviction count doesn't move.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.take(key);
        if removed.is_some() {
            trace!("removed entry");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.lookup.clear();
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Every value in the cache. Currently least frequently used first, but
    /// don't count on it.
    pub fn values(&self) -> Vec<&V> {
        self.index.values().collect()
    }

    /// Total time spent in [`insert`](Self::insert) since the cache was made.
    pub fn total_add_time(&self) -> Duration {
        self.stats.total_add_time()
    }

    /// Mean time per [`insert`](Self::insert), or `None` if there hasn't been
    /// one yet.
    pub fn avg_add_time(&self) -> Option<Duration> {
        self.stats.avg_add_time()
    }

    pub fn eviction_count(&self) -> u64 {
        self.stats.eviction_count()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Replaces the function called after every eviction. It runs on the
    /// inserting thread before `insert` returns, and a panic in it propagates
    /// out of `insert`. Hand anything slow off to a channel.
    pub fn set_removal_listener<F>(&mut self, listener: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.removal_listener = Box::new(listener);
    }

    /// Verifies that the index and the lookup describe the same set of
    /// entries and that the cache is within its bound.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.lookup.len() {
            return Err(InvariantError::new(format!(
                "index holds {} entries but lookup holds {}",
                self.index.len(),
                self.lookup.len()
            )));
        }

        if self.index.len() > self.max_size {
            return Err(InvariantError::new(format!(
                "{} entries exceeds max_size {}",
                self.index.len(),
                self.max_size
            )));
        }

        // equal sizes plus every lookup landing on its own entry makes the
        // two a bijection
        for (key, position) in self.lookup.iter() {
            match self.index.get_key_value(position) {
                Some((stored, _)) if stored == key => {}
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "lookup points at another key's entry (frequency {})",
                        position.frequency()
                    )))
                }
                None => {
                    return Err(InvariantError::new(format!(
                        "lookup points at an empty position (frequency {})",
                        position.frequency()
                    )))
                }
            }
        }

        Ok(())
    }

    /// Removes `key` from both structures, handing back its value.
    fn take<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (_, position) = self.lookup.remove(key)?;
        self.index.remove(&position).map(|(_, v)| v)
    }

    /// Throws out the least frequently used entry and tells the listener.
    fn evict(&mut self) {
        let Some((position, key, _)) = self.index.pop_min() else {
            return;
        };
        self.lookup.remove(&key);
        self.stats.record_eviction();

        trace!(
            frequency = position.frequency(),
            evictions = self.stats.eviction_count(),
            "evicted least frequently used entry"
        );

        (self.removal_listener)();
    }
}

impl<K, V, B, S> Cache<K, V> for LfuCache<K, V, B, S>
where
    K: Eq + Hash + Clone,
    B: TieBreak<K>,
    S: BuildHasher,
{
    fn insert(&mut self, k: K, v: V) -> Option<V> {
        LfuCache::insert(self, k, v)
    }

    fn get<'a, Q>(&'a mut self, k: &Q) -> Option<&'a V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        LfuCache::get(self, k)
    }

    fn remove<Q>(&mut self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        LfuCache::remove(self, k)
    }

    fn values(&self) -> Vec<&V> {
        LfuCache::values(self)
    }

    fn clear(&mut self) {
        LfuCache::clear(self)
    }

    fn len(&self) -> usize {
        LfuCache::len(self)
    }
}
