use std::{borrow::Borrow, hash::Hash};

/// Describes what a cache is.
pub trait Cache<K, V>
where
    K: Eq + Hash,
{
    /// Push a new element into the Cache, which may evict the least valuable
    /// item if the cache is at capacity. Returns the previous value in the
    /// cache if the key already had a value there.
    fn insert(&mut self, k: K, v: V) -> Option<V>;

    /// Get an item from the Cache. This also counts as a use of the item,
    /// making it less eligible for eviction.
    fn get<'a, Q>(&'a mut self, k: &Q) -> Option<&'a V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Bust a move, returning whatever was there. Not an eviction.
    fn remove<Q>(&mut self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Everything stored right now, in no promised order.
    fn values(&self) -> Vec<&V>;

    /// Clears the cache entirely.
    fn clear(&mut self);

    /// The number of items stored in the cache right now.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
