//! Secondary ordering for entries that share a frequency.
//!
//! The frequency index never looks at keys to order them, it asks a
//! [`TieBreak`] for a comparable stand-in once when an entry is created. That
//! stand-in has to be deterministic for a given key, otherwise two runs over the
//! same inputs would evict in different orders.

use std::{
    collections::hash_map::DefaultHasher,
    hash::{BuildHasher, BuildHasherDefault, Hash},
};

/// A total, deterministic order over keys.
///
/// Two distinct keys are allowed to map to the same `Key`; the frequency index
/// falls back on insertion order between them rather than losing one.
pub trait TieBreak<K: ?Sized> {
    /// What keys are compared by.
    type Key: Ord + Clone;

    fn tiebreak(&self, key: &K) -> Self::Key;
}

/// Breaks ties by the key's hash. The default hasher has fixed keys, unlike
/// `RandomState`, so a key hashes the same on every run of the same build.
#[derive(Debug, Default, Clone, Copy)]
pub struct HashTieBreak<S = BuildHasherDefault<DefaultHasher>> {
    hash_builder: S,
}

impl HashTieBreak {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S> HashTieBreak<S>
where
    S: BuildHasher,
{
    /// Breaks ties with a particular hasher. It had better not be randomly
    /// seeded.
    pub fn with_hash_builder(hash_builder: S) -> Self {
        Self { hash_builder }
    }
}

impl<K, S> TieBreak<K> for HashTieBreak<S>
where
    K: Hash + ?Sized,
    S: BuildHasher,
{
    type Key = u64;

    fn tiebreak(&self, key: &K) -> u64 {
        self.hash_builder.hash_one(key)
    }
}

/// Breaks ties by the key's own ordering. Collision free, at the price of a
/// clone of every key living in the index.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrdTieBreak;

impl<K> TieBreak<K> for OrdTieBreak
where
    K: Ord + Clone,
{
    type Key = K;

    fn tiebreak(&self, key: &K) -> K {
        key.clone()
    }
}
