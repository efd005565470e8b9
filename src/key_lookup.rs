//! Maps keys to where they currently sit in the frequency index, so a read can
//! find its entry without walking the index.

use std::{
    borrow::Borrow,
    collections::{hash_map::RandomState, HashMap},
    hash::{BuildHasher, Hash},
};

use crate::frequency_index::Position;

/// Key to [`Position`] mapping. No ordering of its own.
pub struct KeyLookup<K, T, S = RandomState> {
    positions: HashMap<K, Position<T>, S>,
}

impl<K, T> KeyLookup<K, T, RandomState>
where
    K: Eq + Hash,
{
    pub fn with_capacity(capacity: usize) -> Self {
        KeyLookup::with_capacity_and_hash_builder(capacity, Default::default())
    }
}

impl<K, T, S> KeyLookup<K, T, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_capacity_and_hash_builder(capacity: usize, hash_builder: S) -> Self {
        Self {
            positions: HashMap::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    /// Records where `key` lives now, returning where it used to.
    pub fn put(&mut self, key: K, position: Position<T>) -> Option<Position<T>> {
        self.positions.insert(key, position)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&Position<T>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.get(key)
    }

    /// Points an existing key at a new position. Does nothing for keys that
    /// aren't here, which saves a clone of the key on every promotion.
    pub fn update<Q>(&mut self, key: &Q, position: Position<T>) -> Option<Position<T>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions
            .get_mut(key)
            .map(|slot| std::mem::replace(slot, position))
    }

    /// How often `key` has been read, if it's present.
    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.get(key).map(Position::frequency)
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, Position<T>)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.remove_entry(key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &Position<T>)> + '_ {
        self.positions.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.positions.keys()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::KeyLookup;
    use crate::{frequency_index::FrequencyIndex, OrdTieBreak};

    #[test]
    fn test_lookup() {
        let mut index: FrequencyIndex<String, u32, OrdTieBreak> = FrequencyIndex::new(OrdTieBreak);
        let mut lookup = KeyLookup::with_capacity(4);

        let p = index.insert("a".to_owned(), 0, 1);
        assert_eq!(None, lookup.put("a".to_owned(), p.clone()));
        assert_eq!(Some(&p), lookup.get("a"));
        assert_eq!(Some(0), lookup.frequency("a"));

        // borrowed lookups work without building a String
        let promoted = index.promote(&p).unwrap();
        assert_eq!(Some(p), lookup.update("a", promoted.clone()));
        assert_eq!(Some(1), lookup.frequency("a"));

        assert!(lookup.contains("a"));
        assert_eq!(Some(("a".to_owned(), promoted)), lookup.remove("a"));
        assert!(lookup.is_empty());
        assert_eq!(None, lookup.frequency("a"));
    }

    #[test]
    fn update_ignores_missing_keys() {
        let mut index: FrequencyIndex<u8, (), OrdTieBreak> = FrequencyIndex::new(OrdTieBreak);
        let mut lookup: KeyLookup<u8, u8> = KeyLookup::with_capacity(1);
        let p = index.insert(1, 0, ());

        assert_eq!(None, lookup.update(&1, p));
        assert_eq!(0, lookup.len());
    }
}
