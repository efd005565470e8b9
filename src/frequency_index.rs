//! Entries kept in ascending order of how often they've been read.
//!
//! Every entry sits at a [`Position`]: its frequency, then its tiebreak, then a
//! sequence number handed out when the entry was created. Positions are unique
//! and totally ordered, so the first one in the map is always the next thing to
//! evict. Everything here is a `BTreeMap` operation, so O(log n).

use std::collections::{btree_map, BTreeMap};

use crate::tiebreak::TieBreak;

/// Where an entry lives in a [`FrequencyIndex`]. Fields compare in declaration
/// order: frequency first, then tiebreak, then insertion sequence.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position<T> {
    frequency: u64,
    tiebreak: T,
    seq: u64,
}

impl<T> Position<T> {
    /// How many times the entry at this position has been read.
    pub fn frequency(&self) -> u64 {
        self.frequency
    }

    pub fn tiebreak(&self) -> &T {
        &self.tiebreak
    }

    /// This entry's position after one more read. Saturates rather than wraps,
    /// so a maxed-out entry stays where it is.
    fn promoted(&self) -> Self
    where
        T: Clone,
    {
        Self {
            frequency: self.frequency.saturating_add(1),
            tiebreak: self.tiebreak.clone(),
            seq: self.seq,
        }
    }
}

/// A frequency-ordered store of key-value pairs.
pub struct FrequencyIndex<K, V, B>
where
    B: TieBreak<K>,
{
    entries: BTreeMap<Position<B::Key>, (K, V)>,
    tiebreak: B,
    next_seq: u64,
}

impl<K, V, B> FrequencyIndex<K, V, B>
where
    B: TieBreak<K>,
{
    /// An empty index ordering equal frequencies with `tiebreak`.
    pub fn new(tiebreak: B) -> Self {
        Self {
            entries: BTreeMap::new(),
            tiebreak,
            next_seq: 0,
        }
    }

    /// Stores an entry at `frequency` and returns where it went. Never
    /// displaces another entry: the sequence number keeps positions unique.
    pub fn insert(&mut self, key: K, frequency: u64, value: V) -> Position<B::Key> {
        let position = Position {
            frequency,
            tiebreak: self.tiebreak.tiebreak(&key),
            seq: self.next_seq,
        };
        self.next_seq = self.next_seq.wrapping_add(1);

        self.entries.insert(position.clone(), (key, value));
        position
    }

    /// Removes the entry at `position`, if there is one.
    pub fn remove(&mut self, position: &Position<B::Key>) -> Option<(K, V)> {
        self.entries.remove(position)
    }

    /// Reads the value at `position` without moving it.
    pub fn get(&self, position: &Position<B::Key>) -> Option<&V> {
        self.entries.get(position).map(|(_, v)| v)
    }

    pub fn get_key_value(&self, position: &Position<B::Key>) -> Option<(&K, &V)> {
        self.entries.get(position).map(|(k, v)| (k, v))
    }

    /// Moves the entry at `position` up one frequency and returns its new
    /// position, or `None` if nothing was there.
    pub fn promote(&mut self, position: &Position<B::Key>) -> Option<Position<B::Key>> {
        let entry = self.entries.remove(position)?;
        let promoted = position.promoted();
        self.entries.insert(promoted.clone(), entry);
        Some(promoted)
    }

    /// The least frequently used entry.
    pub fn peek_min(&self) -> Option<(&Position<B::Key>, &K, &V)> {
        self.entries.first_key_value().map(|(p, (k, v))| (p, k, v))
    }

    /// Takes the least frequently used entry out of the index. `None` when the
    /// index is empty.
    pub fn pop_min(&mut self) -> Option<(Position<B::Key>, K, V)> {
        self.entries.pop_first().map(|(p, (k, v))| (p, k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in eviction order, least frequently used first.
    pub fn iter(&self) -> IndexIter<'_, K, V, B::Key> {
        IndexIter {
            inner: self.entries.iter(),
        }
    }

    /// Values in eviction order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.values().map(|(_, v)| v)
    }

    /// Drops every entry. Sequence numbers keep counting from where they were.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Iterates over a [`FrequencyIndex`] from the next eviction candidate up.
pub struct IndexIter<'a, K, V, T> {
    inner: btree_map::Iter<'a, Position<T>, (K, V)>,
}

impl<'a, K, V, T> Iterator for IndexIter<'a, K, V, T> {
    type Item = (&'a Position<T>, &'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(p, (k, v))| (p, k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::{FrequencyIndex, Position};
    use crate::{identity_hasher::BuildIdentityHasher, HashTieBreak, OrdTieBreak, TieBreak};

    type IntIndex = FrequencyIndex<u64, &'static str, HashTieBreak<BuildIdentityHasher>>;

    fn int_index() -> IntIndex {
        FrequencyIndex::new(HashTieBreak::with_hash_builder(BuildIdentityHasher))
    }

    /// Gives every key the same tiebreak, so only insertion order separates
    /// them.
    struct Colliding;

    impl TieBreak<u64> for Colliding {
        type Key = ();

        fn tiebreak(&self, _key: &u64) -> Self::Key {}
    }

    #[test]
    fn test_index() {
        let mut index = int_index();

        let p3 = index.insert(3, 0, "three");
        let p1 = index.insert(1, 0, "one");
        let p2 = index.insert(2, 0, "two");
        assert_eq!(3, index.len());
        assert_eq!(&1, p1.tiebreak());

        // equal frequency, so the lowest key comes first
        assert_eq!(Some((&p1, &1, &"one")), index.peek_min());

        // reading one up a frequency moves it to the back of the line
        let p1 = index.promote(&p1).unwrap();
        assert_eq!(1, p1.frequency());
        assert_eq!(Some(&"one"), index.get(&p1));

        assert_eq!(Some((p2, 2, "two")), index.pop_min());
        assert_eq!(Some((p3, 3, "three")), index.pop_min());
        assert_eq!(Some((p1, 1, "one")), index.pop_min());
        assert_eq!(None, index.pop_min());
        assert!(index.is_empty());
    }

    #[test]
    fn stale_positions_miss() {
        let mut index = int_index();
        let old = index.insert(9, 0, "nine");
        let new = index.promote(&old).unwrap();

        assert_eq!(None, index.get(&old));
        assert_eq!(None, index.remove(&old));
        assert_eq!(None, index.promote(&old));
        assert_eq!(Some((9, "nine")), index.remove(&new));
    }

    #[test]
    fn frequency_outranks_tiebreak() {
        let mut index = int_index();
        let p1 = index.insert(1, 0, "one");
        index.insert(2, 1, "two");
        index.insert(3, 0, "three");
        index.promote(&p1);

        let keys: Vec<u64> = index.iter().map(|(_, k, _)| *k).collect();
        assert_eq!(vec![3, 1, 2], keys);
    }

    #[test]
    fn colliding_tiebreaks_keep_both_entries() {
        let mut index: FrequencyIndex<u64, u64, Colliding> = FrequencyIndex::new(Colliding);
        let a = index.insert(10, 0, 100);
        let b = index.insert(20, 0, 200);

        assert_ne!(a, b);
        assert_eq!(2, index.len());
        assert_eq!(Some(&100), index.get(&a));
        assert_eq!(Some(&200), index.get(&b));
        // first in, first out among colliders
        assert_eq!(Some(10), index.pop_min().map(|(_, k, _)| k));
    }

    #[test]
    fn promotion_saturates() {
        let mut index: FrequencyIndex<String, (), OrdTieBreak> = FrequencyIndex::new(OrdTieBreak);
        let p = index.insert("k".to_owned(), u64::MAX, ());
        let q = index.promote(&p).unwrap();
        assert_eq!(u64::MAX, q.frequency());
        assert_eq!(p, q);
        assert_eq!(1, index.len());
    }

    #[test]
    fn positions_order_by_frequency_then_tiebreak() {
        let low = Position {
            frequency: 0,
            tiebreak: 9,
            seq: 9,
        };
        let high = Position {
            frequency: 1,
            tiebreak: 0,
            seq: 0,
        };
        assert!(low < high);
        assert!(low.promoted() > high);
    }
}
