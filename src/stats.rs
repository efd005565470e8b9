//! Counters a cache keeps about itself: how long inserts take and how many
//! entries it has thrown out.

use std::time::Duration;

/// Running totals for one cache. They live and die with it; there's no reset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    times_added: u64,
    total_add_time: Duration,
    eviction_count: u64,
}

impl CacheStats {
    pub(crate) fn record_add(&mut self, elapsed: Duration) {
        self.times_added = self.times_added.saturating_add(1);
        self.total_add_time = self.total_add_time.saturating_add(elapsed);
    }

    pub(crate) fn record_eviction(&mut self) {
        self.eviction_count = self.eviction_count.saturating_add(1);
    }

    /// How many inserts have completed.
    pub fn times_added(&self) -> u64 {
        self.times_added
    }

    /// Time spent inside insert, summed over every insert.
    pub fn total_add_time(&self) -> Duration {
        self.total_add_time
    }

    /// Mean time per insert. `None` until something has been inserted, since
    /// an average over nothing isn't zero, it's undefined.
    pub fn avg_add_time(&self) -> Option<Duration> {
        if self.times_added == 0 {
            return None;
        }

        let nanos = self.total_add_time.as_nanos() / u128::from(self.times_added);
        Some(Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX)))
    }

    /// How many entries have been evicted to make room.
    pub fn eviction_count(&self) -> u64 {
        self.eviction_count
    }
}
