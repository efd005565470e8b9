//! A bounded least-frequently-used cache.
//!
//! Entries are kept in a [`FrequencyIndex`] ordered by how many times they've
//! been read, with a [`KeyLookup`] beside it to find them by key. When the
//! cache is full, the entry with the fewest reads goes, and ties between
//! equally cold entries are broken the same way on every run. The cache keeps
//! count of its evictions, times its inserts, and calls a listener whenever it
//! evicts something.
//!
//! ```
//! use freqcache::LfuCache;
//!
//! let mut cache = LfuCache::with_capacity(2);
//! cache.insert("hot", 1);
//! cache.insert("cold", 2);
//! cache.get(&"hot");
//!
//! cache.insert("new", 3);
//! assert_eq!(None, cache.get(&"cold"));
//! assert_eq!(1, cache.eviction_count());
//! ```

mod cache;
mod config;
mod error;
mod frequency_index;
mod identity_hasher;
mod key_lookup;
mod lfu_cache;
#[cfg(feature = "shared_cache")]
mod shared_cache;
mod stats;
mod tiebreak;

pub use cache::Cache;
pub use config::{CacheConfig, LfuCacheBuilder, RemovalListener};
pub use error::{ConfigError, InvariantError};
pub use frequency_index::{FrequencyIndex, IndexIter, Position};
pub use identity_hasher::{BuildIdentityHasher, IdentityHasher};
pub use key_lookup::KeyLookup;
pub use lfu_cache::LfuCache;
#[cfg(feature = "shared_cache")]
pub use shared_cache::SharedCache;
pub use stats::CacheStats;
pub use tiebreak::{HashTieBreak, OrdTieBreak, TieBreak};
