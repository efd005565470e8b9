//! Construction-time knobs for [`LfuCache`](crate::LfuCache).
//!
//! ```
//! use freqcache::{LfuCacheBuilder, OrdTieBreak};
//!
//! let mut cache = LfuCacheBuilder::new(2)
//!     .tiebreak(OrdTieBreak)
//!     .removal_listener(|| println!("evicted something"))
//!     .build::<String, u32>()
//!     .unwrap();
//!
//! cache.insert("a".to_owned(), 1);
//! assert_eq!(Some(&1), cache.get("a"));
//! ```

use std::{
    collections::hash_map::RandomState,
    hash::{BuildHasher, Hash},
};

use crate::{error::ConfigError, lfu_cache::LfuCache, tiebreak::TieBreak, HashTieBreak};

/// Invoked once for every eviction, on the thread that caused it.
pub type RemovalListener = Box<dyn FnMut() + Send + 'static>;

/// The plain-data part of a cache's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Most entries the cache will hold before it starts evicting.
    pub max_size: usize,
}

impl CacheConfig {
    pub fn new(max_size: usize) -> Self {
        Self { max_size }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_size == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        Ok(())
    }
}

/// Builds an [`LfuCache`], choosing how it breaks ties and hashes keys.
pub struct LfuCacheBuilder<B = HashTieBreak, S = RandomState> {
    config: CacheConfig,
    tiebreak: B,
    hash_builder: S,
    removal_listener: Option<RemovalListener>,
}

impl LfuCacheBuilder<HashTieBreak, RandomState> {
    pub fn new(max_size: usize) -> Self {
        Self {
            config: CacheConfig::new(max_size),
            tiebreak: HashTieBreak::new(),
            hash_builder: RandomState::new(),
            removal_listener: None,
        }
    }
}

impl<B, S> LfuCacheBuilder<B, S> {
    /// Orders entries of equal frequency with `tiebreak` instead of by hash.
    pub fn tiebreak<B2>(self, tiebreak: B2) -> LfuCacheBuilder<B2, S> {
        LfuCacheBuilder {
            config: self.config,
            tiebreak,
            hash_builder: self.hash_builder,
            removal_listener: self.removal_listener,
        }
    }

    /// Hasher for the key lookup table. Has no say in eviction order.
    pub fn hash_builder<S2>(self, hash_builder: S2) -> LfuCacheBuilder<B, S2> {
        LfuCacheBuilder {
            config: self.config,
            tiebreak: self.tiebreak,
            hash_builder,
            removal_listener: self.removal_listener,
        }
    }

    pub fn removal_listener<F>(mut self, listener: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.removal_listener = Some(Box::new(listener));
        self
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Checks the configuration and builds the cache.
    pub fn build<K, V>(self) -> Result<LfuCache<K, V, B, S>, ConfigError>
    where
        K: Eq + Hash + Clone,
        B: TieBreak<K>,
        S: BuildHasher,
    {
        self.config.validate()?;

        let listener = self
            .removal_listener
            .unwrap_or_else(|| Box::new(|| {}) as RemovalListener);

        Ok(LfuCache::from_parts(
            self.config.max_size,
            self.tiebreak,
            self.hash_builder,
            listener,
        ))
    }
}
