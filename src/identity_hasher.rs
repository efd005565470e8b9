//! A hasher which just proxies for the integer it's given. Plugged into
//! [`HashTieBreak`](crate::HashTieBreak) it makes integer keys tie-break by
//! their own value, which is about the easiest eviction order there is to
//! reason about.

use std::hash::{BuildHasher, Hasher};

/// Proxies integers for themselves. Further writes are folded in by rotating
/// the state and xoring, so a freshly built hasher fed one integer finishes
/// with exactly that integer.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.0 = self.0.rotate_left(8) ^ u64::from(*byte);
        }
    }

    fn write_u8(&mut self, i: u8) {
        self.0 = self.0.rotate_left(8) ^ u64::from(i);
    }

    fn write_u16(&mut self, i: u16) {
        self.0 = self.0.rotate_left(16) ^ u64::from(i);
    }

    fn write_u32(&mut self, i: u32) {
        self.0 = self.0.rotate_left(32) ^ u64::from(i);
    }

    fn write_u64(&mut self, i: u64) {
        self.0 = self.0.rotate_left(17) ^ i;
    }

    fn write_usize(&mut self, i: usize) {
        self.write_u64(i as u64);
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// Builds new IdentityHashers on demand.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildIdentityHasher;

impl BuildHasher for BuildIdentityHasher {
    type Hasher = IdentityHasher;

    fn build_hasher(&self) -> Self::Hasher {
        IdentityHasher(0)
    }
}
