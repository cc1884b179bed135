//! BKDR polynomial hash over raw key bytes.

use core::hash::{BuildHasher, Hasher};

const SEED: u64 = 13131; // 31 131 1313 13131 ...
const MASK: u64 = 0x7FFF_FFFF;

/// Rolling `hash = hash * 13131 + byte` hasher.
///
/// Only `write` is meaningful; the integer `write_*` methods fall back to
/// their native-endian bytes via the default `Hasher` impls. The result is
/// masked to 31 bits.
#[derive(Clone, Debug, Default)]
pub struct BkdrHasher {
    state: u64,
}

impl Hasher for BkdrHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state = self.state.wrapping_mul(SEED).wrapping_add(b as u64);
        }
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.state & MASK
    }
}

/// Default `BuildHasher` for [`crate::Dict`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildBkdrHasher;

impl BuildHasher for BuildBkdrHasher {
    type Hasher = BkdrHasher;

    #[inline]
    fn build_hasher(&self) -> BkdrHasher {
        BkdrHasher::default()
    }
}

/// Hash `key` as a plain byte run. Unlike `BuildHasher::hash_one(&[u8])`
/// this does not mix in a length prefix.
#[inline]
pub(crate) fn hash_bytes<S: BuildHasher>(build: &S, key: &[u8]) -> u64 {
    let mut h = build.build_hasher();
    h.write(key);
    h.finish()
}
