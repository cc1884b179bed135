//! chained-dict: a single-threaded hash table from byte-string keys to
//! caller values, using separate chaining and a prime growth schedule.
//!
//! Internal Design:
//!
//! Summary
//! - `Dict<V, S>` owns a bucket array, a generational arena of entries and
//!   a growth stage. Buckets hold the arena key of a chain head; each
//!   entry links to the next entry of its chain.
//! - Keys are copied into owned storage on first insertion. Values are
//!   moved in and handed back on overwrite or deletion; the table never
//!   clones or inspects them.
//! - Hashing is pluggable through `S: BuildHasher`. The default,
//!   `BuildBkdrHasher`, is the BKDR rolling hash (seed 13131) masked to
//!   31 bits.
//!
//! Constraints
//! - Single-threaded: no internal synchronization.
//! - Capacity is always a prime from `schedule::TABLE_SIZES` and never
//!   shrinks, not even on `clear`.
//! - After any completed insertion, `len <= capacity * 3 / 4`. A new key
//!   that would break this first grows the table by one stage.
//!
//! Hasher and rehashing invariants
//! - Each entry caches its hash. Resizing recomputes bucket indices from
//!   the cached hash, so the hasher is never invoked during a rehash.
//! - Resizing allocates the new bucket array before relinking; a failed
//!   allocation or an exhausted schedule leaves the table untouched.
//!
//! Iteration
//! - `Iter` is a cursor over buckets in index order, then chain order. It
//!   borrows the table, so mutation during iteration does not compile.
//!   `Iter::reset` rewinds the cursor in place.

pub mod dict;
mod dict_proptest;
pub mod error;
pub mod hash;
pub mod iter;
pub mod schedule;
pub mod stats;

// Public surface
pub use dict::{Dict, DictOptions};
pub use error::DictError;
pub use hash::{BkdrHasher, BuildBkdrHasher};
pub use iter::{Iter, Keys, Values};
pub use stats::DictStats;
