//! Dict: byte-keyed table with chained buckets over a generational arena.
//!
//! Entries live in a `SlotMap`; each bucket stores the arena key of its
//! chain head and every entry stores the key of its successor. Chains are
//! appended at the tail, so within one bucket entries keep insertion order.

use crate::error::DictError;
use crate::hash::{hash_bytes, BuildBkdrHasher};
use crate::iter::{Iter, Keys, Values};
use crate::schedule::{self, MAX_STAGE};
use core::fmt;
use core::hash::BuildHasher;
use core::mem;
use slotmap::{DefaultKey, SlotMap};
use tracing::{debug, trace, warn};

pub(crate) type Link = Option<DefaultKey>;

#[derive(Debug)]
pub(crate) struct Entry<V> {
    pub(crate) key: Box<[u8]>,
    pub(crate) value: V,
    pub(crate) hash: u64,
    pub(crate) next: Link,
}

/// Runtime knobs for a [`Dict`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DictOptions {
    /// Upper bound on the bucket count. The table grows through schedule
    /// primes up to the largest one not exceeding this value; a pending
    /// insertion that would need more fails with `CapacityExhausted`.
    pub max_capacity: usize,
}

impl Default for DictOptions {
    fn default() -> Self {
        Self {
            max_capacity: schedule::capacity_at(MAX_STAGE),
        }
    }
}

pub struct Dict<V, S = BuildBkdrHasher> {
    hasher: S,
    pub(crate) buckets: Vec<Link>,
    pub(crate) slots: SlotMap<DefaultKey, Entry<V>>,
    stage: usize,
    max_stage: usize,
}

fn alloc_buckets(capacity: usize) -> Result<Vec<Link>, DictError> {
    let mut buckets = Vec::new();
    buckets.try_reserve_exact(capacity)?;
    buckets.resize(capacity, None);
    Ok(buckets)
}

fn copy_key(key: &[u8]) -> Result<Box<[u8]>, DictError> {
    let mut owned = Vec::new();
    owned.try_reserve_exact(key.len())?;
    owned.extend_from_slice(key);
    Ok(owned.into_boxed_slice())
}

#[inline]
fn bucket_index(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

impl<V> Dict<V> {
    pub fn new() -> Self {
        Self::with_hasher(BuildBkdrHasher)
    }

    /// Like [`Dict::new`], but reports a failed bucket allocation instead of
    /// aborting.
    pub fn try_new() -> Result<Self, DictError> {
        Self::try_with_hasher_and_options(BuildBkdrHasher, DictOptions::default())
    }

    pub fn with_options(options: DictOptions) -> Self {
        Self::with_hasher_and_options(BuildBkdrHasher, options)
    }
}

impl<V> Default for Dict<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S> Dict<V, S>
where
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_hasher_and_options(hasher, DictOptions::default())
    }

    pub fn with_hasher_and_options(hasher: S, options: DictOptions) -> Self {
        Self {
            hasher,
            buckets: vec![None; schedule::capacity_at(0)],
            slots: SlotMap::with_key(),
            stage: 0,
            max_stage: schedule::last_stage_within(options.max_capacity),
        }
    }

    pub fn try_with_hasher_and_options(hasher: S, options: DictOptions) -> Result<Self, DictError> {
        Ok(Self {
            hasher,
            buckets: alloc_buckets(schedule::capacity_at(0))?,
            slots: SlotMap::with_key(),
            stage: 0,
            max_stage: schedule::last_stage_within(options.max_capacity),
        })
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current bucket count; always a member of the growth schedule.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Current index into the growth schedule.
    pub fn stage(&self) -> usize {
        self.stage
    }

    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    fn find_with_hash(&self, hash: u64, key: &[u8]) -> Link {
        let mut cur = self.buckets[bucket_index(hash, self.capacity())];
        while let Some(k) = cur {
            let e = &self.slots[k];
            if e.hash == hash && *e.key == *key {
                return Some(k);
            }
            cur = e.next;
        }
        None
    }

    fn find(&self, key: &[u8]) -> Link {
        self.find_with_hash(hash_bytes(&self.hasher, key), key)
    }

    /// Insert or overwrite. Returns the previous value when `key` was
    /// already present; in that case the stored key bytes are kept and the
    /// table never grows.
    ///
    /// A new key is copied first and may then trigger a resize. Both steps
    /// run before any entry or bucket is touched, so on failure the error is
    /// returned and the table (stage included) is left as it was.
    pub fn set(&mut self, key: &[u8], value: V) -> Result<Option<V>, DictError> {
        let hash = hash_bytes(&self.hasher, key);
        if let Some(k) = self.find_with_hash(hash, key) {
            let old = mem::replace(&mut self.slots[k].value, value);
            return Ok(Some(old));
        }

        let key = copy_key(key)?;
        if !schedule::within_load_limit(self.len() + 1, self.capacity()) {
            self.resize()?;
        }

        let k = self.slots.insert(Entry {
            key,
            value,
            hash,
            next: None,
        });
        let idx = bucket_index(hash, self.capacity());
        match self.buckets[idx] {
            None => self.buckets[idx] = Some(k),
            Some(mut tail) => {
                while let Some(next) = self.slots[tail].next {
                    tail = next;
                }
                self.slots[tail].next = Some(k);
            }
        }
        Ok(None)
    }

    pub fn get(&self, key: &[u8]) -> Option<&V> {
        self.find(key).map(|k| &self.slots[k].value)
    }

    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        let k = self.find(key)?;
        self.slots.get_mut(k).map(|e| &mut e.value)
    }

    pub fn has(&self, key: &[u8]) -> bool {
        self.find(key).is_some()
    }

    /// Remove `key`, handing its value back. Never shrinks the table.
    pub fn del(&mut self, key: &[u8]) -> Result<V, DictError> {
        let hash = hash_bytes(&self.hasher, key);
        let idx = bucket_index(hash, self.capacity());

        let mut prev: Link = None;
        let mut cur = self.buckets[idx];
        while let Some(k) = cur {
            let e = &self.slots[k];
            let next = e.next;
            if e.hash == hash && *e.key == *key {
                // Unlink first, then free the entry and its key copy.
                match prev {
                    None => self.buckets[idx] = next,
                    Some(p) => self.slots[p].next = next,
                }
                return self
                    .slots
                    .remove(k)
                    .map(|e| e.value)
                    .ok_or(DictError::NotFound);
            }
            prev = cur;
            cur = next;
        }
        Err(DictError::NotFound)
    }

    /// Drop every entry. Capacity and growth stage are retained.
    pub fn clear(&mut self) {
        trace!(len = self.len(), capacity = self.capacity(), "dict cleared");
        self.slots.clear();
        self.buckets.fill(None);
    }

    /// Move to the next schedule stage and relink every entry.
    ///
    /// Both new arrays are allocated before anything is touched; the relink
    /// itself cannot fail, so the table is either fully rebuilt or
    /// untouched.
    fn resize(&mut self) -> Result<(), DictError> {
        let from = self.capacity();
        if self.stage >= self.max_stage {
            warn!(capacity = from, len = self.len(), "dict growth refused: schedule exhausted");
            return Err(DictError::CapacityExhausted { capacity: from });
        }

        let stage = self.stage + 1;
        let to = schedule::capacity_at(stage);
        let mut buckets = alloc_buckets(to)?;
        let mut tails = alloc_buckets(to)?;

        for i in 0..from {
            let mut cur = self.buckets[i];
            while let Some(k) = cur {
                let (hash, next) = {
                    let e = &mut self.slots[k];
                    (e.hash, e.next.take())
                };
                let idx = bucket_index(hash, to);
                match tails[idx] {
                    None => buckets[idx] = Some(k),
                    Some(t) => self.slots[t].next = Some(k),
                }
                tails[idx] = Some(k);
                cur = next;
            }
        }

        self.buckets = buckets;
        self.stage = stage;
        debug!(from, to, stage, len = self.len(), "dict resized");
        Ok(())
    }

    /// Cursor over `(key, value)` pairs in bucket order, then chain order.
    pub fn iter(&self) -> Iter<'_, V, S> {
        Iter::new(self)
    }

    pub fn keys(&self) -> Keys<'_, V, S> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, V, S> {
        Values { inner: self.iter() }
    }
}

impl<'a, V, S> IntoIterator for &'a Dict<V, S>
where
    S: BuildHasher,
{
    type Item = (&'a [u8], &'a V);
    type IntoIter = Iter<'a, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V, S> fmt::Debug for Dict<V, S>
where
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(k, v)| (String::from_utf8_lossy(k), v)))
            .finish()
    }
}
