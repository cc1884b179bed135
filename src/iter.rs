//! Cursor iteration over a [`Dict`].
//!
//! The cursor walks buckets in index order and each chain from head to
//! tail. It borrows the table, so the table cannot be mutated while an
//! iterator is alive.

use crate::dict::{Dict, Link};
use core::hash::BuildHasher;
use core::iter::FusedIterator;

pub struct Iter<'a, V, S> {
    dict: &'a Dict<V, S>,
    bucket: usize,
    node: Link,
    remaining: usize,
}

impl<'a, V, S> Iter<'a, V, S>
where
    S: BuildHasher,
{
    pub(crate) fn new(dict: &'a Dict<V, S>) -> Self {
        Self {
            dict,
            bucket: 0,
            node: None,
            remaining: dict.len(),
        }
    }

    /// Rewind to the first entry.
    pub fn reset(&mut self) {
        self.bucket = 0;
        self.node = None;
        self.remaining = self.dict.len();
    }
}

impl<'a, V, S> Iterator for Iter<'a, V, S> {
    type Item = (&'a [u8], &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        // Seek to a non-empty chain.
        while self.node.is_none() {
            let head = self.dict.buckets.get(self.bucket)?;
            self.node = *head;
            self.bucket += 1;
        }
        let k = self.node?;
        let e = &self.dict.slots[k];
        self.node = e.next;
        self.remaining -= 1;
        Some((&e.key[..], &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V, S> ExactSizeIterator for Iter<'_, V, S> {}
impl<V, S> FusedIterator for Iter<'_, V, S> {}

pub struct Keys<'a, V, S> {
    pub(crate) inner: Iter<'a, V, S>,
}

impl<'a, V, S> Iterator for Keys<'a, V, S> {
    type Item = &'a [u8];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V, S> ExactSizeIterator for Keys<'_, V, S> {}
impl<V, S> FusedIterator for Keys<'_, V, S> {}

pub struct Values<'a, V, S> {
    pub(crate) inner: Iter<'a, V, S>,
}

impl<'a, V, S> Iterator for Values<'a, V, S> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V, S> ExactSizeIterator for Values<'_, V, S> {}
impl<V, S> FusedIterator for Values<'_, V, S> {}
