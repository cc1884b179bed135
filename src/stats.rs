//! Chain-length statistics for inspecting bucket distribution.

use crate::dict::Dict;
use core::fmt;
use core::hash::BuildHasher;

/// Number of histogram slots; chains of length `CHAIN_HISTOGRAM_LEN - 1`
/// or longer share the last one.
pub const CHAIN_HISTOGRAM_LEN: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictStats {
    pub capacity: usize,
    pub len: usize,
    /// Buckets holding at least one entry.
    pub used_buckets: usize,
    pub max_chain_len: usize,
    /// `chain_len_histogram[n]` counts buckets whose chain has length `n`.
    pub chain_len_histogram: Vec<usize>,
}

impl DictStats {
    pub fn avg_chain_len(&self) -> f64 {
        if self.used_buckets == 0 {
            return 0.0;
        }
        self.len as f64 / self.used_buckets as f64
    }
}

impl<V, S> Dict<V, S>
where
    S: BuildHasher,
{
    pub fn stats(&self) -> DictStats {
        let mut stats = DictStats {
            capacity: self.capacity(),
            len: self.len(),
            used_buckets: 0,
            max_chain_len: 0,
            chain_len_histogram: vec![0; CHAIN_HISTOGRAM_LEN],
        };
        for head in &self.buckets {
            let mut chain_len = 0;
            let mut cur = *head;
            while let Some(k) = cur {
                chain_len += 1;
                cur = self.slots[k].next;
            }
            if chain_len > 0 {
                stats.used_buckets += 1;
            }
            stats.max_chain_len = stats.max_chain_len.max(chain_len);
            stats.chain_len_histogram[chain_len.min(CHAIN_HISTOGRAM_LEN - 1)] += 1;
        }
        stats
    }
}

impl fmt::Display for DictStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len == 0 {
            return writeln!(f, "Hash table stats: no stats available for empty dictionaries");
        }
        writeln!(f, "Hash table stats:")?;
        writeln!(f, " table size: {}", self.capacity)?;
        writeln!(f, " number of elements: {}", self.len)?;
        writeln!(f, " different slots: {}", self.used_buckets)?;
        writeln!(f, " max chain length: {}", self.max_chain_len)?;
        writeln!(f, " avg chain length: {:.2}", self.avg_chain_len())?;
        writeln!(f, " Chain length distribution:")?;
        for (n, &count) in self.chain_len_histogram.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let pct = count as f64 * 100.0 / self.capacity as f64;
            writeln!(f, "   {}: {} ({:.2}%)", n, count, pct)?;
        }
        Ok(())
    }
}
