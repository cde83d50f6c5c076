//! Symbol frequency analysis.

use crate::codec::params::CodecParams;
use crate::codec::symbol::Symbol;
use crate::utils::error::{HuffmanError, Result};
use std::collections::BTreeMap;

/// Occurrence counts for every distinct symbol of an input.
///
/// Keys iterate in ascending symbol order, which fixes the order in which
/// leaves enter the tree builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<S: Symbol> {
    counts: BTreeMap<S, u64>,
}

impl<S: Symbol> FrequencyTable<S> {
    /// Counts every symbol of `input` with default parameters.
    pub fn from_symbols(input: &[S]) -> Result<Self> {
        Self::from_symbols_with(input, &CodecParams::default())
    }

    /// Counts every symbol of `input`.
    ///
    /// With the `rayon` feature enabled, inputs of at least
    /// `params.parallel_threshold` symbols are counted in parallel.
    pub fn from_symbols_with(input: &[S], params: &CodecParams) -> Result<Self> {
        if input.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }

        #[cfg(feature = "rayon")]
        {
            if input.len() >= params.parallel_threshold {
                return Ok(Self {
                    counts: count_parallel(input, params.parallel_threshold),
                });
            }
        }
        #[cfg(not(feature = "rayon"))]
        let _ = params;

        Ok(Self {
            counts: count_sequential(input),
        })
    }

    /// Builds a table from explicit `(symbol, count)` pairs.
    ///
    /// Zero counts are dropped and repeated symbols are summed. The total of
    /// all counts must fit in a `u64`.
    pub fn from_counts<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
    {
        let overflow = || HuffmanError::InvalidFormat("counts overflow u64".to_string());
        let mut counts = BTreeMap::new();
        let mut total = 0u64;
        for (symbol, count) in pairs {
            if count > 0 {
                total = total.checked_add(count).ok_or_else(overflow)?;
                *counts.entry(symbol).or_insert(0) += count;
            }
        }
        if counts.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }
        Ok(Self { counts })
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Count for `symbol`, if it occurs.
    pub fn get(&self, symbol: &S) -> Option<u64> {
        self.counts.get(symbol).copied()
    }

    /// Sum of all counts, equal to the input length.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterates `(symbol, count)` in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (S, u64)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }
}

fn count_sequential<S: Symbol>(input: &[S]) -> BTreeMap<S, u64> {
    input.iter().fold(BTreeMap::new(), |mut acc, &symbol| {
        *acc.entry(symbol).or_insert(0) += 1;
        acc
    })
}

#[cfg(feature = "rayon")]
fn count_parallel<S: Symbol>(input: &[S], chunk_len: usize) -> BTreeMap<S, u64> {
    use rayon::prelude::*;

    let chunk_len = (chunk_len / rayon::current_num_threads().max(1)).max(4096);
    input
        .par_chunks(chunk_len)
        .map(count_sequential)
        .reduce(BTreeMap::new, |mut merged, part| {
            for (symbol, count) in part {
                *merged.entry(symbol).or_insert(0) += count;
            }
            merged
        })
}
