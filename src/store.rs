//! Length-bucketed word store
//!
//! Words are grouped by their length in characters, keeping file order inside
//! each bucket. The store is filled once and then only read, so a built store
//! can be shared across scanning threads freely.

use crate::error::{FinderError, Result};
use std::collections::BTreeMap;

/// Inclusive range of word lengths accepted at load time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthRange {
    min: usize,
    max: usize,
}

impl LengthRange {
    /// Create a range, rejecting `min < 1` and `min > max`
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if min < 1 {
            return Err(FinderError::invalid_argument(format!(
                "Minimum length must be at least 1 (got {})",
                min
            )));
        }
        if min > max {
            return Err(FinderError::invalid_argument(format!(
                "Minimum length ({}) cannot be greater than maximum length ({})",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// Range accepting every non-empty word
    pub const fn unbounded() -> Self {
        Self {
            min: 1,
            max: usize::MAX,
        }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    #[inline]
    pub fn contains(&self, length: usize) -> bool {
        length >= self.min && length <= self.max
    }
}

impl Default for LengthRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Length of a word in characters, with a fast path for ASCII
#[inline]
pub fn word_length(word: &str) -> usize {
    if word.is_ascii() {
        word.len()
    } else {
        word.chars().count()
    }
}

/// Words bucketed by length
///
/// A length key exists only while its bucket is non-empty, and every word in
/// bucket `L` is exactly `L` characters long. Duplicates are kept.
#[derive(Debug, Clone, Default)]
pub struct WordStore {
    buckets: BTreeMap<usize, Vec<String>>,
}

impl WordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from `lines` in one step
    pub fn from_lines<I, S>(lines: I, range: LengthRange) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut store = Self::new();
        store.load(lines, range);
        store
    }

    /// Append every line whose length falls within `range` to its bucket
    ///
    /// Returns the number of words stored.
    pub fn load<I, S>(&mut self, lines: I, range: LengthRange) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut stored = 0;
        for line in lines {
            let word = line.into();
            let length = word_length(&word);
            if length == 0 || !range.contains(length) {
                continue;
            }
            self.buckets.entry(length).or_default().push(word);
            stored += 1;
        }

        log::debug!(
            "Stored {} words in {} length buckets ({}..={})",
            stored,
            self.buckets.len(),
            range.min(),
            range.max()
        );
        stored
    }

    /// Words of exactly `length` characters, in load order
    pub fn words_of_length(&self, length: usize) -> &[String] {
        self.buckets.get(&length).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ascending lengths that hold at least one word
    pub fn available_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.keys().copied()
    }

    /// Total number of stored words, duplicates included
    pub fn total_words(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Up to `max` words spread evenly over one bucket
    ///
    /// The bucket is cut into `max` chunks of equal size and the first word of
    /// each chunk is taken, so the samples reflect the whole bucket rather than
    /// its head.
    pub fn samples(&self, length: usize, max: usize) -> Vec<&str> {
        let words = self.words_of_length(length);
        if words.is_empty() || max == 0 {
            return Vec::new();
        }

        let chunk = words.len().div_ceil(max);
        words
            .chunks(chunk)
            .filter_map(|c| c.first())
            .map(String::as_str)
            .take(max)
            .collect()
    }
}
