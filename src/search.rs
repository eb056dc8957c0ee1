//! Search engine
//!
//! Scans the word store bucket by bucket in ascending length order and keeps
//! every word the compiled criteria accept. Buckets are independent, so they
//! may be scanned in parallel; the result is identical to a sequential scan.

use crate::charset::CharSet;
use crate::criteria::{Composite, Criteria, RepeatPolicy};
use crate::error::{FinderError, Result};
use crate::store::WordStore;

use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared flag a caller can raise to abort a running scan
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Scan options
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Scan length buckets on the rayon pool
    pub parallel: bool,
    pub cancel: Option<CancelToken>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            cancel: None,
        }
    }
}

/// Receives progress events from a scan
///
/// Called from worker threads when scanning in parallel.
pub trait SearchObserver: Sync {
    fn bucket_scanned(&self, _length: usize, _scanned: usize, _matched: usize) {}

    fn search_finished(&self, _matched: usize, _elapsed: Duration) {}
}

/// Observer that ignores everything
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Word search over a built store
pub struct SearchEngine<'s> {
    store: &'s WordStore,
    options: SearchOptions,
}

impl<'s> SearchEngine<'s> {
    pub fn new(store: &'s WordStore, options: SearchOptions) -> Self {
        Self { store, options }
    }

    /// Run a search, returning matches by ascending length then store order
    pub fn search(&self, criteria: &Criteria) -> Result<Vec<&'s str>> {
        self.search_observed(criteria, &NoopObserver)
    }

    /// Run a search, reporting per-bucket progress to `observer`
    pub fn search_observed(
        &self,
        criteria: &Criteria,
        observer: &dyn SearchObserver,
    ) -> Result<Vec<&'s str>> {
        let start = Instant::now();
        let lengths: Vec<usize> = self.store.available_lengths().collect();

        let buckets: Vec<Vec<&'s str>> = if self.options.parallel && lengths.len() > 1 {
            lengths
                .par_iter()
                .map(|&length| self.scan_bucket(length, criteria, observer))
                .collect::<Result<_>>()?
        } else {
            lengths
                .iter()
                .map(|&length| self.scan_bucket(length, criteria, observer))
                .collect::<Result<_>>()?
        };

        let matches: Vec<&'s str> = buckets.into_iter().flatten().collect();
        observer.search_finished(matches.len(), start.elapsed());
        Ok(matches)
    }

    fn scan_bucket(
        &self,
        length: usize,
        criteria: &Criteria,
        observer: &dyn SearchObserver,
    ) -> Result<Vec<&'s str>> {
        if self.options.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(FinderError::Cancelled);
        }

        let words = self.store.words_of_length(length);
        let matched: Vec<&'s str> = words
            .iter()
            .map(String::as_str)
            .filter(|word| matches(criteria, word))
            .collect();

        observer.bucket_scanned(length, words.len(), matched.len());
        Ok(matched)
    }
}

/// Evaluate one word against compiled criteria
#[inline]
pub fn matches(criteria: &Criteria, word: &str) -> bool {
    match criteria {
        Criteria::Regex(regex) => regex.is_match(word),
        Criteria::IncludeOnly(whitelist) => whitelist.covers(word),
        Criteria::Composite(composite) => matches_composite(composite, word),
    }
}

fn matches_composite(composite: &Composite, word: &str) -> bool {
    if let Some(ref exclude) = composite.exclude {
        if exclude.intersects(word) {
            return false;
        }
    }

    if let Some(ref include_any) = composite.include_any {
        if include_any.is_disjoint(word) {
            return false;
        }
    }

    if let Some(ref required) = composite.include_all {
        return includes_all(word, required, composite.ordered, composite.repeats);
    }

    true
}

/// Byte length of the character starting at `pos`
#[inline]
fn char_width(word: &str, pos: usize) -> usize {
    word[pos..].chars().next().map_or(1, char::len_utf8)
}

/// Check that every required matcher finds its letter in `word`
///
/// Ordered: each letter must be found strictly after the previous one, which
/// also makes repeated letters need distinct occurrences. Unordered: each
/// letter is searched from the start of the word, and `repeats` decides
/// whether repeated letters may share one occurrence.
pub fn includes_all(word: &str, required: &[CharSet], ordered: bool, repeats: RepeatPolicy) -> bool {
    if ordered {
        let mut from = 0;
        for matcher in required {
            match matcher.find_in(word, from) {
                Some(pos) => from = pos + char_width(word, pos),
                None => return false,
            }
        }
        return true;
    }

    match repeats {
        RepeatPolicy::Collapse => required.iter().all(|matcher| matcher.find_in(word, 0).is_some()),
        RepeatPolicy::Distinct => {
            let mut used: Vec<usize> = Vec::with_capacity(required.len());
            for matcher in required {
                let mut from = 0;
                loop {
                    match matcher.find_in(word, from) {
                        Some(pos) if used.contains(&pos) => from = pos + char_width(word, pos),
                        Some(pos) => {
                            used.push(pos);
                            break;
                        }
                        None => return false,
                    }
                }
            }
            true
        }
    }
}
