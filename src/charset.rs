//! Character-set matching
//!
//! A `CharSet` answers membership questions about the characters of a word:
//! does the word share any character with the set, avoid it entirely, use
//! nothing but it, and where is the next member at or after a position.
//!
//! ASCII members live in a 128-bit table for O(1) lookup. Anything outside
//! ASCII falls back to a hash set, so arbitrary Unicode letters work too.

use ahash::RandomState;
use hashbrown::HashSet;

/// Set of characters built from a string of letters
#[derive(Debug, Clone, Default)]
pub struct CharSet {
    /// Bit `n` of word `n / 64` is set when ASCII code `n` is a member
    ascii: [u64; 2],
    /// Non-ASCII members, allocated only when needed
    other: Option<HashSet<char, RandomState>>,
}

impl CharSet {
    /// Build a set from every character of `letters` (repeats collapse)
    pub fn new(letters: &str) -> Self {
        let mut set = Self::default();
        for c in letters.chars() {
            set.insert(c);
        }
        set
    }

    /// Set holding exactly one character
    pub fn single(c: char) -> Self {
        let mut set = Self::default();
        set.insert(c);
        set
    }

    fn insert(&mut self, c: char) {
        if c.is_ascii() {
            let code = c as usize;
            self.ascii[code >> 6] |= 1u64 << (code & 63);
        } else {
            self.other
                .get_or_insert_with(|| HashSet::with_hasher(RandomState::new()))
                .insert(c);
        }
    }

    #[inline]
    fn contains_byte(&self, b: u8) -> bool {
        let code = b as usize;
        code < 128 && self.ascii[code >> 6] & (1u64 << (code & 63)) != 0
    }

    /// Check whether `c` is a member
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        if c.is_ascii() {
            self.contains_byte(c as u8)
        } else {
            self.other.as_ref().is_some_and(|other| other.contains(&c))
        }
    }

    /// Number of distinct members
    pub fn len(&self) -> usize {
        let ascii = (self.ascii[0].count_ones() + self.ascii[1].count_ones()) as usize;
        ascii + self.other.as_ref().map_or(0, |other| other.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when every member is ASCII
    pub fn is_ascii(&self) -> bool {
        self.other.as_ref().map_or(true, |other| other.is_empty())
    }

    /// The word contains at least one member of the set
    #[inline]
    pub fn intersects(&self, word: &str) -> bool {
        if word.is_ascii() {
            word.bytes().any(|b| self.contains_byte(b))
        } else {
            word.chars().any(|c| self.contains(c))
        }
    }

    /// The word contains no member of the set
    #[inline]
    pub fn is_disjoint(&self, word: &str) -> bool {
        !self.intersects(word)
    }

    /// Every character of the word is a member (the set is a whitelist)
    #[inline]
    pub fn covers(&self, word: &str) -> bool {
        if word.is_ascii() {
            word.bytes().all(|b| self.contains_byte(b))
        } else {
            word.chars().all(|c| self.contains(c))
        }
    }

    /// Byte offset of the first member at or after byte offset `from`
    ///
    /// `from` must lie on a character boundary of `word`; offsets past the end
    /// simply find nothing.
    #[inline]
    pub fn find_in(&self, word: &str, from: usize) -> Option<usize> {
        let tail = word.get(from..)?;
        if tail.is_ascii() {
            tail.bytes()
                .position(|b| self.contains_byte(b))
                .map(|i| from + i)
        } else {
            tail.char_indices()
                .find(|&(_, c)| self.contains(c))
                .map(|(i, _)| from + i)
        }
    }
}
