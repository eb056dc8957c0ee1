//! Search criteria compilation
//!
//! Raw letter strings (or a regex) supplied by the user are compiled once into
//! an immutable `Criteria` before any word is scanned. A malformed pattern or
//! an empty request is rejected here, never mid-scan.

use crate::charset::CharSet;
use crate::error::{FinderError, Result};
use regex::Regex;
use std::fmt;

/// How unordered include-all treats a repeated required letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatPolicy {
    /// Every required letter is searched from the start of the word, so "ss"
    /// is satisfied by a single 's'
    #[default]
    Collapse,
    /// Every required letter needs its own position, so "ss" needs two
    Distinct,
}

/// Raw, uncompiled search request
#[derive(Debug, Clone, Default)]
pub struct CriteriaInput {
    pub regex: Option<String>,
    /// Letters that must all be present, repeats counted
    pub include_all: Option<String>,
    /// Whitelist: the word may use no other letter
    pub include_only: Option<String>,
    /// At least one of these letters must be present
    pub include: Option<String>,
    /// None of these letters may be present
    pub exclude: Option<String>,
    /// Include-all letters must appear in the given order
    pub ordered: bool,
    pub repeats: RepeatPolicy,
}

/// Informational message about supplied options that have no effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    RegexOverrides,
    IncludeOnlyOverrides,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::RegexOverrides => {
                write!(f, "'regex' was specified, all other letter options will be ignored")
            }
            Notice::IncludeOnlyOverrides => write!(
                f,
                "'include-only' was specified, include-all/include/exclude will be ignored"
            ),
        }
    }
}

/// Absent and empty strings impose no constraint
fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl CriteriaInput {
    fn regex(&self) -> Option<&str> {
        supplied(&self.regex)
    }

    fn letter_options(&self) -> [Option<&str>; 4] {
        [
            supplied(&self.include_all),
            supplied(&self.include_only),
            supplied(&self.include),
            supplied(&self.exclude),
        ]
    }

    /// True when at least one criterion would constrain the search
    pub fn has_criteria(&self) -> bool {
        self.regex().is_some() || self.letter_options().iter().any(Option::is_some)
    }

    /// Options that were supplied but are overridden by a stronger mode
    pub fn notices(&self) -> Vec<Notice> {
        let [include_all, include_only, include, exclude] = self.letter_options();
        let mut notices = Vec::new();

        if self.regex().is_some() {
            if include_all.is_some() || include_only.is_some() || include.is_some() || exclude.is_some() {
                notices.push(Notice::RegexOverrides);
            }
        } else if include_only.is_some()
            && (include_all.is_some() || include.is_some() || exclude.is_some())
        {
            notices.push(Notice::IncludeOnlyOverrides);
        }

        notices
    }

    /// Compile the request
    pub fn compile(&self) -> Result<Criteria> {
        if !self.has_criteria() {
            return Err(FinderError::invalid_argument(
                "At least one search criteria must be provided",
            ));
        }

        for notice in self.notices() {
            log::info!("{}", notice);
        }

        if let Some(pattern) = self.regex() {
            let regex = Regex::new(pattern).map_err(|source| FinderError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
            log::debug!("Compiled regex criteria: {}", regex.as_str());
            return Ok(Criteria::Regex(regex));
        }

        let [include_all, include_only, include, exclude] = self.letter_options();

        if let Some(letters) = include_only {
            log::debug!("Include-only criteria: {:?}", letters);
            return Ok(Criteria::IncludeOnly(CharSet::new(letters)));
        }

        log::debug!(
            "Composite criteria: include-all {:?} (ordered: {}), include {:?}, exclude {:?}",
            include_all,
            self.ordered,
            include,
            exclude
        );

        Ok(Criteria::Composite(Composite {
            exclude: exclude.map(CharSet::new),
            include_any: include.map(CharSet::new),
            include_all: include_all.map(|letters| letters.chars().map(CharSet::single).collect()),
            ordered: self.ordered,
            repeats: self.repeats,
        }))
    }
}

/// Compiled search request
#[derive(Debug, Clone)]
pub enum Criteria {
    /// Word matches iff the pattern matches it
    Regex(Regex),
    /// Word matches iff every character is in the whitelist
    IncludeOnly(CharSet),
    /// Exclude, include-any and include-all checks, in that order
    Composite(Composite),
}

/// Letter constraints of composite mode; an absent part constrains nothing
#[derive(Debug, Clone)]
pub struct Composite {
    pub exclude: Option<CharSet>,
    pub include_any: Option<CharSet>,
    /// One single-letter matcher per typed letter, repeats kept
    pub include_all: Option<Vec<CharSet>>,
    pub ordered: bool,
    pub repeats: RepeatPolicy,
}

impl Criteria {
    /// Short label for logs and summaries
    pub fn mode_name(&self) -> &'static str {
        match self {
            Criteria::Regex(_) => "regex",
            Criteria::IncludeOnly(_) => "include-only",
            Criteria::Composite(_) => "composite",
        }
    }
}
