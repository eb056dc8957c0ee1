//! Command-line interface definition for word-finder
//!
//! Parsing only; the arguments are turned into typed options for the library.

use crate::criteria::{CriteriaInput, RepeatPolicy};
use crate::error::Result;
use crate::output::DEFAULT_COLUMNS;
use crate::source::ReadStrategy;
use crate::store::LengthRange;

use clap::Parser;
use std::path::PathBuf;

/// Find words in a word list by the letters they contain
#[derive(Parser, Debug, Clone)]
#[command(
    name = "word-finder",
    version,
    about = "Find words by letters they must, may only, or must not contain",
    long_about = r#"
Search a word list (one word per line) for words matching letter rules or a
regular expression. Matches are listed grouped by length.

Modes (strongest wins):
    --regex          pattern match; all letter options are ignored
    --include-only   whitelist; include-all/include/exclude are ignored
    otherwise        exclude, include and include-all combine

EXAMPLES:
    # Letters s, t, r all present, in that order
    word-finder -p words.txt --include-all str --ordered

    # Built only from these letters
    word-finder -p words.txt --include-only abefkst

    # At least one of e/s, none of j/z/x, 8 to 16 letters
    word-finder -p words.txt --include es --exclude jzx -n 8 -x 16

    # Regular expression
    word-finder -p words.txt -r "^a.*z$"
"#
)]
pub struct Args {
    /// Path to the words file (text, one word per line)
    #[arg(short = 'p', long, required = true, value_name = "FILE-PATH")]
    pub file: PathBuf,

    /// Regular expression for word matching
    #[arg(short, long, value_name = "EXPRESSION")]
    pub regex: Option<String>,

    /// Letters that must all be present in the word (repeats count when ordered)
    #[arg(short = 'a', long, visible_alias = "includeAll", value_name = "LETTERS")]
    pub include_all: Option<String>,

    /// The only letters the word may be made of
    #[arg(short = 'w', long, visible_alias = "includeOnly", value_name = "LETTERS")]
    pub include_only: Option<String>,

    /// Letters of which at least one must appear in the word
    #[arg(short, long, visible_alias = "any", value_name = "LETTERS")]
    pub include: Option<String>,

    /// Letters that cannot appear in the word
    #[arg(short, long, visible_alias = "not", value_name = "LETTERS")]
    pub exclude: Option<String>,

    /// With --include-all, letters must appear in the given order, repeats included ("ss", "rr")
    #[arg(short, long, default_value_t = false)]
    pub ordered: bool,

    /// With unordered --include-all, a repeated letter needs its own occurrence in the word
    #[arg(long, default_value_t = false)]
    pub distinct_repeats: bool,

    /// Minimum word length
    #[arg(short = 'n', long, visible_alias = "min", value_name = "LENGTH", default_value_t = 4)]
    pub min_length: usize,

    /// Maximum word length
    #[arg(short = 'x', long, visible_alias = "max", value_name = "LENGTH", default_value_t = 12)]
    pub max_length: usize,

    /// How the word file is read
    #[arg(long, value_enum, default_value_t = ReadStrategy::ReadAll)]
    pub strategy: ReadStrategy,

    /// Assume UTF-8 instead of detecting the file encoding
    #[arg(long, default_value_t = false)]
    pub no_detect_encoding: bool,

    /// Also write matches to this file, one per line
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Words per row in the listing
    #[arg(long, value_name = "NUM", default_value_t = DEFAULT_COLUMNS)]
    pub columns: usize,

    /// Print only the number of matches
    #[arg(long, default_value_t = false)]
    pub count: bool,

    /// Scan length buckets one after another instead of in parallel
    #[arg(long, default_value_t = false)]
    pub sequential: bool,

    /// Number of threads (default: auto-detect)
    #[arg(short = 't', long, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Show scan statistics
    #[arg(long, default_value_t = false)]
    pub stats: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging and a summary of the loaded words
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Raw search request from the letter and regex options
    pub fn criteria_input(&self) -> CriteriaInput {
        CriteriaInput {
            regex: self.regex.clone(),
            include_all: self.include_all.clone(),
            include_only: self.include_only.clone(),
            include: self.include.clone(),
            exclude: self.exclude.clone(),
            ordered: self.ordered,
            repeats: if self.distinct_repeats {
                RepeatPolicy::Distinct
            } else {
                RepeatPolicy::Collapse
            },
        }
    }

    /// Validated load-time length range
    pub fn length_range(&self) -> Result<LengthRange> {
        LengthRange::new(self.min_length, self.max_length)
    }
}
