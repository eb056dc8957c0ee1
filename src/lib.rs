//! # Word Finder
//!
//! Filter a large word list by the letters words contain, or by a regular
//! expression, and get the matches grouped by length.
//!
//! ## Features
//!
//! - **Include-all**: every listed letter present, optionally in order
//! - **Include-only**: words built from a letter whitelist
//! - **Include / exclude**: at least one of, or none of, a set of letters
//! - **Regex patterns**: match words against a regular expression
//! - **Length buckets**: words are indexed by length and scanned bucket by bucket
//! - **Parallel scanning**: buckets are scanned on the rayon pool
//! - **Encoding detection**: word files in other encodings are transcoded
//!
//! ## Usage
//!
//! ```bash
//! # s, t and r in that order
//! word-finder -p words.txt --include-all str --ordered
//!
//! # only letters from a whitelist
//! word-finder -p words.txt --include-only abefkst
//! ```
//!
//! ## Example
//!
//! ```rust
//! use word_finder::criteria::CriteriaInput;
//! use word_finder::search::{SearchEngine, SearchOptions};
//! use word_finder::store::{LengthRange, WordStore};
//!
//! let store = WordStore::from_lines(["strike", "streak", "retires"], LengthRange::unbounded());
//! let criteria = CriteriaInput {
//!     include_all: Some("str".to_string()),
//!     ordered: true,
//!     ..Default::default()
//! }
//! .compile()
//! .unwrap();
//!
//! let matches = SearchEngine::new(&store, SearchOptions::default())
//!     .search(&criteria)
//!     .unwrap();
//! assert_eq!(matches, vec!["strike", "streak"]);
//! ```

pub mod charset;
pub mod cli;
pub mod criteria;
pub mod error;
pub mod finder;
pub mod output;
pub mod progress;
pub mod search;
pub mod source;
pub mod store;

pub use criteria::{Criteria, CriteriaInput};
pub use error::{FinderError, Result};
pub use search::{SearchEngine, SearchOptions};
pub use store::{LengthRange, WordStore};
