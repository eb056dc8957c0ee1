//! Query orchestration
//!
//! Loads the word file, compiles the criteria, runs the scan and hands the
//! matches to the output layer.

use crate::cli::Args;
use crate::criteria::{Criteria, CriteriaInput};
use crate::output::{print_listing, write_matches};
use crate::progress::{
    create_spinner, print_header, print_info, print_store_summary, print_success, print_warning,
    SearchStats,
};
use crate::search::{CancelToken, SearchEngine, SearchOptions};
use crate::source::{load_store, LoadOptions};
use crate::store::WordStore;

use bytesize::ByteSize;
use colored::*;
use std::path::PathBuf;

/// Finder configuration
#[derive(Debug, Clone)]
pub struct FinderConfig {
    pub file: PathBuf,
    pub criteria: CriteriaInput,
    pub load: LoadOptions,
    pub parallel: bool,
    pub output: Option<PathBuf>,
    pub columns: usize,
    pub count_only: bool,
    pub show_stats: bool,
    pub quiet: bool,
    pub verbose: bool,
}

impl FinderConfig {
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        Ok(Self {
            file: args.file.clone(),
            criteria: args.criteria_input(),
            load: LoadOptions {
                strategy: args.strategy,
                range: args.length_range()?,
                detect_encoding: !args.no_detect_encoding,
            },
            parallel: !args.sequential,
            output: args.output.clone(),
            columns: args.columns,
            count_only: args.count,
            show_stats: args.stats,
            quiet: args.quiet,
            verbose: args.verbose,
        })
    }
}

/// Runs one load-then-query session
pub struct Finder {
    config: FinderConfig,
    cancel: CancelToken,
}

impl Finder {
    pub fn new(config: FinderConfig) -> Self {
        Self {
            config,
            cancel: CancelToken::new(),
        }
    }

    /// Token that aborts the scan when cancelled
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Compile criteria, load the word file and search it
    ///
    /// Criteria are compiled before loading so a bad pattern fails fast.
    pub fn run(&self) -> anyhow::Result<Vec<String>> {
        let criteria = self.config.criteria.compile()?;
        if !self.config.quiet {
            for notice in self.config.criteria.notices() {
                print_info(&notice.to_string());
            }
        }

        let store = self.load()?;
        let matches = self.search(&store, &criteria)?;

        if self.config.count_only {
            println!("{}", matches.len());
        } else if !self.config.quiet || self.config.output.is_none() {
            print_listing(&matches, self.config.columns);
        }

        if let Some(ref path) = self.config.output {
            let written = write_matches(path, &matches)?;
            if !self.config.quiet {
                print_success(&format!("{} matches written to {:?}", written, path));
            }
        }

        Ok(matches.into_iter().map(str::to_string).collect())
    }

    fn load(&self) -> anyhow::Result<WordStore> {
        let path = &self.config.file;
        if !self.config.quiet {
            let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            print_header(&format!("Loading words from: {:?} ({})", path, ByteSize(size)));
        }

        let spinner = if self.config.quiet {
            indicatif::ProgressBar::hidden()
        } else {
            create_spinner(&format!("Reading ({:?})...", self.config.load.strategy))
        };
        let store = load_store(path, &self.config.load);
        spinner.finish_and_clear();
        let store = store?;

        if self.config.verbose && !self.config.quiet {
            print_store_summary(&store);
        }
        Ok(store)
    }

    fn search<'s>(&self, store: &'s WordStore, criteria: &Criteria) -> anyhow::Result<Vec<&'s str>> {
        if !self.config.quiet {
            print_header(&format!("Searching ({} mode)...", criteria.mode_name()));
        }

        let engine = SearchEngine::new(
            store,
            SearchOptions {
                parallel: self.config.parallel,
                cancel: Some(self.cancel.clone()),
            },
        );
        let stats = SearchStats::new();
        let matches = engine.search_observed(criteria, &stats)?;

        if matches.is_empty() && !self.config.quiet {
            print_warning("No matching words found");
        }
        if self.config.show_stats && !self.config.quiet {
            stats.print_summary();
        } else if self.config.verbose {
            print_info(&format!("Scanned {} words", stats.get_words_scanned().to_string().green()));
        }

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinderError;
    use crate::store::LengthRange;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config(file: PathBuf, criteria: CriteriaInput) -> FinderConfig {
        FinderConfig {
            file,
            criteria,
            load: LoadOptions {
                range: LengthRange::new(4, 12).unwrap(),
                ..LoadOptions::default()
            },
            parallel: true,
            output: None,
            columns: 5,
            count_only: true,
            show_stats: false,
            quiet: true,
            verbose: false,
        }
    }

    fn word_file(words: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for word in words {
            writeln!(file, "{}", word).unwrap();
        }
        file
    }

    #[test]
    fn test_run_end_to_end() {
        let file = word_file(&["ant", "task", "beak", "kebab", "skate", "strike", "beekeeper"]);
        let criteria = CriteriaInput {
            include_only: Some("abefkst".to_string()),
            ..Default::default()
        };

        let found = Finder::new(config(file.path().to_path_buf(), criteria)).run().unwrap();
        // "ant" is below the minimum length
        assert_eq!(found, vec!["task", "beak", "kebab", "skate"]);
    }

    #[test]
    fn test_bad_pattern_fails_before_loading() {
        let criteria = CriteriaInput {
            regex: Some("(".to_string()),
            ..Default::default()
        };

        let err = Finder::new(config(PathBuf::from("/missing/words.txt"), criteria))
            .run()
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FinderError>(),
            Some(FinderError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let criteria = CriteriaInput {
            include: Some("a".to_string()),
            ..Default::default()
        };

        let err = Finder::new(config(PathBuf::from("/missing/words.txt"), criteria))
            .run()
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FinderError>(),
            Some(FinderError::SourceNotFound { .. })
        ));
    }

    #[test]
    fn test_cancelled_before_scan() {
        let file = word_file(&["task", "beak"]);
        let criteria = CriteriaInput {
            include: Some("a".to_string()),
            ..Default::default()
        };
        let finder = Finder::new(config(file.path().to_path_buf(), criteria));
        finder.cancel_token().cancel();

        let err = finder.run().unwrap_err();
        assert!(matches!(err.downcast_ref::<FinderError>(), Some(FinderError::Cancelled)));
    }
}
