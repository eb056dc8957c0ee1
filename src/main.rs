//! Word Finder - find words in a word list by letter rules or regex
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;

use word_finder::cli::Args;
use word_finder::finder::{Finder, FinderConfig};
use word_finder::progress::{print_banner, print_error, print_header, print_info};

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging; RUST_LOG still takes precedence
    let default_filter = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    // Configure thread pool
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .ok();
    }

    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        let mut source = e.source();
        while let Some(err) = source {
            print_error(&format!("  Caused by: {}", err));
            source = err.source();
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    if !args.quiet {
        print_banner();
    }

    let config = FinderConfig::from_args(&args)?;

    if !args.quiet && args.verbose {
        print_config(&args, &config);
    }

    Finder::new(config).run()?;
    Ok(())
}

/// Print configuration summary
fn print_config(args: &Args, config: &FinderConfig) {
    print_header("Configuration");

    print_info(&format!("Word file:    {:?}", config.file));
    print_info(&format!(
        "Lengths:      {}..={}",
        config.load.range.min(),
        config.load.range.max()
    ));
    print_info(&format!("Strategy:     {:?}", config.load.strategy));

    let criteria = &config.criteria;
    if let Some(ref regex) = criteria.regex {
        print_info(&format!("Regex:        {}", regex));
    }
    if let Some(ref letters) = criteria.include_all {
        print_info(&format!(
            "Include all:  {} (ordered: {}, repeats: {:?})",
            letters, criteria.ordered, criteria.repeats
        ));
    }
    if let Some(ref letters) = criteria.include_only {
        print_info(&format!("Include only: {}", letters));
    }
    if let Some(ref letters) = criteria.include {
        print_info(&format!("Include any:  {}", letters));
    }
    if let Some(ref letters) = criteria.exclude {
        print_info(&format!("Exclude:      {}", letters));
    }

    print_info(&format!("Parallel:     {}", config.parallel));
    print_info(&format!("Threads:      {}", args.threads.unwrap_or_else(num_cpus::get)));
}
