//! Console display module
//!
//! Styled messages, the load spinner, and search statistics.

use crate::search::SearchObserver;
use crate::store::WordStore;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Print the application banner
pub fn print_banner() {
    let banner = r#"
╔══════════════════════════════════════════════════════════════╗
║                         WORD-FINDER                          ║
║        Find words by the letters they hold (or avoid)        ║
╚══════════════════════════════════════════════════════════════╝
"#;

    println!("{}", banner.green());
}

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    println!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Print a bullet point
pub fn print_bullet(text: &str) {
    println!("  {} {}", "•".green(), text);
}

/// Create a styled spinner for indeterminate progress
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();

    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        pb.set_style(style.tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "));
    }

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Print per-length word counts with a few samples from each bucket
pub fn print_store_summary(store: &WordStore) {
    print_header(&format!(
        "Loaded {} words in {} lengths",
        format_number(store.total_words() as u64),
        store.bucket_count()
    ));

    for length in store.available_lengths() {
        let count = store.words_of_length(length).len();
        let shown = 1 + 80 / (length + 4);
        let samples = store.samples(length, shown);
        let mut line = format!("{:<3}: {}", length, samples.join(", "));
        if count > samples.len() {
            line.push_str(&format!(", (more {})", count - samples.len()));
        }
        print_bullet(&line);
    }
}

/// Search statistics, fed by the engine as an observer
#[derive(Debug)]
pub struct SearchStats {
    pub buckets_scanned: AtomicU64,
    pub words_scanned: AtomicU64,
    pub matched_words: AtomicU64,
    pub start_time: Instant,
}

impl SearchStats {
    pub fn new() -> Self {
        Self {
            buckets_scanned: AtomicU64::new(0),
            words_scanned: AtomicU64::new(0),
            matched_words: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn get_buckets_scanned(&self) -> u64 {
        self.buckets_scanned.load(Ordering::Relaxed)
    }

    pub fn get_words_scanned(&self) -> u64 {
        self.words_scanned.load(Ordering::Relaxed)
    }

    pub fn get_matched_words(&self) -> u64 {
        self.matched_words.load(Ordering::Relaxed)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn words_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.get_words_scanned() as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Print final statistics
    pub fn print_summary(&self) {
        println!();
        println!("{}", "═".repeat(60).green());
        println!("  {} {}", "Buckets scanned:".green(), self.get_buckets_scanned());
        println!("  {} {}", "Words scanned:  ".green(), format_number(self.get_words_scanned()));
        println!(
            "  {} {}",
            "Matches:        ".green().bold(),
            format_number(self.get_matched_words()).green().bold()
        );
        println!("  {} {}", "Duration:       ".green(), format_duration(self.elapsed()));
        println!("  {} {:.2} words/sec", "Throughput:     ".green(), self.words_per_second());
        println!("{}", "═".repeat(60).green());
    }
}

impl Default for SearchStats {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchObserver for SearchStats {
    fn bucket_scanned(&self, length: usize, scanned: usize, matched: usize) {
        self.buckets_scanned.fetch_add(1, Ordering::Relaxed);
        self.words_scanned.fetch_add(scanned as u64, Ordering::Relaxed);
        self.matched_words.fetch_add(matched as u64, Ordering::Relaxed);
        log::debug!("Length {:>2}: {} of {} words matched", length, matched, scanned);
    }

    fn search_finished(&self, matched: usize, elapsed: Duration) {
        log::info!(
            "{} of {} words matched in {}",
            matched,
            self.get_words_scanned(),
            format_duration(elapsed)
        );
    }
}

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs == 0 {
        format!("{}ms", duration.as_millis())
    } else if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(370105), "370,105");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_secs(30)), "30.0s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
    }

    #[test]
    fn test_stats_observer() {
        let stats = SearchStats::new();

        stats.bucket_scanned(4, 100, 10);
        stats.bucket_scanned(5, 50, 5);

        assert_eq!(stats.get_buckets_scanned(), 2);
        assert_eq!(stats.get_words_scanned(), 150);
        assert_eq!(stats.get_matched_words(), 15);
    }
}
