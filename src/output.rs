//! Output module
//!
//! Lays matches out as a grouped, column-aligned listing on the console and
//! optionally writes them to a plain text file.

use crate::store::word_length;

use colored::*;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default number of words per listing row
pub const DEFAULT_COLUMNS: usize = 5;

/// Spaces added to the longest match to form a column
const COLUMN_PADDING: usize = 4;

/// Matches of one length, sorted
#[derive(Debug, PartialEq, Eq)]
pub struct LengthGroup<'a> {
    pub length: usize,
    pub words: Vec<&'a str>,
}

impl LengthGroup<'_> {
    /// Header line, e.g. `Length 05: 3 word(s)`
    pub fn header(&self) -> String {
        let plural = if self.words.len() > 1 { "(s)" } else { "" };
        format!("Length {:02}: {} word{}", self.length, self.words.len(), plural)
    }

    /// Rows of at most `columns` words, each word padded to `column_width`
    pub fn rows(&self, columns: usize, column_width: usize) -> Vec<String> {
        let gap = " ".repeat(column_width.saturating_sub(self.length));
        self.words
            .chunks(columns.max(1))
            .map(|row| format!("  {}", row.join(gap.as_str())))
            .collect()
    }
}

/// Sort matches by length, then alphabetically, and group them by length
pub fn group_by_length<'a>(matches: &[&'a str]) -> Vec<LengthGroup<'a>> {
    let mut sorted: Vec<(usize, &'a str)> = matches.iter().map(|w| (word_length(w), *w)).collect();
    sorted.sort_unstable();

    let mut groups: Vec<LengthGroup<'a>> = Vec::new();
    for (length, word) in sorted {
        match groups.last_mut() {
            Some(group) if group.length == length => group.words.push(word),
            _ => groups.push(LengthGroup {
                length,
                words: vec![word],
            }),
        }
    }
    groups
}

/// Print the grouped listing
pub fn print_listing(matches: &[&str], columns: usize) {
    println!("\nFound {} matching words:", matches.len().to_string().green().bold());

    let groups = group_by_length(matches);
    let longest = groups.last().map_or(0, |g| g.length);
    let column_width = longest + COLUMN_PADDING;

    for group in &groups {
        println!("{}", group.header().cyan());
        for row in group.rows(columns, column_width) {
            println!("{}", row);
        }
    }
    println!();
}

/// Buffered writer for the result file
pub struct OutputWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    lines_written: u64,
}

impl OutputWriter {
    /// Create (or truncate) the output file
    pub fn new(path: PathBuf) -> anyhow::Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;

        Ok(Self {
            writer: BufWriter::new(file),
            path,
            lines_written: 0,
        })
    }

    pub fn write_line(&mut self, line: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", line)?;
        self.lines_written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }
}

impl Drop for OutputWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Write matches one per line, in search order
pub fn write_matches(path: &Path, matches: &[&str]) -> anyhow::Result<u64> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = OutputWriter::new(path.to_path_buf())?;
    for word in matches {
        writer.write_line(word)?;
    }
    writer.flush()?;

    log::info!("Wrote {} matches to {:?}", writer.lines_written(), writer.path());
    Ok(writer.lines_written())
}
