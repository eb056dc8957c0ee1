//! Word file reading
//!
//! Reads a word list (one word per line) with one of several strategies,
//! detecting the file encoding and transcoding to UTF-8 on the way. Every
//! strategy yields the same lines: line terminators and byte order marks are
//! removed, nothing else is trimmed.

use crate::error::{FinderError, Result};
use crate::store::{LengthRange, WordStore};

use bstr::ByteSlice;
use chardetng::EncodingDetector;
use clap::ValueEnum;
use encoding_rs::Encoding;
use encoding_rs_io::{DecodeReaderBytes, DecodeReaderBytesBuilder};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::time::Instant;

/// Bytes sampled for encoding detection
const DETECTION_SAMPLE: usize = 64 * 1024;

/// Read buffer for the streaming strategy
const STREAM_BUFFER: usize = 64 * 1024;

/// How the word file is read from disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReadStrategy {
    /// Read the whole file into memory, then split lines
    #[default]
    ReadAll,
    /// Stream lines through a buffered, transcoding reader
    Buffered,
    /// Memory-map the file and split lines in place
    Mmap,
}

/// Options passed to the loader
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    pub strategy: ReadStrategy,
    pub range: LengthRange,
    /// Sniff the encoding instead of assuming UTF-8
    pub detect_encoding: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            strategy: ReadStrategy::default(),
            range: LengthRange::unbounded(),
            detect_encoding: true,
        }
    }
}

/// Result of encoding detection
#[derive(Debug, Clone)]
pub struct EncodingInfo {
    /// Detected encoding name
    pub name: &'static str,
    /// Confidence level (0.0 - 1.0)
    pub confidence: f32,
    /// The encoding_rs Encoding reference
    pub encoding: &'static Encoding,
}

impl Default for EncodingInfo {
    fn default() -> Self {
        Self {
            name: "UTF-8",
            confidence: 1.0,
            encoding: encoding_rs::UTF_8,
        }
    }
}

impl EncodingInfo {
    fn certain(encoding: &'static Encoding) -> Self {
        Self {
            name: encoding.name(),
            confidence: 1.0,
            encoding,
        }
    }
}

/// Detect the encoding of a byte sample
pub fn detect_encoding(sample: &[u8]) -> EncodingInfo {
    if sample.is_empty() {
        return EncodingInfo::default();
    }

    if let Some(encoding) = detect_bom(sample) {
        return EncodingInfo::certain(encoding);
    }

    // A sample cut in the middle of a character is still UTF-8
    match std::str::from_utf8(sample) {
        Ok(_) => return EncodingInfo::default(),
        Err(e) if e.error_len().is_none() => return EncodingInfo::default(),
        Err(_) => {}
    }

    let mut detector = EncodingDetector::new();
    detector.feed(sample, true);
    let encoding = detector.guess(None, true);

    EncodingInfo {
        name: encoding.name(),
        confidence: if encoding == encoding_rs::UTF_8 { 0.5 } else { 0.8 },
        encoding,
    }
}

/// Detect the encoding of a file by sampling its head
pub fn detect_file_encoding(path: &Path) -> Result<EncodingInfo> {
    let file = open(path)?;
    let mut sample = Vec::with_capacity(DETECTION_SAMPLE);
    file.take(DETECTION_SAMPLE as u64).read_to_end(&mut sample)?;
    Ok(detect_encoding(&sample))
}

/// Detect BOM (Byte Order Mark) at the start of content
fn detect_bom(content: &[u8]) -> Option<&'static Encoding> {
    Encoding::for_bom(content).map(|(encoding, _)| encoding)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| FinderError::SourceNotFound {
        path: path.to_path_buf(),
        source,
    })
}

/// Lines of a word file
pub struct WordLines {
    inner: LinesInner,
}

enum LinesInner {
    Collected(std::vec::IntoIter<String>),
    Buffered(io::Lines<BufReader<DecodeReaderBytes<File, Vec<u8>>>>),
    Mmap(MmapLineIterator),
}

impl Iterator for WordLines {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            LinesInner::Collected(lines) => lines.next().map(Ok),
            LinesInner::Buffered(lines) => lines.next().map(|r| r.map_err(FinderError::from)),
            LinesInner::Mmap(lines) => lines.next().map(Ok),
        }
    }
}

/// Open a word file and iterate its lines with the given strategy
pub fn read_lines(path: &Path, strategy: ReadStrategy, detect: bool) -> Result<WordLines> {
    let encoding = if detect {
        detect_file_encoding(path)?
    } else {
        EncodingInfo::default()
    };
    log::debug!(
        "Reading {:?} as {} ({:.0}% confidence) using {:?}",
        path,
        encoding.name,
        encoding.confidence * 100.0,
        strategy
    );

    let inner = match strategy {
        ReadStrategy::ReadAll => {
            let bytes = fs::read(path).map_err(|source| FinderError::SourceNotFound {
                path: path.to_path_buf(),
                source,
            })?;
            LinesInner::Collected(split_all(&bytes, encoding.encoding).into_iter())
        }
        ReadStrategy::Buffered => {
            let decoder = DecodeReaderBytesBuilder::new()
                .encoding(Some(encoding.encoding))
                .bom_sniffing(true)
                .strip_bom(true)
                .build(open(path)?);
            LinesInner::Buffered(BufReader::with_capacity(STREAM_BUFFER, decoder).lines())
        }
        ReadStrategy::Mmap => {
            let file = open(path)?;
            if encoding.encoding.is_ascii_compatible() {
                LinesInner::Mmap(MmapLineIterator::new(&file, encoding.encoding)?)
            } else {
                // '\n' is not a single byte in UTF-16, so decode before splitting
                let mmap = unsafe { memmap2::Mmap::map(&file)? };
                LinesInner::Collected(split_all(&mmap, encoding.encoding).into_iter())
            }
        }
    };

    Ok(WordLines { inner })
}

/// Decode a whole buffer and split it into lines
fn split_all(bytes: &[u8], encoding: &'static Encoding) -> Vec<String> {
    if encoding == encoding_rs::UTF_8 {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        let mut lossy = false;
        let lines = ByteSlice::lines(bytes)
            .map(|line| match line.to_str() {
                Ok(s) => s.to_string(),
                Err(_) => {
                    lossy = true;
                    line.to_str_lossy().into_owned()
                }
            })
            .collect();
        if lossy {
            log::warn!("Invalid UTF-8 in word file, using lossy conversion");
        }
        lines
    } else {
        let (decoded, _, had_errors) = encoding.decode(bytes);
        if had_errors {
            log::warn!("Encoding errors in word file, using lossy conversion");
        }
        decoded.lines().map(str::to_string).collect()
    }
}

/// Memory-mapped line reader for ASCII-compatible encodings
pub struct MmapLineIterator {
    mmap: memmap2::Mmap,
    encoding: &'static Encoding,
    position: usize,
}

impl MmapLineIterator {
    fn new(file: &File, encoding: &'static Encoding) -> Result<Self> {
        let mmap = unsafe { memmap2::Mmap::map(file)? };

        // Skip BOM if present
        let position = if mmap.starts_with(b"\xEF\xBB\xBF") { 3 } else { 0 };

        Ok(Self {
            mmap,
            encoding,
            position,
        })
    }
}

impl Iterator for MmapLineIterator {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.mmap.len() {
            return None;
        }

        let remaining = &self.mmap[self.position..];
        let line_end = memchr::memchr(b'\n', remaining)
            .map(|i| i + 1)
            .unwrap_or(remaining.len());

        let line_bytes = &remaining[..line_end];
        self.position += line_end;

        let line_bytes = line_bytes.strip_suffix(b"\n").unwrap_or(line_bytes);
        let line_bytes = line_bytes.strip_suffix(b"\r").unwrap_or(line_bytes);

        if self.encoding == encoding_rs::UTF_8 {
            match std::str::from_utf8(line_bytes) {
                Ok(s) => Some(s.to_string()),
                Err(_) => {
                    log::warn!("Invalid UTF-8 in line, using lossy conversion");
                    Some(String::from_utf8_lossy(line_bytes).into_owned())
                }
            }
        } else {
            let (decoded, _) = self.encoding.decode_without_bom_handling(line_bytes);
            Some(decoded.into_owned())
        }
    }
}

/// Read a word file straight into a store
pub fn load_store(path: &Path, options: &LoadOptions) -> Result<WordStore> {
    let start = Instant::now();
    let lines = read_lines(path, options.strategy, options.detect_encoding)?;

    let mut error = None;
    let mut store = WordStore::new();
    store.load(
        lines.map_while(|line| match line {
            Ok(line) => Some(line),
            Err(e) => {
                error = Some(e);
                None
            }
        }),
        options.range,
    );
    if let Some(e) = error {
        return Err(e);
    }

    log::info!(
        "Loaded {} words in {} length buckets from {:?} in {:?}",
        store.total_words(),
        store.bucket_count(),
        path,
        start.elapsed()
    );
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const STRATEGIES: [ReadStrategy; 3] =
        [ReadStrategy::ReadAll, ReadStrategy::Buffered, ReadStrategy::Mmap];

    fn write_bytes(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    fn collect(path: &Path, strategy: ReadStrategy) -> Vec<String> {
        read_lines(path, strategy, true)
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_utf8_detection() {
        let info = detect_encoding("Hello, World!\nПривет мир!\n".as_bytes());
        assert_eq!(info.name, "UTF-8");
    }

    #[test]
    fn test_bom_detection() {
        assert_eq!(detect_encoding(b"\xFF\xFEa\0").encoding, encoding_rs::UTF_16LE);
        assert_eq!(detect_encoding(b"\xEF\xBB\xBFabc").encoding, encoding_rs::UTF_8);
        assert_eq!(detect_encoding(b"").name, "UTF-8");
    }

    #[test]
    fn test_strategies_agree() {
        let file = write_bytes(b"task\r\nbeak\nkebab\n\nskate");

        for strategy in STRATEGIES {
            assert_eq!(
                collect(file.path(), strategy)
                    .into_iter()
                    .filter(|l| !l.is_empty())
                    .collect::<Vec<_>>(),
                vec!["task", "beak", "kebab", "skate"],
                "strategy {:?}",
                strategy
            );
        }
    }

    #[test]
    fn test_utf8_bom_stripped() {
        let file = write_bytes(b"\xEF\xBB\xBFcaf\xC3\xA9\nword\n");

        for strategy in STRATEGIES {
            assert_eq!(collect(file.path(), strategy), vec!["café", "word"]);
        }
    }

    #[test]
    fn test_utf16_transcoded() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "ab\ncd\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let file = write_bytes(&bytes);

        for strategy in STRATEGIES {
            assert_eq!(collect(file.path(), strategy), vec!["ab", "cd"]);
        }
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("/definitely/not/here/words.txt");

        for strategy in STRATEGIES {
            let err = read_lines(path, strategy, true).err().unwrap();
            assert!(matches!(err, FinderError::SourceNotFound { .. }));
        }
    }

    #[test]
    fn test_load_store_with_range() {
        let file = write_bytes(b"ab\nabcd\nabcdef\nabcdefgh\n");
        let options = LoadOptions {
            range: LengthRange::new(4, 6).unwrap(),
            ..LoadOptions::default()
        };

        let store = load_store(file.path(), &options).unwrap();
        assert_eq!(store.available_lengths().collect::<Vec<_>>(), vec![4, 6]);
    }

    #[test]
    fn test_load_empty_file() {
        let file = write_bytes(b"");

        for strategy in STRATEGIES {
            let options = LoadOptions {
                strategy,
                ..LoadOptions::default()
            };
            let store = load_store(file.path(), &options).unwrap();
            assert!(store.is_empty());
        }
    }
}
