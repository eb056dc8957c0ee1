// Integration tests: word file -> store -> criteria -> matches

use std::io::Write;
use tempfile::NamedTempFile;
use word_finder::criteria::RepeatPolicy;
use word_finder::source::{load_store, LoadOptions, ReadStrategy};
use word_finder::{CriteriaInput, FinderError, LengthRange, SearchEngine, SearchOptions, WordStore};

fn word_file(words: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for word in words {
        writeln!(file, "{}", word).unwrap();
    }
    file
}

fn load(words: &[&str], range: LengthRange) -> WordStore {
    let file = word_file(words);
    load_store(
        file.path(),
        &LoadOptions {
            range,
            ..LoadOptions::default()
        },
    )
    .unwrap()
}

fn search(store: &WordStore, input: CriteriaInput) -> Vec<String> {
    let criteria = input.compile().unwrap();
    SearchEngine::new(store, SearchOptions::default())
        .search(&criteria)
        .unwrap()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn letters(s: &str) -> Option<String> {
    Some(s.to_string())
}

// ============ Store ============

#[test]
fn test_store_invariants_from_file() {
    let store = load(
        &["kebab", "ab", "strike", "task", "ab", "beekeeper", "beak"],
        LengthRange::unbounded(),
    );

    let lengths: Vec<usize> = store.available_lengths().collect();
    assert_eq!(lengths, vec![2, 4, 5, 6, 9]);
    assert!(lengths.windows(2).all(|w| w[0] < w[1]));

    for length in lengths {
        let bucket = store.words_of_length(length);
        assert!(!bucket.is_empty());
        assert!(bucket.iter().all(|w| w.chars().count() == length));
    }
    // duplicates are kept, file order within a bucket
    assert_eq!(store.words_of_length(2), ["ab", "ab"]);
    assert_eq!(store.words_of_length(4), ["task", "beak"]);
}

#[test]
fn test_empty_file_searches_cleanly() {
    let store = load(&[], LengthRange::unbounded());

    assert_eq!(store.available_lengths().count(), 0);
    assert!(search(
        &store,
        CriteriaInput {
            exclude: letters("q"),
            ..Default::default()
        }
    )
    .is_empty());
}

#[test]
fn test_strategies_build_same_store() {
    let file = word_file(&["task", "beak", "kebab", "skate", "strike"]);
    let lengths: Vec<Vec<usize>> = [ReadStrategy::ReadAll, ReadStrategy::Buffered, ReadStrategy::Mmap]
        .into_iter()
        .map(|strategy| {
            let options = LoadOptions {
                strategy,
                ..LoadOptions::default()
            };
            load_store(file.path(), &options)
                .unwrap()
                .available_lengths()
                .collect()
        })
        .collect();

    assert_eq!(lengths[0], vec![4, 5, 6]);
    assert!(lengths.iter().all(|l| *l == lengths[0]));
}

// ============ Criteria ============

#[test]
fn test_include_only_whitelist() {
    let store = load(
        &["task", "beak", "kebab", "skate", "strike", "beekeeper"],
        LengthRange::unbounded(),
    );

    let found = search(
        &store,
        CriteriaInput {
            include_only: letters("abefkst"),
            ..Default::default()
        },
    );
    assert_eq!(found, vec!["task", "beak", "kebab", "skate"]);
}

#[test]
fn test_exclude_leaves_no_forbidden_letter() {
    let store = load(
        &["jazz", "fox", "lake", "quiz", "zebra", "boat", "maxim", "jolly", "trees"],
        LengthRange::unbounded(),
    );

    let found = search(
        &store,
        CriteriaInput {
            exclude: letters("jzx"),
            ..Default::default()
        },
    );
    assert_eq!(found, vec!["lake", "boat", "trees"]);
    for word in &found {
        assert!(word.chars().all(|c| !"jzx".contains(c)));
    }
}

#[test]
fn test_ordered_include_all() {
    let store = load(
        &["strike", "streak", "sectoring", "retires", "rooster", "stop"],
        LengthRange::unbounded(),
    );

    let found = search(
        &store,
        CriteriaInput {
            include_all: letters("str"),
            ordered: true,
            ..Default::default()
        },
    );
    // retires has its only 's' after every 't'; stop has no 'r'
    assert_eq!(found, vec!["strike", "streak", "rooster", "sectoring"]);
}

#[test]
fn test_repeated_letters_ordered_and_unordered() {
    let store = load(&["mast", "mass", "asks", "sash"], LengthRange::unbounded());
    let ss = |ordered, repeats| CriteriaInput {
        include_all: letters("ss"),
        ordered,
        repeats,
        ..Default::default()
    };

    assert_eq!(search(&store, ss(true, RepeatPolicy::Collapse)), vec!["mass", "asks", "sash"]);
    // unordered, collapsed repeats: one 's' is enough
    assert_eq!(
        search(&store, ss(false, RepeatPolicy::Collapse)),
        vec!["mast", "mass", "asks", "sash"]
    );
    assert_eq!(search(&store, ss(false, RepeatPolicy::Distinct)), vec!["mass", "asks", "sash"]);
}

#[test]
fn test_regex_ignores_letter_options() {
    let store = load(
        &["abuzz", "adz", "quiz", "aqz", "blitz", "azz"],
        LengthRange::unbounded(),
    );
    let input = CriteriaInput {
        regex: letters("^a.*z$"),
        include: letters("q"),
        ..Default::default()
    };

    assert!(!input.notices().is_empty());
    assert_eq!(search(&store, input), vec!["adz", "aqz", "azz", "abuzz"]);
}

#[test]
fn test_length_filter_applies_before_matching() {
    let store = load(
        &["ant", "task", "skate", "strike", "beekeeper"],
        LengthRange::new(4, 5).unwrap(),
    );

    let found = search(
        &store,
        CriteriaInput {
            include: letters("aeiou"),
            ..Default::default()
        },
    );
    assert_eq!(found, vec!["task", "skate"]);
}

// ============ Errors ============

#[test]
fn test_errors_before_scan() {
    assert!(matches!(
        CriteriaInput::default().compile(),
        Err(FinderError::InvalidArgument(_))
    ));
    assert!(matches!(
        CriteriaInput {
            regex: letters("a(b"),
            ..Default::default()
        }
        .compile(),
        Err(FinderError::InvalidPattern { .. })
    ));
    assert!(matches!(LengthRange::new(6, 3), Err(FinderError::InvalidArgument(_))));
    assert!(matches!(
        load_store(std::path::Path::new("/no/such/words.txt"), &LoadOptions::default()),
        Err(FinderError::SourceNotFound { .. })
    ));
}
