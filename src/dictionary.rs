use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::CrosswordError;

const APP_DIR: &str = "crossword-solver";
const DEFAULT_DICTIONARY_FILE: &str = "dictionary.txt";

/// Split one dictionary line into its word forms.
///
/// A line holds one or more forms separated by periods, e.g. `cars.car`.
/// Forms are taken verbatim apart from case. Stray whitespace is kept and
/// counts towards the word length.
fn split_forms(line: &str) -> impl Iterator<Item = String> + '_ {
    line.split('.')
        .map(str::to_lowercase)
        .filter(|form| !form.is_empty())
}

/// Every word form in `data`, lower-cased, in source order. Duplicates and
/// words of any length are kept; `WordTrie::build` filters them.
pub fn load_dictionary_from_str(data: &str) -> Vec<String> {
    data.lines().flat_map(split_forms).collect()
}

pub fn load_dictionary_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, CrosswordError> {
    let path = path.as_ref();
    let read_error = |source| CrosswordError::DictionaryRead {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(read_error)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(read_error)?;
        words.extend(split_forms(&line));
    }
    Ok(words)
}

/// `<data_dir>/crossword-solver/dictionary.txt`, if it is installed.
pub fn default_dictionary_path() -> Option<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join(DEFAULT_DICTIONARY_FILE))
        .filter(|path| path.is_file())
}
