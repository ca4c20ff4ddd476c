use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised before a search starts. Not finding a grid is not an error,
/// see [`crate::SearchOutcome::NoSolution`].
#[derive(Error, Debug)]
pub enum CrosswordError {
    /// Grid side length of zero.
    #[error("grid size must be positive, got {0}")]
    InvalidSize(usize),

    /// Dictionary file could not be opened or read.
    #[error("failed to read dictionary '{}': {}", .path.display(), .source)]
    DictionaryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No dictionary path given and no default dictionary installed.
    #[error("no dictionary given and no default dictionary found")]
    MissingDictionary,

    /// Probabilistic memo with unusable sizing.
    #[error("invalid memo configuration: {0}")]
    InvalidMemo(String),
}
