//! Dictionary access errors.

use fc_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for dictionary operations.
pub type DictResult<T> = Result<T, DictError>;

#[derive(Error, Debug)]
pub enum DictError {
    #[error("File does not exist: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Path is not a file: {}", path.display())]
    NotAFile { path: PathBuf },

    /// Lookup in a materialized view found no such keyword.
    #[error("Key not found: {key}")]
    KeyNotFound { key: String },

    /// A path tried to descend through a leaf value. `key` is the path as
    /// requested from the view or node that was asked.
    #[error("Entry path descends through a value: {key}")]
    NotADictionary { key: String },

    /// A leaf was expected but the path names a sub-dictionary.
    #[error("Entry is a dictionary, not a value: {key}")]
    NotAValue { key: String },

    /// The entry is neither an enumerable sub-dictionary nor a value.
    #[error("No such entry '{entry}': {command}\n\n{diagnostic}")]
    NoSuchEntry {
        entry: String,
        command: String,
        diagnostic: String,
    },

    /// A child keyword contains the path separator (e.g. the regex key
    /// `".*"`), so it has no dotted address of its own.
    #[error("Keyword {keyword} under '{parent}' contains '.' and cannot be addressed by a dotted path")]
    UnaddressableKeyword { parent: String, keyword: String },

    #[error("Query failed: {command}\n\n{diagnostic}")]
    QueryFailed { command: String, diagnostic: String },

    #[error("Write failed: {command}\n\n{diagnostic}")]
    WriteFailed { command: String, diagnostic: String },

    #[error("Delete failed: {command}\n\n{diagnostic}")]
    DeleteFailed { command: String, diagnostic: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}
