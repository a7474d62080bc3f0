//! Error types for case-level operations.

use fc_core::CoreError;
use fc_dict::DictError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CaseError {
    #[error("{} does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("{} is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("No file '{name}' in {}", dir.display())]
    MissingFile { dir: PathBuf, name: String },

    #[error("More than one initial-state directory: {} and {}", first.display(), second.display())]
    DuplicateInitialState { first: PathBuf, second: PathBuf },

    #[error("Incomplete case: {} lacks {missing}", dir.display())]
    IncompleteCase { dir: PathBuf, missing: &'static str },

    /// An external command exited with a non-zero status.
    #[error("{command}\n\n{diagnostic}")]
    Command { command: String, diagnostic: String },

    #[error("Invalid time value '{text}' from {command}")]
    InvalidTime { text: String, command: String },

    #[error("Case not set up to stop at an endTime (stopAt = {stop_at})")]
    NotEndTimeControlled { stop_at: String },

    #[error("{} already exists; pass overwrite to replace it", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("Cannot clone a case onto itself: {}", path.display())]
    CloneOntoTemplate { path: PathBuf },

    #[error("Unexpected value for {entry}: {value}")]
    UnexpectedValue { entry: String, value: String },

    #[error(transparent)]
    Dict(#[from] DictError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),
}

/// Result type for fc-case operations.
pub type CaseResult<T> = Result<T, CaseError>;
