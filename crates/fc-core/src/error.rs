use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid dimension '{text}': {reason}")]
    InvalidDimension { text: String, reason: String },

    #[error("Invalid entry path '{path}': {reason}")]
    InvalidEntryPath { path: String, reason: &'static str },

    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
}
