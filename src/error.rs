// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DevrankError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, DevrankError>;

// Allow `?` on std::io::Error by converting to DevrankError::Io with unknown path.
impl From<std::io::Error> for DevrankError {
    fn from(source: std::io::Error) -> Self {
        DevrankError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}
