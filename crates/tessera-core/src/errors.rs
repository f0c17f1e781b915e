use std::convert::Infallible;
use std::path::PathBuf;

use thiserror::Error;

/// Construction failure as seen by callers of the registry.
///
/// Backends are free to return this from their constructors; whatever they
/// return reaches the caller unchanged.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("model not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    #[error("unsupported option: {0}")]
    UnsupportedOption(String),

    #[error("no backend registered under {0:?}")]
    UnknownBackend(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Msg(String),
}

impl From<String> for InitError {
    fn from(s: String) -> Self {
        InitError::Msg(s)
    }
}

impl From<&str> for InitError {
    fn from(s: &str) -> Self {
        InitError::Msg(s.to_owned())
    }
}

impl From<Infallible> for InitError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}

pub type Result<T> = std::result::Result<T, InitError>;
