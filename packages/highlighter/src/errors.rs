//! Error types for the highlighter

use thiserror::Error;

pub type HighlightResult<T> = Result<T, HighlightError>;

#[derive(Error, Debug)]
pub enum HighlightError {
    /// The tree no longer matches what the range or fragment ids describe
    #[error("Document error: {0}")]
    Dom(#[from] inkmark_dom::DomError),

    #[error("Color key must not be empty")]
    EmptyColor,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store file {0} does not hold a JSON object")]
    NotAnObject(String),
}
