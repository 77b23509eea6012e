use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Document text extraction failed: {0}")]
    Extraction(String),

    #[error("Model request failed: {0}")]
    Model(String),

    #[error("Model '{0}' not found after exhausting fallback models")]
    ModelUnavailable(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExtractorError>;
