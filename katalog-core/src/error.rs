//! Error types for Katalog Core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using KatalogError
pub type Result<T> = std::result::Result<T, KatalogError>;

/// Top-level error type for all Katalog operations
#[derive(Debug, Error)]
pub enum KatalogError {
    #[error("Missing source for mandatory category '{category}': {}", path.display())]
    MissingSource { category: String, path: PathBuf },

    #[error("No template found for {0}")]
    MissingTemplate(String),

    #[error("Unknown category '{0}' for this edition")]
    UnknownCategory(String),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Source data and layout document disagree on the number of books
    #[error(
        "Book count mismatch: {records} books in source data, {layout} books in layout document"
    )]
    CountMismatch { records: usize, layout: usize },

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur while reading tabular sources or the layout document
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid CSV in {path}: {message}")]
    Csv { path: String, message: String },

    #[error("Invalid JSON in {path}: {message}")]
    Json { path: String, message: String },

    #[error("Invalid record in {category}: {message}")]
    InvalidRecord { category: String, message: String },

    #[error("Invalid layout document: {0}")]
    Layout(String),

    #[error("Invalid issue identifier '{0}' (expected YYYY_NN)")]
    InvalidIssue(String),
}

/// Errors raised by external tool invocations
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("`{program}` did not produce {}", path.display())]
    MissingOutput { program: String, path: PathBuf },
}
