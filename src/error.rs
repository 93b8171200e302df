use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Path does not exist: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("No parser registered for file: {}", .0.display())]
    UnrecognizedExtension(PathBuf),

    #[error("Input format error: {0}")]
    Format(#[from] FormatError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("TSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("XML parsing failed: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// A required column, element or pattern is absent from an otherwise readable file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("missing required column '{0}' in header")]
    MissingColumn(&'static str),

    #[error("line {line}: row has no value for column '{column}'")]
    MissingField { line: u64, column: &'static str },

    #[error("missing required element <{element}> in {context}")]
    MissingElement {
        element: &'static str,
        context: String,
    },

    #[error("no zip code found in location line '{0}'")]
    MissingZip(String),

    #[error("no state segment found in location line '{0}'")]
    MissingState(String),

    #[error("block {block} has {lines} lines, expected 3 or 4")]
    UnexpectedLineCount { block: usize, lines: usize },
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
