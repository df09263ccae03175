//! Error types for the law graph compiler.
//!
//! Only fatal conditions are errors. Rows lacking a paragraph or a
//! sub-paragraph are skipped and counted in [`crate::types::RunStats`].

use thiserror::Error;

/// Main error type for the compiler library.
#[derive(Debug, Error)]
pub enum LawGraphError {
    /// Input is an empty collection of rows.
    #[error("Invalid or empty flat JSON: no rows to compile")]
    EmptyInput,

    /// Input document is not a JSON array.
    #[error("Invalid flat JSON: expected an array of rows, found {found}")]
    NotAList { found: String },

    /// An element of the input array is not a flat object.
    #[error("Malformed row at index {index}: {source}")]
    MalformedRow {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// No row carries a law label and no fallback is configured.
    #[error("Cannot determine the law label: no row has a 'lag' value and no fallback is set")]
    MissingLawLabel,

    /// Output location is unusable.
    #[error("Invalid output directory: {0}")]
    InvalidOutputDir(String),

    /// JSON parsing failed.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for compiler operations.
pub type Result<T> = std::result::Result<T, LawGraphError>;
