//! Error types for trellis operations.
//!
//! Layout itself never fails. Errors come from the edges of the library:
//! reading and validating diagram documents, resolving node ids named by a
//! caller, and serializing results.

use std::io;

use thiserror::Error;

use crate::document::DocumentError;

/// The main error type for trellis operations.
///
/// The `Document` variant keeps the source text next to the structured error
/// so front ends can render a labelled snippet.
#[derive(Debug, Error)]
pub enum TrellisError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Document { err: DocumentError, src: String },

    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),
}

impl TrellisError {
    /// Create a new `Document` error with the associated source text.
    pub fn new_document_error(err: DocumentError, src: impl Into<String>) -> Self {
        Self::Document {
            err,
            src: src.into(),
        }
    }
}
