//! Error types for Trellis operations.
//!
//! This module provides the main error type [`TrellisError`] which wraps
//! the error conditions that can stop a diagram from being rendered.

use std::{io, path::PathBuf};

use thiserror::Error;

use trellis_core::diagnostic::ValidationError;

/// The main error type for Trellis operations.
///
/// # Diagnostic Variants
///
/// The `Validation` variant carries coded diagnostics describing every
/// structural problem found in the diagram, for rich error reporting.
#[derive(Debug, Error)]
pub enum TrellisError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("icon for node `{node}` not found at {}", path.display())]
    IconNotFound { node: String, path: PathBuf },

    #[error("cannot write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Export error: {0}")]
    Export(#[from] crate::export::Error),
}
