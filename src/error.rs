//! Error types for relcheck operations.
//!
//! This module defines [`RelcheckError`], the error type for setup failures
//! that stop a validation run, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `RelcheckError` only for fatal conditions (no registry, no directories)
//! - Everything a repository author can fix is a
//!   [`LintDiagnostic`](crate::lint::LintDiagnostic), collected and reported together
//! - Use `anyhow::Error` (via `RelcheckError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Fatal error for relcheck operations.
#[derive(Debug, Error)]
pub enum RelcheckError {
    /// Registry document not found at expected location.
    #[error("{} not found", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Registry document is not valid YAML.
    #[error("YAML syntax error in {}: {message}", path.display())]
    ConfigParseError { path: PathBuf, message: String },

    /// A required directory (manifests or notes) is absent.
    #[error("{} directory not found", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for relcheck operations.
pub type Result<T> = std::result::Result<T, RelcheckError>;
