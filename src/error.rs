//! Global error handling for digestfs
//!
//! Structural and configuration failures abort an ingestion call and surface
//! here as typed variants. Per-file anomalies (oversized, binary, decode
//! fallback) are absorbed during assembly and never become errors.

use std::io;

use thiserror::Error;

/// Global error type for digestfs operations
#[derive(Error, Debug)]
pub enum DigestError {
    /// Root path missing, unreadable, or not a directory
    #[error("Invalid root: {0}")]
    InvalidRoot(String),

    /// Malformed glob supplied by the caller
    #[error("Invalid pattern '{pattern}': {reason}")]
    PatternSyntax { pattern: String, reason: String },

    /// Traversal ceiling exceeded
    #[error("Tree too large: {0}")]
    TreeTooLarge(String),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unexpected error
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Specialized Result type for digestfs operations
pub type Result<T> = std::result::Result<T, DigestError>;
