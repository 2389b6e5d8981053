//! Error types for AtlasKV lazy values
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using AtlasError
pub type Result<T> = std::result::Result<T, AtlasError>;

/// Unified error type for AtlasKV lazy value operations
#[derive(Debug, Error)]
pub enum AtlasError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Fetch Errors
    // -------------------------------------------------------------------------
    #[error("Blob fetch failed: {0}")]
    BlobFetch(String),

    #[error("Fetch cancelled")]
    Cancelled,

    #[error("Fetch deadline exceeded")]
    DeadlineExceeded,

    /// A logic error upstream, not an expected runtime failure
    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    // -------------------------------------------------------------------------
    // Attribute Errors
    // -------------------------------------------------------------------------
    #[error("Invalid short attribute: {0} (max is 7)")]
    InvalidShortAttribute(u8),

    #[error("Attribute extraction failed: {0}")]
    AttributeExtraction(String),

    #[error("Value too large: {0} bytes does not fit in a u32 length")]
    ValueTooLarge(usize),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
