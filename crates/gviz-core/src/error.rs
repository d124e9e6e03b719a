// Rust guideline compliant 2026-02-06

//! Error types for the gviz core library.
//!
//! Protocol problems never surface here: they are recorded as messages in
//! the response log. These errors cover the ambient operations around it.

use thiserror::Error;

/// Result type alias for gviz operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for gviz operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file or environment value is invalid.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// A message specification could not be understood.
    #[error("Invalid message: {0}")]
    InvalidMessage(String),
}
