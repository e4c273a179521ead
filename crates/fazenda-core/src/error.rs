//! Error types for the fazenda-core library.

use thiserror::Error;

/// Main error type for the fazenda library.
#[derive(Error, Debug)]
pub enum FazendaError {
    /// Document parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning an input string into a document.
///
/// Construction is all-or-nothing, so there is a single kind and it carries
/// no detail about which position failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseError {
    /// The input is neither a plain nor a masked number of the expected shape.
    #[error("invalid document format")]
    InvalidFormat,
}

/// Result type for the fazenda library.
pub type Result<T> = std::result::Result<T, FazendaError>;
