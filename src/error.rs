//! Error types for the substrate core.

use thiserror::Error;

/// Main error type for substrate operations.
///
/// Only argument validation is fallible in this crate; everything else is
/// made unrepresentable by construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubstrateError {
    #[error("name path cannot be empty")]
    EmptyPath,

    #[error("name path {0:?} contains an empty segment")]
    EmptySegment(String),

    #[error("segment {0:?} must not contain '.'; use extend() for dotted suffixes")]
    DottedSegment(String),
}

/// Result type for substrate operations.
pub type Result<T> = std::result::Result<T, SubstrateError>;
