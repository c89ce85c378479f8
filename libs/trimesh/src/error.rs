//! # Mesh Errors
//!
//! Error types for mesh operations. Every failure is reported to the caller
//! as soon as it is detected; no operation returns a partial result.

use thiserror::Error;

/// Errors that can occur during mesh operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// An operation was called on input it cannot accept
    /// (empty mesh, face index out of range, empty point set).
    #[error("Precondition failed: {message}")]
    PreconditionFailure { message: String },

    /// Geometry that admits no answer
    /// (zero-length vector, line parallel to plane, coplanar hull input).
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },
}

impl MeshError {
    /// Creates a precondition failure error.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::PreconditionFailure {
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }
}

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;
