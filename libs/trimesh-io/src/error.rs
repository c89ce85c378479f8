//! Error types for mesh I/O operations.

use thiserror::Error;
use trimesh::MeshError;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur during mesh I/O operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// File content does not match the expected format.
    #[error("format mismatch: {message}")]
    FormatMismatch {
        /// Description of what was invalid.
        message: String,
    },

    /// Binary STL holds a different number of triangles than its header declares.
    #[error("format mismatch: header declares {expected} triangles, file holds {got}")]
    TriangleCount {
        /// Triangle count from the header.
        expected: u32,
        /// Complete triangle records present.
        got: u32,
    },

    /// No loader or writer for this file extension.
    #[error("unsupported file format: .{extension}")]
    UnsupportedFormat {
        /// The unrecognized extension.
        extension: String,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The loaded data does not form a valid mesh.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

impl IoError {
    /// Create a `FormatMismatch` error with the given message.
    #[must_use]
    pub fn format_mismatch(message: impl Into<String>) -> Self {
        Self::FormatMismatch {
            message: message.into(),
        }
    }

    /// Create a `FormatMismatch` error pointing at a 1-based line number.
    #[must_use]
    pub fn at_line(line: usize, message: impl std::fmt::Display) -> Self {
        Self::FormatMismatch {
            message: format!("line {line}: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IoError::TriangleCount {
            expected: 12,
            got: 3,
        };
        assert_eq!(
            err.to_string(),
            "format mismatch: header declares 12 triangles, file holds 3"
        );

        let err = IoError::at_line(7, "expected 3 coordinates");
        assert_eq!(err.to_string(), "format mismatch: line 7: expected 3 coordinates");
    }

    #[test]
    fn test_mesh_error_converts() {
        let err: IoError = MeshError::precondition("face 0 references vertex 9").into();
        assert!(matches!(err, IoError::Mesh(_)));
        assert!(err.to_string().contains("vertex 9"));
    }
}
