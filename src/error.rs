//! Error types produced while resolving and assembling artifacts.
//!
//! Every retrieval operation returns a typed [`ArtifactError`]; nothing is
//! swallowed into an empty payload. Callers that need a coarse category (for
//! example to pick an HTTP status) use [`ArtifactError::kind`].
//!
//! | Kind | Status | Meaning |
//! |------|--------|---------|
//! | [`NotFound`](ErrorKind::NotFound) | 404 | resolved path does not exist |
//! | [`IoFailure`](ErrorKind::IoFailure) | 500 | read or decompression error |
//! | [`ParseFailure`](ErrorKind::ParseFailure) | 422 | structure or table content is malformed |
//! | [`DataMismatch`](ErrorKind::DataMismatch) | 409 | conservation scores do not line up with residues |
//! | [`InvalidIdentifier`](ErrorKind::InvalidIdentifier) | 400 | identifier could escape its base directory |
//!
//! ```rust
//! use artifacts::{ArtifactError, ErrorKind};
//!
//! let err = ArtifactError::DataMismatch { residues: 3, scores: 4 };
//! assert_eq!(err.kind(), ErrorKind::DataMismatch);
//! assert_eq!(err.http_status_code(), 409);
//! ```
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = ArtifactError> = std::result::Result<T, E>;

/// Coarse error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    IoFailure,
    ParseFailure,
    DataMismatch,
    InvalidIdentifier,
}

impl ErrorKind {
    /// Stable machine-readable code, used in JSON error bodies.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::IoFailure => "IO_FAILURE",
            ErrorKind::ParseFailure => "PARSE_FAILURE",
            ErrorKind::DataMismatch => "DATA_MISMATCH",
            ErrorKind::InvalidIdentifier => "INVALID_IDENTIFIER",
        }
    }
}

/// Errors raised by the resolver, the parsers and the retrieval operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArtifactError {
    /// The primary artifact does not exist on disk.
    #[error("artifact not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Opening, reading or decompressing an artifact failed.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Structure file content does not follow the PDB record layout.
    #[error("malformed structure at line {line}: {message}")]
    Structure { line: usize, message: String },

    /// Conservation file holds a token that is not a number.
    #[error("malformed conservation score #{index}: {token:?}")]
    Conservation { index: usize, token: String },

    /// Prediction table row is malformed.
    #[error("malformed prediction table at line {line}: {message}")]
    Table { line: u64, message: String },

    /// Conservation score count differs from the residue count of the chain.
    #[error("conservation scores do not match the chain: {residues} residues, {scores} scores")]
    DataMismatch { residues: usize, scores: usize },

    /// Identifier would not resolve to a plain file name.
    #[error("invalid identifier {0:?}")]
    InvalidIdentifier(String),
}

impl ArtifactError {
    /// Wraps an I/O error, mapping `ENOENT` to [`ArtifactError::NotFound`].
    pub(crate) fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            ArtifactError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ArtifactError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ArtifactError::NotFound { .. } => ErrorKind::NotFound,
            ArtifactError::Io { .. } => ErrorKind::IoFailure,
            ArtifactError::Structure { .. }
            | ArtifactError::Conservation { .. }
            | ArtifactError::Table { .. } => ErrorKind::ParseFailure,
            ArtifactError::DataMismatch { .. } => ErrorKind::DataMismatch,
            ArtifactError::InvalidIdentifier(_) => ErrorKind::InvalidIdentifier,
        }
    }

    /// Suggested HTTP status for this error.
    pub fn http_status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::NotFound => 404,
            ErrorKind::IoFailure => 500,
            ErrorKind::ParseFailure => 422,
            ErrorKind::DataMismatch => 409,
            ErrorKind::InvalidIdentifier => 400,
        }
    }
}
