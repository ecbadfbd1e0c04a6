//! In-memory structure model, the PDB reader that fills it and the mmCIF
//! writer used by the legacy conversion.

pub mod codes;
pub mod mmcif;
pub mod model;
pub mod pdb;

use std::io;
use std::path::Path;

use thiserror::Error;

pub use model::{Atom, Chain, ResidueGroup, Structure};

use crate::error::ArtifactError;

/// Failure while turning a byte stream into a [`Structure`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("no ATOM or HETATM records")]
    NoAtoms,
}

impl ParseError {
    /// Attaches the file the stream came from.
    pub(crate) fn at(self, path: &Path) -> ArtifactError {
        match self {
            ParseError::Io(source) => ArtifactError::from_io(path, source),
            ParseError::Malformed { line, message } => ArtifactError::Structure { line, message },
            ParseError::NoAtoms => ArtifactError::Structure {
                line: 0,
                message: "no ATOM or HETATM records".to_string(),
            },
        }
    }
}
