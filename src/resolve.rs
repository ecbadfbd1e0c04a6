//! Maps an addressed target to the files that hold its artifacts.
//!
//! Two addressing schemes coexist on disk. Archived structures are found by
//! accession through the PDB divided-archive naming convention, while uploads
//! live flat in an uploads directory and their derived files in the prediction
//! working directory. Both templates of each artifact class sit next to each
//! other in [`Target::locate`].
//!
//! Resolution is a pure path computation. Existence is only checked when a
//! file is opened.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ArtifactDirs;
use crate::error::{ArtifactError, Result};

/// Artifact classes stored per target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactClass {
    /// Structure file, gzip-compressed for archived entries.
    Structure,
    /// Gzip-compressed comma-separated per-residue conservation scores.
    Conservation,
    /// Plain CSV of predicted pockets.
    PredictionTable,
}

/// Addressing mode as it appears in request paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// `id`: a published accession.
    #[serde(rename = "id")]
    Accession,
    /// `upload`: an opaque upload identifier.
    #[serde(rename = "upload")]
    Upload,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Accession => "id",
            Mode::Upload => "upload",
        }
    }
}

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "id" => Ok(Mode::Accession),
            "upload" => Ok(Mode::Upload),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// Returned when a path segment names no addressing mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown addressing mode {0:?}, expected \"id\" or \"upload\"")]
pub struct UnknownMode(pub String);

/// One addressed request target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    ByAccession(String),
    ByUpload(String),
}

impl Target {
    /// Builds a target, rejecting identifiers that are not a single plain
    /// file-name component.
    pub fn new(mode: Mode, id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        validate_identifier(&id)?;
        Ok(match mode {
            Mode::Accession => Target::ByAccession(id),
            Mode::Upload => Target::ByUpload(id),
        })
    }

    pub fn mode(&self) -> Mode {
        match self {
            Target::ByAccession(_) => Mode::Accession,
            Target::ByUpload(_) => Mode::Upload,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Target::ByAccession(id) | Target::ByUpload(id) => id,
        }
    }

    /// File location of `class` for this target under `dirs`.
    ///
    /// Conservation and prediction files of accessions share the precomputed
    /// CSV directory with a `pdb<id>.ent.gz` stem, while those of uploads use
    /// the prediction working directory with the bare upload id as stem.
    pub fn locate(&self, class: ArtifactClass, dirs: &ArtifactDirs) -> PathBuf {
        match (class, self) {
            (ArtifactClass::Structure, Target::ByAccession(id)) => {
                dirs.pdb_data_path.join(format!("pdb{id}.ent.gz"))
            }
            (ArtifactClass::Structure, Target::ByUpload(id)) => dirs.uploads_dir.join(id),
            (ArtifactClass::Conservation, Target::ByAccession(id)) => {
                dirs.csv_data_path.join(format!("pdb{id}.ent.gz.hom.gz"))
            }
            (ArtifactClass::Conservation, Target::ByUpload(id)) => {
                dirs.prediction_dir.join(format!("{id}.hom.gz"))
            }
            (ArtifactClass::PredictionTable, Target::ByAccession(id)) => {
                dirs.csv_data_path.join(format!("pdb{id}.ent.gz_predictions.csv"))
            }
            (ArtifactClass::PredictionTable, Target::ByUpload(id)) => {
                dirs.prediction_dir.join(format!("{id}_predictions.csv"))
            }
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.mode().as_str(), self.id())
    }
}

fn validate_identifier(id: &str) -> Result<()> {
    let escapes = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(['/', '\\', '\0']);
    if escapes {
        return Err(ArtifactError::InvalidIdentifier(id.to_string()));
    }
    Ok(())
}

/// Resolves targets against a fixed set of base directories.
#[derive(Debug, Clone)]
pub struct PathResolver {
    dirs: ArtifactDirs,
}

impl PathResolver {
    pub fn new(dirs: ArtifactDirs) -> Self {
        Self { dirs }
    }

    pub fn dirs(&self) -> &ArtifactDirs {
        &self.dirs
    }

    pub fn resolve(&self, class: ArtifactClass, target: &Target) -> PathBuf {
        target.locate(class, &self.dirs)
    }
}
