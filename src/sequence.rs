//! Residue sequences with per-residue conservation scores.
//!
//! A sequence is built from one chain of a parsed structure and then scored
//! positionally from the comma-separated conservation artifact. Scores are
//! never shifted, truncated or padded: a count that does not match the chain is
//! reported as [`ArtifactError::DataMismatch`].

use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, Result};
use crate::structure::{Chain, Structure};

/// Rule for picking the chain a sequence is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainSelection {
    /// The chain at index 0, i.e. the first chain appearing in the file.
    #[default]
    First,
}

impl ChainSelection {
    pub fn select<'a>(&self, structure: &'a Structure) -> Option<&'a Chain> {
        match self {
            ChainSelection::First => structure.chains.first(),
        }
    }
}

/// One residue: its one-letter code and, when known, its conservation score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Residue {
    pub code: char,
    /// `None` means no conservation data, which is not the same as `0.0`.
    pub score: Option<f64>,
}

/// Ordered residues of one chain. Serializes as a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence {
    residues: Vec<Residue>,
}

impl Sequence {
    /// Unscored sequence of the polymer residues of `chain`, in chain order.
    pub fn from_chain(chain: &Chain) -> Self {
        let residues = chain
            .polymer()
            .map(|(_, code)| Residue { code, score: None })
            .collect();
        Self { residues }
    }

    /// Builds the sequence of the chain picked by `selection`.
    pub fn from_structure(structure: &Structure, selection: ChainSelection) -> Result<Self> {
        let chain = selection
            .select(structure)
            .ok_or_else(|| ArtifactError::Structure {
                line: 0,
                message: "structure has no chains".to_string(),
            })?;
        Ok(Self::from_chain(chain))
    }

    /// Assigns `scores` to residues by index.
    ///
    /// An empty score list leaves the sequence unscored. Any other length must
    /// equal the residue count.
    pub fn apply_scores(&mut self, scores: &[f64]) -> Result<()> {
        if scores.is_empty() {
            return Ok(());
        }
        if scores.len() != self.residues.len() {
            return Err(ArtifactError::DataMismatch {
                residues: self.residues.len(),
                scores: scores.len(),
            });
        }
        for (residue, score) in self.residues.iter_mut().zip(scores) {
            residue.score = Some(*score);
        }
        Ok(())
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn is_scored(&self) -> bool {
        self.residues.iter().any(|r| r.score.is_some())
    }

    /// One-letter codes as a string, e.g. `"ACD"`.
    pub fn codes(&self) -> String {
        self.residues.iter().map(|r| r.code).collect()
    }
}

/// Parses conservation text: comma-separated floats.
///
/// Tokens are trimmed and a trailing separator is tolerated. Blank input
/// yields no scores. `NaN` and infinities are rejected: they would serialize
/// as `null`, the marker for a residue without data.
pub fn parse_conservation(text: &str) -> Result<Vec<f64>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let text = text.strip_suffix(',').unwrap_or(text);

    text.split(',')
        .enumerate()
        .map(|(index, token)| {
            let token = token.trim();
            token
                .parse::<f64>()
                .ok()
                .filter(|score| score.is_finite())
                .ok_or_else(|| ArtifactError::Conservation {
                    index,
                    token: token.to_string(),
                })
        })
        .collect()
}
