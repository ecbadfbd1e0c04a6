use serde::Serialize;

use super::codes;

/// One atom record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Atom {
    pub serial: u32,
    pub name: String,
    pub alt_loc: Option<char>,
    pub element: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub occupancy: f64,
    pub b_factor: f64,
}

/// Atoms sharing one residue number, insertion code and residue name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidueGroup {
    /// Three-letter (or shorter) component name, e.g. `ALA`, `HOH`, `DA`.
    pub name: String,
    pub seq_num: i32,
    pub insertion_code: Option<char>,
    /// Group came from `HETATM` records.
    pub hetero: bool,
    pub atoms: Vec<Atom>,
}

impl ResidueGroup {
    /// One-letter code when the group is a polymer residue, `None` for waters
    /// and ligands.
    pub fn one_letter_code(&self) -> Option<char> {
        codes::one_letter(&self.name, self.hetero)
    }

    pub fn is_polymer(&self) -> bool {
        self.one_letter_code().is_some()
    }
}

/// Residue groups under one chain identifier, in file order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chain {
    pub id: String,
    pub residues: Vec<ResidueGroup>,
}

impl Chain {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            residues: Vec::new(),
        }
    }

    /// Polymer residues with their one-letter codes, in chain order.
    pub fn polymer(&self) -> impl Iterator<Item = (&ResidueGroup, char)> + '_ {
        self.residues
            .iter()
            .filter_map(|res| res.one_letter_code().map(|code| (res, code)))
    }

    pub fn atom_count(&self) -> usize {
        self.residues.iter().map(|r| r.atoms.len()).sum()
    }
}

/// Parsed structure: the first model of a coordinate file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Structure {
    /// Four-character identifier from the `HEADER` record, empty if absent.
    pub id_code: String,
    /// Chains ordered by first appearance in the file.
    pub chains: Vec<Chain>,
}

impl Structure {
    pub fn chain(&self, id: &str) -> Option<&Chain> {
        self.chains.iter().find(|c| c.id == id)
    }

    pub fn atom_count(&self) -> usize {
        self.chains.iter().map(Chain::atom_count).sum()
    }
}
