//! Reader for the fixed-column PDB coordinate format.
//!
//! Only what the retrieval operations need is interpreted: the `HEADER`
//! identifier code and the `ATOM`/`HETATM` records of the first model. Every
//! other record is skipped.

use std::collections::HashMap;
use std::io::BufRead;
use std::ops::Range;

use super::model::{Atom, Chain, ResidueGroup, Structure};
use super::ParseError;

const COL_SERIAL: Range<usize> = 6..11;
const COL_NAME: Range<usize> = 12..16;
const COL_ALT_LOC: Range<usize> = 16..17;
const COL_RES_NAME: Range<usize> = 17..20;
const COL_CHAIN: Range<usize> = 21..22;
const COL_RES_SEQ: Range<usize> = 22..26;
const COL_I_CODE: Range<usize> = 26..27;
const COL_X: Range<usize> = 30..38;
const COL_Y: Range<usize> = 38..46;
const COL_Z: Range<usize> = 46..54;
const COL_OCCUPANCY: Range<usize> = 54..60;
const COL_B_FACTOR: Range<usize> = 60..66;
const COL_ELEMENT: Range<usize> = 76..78;
const COL_ID_CODE: Range<usize> = 62..66;

/// Parses a PDB stream into a [`Structure`].
///
/// Chains keep their order of first appearance and residues their order within
/// the chain. Consecutive atoms with the same residue number, insertion code
/// and residue name form one [`ResidueGroup`]. Reading stops at the end of the
/// first model.
///
/// # Errors
///
/// [`ParseError::Malformed`] for non-UTF-8 lines and unparsable coordinate or
/// residue-number columns, [`ParseError::NoAtoms`] when the stream holds no atom record and
/// [`ParseError::Io`] when the underlying reader fails.
///
/// # Examples
///
/// ```
/// use artifacts::structure::pdb;
///
/// let text = "\
/// HEADER    HYDROLASE                               01-JAN-00   1ABC              \n\
/// ATOM      1  CA  ALA A   1      11.104   6.134  -6.504  1.00 20.00           C  \n\
/// ATOM      2  CA  CYS A   2      12.560   6.276  -6.102  1.00 20.00           C  \n\
/// END\n";
/// let structure = pdb::read(text.as_bytes()).unwrap();
/// assert_eq!(structure.id_code, "1ABC");
/// assert_eq!(structure.chains[0].residues.len(), 2);
/// ```
pub fn read<R: BufRead>(reader: R) -> Result<Structure, ParseError> {
    let mut structure = Structure::default();
    let mut chain_index: HashMap<String, usize> = HashMap::new();
    let mut atoms_seen = 0usize;

    for (idx, raw) in reader.split(b'\n').enumerate() {
        let line_num = idx + 1;
        let raw = raw?;
        let line = std::str::from_utf8(&raw).map_err(|err| ParseError::Malformed {
            line: line_num,
            message: format!("invalid UTF-8: {err}"),
        })?;
        let line = line.trim_end_matches('\r');

        let record = line.get(..6).unwrap_or(line).trim_end();
        match record {
            "HEADER" => {
                structure.id_code = column(line, COL_ID_CODE).unwrap_or_default().to_string();
            }
            "ATOM" | "HETATM" => {
                let hetero = record == "HETATM";
                let placed = parse_atom(line, line_num, atoms_seen)?;
                push_atom(&mut structure, &mut chain_index, placed, hetero);
                atoms_seen += 1;
            }
            "ENDMDL" | "END" => break,
            _ => {}
        }
    }

    if atoms_seen == 0 {
        return Err(ParseError::NoAtoms);
    }
    Ok(structure)
}

/// An atom together with the residue and chain it belongs to.
struct PlacedAtom {
    chain_id: String,
    res_name: String,
    res_seq: i32,
    i_code: Option<char>,
    atom: Atom,
}

fn parse_atom(line: &str, line_num: usize, atoms_seen: usize) -> Result<PlacedAtom, ParseError> {
    let malformed = |message: String| ParseError::Malformed {
        line: line_num,
        message,
    };

    let res_seq = required(line, COL_RES_SEQ, "residue number", line_num)?;
    let x = required(line, COL_X, "x coordinate", line_num)?;
    let y = required(line, COL_Y, "y coordinate", line_num)?;
    let z = required(line, COL_Z, "z coordinate", line_num)?;
    let occupancy = optional(line, COL_OCCUPANCY, "occupancy", line_num)?.unwrap_or(1.0);
    let b_factor = optional(line, COL_B_FACTOR, "temperature factor", line_num)?.unwrap_or(0.0);

    let name = column(line, COL_NAME)
        .ok_or_else(|| malformed("missing atom name".to_string()))?
        .to_string();
    let res_name = column(line, COL_RES_NAME)
        .ok_or_else(|| malformed("missing residue name".to_string()))?
        .to_string();

    // hybrid-36 or starred serials in very large files are not decimal
    let serial = column(line, COL_SERIAL)
        .and_then(|s| s.parse().ok())
        .unwrap_or(atoms_seen as u32 + 1);

    let element = column(line, COL_ELEMENT)
        .map(str::to_string)
        .unwrap_or_else(|| element_from_name(&name));

    Ok(PlacedAtom {
        chain_id: column(line, COL_CHAIN).unwrap_or_default().to_string(),
        res_name,
        res_seq,
        i_code: single_char(line, COL_I_CODE),
        atom: Atom {
            serial,
            name,
            alt_loc: single_char(line, COL_ALT_LOC),
            element,
            x,
            y,
            z,
            occupancy,
            b_factor,
        },
    })
}

fn push_atom(
    structure: &mut Structure,
    chain_index: &mut HashMap<String, usize>,
    placed: PlacedAtom,
    hetero: bool,
) {
    let idx = *chain_index
        .entry(placed.chain_id.clone())
        .or_insert_with(|| {
            structure.chains.push(Chain::new(placed.chain_id.clone()));
            structure.chains.len() - 1
        });
    let chain = &mut structure.chains[idx];

    let continues_last = chain.residues.last().is_some_and(|res| {
        res.seq_num == placed.res_seq
            && res.insertion_code == placed.i_code
            && res.name == placed.res_name
    });

    if !continues_last {
        chain.residues.push(ResidueGroup {
            name: placed.res_name,
            seq_num: placed.res_seq,
            insertion_code: placed.i_code,
            hetero,
            atoms: Vec::new(),
        });
    }
    if let Some(res) = chain.residues.last_mut() {
        res.atoms.push(placed.atom);
    }
}

/// Trimmed column content, `None` when blank or beyond the end of the line.
fn column(line: &str, range: Range<usize>) -> Option<&str> {
    let end = range.end.min(line.len());
    line.get(range.start..end)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn single_char(line: &str, range: Range<usize>) -> Option<char> {
    column(line, range).and_then(|s| s.chars().next())
}

fn required<T: std::str::FromStr>(
    line: &str,
    range: Range<usize>,
    what: &str,
    line_num: usize,
) -> Result<T, ParseError> {
    optional(line, range, what, line_num)?.ok_or_else(|| ParseError::Malformed {
        line: line_num,
        message: format!("missing {what}"),
    })
}

fn optional<T: std::str::FromStr>(
    line: &str,
    range: Range<usize>,
    what: &str,
    line_num: usize,
) -> Result<Option<T>, ParseError> {
    match column(line, range) {
        None => Ok(None),
        Some(text) => text.parse().map(Some).map_err(|_| ParseError::Malformed {
            line: line_num,
            message: format!("invalid {what} {text:?}"),
        }),
    }
}

fn element_from_name(name: &str) -> String {
    name.chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_string())
        .unwrap_or_default()
}
