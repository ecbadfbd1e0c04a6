//! Minimal mmCIF rendering of a [`Structure`]: one data block holding the
//! `_atom_site` loop.

use std::fmt::Write;

use super::model::Structure;

const ATOM_SITE_COLUMNS: [&str; 19] = [
    "group_PDB",
    "id",
    "type_symbol",
    "label_atom_id",
    "label_alt_id",
    "label_comp_id",
    "label_asym_id",
    "label_seq_id",
    "pdbx_PDB_ins_code",
    "Cartn_x",
    "Cartn_y",
    "Cartn_z",
    "occupancy",
    "B_iso_or_equiv",
    "auth_seq_id",
    "auth_comp_id",
    "auth_asym_id",
    "auth_atom_id",
    "pdbx_PDB_model_num",
];

/// Renders `structure` as an mmCIF document.
///
/// The data block is named after the identifier code, or `structure` when the
/// source file carried none.
pub fn to_mmcif(structure: &Structure) -> String {
    let block = if structure.id_code.is_empty() {
        "structure"
    } else {
        structure.id_code.as_str()
    };

    let mut out = String::with_capacity(128 + structure.atom_count() * 96);
    // writing into a String cannot fail
    let _ = writeln!(out, "data_{}", token(block));
    out.push_str("#\nloop_\n");
    for column in ATOM_SITE_COLUMNS {
        let _ = writeln!(out, "_atom_site.{column}");
    }

    for chain in &structure.chains {
        let asym = token(&chain.id);
        let mut label_seq = 0u32;
        for residue in &chain.residues {
            let seq_label = if residue.is_polymer() {
                label_seq += 1;
                label_seq.to_string()
            } else {
                ".".to_string()
            };
            let group = if residue.hetero { "HETATM" } else { "ATOM" };
            let comp = token(&residue.name);
            let ins = residue
                .insertion_code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "?".to_string());

            for atom in &residue.atoms {
                let atom_name = token(&atom.name);
                let alt = atom
                    .alt_loc
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| ".".to_string());
                let _ = writeln!(
                    out,
                    "{group} {serial} {element} {atom_name} {alt} {comp} {asym} {seq_label} {ins} {x:.3} {y:.3} {z:.3} {occ:.2} {b:.2} {auth_seq} {comp} {asym} {atom_name} 1",
                    serial = atom.serial,
                    element = token(&atom.element),
                    x = atom.x,
                    y = atom.y,
                    z = atom.z,
                    occ = atom.occupancy,
                    b = atom.b_factor,
                    auth_seq = residue.seq_num,
                );
            }
        }
    }
    out.push_str("#\n");
    out
}

/// Quotes a CIF value when it would otherwise not read back as one token.
fn token(value: &str) -> String {
    if value.is_empty() {
        return ".".to_string();
    }
    let needs_quotes = value.contains(char::is_whitespace)
        || value.starts_with(['\'', '"', '_', '#', '$', ';', '[', ']'])
        || value == "."
        || value == "?";
    if !needs_quotes {
        value.to_string()
    } else if value.contains('"') {
        format!("'{value}'")
    } else {
        format!("\"{value}\"")
    }
}
