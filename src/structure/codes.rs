//! Residue name to one-letter code.

/// Returns the sequence letter of a residue, or `None` when the group is not
/// part of the polymer (water, ions, ligands).
///
/// Standard amino acids and nucleotides are recognised from both `ATOM` and
/// `HETATM` records; anything else read from `ATOM` records is still a polymer
/// residue and maps to `X`.
pub fn one_letter(name: &str, hetero: bool) -> Option<char> {
    let code = match name {
        "ALA" => 'A',
        "ARG" => 'R',
        "ASN" => 'N',
        "ASP" => 'D',
        "CYS" => 'C',
        "GLN" => 'Q',
        "GLU" => 'E',
        "GLY" => 'G',
        "HIS" => 'H',
        "ILE" => 'I',
        "LEU" => 'L',
        "LYS" => 'K',
        "MET" => 'M',
        "PHE" => 'F',
        "PRO" => 'P',
        "SER" => 'S',
        "THR" => 'T',
        "TRP" => 'W',
        "TYR" => 'Y',
        "VAL" => 'V',
        "SEC" => 'U',
        "PYL" => 'O',
        "ASX" => 'B',
        "GLX" => 'Z',
        // common modified residues
        "MSE" => 'M',
        "SEP" => 'S',
        "TPO" => 'T',
        "PTR" => 'Y',
        "CSO" | "CME" | "CSD" => 'C',
        "HYP" => 'P',
        "MLY" | "KCX" => 'K',
        // nucleotides
        "A" | "DA" => 'A',
        "C" | "DC" => 'C',
        "G" | "DG" => 'G',
        "U" | "DU" => 'U',
        "T" | "DT" => 'T',
        "I" | "DI" => 'I',
        _ if hetero => return None,
        _ => 'X',
    };
    Some(code)
}
