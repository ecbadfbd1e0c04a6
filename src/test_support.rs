//! Fixture builders shared by the unit tests.

use std::io::Write;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;

fn record(kind: &str, serial: u32, name: &str, res_name: &str, chain: char, res_seq: i32) -> String {
    let name = if name.len() < 4 {
        format!(" {name:<3}")
    } else {
        name.to_string()
    };
    let element = name.trim().chars().next().unwrap_or('C');
    format!(
        "{kind:<6}{serial:>5} {name:<4} {res_name:>3} {chain}{res_seq:>4}    {x:>8.3}{y:>8.3}{z:>8.3}{occ:>6.2}{b:>6.2}          {element:>2}",
        x = 1.0,
        y = 2.0,
        z = 3.0,
        occ = 1.0,
        b = 20.0,
    )
}

/// A fixed-column `ATOM` record with coordinates (1, 2, 3).
pub fn atom_line(serial: u32, name: &str, res_name: &str, chain: char, res_seq: i32) -> String {
    record("ATOM", serial, name, res_name, chain, res_seq)
}

pub fn hetatm_line(serial: u32, name: &str, res_name: &str, chain: char, res_seq: i32) -> String {
    record("HETATM", serial, name, res_name, chain, res_seq)
}

/// PDB text with a `HEADER` carrying `id_code` and one `CA` atom per residue
/// of chain `A`.
pub fn pdb_text(id_code: &str, residues: &[&str]) -> String {
    let mut lines = vec![format!("{:<62}{:<4}", "HEADER    TEST STRUCTURE", id_code)];
    for (i, res) in residues.iter().enumerate() {
        lines.push(atom_line(i as u32 + 1, "CA", res, 'A', i as i32 + 1));
    }
    lines.push("END".to_string());
    lines.join("\n") + "\n"
}

pub fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(bytes).expect("in-memory write");
    enc.finish().expect("in-memory gzip")
}

pub fn write_gz(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("fixture directory");
    }
    std::fs::write(path, gzip(bytes)).expect("fixture file");
}

pub fn write_plain(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("fixture directory");
    }
    std::fs::write(path, bytes).expect("fixture file");
}
