//! The four retrieval operations.
//!
//! Each operation resolves its paths, opens what it needs and returns a typed
//! result. Opened files are owned by the operation and dropped on every return
//! path. The operations are blocking; async callers run them on a blocking pool.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::ArtifactDirs;
use crate::error::{ArtifactError, Result};
use crate::pocket::{self, Pocket};
use crate::resolve::{ArtifactClass, PathResolver, Target};
use crate::sequence::{parse_conservation, ChainSelection, Sequence};
use crate::source::{self, ArtifactReader};
use crate::structure::{mmcif, pdb, Structure};

/// Entry point to the artifact corpus.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    resolver: PathResolver,
    chain_selection: ChainSelection,
}

impl ArtifactStore {
    pub fn new(dirs: ArtifactDirs) -> Self {
        Self {
            resolver: PathResolver::new(dirs),
            chain_selection: ChainSelection::First,
        }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Opens the decompressed structure file of `target`.
    ///
    /// Fails with `NotFound` before any byte is produced, so a transport can
    /// still answer with a proper status; errors while copying the returned
    /// stream are I/O failures.
    pub fn open_structure(&self, target: &Target) -> Result<StructureStream> {
        let path = self.resolver.resolve(ArtifactClass::Structure, target);
        debug!(%target, path = %path.display(), "open_structure");
        let reader = source::open_decompressed(&path)?;
        Ok(StructureStream { path, reader })
    }

    /// Copies the decompressed structure file of `target` into `out`.
    ///
    /// Returns the number of bytes written. Output already written when a read
    /// error occurs is not rolled back.
    pub fn stream_structure<W: Write>(&self, target: &Target, out: &mut W) -> Result<u64> {
        let copied = self.open_structure(target)?.copy_to(out)?;
        debug!(%target, bytes = copied, "stream_structure");
        Ok(copied)
    }

    /// Parses the structure file of `target`.
    pub fn load_structure(&self, target: &Target) -> Result<Structure> {
        let path = self.resolver.resolve(ArtifactClass::Structure, target);
        let reader = source::open_decompressed(&path)?;
        pdb::read(reader).map_err(|e| e.at(&path))
    }

    /// Residue sequence of the first chain, scored with conservation data when
    /// the conservation artifact exists.
    pub fn build_sequence(&self, target: &Target) -> Result<Sequence> {
        let start = Instant::now();
        match self.build_sequence_inner(target) {
            Ok(seq) => {
                info!(
                    %target,
                    residues = seq.len(),
                    scored = seq.is_scored(),
                    elapsed_micros = start.elapsed().as_micros(),
                    "sequence_success"
                );
                Ok(seq)
            }
            Err(err) => {
                warn!(
                    %target,
                    error = %err,
                    elapsed_micros = start.elapsed().as_micros(),
                    "sequence_failure"
                );
                Err(err)
            }
        }
    }

    fn build_sequence_inner(&self, target: &Target) -> Result<Sequence> {
        let structure = self.load_structure(target)?;
        let mut sequence = Sequence::from_structure(&structure, self.chain_selection)?;

        let path = self.resolver.resolve(ArtifactClass::Conservation, target);
        match source::open_optional_decompressed(&path)? {
            Some(reader) => {
                let text = source::read_to_string(&path, reader)?;
                let scores = parse_conservation(&text)?;
                sequence.apply_scores(&scores)?;
            }
            None => debug!(%target, path = %path.display(), "no conservation data"),
        }
        Ok(sequence)
    }

    /// Legacy mmCIF rendering, headed by `data_<id code>`.
    #[deprecated(note = "kept for existing clients; use the raw structure instead")]
    pub fn convert_to_legacy_format(&self, target: &Target) -> Result<String> {
        let structure = self.load_structure(target).inspect_err(|err| {
            warn!(%target, error = %err, "legacy_conversion_failure");
        })?;

        let rendered = mmcif::to_mmcif(&structure);
        let body = rendered
            .find('\n')
            .map(|idx| &rendered[idx..])
            .unwrap_or_default();
        Ok(format!("data_{}{}", structure.id_code, body))
    }

    /// Pockets of the prediction table of `target`, in file order.
    pub fn parse_pocket_table(&self, target: &Target) -> Result<Vec<Pocket>> {
        let start = Instant::now();
        let path = self.resolver.resolve(ArtifactClass::PredictionTable, target);
        let result = source::open_primary(&path)
            .and_then(|file| pocket::parse_table_at(io::BufReader::new(file), &path));

        match &result {
            Ok(pockets) => info!(
                %target,
                pockets = pockets.len(),
                elapsed_micros = start.elapsed().as_micros(),
                "pocket_table_success"
            ),
            Err(err) => warn!(
                %target,
                error = %err,
                elapsed_micros = start.elapsed().as_micros(),
                "pocket_table_failure"
            ),
        }
        result
    }
}

/// Opened, decoded structure file.
pub struct StructureStream {
    path: PathBuf,
    reader: ArtifactReader,
}

impl StructureStream {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copies the remaining bytes into `out`.
    pub fn copy_to<W: Write + ?Sized>(mut self, out: &mut W) -> Result<u64> {
        io::copy(&mut self.reader, out).map_err(|e| ArtifactError::from_io(&self.path, e))
    }
}

impl std::fmt::Debug for StructureStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructureStream")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
