//! Read-only access to precomputed pocket-prediction artifacts.
//!
//! A target is addressed either by a published accession or by an upload id.
//! For every target the corpus may hold three artifacts: the structure file,
//! per-residue conservation scores and a table of predicted pockets. This
//! crate resolves targets to those files and assembles the four views served
//! over HTTP by the `server` crate:
//!
//! - **Raw structure**: decompressed structure bytes, passed through verbatim.
//! - **Sequence**: residues of the first chain, scored from conservation data
//!   when it exists ([`Sequence`]).
//! - **Legacy mmCIF**: deprecated text conversion of the structure.
//! - **Pockets**: rows of the prediction table ([`Pocket`]).
//!
//! ## Example
//!
//! ```no_run
//! use artifacts::{ArtifactDirs, ArtifactStore, Mode, Target};
//!
//! let store = ArtifactStore::new(ArtifactDirs::rooted_at("/srv/prankweb"));
//! let target = Target::new(Mode::Accession, "1abc")?;
//! let sequence = store.build_sequence(&target)?;
//! println!("{} residues, scored: {}", sequence.len(), sequence.is_scored());
//! # Ok::<(), artifacts::ArtifactError>(())
//! ```

pub mod config;
pub mod error;
pub mod pocket;
pub mod resolve;
pub mod retrieval;
pub mod sequence;
pub mod source;
pub mod structure;

#[cfg(test)]
mod test_support;

pub use crate::config::ArtifactDirs;
pub use crate::error::{ArtifactError, ErrorKind, Result};
pub use crate::pocket::{Pocket, PocketValue};
pub use crate::resolve::{ArtifactClass, Mode, PathResolver, Target, UnknownMode};
pub use crate::retrieval::{ArtifactStore, StructureStream};
pub use crate::sequence::{ChainSelection, Residue, Sequence};
pub use crate::structure::Structure;
