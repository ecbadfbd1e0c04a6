//! Opening artifact files as byte sources.
//!
//! Archived structures and conservation files are gzip streams, but uploads
//! may arrive either compressed or as plain text. Decoding is therefore picked
//! from the first two bytes rather than from the file name.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::{ArtifactError, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Boxed, decoded byte stream over an artifact file.
pub type ArtifactReader = Box<dyn BufRead + Send>;

/// Opens a file that must exist.
pub fn open_primary(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| ArtifactError::from_io(path, e))
}

/// Opens a file that must exist and decodes it when it is gzip-compressed.
pub fn open_decompressed(path: &Path) -> Result<ArtifactReader> {
    let file = open_primary(path)?;
    decode(file).map_err(|e| ArtifactError::from_io(path, e))
}

/// Like [`open_decompressed`], but an absent file yields `Ok(None)`.
pub fn open_optional_decompressed(path: &Path) -> Result<Option<ArtifactReader>> {
    match open_decompressed(path) {
        Ok(reader) => Ok(Some(reader)),
        Err(ArtifactError::NotFound { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Reads a whole decoded source into a string.
pub fn read_to_string(path: &Path, mut reader: impl Read) -> Result<String> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| ArtifactError::from_io(path, e))?;
    Ok(text)
}

fn decode<R: Read + Send + 'static>(inner: R) -> std::io::Result<ArtifactReader> {
    let mut buffered = BufReader::new(inner);
    let head = buffered.fill_buf()?;
    if head.starts_with(&GZIP_MAGIC) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(buffered))))
    } else {
        Ok(Box::new(buffered))
    }
}
