//! Base directories of the three artifact classes.
//!
//! The directories are plain configuration values handed to
//! [`PathResolver::new`](crate::PathResolver::new); there is no process-wide
//! singleton, so tests can point separate resolvers at separate fixture trees.
//!
//! ## Example TOML
//!
//! ```toml
//! [data]
//! pdb_data_path  = "/srv/pdb/divided"
//! csv_data_path  = "/srv/prank/precomputed"
//! prediction_dir = "/srv/prank/predictions"
//! uploads_dir    = "/srv/prank/uploads"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Locations of the on-disk artifact corpus.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArtifactDirs {
    /// Archived structures, `pdb<id>.ent.gz`.
    #[serde(default = "default_pdb_data_path")]
    pub pdb_data_path: PathBuf,

    /// Precomputed conservation and prediction tables for archived structures.
    #[serde(default = "default_csv_data_path")]
    pub csv_data_path: PathBuf,

    /// Working directory of predictions run on uploaded files.
    #[serde(default = "default_prediction_dir")]
    pub prediction_dir: PathBuf,

    /// User-uploaded structure files, addressed by upload id.
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,
}

impl Default for ArtifactDirs {
    fn default() -> Self {
        Self {
            pdb_data_path: default_pdb_data_path(),
            csv_data_path: default_csv_data_path(),
            prediction_dir: default_prediction_dir(),
            uploads_dir: default_uploads_dir(),
        }
    }
}

impl ArtifactDirs {
    /// Places all four directories under one root, using the default names.
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            pdb_data_path: root.join(default_pdb_data_path()),
            csv_data_path: root.join(default_csv_data_path()),
            prediction_dir: root.join(default_prediction_dir()),
            uploads_dir: root.join(default_uploads_dir()),
        }
    }

    /// Named directories, in a stable order, for readiness reporting.
    pub fn entries(&self) -> [(&'static str, &Path); 4] {
        [
            ("pdb_data_path", self.pdb_data_path.as_path()),
            ("csv_data_path", self.csv_data_path.as_path()),
            ("prediction_dir", self.prediction_dir.as_path()),
            ("uploads_dir", self.uploads_dir.as_path()),
        ]
    }

    /// Names of the configured directories that do not exist.
    pub fn missing(&self) -> Vec<&'static str> {
        self.entries()
            .into_iter()
            .filter(|(_, path)| !path.is_dir())
            .map(|(name, _)| name)
            .collect()
    }
}

fn default_pdb_data_path() -> PathBuf {
    PathBuf::from("data/pdb")
}

fn default_csv_data_path() -> PathBuf {
    PathBuf::from("data/csv")
}

fn default_prediction_dir() -> PathBuf {
    PathBuf::from("data/predictions")
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("data/uploads")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rooted_layout() {
        let dirs = ArtifactDirs::rooted_at("/srv");
        assert_eq!(dirs.pdb_data_path, PathBuf::from("/srv/data/pdb"));
        assert_eq!(dirs.uploads_dir, PathBuf::from("/srv/data/uploads"));
    }

    #[test]
    fn missing_reports_absent_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = ArtifactDirs::rooted_at(tmp.path());
        std::fs::create_dir_all(&dirs.pdb_data_path).unwrap();
        std::fs::create_dir_all(&dirs.uploads_dir).unwrap();

        assert_eq!(dirs.missing(), vec!["csv_data_path", "prediction_dir"]);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let dirs: ArtifactDirs = serde_json::from_str(r#"{"uploads_dir": "/tmp/up"}"#).unwrap();
        assert_eq!(dirs.uploads_dir, PathBuf::from("/tmp/up"));
        assert_eq!(dirs.pdb_data_path, PathBuf::from("data/pdb"));
    }
}
