//! TXT/CSV artifacts for file-mode delivery
//!
//! Artifacts are built in memory. When written to disk, each batch gets its
//! own freshly created directory, so concurrent batches never share files.

use crate::ReportError;
use std::path::{Path, PathBuf};

pub const TEXT_FILE_NAME: &str = "results.txt";
pub const CSV_FILE_NAME: &str = "results.csv";

/// In-memory report artifacts of one batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// All blocks joined by blank lines
    pub text: String,
    /// CSV export, header included
    pub csv: Vec<u8>,
}

/// Locations of artifacts written to disk
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub dir: PathBuf,
    pub text: PathBuf,
    pub csv: PathBuf,
}

impl Artifacts {
    /// Writes both artifacts into a new per-batch directory under `parent`
    ///
    /// The directory is named `results-<UTC timestamp>-<random>` and is kept
    /// after this call returns.
    pub fn write_to(&self, parent: &Path) -> Result<ArtifactPaths, ReportError> {
        std::fs::create_dir_all(parent)?;

        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
        let dir = tempfile::Builder::new()
            .prefix(&format!("results-{}-", stamp))
            .tempdir_in(parent)?
            .into_path();

        let text = dir.join(TEXT_FILE_NAME);
        let csv = dir.join(CSV_FILE_NAME);
        std::fs::write(&text, self.text.as_bytes())?;
        std::fs::write(&csv, &self.csv)?;

        tracing::info!("Wrote report artifacts to {}", dir.display());

        Ok(ArtifactPaths { dir, text, csv })
    }
}
