//! Report assembly for probe batches
//!
//! This module handles:
//! - Classifying outcomes for display
//! - Rendering per-target text blocks and packing them into chunks
//! - Flattening outcomes into CSV rows
//! - Producing the TXT/CSV artifacts for file-mode delivery
//! - Summarizing a batch into statistics

mod artifacts;
mod classify;
pub mod stats;
mod table;
mod text;

pub use artifacts::{ArtifactPaths, Artifacts, CSV_FILE_NAME, TEXT_FILE_NAME};
pub use classify::{classify, Classification, StatusIcon};
pub use stats::{print_statistics, BatchStatistics};
pub use table::{csv_bytes, table_rows, write_csv, TableRow, CSV_HEADER, PLACEHOLDER};
pub use text::{
    pack_chunks, render_block, truncate_title, Chunk, BLOCK_SEPARATOR, MAX_TITLE_CHARS,
};

use crate::prober::ProbeOutcome;
use crate::ReportError;

/// Rendered report of one batch
///
/// Both the text blocks and the tabular rows follow outcome order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    blocks: Vec<String>,
    rows: Vec<TableRow>,
}

impl Report {
    /// Renders a batch's outcomes
    ///
    /// # Arguments
    ///
    /// * `outcomes` - Outcomes in input order
    /// * `sample_limit` - Maximum product lines per text block
    pub fn from_outcomes(outcomes: &[ProbeOutcome], sample_limit: usize) -> Self {
        Self {
            blocks: outcomes
                .iter()
                .map(|outcome| render_block(outcome, sample_limit))
                .collect(),
            rows: table_rows(outcomes),
        }
    }

    /// One rendered text block per outcome
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    /// Tabular rows, one per product or one placeholder per empty outcome
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Packs the blocks into chunks of at most `budget` characters
    pub fn chunks(&self, budget: usize) -> Vec<Chunk> {
        pack_chunks(self.blocks.iter().cloned(), budget)
    }

    /// The plain-text artifact: every block, separated by blank lines
    pub fn text_artifact(&self) -> String {
        self.blocks.join(BLOCK_SEPARATOR)
    }

    /// The CSV artifact
    pub fn csv_artifact(&self) -> Result<Vec<u8>, ReportError> {
        csv_bytes(&self.rows)
    }

    /// Builds both file-mode artifacts in memory
    pub fn artifacts(&self) -> Result<Artifacts, ReportError> {
        Ok(Artifacts {
            text: self.text_artifact(),
            csv: self.csv_artifact()?,
        })
    }
}
