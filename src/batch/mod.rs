//! Batch coordination for probe runs
//!
//! This module fans the prober out over an ordered target list:
//! - Building one HTTP client per batch run
//! - Bounding in-flight probes with a semaphore
//! - Isolating per-target failures (including panicking probe tasks)
//! - Reassembling outcomes into input order
//! - Caller-initiated cancellation of the whole batch

mod coordinator;

pub use coordinator::{run_batch, Coordinator};

use crate::config::Config;
use crate::prober::ProbeOutcome;
use crate::report::{BatchStatistics, Report};
use crate::url::prepare_targets;
use tokio_util::sync::CancellationToken;

/// Maximum number of targets accepted in one batch
pub const MAX_BATCH_URLS: usize = 2000;

/// Everything one batch run produces
#[derive(Debug, Clone)]
pub struct BatchRun {
    /// Outcomes in input order
    pub outcomes: Vec<ProbeOutcome>,
    pub report: Report,
    pub statistics: BatchStatistics,
}

/// Validates a URL list, probes it, and renders the report
///
/// This is the single call a delivery transport needs: an empty list fails
/// with `InputError::Empty` before any request is made, and an oversized list
/// is capped at [`MAX_BATCH_URLS`].
///
/// # Returns
///
/// * `Ok(BatchRun)` - Outcomes, rendered report, and statistics
/// * `Err(ProbeError)` - Invalid input, bad concurrency limit, client
///   construction failure, or cancellation
pub async fn check_urls(
    config: &Config,
    urls: Vec<String>,
    cancel: &CancellationToken,
) -> crate::Result<BatchRun> {
    let targets = prepare_targets(urls)?;
    let outcomes = run_batch(config, &targets, cancel).await?;
    let report = Report::from_outcomes(&outcomes, config.probe.sample_limit);
    let statistics = BatchStatistics::from_outcomes(&outcomes);

    Ok(BatchRun {
        outcomes,
        report,
        statistics,
    })
}
