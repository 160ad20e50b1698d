//! Batch coordinator - concurrent probe orchestration
//!
//! Probes run as tasks on a [`JoinSet`], each holding a semaphore permit for
//! the duration of its request. Tasks report their input index, and the
//! coordinator places each outcome in its slot.

use crate::batch::MAX_BATCH_URLS;
use crate::config::{Config, ProbeConfig, UserAgentConfig};
use crate::prober::{build_http_client, probe, ProbeOutcome, TransportError, TransportErrorKind};
use crate::report::BatchStatistics;
use crate::BatchError;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Runs batches of probes with fixed probe and user agent settings
///
/// The coordinator itself holds no connections; every [`Coordinator::run`]
/// builds its own HTTP client and drops it once the batch is done, so
/// concurrent runs never share a connection pool.
#[derive(Debug, Clone)]
pub struct Coordinator {
    probe: ProbeConfig,
    user_agent: UserAgentConfig,
}

impl Coordinator {
    /// Creates a new coordinator
    ///
    /// # Arguments
    ///
    /// * `probe` - Sample limit, timeout, and concurrency bound
    /// * `user_agent` - Identification sent with every request
    pub fn new(probe: &ProbeConfig, user_agent: &UserAgentConfig) -> Self {
        Self {
            probe: probe.clone(),
            user_agent: user_agent.clone(),
        }
    }

    /// Creates a coordinator from a full configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.probe, &config.user_agent)
    }

    /// Probes every target and returns the outcomes in input order
    ///
    /// Targets beyond [`MAX_BATCH_URLS`] are dropped. A failing target only
    /// affects its own outcome; the run itself fails only when the
    /// concurrency limit is out of range, the HTTP client cannot be built,
    /// or `cancel` fires before all probes finish.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ProbeOutcome>)` - One outcome per (capped) target, `outcome[i]` for `target[i]`
    /// * `Err(BatchError)` - Bad concurrency limit, client construction failed,
    ///   or the batch was cancelled
    pub async fn run(
        &self,
        targets: &[String],
        cancel: &CancellationToken,
    ) -> Result<Vec<ProbeOutcome>, BatchError> {
        // Zero permits would park every task forever
        let limit = self.probe.concurrency_limit;
        if limit == 0 || limit > Semaphore::MAX_PERMITS {
            return Err(BatchError::InvalidConcurrency {
                limit,
                max: Semaphore::MAX_PERMITS,
            });
        }

        let targets = if targets.len() > MAX_BATCH_URLS {
            tracing::warn!(
                "Batch of {} targets truncated to the first {}",
                targets.len(),
                MAX_BATCH_URLS
            );
            &targets[..MAX_BATCH_URLS]
        } else {
            targets
        };

        let total = targets.len();
        let start_time = Instant::now();
        tracing::info!(
            "Starting batch of {} targets (concurrency {}, timeout {}s, sample limit {})",
            total,
            self.probe.concurrency_limit,
            self.probe.timeout_secs,
            self.probe.sample_limit
        );

        let client = build_http_client(&self.probe, &self.user_agent)?;
        let semaphore = Arc::new(Semaphore::new(limit));
        let sample_limit = self.probe.sample_limit;

        let mut tasks = JoinSet::new();
        for (index, target) in targets.iter().enumerate() {
            let client = client.clone();
            let semaphore = Arc::clone(&semaphore);
            let target = target.clone();

            tasks.spawn(async move {
                // The semaphore is never closed, so acquisition only fails
                // if that invariant is broken; probe unbounded in that case.
                let _permit = semaphore.acquire_owned().await.ok();
                (index, probe(&client, &target, sample_limit).await)
            });
        }

        let mut slots: Vec<Option<ProbeOutcome>> = vec![None; total];
        let mut completed = 0;

        loop {
            let joined = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tasks.abort_all();
                    tracing::warn!("Batch cancelled after {} of {} probes", completed, total);
                    return Err(BatchError::Cancelled { completed, total });
                }
                joined = tasks.join_next() => joined,
            };

            let Some(result) = joined else {
                break;
            };

            match result {
                Ok((index, outcome)) => {
                    slots[index] = Some(outcome);
                }
                Err(e) => {
                    // The slot is filled below once every task has finished
                    tracing::warn!("Probe task failed: {}", e);
                }
            }

            completed += 1;
            if completed % 100 == 0 {
                tracing::info!("Progress: {} of {} probes finished", completed, total);
            }
        }

        let outcomes: Vec<ProbeOutcome> = slots
            .into_iter()
            .zip(targets)
            .map(|(slot, target)| {
                slot.unwrap_or_else(|| {
                    ProbeOutcome::unreachable(
                        target.as_str(),
                        TransportError::new(
                            TransportErrorKind::TaskFailed,
                            "probe task ended without an outcome",
                        ),
                    )
                })
            })
            .collect();

        let stats = BatchStatistics::from_outcomes(&outcomes);
        tracing::info!(
            "Batch completed in {:?}: {} storefronts, {} reachable without catalog, {} unreachable",
            start_time.elapsed(),
            stats.storefronts,
            stats.reachable_not_storefront,
            stats.unreachable
        );

        Ok(outcomes)
    }
}

/// Runs one batch with the given configuration
///
/// This is the main entry point for a probe run; see [`Coordinator::run`].
pub async fn run_batch(
    config: &Config,
    targets: &[String],
    cancel: &CancellationToken,
) -> Result<Vec<ProbeOutcome>, BatchError> {
    Coordinator::from_config(config).run(targets, cancel).await
}
