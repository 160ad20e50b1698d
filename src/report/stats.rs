//! Batch statistics
//!
//! This module summarizes a batch's outcomes by classification, for
//! logging and for the CLI summary.

use crate::prober::{ProbeOutcome, TransportErrorKind};
use crate::report::classify::{classify, StatusIcon};
use std::collections::HashMap;

/// Counts of outcomes in one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStatistics {
    /// Total number of outcomes
    pub total: usize,

    /// Confirmed storefronts
    pub storefronts: usize,

    /// 200 answers without products
    pub reachable_not_storefront: usize,

    /// Everything without a 200 answer
    pub unreachable: usize,

    /// Non-200 statuses by code
    pub http_statuses: HashMap<u16, usize>,

    /// Transport failures by kind
    pub transport_errors: HashMap<TransportErrorKind, usize>,

    /// 200 answers whose body was not a recognizable catalog
    pub parse_ambiguous: usize,

    /// Product samples collected across the batch
    pub products_sampled: usize,
}

impl BatchStatistics {
    /// Tallies a batch's outcomes
    pub fn from_outcomes(outcomes: &[ProbeOutcome]) -> Self {
        let mut stats = Self {
            total: outcomes.len(),
            ..Self::default()
        };

        for outcome in outcomes {
            match classify(outcome).icon {
                StatusIcon::Confirmed => stats.storefronts += 1,
                StatusIcon::ReachableNotStorefront => stats.reachable_not_storefront += 1,
                StatusIcon::Unreachable => stats.unreachable += 1,
            }

            match (outcome.http_status_code(), outcome.transport_error()) {
                (Some(200), _) => {}
                (Some(code), _) => *stats.http_statuses.entry(code).or_insert(0) += 1,
                (None, Some(error)) => *stats.transport_errors.entry(error.kind).or_insert(0) += 1,
                (None, None) => {}
            }

            if outcome.parse_ambiguous() {
                stats.parse_ambiguous += 1;
            }
            stats.products_sampled += outcome.products().len();
        }

        stats
    }

    /// Returns the storefront rate as a percentage
    pub fn storefront_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.storefronts as f64 / self.total as f64) * 100.0
    }
}

/// Prints statistics in a formatted manner
///
/// Written to stderr so stdout carries only report output.
pub fn print_statistics(stats: &BatchStatistics) {
    eprintln!("=== Batch Statistics ===\n");

    eprintln!("Overview:");
    eprintln!("  Targets checked: {}", stats.total);
    eprintln!("  Storefronts: {}", stats.storefronts);
    eprintln!(
        "  Reachable, not a storefront: {}",
        stats.reachable_not_storefront
    );
    eprintln!("  Unreachable: {}", stats.unreachable);
    eprintln!("  Products sampled: {}", stats.products_sampled);
    eprintln!();

    if !stats.http_statuses.is_empty() {
        eprintln!("HTTP Statuses:");
        let mut statuses: Vec<_> = stats.http_statuses.iter().collect();
        statuses.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
        for (code, count) in statuses {
            eprintln!("  {}: {}", code, count);
        }
        eprintln!();
    }

    if !stats.transport_errors.is_empty() {
        eprintln!("Transport Errors:");
        let mut errors: Vec<_> = stats.transport_errors.iter().collect();
        errors.sort_by(|a, b| b.1.cmp(a.1));
        for (kind, count) in errors {
            eprintln!("  {}: {}", kind, count);
        }
        eprintln!();
    }

    if stats.parse_ambiguous > 0 {
        eprintln!(
            "Non-catalog 200 responses: {} (counted as not a storefront)",
            stats.parse_ambiguous
        );
    }

    eprintln!(
        "Storefront Rate: {:.1}% ({} / {} targets)",
        stats.storefront_rate(),
        stats.storefronts,
        stats.total
    );
}
