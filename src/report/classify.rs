//! Classification of probe outcomes for rendering

use crate::prober::ProbeOutcome;

/// Icon shown in front of a rendered result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusIcon {
    /// The catalog returned at least one product
    Confirmed,
    /// The catalog path answered 200 but held no products
    ReachableNotStorefront,
    /// No 200 answer from the catalog path
    Unreachable,
}

impl StatusIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "✅",
            Self::ReachableNotStorefront => "⚠️",
            Self::Unreachable => "❌",
        }
    }
}

/// Rendering labels derived from one outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub icon: StatusIcon,
    /// `Yes` or `No`
    pub storefront_label: &'static str,
    /// `Reachable`, `HTTP <code>`, or `Unreachable`
    pub reachability_label: String,
}

impl Classification {
    /// Storefront column value of the tabular export
    pub fn table_label(&self) -> &'static str {
        if self.icon == StatusIcon::Confirmed {
            "✅ Yes"
        } else {
            "❌ No"
        }
    }
}

/// Classifies an outcome
///
/// Pure function of the outcome's products and status.
pub fn classify(outcome: &ProbeOutcome) -> Classification {
    let icon = if outcome.is_storefront() {
        StatusIcon::Confirmed
    } else if outcome.is_reachable() {
        StatusIcon::ReachableNotStorefront
    } else {
        StatusIcon::Unreachable
    };

    let reachability_label = match outcome.http_status_code() {
        Some(200) => "Reachable".to_string(),
        Some(code) => format!("HTTP {}", code),
        None => "Unreachable".to_string(),
    };

    Classification {
        icon,
        storefront_label: if outcome.is_storefront() { "Yes" } else { "No" },
        reachability_label,
    }
}
