//! URL handling module for Storefront-Probe
//!
//! This module provides target-list extraction and validation, catalog
//! endpoint construction, and hostname extraction for display.

mod domain;
mod extract;

pub use domain::display_host;
pub use extract::{extract_urls, parse_url_list, prepare_targets};

/// Path of the public product catalog on a storefront
pub const CATALOG_PATH: &str = "/products.json";

/// Builds the catalog endpoint URL for a probe target
///
/// Every trailing `/` is trimmed from the target before the catalog path and
/// the `limit` query parameter are appended. The target is not otherwise
/// validated; a malformed target surfaces later as a transport error.
///
/// # Examples
///
/// ```
/// use storefront_probe::url::catalog_url;
///
/// assert_eq!(
///     catalog_url("https://shop.example.com/", 3),
///     "https://shop.example.com/products.json?limit=3"
/// );
/// ```
pub fn catalog_url(target: &str, limit: usize) -> String {
    format!(
        "{}{}?limit={}",
        target.trim_end_matches('/'),
        CATALOG_PATH,
        limit
    )
}
