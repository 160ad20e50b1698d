//! Endpoint prober for storefront catalogs
//!
//! This module contains the per-target probing logic:
//! - Building the per-batch HTTP client with the bot's user agent
//! - Fetching `<target>/products.json?limit=<n>` once, with an overall timeout
//! - Leniently parsing the catalog into a handful of product samples
//! - Recording every failure as a field of the outcome instead of an error

mod catalog;
mod fetcher;
mod outcome;

pub use catalog::{
    format_price_range, parse_catalog, CatalogSample, DEFAULT_CURRENCY_SYMBOL, NO_PRICE,
    UNTITLED_PRODUCT,
};
pub use fetcher::{build_http_client, probe, MAX_CATALOG_BYTES, MAX_REDIRECTS};
pub use outcome::{ProbeOutcome, ProductSample, TransportError, TransportErrorKind};
