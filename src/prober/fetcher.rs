//! HTTP fetcher for catalog endpoints
//!
//! This module handles all HTTP requests made by the prober, including:
//! - Building the HTTP client with the bot's user agent and timeout
//! - A single GET of the catalog endpoint, following redirects
//! - Mapping every failure onto a [`ProbeOutcome`] field

use crate::config::{ProbeConfig, UserAgentConfig};
use crate::prober::catalog::{parse_catalog, CatalogSample};
use crate::prober::outcome::{ProbeOutcome, TransportError};
use crate::url::catalog_url;
use reqwest::{redirect::Policy, Client, Response, StatusCode};

/// Maximum number of redirects followed per catalog request
pub const MAX_REDIRECTS: usize = 10;

/// Largest catalog body read before the response is treated as not a catalog
///
/// A full 250-product page stays well under this.
pub const MAX_CATALOG_BYTES: usize = 8 * 1024 * 1024;

/// Builds an HTTP client for one batch run
///
/// The timeout covers the whole request lifecycle (connect, headers, and
/// body), so a slow body read is reported the same way as a slow connect.
///
/// # Arguments
///
/// * `probe` - Probe settings supplying the timeout
/// * `user_agent` - The user agent configuration
///
/// # Example
///
/// ```no_run
/// use storefront_probe::config::Config;
/// use storefront_probe::prober::build_http_client;
///
/// let config = Config::default();
/// let client = build_http_client(&config.probe, &config.user_agent).unwrap();
/// ```
pub fn build_http_client(
    probe: &ProbeConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(probe.timeout())
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Probes one target's catalog endpoint
///
/// # Outcome Mapping
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | Network failure (DNS, TLS, reset, timeout, bad URL) | no status, transport error |
/// | HTTP status other than 200 | status recorded, no products |
/// | 200 with a body that cannot be read | no status, transport error |
/// | 200 with a non-catalog body | status 200, no products, `parse_ambiguous` |
/// | 200 with a body over [`MAX_CATALOG_BYTES`] | status 200, no products, `parse_ambiguous` |
/// | 200 with a catalog | status 200, up to `sample_limit` products |
///
/// This function never returns an error.
pub async fn probe(client: &Client, target: &str, sample_limit: usize) -> ProbeOutcome {
    let url = catalog_url(target, sample_limit);
    tracing::trace!("Fetching catalog {}", url);

    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = TransportError::from(&e);
            tracing::debug!("Probe of {} failed: {}", target, error);
            return ProbeOutcome::unreachable(target, error);
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        tracing::debug!("Probe of {} returned HTTP {}", target, status.as_u16());
        return ProbeOutcome::http_status(target, status.as_u16());
    }

    let body = match read_capped_body(response, MAX_CATALOG_BYTES).await {
        Ok(Some(body)) => body,
        Ok(None) => {
            tracing::debug!(
                "Catalog response of {} exceeded {} bytes",
                target,
                MAX_CATALOG_BYTES
            );
            return ProbeOutcome::catalog(target, status.as_u16(), CatalogSample::ambiguous());
        }
        Err(e) => {
            let error = TransportError::from(&e);
            tracing::debug!("Reading catalog body of {} failed: {}", target, error);
            return ProbeOutcome::unreachable(target, error);
        }
    };

    let sample = parse_catalog(&body, sample_limit);
    if sample.parse_ambiguous {
        tracing::debug!(
            "Catalog response of {} was not a recognizable product list",
            target
        );
    } else {
        tracing::debug!(
            "Probe of {} sampled {} products",
            target,
            sample.products.len()
        );
    }

    ProbeOutcome::catalog(target, status.as_u16(), sample)
}

/// Reads a response body, giving up once it grows past `limit` bytes
///
/// Returns `Ok(None)` when the declared or received length exceeds `limit`.
async fn read_capped_body(
    mut response: Response,
    limit: usize,
) -> Result<Option<Vec<u8>>, reqwest::Error> {
    if let Some(declared) = response.content_length() {
        if declared > limit as u64 {
            return Ok(None);
        }
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if body.len() + chunk.len() > limit {
            return Ok(None);
        }
        body.extend_from_slice(&chunk);
    }

    Ok(Some(body))
}
