//! Probe outcome records
//!
//! A [`ProbeOutcome`] is produced once per target and never modified
//! afterwards; its fields are only reachable through accessors.

use crate::prober::catalog::{CatalogSample, DEFAULT_CURRENCY_SYMBOL};
use std::fmt;

/// One sampled product listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSample {
    /// Product title, trimmed but not truncated
    pub title: String,

    /// Formatted price, price range, or `N/A`
    pub price_range: String,
}

impl ProductSample {
    pub fn new(title: impl Into<String>, price_range: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price_range: price_range.into(),
        }
    }
}

/// Category of a network-level failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// The request did not finish within the timeout
    Timeout,
    /// DNS, TCP, or TLS connection failure
    Connect,
    /// Redirect loop or too many redirects
    Redirect,
    /// The response body could not be read
    Body,
    /// The target could not be turned into a request
    InvalidUrl,
    /// Any other request failure
    Request,
    /// The probe task itself failed before producing an outcome
    TaskFailed,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Redirect => "redirect",
            Self::Body => "body",
            Self::InvalidUrl => "invalid url",
            Self::Request => "request",
            Self::TaskFailed => "task failed",
        };
        f.write_str(label)
    }
}

/// A network-level failure recorded on an outcome
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&reqwest::Error> for TransportError {
    fn from(err: &reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_redirect() {
            TransportErrorKind::Redirect
        } else if err.is_body() || err.is_decode() {
            TransportErrorKind::Body
        } else if err.is_builder() {
            TransportErrorKind::InvalidUrl
        } else {
            TransportErrorKind::Request
        };
        Self::new(kind, err.to_string())
    }
}

/// Result of probing one target
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    target: String,
    http_status: Option<u16>,
    products: Vec<ProductSample>,
    currency_symbol: String,
    transport_error: Option<TransportError>,
    parse_ambiguous: bool,
}

impl ProbeOutcome {
    /// Outcome for a target whose request failed at the network level
    pub fn unreachable(target: impl Into<String>, error: TransportError) -> Self {
        Self {
            target: target.into(),
            http_status: None,
            products: Vec::new(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            transport_error: Some(error),
            parse_ambiguous: false,
        }
    }

    /// Outcome for a target that answered with a status other than 200
    pub fn http_status(target: impl Into<String>, status: u16) -> Self {
        Self {
            target: target.into(),
            http_status: Some(status),
            products: Vec::new(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            transport_error: None,
            parse_ambiguous: false,
        }
    }

    /// Outcome for a target whose catalog body was read and parsed
    pub fn catalog(target: impl Into<String>, status: u16, sample: CatalogSample) -> Self {
        Self {
            target: target.into(),
            http_status: Some(status),
            products: sample.products,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            transport_error: None,
            parse_ambiguous: sample.parse_ambiguous,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn http_status_code(&self) -> Option<u16> {
        self.http_status
    }

    pub fn products(&self) -> &[ProductSample] {
        &self.products
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn transport_error(&self) -> Option<&TransportError> {
        self.transport_error.as_ref()
    }

    /// True when a 200 body was not a recognizable catalog
    ///
    /// Does not influence classification.
    pub fn parse_ambiguous(&self) -> bool {
        self.parse_ambiguous
    }

    /// At least one product was sampled
    pub fn is_storefront(&self) -> bool {
        !self.products.is_empty()
    }

    /// The catalog endpoint answered 200
    pub fn is_reachable(&self) -> bool {
        self.http_status == Some(200)
    }
}
