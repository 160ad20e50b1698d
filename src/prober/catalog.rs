//! Lenient parsing of `/products.json` catalog bodies
//!
//! Many servers that are not storefronts still answer the catalog path with
//! `200` and some unrelated JSON or HTML. Those bodies never produce an
//! error: they produce an empty sample with `parse_ambiguous` set.

use crate::prober::outcome::ProductSample;
use serde_json::Value;

/// Currency symbol used for every formatted price
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Title used when a product has no usable title
pub const UNTITLED_PRODUCT: &str = "Untitled";

/// Price text used when no variant carries a parsable price
pub const NO_PRICE: &str = "N/A";

/// Products sampled from one catalog body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSample {
    pub products: Vec<ProductSample>,

    /// The body was not JSON, lacked a `products` array, or held
    /// entries that were not objects
    pub parse_ambiguous: bool,
}

impl CatalogSample {
    /// A sample with no products whose body was not a recognizable catalog
    pub fn ambiguous() -> Self {
        Self {
            products: Vec::new(),
            parse_ambiguous: true,
        }
    }
}

/// Parses a catalog body into at most `limit` product samples
///
/// Only the first `limit` entries of the `products` array are considered.
/// Entries that are not JSON objects are skipped.
///
/// # Examples
///
/// ```
/// use storefront_probe::prober::parse_catalog;
///
/// let body = br#"{"products":[{"title":"Tee","variants":[{"price":"19.99"},{"price":"24.99"}]}]}"#;
/// let sample = parse_catalog(body, 3);
/// assert_eq!(sample.products[0].title, "Tee");
/// assert_eq!(sample.products[0].price_range, "$19.99–$24.99");
/// ```
pub fn parse_catalog(body: &[u8], limit: usize) -> CatalogSample {
    let value: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(e) => {
            tracing::trace!("Catalog body is not JSON: {}", e);
            return CatalogSample::ambiguous();
        }
    };

    let Some(entries) = value.get("products").and_then(Value::as_array) else {
        return CatalogSample::ambiguous();
    };

    let mut parse_ambiguous = false;
    let mut products = Vec::with_capacity(entries.len().min(limit));

    for entry in entries.iter().take(limit) {
        if !entry.is_object() {
            parse_ambiguous = true;
            continue;
        }
        products.push(parse_product(entry));
    }

    CatalogSample {
        products,
        parse_ambiguous,
    }
}

fn parse_product(entry: &Value) -> ProductSample {
    let title = entry
        .get("title")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(UNTITLED_PRODUCT);

    let prices: Vec<f64> = entry
        .get("variants")
        .and_then(Value::as_array)
        .map(|variants| variants.iter().filter_map(variant_price).collect())
        .unwrap_or_default();

    ProductSample::new(title, format_price_range(&prices, DEFAULT_CURRENCY_SYMBOL))
}

/// Reads a variant's price, given either as a decimal string or a number
fn variant_price(variant: &Value) -> Option<f64> {
    let price = match variant.get("price")? {
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Number(n) => n.as_f64()?,
        _ => return None,
    };
    price.is_finite().then_some(price)
}

/// Formats the min/max of a set of prices
///
/// An empty set yields `N/A`, a single distinct value yields `$12.00`, and
/// anything else yields `$12.00–$15.00` (en dash).
pub fn format_price_range(prices: &[f64], symbol: &str) -> String {
    let Some((low, high)) = prices.iter().fold(None, |acc: Option<(f64, f64)>, &p| {
        Some(match acc {
            Some((low, high)) => (low.min(p), high.max(p)),
            None => (p, p),
        })
    }) else {
        return NO_PRICE.to_string();
    };

    if low == high {
        format!("{}{:.2}", symbol, low)
    } else {
        format!("{}{:.2}–{}{:.2}", symbol, low, symbol, high)
    }
}
