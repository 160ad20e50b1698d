use crate::batch::MAX_BATCH_URLS;
use crate::InputError;
use regex::Regex;
use std::sync::OnceLock;

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"https?://[^\s]+").expect("URL pattern is valid"))
}

/// Extracts every `http(s)://` URL from free text, in order of appearance
///
/// A URL runs until the next whitespace character. Duplicates are kept.
pub fn extract_urls(text: &str) -> Vec<String> {
    url_pattern()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Parses an uploaded line-delimited URL list
///
/// Bytes are decoded as UTF-8 with invalid sequences replaced. Each line is
/// trimmed and blank lines are skipped; no other validation is applied.
pub fn parse_url_list(content: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(content)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validates a target list before a batch starts
///
/// Returns `InputError::Empty` for an empty list. Lists longer than
/// [`MAX_BATCH_URLS`] are truncated, keeping the first entries in order.
pub fn prepare_targets(mut urls: Vec<String>) -> Result<Vec<String>, InputError> {
    if urls.is_empty() {
        return Err(InputError::Empty);
    }

    if urls.len() > MAX_BATCH_URLS {
        tracing::warn!(
            "Received {} URLs, only the first {} will be checked",
            urls.len(),
            MAX_BATCH_URLS
        );
        urls.truncate(MAX_BATCH_URLS);
    }

    Ok(urls)
}
