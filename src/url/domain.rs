use url::Url;

/// Extracts the hostname shown in a rendered result block
///
/// The scheme, port, path, and query are stripped and the host is lowercased.
/// Targets that do not parse as absolute URLs (or have no host) are shown
/// verbatim, trimmed. Internationalized hosts are shown in their ASCII
/// (punycode) form, which is what the request actually resolves.
///
/// # Examples
///
/// ```
/// use storefront_probe::url::display_host;
///
/// assert_eq!(display_host("https://Shop.Example.com/collections"), "shop.example.com");
/// assert_eq!(display_host("not a url"), "not a url");
/// ```
pub fn display_host(target: &str) -> String {
    Url::parse(target.trim())
        .ok()
        .and_then(|url| url.host_str().map(|h| h.to_lowercase()))
        .unwrap_or_else(|| target.trim().to_string())
}
