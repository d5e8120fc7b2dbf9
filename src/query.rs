//! Query string encoder
//!
//! Builds a raw query string one `key=value` pair at a time. Pairs keep their append order
//! and are never deduplicated: when a key is appended twice both occurrences stay, and most
//! link consumers treat the last one as authoritative.

/// Escapes a value as a query component.
///
/// Everything outside `A-Z a-z 0-9 - _ . ~` is percent-encoded with upper-case hex, and a
/// space becomes `+`.
pub fn query_escape(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

/// Appends `key=escape(value)` to an existing raw query.
///
/// ```rust
/// use xray_share_link::add_query;
///
/// let query = add_query("", "type", "ws");
/// let query = add_query(&query, "path", "/ray");
/// assert_eq!(query, "type=ws&path=%2Fray");
/// ```
pub fn add_query(query: &str, key: &str, value: &str) -> String {
    let pair = format!("{}={}", key, query_escape(value));
    if query.is_empty() {
        pair
    } else {
        format!("{}&{}", query, pair)
    }
}
