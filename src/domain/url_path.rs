//! URL path helpers for building config API request URLs.

use url::form_urlencoded;

/// Join URL path parts with exactly one `/` between each pair.
///
/// Every part is trimmed of surrounding whitespace. Parts that are empty or a
/// lone `/` are skipped, so redundant slashes on either side of a join never
/// produce `//`.
pub fn naive_url_path_join(first: &str, second: &str, rest: &[&str]) -> String {
    let mut path = first.trim().to_string();
    for part in std::iter::once(second).chain(rest.iter().copied()) {
        let part = part.trim();
        if part.is_empty() || part == "/" {
            continue;
        }
        let part = part.strip_prefix('/').unwrap_or(part);
        if !path.ends_with('/') {
            path.push('/');
        }
        path.push_str(part);
    }
    path
}

/// Percent-encode a single path segment. Everything outside `[A-Za-z0-9*-._]`
/// is escaped, including `/` and space (as `%20`, never `+`).
pub fn encode_path_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
