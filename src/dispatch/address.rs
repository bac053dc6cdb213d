//! URL construction for dispatched requests.

/// Joins a base URL and a request path with exactly one separating slash.
///
/// One trailing slash is stripped from `base`, and a slash is inserted when
/// `path` does not start with one.
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    let trimmed = base.strip_suffix('/').unwrap_or(base);
    if path.starts_with('/') {
        format!("{trimmed}{path}")
    } else {
        format!("{trimmed}/{path}")
    }
}
