//! URL manipulation utilities
//!
//! Canonicalization and policy predicates used by the crawler to decide
//! which discovered links are eligible for a visit. Parsing is fail-open:
//! a malformed URL is passed through [`normalize`] unchanged and evaluates
//! to `false` under every predicate, so a single bad link can never abort
//! a crawl.

use url::Url;

/// Normalize a URL into its canonical string form.
///
/// Strips any fragment and the trailing slash from the path (unless the path
/// is exactly `/`); scheme, host, port, and query string are left intact.
/// Malformed input is returned unchanged.
pub fn normalize(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_fragment(None);

            let path = parsed.path();
            if path.len() > 1 && path.ends_with('/') {
                let trimmed = path.trim_end_matches('/').to_string();
                if trimmed.is_empty() {
                    parsed.set_path("/");
                } else {
                    parsed.set_path(&trimmed);
                }
            }

            parsed.to_string()
        }
        Err(_) => url.to_string(),
    }
}

/// Returns true iff the string parses as an absolute URL.
pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url).is_ok()
}

/// Returns true iff both URLs parse and their hostnames match exactly.
///
/// No subdomain folding, no scheme or port comparison.
pub fn is_same_domain(url_a: &str, url_b: &str) -> bool {
    match (Url::parse(url_a), Url::parse(url_b)) {
        (Ok(a), Ok(b)) => match (a.host_str(), b.host_str()) {
            (Some(host_a), Some(host_b)) => host_a == host_b,
            _ => false,
        },
        _ => false,
    }
}

/// Returns true if `allowed_paths` is empty, else true iff the URL's path
/// starts with at least one listed prefix. Unparsable input is never allowed.
pub fn is_allowed_path(url: &str, allowed_paths: &[String]) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            if allowed_paths.is_empty() {
                return true;
            }
            let path = parsed.path();
            allowed_paths.iter().any(|allowed| path.starts_with(allowed.as_str()))
        }
        Err(_) => false,
    }
}

/// Returns true iff the URL's path starts with at least one listed prefix.
/// An empty list excludes nothing; unparsable input is never excluded.
pub fn is_excluded_path(url: &str, excluded_paths: &[String]) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            let path = parsed.path();
            excluded_paths.iter().any(|excluded| path.starts_with(excluded.as_str()))
        }
        Err(_) => false,
    }
}

/// Resolve a possibly-relative URL against a base URL.
///
/// Returns the relative input unchanged if resolution fails.
pub fn resolve_url(base_url: &str, relative_url: &str) -> String {
    match Url::parse(base_url).and_then(|base| base.join(relative_url)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => relative_url.to_string(),
    }
}

/// Extract the hostname from a URL.
pub fn domain(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| host.to_string()))
}

/// Split the URL path into its non-empty segments.
pub fn path_segments(url: &str) -> Vec<String> {
    match Url::parse(url) {
        Ok(parsed) => parsed
            .path()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| segment.to_string())
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Derive a filesystem-friendly filename from a URL path.
///
/// Slashes become dashes and the root path maps to `index`. The extension is
/// appended when provided and not already present. Unparsable input maps to
/// `unknown` plus the extension.
pub fn filename_from_url(url: &str, extension: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return format!("unknown{}", extension),
    };

    let mut filename = parsed.path().trim_start_matches('/').replace('/', "-");

    if filename.is_empty() || filename == "-" {
        filename = "index".to_string();
    }

    if !extension.is_empty() && !filename.ends_with(extension) {
        filename.push_str(extension);
    }

    filename
}
