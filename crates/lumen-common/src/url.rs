//! URL resolution utilities.
//!
//! The pipeline only needs to turn attribute values (`href`, `src`, `action`)
//! into absolute fetch targets. This is a deliberately small resolver, not a
//! URL Standard parser.

/// Schemes treated as already absolute.
const ABSOLUTE_PREFIXES: [&str; 5] = ["http://", "https://", "file://", "data:", "about:"];

/// Returns the scheme of `url` (the part before the first `:`), lowercased.
///
/// Returns `None` when the string has no scheme separator or the candidate
/// scheme contains characters a scheme cannot contain.
#[must_use]
pub fn scheme_of(url: &str) -> Option<String> {
    let (scheme, _) = url.split_once(':')?;
    let valid = !scheme.is_empty()
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then(|| scheme.to_ascii_lowercase())
}

/// Resolve a potentially relative URL against a base URL.
///
/// # Algorithm
///
/// STEP 1: If `href` is absolute, return it unchanged.
///
/// STEP 2: Otherwise resolve it against `base`:
/// - `//host/path` takes the scheme of the base
/// - `/path` replaces the path of the base
/// - `?query` and `#fragment` are appended to the base path
/// - anything else is joined to the directory of the base path, with `.`
///   and `..` segments collapsed
///
/// With no base the href is returned as-is.
#[must_use]
pub fn resolve_url(href: &str, base_url: Option<&str>) -> String {
    let href = href.trim();

    // STEP 1: Check if href is already absolute.
    if ABSOLUTE_PREFIXES.iter().any(|prefix| href.starts_with(prefix)) {
        return href.to_string();
    }

    // STEP 2: Resolve relative URL against base.
    let Some(base) = base_url else {
        return href.to_string();
    };

    let Some(scheme_end) = base.find("://") else {
        return href.to_string();
    };
    let scheme = &base[..scheme_end];
    let after_scheme = &base[scheme_end + 3..];
    let (authority, base_path) = after_scheme
        .find('/')
        .map_or((after_scheme, "/"), |i| (&after_scheme[..i], &after_scheme[i..]));

    if let Some(rest) = href.strip_prefix("//") {
        // Protocol-relative URL
        return format!("{scheme}://{rest}");
    }

    let origin = format!("{scheme}://{authority}");

    if href.starts_with('/') {
        return format!("{origin}{}", normalize_path(href));
    }

    // Query and fragment references keep the base path.
    let base_path = strip_query_and_fragment(base_path);
    if href.starts_with('?') || href.starts_with('#') {
        return format!("{origin}{base_path}{href}");
    }

    let base_dir = base_path.rsplit_once('/').map_or("", |(dir, _)| dir);
    format!("{origin}{}", normalize_path(&format!("{base_dir}/{href}")))
}

fn strip_query_and_fragment(path: &str) -> &str {
    path.find(['?', '#']).map_or(path, |i| &path[..i])
}

/// Collapse `.` and `..` segments of an absolute path.
fn normalize_path(path: &str) -> String {
    let (path, suffix) = path
        .find(['?', '#'])
        .map_or((path, ""), |i| (&path[..i], &path[i..]));

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/').skip(1) {
        match segment {
            "." => {}
            ".." => {
                let _ = segments.pop();
            }
            other => segments.push(other),
        }
    }
    // A trailing "." or ".." still denotes a directory.
    if path.ends_with("/.") || path.ends_with("/..") {
        segments.push("");
    }
    format!("/{}{suffix}", segments.join("/"))
}
