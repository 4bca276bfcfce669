use glob::{MatchOptions, Pattern};
use tracing::debug;

/// Check if a pattern contains glob wildcards (`*`, `?` or `[`).
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Match an exclusion pattern against a document URI.
///
/// A trailing `*` is appended, so the pattern selects everything it is a
/// prefix of. `*` crosses `/` boundaries. A pattern that does not compile as
/// a glob falls back to a plain prefix test.
pub fn matches_exclusion(pattern: &str, uri: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }

    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    match Pattern::new(&format!("{}*", pattern)) {
        Ok(glob) => glob.matches_with(uri, options),
        Err(e) => {
            debug!("invalid exclusion pattern '{}': {}", pattern, e);
            uri.starts_with(pattern)
        }
    }
}

/// Join a workspace root and a relative pattern into an absolute pattern,
/// escaping glob metacharacters in the root (e.g. Next.js style `[locale]`
/// directories) so only the relative part is interpreted.
pub fn anchor_pattern(root: &str, pattern: &str) -> String {
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    if pattern.starts_with('/') || pattern.starts_with("**") {
        return pattern.to_string();
    }

    let root = root.trim_end_matches('/');
    format!("{}/{}", Pattern::escape(root), pattern)
}
