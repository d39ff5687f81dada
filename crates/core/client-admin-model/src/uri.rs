//! Redirect URI acceptance rule.

/// Schemes a redirect or post-logout redirect URI may start with.
pub const ALLOWED_URI_PREFIXES: [&str; 2] = ["http://", "https://"];

/// Returns `true` if `candidate` starts with an allowed scheme prefix.
///
/// The check is a prefix match on the input as given, without trimming.
pub fn has_allowed_scheme(candidate: &str) -> bool {
    ALLOWED_URI_PREFIXES
        .iter()
        .any(|prefix| candidate.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_schemes() {
        assert!(has_allowed_scheme("https://ok/callback"));
        assert!(has_allowed_scheme("http://localhost:8080/cb"));
        assert!(!has_allowed_scheme("ftp://bad"));
        assert!(!has_allowed_scheme("HTTPS://upper"));
        assert!(!has_allowed_scheme("  https://leading-space"));
        assert!(!has_allowed_scheme("myapp://callback"));
    }
}
