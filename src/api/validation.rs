/// Upper bound on rows a single listing request may return.
pub const MAX_LIMIT: u64 = 10_000;

/// Caps a requested row limit at [`MAX_LIMIT`]. Zero is kept and yields an
/// empty listing.
#[must_use]
pub fn clamp_limit(limit: u64) -> u64 {
    limit.min(MAX_LIMIT)
}

/// An empty or whitespace-only platform filter means no filter.
#[must_use]
pub fn platform_filter(platform: Option<&str>) -> Option<&str> {
    platform.map(str::trim).filter(|p| !p.is_empty())
}

/// Trimmed search term, or `None` for a blank submission.
#[must_use]
pub fn search_term(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(0), 0);
        assert_eq!(clamp_limit(50), 50);
        assert_eq!(clamp_limit(2000), 2000);
        assert_eq!(clamp_limit(50_000), MAX_LIMIT);
    }

    #[test]
    fn test_platform_filter() {
        assert_eq!(platform_filter(None), None);
        assert_eq!(platform_filter(Some("")), None);
        assert_eq!(platform_filter(Some("  ")), None);
        assert_eq!(platform_filter(Some("Google")), Some("Google"));
    }

    #[test]
    fn test_search_term() {
        assert_eq!(search_term("  ofertas "), Some("ofertas"));
        assert_eq!(search_term("   "), None);
        assert_eq!(search_term(""), None);
    }
}
