//! Cache key construction

use std::fmt;

/// Identifies one cached lookup.
///
/// Renders as `total-<username>` or `page-<username>-<page>-<page_size>`.
/// Keys are opaque; nothing parses them back into components.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key of the estimated repository total for `username`.
    pub fn total(username: &str) -> Self {
        Self(format!("total-{}", username))
    }

    /// Key of one page of `username`'s repositories.
    pub fn page(username: &str, page: usize, page_size: usize) -> Self {
        Self(format!("page-{}-{}-{}", username, page, page_size))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_key_format() {
        assert_eq!(CacheKey::total("octocat").as_str(), "total-octocat");
    }

    #[test]
    fn test_page_key_format() {
        assert_eq!(CacheKey::page("octocat", 2, 10).to_string(), "page-octocat-2-10");
    }

    #[test]
    fn test_page_keys_differ_by_page_size() {
        assert_ne!(CacheKey::page("octocat", 1, 10), CacheKey::page("octocat", 1, 20));
    }

    #[test]
    fn test_total_and_page_keys_never_collide() {
        assert_ne!(CacheKey::total("page-octocat-1-10"), CacheKey::page("octocat", 1, 10));
    }
}
