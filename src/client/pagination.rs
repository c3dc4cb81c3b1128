//! Pagination helpers for GitHub list endpoints
//!
//! GitHub does not report a total count for `/users/{username}/repos`; it only
//! sends RFC 8288 `Link` headers pointing at neighbouring pages. This module
//! parses those headers and does the page arithmetic the fetcher relies on.

use reqwest::Url;

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes offered to users of the CLI
pub const PAGE_SIZE_CHOICES: [usize; 7] = [5, 10, 15, 20, 30, 50, 100];

/// Page size of the total-count probe request
pub const PROBE_PAGE_SIZE: usize = 1;

/// A 1-indexed page request.
///
/// # Example
/// ```ignore
/// let request = PageRequest::new(10, 5).clamped_to(20);
/// assert_eq!(request.query_string(), "page=4&per_page=5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number, starting at 1
    pub page: usize,
    /// Items per page
    pub per_page: usize,
}

impl PageRequest {
    /// Create a page request; zero values are raised to 1.
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Redirect the request to the last page if it points past it.
    pub fn clamped_to(self, total_count: usize) -> Self {
        Self {
            page: clamp_page(self.page, total_pages(total_count, self.per_page)),
            ..self
        }
    }

    /// Query parameters in the order GitHub documents them.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ]
    }

    /// Query string without the leading `?`.
    pub fn query_string(&self) -> String {
        self.to_query_params()
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// `ceil(total_count / per_page)`
pub fn total_pages(total_count: usize, per_page: usize) -> usize {
    total_count.div_ceil(per_page.max(1))
}

/// Clamp `page` into `1..=total_pages`.
///
/// With no known pages the first page is requested.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.min(total_pages).max(1)
}

/// One entry of a `Link` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: String,
    pub rels: Vec<String>,
}

impl Link {
    pub fn has_rel(&self, rel: &str) -> bool {
        self.rels.iter().any(|r| r.eq_ignore_ascii_case(rel))
    }
}

/// Parse a `Link` header value into its entries.
///
/// Malformed entries (no `<url>` target) are skipped.
pub fn parse_link_header(header: &str) -> Vec<Link> {
    header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let target = parts.next()?.trim();
            let url = target.strip_prefix('<')?.strip_suffix('>')?;

            let rels = parts
                .filter_map(|param| {
                    let (name, value) = param.split_once('=')?;
                    if name.trim().eq_ignore_ascii_case("rel") {
                        Some(value.trim().trim_matches('"').to_string())
                    } else {
                        None
                    }
                })
                .flat_map(|value| {
                    value
                        .split_whitespace()
                        .map(str::to_string)
                        .collect::<Vec<_>>()
                })
                .collect();

            Some(Link {
                url: url.to_string(),
                rels,
            })
        })
        .collect()
}

/// The `page` query parameter of the `rel="last"` link, if present and numeric.
pub fn last_page(header: &str) -> Option<usize> {
    let last = parse_link_header(header)
        .into_iter()
        .find(|link| link.has_rel("last"))?;
    let url = Url::parse(&last.url).ok()?;
    let page = url
        .query_pairs()
        .find(|(key, _)| key == "page")
        .map(|(_, value)| value.into_owned())?;
    page.parse().ok()
}
