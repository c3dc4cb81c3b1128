//! Repository page and profile fetching
//!
//! Page requests are memoized per `(username, page, page_size)` and share one
//! total-count estimate per username. Every request, the count probe
//! included, goes through the scheduler.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::FutureExt;
use log::debug;
use reqwest::Url;

use super::estimator::TotalCountEstimator;
use super::models::{GithubUser, PageResult, ProfileSummary, Repository};
use super::pagination::{PROBE_PAGE_SIZE, PageRequest};
use super::rate_limit::{DEFAULT_INTERVAL, RateLimitedScheduler};
use super::{DEFAULT_API_HOST, GithubData, GithubTransport, HttpTransport};
use crate::cache::{CacheEntry, CacheKey, CacheStore, SharedPage, SharedTotal};
use crate::error::{ApiError, ConfigError, Result, TransportError};

/// Connection settings for a [`GithubService`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    /// API root, without a trailing slash
    pub base_url: String,
    /// Token sent as `Authorization: token <value>`
    pub token: Option<String>,
    /// Minimum spacing between scheduled requests
    pub rate_limit_interval: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_HOST.to_string(),
            token: None,
            rate_limit_interval: DEFAULT_INTERVAL,
        }
    }
}

/// Data-access service owning the cache and the scheduler.
///
/// Create one per process and share it behind an `Arc`; every clone of the
/// scheduler it hands out feeds the same queue.
pub struct GithubService {
    base_url: Url,
    transport: Arc<dyn GithubTransport>,
    cache: CacheStore,
    scheduler: RateLimitedScheduler,
    estimator: TotalCountEstimator,
}

impl GithubService {
    /// Create a service over an arbitrary transport.
    ///
    /// # Errors
    /// Returns a config error if `settings.base_url` is not an absolute
    /// hierarchical URL.
    pub fn new(transport: Arc<dyn GithubTransport>, settings: &ServiceSettings) -> Result<Self> {
        let base_url = Url::parse(&settings.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| {
                ConfigError::Invalid(format!("API root '{}' is not a URL", settings.base_url))
            })?;

        Ok(Self {
            base_url,
            estimator: TotalCountEstimator::new(Arc::clone(&transport)),
            transport,
            cache: CacheStore::new(),
            scheduler: RateLimitedScheduler::new(settings.rate_limit_interval),
        })
    }

    /// Create a service talking HTTP to `settings.base_url`.
    pub fn from_settings(settings: &ServiceSettings) -> Result<Self> {
        let transport = HttpTransport::new(settings.token.as_deref())?;
        Self::new(Arc::new(transport), settings)
    }

    /// API root, without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn scheduler(&self) -> &RateLimitedScheduler {
        &self.scheduler
    }

    /// Fetch one page of `username`'s repositories with the estimated total.
    ///
    /// Pages past the end are redirected to the last page. A failed fetch is
    /// dropped from the cache so the next call tries again.
    pub async fn fetch_page(
        &self,
        username: &str,
        page: usize,
        page_size: usize,
    ) -> std::result::Result<PageResult, ApiError> {
        let username = username.trim();
        if username.is_empty() {
            debug!("Blank username, returning an empty page");
            return Ok(PageResult::default());
        }

        let request = PageRequest::new(page, page_size);
        let key = CacheKey::page(username, request.page, request.per_page);

        let entry = match self.cache.get(&key) {
            Some(CacheEntry::Page(entry)) => {
                debug!("Cache hit for {}", key);
                entry
            }
            _ => {
                debug!("Cache miss for {}", key);
                let entry = self.page_entry(username, request);
                self.cache.get_or_insert_page(key.clone(), entry)
            }
        };

        let result = entry.clone().await;
        if result.is_err() && self.cache.remove_page_if(&key, &entry) {
            debug!("Dropped failed entry {}", key);
        }
        result
    }

    /// Fetch the profile summary of `username`. Never cached.
    pub async fn fetch_profile(
        &self,
        username: &str,
    ) -> std::result::Result<ProfileSummary, ApiError> {
        let username = username.trim();
        if username.is_empty() {
            debug!("Blank username, returning an empty profile");
            return Ok(ProfileSummary::default());
        }

        let url = self.user_url(username, &[]).to_string();
        let transport = Arc::clone(&self.transport);

        self.scheduler
            .submit(async move {
                let user: GithubUser = transport.get(&url).await?.json()?.ok_or_else(|| {
                    TransportError::InvalidResponse(format!("Empty response from {}", url))
                })?;
                Ok::<_, TransportError>(ProfileSummary::from(user))
            })
            .await
    }

    /// The memoized total for `username`, starting the probe if there is none.
    fn total_entry(&self, username: &str) -> SharedTotal {
        let key = CacheKey::total(username);
        if let Some(CacheEntry::Total(total)) = self.cache.get(&key) {
            debug!("Cache hit for {}", key);
            return total;
        }

        let estimator = self.estimator.clone();
        let scheduler = self.scheduler.clone();
        let mut probe_url = self.user_url(username, &["repos"]);
        probe_url
            .query_pairs_mut()
            .append_pair("per_page", &PROBE_PAGE_SIZE.to_string());
        let probe_url = probe_url.to_string();

        let total = async move {
            // The estimator never fails, so only a lost dispatch lands here.
            scheduler
                .submit(async move {
                    Ok::<_, TransportError>(estimator.estimate(&probe_url).await)
                })
                .await
                .unwrap_or(0)
        }
        .boxed()
        .shared();
        self.cache.get_or_insert_total(key, total)
    }

    fn page_entry(&self, username: &str, request: PageRequest) -> SharedPage {
        let total = self.total_entry(username);
        let transport = Arc::clone(&self.transport);
        let scheduler = self.scheduler.clone();
        let mut url = self.user_url(username, &["repos"]);

        async move {
            let total_count = total.await;
            let request = request.clamped_to(total_count);
            url.set_query(Some(&request.query_string()));
            let url = url.to_string();

            let items = scheduler
                .submit(async move {
                    let items: Option<Vec<Repository>> = transport.get(&url).await?.json()?;
                    Ok::<_, TransportError>(items.unwrap_or_default())
                })
                .await?;

            Ok(PageResult { items, total_count })
        }
        .boxed()
        .shared()
    }

    /// `{base}/users/{username}/{rest..}` with every segment percent-encoded.
    fn user_url(&self, username: &str, rest: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects bases that cannot carry a path.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("users")
                .push(username)
                .extend(rest);
        }
        url
    }
}

#[async_trait]
impl GithubData for GithubService {
    async fn get_repositories(
        &self,
        username: &str,
        page: usize,
        page_size: usize,
    ) -> Result<PageResult> {
        Ok(self.fetch_page(username, page, page_size).await?)
    }

    async fn get_user_details(&self, username: &str) -> Result<ProfileSummary> {
        Ok(self.fetch_profile(username).await?)
    }
}
