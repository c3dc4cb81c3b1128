//! Process-lifetime store of memoized lookups

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, Shared};

use super::CacheKey;
use crate::client::models::PageResult;
use crate::error::ApiError;

/// Memoized total-count estimate; never fails.
pub type SharedTotal = Shared<BoxFuture<'static, usize>>;

/// Memoized page fetch, replaying its result or classified error.
pub type SharedPage = Shared<BoxFuture<'static, Result<PageResult, ApiError>>>;

/// Value stored under a [`CacheKey`]
#[derive(Clone)]
pub enum CacheEntry {
    Total(SharedTotal),
    Page(SharedPage),
}

impl fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheEntry::Total(total) => match total.peek() {
                Some(count) => write!(f, "Total({})", count),
                None => f.write_str("Total(pending)"),
            },
            CacheEntry::Page(page) => match page.peek() {
                Some(Ok(result)) => write!(f, "Page({} items)", result.items.len()),
                Some(Err(err)) => write!(f, "Page(failed: {})", err),
                None => f.write_str("Page(pending)"),
            },
        }
    }
}

/// Unbounded key → entry map. No TTL, no eviction.
///
/// The lock is held only for the map operation itself, never across an
/// `.await`.
#[derive(Default)]
pub struct CacheStore {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn has(&self, key: &CacheKey) -> bool {
        self.entries().contains_key(key)
    }

    pub fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.entries().get(key).cloned()
    }

    pub fn set(&self, key: CacheKey, entry: CacheEntry) {
        self.entries().insert(key, entry);
    }

    /// Return the total stored under `key`, storing `entry` first if there is none.
    pub fn get_or_insert_total(&self, key: CacheKey, entry: SharedTotal) -> SharedTotal {
        let mut entries = self.entries();
        if let Some(CacheEntry::Total(existing)) = entries.get(&key) {
            return existing.clone();
        }
        entries.insert(key, CacheEntry::Total(entry.clone()));
        entry
    }

    /// Return the page stored under `key`, storing `entry` first if there is none.
    pub fn get_or_insert_page(&self, key: CacheKey, entry: SharedPage) -> SharedPage {
        let mut entries = self.entries();
        if let Some(CacheEntry::Page(existing)) = entries.get(&key) {
            return existing.clone();
        }
        entries.insert(key, CacheEntry::Page(entry.clone()));
        entry
    }

    /// Remove the page under `key` if it is still `entry`.
    ///
    /// Used to drop failed fetches; returns whether anything was removed.
    pub fn remove_page_if(&self, key: &CacheKey, entry: &SharedPage) -> bool {
        let mut entries = self.entries();
        match entries.get(key) {
            Some(CacheEntry::Page(existing)) if existing.ptr_eq(entry) => {
                entries.remove(key);
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
