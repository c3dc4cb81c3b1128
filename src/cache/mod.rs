//! In-memory response cache
//!
//! Holds memoized lookups for the lifetime of the process. Entries are shared
//! futures, so a lookup that is still in flight is coalesced just like one
//! that has already completed.

pub mod key;
pub mod store;

pub use key::CacheKey;
pub use store::{CacheEntry, CacheStore, SharedPage, SharedTotal};
