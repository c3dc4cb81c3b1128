//! GitHub API data models
//!
//! Only the fields the data-access layer and the CLI consume are modeled.

mod repo;
mod user;

pub use repo::{PageResult, Repository};
pub use user::{GithubUser, ProfileSummary};
