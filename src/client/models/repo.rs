//! Repository models and page results

use serde::{Deserialize, Serialize};

/// Repository as returned by `GET /users/{username}/repos`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name
    #[serde(default)]
    pub name: String,

    /// Owner-qualified name (`owner/name`)
    #[serde(default)]
    pub full_name: String,

    /// Browser URL
    #[serde(default)]
    pub html_url: String,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Primary language detected by GitHub
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Star count
    #[serde(default)]
    pub stargazers_count: u64,

    /// Fork count
    #[serde(default)]
    pub forks_count: u64,

    /// Repository topics
    #[serde(default)]
    pub topics: Vec<String>,

    /// Whether this repository is a fork
    #[serde(default)]
    pub fork: bool,
}

/// One page of a user's repositories.
///
/// `total_count` is the user-scoped estimate derived from the pagination
/// headers, not necessarily exact.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageResult {
    pub items: Vec<Repository>,
    pub total_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_repository_tolerates_missing_fields() {
        let repo: Repository = serde_json::from_value(json!({ "id": 1, "name": "repo1" })).unwrap();
        assert_eq!(repo.name, "repo1");
        assert!(repo.description.is_none());
        assert!(repo.topics.is_empty());
        assert_eq!(repo.stargazers_count, 0);
    }

    #[test]
    fn test_repository_reads_github_shape() {
        let repo: Repository = serde_json::from_value(json!({
            "name": "Hello-World",
            "full_name": "octocat/Hello-World",
            "html_url": "https://github.com/octocat/Hello-World",
            "description": "My first repository on GitHub!",
            "language": null,
            "stargazers_count": 80,
            "forks_count": 9,
            "topics": ["octocat", "api"],
            "fork": false
        }))
        .unwrap();

        assert_eq!(repo.full_name, "octocat/Hello-World");
        assert!(repo.language.is_none());
        assert_eq!(repo.stargazers_count, 80);
        assert_eq!(repo.topics, vec!["octocat", "api"]);
    }

    #[test]
    fn test_default_page_result_is_empty() {
        let page = PageResult::default();
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 0);
    }
}
