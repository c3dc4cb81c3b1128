//! User profile models

use serde::{Deserialize, Serialize};

/// User resource as returned by `GET /users/{username}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GithubUser {
    #[serde(default)]
    pub avatar_url: Option<String>,

    #[serde(default)]
    pub login: Option<String>,

    #[serde(default)]
    pub html_url: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub twitter_username: Option<String>,
}

/// Profile subset shown by the presentation layer.
///
/// Every field is an empty string when the upstream value is missing or null,
/// and for blank usernames.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileSummary {
    pub avatar_url: String,
    pub login: String,
    pub html_url: String,
    pub location: String,
    #[serde(rename = "twitterUserName")]
    pub twitter_user_name: String,
}

impl From<GithubUser> for ProfileSummary {
    fn from(user: GithubUser) -> Self {
        Self {
            avatar_url: user.avatar_url.unwrap_or_default(),
            login: user.login.unwrap_or_default(),
            html_url: user.html_url.unwrap_or_default(),
            location: user.location.unwrap_or_default(),
            twitter_user_name: user.twitter_username.unwrap_or_default(),
        }
    }
}
