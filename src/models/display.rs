//! Display models for table, pretty and JSON output
//!
//! Display models turn data-access results into CLI-friendly rows and views.

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::client::models::{PageResult, ProfileSummary, Repository};
use crate::client::pagination::{clamp_page, total_pages};
use crate::error::Result;
use crate::output::table::{format_fields, format_table_or};
use crate::output::{Formattable, json::format_json};

const EMPTY: &str = "--";
const DESCRIPTION_WIDTH: usize = 48;

/// Truncate to `max_chars` characters, ending with an ellipsis when cut.
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn or_empty(value: &str) -> String {
    if value.trim().is_empty() {
        EMPTY.to_string()
    } else {
        value.to_string()
    }
}

/// Repository row for table output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RepoDisplay {
    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "LANGUAGE")]
    pub language: String,

    #[tabled(rename = "STARS")]
    pub stars: u64,

    #[tabled(rename = "FORKS")]
    pub forks: u64,

    /// Checkmark for forked repositories
    #[tabled(rename = "FORK")]
    pub fork: String,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,
}

impl From<&Repository> for RepoDisplay {
    fn from(repo: &Repository) -> Self {
        Self {
            name: repo.name.clone(),
            language: repo.language.clone().unwrap_or_else(|| EMPTY.to_string()),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            fork: if repo.fork {
                "\u{2713}".to_string()
            } else {
                String::new()
            },
            description: repo
                .description
                .as_deref()
                .map(|d| truncate_string(d, DESCRIPTION_WIDTH))
                .unwrap_or_else(|| EMPTY.to_string()),
        }
    }
}

/// Profile summary view
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub profile: ProfileSummary,
}

impl ProfileView {
    pub fn new(profile: ProfileSummary) -> Self {
        Self { profile }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let p = &self.profile;
        let twitter = if p.twitter_user_name.is_empty() {
            EMPTY.to_string()
        } else {
            format!("@{}", p.twitter_user_name)
        };
        vec![
            ("Login", or_empty(&p.login)),
            ("Location", or_empty(&p.location)),
            ("Twitter", twitter),
            ("Profile", or_empty(&p.html_url)),
            ("Avatar", or_empty(&p.avatar_url)),
        ]
    }

    fn pretty(&self) -> String {
        if self.profile.login.is_empty() {
            return "No profile found.".to_string();
        }

        let mut out = format!("{}\n", self.profile.login.bold());
        for (label, value) in self.fields().into_iter().skip(1) {
            let value = match label {
                "Profile" => value.cyan().to_string(),
                "Avatar" => value.dimmed().to_string(),
                _ => value,
            };
            out.push_str(&format!("  {:<9} {}\n", format!("{}:", label), value));
        }
        out.trim_end().to_string()
    }
}

impl Formattable for ProfileView {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(format_json(&self.profile)?),
            OutputFormat::Table => Ok(format_fields(&self.fields())),
            OutputFormat::Pretty => Ok(self.pretty()),
        }
    }
}

/// One page of repositories with its position in the listing
#[derive(Debug, Clone)]
pub struct RepoPageView {
    pub username: String,
    /// Page the user asked for, before clamping
    pub requested_page: usize,
    pub page_size: usize,
    pub result: PageResult,
}

#[derive(Serialize)]
struct RepoPageJson<'a> {
    username: &'a str,
    page: usize,
    page_size: usize,
    total_count: usize,
    total_pages: usize,
    items: &'a [Repository],
}

impl RepoPageView {
    pub fn new(username: &str, requested_page: usize, page_size: usize, result: PageResult) -> Self {
        Self {
            username: username.trim().to_string(),
            requested_page,
            page_size,
            result,
        }
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.result.total_count, self.page_size)
    }

    /// Page actually served, after redirecting past-the-end requests.
    pub fn page(&self) -> usize {
        clamp_page(self.requested_page, self.total_pages())
    }

    fn json_payload(&self) -> RepoPageJson<'_> {
        RepoPageJson {
            username: &self.username,
            page: self.page(),
            page_size: self.page_size,
            total_count: self.result.total_count,
            total_pages: self.total_pages(),
            items: &self.result.items,
        }
    }

    fn rows(&self) -> Vec<RepoDisplay> {
        self.result.items.iter().map(RepoDisplay::from).collect()
    }

    fn footer(&self) -> String {
        format!(
            "Page {} of {} ({} repositories)",
            self.page(),
            self.total_pages().max(1),
            self.result.total_count
        )
    }

    fn pretty(&self) -> String {
        let mut out = format!("{}\n", format!("Repositories of {}", self.username).bold());
        out.push_str(&format_table_or(&self.rows(), "No repositories found."));
        out.push('\n');
        out.push_str(&self.footer().dimmed().to_string());
        if self.page() != self.requested_page {
            out.push_str(&format!(
                "\n{}",
                format!(
                    "Page {} is past the end; showing page {}",
                    self.requested_page,
                    self.page()
                )
                .yellow()
            ));
        }
        out
    }
}

impl Formattable for RepoPageView {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(format_json(&self.json_payload())?),
            OutputFormat::Table => Ok(format_table_or(&self.rows(), "No repositories found.")),
            OutputFormat::Pretty => Ok(self.pretty()),
        }
    }
}

/// Profile together with the first page of repositories
#[derive(Debug, Clone)]
pub struct SummaryView {
    pub profile: ProfileView,
    pub repositories: RepoPageView,
}

#[derive(Serialize)]
struct SummaryJson<'a> {
    profile: &'a ProfileSummary,
    repositories: RepoPageJson<'a>,
}

impl Formattable for SummaryView {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(format_json(&SummaryJson {
                profile: &self.profile.profile,
                repositories: self.repositories.json_payload(),
            })?),
            OutputFormat::Table | OutputFormat::Pretty => Ok(format!(
                "{}\n\n{}",
                self.profile.format(format)?,
                self.repositories.format(format)?
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str) -> Repository {
        Repository {
            name: name.to_string(),
            full_name: format!("octocat/{}", name),
            language: Some("Rust".to_string()),
            stargazers_count: 42,
            ..Repository::default()
        }
    }

    fn octocat() -> ProfileSummary {
        ProfileSummary {
            avatar_url: "https://avatars.githubusercontent.com/u/583231?v=4".to_string(),
            login: "octocat".to_string(),
            html_url: "https://github.com/octocat".to_string(),
            location: "San Francisco".to_string(),
            twitter_user_name: String::new(),
        }
    }

    fn page_view(requested: usize, total: usize) -> RepoPageView {
        RepoPageView::new(
            "octocat",
            requested,
            5,
            PageResult {
                items: vec![repo("hello-world"), repo("spoon-knife")],
                total_count: total,
            },
        )
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a long description", 10), "a long ...");
        assert_eq!(truncate_string("ünïcödé text", 8), "ünïcö...");
    }

    #[test]
    fn test_repo_display_from_repository() {
        let mut repository = repo("hello-world");
        repository.fork = true;
        repository.description = None;

        let display = RepoDisplay::from(&repository);
        assert_eq!(display.name, "hello-world");
        assert_eq!(display.language, "Rust");
        assert_eq!(display.stars, 42);
        assert_eq!(display.fork, "\u{2713}");
        assert_eq!(display.description, "--");
    }

    #[test]
    fn test_page_view_reports_clamped_page() {
        let view = page_view(10, 20);
        assert_eq!(view.total_pages(), 4);
        assert_eq!(view.page(), 4);

        let view = page_view(2, 20);
        assert_eq!(view.page(), 2);
    }

    #[test]
    fn test_page_view_json() {
        let out = page_view(10, 20).format(OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed["data"]["username"], "octocat");
        assert_eq!(parsed["data"]["page"], 4);
        assert_eq!(parsed["data"]["total_count"], 20);
        assert_eq!(parsed["data"]["total_pages"], 4);
        assert_eq!(parsed["data"]["items"][0]["name"], "hello-world");
    }

    #[test]
    fn test_page_view_table_and_pretty() {
        let table = page_view(1, 2).format(OutputFormat::Table).unwrap();
        assert!(table.contains("hello-world"));
        assert!(table.contains("STARS"));

        let pretty = page_view(1, 2).format(OutputFormat::Pretty).unwrap();
        assert!(pretty.contains("Repositories of octocat"));
        assert!(pretty.contains("Page 1 of 1 (2 repositories)"));
    }

    #[test]
    fn test_empty_page_view() {
        let view = RepoPageView::new("octocat", 1, 10, PageResult::default());
        let table = view.format(OutputFormat::Table).unwrap();
        assert_eq!(table, "No repositories found.");
    }

    #[test]
    fn test_profile_view_json_uses_camel_case_twitter() {
        let out = ProfileView::new(octocat())
            .format(OutputFormat::Json)
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed["data"]["login"], "octocat");
        assert_eq!(parsed["data"]["twitterUserName"], "");
    }

    #[test]
    fn test_profile_view_pretty() {
        let pretty = ProfileView::new(octocat())
            .format(OutputFormat::Pretty)
            .unwrap();
        assert!(pretty.contains("octocat"));
        assert!(pretty.contains("San Francisco"));

        let empty = ProfileView::new(ProfileSummary::default())
            .format(OutputFormat::Pretty)
            .unwrap();
        assert_eq!(empty, "No profile found.");
    }

    #[test]
    fn test_summary_json() {
        let view = SummaryView {
            profile: ProfileView::new(octocat()),
            repositories: page_view(1, 2),
        };

        let out = view.format(OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed["data"]["profile"]["login"], "octocat");
        assert_eq!(parsed["data"]["repositories"]["total_count"], 2);
    }
}
