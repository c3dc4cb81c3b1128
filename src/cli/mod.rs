//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod args;
pub mod context;
pub mod init;
pub mod repos;
pub mod status;
pub mod summary;
pub mod user;

pub use args::{OutputFormat, PaginationArgs};
pub use context::CommandContext;

/// octolist - browse GitHub users and their repositories
#[derive(Parser, Debug)]
#[command(name = "octolist")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "OCTOLIST_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "OCTOLIST_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the GitHub API root (e.g. a GitHub Enterprise host)
    #[arg(long, global = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "OCTOLIST_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a configuration file
    #[command(after_help = "EXAMPLES:\n  \
            octolist init --token ghp_xxx\n  \
            octolist init --token ghp_xxx --page-size 30\n  \
            octolist init --api-host https://ghe.example.com/api/v3")]
    Init {
        /// GitHub personal access token
        #[arg(long)]
        token: Option<String>,

        /// Default repositories per page
        #[arg(long, value_parser = args::parse_page_size)]
        page_size: Option<usize>,
    },

    /// Show configuration status
    Status,

    /// Display version information
    Version,

    /// Show a user's profile
    #[command(visible_alias = "u")]
    User {
        /// GitHub username
        username: String,
    },

    /// List one page of a user's repositories
    #[command(
        visible_alias = "ls",
        after_help = "EXAMPLES:\n  \
            octolist repos octocat                      # First page\n  \
            octolist repos octocat --page 2 -n 30       # Page 2, 30 per page\n  \
            octolist repos octocat --format json | jq '.data.total_count'"
    )]
    Repos {
        /// GitHub username
        username: String,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Show a user's profile and first page of repositories
    Summary {
        /// GitHub username
        username: String,

        /// Repositories per page (5, 10, 15, 20, 30, 50 or 100)
        #[arg(long, short = 'n', value_parser = args::parse_page_size)]
        per_page: Option<usize>,
    },
}
