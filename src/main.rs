//! octolist - rate-limited, cached GitHub repository and profile browser

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;

use cli::args::GlobalOptions;
use cli::{Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `--debug` forces debug level; otherwise `RUST_LOG`, defaulting to warnings.
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp_millis().init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init { token, page_size } => cli::init::run(&opts, token.as_deref(), page_size),
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("octolist version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::User { username } => cli::user::run(&opts, &username).await,
        Commands::Repos {
            username,
            pagination,
        } => cli::repos::run(&opts, &username, &pagination).await,
        Commands::Summary { username, per_page } => {
            cli::summary::run(&opts, &username, per_page).await
        }
    }
}
