//! Status command implementation

use colored::Colorize;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "octolist Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    if config_path.exists() {
        println!("Config file: {}", config_path.display().to_string().cyan());
    } else {
        println!(
            "Config file: {} {}",
            config_path.display().to_string().cyan(),
            "(not created, using defaults)".dimmed()
        );
    }
    println!();

    let config = match CommandContext::resolve_config(opts) {
        Ok(config) => config,
        Err(err) => {
            println!("{} Configuration could not be loaded: {}", "✗".red(), err);
            println!();
            println!("Run {} to write a fresh one.", "octolist init".cyan());
            println!();
            return Ok(());
        }
    };

    if config.token.is_some() {
        println!("{} GitHub token configured", "✓".green());
    } else {
        println!(
            "{} No GitHub token (anonymous requests have a low rate limit)",
            "○".dimmed()
        );
        println!("  → Run 'octolist init --token <TOKEN>' or set GITHUB_TOKEN");
    }

    println!("{} API host: {}", "○".dimmed(), config.api_base_url().cyan());
    println!(
        "{} Page size: {}",
        "○".dimmed(),
        config.preferences.page_size
    );
    println!(
        "{} Request interval: {} ms",
        "○".dimmed(),
        config.preferences.rate_limit_interval_ms
    );
    if let Some(format) = &config.preferences.format {
        println!("{} Default format: {}", "○".dimmed(), format);
    }
    println!();

    Ok(())
}
