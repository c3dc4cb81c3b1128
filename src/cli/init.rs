//! Init command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Run the init command
///
/// Values not given on the command line keep what an existing config file
/// already holds.
pub fn run(opts: &GlobalOptions, token: Option<&str>, page_size: Option<usize>) -> Result<()> {
    let path = Config::resolve_path(opts.config_ref())?;

    let mut config = if path.exists() {
        Config::load_from(&path)?
    } else {
        Config::default()
    };

    if let Some(token) = token {
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfigError::Invalid("token must not be empty".to_string()).into());
        }
        config.token = Some(token.to_string());
    }
    config.apply_overrides(opts.api_host_ref());
    if let Some(size) = page_size {
        config.preferences.page_size = size;
    }
    config.validate()?;

    config.save_to(&path)?;

    println!(
        "{} Configuration saved to: {}",
        "✓".green(),
        path.display()
    );
    if config.token.is_none() {
        println!(
            "  {}",
            "No token set; requests will be anonymous.".yellow()
        );
    }

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "octolist status".cyan());
    println!("  {} - List repositories", "octolist repos octocat".cyan());

    Ok(())
}
