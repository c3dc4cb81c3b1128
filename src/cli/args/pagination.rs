//! Pagination argument types for CLI commands

use clap::Args;

use crate::client::pagination::PAGE_SIZE_CHOICES;

/// Pagination arguments for the repository listing.
///
/// ```ignore
/// Repos {
///     #[command(flatten)]
///     pagination: PaginationArgs,
/// }
/// ```
#[derive(Args, Debug, Clone)]
pub struct PaginationArgs {
    /// Page number (1-indexed); pages past the end show the last page
    #[arg(long, short = 'p', default_value_t = 1, value_parser = parse_page)]
    pub page: usize,

    /// Repositories per page (5, 10, 15, 20, 30, 50 or 100)
    #[arg(long, short = 'n', value_parser = parse_page_size)]
    pub per_page: Option<usize>,
}

impl Default for PaginationArgs {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: None,
        }
    }
}

fn parse_page(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("pages start at 1".to_string()),
        Ok(page) => Ok(page),
        Err(e) => Err(e.to_string()),
    }
}

/// Accept only the page sizes offered by the listing.
pub fn parse_page_size(value: &str) -> Result<usize, String> {
    let size: usize = value.parse().map_err(|e| format!("{}", e))?;
    if PAGE_SIZE_CHOICES.contains(&size) {
        Ok(size)
    } else {
        let choices: Vec<String> = PAGE_SIZE_CHOICES.iter().map(usize::to_string).collect();
        Err(format!("must be one of {}", choices.join(", ")))
    }
}
