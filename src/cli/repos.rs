//! Repository listing command

use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, PaginationArgs};
use crate::error::Result;
use crate::models::RepoPageView;
use crate::output::Formattable;

/// Run the repos command
///
/// Shows one page of the user's repositories with the estimated total.
pub async fn run(opts: &GlobalOptions, username: &str, pagination: &PaginationArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let page_size = ctx.page_size(pagination.per_page);

    debug!(
        "Fetching page {} ({} per page) of {}'s repositories",
        pagination.page, page_size, username
    );
    let result = ctx
        .service
        .get_repositories(username, pagination.page, page_size)
        .await?;
    debug!(
        "Fetched {} repositories of ~{}",
        result.items.len(),
        result.total_count
    );

    RepoPageView::new(username, pagination.page, page_size, result).print(ctx.format)
}
