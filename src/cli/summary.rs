//! Profile and first page of repositories in one command

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::error::Result;
use crate::models::{ProfileView, RepoPageView, SummaryView};
use crate::output::Formattable;

/// Run the summary command
///
/// Both lookups are issued together and share the service's request queue.
pub async fn run(opts: &GlobalOptions, username: &str, per_page: Option<usize>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let page_size = ctx.page_size(per_page);

    let (profile, repositories) = tokio::join!(
        ctx.service.get_user_details(username),
        ctx.service.get_repositories(username, 1, page_size),
    );

    SummaryView {
        profile: ProfileView::new(profile?),
        repositories: RepoPageView::new(username, 1, page_size, repositories?),
    }
    .print(ctx.format)
}
