//! User profile command

use log::debug;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::error::Result;
use crate::models::ProfileView;
use crate::output::Formattable;

/// Run the user command
pub async fn run(opts: &GlobalOptions, username: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    debug!("Fetching profile of {}", username);
    let profile = ctx.service.get_user_details(username).await?;

    ProfileView::new(profile).print(ctx.format)
}
