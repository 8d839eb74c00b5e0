use clap::Args;

use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::generate::generate_release_notes;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Identifier of the stored release.
    pub release_id: String,
}

pub async fn run(ctx: &AppContext, args: GenerateArgs) -> AppResult<String> {
    generate_release_notes(ctx, &args.release_id).await
}
