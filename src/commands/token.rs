use crate::context::CommandContext;
use crate::error::CliResult;
use crate::output::{Render, TokenOutput};
use crate::validation::validate_hash_id;

pub async fn run(ctx: &CommandContext, id: &str) -> CliResult<String> {
    validate_hash_id("token", id)?;
    let record = ctx.client.get_token(id).await?;
    TokenOutput(record).render(ctx.format)
}
