use crate::context::CommandContext;
use crate::error::CliResult;
use crate::output::{Render, TransactionOutput};
use crate::validation::validate_hash_id;

pub async fn run(ctx: &CommandContext, id: &str) -> CliResult<String> {
    validate_hash_id("transaction", id)?;
    let record = ctx.client.get_transaction(id).await?;
    TransactionOutput(record).render(ctx.format)
}
