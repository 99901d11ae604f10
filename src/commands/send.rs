use crate::blockchain::TransactionDraft;
use crate::cli::WriteArgs;
use crate::context::CommandContext;
use crate::error::CliResult;
use crate::validation::{parse_amount, validate_wallet_id};

pub async fn run(
    ctx: &CommandContext,
    to: &str,
    amount: &str,
    write: WriteArgs,
) -> CliResult<String> {
    validate_wallet_id(to)?;
    let amount = parse_amount("amount", amount)?;
    let options = write.submit_options(&ctx.wait)?;

    tracing::debug!(recipient = to, amount, "Preparing transfer");
    super::submit(ctx, TransactionDraft::transfer(to, amount), options).await
}
