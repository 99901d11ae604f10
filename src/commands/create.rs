use crate::blockchain::{TokenType, TransactionDraft};
use crate::cli::WriteArgs;
use crate::context::CommandContext;
use crate::error::CliResult;
use crate::validation::{validate_explicit_value, validate_hash_id};

/// Resolve the value's fingerprint and mint it as a token.
pub async fn run(
    ctx: &CommandContext,
    token_type: TokenType,
    value: &str,
    write: WriteArgs,
) -> CliResult<String> {
    validate_explicit_value(value)?;
    let options = write.submit_options(&ctx.wait)?;

    let token_id = ctx.fingerprint_client()?.compute(token_type, value).await?;
    validate_hash_id("token", &token_id)?;
    tracing::info!(token_id = %token_id, token_type = token_type.name(), "Fingerprint resolved");

    super::submit(ctx, TransactionDraft::token_mint(&token_id, token_type), options).await
}
