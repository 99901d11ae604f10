use crate::blockchain::{ChainError, TransactionDraft};
use crate::cli::WriteArgs;
use crate::context::CommandContext;
use crate::error::CliResult;
use crate::output::{PropertyOutput, Render};
use crate::validation::{validate_hash_id, validate_property_key, validate_property_value};

/// Read one property. An absent key is an answer, not an error.
pub async fn get(ctx: &CommandContext, token_id: &str, key: &str) -> CliResult<String> {
    validate_hash_id("token", token_id)?;
    validate_property_key(key)?;

    let value = match ctx.client.get_token_property(token_id, key).await {
        Ok(property) => Some(property.value),
        Err(ChainError::NotFound { .. }) => None,
        Err(e) => return Err(e.into()),
    };

    PropertyOutput {
        token_id: token_id.to_string(),
        key: key.to_string(),
        value,
    }
    .render(ctx.format)
}

pub async fn set(
    ctx: &CommandContext,
    token_id: &str,
    key: &str,
    value: &str,
    write: WriteArgs,
) -> CliResult<String> {
    validate_hash_id("token", token_id)?;
    validate_property_key(key)?;
    validate_property_value(value)?;
    let options = write.submit_options(&ctx.wait)?;

    super::submit(ctx, TransactionDraft::token_update(token_id, key, value), options).await
}
