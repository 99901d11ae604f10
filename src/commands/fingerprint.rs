use crate::blockchain::TokenType;
use crate::context::CommandContext;
use crate::error::CliResult;
use crate::output::{FingerprintOutput, Render};
use crate::validation::validate_explicit_value;

pub async fn run(ctx: &CommandContext, token_type: TokenType, value: &str) -> CliResult<String> {
    validate_explicit_value(value)?;
    let fingerprint = ctx.fingerprint_client()?.compute(token_type, value).await?;

    FingerprintOutput {
        token_type: token_type.name().to_string(),
        value: value.to_string(),
        fingerprint,
    }
    .render(ctx.format)
}
