use crate::blockchain::ChainError;
use crate::context::CommandContext;
use crate::error::CliResult;
use crate::output::{Render, WalletOutput};
use crate::validation::validate_wallet_id;

pub async fn run(ctx: &CommandContext, id: &str) -> CliResult<String> {
    validate_wallet_id(id)?;

    let tokens = async {
        match ctx.client.get_wallet_tokens(id).await {
            // A wallet without tokens may have no token listing at all
            Err(ChainError::NotFound { .. }) => Ok(Vec::new()),
            other => other,
        }
    };

    let (wallet, tokens, configuration) = tokio::try_join!(
        ctx.client.get_wallet(id),
        tokens,
        ctx.client.get_node_configuration(),
    )?;

    WalletOutput {
        wallet,
        tokens,
        symbol: configuration.symbol,
    }
    .render(ctx.format)
}
