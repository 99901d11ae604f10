use crate::context::CommandContext;
use crate::error::CliResult;
use crate::output::{Render, StatusOutput};

pub async fn run(ctx: &CommandContext) -> CliResult<String> {
    let (status, configuration, blockchain) = tokio::try_join!(
        ctx.client.get_node_status(),
        ctx.client.get_node_configuration(),
        ctx.client.get_blockchain(),
    )?;

    StatusOutput {
        network: ctx.network,
        api_url: ctx.config.api_url.clone(),
        status,
        configuration,
        blockchain,
    }
    .render(ctx.format)
}
