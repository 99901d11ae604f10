//! Command implementations.
//!
//! Each command validates its arguments before any network call, then
//! renders its result in the format chosen on the command line.

mod create;
mod fingerprint;
mod property;
mod send;
mod status;
mod token;
mod transaction;
mod wallet;

use crate::blockchain::{SubmitOptions, TransactionDraft, TransactionPipeline};
use crate::cli::{Command, PropertyCommand};
use crate::context::CommandContext;
use crate::error::CliResult;
use crate::output::Render;
use crate::resilience::TokioDelay;
use crate::security::TerminalPrompt;

/// Run `command` and return its rendered output.
pub async fn run(ctx: &CommandContext, command: Command) -> CliResult<String> {
    match command {
        Command::Status => status::run(ctx).await,
        Command::Wallet { id } => wallet::run(ctx, &id).await,
        Command::Transaction { id } => transaction::run(ctx, &id).await,
        Command::Token { id } => token::run(ctx, &id).await,
        Command::Property(PropertyCommand::Get { token_id, key }) => {
            property::get(ctx, &token_id, &key).await
        }
        Command::Property(PropertyCommand::Set {
            token_id,
            key,
            value,
            write,
        }) => property::set(ctx, &token_id, &key, &value, write).await,
        Command::Fingerprint { token_type, value } => {
            fingerprint::run(ctx, token_type, &value).await
        }
        Command::Send { to, amount, write } => send::run(ctx, &to, &amount, write).await,
        Command::Create {
            token_type,
            value,
            write,
        } => create::run(ctx, token_type, &value, write).await,
    }
}

/// Push `draft` through the transaction pipeline with terminal prompting.
async fn submit(
    ctx: &CommandContext,
    draft: TransactionDraft,
    options: SubmitOptions,
) -> CliResult<String> {
    let pipeline = TransactionPipeline::new(&ctx.client, &ctx.config, TerminalPrompt, TokioDelay);
    let report = pipeline.submit(draft, options).await?;
    report.render(ctx.format)
}
