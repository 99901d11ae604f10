use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

use idchain_cli::{commands, observability, Cli, CommandContext};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    observability::logging::init(cli.verbose);

    let network = match cli.network() {
        Ok(network) => network,
        Err(e) => e.exit(),
    };

    let Cli {
        format,
        config,
        command,
        ..
    } = cli;

    let result = async {
        let ctx = CommandContext::new(network, config.as_deref(), format)?;
        commands::run(&ctx, command).await
    }
    .await;

    match result {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("{} {}", "Error:".red().bold(), e);
            if e.is_validation() {
                eprintln!("{}", "Nothing was sent to the network.".dimmed());
            }
            ExitCode::FAILURE
        }
    }
}
