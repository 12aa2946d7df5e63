use clap::Parser;

mod cli;
mod commands;
mod domain;
mod services;

use cli::Cli;
use commands::{handle_namespace_commands, handle_policy_commands};
use services::settings::{init_logging, load_config, Settings};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::resolve(&cli, load_config()?);
    init_logging(settings.debug);
    tracing::debug!(host = %settings.host, endpoint = %settings.endpoint, "resolved settings");

    if handle_policy_commands(&cli, &settings)? {
        return Ok(());
    }
    handle_namespace_commands(&cli, &settings)?;

    Ok(())
}
