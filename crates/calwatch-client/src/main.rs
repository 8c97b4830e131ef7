//! calwatch CLI entry point.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use calwatch_client::cli::{Cli, Command, ConfigAction};
use calwatch_client::commands;
use calwatch_client::config::WatchFaceConfig;
use calwatch_client::error::ClientResult;
use calwatch_core::{TracingConfig, init_tracing};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let config = WatchFaceConfig::resolve(&cli)?;

    init_tracing(TracingConfig::for_debug(config.debug))?;
    debug!(?config, "configuration loaded");

    let mut stdout = io::stdout().lock();
    match cli.command {
        None => commands::render::render(&config, None, false, false, &mut stdout),
        Some(Command::Render { at, json, ambient }) => {
            commands::render::render(&config, at, json, ambient, &mut stdout)
        }
        Some(Command::Events { at, json }) => commands::events::list(&config, at, json, &mut stdout),
        Some(Command::Run { frames, ambient }) => {
            let drawn = commands::run::run(&config, frames, ambient, &mut stdout).await?;
            debug!(drawn, "run finished");
            Ok(())
        }
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(&config, &mut stdout),
            ConfigAction::Validate => commands::config::validate(&config, &mut stdout),
            ConfigAction::Path => commands::config::path(&mut stdout),
        },
    }
}
