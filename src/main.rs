mod cli;
mod client;
mod commands;
mod config;
mod error;
mod form;
mod output;
mod prompt;
mod sync;
mod types;

#[cfg(test)]
mod testing;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use client::UsersClient;
use config::Config;
use error::Result;
use prompt::StdinConfirm;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        output::print_error(&format!("Error: {e}"));

        // Show error chain if verbose flag was passed
        if std::env::args().any(|arg| arg == "--verbose" || arg == "-v") {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` wins over the `--verbose` default.
fn setup_tracing(verbose: bool) {
    let default = if verbose { "users=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .compact()
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);
    output::set_format(cli.output_format());
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't talk to the service
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "users", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        command => {
            let config = Config::load()?;
            let client = UsersClient::new(config.api_url(cli.api_url.as_deref())?)?;

            match command {
                Commands::List => commands::users::list(client).await?,
                Commands::Add(args) => commands::users::add(client, args).await?,
                Commands::Update(args) => commands::users::update(client, args).await?,
                Commands::Delete(args) => commands::users::delete(client, args).await?,
                Commands::Shell => commands::shell::run(client, &mut StdinConfirm).await?,
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
