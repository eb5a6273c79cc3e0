mod cancel;
mod cli;
mod client;
mod commands;
mod config;
mod controller;
mod error;
mod logging;
mod optimistic;
mod output;
mod state;
mod store;
mod types;
mod validation;

use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use cli::{Cli, Commands};
use client::UsersClient;
use config::Config;
use error::Result;
use std::error::Error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if std::env::args().any(|arg| arg == "--verbose" || arg == "-v") {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = std::error::Error::source(cause);
            }
        }

        let code = if matches!(e, error::UsersError::Interrupted) {
            130
        } else {
            1
        };
        std::process::exit(code);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);
    output::set_format(cli.output_format());
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't require config/client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "users", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        // Commands that talk to the API
        command => {
            let config = Config::load()?;
            let client = UsersClient::from_config(&config)?;

            match command {
                Commands::List => {
                    commands::users::list(client).await?;
                }
                Commands::Create(args) => {
                    commands::users::create(client, args).await?;
                }
                Commands::Update(args) => {
                    commands::users::update(client, args).await?;
                }
                Commands::Delete { id } => {
                    commands::users::delete(client, id).await?;
                }
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
