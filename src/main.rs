mod cli;
mod client;
mod commands;
mod config;
mod error;
mod output;
mod store;
mod types;

use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, UserCommands};
use client::DirectoryClient;
use config::Config;
use error::Result;
use std::error::Error;
use store::DirectoryStore;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let verbose = cli.verbose;

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = std::error::Error::source(cause);
            }
        }

        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    output::set_json_output(cli.json);

    match cli.command {
        // Commands that don't require config or network
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "userdir", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        // Commands that need the client and a session store
        command => {
            let config = Config::load()?;
            let client = DirectoryClient::new(config.base_url()?);
            let store = DirectoryStore::new(client);

            match command {
                Commands::Users(args) => {
                    commands::users::list(&store, args).await?;
                }
                Commands::User { action } => match action {
                    UserCommands::List(args) => {
                        commands::users::list(&store, args).await?;
                    }
                    UserCommands::View { id } => {
                        commands::users::view(&store, &id).await?;
                    }
                },
                Commands::Browse => {
                    commands::browse::run(&store).await?;
                }
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
