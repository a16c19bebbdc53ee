mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "immich-stats", &mut std::io::stdout());
            Ok(())
        }

        // Setup validates the raw host itself so URL errors keep their own class
        Command::Setup(args) => {
            let target = config::resolve_target(&cli.global)?;
            tracing::debug!(profile = %target.profile_name, "validating setup");
            commands::setup::handle(args, &target, &cli.global).await
        }

        cmd => {
            let target = config::resolve_target(&cli.global)?;
            let server = target.server_config()?;

            tracing::debug!(command = ?cmd, host = %server.credentials.host(), "dispatching command");
            commands::dispatch(cmd, &server, &cli.global).await
        }
    }
}
