//! nexmove CLI - move a Maven artifact out of a Nexus staging repository

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;
mod error;
mod exit_codes;

use commands::relocate::MoveArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "nexmove")]
#[command(version)]
#[command(about = "Move a Maven artifact from a Nexus staging repository to its target", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output, including settings lookups
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch from staging, publish to the target, delete from staging
    Move(MoveArgs),

    /// List server ids and usernames from the settings file
    Servers {
        #[command(subcommand)]
        action: Option<ServersAction>,

        /// Settings file (default: ~/.config/nexmove/settings.yaml)
        #[arg(long, global = true)]
        settings: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ServersAction {
    /// Add or replace the credentials for a server id
    Add {
        /// Server id (the repository id it authenticates against)
        id: String,

        #[arg(long)]
        username: String,

        /// Password stored as given
        #[arg(long, group = "secret")]
        password: Option<String>,

        /// Store a ${env.NAME} reference instead of the password itself
        #[arg(long, group = "secret")]
        password_env: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "nexmove=debug,nexmove_repo=debug"
    } else {
        "nexmove=info,nexmove_repo=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> error::Result<()> {
    match cli.command {
        Commands::Move(args) => {
            let rt = tokio::runtime::Runtime::new()
                .map_err(|e| CliError::internal(format!("failed to start runtime: {}", e)))?;
            rt.block_on(commands::relocate::run(&args, cli.verbose))
        }
        Commands::Servers {
            action,
            settings,
            json,
        } => match action {
            None => commands::servers::run(settings.as_ref(), json),
            Some(ServersAction::Add {
                id,
                username,
                password,
                password_env,
            }) => {
                let password = match (password, password_env) {
                    (_, Some(name)) => format!("${{env.{}}}", name),
                    (Some(password), None) => password,
                    (None, None) => {
                        return Err(CliError::config_with_help(
                            "No password given",
                            "Pass --password or --password-env",
                        ));
                    }
                };
                commands::servers::add(settings.as_ref(), &id, &username, &password)
            }
        },
    }
}

fn main() {
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
