//! Server Dashboard CLI
//!
//! Command-line host for the server monitoring dashboard.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use server_dashboard::{load_config, run, Action, Config, ServerForm, Status, StatusFilter};
use tracing::Level;

#[derive(Parser)]
#[command(name = "server-dashboard")]
#[command(about = "Server monitoring dashboard")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server API base URL (overrides config file)
    #[arg(long)]
    api_url: Option<String>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all servers, newest first
    List,
    /// Ping a server and refresh its status
    Ping {
        /// IP address of the server
        ip_address: String,
    },
    /// Show only servers with the given status (ALL, SERVER_UP, SERVER_DOWN)
    Filter { status: StatusFilter },
    /// Add a new server
    Add {
        #[arg(long)]
        ip: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        memory: String,
        #[arg(long = "type")]
        server_type: String,
        #[arg(long, default_value = "SERVER_DOWN")]
        status: Status,
    },
    /// Delete a server by id
    Delete { id: i64 },
    /// Re-fetch a single server by id
    Get { id: i64 },
}

impl From<Command> for Action {
    fn from(command: Command) -> Self {
        match command {
            Command::List => Action::List,
            Command::Ping { ip_address } => Action::Ping(ip_address),
            Command::Filter { status } => Action::Filter(status),
            Command::Add {
                ip,
                name,
                memory,
                server_type,
                status,
            } => Action::Add(ServerForm {
                ip_address: ip,
                name,
                memory,
                server_type,
                status,
            }),
            Command::Delete { id } => Action::Delete(id),
            Command::Get { id } => Action::Refresh(id),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, api_url={:?}, log_level={:?}, command={:?}",
        args.config,
        args.api_url,
        args.log_level,
        args.command
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(api_url) = args.api_url {
        config.api.base_url = api_url;
    }

    let view = run(&config, args.command.into()).await;

    Ok(match view.error_message() {
        Some(_) => ExitCode::FAILURE,
        None => ExitCode::SUCCESS,
    })
}
